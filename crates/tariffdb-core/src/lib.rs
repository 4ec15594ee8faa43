// crates/tariffdb-core/src/lib.rs

//! # tariffdb-core
//!
//! Ingests a hierarchical tariff schedule into SQLite and answers free-text
//! code suggestions.
//!
//! - [`normalize`] rebuilds ancestor context for every dot-delimited code.
//! - [`store`] persists records plus an FTS5 index kept in step with them.
//! - [`search`] merges a literal pass and a relevance pass into one
//!   deduplicated list.
//!
//! ```rust
//! use tariffdb_core::loader::builder::ingest_rows;
//! use tariffdb_core::search::suggest;
//! use tariffdb_core::{TariffRow, TariffStore};
//!
//! let rows = [
//!     TariffRow::new("10.01", "Wheat and meslin"),
//!     TariffRow::new("1001.11.00", "Durum wheat"),
//! ];
//! let mut store = TariffStore::open_in_memory().unwrap();
//! ingest_rows(&mut store, &rows, "CA").unwrap();
//!
//! // no description contains "wheat durum"; both match a word in context
//! let hits = suggest(&store, "Wheat, Durum!!").unwrap();
//! assert_eq!(hits.len(), 2);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod search;
pub mod store;
pub mod traits;
// Shared Raw Input (feed rows before normalization)
pub mod raw;

// Re-exports
pub use crate::common::{DbStats, IngestStats};
pub use crate::error::{Result, TariffError};
pub use crate::model::{Suggestion, TariffRecord, DEFAULT_COUNTRY_CODE};
pub use crate::normalize::{HierarchyState, Normalizer};
pub use crate::raw::{TariffRow, RATE_SCHEMES};
pub use crate::store::TariffStore;
pub use crate::traits::SuggestionSource;
