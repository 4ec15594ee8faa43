//! tariffdb-cli
//! ============
//!
//! Command-line interface for the `tariffdb-core` tariff store.
//!
//! This crate primarily provides a binary (`tariffdb`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Basic usage:
//!
//! ```text
//! tariffdb --help
//! tariffdb build --feed data/TPHS.csv
//! tariffdb suggest "durum wheat"
//! tariffdb lookup 0101.21.00
//! tariffdb stats
//! ```
//!
//! For programmatic access use the [`tariffdb-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
