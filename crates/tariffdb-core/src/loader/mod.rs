// crates/tariffdb-core/src/loader/mod.rs

//! # Feed Loader
//!
//! Handles the Physical Layer (I/O, Decompression), decodes the CSV feed
//! into [`TariffRow`]s and delegates to the builder for normalization and
//! persistence.
//!
//! The whole feed is decoded before anything is written, so an unreadable
//! or malformed feed never leaves a half-built store behind.

use crate::error::Result;
use crate::raw::{TariffRow, TariffRowRaw};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod builder;
pub mod common_io;

pub use builder::build_database;

/// Default store filename inside [`default_data_dir`].
pub const DEFAULT_STORE_FILENAME: &str = "tariffs.db";

/// Default feed filename inside [`default_data_dir`].
pub const DEFAULT_FEED_FILENAME: &str = "TPHS.csv";

/// `data/` next to this crate's manifest.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn default_store_path() -> PathBuf {
    default_data_dir().join(DEFAULT_STORE_FILENAME)
}

pub fn default_feed_path() -> PathBuf {
    default_data_dir().join(DEFAULT_FEED_FILENAME)
}

/// Reads and cleans every row of a CSV feed (plain or `.gz`).
pub fn read_feed(path: impl AsRef<Path>) -> Result<Vec<TariffRow>> {
    let path = path.as_ref();
    let reader = common_io::open_stream(path)?;
    let rows = read_feed_from_reader(reader)?;
    info!(path = %path.display(), rows = rows.len(), "feed decoded");
    Ok(rows)
}

/// Decodes a CSV feed from any reader. The first record must be the header.
pub fn read_feed_from_reader<R: Read>(reader: R) -> Result<Vec<TariffRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<TariffRowRaw>() {
        rows.push(TariffRow::from(result?));
    }
    Ok(rows)
}
