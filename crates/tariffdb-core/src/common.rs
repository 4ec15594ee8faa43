// crates/tariffdb-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the store.
///
/// Returned by [`crate::TariffStore::stats`]. `records` and `index_entries`
/// are equal for any store written by this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub records: usize,
    pub index_entries: usize,
    pub countries: usize,
}

/// Outcome of one ingestion run.
///
/// Every inserted record gets exactly one index entry, so the index count
/// is [`DbStats::index_entries`] on the finished store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub rows_read: usize,
    pub inserted: usize,
    pub duplicates_skipped: usize,
}
