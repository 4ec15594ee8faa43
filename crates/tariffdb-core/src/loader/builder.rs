// crates/tariffdb-core/src/loader/builder.rs
use super::read_feed;
use crate::common::IngestStats;
use crate::error::Result;
use crate::normalize::Normalizer;
use crate::raw::TariffRow;
use crate::store::TariffStore;
use std::path::Path;
use tracing::info;

// -----------------------------------------------------------------------------
// BUILDER (Feed -> Store)
// -----------------------------------------------------------------------------

/// Builds (or tops up) a store from a feed file.
///
/// 1. Decode the whole feed. Any read or format error aborts here, before the
///    store is opened.
/// 2. Normalize rows in feed order with a fresh hierarchy state.
/// 3. Insert-or-ignore everything in one transaction.
///
/// Re-running on an unchanged feed inserts nothing.
pub fn build_database(feed_path: &Path, store_path: &Path, country_code: &str) -> Result<IngestStats> {
    info!(
        feed = %feed_path.display(),
        store = %store_path.display(),
        country = country_code,
        "building tariff store"
    );

    let rows = read_feed(feed_path)?;
    let mut store = TariffStore::open(store_path)?;
    ingest_rows(&mut store, &rows, country_code)
}

/// Normalizes `rows` and writes them into an already open store.
pub fn ingest_rows(store: &mut TariffStore, rows: &[TariffRow], country_code: &str) -> Result<IngestStats> {
    let records = Normalizer::new(country_code).normalize_all(rows);
    store.ingest(&records)
}
