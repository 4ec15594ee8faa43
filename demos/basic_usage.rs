//! Basic usage example for tariffdb-rs
//!
//! Builds a store from the bundled sample feed and runs a few suggestions.

use tariffdb_rs::loader::{build_database, default_data_dir};
use tariffdb_rs::search::suggest;
use tariffdb_rs::TariffStore;

fn main() -> anyhow::Result<()> {
    println!("=== tariffdb-rs Basic Usage Example ===\n");

    let dir = tempfile::tempdir()?;
    let store_path = dir.path().join("tariffs.db");
    let feed = default_data_dir().join("sample_tariff.csv");

    // Example 1: Build the store
    println!("--- Example 1: Building the store ---");
    let stats = build_database(&feed, &store_path, "CA")?;
    println!(
        "  {} rows read, {} inserted, {} duplicates skipped",
        stats.rows_read, stats.inserted, stats.duplicates_skipped
    );
    println!();

    let store = TariffStore::open_read_only(&store_path)?;

    // Example 2: Suggestions
    println!("--- Example 2: Suggestions ---");
    for query in ["horses", "Wheat, Durum!!", "slaughter"] {
        println!("  query: {query:?}");
        for hit in suggest(&store, query)? {
            println!("    {:<16} {}", hit.hs_code, hit.full_context);
        }
    }
    println!();

    // Example 3: Exact lookup with rates
    println!("--- Example 3: Lookup ---");
    if let Some(rec) = store.find_record("CA", "1001.19.00.10")? {
        println!("  {} ({})", rec.hs_code, rec.original_description);
        println!("  Context: {}", rec.full_context);
        println!("  Rates: {}", rec.rates_json());
    }

    Ok(())
}
