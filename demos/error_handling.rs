//! Error handling example for tariffdb-rs
//!
//! This example demonstrates how feed and store failures surface.

use tariffdb_rs::loader::build_database;
use tariffdb_rs::search::suggest;
use tariffdb_rs::{TariffError, TariffStore};

fn main() -> anyhow::Result<()> {
    println!("=== tariffdb-rs Error Handling Example ===\n");
    let dir = tempfile::tempdir()?;

    // Example 1: Missing feed
    println!("--- Example 1: Missing feed ---");
    match build_database(&dir.path().join("nope.csv"), &dir.path().join("a.db"), "CA") {
        Ok(_) => println!("  unexpected success"),
        Err(TariffError::NotFound(msg)) => println!("  not found: {msg}"),
        Err(e) => println!("  other error: {e}"),
    }
    println!();

    // Example 2: Feed without a required column; nothing is written
    println!("--- Example 2: Malformed feed ---");
    let feed = dir.path().join("broken.csv");
    std::fs::write(&feed, "TARIFF,UOM\n01,KGM\n")?;
    let store_path = dir.path().join("b.db");
    if let Err(e) = build_database(&feed, &store_path, "CA") {
        println!("  {e}");
        println!("  store created: {}", store_path.exists());
    }
    println!();

    // Example 3: Querying a store that was never built
    println!("--- Example 3: Missing store ---");
    match TariffStore::open_read_only(dir.path().join("c.db")) {
        Ok(store) => println!("  {} hits", suggest(&store, "horses")?.len()),
        Err(e) => println!("  {e}"),
    }

    Ok(())
}
