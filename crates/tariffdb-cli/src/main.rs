//! tariffdb — Command-line interface for tariffdb-core
//!
//! Usage examples
//! --------------
//!
//! - Build the store from the schedule feed
//!   $ tariffdb build --feed TPHS.csv
//!   $ tariffdb --db /tmp/tariffs.db build --feed TPHS.csv.gz --country CA
//!
//! - Suggest codes for a search term
//!   $ tariffdb suggest "live horses"
//!
//! - Show a stored record with its rates
//!   $ tariffdb lookup 0101.21.00
//!
//! - Show overall stats
//!   $ tariffdb stats
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `info`).
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use tariffdb_core::loader::{build_database, default_feed_path, default_store_path};
use tariffdb_core::search::suggest;
use tariffdb_core::TariffStore;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let db_path = args.db.unwrap_or_else(default_store_path);

    match args.command {
        Commands::Build { feed, country } => {
            let feed = feed.unwrap_or_else(default_feed_path);
            let stats = build_database(&feed, &db_path, &country)
                .with_context(|| format!("building store from {}", feed.display()))?;
            println!("Store written to {}", db_path.display());
            println!("  Rows read: {}", stats.rows_read);
            println!("  Inserted: {}", stats.inserted);
            println!("  Duplicates skipped: {}", stats.duplicates_skipped);
        }

        Commands::Suggest { query } => {
            let store = TariffStore::open_read_only(&db_path)?;
            let hits = suggest(&store, &query)?;
            tracing::debug!(query = %query, hits = hits.len(), "suggest");
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }

        Commands::Lookup { hs_code, country } => {
            let store = TariffStore::open_read_only(&db_path)?;
            match store.find_record(&country, &hs_code)? {
                Some(r) => {
                    println!("Code: {} ({})", r.hs_code, r.country_code);
                    println!("Description: {}", r.original_description);
                    println!("Context: {}", r.full_context);
                    println!("Level: {}", r.hierarchy_level);
                    println!("Unit: {}", r.unit_of_measure);
                    println!("Effective: {}", r.effective_date);
                    println!("Rates: {}", r.rates_json());
                }
                None => eprintln!("No record found for: {country} {hs_code}"),
            }
        }

        Commands::Stats => {
            let stats = TariffStore::open_read_only(&db_path)?.stats()?;
            println!("Store statistics:");
            println!("  Records: {}", stats.records);
            println!("  Index entries: {}", stats.index_entries);
            println!("  Countries: {}", stats.countries);
        }
    }

    Ok(())
}
