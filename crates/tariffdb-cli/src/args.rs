use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for tariffdb-cli
#[derive(Debug, Parser)]
#[command(
    name = "tariffdb",
    version,
    about = "CLI for building and querying a tariff code store"
)]
pub struct CliArgs {
    /// Path to the SQLite store (default: tariffs.db in the core data dir)
    #[arg(short = 'd', long = "db", env = "TARIFFDB_DB", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ingest a tariff feed (CSV or CSV.gz) into the store
    Build {
        /// Feed to ingest (default: TPHS.csv in the core data dir)
        #[arg(short = 'i', long = "feed", env = "TARIFFDB_FEED")]
        feed: Option<PathBuf>,

        /// Origin tag stored with every record
        #[arg(short = 'c', long = "country", default_value = "CA")]
        country: String,
    },

    /// Suggest codes for a free-text search term (prints JSON)
    Suggest {
        /// Search term
        query: String,
    },

    /// Show one stored record
    Lookup {
        /// Hierarchical code, e.g. 0101.21.00
        hs_code: String,

        #[arg(short = 'c', long = "country", default_value = "CA")]
        country: String,
    },

    /// Show a summary of the store contents
    Stats,
}
