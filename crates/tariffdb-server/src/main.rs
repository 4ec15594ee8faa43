//! tariffdb-server — serves `GET /suggestions` over a store built with
//! `tariffdb build`.
//!
//!   $ tariffdb-server --db data/tariffs.db --bind 127.0.0.1:8000
//!   $ curl 'http://127.0.0.1:8000/suggestions?query=durum%20wheat'

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tariffdb_core::loader::default_store_path;
use tariffdb_server::{serve, AppState};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tariffdb-server", version, about = "HTTP suggestion endpoint for tariff codes")]
struct ServerArgs {
    /// Path to the SQLite store (default: tariffs.db in the core data dir)
    #[arg(short = 'd', long = "db", env = "TARIFFDB_DB")]
    db: Option<PathBuf>,

    /// Address to listen on
    #[arg(short = 'b', long = "bind", env = "TARIFFDB_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServerArgs::parse();
    let db = args.db.unwrap_or_else(default_store_path);
    if !db.is_file() {
        tracing::warn!(db = %db.display(), "store not found; run `tariffdb build` first");
    }

    serve(args.bind, AppState::new(db)).await
}
