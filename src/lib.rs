//! tariffdb-rs: umbrella crate re-exporting [`tariffdb_core`] for the demos.
//!
//! See `crates/tariffdb-core` for the library, `crates/tariffdb-cli` for the
//! `tariffdb` binary and `crates/tariffdb-server` for the HTTP endpoint.

pub use tariffdb_core::*;
