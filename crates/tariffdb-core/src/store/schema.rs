//! SQLite DDL for the tariff store.
//!
//! All `CREATE` statements live here so they are reviewable and testable in
//! isolation.

use rusqlite::Connection;

/// Complete DDL for the tariff database.
///
/// Uses `IF NOT EXISTS` throughout so `apply_schema` is idempotent.
pub(crate) const SCHEMA_SQL: &str = r#"
-- Main table: one row per (country_code, hs_code).
CREATE TABLE IF NOT EXISTS tariffs (
    id                   INTEGER PRIMARY KEY,
    country_code         TEXT NOT NULL,
    hs_code              TEXT NOT NULL,
    original_description TEXT,
    full_context         TEXT NOT NULL,
    hierarchy_level      INTEGER,
    parent_category      TEXT,
    sub_category         TEXT,
    uom                  TEXT,
    effective_date       TEXT,
    rates                TEXT,             -- JSON object
    last_updated         TEXT,
    UNIQUE(country_code, hs_code)
);

CREATE INDEX IF NOT EXISTS idx_hs_code ON tariffs(hs_code);
CREATE INDEX IF NOT EXISTS idx_country ON tariffs(country_code);

-- External-content text index; rowid mirrors tariffs.id.
-- Porter stemming lets "horse" match "Horses".
CREATE VIRTUAL TABLE IF NOT EXISTS tariffs_fts USING fts5(
    hs_code,
    original_description,
    full_context,
    parent_category,
    sub_category,
    content='tariffs',
    content_rowid='id',
    tokenize='porter unicode61'
);
"#;

/// Apply the full schema to an open connection.
///
/// Safe to call multiple times.
pub(crate) fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
