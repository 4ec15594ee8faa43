// crates/tariffdb-core/src/store/mod.rs

//! # Tariff Store
//!
//! SQLite persistence for normalized records: the `tariffs` table keyed by
//! `(country_code, hs_code)` and the `tariffs_fts` FTS5 index over the text
//! columns.
//!
//! The index row for a record is written only when the main insert actually
//! created a row, under the same row id. Duplicate codes therefore leave both
//! the table and the index untouched, and the two row counts never diverge.
//!
//! `last_updated` is written as the time of the insert; whatever the record
//! carried from normalization is not persisted.

mod schema;

use crate::common::{DbStats, IngestStats};
use crate::error::{Result, TariffError};
use crate::model::{Rates, Suggestion, TariffRecord};
use crate::search::SearchTerms;
use crate::traits::SuggestionSource;
use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, info};

use schema::apply_schema;

const LITERAL_SQL: &str = "
    SELECT hs_code, original_description, full_context
    FROM tariffs
    WHERE original_description LIKE ?1
       OR original_description LIKE ?2
       OR original_description LIKE ?3
    ORDER BY id";

const RELEVANCE_SQL: &str = "
    SELECT t.hs_code, t.original_description, t.full_context
    FROM tariffs t
    JOIN tariffs_fts ON t.id = tariffs_fts.rowid
    WHERE tariffs_fts MATCH ?1
    ORDER BY tariffs_fts.rank, t.id";

const RECORD_COLUMNS: &str = "country_code, hs_code, original_description, full_context,
    hierarchy_level, parent_category, sub_category, uom, effective_date, rates, last_updated";

/// Owns one SQLite connection. Dropping the store closes it.
pub struct TariffStore {
    conn: Connection,
}

impl TariffStore {
    /// Opens (or creates) a store for writing and applies the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens an existing store for queries. Fails with
    /// [`TariffError::NotFound`] instead of creating an empty database.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TariffError::NotFound(format!(
                "Store not found at {}",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Insert-or-ignore one record. Returns `true` when a new row was written.
    pub fn insert_record(&self, record: &TariffRecord) -> Result<bool> {
        insert_into(&self.conn, record, &Utc::now().to_rfc3339())
    }

    /// Writes a whole normalized feed in one transaction.
    pub fn ingest(&mut self, records: &[TariffRecord]) -> Result<IngestStats> {
        let tx = self.conn.transaction()?;
        let inserted_at = Utc::now().to_rfc3339();
        let mut stats = IngestStats {
            rows_read: records.len(),
            ..Default::default()
        };

        for record in records {
            if insert_into(&tx, record, &inserted_at)? {
                stats.inserted += 1;
            } else {
                debug!(hs_code = %record.hs_code, "duplicate code ignored");
                stats.duplicates_skipped += 1;
            }
        }
        tx.commit()?;

        info!(
            rows = stats.rows_read,
            inserted = stats.inserted,
            duplicates = stats.duplicates_skipped,
            "ingestion committed"
        );
        Ok(stats)
    }

    /// Exact lookup by key.
    pub fn find_record(&self, country_code: &str, hs_code: &str) -> Result<Option<TariffRecord>> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM tariffs WHERE country_code = ?1 AND hs_code = ?2"
        );
        let found = self
            .conn
            .query_row(&sql, params![country_code, hs_code], row_to_stored)
            .optional()?;

        found.map(StoredRecord::into_record).transpose()
    }

    pub fn stats(&self) -> Result<DbStats> {
        let count = |sql: &str| -> Result<usize> {
            let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
            Ok(n as usize)
        };
        Ok(DbStats {
            records: count("SELECT COUNT(*) FROM tariffs")?,
            // the docsize shadow table holds one row per indexed document;
            // counting tariffs_fts itself would read the content table
            index_entries: count("SELECT COUNT(*) FROM tariffs_fts_docsize")?,
            countries: count("SELECT COUNT(DISTINCT country_code) FROM tariffs")?,
        })
    }

    fn query_suggestions(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Suggestion>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_suggestion)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

impl SuggestionSource for TariffStore {
    fn literal_pass(&self, terms: &SearchTerms) -> Result<Vec<Suggestion>> {
        self.query_suggestions(
            LITERAL_SQL,
            params![terms.cleaned, terms.prefix, terms.contains],
        )
    }

    fn relevance_pass(&self, terms: &SearchTerms) -> Result<Vec<Suggestion>> {
        match terms.match_expression() {
            Some(expr) => self.query_suggestions(RELEVANCE_SQL, params![expr]),
            None => Ok(Vec::new()),
        }
    }
}

fn insert_into(conn: &Connection, record: &TariffRecord, inserted_at: &str) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO tariffs (
            country_code, hs_code, original_description, full_context, hierarchy_level,
            parent_category, sub_category, uom, effective_date, rates, last_updated
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            record.country_code,
            record.hs_code,
            record.original_description,
            record.full_context,
            record.hierarchy_level,
            record.parent_category,
            record.sub_category,
            record.unit_of_measure,
            record.effective_date,
            record.rates_json(),
            inserted_at,
        ],
    )?;
    if changed == 0 {
        return Ok(false);
    }

    conn.execute(
        "INSERT INTO tariffs_fts (
            rowid, hs_code, original_description, full_context, parent_category, sub_category
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            conn.last_insert_rowid(),
            record.hs_code,
            record.original_description,
            record.full_context,
            record.parent_category,
            record.sub_category,
        ],
    )?;
    Ok(true)
}

fn row_to_suggestion(row: &Row<'_>) -> rusqlite::Result<Suggestion> {
    Ok(Suggestion {
        hs_code: row.get(0)?,
        original_description: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        full_context: row.get(2)?,
    })
}

/// Row as read from SQLite, before the rates blob is decoded.
struct StoredRecord {
    record: TariffRecord,
    rates: Option<String>,
}

impl StoredRecord {
    fn into_record(self) -> Result<TariffRecord> {
        let mut record = self.record;
        if let Some(blob) = self.rates.filter(|b| !b.is_empty()) {
            record.rates = serde_json::from_str::<Rates>(&blob)?;
        }
        Ok(record)
    }
}

fn row_to_stored(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
    let text = |i: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(i)?.unwrap_or_default())
    };
    Ok(StoredRecord {
        record: TariffRecord {
            country_code: row.get(0)?,
            hs_code: row.get(1)?,
            original_description: text(2)?,
            full_context: row.get(3)?,
            hierarchy_level: row.get::<_, Option<u32>>(4)?.unwrap_or_default(),
            parent_category: text(5)?,
            sub_category: text(6)?,
            unit_of_measure: text(7)?,
            effective_date: text(8)?,
            rates: Rates::new(),
            last_updated: text(10)?,
        },
        rates: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use crate::raw::TariffRow;
    use crate::search::suggest;

    fn rows() -> Vec<TariffRow> {
        vec![
            TariffRow::new("01", "Live animals"),
            TariffRow::new("01.01", "Horses"),
            TariffRow::new("0101.21.00", "Pure-bred breeding animals")
                .with_unit("NMB")
                .with_rate("MFN", "Free"),
            TariffRow::new("0101.21.00.10", "Mares"),
            TariffRow::new("01.01", "Horses again"),
        ]
    }

    fn store() -> TariffStore {
        let mut store = TariffStore::open_in_memory().unwrap();
        let records = Normalizer::new("CA").normalize_all(&rows());
        store.ingest(&records).unwrap();
        store
    }

    #[test]
    fn duplicates_skip_table_and_index() {
        let mut store = TariffStore::open_in_memory().unwrap();
        let records = Normalizer::new("CA").normalize_all(&rows());
        let stats = store.ingest(&records).unwrap();

        assert_eq!(stats.rows_read, 5);
        assert_eq!(stats.inserted, 4);
        assert_eq!(stats.duplicates_skipped, 1);

        let db = store.stats().unwrap();
        assert_eq!(db.records, 4);
        assert_eq!(db.index_entries, 4);
        assert_eq!(db.countries, 1);
    }

    #[test]
    fn insert_record_reports_duplicates() {
        let store = TariffStore::open_in_memory().unwrap();
        let rec = Normalizer::new("CA").normalize_row(&TariffRow::new("01", "Live animals"));

        assert!(store.insert_record(&rec).unwrap());
        assert!(!store.insert_record(&rec).unwrap());
        assert_eq!(store.stats().unwrap().index_entries, 1);
    }

    #[test]
    fn last_updated_is_insertion_time() {
        let mut store = TariffStore::open_in_memory().unwrap();
        let stale = "2000-01-01T00:00:00+00:00";
        let rec = Normalizer::new("CA").normalize_row_at(&TariffRow::new("01", "Live animals"), stale);
        let before = Utc::now();
        store.ingest(&[rec]).unwrap();

        let stored = store.find_record("CA", "01").unwrap().unwrap();
        let stamped = chrono::DateTime::parse_from_rfc3339(&stored.last_updated).unwrap();
        assert_ne!(stored.last_updated, stale);
        assert!(stamped.timestamp() >= before.timestamp());
    }

    #[test]
    fn first_write_wins() {
        let rec = store().find_record("CA", "01.01").unwrap().unwrap();
        assert_eq!(rec.original_description, "Horses");
    }

    #[test]
    fn lookup_decodes_rates() {
        let rec = store().find_record("CA", "0101.21.00").unwrap().unwrap();
        assert_eq!(rec.unit_of_measure, "NMB");
        assert_eq!(rec.hierarchy_level, 3);
        assert_eq!(rec.rate("MFN"), Some(&serde_json::json!("Free")));
        assert!(store().find_record("US", "0101.21.00").unwrap().is_none());
    }

    #[test]
    fn literal_pass_is_case_insensitive() {
        let terms = SearchTerms::from_query("HORSES");
        let hits = store().literal_pass(&terms).unwrap();
        assert_eq!(hits, vec![Suggestion::new("01.01", "Horses", "Horses")]);
    }

    #[test]
    fn relevance_pass_searches_context() {
        let terms = SearchTerms::from_query("horse");
        let codes: Vec<_> = store()
            .relevance_pass(&terms)
            .unwrap()
            .into_iter()
            .map(|s| s.hs_code)
            .collect();
        assert_eq!(codes.len(), 3);
        assert!(codes.contains(&"0101.21.00.10".to_string()));
        assert!(!codes.contains(&"01".to_string()));
    }

    #[test]
    fn relevance_pass_ignores_other_indexed_columns() {
        let mut store = TariffStore::open_in_memory().unwrap();
        let rows = [
            TariffRow::new("01", "Live"),
            TariffRow::new("0101.10.00", "Bovine stuff"),
            TariffRow::new("02", "Meat"),
        ];
        let records = Normalizer::new("CA").normalize_all(&rows);
        // the level-1 row keeps the stale sub_category in the index
        assert_eq!(records[2].sub_category, "Bovine stuff");
        assert_eq!(records[2].full_context, "Meat");
        store.ingest(&records).unwrap();

        let codes = |q: &str| -> Vec<String> {
            suggest(&store, q).unwrap().into_iter().map(|s| s.hs_code).collect()
        };
        assert_eq!(codes("bovine"), vec!["0101.10.00"]);
        assert!(codes("0101").is_empty());
    }

    #[test]
    fn suggest_merges_both_passes() {
        let hits = suggest(&store(), "horse").unwrap();
        assert_eq!(hits[0].hs_code, "01.01");
        assert_eq!(hits.len(), 3);
    }
}
