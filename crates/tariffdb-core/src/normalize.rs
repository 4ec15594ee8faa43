// crates/tariffdb-core/src/normalize.rs

//! # Hierarchy Normalizer
//!
//! Rebuilds ancestor context for a flat, dot-delimited code hierarchy.
//!
//! The feed lists headings before their children, so the normalizer only has
//! to remember the most recent label at each of the two context levels:
//!
//! | segments | role                         | `full_context`                  |
//! |----------|------------------------------|---------------------------------|
//! | 1 or 2   | redefines `level1`           | own label                       |
//! | 3        | redefines `level2`           | `level1 - own`                  |
//! | 4+       | leaf under `level1`/`level2` | `level1 - level2 - own`         |

use crate::model::{rate_value, Rates, TariffRecord, CONTEXT_SEPARATOR, DEFAULT_COUNTRY_CODE};
use crate::raw::TariffRow;
use chrono::Utc;

/// Most recently seen labels at the two context levels.
///
/// Scoped to one ingestion run; a fresh [`Normalizer`] starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyState {
    pub level1: String,
    pub level2: String,
}

/// Number of dot-delimited segments. An empty code still counts as one.
pub fn hierarchy_level(code: &str) -> u32 {
    code.split('.').count() as u32
}

/// Removes separator debris left by empty ancestor labels (and any leading
/// dash markers on the labels themselves).
pub fn trim_separators(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '-')
}

impl HierarchyState {
    /// Applies one row to the state and returns its untrimmed context.
    fn advance(&mut self, level: u32, label: &str) -> String {
        match level {
            0..=2 => {
                self.level1 = label.to_owned();
                label.to_owned()
            }
            3 => {
                self.level2 = label.to_owned();
                [self.level1.as_str(), label].join(CONTEXT_SEPARATOR)
            }
            _ => [self.level1.as_str(), self.level2.as_str(), label].join(CONTEXT_SEPARATOR),
        }
    }
}

fn collect_rates(row: &TariffRow) -> Rates {
    row.rates
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(scheme, v)| ((*scheme).to_owned(), rate_value(v.trim())))
        .collect()
}

/// Stateful row-by-row normalizer for a single feed.
#[derive(Debug, Clone)]
pub struct Normalizer {
    country_code: String,
    state: HierarchyState,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY_CODE)
    }
}

impl Normalizer {
    pub fn new(country_code: &str) -> Self {
        Self {
            country_code: country_code.to_owned(),
            state: HierarchyState::default(),
        }
    }

    pub fn state(&self) -> &HierarchyState {
        &self.state
    }

    /// Normalizes one row, stamping it with the current time.
    pub fn normalize_row(&mut self, row: &TariffRow) -> TariffRecord {
        let now = Utc::now().to_rfc3339();
        self.normalize_row_at(row, &now)
    }

    /// Same as [`Normalizer::normalize_row`] with an explicit timestamp.
    pub fn normalize_row_at(&mut self, row: &TariffRow, timestamp: &str) -> TariffRecord {
        let level = hierarchy_level(&row.code);
        let context = self.state.advance(level, &row.description);

        TariffRecord {
            country_code: self.country_code.clone(),
            hs_code: row.code.clone(),
            original_description: row.description.clone(),
            full_context: trim_separators(&context).to_owned(),
            hierarchy_level: level,
            parent_category: self.state.level1.clone(),
            sub_category: self.state.level2.clone(),
            unit_of_measure: row.unit.clone(),
            effective_date: row.effective_date.clone(),
            rates: collect_rates(row),
            last_updated: timestamp.to_owned(),
        }
    }

    /// Normalizes a whole feed in order.
    pub fn normalize_all<'a, I>(&mut self, rows: I) -> Vec<TariffRecord>
    where
        I: IntoIterator<Item = &'a TariffRow>,
    {
        let now = Utc::now().to_rfc3339();
        rows.into_iter()
            .map(|row| self.normalize_row_at(row, &now))
            .collect()
    }
}
