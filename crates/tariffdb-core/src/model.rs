// crates/tariffdb-core/src/model.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Origin tag used when a feed does not declare one.
pub const DEFAULT_COUNTRY_CODE: &str = "CA";

/// Separator placed between ancestor labels in [`TariffRecord::full_context`].
pub const CONTEXT_SEPARATOR: &str = " - ";

/// Rate scheme name -> value. Only schemes present in the feed row are kept.
pub type Rates = Map<String, Value>;

/// A normalized tariff line, as persisted in the main table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TariffRecord {
    pub country_code: String,
    pub hs_code: String,
    pub original_description: String,
    /// Ancestor labels down to this record's own label.
    pub full_context: String,
    pub hierarchy_level: u32,
    pub parent_category: String,
    pub sub_category: String,
    pub unit_of_measure: String,
    /// Passed through from the feed, never parsed.
    pub effective_date: String,
    pub rates: Rates,
    /// RFC 3339 timestamp. Normalization stamps the batch time; the store
    /// replaces it with the time of insertion.
    pub last_updated: String,
}

impl TariffRecord {
    pub fn rate(&self, scheme: &str) -> Option<&Value> {
        self.rates.get(scheme)
    }

    /// The rates mapping as the JSON blob stored alongside the record.
    pub fn rates_json(&self) -> String {
        Value::Object(self.rates.clone()).to_string()
    }

    /// Projection returned by the suggestion engine.
    pub fn to_suggestion(&self) -> Suggestion {
        Suggestion {
            hs_code: self.hs_code.clone(),
            original_description: self.original_description.clone(),
            full_context: self.full_context.clone(),
        }
    }
}

/// One entry of a suggestion response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub hs_code: String,
    pub original_description: String,
    pub full_context: String,
}

impl Suggestion {
    pub fn new(hs_code: &str, original_description: &str, full_context: &str) -> Self {
        Self {
            hs_code: hs_code.to_owned(),
            original_description: original_description.to_owned(),
            full_context: full_context.to_owned(),
        }
    }
}

/// Numeric-looking cells become JSON numbers, everything else stays a string
/// (e.g. `"Free"`, `"5% + 2.5¢/kg"`).
pub fn rate_value(cell: &str) -> Value {
    cell.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_owned()))
}
