// crates/tariffdb-core/src/raw.rs
use serde::Deserialize;

/// Rate-scheme columns recognized in the feed, in the order they are
/// reported.
pub const RATE_SCHEMES: [&str; 8] = [
    "MFN",
    "General Tariff",
    "UST",
    "CCCT",
    "LDCT",
    "GPT",
    "CPTPT",
    "UKT",
];

/// Raw feed row as it comes from the CSV.
///
/// `TARIFF`, `DESC1` and `UOM` must be present as columns (a missing column
/// fails the whole feed); their cells may be empty. Everything else is
/// optional.
/// NOTE: This type mirrors the external schedule layout; cleaning happens in
/// [`TariffRow::from`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TariffRowRaw {
    #[serde(rename = "TARIFF")]
    pub tariff: String,
    #[serde(rename = "DESC1")]
    pub desc1: String,
    #[serde(rename = "UOM")]
    pub uom: String,
    #[serde(rename = "EFF_DATE", default)]
    pub eff_date: Option<String>,

    #[serde(rename = "MFN", default)]
    pub mfn: Option<String>,
    #[serde(rename = "General Tariff", default)]
    pub general_tariff: Option<String>,
    #[serde(rename = "UST", default)]
    pub ust: Option<String>,
    #[serde(rename = "CCCT", default)]
    pub ccct: Option<String>,
    #[serde(rename = "LDCT", default)]
    pub ldct: Option<String>,
    #[serde(rename = "GPT", default)]
    pub gpt: Option<String>,
    #[serde(rename = "CPTPT", default)]
    pub cptpt: Option<String>,
    #[serde(rename = "UKT", default)]
    pub ukt: Option<String>,
}

/// A cleaned feed row, ready for the hierarchy normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TariffRow {
    pub code: String,
    pub description: String,
    pub unit: String,
    pub effective_date: String,
    /// `(scheme, value)` pairs for every scheme with a non-empty cell,
    /// in [`RATE_SCHEMES`] order.
    pub rates: Vec<(&'static str, String)>,
}

impl TariffRow {
    /// Convenience constructor used by tests, demos and fixtures.
    pub fn new(code: &str, description: &str) -> Self {
        Self {
            code: code.to_owned(),
            description: description.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_owned();
        self
    }

    pub fn with_rate(mut self, scheme: &'static str, value: &str) -> Self {
        self.rates.push((scheme, value.to_owned()));
        self
    }
}

fn clean_opt(v: Option<String>) -> String {
    v.map(|s| s.trim().to_owned()).unwrap_or_default()
}

impl From<TariffRowRaw> for TariffRow {
    fn from(raw: TariffRowRaw) -> Self {
        let code = raw.tariff.trim().replace('"', "");

        let cells = [
            raw.mfn,
            raw.general_tariff,
            raw.ust,
            raw.ccct,
            raw.ldct,
            raw.gpt,
            raw.cptpt,
            raw.ukt,
        ];
        let rates = RATE_SCHEMES
            .iter()
            .zip(cells)
            .filter_map(|(scheme, cell)| {
                let value = cell?.trim().to_owned();
                (!value.is_empty()).then_some((*scheme, value))
            })
            .collect();

        TariffRow {
            code,
            description: raw.desc1.trim().to_owned(),
            unit: raw.uom.trim().to_owned(),
            effective_date: clean_opt(raw.eff_date),
            rates,
        }
    }
}
