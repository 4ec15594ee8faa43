// crates/tariffdb-core/src/traits.rs
use crate::error::Result;
use crate::model::Suggestion;
use crate::search::SearchTerms;

/// The two match strategies behind the suggestion engine.
///
/// Implemented by [`crate::TariffStore`] (SQLite + FTS5) and by
/// [`crate::search::MemoryIndex`] for fixture-driven tests. Each pass returns
/// candidates in its own order; merging and deduplication happen in
/// [`crate::search::suggest`], never in the source.
///
/// # Examples
/// ```rust
/// use tariffdb_core::search::{suggest, MemoryIndex};
/// use tariffdb_core::{Normalizer, TariffRow};
///
/// let rows = [
///     TariffRow::new("01.01", "Live horses"),
///     TariffRow::new("0101.21.00", "Pure-bred breeding animals"),
/// ];
/// let records = Normalizer::default().normalize_all(&rows);
/// let index = MemoryIndex::from_records(records);
///
/// let hits = suggest(&index, "Horses!").unwrap();
/// assert_eq!(hits[0].hs_code, "01.01");
/// assert_eq!(hits.len(), 2);
/// ```
pub trait SuggestionSource {
    /// Exact, prefix or substring match on the record's own description.
    fn literal_pass(&self, terms: &SearchTerms) -> Result<Vec<Suggestion>>;

    /// Any-word match on the reconstructed ancestor context.
    ///
    /// Only called when the cleaned query has at least one word.
    fn relevance_pass(&self, terms: &SearchTerms) -> Result<Vec<Suggestion>>;
}
