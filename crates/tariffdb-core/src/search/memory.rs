// crates/tariffdb-core/src/search/memory.rs
use super::text::tokens;
use super::SearchTerms;
use crate::error::Result;
use crate::model::{Suggestion, TariffRecord};
use crate::traits::SuggestionSource;
use std::collections::HashSet;

/// In-memory [`SuggestionSource`] over normalized records.
///
/// Mirrors the store semantics closely enough for fixtures: the literal pass
/// is an ASCII case-insensitive exact/prefix/substring test on the
/// description, the relevance pass matches words against context tokens.
/// Words and tokens are compared whole after a plural-ending strip, a much cruder
/// rule than the store's Porter stemmer: `horse` finds `Horses` in both, but
/// forms like `breeding`/`breed` only meet in the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    records: Vec<TariffRecord>,
}

impl MemoryIndex {
    /// Keeps the first record for each `(country_code, hs_code)`, like the
    /// store's insert-or-ignore.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TariffRecord>,
    {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| seen.insert((r.country_code.clone(), r.hs_code.clone())))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SuggestionSource for MemoryIndex {
    fn literal_pass(&self, terms: &SearchTerms) -> Result<Vec<Suggestion>> {
        let q = terms.cleaned.as_str();
        Ok(self
            .records
            .iter()
            .filter(|r| {
                let d = r.original_description.to_ascii_lowercase();
                d == q || d.starts_with(q) || d.contains(q)
            })
            .map(TariffRecord::to_suggestion)
            .collect())
    }

    fn relevance_pass(&self, terms: &SearchTerms) -> Result<Vec<Suggestion>> {
        // (matched words, position) so ties keep store order
        let mut scored: Vec<(usize, usize, &TariffRecord)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(pos, r)| {
                let stems: HashSet<String> = tokens(&r.full_context)
                    .map(|t| plural_stem(&t).to_owned())
                    .collect();
                let hits = terms
                    .words
                    .iter()
                    .filter(|w| stems.contains(plural_stem(w)))
                    .count();
                (hits > 0).then_some((hits, pos, r))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        Ok(scored.into_iter().map(|(_, _, r)| r.to_suggestion()).collect())
    }
}

/// Strips an English plural ending: `boxes` -> `box`, `mares` -> `mare`.
/// Words ending in `ss` are left alone.
pub(crate) fn plural_stem(word: &str) -> &str {
    if let Some(base) = word.strip_suffix("es") {
        if ["ss", "x", "z", "ch", "sh"].iter().any(|end| base.ends_with(end)) {
            return base;
        }
    }
    match word.strip_suffix('s') {
        Some(base) if !base.is_empty() && !base.ends_with('s') => base,
        _ => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use crate::raw::TariffRow;
    use crate::search::suggest;

    fn index() -> MemoryIndex {
        let rows = [
            TariffRow::new("01", "Live animals"),
            TariffRow::new("01.01", "Horses"),
            TariffRow::new("0101.21.00", "Pure-bred breeding animals"),
            TariffRow::new("0101.21.00.10", "Mares"),
            TariffRow::new("01.01", "Horses (duplicate)"),
            TariffRow::new("10.01", "Wheat and meslin"),
            TariffRow::new("1001.11.00", "Durum wheat"),
        ];
        MemoryIndex::from_records(Normalizer::new("CA").normalize_all(&rows))
    }

    fn codes(hits: Vec<Suggestion>) -> Vec<String> {
        hits.into_iter().map(|h| h.hs_code).collect()
    }

    #[test]
    fn duplicates_are_dropped_on_load() {
        assert_eq!(index().len(), 6);
    }

    #[test]
    fn horse_finds_label_and_context() {
        let hits = codes(suggest(&index(), "horse").unwrap());
        // literal: "Horses"; relevance: everything under the Horses heading
        assert_eq!(hits, vec!["01.01", "0101.21.00", "0101.21.00.10"]);
    }

    #[test]
    fn any_word_matches() {
        let hits = codes(suggest(&index(), "durum mares").unwrap());
        assert_eq!(hits, vec!["0101.21.00.10", "1001.11.00"]);
    }

    #[test]
    fn words_match_whole_tokens_only() {
        let rows = [
            TariffRow::new("07", "Vegetables"),
            TariffRow::new("0706.90.00", "Horseradish"),
        ];
        let index = MemoryIndex::from_records(Normalizer::new("CA").normalize_all(&rows));
        let terms = SearchTerms::from_query("horse");
        assert!(index.relevance_pass(&terms).unwrap().is_empty());
        assert_eq!(codes(suggest(&index, "vegetable").unwrap()), vec!["07", "0706.90.00"]);
    }

    #[test]
    fn plural_endings() {
        assert_eq!(plural_stem("horses"), "horse");
        assert_eq!(plural_stem("boxes"), "box");
        assert_eq!(plural_stem("peaches"), "peach");
        assert_eq!(plural_stem("classes"), "class");
        assert_eq!(plural_stem("glass"), "glass");
        assert_eq!(plural_stem("durum"), "durum");
        assert_eq!(plural_stem("s"), "s");
    }

    #[test]
    fn empty_query_lists_everything() {
        assert_eq!(suggest(&index(), "").unwrap().len(), 6);
    }

    #[test]
    fn results_are_unique_by_code() {
        let hits = codes(suggest(&index(), "animals horses wheat").unwrap());
        let unique: HashSet<_> = hits.iter().collect();
        assert_eq!(unique.len(), hits.len());
    }
}
