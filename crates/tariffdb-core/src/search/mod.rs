// crates/tariffdb-core/src/search/mod.rs

//! # Suggestion Engine
//!
//! Cleans a free-text query, runs the literal pass and the relevance pass of
//! a [`SuggestionSource`], and merges both into one list with a single entry
//! per `hs_code`.
//!
//! Order of the result:
//! 1. literal-pass hits, in source order;
//! 2. relevance-pass hits not already seen, in rank order.

mod memory;
mod text;

pub use memory::MemoryIndex;
pub use text::{clean_search_text, match_expression, query_words};

use crate::error::Result;
use crate::model::Suggestion;
use crate::traits::SuggestionSource;
use std::collections::HashSet;
use tracing::debug;

/// Index column searched by the relevance pass.
pub const RELEVANCE_COLUMN: &str = "full_context";

/// Patterns derived once from a cleaned query and shared by both passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    /// Cleaned query; also the exact-match pattern.
    pub cleaned: String,
    /// `LIKE` prefix pattern (`cleaned%`).
    pub prefix: String,
    /// `LIKE` substring pattern (`%cleaned%`).
    pub contains: String,
    pub words: Vec<String>,
}

impl SearchTerms {
    pub fn from_query(query: &str) -> Self {
        let cleaned = clean_search_text(query);
        Self {
            prefix: format!("{cleaned}%"),
            contains: format!("%{cleaned}%"),
            words: query_words(&cleaned),
            cleaned,
        }
    }

    /// `true` when the query cleaned down to nothing.
    pub fn is_degenerate(&self) -> bool {
        self.cleaned.is_empty()
    }

    /// Index expression for the relevance pass, `None` for a degenerate query.
    pub fn match_expression(&self) -> Option<String> {
        match_expression(RELEVANCE_COLUMN, &self.words)
    }
}

/// Keeps the first occurrence of every `hs_code`, preserving order.
pub fn merge_unique<I>(candidates: I) -> Vec<Suggestion>
where
    I: IntoIterator<Item = Suggestion>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|s| seen.insert(s.hs_code.clone()))
        .collect()
}

/// Runs both passes against `source` and merges them.
///
/// A query that cleans to `""` matches every record through the literal pass
/// and skips the relevance pass. Any pass failure fails the whole call.
pub fn suggest<S>(source: &S, query: &str) -> Result<Vec<Suggestion>>
where
    S: SuggestionSource + ?Sized,
{
    let terms = SearchTerms::from_query(query);

    let literal = source.literal_pass(&terms)?;
    let relevance = if terms.words.is_empty() {
        Vec::new()
    } else {
        source.relevance_pass(&terms)?
    };
    debug!(
        query = %terms.cleaned,
        literal = literal.len(),
        relevance = relevance.len(),
        "suggestion passes complete"
    );

    Ok(merge_unique(literal.into_iter().chain(relevance)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TariffError;

    fn s(code: &str) -> Suggestion {
        Suggestion::new(code, code, code)
    }

    struct Fixed {
        literal: Vec<Suggestion>,
        relevance: Vec<Suggestion>,
    }

    impl SuggestionSource for Fixed {
        fn literal_pass(&self, _: &SearchTerms) -> Result<Vec<Suggestion>> {
            Ok(self.literal.clone())
        }
        fn relevance_pass(&self, _: &SearchTerms) -> Result<Vec<Suggestion>> {
            Ok(self.relevance.clone())
        }
    }

    struct Broken;

    impl SuggestionSource for Broken {
        fn literal_pass(&self, _: &SearchTerms) -> Result<Vec<Suggestion>> {
            Ok(vec![s("01")])
        }
        fn relevance_pass(&self, _: &SearchTerms) -> Result<Vec<Suggestion>> {
            Err(TariffError::InvalidData("fts5: syntax error".into()))
        }
    }

    #[test]
    fn terms_from_query() {
        let t = SearchTerms::from_query("Wheat, Durum!!");
        assert_eq!(t.cleaned, "wheat durum");
        assert_eq!(t.prefix, "wheat durum%");
        assert_eq!(t.contains, "%wheat durum%");
        assert_eq!(t.words, vec!["wheat", "durum"]);
        assert!(!t.is_degenerate());
        assert!(SearchTerms::from_query(" ?! ").is_degenerate());
    }

    #[test]
    fn merge_keeps_first_occurrence() {
        let merged = merge_unique(vec![s("02"), s("01"), s("02"), s("03"), s("01")]);
        let codes: Vec<_> = merged.iter().map(|m| m.hs_code.as_str()).collect();
        assert_eq!(codes, vec!["02", "01", "03"]);
    }

    #[test]
    fn literal_position_wins_over_relevance() {
        let src = Fixed {
            literal: vec![s("10"), s("20")],
            relevance: vec![s("20"), s("30"), s("10")],
        };
        let codes: Vec<_> = suggest(&src, "x")
            .unwrap()
            .into_iter()
            .map(|m| m.hs_code)
            .collect();
        assert_eq!(codes, vec!["10", "20", "30"]);
    }

    #[test]
    fn degenerate_query_skips_relevance() {
        let hits = suggest(&Broken, "!!!").unwrap();
        assert_eq!(hits, vec![s("01")]);
    }

    #[test]
    fn pass_failure_fails_request() {
        assert!(suggest(&Broken, "horse").is_err());
    }
}
