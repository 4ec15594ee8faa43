// crates/tariffdb-core/src/search/text.rs

/// Normalizes raw search input.
///
/// Drops every character that is not an ASCII letter, ASCII digit or
/// whitespace, trims, then lowercases. Non-ASCII letters are dropped, not
/// transliterated.
///
/// # Examples
///
/// ```rust
/// use tariffdb_core::search::clean_search_text;
///
/// assert_eq!(clean_search_text("Wheat, Durum!!"), "wheat durum");
/// assert_eq!(clean_search_text("  "), "");
/// assert_eq!(clean_search_text("0101.21"), "010121");
/// ```
pub fn clean_search_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_ascii_lowercase()
}

/// Splits a cleaned query into index words.
pub fn query_words(cleaned: &str) -> Vec<String> {
    cleaned.split_whitespace().map(str::to_owned).collect()
}

/// Builds the any-word index expression restricted to `column`:
/// `column : ("w1" OR "w2")`. Returns `None` when there are no words.
///
/// Words come from [`clean_search_text`] and never contain quotes, so
/// wrapping them in `"` is enough to keep them literal.
pub fn match_expression(column: &str, words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let any = words
        .iter()
        .map(|w| format!("\"{w}\""))
        .collect::<Vec<_>>()
        .join(" OR ");
    Some(format!("{column} : ({any})"))
}

/// Lowercased alphanumeric tokens of a label, in order.
pub(crate) fn tokens(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaning_strips_punctuation_and_unicode() {
        assert_eq!(clean_search_text("Café au lait"), "caf au lait");
        assert_eq!(clean_search_text("\tHORSES\n"), "horses");
        assert_eq!(clean_search_text("%_'\""), "");
    }

    #[test]
    fn expression_ors_quoted_words() {
        let words = query_words("live  horses");
        assert_eq!(words, vec!["live", "horses"]);
        assert_eq!(
            match_expression("full_context", &words).as_deref(),
            Some("full_context : (\"live\" OR \"horses\")")
        );
        assert_eq!(match_expression("full_context", &[]), None);
    }

    #[test]
    fn tokens_split_on_punctuation() {
        let t: Vec<_> = tokens("Live Animals - Pure-bred").collect();
        assert_eq!(t, vec!["live", "animals", "pure", "bred"]);
    }
}
