//! Row filter - include/exclude substring matching
//!
//! Decides row visibility from the current filter query. Terms are
//! whitespace-separated, except double-quoted spans which stay together
//! as a single phrase.

use regex::Regex;
use std::sync::LazyLock;

/// Regex to match a double-quoted phrase
static QUOTED_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]*)""#).unwrap());

/// Filter query state, mutated by the filter bar on every keystroke
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Rows must contain at least one of these terms to stay visible
    pub include: String,
    /// Rows containing any of these terms are hidden
    pub exclude: String,
    /// Whether the exclude field is active
    pub exclusion_enabled: bool,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && (!self.exclusion_enabled || self.exclude.is_empty())
    }
}

/// Split query text into lower-cased search terms
///
/// Quoted spans become single terms with the quotes stripped; the rest
/// splits on whitespace. An unterminated quote is not an error - its
/// content tokenizes like normal text.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = QUOTED_REGEX
        .captures_iter(text)
        .map(|c| c[1].to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let residue = QUOTED_REGEX.replace_all(text, " ");
    terms.extend(
        residue
            .split_whitespace()
            .map(|t| t.trim_matches('"').to_lowercase())
            .filter(|t| !t.is_empty()),
    );

    terms
}

/// Check whether any term is a substring of any cell (case-insensitive)
fn any_term_matches(cells: &[String], terms: &[String]) -> bool {
    terms
        .iter()
        .any(|term| cells.iter().any(|cell| cell.to_lowercase().contains(term)))
}

/// Decide visibility of a single row
///
/// `cells` are the displayed cell texts; the identifier field must not be
/// passed in here. Include and exclude are evaluated independently: a row
/// that satisfies the include terms can still be hidden by an exclude term.
pub fn is_row_visible(cells: &[String], query: &Query) -> bool {
    let include_terms = tokenize(&query.include);
    let match_include = include_terms.is_empty() || any_term_matches(cells, &include_terms);

    let match_exclude = if query.exclusion_enabled {
        let exclude_terms = tokenize(&query.exclude);
        !exclude_terms.is_empty() && any_term_matches(cells, &exclude_terms)
    } else {
        false
    };

    match_include && !match_exclude
}

/// Recompute visibility over the whole row set
///
/// Rows carry the synthesized identifier in field 0, which is excluded
/// from matching. Returns the indices of visible rows.
pub fn visible_rows(rows: &[Vec<String>], query: &Query) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| is_row_visible(row.get(1..).unwrap_or(&[]), query))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn include(text: &str) -> Query {
        Query {
            include: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tokenize_plain_words() {
        assert_eq!(tokenize("foo Bar  baz"), vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn test_tokenize_quoted_phrase() {
        assert_eq!(tokenize(r#"alpha "two words" beta"#), vec!["two words", "alpha", "beta"]);
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        // Dangling quote content falls back to plain word splitting
        assert_eq!(tokenize(r#"abc "def gh"#), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize(r#""""#).is_empty());
    }

    #[test]
    fn test_empty_query_shows_all_rows() {
        let rows = vec![
            vec!["1".to_string(), "apple".to_string()],
            vec!["2".to_string(), "banana".to_string()],
        ];
        assert_eq!(visible_rows(&rows, &Query::default()), vec![0, 1]);
    }

    #[test]
    fn test_include_any_term_any_column() {
        let row = cells(&["Milk", "02.05.25", "dairy"]);
        assert!(is_row_visible(&row, &include("bread milk")));
        assert!(is_row_visible(&row, &include("dairy")));
        assert!(!is_row_visible(&row, &include("bread butter")));
    }

    #[test]
    fn test_include_is_case_insensitive_substring() {
        let row = cells(&["Wholegrain Bread"]);
        assert!(is_row_visible(&row, &include("BREAD")));
        assert!(is_row_visible(&row, &include("grain")));
        assert!(!is_row_visible(&row, &include("breads")));
    }

    #[test]
    fn test_quoted_phrase_requires_contiguous_match() {
        let together = cells(&["a b c"]);
        let apart = cells(&["a x", "b y"]);
        let query = include(r#""a b""#);
        assert!(is_row_visible(&together, &query));
        assert!(!is_row_visible(&apart, &query));
    }

    #[test]
    fn test_exclude_hides_matching_rows() {
        let query = Query {
            include: String::new(),
            exclude: "banana".to_string(),
            exclusion_enabled: true,
        };
        let rows = vec![
            vec!["1".to_string(), "apple".to_string()],
            vec!["2".to_string(), "banana".to_string()],
        ];
        assert_eq!(visible_rows(&rows, &query), vec![0]);
    }

    #[test]
    fn test_exclude_ignored_when_disabled() {
        let query = Query {
            include: String::new(),
            exclude: "banana".to_string(),
            exclusion_enabled: false,
        };
        let row = cells(&["banana"]);
        assert!(is_row_visible(&row, &query));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let query = Query {
            include: "fruit".to_string(),
            exclude: "banana".to_string(),
            exclusion_enabled: true,
        };
        assert!(is_row_visible(&cells(&["apple", "fruit"]), &query));
        assert!(!is_row_visible(&cells(&["banana", "fruit"]), &query));
    }

    #[test]
    fn test_empty_cells_never_match() {
        assert!(!is_row_visible(&cells(&["", ""]), &include("x")));
    }

    #[test]
    fn test_identifier_field_excluded_from_matching() {
        let rows = vec![vec!["42".to_string(), "apple".to_string()]];
        assert!(visible_rows(&rows, &include("42")).is_empty());
    }
}
