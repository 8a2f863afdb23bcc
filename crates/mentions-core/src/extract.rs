//! Bold-mention extraction.
//!
//! A mention is any `**...**` span whose inner text holds neither `*` nor `]`.
//! The `]` exclusion keeps a match from running across the bracket syntax of a
//! markdown link. Captured text is trimmed, and anything shorter than the
//! minimum length is treated as styling rather than a page name.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Shortest trimmed span (in characters) that counts as a mention.
pub const MIN_MENTION_LEN: usize = 3;

static BOLD_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^*\]]+)\*\*").expect("bold mention pattern is a valid regex")
});

/// Extract candidate page titles from raw page content.
///
/// Equivalent to [`extract_mentions_with_min_len`] with [`MIN_MENTION_LEN`].
pub fn extract_mentions(content: &str) -> HashSet<String> {
    extract_mentions_with_min_len(content, MIN_MENTION_LEN)
}

/// Extract candidate page titles, discarding spans shorter than `min_len`
/// characters after trimming.
///
/// The result is a set: a title bolded several times appears once. Spans
/// inside an existing link (`[**Title**](...)`) are still reported; deciding
/// whether a candidate is already linked belongs to the renderer.
pub fn extract_mentions_with_min_len(content: &str, min_len: usize) -> HashSet<String> {
    if content.is_empty() {
        return HashSet::new();
    }

    BOLD_SPAN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|candidate| candidate.chars().count() >= min_len)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(set: HashSet<String>) -> Vec<String> {
        let mut v: Vec<String> = set.into_iter().collect();
        v.sort();
        v
    }

    #[test]
    fn empty_content_yields_nothing() {
        assert!(extract_mentions("").is_empty());
    }

    #[test]
    fn plain_text_yields_nothing() {
        assert!(extract_mentions("no emphasis here, just *italics*").is_empty());
    }

    #[test]
    fn length_boundary() {
        assert!(extract_mentions("**Hi**").is_empty());
        assert_eq!(sorted(extract_mentions("**Job**")), vec!["Job"]);
    }

    #[test]
    fn whitespace_is_trimmed_before_length_check() {
        assert!(extract_mentions("**  ab  **").is_empty());
        assert_eq!(sorted(extract_mentions("** Target **")), vec!["Target"]);
    }

    #[test]
    fn duplicates_collapse() {
        let found = extract_mentions("**Target** then **Target** and ** Target**");
        assert_eq!(found.len(), 1);
        assert!(found.contains("Target"));
    }

    #[test]
    fn multiple_spans_in_one_line() {
        let found = sorted(extract_mentions("See **Alpha**, **Beta** and **Gamma**."));
        assert_eq!(found, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn bold_inside_link_is_still_a_candidate() {
        let found = extract_mentions("read [**Getting Started**](start.md) first");
        assert!(found.contains("Getting Started"));
    }

    #[test]
    fn span_does_not_cross_closing_bracket() {
        // The only `**` pairs enclose a `]`, so nothing matches.
        assert!(extract_mentions("[link**](a.md) and **text]").is_empty());
    }

    #[test]
    fn case_is_preserved() {
        let found = sorted(extract_mentions("**target** and **Target**"));
        assert_eq!(found, vec!["Target", "target"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Two characters, four bytes.
        assert!(extract_mentions("**éé**").is_empty());
        assert_eq!(sorted(extract_mentions("**日本語**")), vec!["日本語"]);
    }

    #[test]
    fn spans_may_cover_newlines() {
        let found = extract_mentions("**Multi\nLine**");
        assert!(found.contains("Multi\nLine"));
    }

    #[test]
    fn custom_min_len() {
        assert_eq!(sorted(extract_mentions_with_min_len("**X**", 1)), vec!["X"]);
        assert!(extract_mentions_with_min_len("**Job**", 4).is_empty());
        assert!(extract_mentions_with_min_len("****", 0).is_empty());
    }
}
