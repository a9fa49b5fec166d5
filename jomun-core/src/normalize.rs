//! Text canonicalization for statute comparison and phrase search
//!
//! Korean statute text arrives from several sources (DRF XML, spreadsheet
//! exports) with inconsistent Unicode forms and line wrapping. Everything
//! that compares text goes through one of the forms here first.

use regex::{Regex, RegexBuilder};
use unicode_normalization::UnicodeNormalization;

/// NFKC-normalize and collapse every whitespace run to a single space.
///
/// Never fails; empty or whitespace-only input yields an empty string.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    let mut out = String::with_capacity(composed.len());
    let mut in_ws = false;
    for ch in composed.chars() {
        if ch.is_whitespace() {
            in_ws = true;
        } else {
            if in_ws && !out.is_empty() {
                out.push(' ');
            }
            in_ws = false;
            out.push(ch);
        }
    }
    out
}

/// NFKC-normalize and strip all whitespace. Identity-comparison form:
/// two law names are "the same" iff their compact forms are equal.
pub fn normalize_compact(text: &str) -> String {
    text.nfkc().filter(|c| !c.is_whitespace()).collect()
}

/// Extract the first run of exactly eight decimal digits (an effective
/// date like "20240701") from arbitrary text. Missing or shorter runs
/// yield `None`; callers substitute the all-zero sentinel for ranking.
pub fn extract_date_digits(text: &str) -> Option<String> {
    let mut run = String::new();
    for ch in text.nfkc() {
        if ch.is_ascii_digit() {
            run.push(ch);
            if run.len() == 8 {
                return Some(run);
            }
        } else {
            run.clear();
        }
    }
    None
}

/// Build a case-insensitive matcher where each literal space in the
/// keyword matches zero or more whitespace characters in the haystack.
///
/// Source text is line-wrapped and tag-stripped differently per origin,
/// so "중대재해 처벌" must still hit "중대재해\n처벌".
pub fn phrase_matcher(keyword: &str) -> Option<Regex> {
    let normalized = normalize(keyword);
    if normalized.is_empty() {
        return None;
    }
    let pattern = normalized
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s*");
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace_runs() {
        assert_eq!(normalize("제1조   목적\n\t시행"), "제1조 목적 시행");
    }

    #[test]
    fn normalize_handles_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn normalize_applies_nfkc_composition() {
        // Fullwidth digits and half-width jamo compose to their canonical forms.
        assert_eq!(normalize("제１２조"), "제12조");
    }

    #[test]
    fn compact_form_strips_all_whitespace() {
        assert_eq!(
            normalize_compact("산업안전보건법 시행 규칙"),
            "산업안전보건법시행규칙"
        );
    }

    #[test]
    fn date_digits_require_eight_in_a_row() {
        assert_eq!(
            extract_date_digits("시행 2024. 7. 1. [20240701]"),
            Some("20240701".to_string())
        );
        assert_eq!(extract_date_digits("2024-07-01"), None);
        assert_eq!(extract_date_digits(""), None);
    }

    #[test]
    fn phrase_matcher_relaxes_spaces() {
        let m = phrase_matcher("중대재해 처벌").unwrap();
        assert!(m.is_match("중대재해처벌"));
        assert!(m.is_match("중대재해 \n 처벌 등에 관한 법률"));
        assert!(!m.is_match("중대 재해"));
    }

    #[test]
    fn phrase_matcher_is_case_insensitive() {
        let m = phrase_matcher("KOSHA Guide").unwrap();
        assert!(m.is_match("kosha\nguide"));
    }

    #[test]
    fn phrase_matcher_escapes_regex_metacharacters() {
        let m = phrase_matcher("제1조(목적)").unwrap();
        assert!(m.is_match("제1조(목적)"));
        assert!(!m.is_match("제1조 목적"));
    }

    #[test]
    fn empty_keyword_builds_no_matcher() {
        assert!(phrase_matcher("").is_none());
        assert!(phrase_matcher("   ").is_none());
    }
}
