//! Exact-match selection among candidate documents
//!
//! Several versions of the same statute can be loaded at once (one per
//! effective date). Selection is strict: the normalized candidate name
//! must equal the normalized query name, never merely contain it.

use crate::document::LawDocument;
use crate::normalize::normalize_compact;
use crate::rank::date_key;

/// Pick the exact-named candidate with the latest effective date.
///
/// Name comparison uses the whitespace-stripped NFKC form on both sides.
/// Unparseable dates rank last. `None` is the routine no-match outcome,
/// not a failure.
pub fn pick_latest_exact<'a>(
    candidates: &'a [LawDocument],
    query_name: &str,
) -> Option<&'a LawDocument> {
    let want = normalize_compact(query_name);
    if want.is_empty() {
        return None;
    }
    candidates
        .iter()
        .filter(|doc| normalize_compact(&doc.law_name) == want)
        .max_by_key(|doc| date_key(&doc.effective_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, date: &str) -> LawDocument {
        LawDocument {
            law_id: format!("{}-{}", name, date),
            law_name: name.to_string(),
            effective_date: date.to_string(),
            source_url: String::new(),
            articles: Vec::new(),
        }
    }

    #[test]
    fn latest_effective_date_wins_among_exact_names() {
        let candidates = vec![
            doc("산업안전보건법 시행규칙", "20230101"),
            doc("산업안전보건법 시행규칙", "20240701"),
        ];
        let picked = pick_latest_exact(&candidates, "산업안전보건법 시행규칙").unwrap();
        assert_eq!(picked.effective_date, "20240701");
    }

    #[test]
    fn substring_names_never_match() {
        let candidates = vec![doc("산업안전보건법 시행규칙", "20240701")];
        assert!(pick_latest_exact(&candidates, "산업안전보건법").is_none());
    }

    #[test]
    fn whitespace_and_width_differences_are_ignored() {
        let candidates = vec![doc("산업안전보건법  시행규칙", "20240701")];
        let picked = pick_latest_exact(&candidates, "산업안전보건법시행규칙");
        assert!(picked.is_some());
    }

    #[test]
    fn a_dated_exact_candidate_beats_an_undated_one() {
        let candidates = vec![
            doc("중대재해처벌법", "시행일 미상"),
            doc("중대재해처벌법", "20220127"),
        ];
        let picked = pick_latest_exact(&candidates, "중대재해처벌법").unwrap();
        assert_eq!(picked.effective_date, "20220127");
    }

    #[test]
    fn no_candidates_is_a_routine_none() {
        assert!(pick_latest_exact(&[], "산업안전보건법").is_none());
        let others = vec![doc("근로기준법", "20240101")];
        assert!(pick_latest_exact(&others, "산업안전보건법").is_none());
        assert!(pick_latest_exact(&others, "").is_none());
    }
}
