//! Deterministic ordering for search hits and scan results
//!
//! Two orderings live here: relevance ranking for keyword search over
//! flattened records, and citation ordering for scan output. Both are
//! stable so that equal keys keep their source order.

use crate::config::SearchConfig;
use crate::document::CitationPath;
use crate::normalize::{extract_date_digits, normalize};
use crate::table::FlattenedRecord;

/// Sentinel for missing or non-numeric citation components; sorts last.
const NO_NUMBER: u64 = u64::MAX;

/// Effective-date sentinel for unparseable dates; sorts last under the
/// descending date ordering.
pub const NO_DATE: &str = "00000000";

/// First run of decimal digits in a citation label ("제29조" → 29).
pub fn citation_number(label: &str) -> Option<u64> {
    let normalized = normalize(label);
    let mut digits = String::new();
    for ch in normalized.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if !digits.is_empty() {
            break;
        }
    }
    digits.parse().ok()
}

/// Four-component numeric sort key for a citation path. Components that
/// are absent or carry no digits take the large sentinel so they order
/// after every real number.
pub fn citation_key(path: &CitationPath) -> [u64; 4] {
    let component = |label: Option<&String>| {
        label
            .and_then(|s| citation_number(s))
            .unwrap_or(NO_NUMBER)
    };
    [
        citation_number(&path.article).unwrap_or(NO_NUMBER),
        component(path.paragraph.as_ref()),
        component(path.item.as_ref()),
        component(path.sub_item.as_ref()),
    ]
}

/// Normalized eight-digit date for descending effective-date ranking.
pub fn date_key(date: &str) -> String {
    extract_date_digits(date).unwrap_or_else(|| NO_DATE.to_string())
}

/// A search hit with its relevance score.
#[derive(Debug, Clone)]
pub struct RankedHit<'a> {
    pub record: &'a FlattenedRecord,
    pub score: u32,
}

/// Rank records against a keyword.
///
/// A record is a hit when every whitespace-separated token of the
/// keyword occurs in at least one scored field. Score is the weighted
/// occurrence count across fields (body, then title, then citation
/// number, then law name), plus a fixed bonus when the whole keyword
/// appears verbatim in any field. Descending by score, ties in source
/// order.
pub fn search_records<'a>(
    records: &'a [FlattenedRecord],
    keyword: &str,
    config: &SearchConfig,
) -> Vec<RankedHit<'a>> {
    let query = normalize(keyword);
    if query.is_empty() {
        return Vec::new();
    }
    let tokens: Vec<&str> = query.split(' ').collect();

    let mut hits: Vec<RankedHit<'a>> = records
        .iter()
        .filter_map(|record| {
            let fields = [
                (normalize(&record.text), config.body_weight),
                (normalize(&record.title), config.title_weight),
                (normalize(&record.article_no), config.number_weight),
                (normalize(&record.law_name), config.law_name_weight),
            ];

            let all_tokens_present = tokens
                .iter()
                .all(|token| fields.iter().any(|(field, _)| field.contains(token)));
            if !all_tokens_present {
                return None;
            }

            let mut score = 0u32;
            for (field, weight) in &fields {
                for token in &tokens {
                    score += *weight * field.matches(token).count() as u32;
                }
            }
            if fields.iter().any(|(field, _)| field.contains(query.as_str())) {
                score += config.exact_phrase_bonus;
            }
            Some(RankedHit { record, score })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

/// Sort scan results ascending by their 4-tuple citation key (stable).
pub fn sort_by_citation<T, F>(results: &mut [T], path_of: F)
where
    F: Fn(&T) -> &CitationPath,
{
    results.sort_by_key(|r| citation_key(path_of(r)));
}
