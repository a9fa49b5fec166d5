//! Full-traversal keyword scan over a statute document
//!
//! Scanning is a pure function over an already-built document: no I/O,
//! no mutation. Substring mode visits every node and matches against the
//! node's reconstructed full text (own text plus descendants), so a hit
//! in a leaf also surfaces at each ancestor level, each under its own
//! citation path. That ancestor inclusion is kept deliberately; callers
//! wanting leaf-only hits filter by `unit_type` or path depth.

use crate::document::{ArticleNode, CitationPath, LawDocument, MatchResult};
use crate::rank::sort_by_citation;
use crate::reconstruct::full_text;
use crate::table::FlattenedRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// How a scan decides that a node is a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Literal substring containment of the keyword in the node's full
    /// text. Deliberately not the whitespace-relaxed phrase matcher.
    #[default]
    Substring,
    /// Recurring-obligation detection on leaf units: an interval phrase
    /// and an obligation verb must co-occur in the same unit's text.
    Frequency,
}

/// Interval phrases that signal a recurring obligation.
fn interval_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"반기|분기|매월|매주|매년|정기|\d+\s*회\s*이상|연\s*\d+\s*회|월\s*\d+\s*회")
            .expect("interval pattern is valid")
    })
}

/// Obligation verbs that must accompany an interval phrase. Without this
/// gate every incidental frequency word (e.g. 반기 결산) would report.
fn obligation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"점검|평가|관리|확인|검토|실시|측정").expect("obligation pattern is valid")
    })
}

/// Scan every node of every article in the document.
///
/// Substring mode with an empty keyword returns no matches rather than
/// matching everything. Output is in citation order: ascending by the
/// numeric 4-tuple of the path, ties in traversal order.
pub fn scan_document(document: &LawDocument, keyword: &str, mode: ScanMode) -> Vec<MatchResult> {
    let keyword = keyword.trim();
    if mode == ScanMode::Substring && keyword.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for article in &document.articles {
        let path = CitationPath::article(&article.number);
        visit(article, path, document, keyword, mode, &mut results);
    }
    sort_by_citation(&mut results, |m| &m.path);
    results
}

fn visit(
    node: &ArticleNode,
    path: CitationPath,
    document: &LawDocument,
    keyword: &str,
    mode: ScanMode,
    results: &mut Vec<MatchResult>,
) {
    let text = full_text(node);
    let hit = match mode {
        ScanMode::Substring => text.contains(keyword),
        ScanMode::Frequency => {
            node.is_leaf()
                && is_recurring_obligation(&text)
                && (keyword.is_empty() || text.contains(keyword))
        }
    };
    if hit && !text.is_empty() {
        results.push(MatchResult {
            path: path.clone(),
            unit_type: node.unit_type,
            text,
            law_name: document.law_name.clone(),
            law_id: document.law_id.clone(),
            effective_date: document.effective_date.clone(),
            source_url: document.source_url.clone(),
        });
    }

    for child in &node.children {
        let child_path = path.descend(child.unit_type, &child.number);
        visit(child, child_path, document, keyword, mode, results);
    }
}

/// Both regex classes must hit within the same segment's text.
pub fn is_recurring_obligation(text: &str) -> bool {
    interval_pattern().is_match(text) && obligation_pattern().is_match(text)
}

/// Frequency scan over flattened records: each surviving source row is
/// one leaf-granularity segment.
pub fn scan_records_frequency(records: &[FlattenedRecord]) -> Vec<MatchResult> {
    let mut results = Vec::new();
    for record in records {
        for segment in &record.segments {
            if segment.text.is_empty() || !is_recurring_obligation(&segment.text) {
                continue;
            }
            results.push(MatchResult {
                path: segment.path.clone(),
                unit_type: segment.unit_type,
                text: segment.text.clone(),
                law_name: record.law_name.clone(),
                law_id: record.law_id.clone(),
                effective_date: record.effective_date.clone(),
                source_url: record.source_url.clone(),
            });
        }
    }
    sort_by_citation(&mut results, |m| &m.path);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::UnitType;

    fn sample_document() -> LawDocument {
        let mut article52 = ArticleNode::new(
            UnitType::Article,
            "제52조",
            "근로자는 작업을 중지할 수 있다.",
        );
        article52.children.push(ArticleNode::new(
            UnitType::Paragraph,
            "제1항",
            "산업재해가 발생할 급박한 위험이 있는 경우",
        ));

        let article36 = ArticleNode::new(
            UnitType::Article,
            "제36조",
            "위험성평가를 반기 1회 이상 실시하여야 한다.",
        );

        LawDocument {
            law_id: "001766".to_string(),
            law_name: "산업안전보건법".to_string(),
            effective_date: "20240517".to_string(),
            source_url: "https://law.go.kr".to_string(),
            articles: vec![article52, article36],
        }
    }

    #[test]
    fn leaf_hit_surfaces_at_every_ancestor_level() {
        let doc = sample_document();
        let results = scan_document(&doc, "급박", ScanMode::Substring);
        assert_eq!(results.len(), 2);
        // Paragraph sorts before the article level (absent components sort last).
        assert_eq!(results[0].path.to_string(), "제52조 제1항");
        assert_eq!(results[0].unit_type, UnitType::Paragraph);
        assert_eq!(results[1].path.to_string(), "제52조");
        assert_eq!(results[1].unit_type, UnitType::Article);
        assert!(results[1].text.contains("급박"));
    }

    #[test]
    fn non_matching_nodes_never_appear() {
        let doc = sample_document();
        let results = scan_document(&doc, "급박", ScanMode::Substring);
        assert!(results.iter().all(|m| m.text.contains("급박")));
        assert!(results.iter().all(|m| m.path.article != "제36조"));
    }

    #[test]
    fn each_matching_node_appears_exactly_once() {
        let doc = sample_document();
        let results = scan_document(&doc, "작업", ScanMode::Substring);
        let paths: Vec<String> = results.iter().map(|m| m.path.to_string()).collect();
        let mut deduped = paths.clone();
        deduped.dedup();
        assert_eq!(paths, deduped);
    }

    #[test]
    fn empty_keyword_matches_nothing() {
        let doc = sample_document();
        assert!(scan_document(&doc, "", ScanMode::Substring).is_empty());
        assert!(scan_document(&doc, "  ", ScanMode::Substring).is_empty());
    }

    #[test]
    fn results_follow_citation_order_across_articles() {
        let doc = sample_document();
        // "하여야" only in 제36조, "있다" in 제52조; scan a shared particle.
        let results = scan_document(&doc, "다", ScanMode::Substring);
        let numbers: Vec<Option<u64>> = results
            .iter()
            .map(|m| crate::rank::citation_number(&m.path.article))
            .collect();
        let mut sorted = numbers.clone();
        sorted.sort();
        assert_eq!(numbers, sorted);
        assert_eq!(numbers.first(), Some(&Some(36)));
    }

    #[test]
    fn match_results_carry_source_metadata() {
        let doc = sample_document();
        let results = scan_document(&doc, "급박", ScanMode::Substring);
        assert_eq!(results[0].law_name, "산업안전보건법");
        assert_eq!(results[0].effective_date, "20240517");
        assert_eq!(results[0].source_url, "https://law.go.kr");
    }

    #[test]
    fn frequency_gate_requires_interval_and_verb() {
        assert!(is_recurring_obligation(
            "정기적으로 반기 1회 이상 점검하여야 한다"
        ));
        assert!(!is_recurring_obligation("반기 결산을 발표한다"));
        assert!(!is_recurring_obligation("수시로 점검하여야 한다"));
    }

    #[test]
    fn frequency_scan_reports_leaf_units_only() {
        let doc = sample_document();
        let results = scan_document(&doc, "", ScanMode::Frequency);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path.to_string(), "제36조");
        assert!(results[0].text.contains("반기 1회 이상"));
    }

    #[test]
    fn frequency_scan_over_record_segments() {
        use crate::table::Segment;

        let record = FlattenedRecord {
            law_id: "L1".to_string(),
            law_name: "시행규칙".to_string(),
            article_no: "제17조".to_string(),
            title: String::new(),
            text: String::new(),
            effective_date: String::new(),
            revised_date: String::new(),
            source_url: String::new(),
            segments: vec![
                Segment {
                    unit_type: UnitType::Paragraph,
                    path: CitationPath::article("제17조").descend(UnitType::Paragraph, "1"),
                    text: "매월 1회 이상 작업장을 점검하여야 한다".to_string(),
                },
                Segment {
                    unit_type: UnitType::Paragraph,
                    path: CitationPath::article("제17조").descend(UnitType::Paragraph, "2"),
                    text: "반기 실적을 공표한다".to_string(),
                },
            ],
        };
        let results = scan_records_frequency(&[record]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path.to_string(), "제17조 1");
    }
}
