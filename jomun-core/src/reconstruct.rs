//! Flattened plain-text reconstruction of statute units
//!
//! Rebuilds the reading text of a node from its own text plus all
//! descendant text, depth-first in source order. Source documents often
//! repeat a trailing note under several headings, so identical lines are
//! dropped on every repetition, not just when adjacent.

use crate::document::{ArticleNode, UnitType};
use crate::rank::citation_number;
use std::collections::HashSet;

/// Which part of an article a reconstruction should cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopeHint<'a> {
    /// The whole unit: own text plus every descendant.
    #[default]
    Whole,
    /// Only the paragraph with this citation number (plus its items and
    /// sub-items), omitting sibling paragraphs and the article preface.
    Paragraph(&'a str),
}

/// Reconstruct a node's full text under the given scope.
///
/// A paragraph scope that names no existing paragraph reconstructs to an
/// empty string; so does an empty node. Never panics.
pub fn reconstruct(node: &ArticleNode, scope: ScopeHint<'_>) -> String {
    match scope {
        ScopeHint::Whole => full_text(node),
        ScopeHint::Paragraph(number) => node
            .children
            .iter()
            .filter(|child| child.unit_type == UnitType::Paragraph)
            .find(|child| same_citation_number(&child.number, number))
            .map(full_text)
            .unwrap_or_default(),
    }
}

/// Depth-first pre-order concatenation of a node's own text and all
/// descendant text, one non-empty line per row, first occurrence of any
/// repeated line kept.
pub fn full_text(node: &ArticleNode) -> String {
    let mut seen: HashSet<String> = HashSet::new();
    let mut lines: Vec<String> = Vec::new();
    collect_lines(node, &mut seen, &mut lines);
    lines.join("\n")
}

fn collect_lines(node: &ArticleNode, seen: &mut HashSet<String>, lines: &mut Vec<String>) {
    for line in node.raw_text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            lines.push(trimmed.to_string());
        }
    }
    for child in &node.children {
        collect_lines(child, seen, lines);
    }
}

/// Citation numbers match when their leading numeric components agree
/// ("2" hits "제2항"); purely non-numeric labels fall back to trimmed
/// string equality.
fn same_citation_number(a: &str, b: &str) -> bool {
    match (citation_number(a), citation_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a.trim() == b.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_with_children() -> ArticleNode {
        let mut article = ArticleNode::new(UnitType::Article, "제38조", "안전조치 의무.");
        let mut para1 = ArticleNode::new(UnitType::Paragraph, "제1항", "사업주는 다음 조치를 하여야 한다.");
        para1.children.push(ArticleNode::new(
            UnitType::Item,
            "1호",
            "기계ㆍ기구 등에 의한 위험 방지",
        ));
        para1.children.push(ArticleNode::new(
            UnitType::Item,
            "2호",
            "폭발성 물질에 의한 위험 방지",
        ));
        let para2 = ArticleNode::new(UnitType::Paragraph, "제2항", "구체적 사항은 고용노동부령으로 정한다.");
        article.children.push(para1);
        article.children.push(para2);
        article
    }

    #[test]
    fn full_text_is_depth_first_preorder() {
        let text = full_text(&article_with_children());
        assert_eq!(
            text,
            "안전조치 의무.\n사업주는 다음 조치를 하여야 한다.\n기계ㆍ기구 등에 의한 위험 방지\n폭발성 물질에 의한 위험 방지\n구체적 사항은 고용노동부령으로 정한다."
        );
    }

    #[test]
    fn full_text_is_idempotent() {
        let article = article_with_children();
        assert_eq!(full_text(&article), full_text(&article));
    }

    #[test]
    fn duplicate_lines_are_kept_once_across_the_whole_node() {
        let mut article = ArticleNode::new(UnitType::Article, "제10조", "");
        article.children.push(ArticleNode::new(
            UnitType::Paragraph,
            "제1항",
            "보고하여야 한다.\n다만 경미한 경우는 제외한다.",
        ));
        article.children.push(ArticleNode::new(
            UnitType::Paragraph,
            "제2항",
            "기록을 보존하여야 한다.\n다만 경미한 경우는 제외한다.",
        ));
        let text = full_text(&article);
        assert_eq!(text.matches("다만 경미한 경우는 제외한다.").count(), 1);
        // Non-adjacent repetition also collapses, first occurrence wins.
        assert!(text.starts_with("보고하여야 한다."));
    }

    #[test]
    fn duplicate_detection_trims_surrounding_whitespace() {
        let mut article = ArticleNode::new(UnitType::Article, "제3조", "  같은 줄  ");
        article
            .children
            .push(ArticleNode::new(UnitType::Paragraph, "제1항", "같은 줄"));
        assert_eq!(full_text(&article), "같은 줄");
    }

    #[test]
    fn empty_node_reconstructs_to_empty_string() {
        let node = ArticleNode::new(UnitType::Article, "제99조", "");
        assert_eq!(full_text(&node), "");
        assert_eq!(reconstruct(&node, ScopeHint::Paragraph("1")), "");
    }

    #[test]
    fn paragraph_scope_omits_siblings_and_preface() {
        let article = article_with_children();
        let text = reconstruct(&article, ScopeHint::Paragraph("2"));
        assert_eq!(text, "구체적 사항은 고용노동부령으로 정한다.");
        assert!(!text.contains("안전조치 의무"));
    }

    #[test]
    fn paragraph_scope_matches_by_numeric_component() {
        let article = article_with_children();
        let by_digit = reconstruct(&article, ScopeHint::Paragraph("1"));
        let by_label = reconstruct(&article, ScopeHint::Paragraph("제1항"));
        assert_eq!(by_digit, by_label);
        assert!(by_digit.contains("기계ㆍ기구"));
    }
}
