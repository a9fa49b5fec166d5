//! In-memory model of a statute document
//!
//! A statute is a flat, ordered list of articles (조); each article owns
//! paragraphs (항), which own items (호), which own sub-items (목). The
//! nesting depth is exactly four. Citation numbering comes verbatim from
//! the source and is never rewritten here.

use serde::{Deserialize, Serialize};

/// Statutory unit level (조/항/호/목)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Article,
    Paragraph,
    Item,
    SubItem,
}

impl UnitType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Paragraph => "paragraph",
            Self::Item => "item",
            Self::SubItem => "sub_item",
        }
    }

    /// Korean marker as it appears in spreadsheet unit-type cells.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Article => "조",
            Self::Paragraph => "항",
            Self::Item => "호",
            Self::SubItem => "목",
        }
    }

    /// Tolerant parse of a unit-type cell (Korean markers or English names).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "조" | "조문" | "article" => Some(Self::Article),
            "항" | "paragraph" => Some(Self::Paragraph),
            "호" | "item" => Some(Self::Item),
            "목" | "sub_item" | "subitem" => Some(Self::SubItem),
            _ => None,
        }
    }

    /// Next level down, if any. Articles nest paragraphs, paragraphs nest
    /// items, items nest sub-items; sub-items are leaves.
    pub fn child(self) -> Option<Self> {
        match self {
            Self::Article => Some(Self::Paragraph),
            Self::Paragraph => Some(Self::Item),
            Self::Item => Some(Self::SubItem),
            Self::SubItem => None,
        }
    }
}

/// One unit of statute text at any level, with its children in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleNode {
    pub unit_type: UnitType,
    /// Citation label exactly as received, e.g. "제29조" or "1".
    pub number: String,
    /// Optional heading (articles usually carry one, lower units rarely).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// This node's own direct text, excluding children.
    pub raw_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ArticleNode>,
}

impl ArticleNode {
    pub fn new(unit_type: UnitType, number: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            unit_type,
            number: number.into(),
            title: None,
            raw_text: raw_text.into(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// One statute at one effective date. Immutable after construction;
/// reloads replace the whole document, never patch it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawDocument {
    pub law_id: String,
    pub law_name: String,
    /// Eight-digit date string, or empty when the source omitted it.
    pub effective_date: String,
    pub source_url: String,
    pub articles: Vec<ArticleNode>,
}

impl LawDocument {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Hierarchical citation path of a node: article number, then optionally
/// paragraph, item, and sub-item numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationPath {
    pub article: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_item: Option<String>,
}

impl CitationPath {
    pub fn article(number: impl Into<String>) -> Self {
        Self {
            article: number.into(),
            ..Default::default()
        }
    }

    /// Extend the path one level down with a child's citation number.
    pub fn descend(&self, unit_type: UnitType, number: &str) -> Self {
        let mut path = self.clone();
        match unit_type {
            UnitType::Article => path.article = number.to_string(),
            UnitType::Paragraph => path.paragraph = Some(number.to_string()),
            UnitType::Item => path.item = Some(number.to_string()),
            UnitType::SubItem => path.sub_item = Some(number.to_string()),
        }
        path
    }

    /// Deepest unit level present in this path.
    pub fn depth(&self) -> UnitType {
        if self.sub_item.is_some() {
            UnitType::SubItem
        } else if self.item.is_some() {
            UnitType::Item
        } else if self.paragraph.is_some() {
            UnitType::Paragraph
        } else {
            UnitType::Article
        }
    }
}

impl std::fmt::Display for CitationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.article)?;
        for part in [&self.paragraph, &self.item, &self.sub_item]
            .into_iter()
            .flatten()
        {
            write!(f, " {}", part)?;
        }
        Ok(())
    }
}

/// One hit from a keyword scan: the matched node's full reconstructed
/// text plus its citation path and source attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub path: CitationPath,
    pub unit_type: UnitType,
    pub text: String,
    pub law_name: String,
    pub law_id: String,
    pub effective_date: String,
    pub source_url: String,
}
