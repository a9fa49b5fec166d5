//! Flattened tabular source: typed records from spreadsheet-style rows
//!
//! Spreadsheet exports carry one row per statutory unit. Rows are grouped
//! by `(law id, article number)` into one logical record per article; the
//! first article-level row for a key is the head row and carries the
//! article's metadata, later rows append their text. Column positions are
//! resolved once per load against a ranked alias table, so downstream
//! code never touches raw header strings.

use crate::config::AliasConfig;
use crate::document::{ArticleNode, CitationPath, LawDocument, UnitType};
use crate::error::JomunError;
use crate::normalize::{extract_date_digits, normalize_compact};

/// Resolved column positions for one load. Mandatory fields hold real
/// indices; everything else degrades to empty cells when absent.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    law_id: usize,
    article_no: usize,
    law_name: Option<usize>,
    unit_type: Option<usize>,
    unit_no: Option<usize>,
    title: Option<usize>,
    text_plain: Option<usize>,
    text_html: Option<usize>,
    deleted: Option<usize>,
    effective_date: Option<usize>,
    revised_date: Option<usize>,
    source_url: Option<usize>,
}

impl HeaderIndex {
    /// Match the header row against the alias table. The first alias
    /// present wins per field; a missing mandatory column fails the load.
    pub fn resolve(header: &[String], aliases: &AliasConfig) -> Result<Self, JomunError> {
        let find = |candidates: &[String]| {
            candidates.iter().find_map(|alias| {
                let want = normalize_compact(alias);
                header
                    .iter()
                    .position(|cell| normalize_compact(cell) == want)
            })
        };

        let law_id = find(&aliases.law_id).ok_or(JomunError::Schema { column: "law_id" })?;
        let article_no = find(&aliases.article_no).ok_or(JomunError::Schema {
            column: "article_no",
        })?;

        Ok(Self {
            law_id,
            article_no,
            law_name: find(&aliases.law_name),
            unit_type: find(&aliases.unit_type),
            unit_no: find(&aliases.unit_no),
            title: find(&aliases.title),
            text_plain: find(&aliases.text_plain),
            text_html: find(&aliases.text_html),
            deleted: find(&aliases.deleted),
            effective_date: find(&aliases.effective_date),
            revised_date: find(&aliases.revised_date),
            source_url: find(&aliases.source_url),
        })
    }

    fn cell<'a>(&self, row: &'a [String], index: Option<usize>) -> &'a str {
        index
            .and_then(|i| row.get(i))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    fn mandatory_cell<'a>(&self, row: &'a [String], index: usize) -> &'a str {
        row.get(index).map(|s| s.trim()).unwrap_or("")
    }
}

/// One source row's text at its unit level, kept for scan use.
#[derive(Debug, Clone)]
pub struct Segment {
    pub unit_type: UnitType,
    pub path: CitationPath,
    pub text: String,
}

/// One logical article assembled from a row group.
#[derive(Debug, Clone)]
pub struct FlattenedRecord {
    pub law_id: String,
    pub law_name: String,
    pub article_no: String,
    pub title: String,
    /// Accumulated plain text of every row in the group, in row order.
    pub text: String,
    /// Eight-digit effective date, or empty when unparseable.
    pub effective_date: String,
    pub revised_date: String,
    pub source_url: String,
    /// Per-row unit fragments, one per surviving source row.
    pub segments: Vec<Segment>,
}

impl FlattenedRecord {
    fn new(law_id: &str, article_no: &str) -> Self {
        Self {
            law_id: law_id.to_string(),
            law_name: String::new(),
            article_no: article_no.to_string(),
            title: String::new(),
            text: String::new(),
            effective_date: String::new(),
            revised_date: String::new(),
            source_url: String::new(),
            segments: Vec::new(),
        }
    }

    /// Rebuild the article node tree from this record's segments.
    /// Sub-unit rows attach under the most recent unit one level up;
    /// rows arriving out of nesting order fall back to the nearest
    /// existing ancestor instead of being dropped.
    pub fn to_article_node(&self) -> ArticleNode {
        let mut article = ArticleNode::new(UnitType::Article, self.article_no.clone(), "");
        if !self.title.is_empty() {
            article.title = Some(self.title.clone());
        }

        for segment in &self.segments {
            let number = match segment.unit_type {
                UnitType::Article => String::new(),
                UnitType::Paragraph => segment.path.paragraph.clone().unwrap_or_default(),
                UnitType::Item => segment.path.item.clone().unwrap_or_default(),
                UnitType::SubItem => segment.path.sub_item.clone().unwrap_or_default(),
            };
            match segment.unit_type {
                UnitType::Article => {
                    if !article.raw_text.is_empty() {
                        article.raw_text.push('\n');
                    }
                    article.raw_text.push_str(&segment.text);
                }
                UnitType::Paragraph => {
                    article
                        .children
                        .push(ArticleNode::new(UnitType::Paragraph, number, segment.text.clone()));
                }
                UnitType::Item => {
                    let node = ArticleNode::new(UnitType::Item, number, segment.text.clone());
                    match article.children.last_mut() {
                        Some(paragraph) => paragraph.children.push(node),
                        None => article.children.push(node),
                    }
                }
                UnitType::SubItem => {
                    let node = ArticleNode::new(UnitType::SubItem, number, segment.text.clone());
                    match article.children.last_mut() {
                        Some(paragraph) => match paragraph.children.last_mut() {
                            Some(item) => item.children.push(node),
                            None => paragraph.children.push(node),
                        },
                        None => article.children.push(node),
                    }
                }
            }
        }
        article
    }
}

/// Group rows into records by consecutive `(law id, article number)`.
///
/// Rows flagged deleted are skipped before grouping. Within a group the
/// first row (or any article-level row) seeds metadata; sub-unit rows
/// append text and a segment descriptor. Plain text is preferred; the
/// HTML column with tags stripped is the fallback.
pub fn build_from_rows(rows: &[Vec<String>], header: &HeaderIndex) -> Vec<FlattenedRecord> {
    let mut records: Vec<FlattenedRecord> = Vec::new();
    let mut current: Option<FlattenedRecord> = None;

    for row in rows {
        if header.cell(row, header.deleted).eq_ignore_ascii_case("y") {
            continue;
        }

        let law_id = header.mandatory_cell(row, header.law_id);
        let article_no = header.mandatory_cell(row, header.article_no);
        if law_id.is_empty() && article_no.is_empty() {
            continue;
        }

        let key_changed = match &current {
            Some(record) => record.law_id != law_id || record.article_no != article_no,
            None => true,
        };
        if key_changed {
            if let Some(done) = current.take() {
                records.push(done);
            }
            current = Some(FlattenedRecord::new(law_id, article_no));
        }
        let record = current.as_mut().expect("record seeded above");

        let unit_type = UnitType::parse(header.cell(row, header.unit_type));
        let is_head = record.segments.is_empty() || unit_type == Some(UnitType::Article);
        if is_head {
            let law_name = header.cell(row, header.law_name);
            if !law_name.is_empty() {
                record.law_name = law_name.to_string();
            }
            let title = header.cell(row, header.title);
            if !title.is_empty() {
                record.title = title.to_string();
            }
            if record.effective_date.is_empty() {
                record.effective_date =
                    extract_date_digits(header.cell(row, header.effective_date))
                        .unwrap_or_default();
            }
            let revised = header.cell(row, header.revised_date);
            if !revised.is_empty() {
                record.revised_date = revised.to_string();
            }
            let url = header.cell(row, header.source_url);
            if !url.is_empty() {
                record.source_url = url.to_string();
            }
        }

        let text = row_text(row, header);
        if !text.is_empty() {
            if !record.text.is_empty() {
                record.text.push('\n');
            }
            record.text.push_str(&text);
        }

        let unit_type = unit_type.unwrap_or(UnitType::Article);
        let unit_no = header.cell(row, header.unit_no);
        let path = segment_path(record, unit_type, unit_no);
        record.segments.push(Segment {
            unit_type,
            path,
            text,
        });
    }

    if let Some(done) = current {
        records.push(done);
    }
    records
}

/// Group records into per-law documents (consecutive by law id), with
/// article trees rebuilt from each record's segments.
pub fn documents_from_records(records: &[FlattenedRecord]) -> Vec<LawDocument> {
    let mut documents: Vec<LawDocument> = Vec::new();
    for record in records {
        let fits = documents
            .last()
            .map(|doc| doc.law_id == record.law_id)
            .unwrap_or(false);
        if !fits {
            documents.push(LawDocument {
                law_id: record.law_id.clone(),
                law_name: record.law_name.clone(),
                effective_date: record.effective_date.clone(),
                source_url: record.source_url.clone(),
                articles: Vec::new(),
            });
        }
        let doc = documents.last_mut().expect("document seeded above");
        if doc.law_name.is_empty() {
            doc.law_name = record.law_name.clone();
        }
        if doc.effective_date.is_empty() {
            doc.effective_date = record.effective_date.clone();
        }
        if doc.source_url.is_empty() {
            doc.source_url = record.source_url.clone();
        }
        doc.articles.push(record.to_article_node());
    }
    documents
}

fn segment_path(record: &FlattenedRecord, unit_type: UnitType, unit_no: &str) -> CitationPath {
    let base = CitationPath::article(&record.article_no);
    match unit_type {
        UnitType::Article => base,
        UnitType::Paragraph => base.descend(UnitType::Paragraph, unit_no),
        UnitType::Item => {
            let parent = last_path_of(record, UnitType::Paragraph).unwrap_or(base);
            parent.descend(UnitType::Item, unit_no)
        }
        UnitType::SubItem => {
            let parent = last_path_of(record, UnitType::Item)
                .or_else(|| last_path_of(record, UnitType::Paragraph))
                .unwrap_or(base);
            parent.descend(UnitType::SubItem, unit_no)
        }
    }
}

fn last_path_of(record: &FlattenedRecord, unit_type: UnitType) -> Option<CitationPath> {
    record
        .segments
        .iter()
        .rev()
        .find(|segment| segment.unit_type == unit_type)
        .map(|segment| segment.path.clone())
}

fn row_text(row: &[String], header: &HeaderIndex) -> String {
    let plain = header.cell(row, header.text_plain);
    if !plain.is_empty() {
        return plain.to_string();
    }
    let html = header.cell(row, header.text_html);
    if html.is_empty() {
        return String::new();
    }
    strip_html(html)
}

/// Drop tags and decode the handful of entities the exports actually use.
fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.trim().to_string()
}
