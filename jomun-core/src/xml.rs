//! Hierarchical document construction from DRF-style statute XML
//!
//! The government XML API nests article units (조문단위) under the law
//! root, each carrying paragraph (항), item (호), and sub-item (목)
//! children. The reader builds a small owned element tree first, then
//! extracts the document model from it; schema drift is tolerated by
//! falling back from the article tag to any element that carries an
//! article-number or article-title child.

use crate::document::{ArticleNode, LawDocument, UnitType};
use crate::error::JomunError;
use crate::normalize::extract_date_digits;
use quick_xml::events::Event;
use quick_xml::Reader;

const ARTICLE_TAG: &str = "조문단위";
const ARTICLE_NO_TAG: &str = "조문번호";
const ARTICLE_TITLE_TAG: &str = "조문제목";
const ARTICLE_TEXT_TAG: &str = "조문내용";

const LAW_NAME_TAGS: &[&str] = &["법령명_한글", "법령명한글", "법령명"];
const LAW_ID_TAGS: &[&str] = &["법령ID", "법령키"];
const EFFECTIVE_DATE_TAGS: &[&str] = &["시행일자", "시행일"];
const SOURCE_URL_TAGS: &[&str] = &["법령상세링크", "출처URL"];

/// Owned XML element: tag, direct text, children in source order.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub tag: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn named(tag: String) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Direct text of the first child with this tag, or empty.
    pub fn child_text(&self, tag: &str) -> &str {
        self.child(tag).map(|c| c.text.as_str()).unwrap_or("")
    }

    fn push_text(&mut self, piece: &str) {
        let trimmed = piece.trim();
        if trimmed.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(trimmed);
    }

    fn first_descendant_text(&self, tags: &[&str]) -> &str {
        for tag in tags {
            if let Some(found) = self.find_descendant(tag) {
                if !found.text.is_empty() {
                    return &found.text;
                }
            }
        }
        ""
    }

    fn find_descendant(&self, tag: &str) -> Option<&XmlElement> {
        for child in &self.children {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(tag) {
                return Some(found);
            }
        }
        None
    }

    fn collect_descendants<'a>(&'a self, keep: &impl Fn(&XmlElement) -> bool, out: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if keep(child) {
                out.push(child);
            }
            child.collect_descendants(keep, out);
        }
    }
}

/// Parse an XML string into an element tree.
///
/// The only fatal condition is the absence of any document root; an
/// otherwise odd tree is handed to [`build_from_xml`], which degrades
/// per element instead of failing.
pub fn parse_xml(input: &str) -> Result<XmlElement, JomunError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                stack.push(XmlElement::named(tag));
            }
            Ok(Event::Empty(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                attach(XmlElement::named(tag), &mut stack, &mut root);
            }
            Ok(Event::End(_)) => {
                if let Some(done) = stack.pop() {
                    attach(done, &mut stack, &mut root);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(top), Ok(text)) = (stack.last_mut(), e.unescape()) {
                    top.push_text(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(JomunError::Xml(e)),
        }
        buf.clear();
    }

    root.ok_or_else(|| JomunError::MalformedDocument("no document root".to_string()))
}

fn attach(element: XmlElement, stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Extract a [`LawDocument`] from a parsed element tree.
///
/// Missing metadata fields become empty strings. A tree with no
/// recognizable article elements yields an empty (still valid) document.
pub fn build_from_xml(root: &XmlElement) -> LawDocument {
    let effective_date =
        extract_date_digits(root.first_descendant_text(EFFECTIVE_DATE_TAGS)).unwrap_or_default();

    LawDocument {
        law_id: root.first_descendant_text(LAW_ID_TAGS).to_string(),
        law_name: root.first_descendant_text(LAW_NAME_TAGS).to_string(),
        effective_date,
        source_url: root.first_descendant_text(SOURCE_URL_TAGS).to_string(),
        articles: article_elements(root)
            .into_iter()
            .map(build_article)
            .collect(),
    }
}

/// Parse an XML string straight into a document.
pub fn parse_law_document(input: &str) -> Result<LawDocument, JomunError> {
    Ok(build_from_xml(&parse_xml(input)?))
}

/// Article elements anywhere in the tree. Primary: the article tag.
/// Fallback when the schema drifted: any element carrying an
/// article-number or article-title child.
fn article_elements(root: &XmlElement) -> Vec<&XmlElement> {
    let mut articles = Vec::new();
    root.collect_descendants(&|e| e.tag == ARTICLE_TAG, &mut articles);
    if articles.is_empty() {
        root.collect_descendants(
            &|e| e.child(ARTICLE_NO_TAG).is_some() || e.child(ARTICLE_TITLE_TAG).is_some(),
            &mut articles,
        );
    }
    articles
}

fn build_article(element: &XmlElement) -> ArticleNode {
    let mut article = ArticleNode::new(
        UnitType::Article,
        element.child_text(ARTICLE_NO_TAG),
        element.child_text(ARTICLE_TEXT_TAG),
    );
    let title = element.child_text(ARTICLE_TITLE_TAG);
    if !title.is_empty() {
        article.title = Some(title.to_string());
    }
    article.children = build_units(element, UnitType::Paragraph);
    article
}

/// Recursively build sub-unit nodes. Nesting is exactly article →
/// paragraph → item → sub-item; elements missing their number or text
/// children contribute empty strings rather than failing.
fn build_units(parent: &XmlElement, unit_type: UnitType) -> Vec<ArticleNode> {
    let (tag, no_tag, text_tag) = match unit_type {
        UnitType::Paragraph => ("항", "항번호", "항내용"),
        UnitType::Item => ("호", "호번호", "호내용"),
        UnitType::SubItem => ("목", "목번호", "목내용"),
        UnitType::Article => return Vec::new(),
    };

    parent
        .children
        .iter()
        .filter(|e| e.tag == tag)
        .map(|e| {
            let mut node =
                ArticleNode::new(unit_type, e.child_text(no_tag), e.child_text(text_tag));
            if let Some(child_type) = unit_type.child() {
                node.children = build_units(e, child_type);
            }
            node
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<법령>
  <기본정보>
    <법령ID>001766</법령ID>
    <법령명_한글>산업안전보건법</법령명_한글>
    <시행일자>20240517</시행일자>
    <법령상세링크>https://law.go.kr/법령/산업안전보건법</법령상세링크>
  </기본정보>
  <조문>
    <조문단위>
      <조문번호>52</조문번호>
      <조문제목>근로자의 작업중지</조문제목>
      <조문내용>근로자는 작업을 중지할 수 있다.</조문내용>
      <항>
        <항번호>1</항번호>
        <항내용>산업재해가 발생할 급박한 위험이 있는 경우</항내용>
        <호>
          <호번호>1</호번호>
          <호내용>즉시 대피할 것</호내용>
          <목>
            <목번호>가</목번호>
            <목내용>안전한 장소로 이동</목내용>
          </목>
        </호>
      </항>
    </조문단위>
  </조문>
</법령>"#;

    #[test]
    fn metadata_is_extracted_from_the_tree() {
        let doc = parse_law_document(SAMPLE).unwrap();
        assert_eq!(doc.law_id, "001766");
        assert_eq!(doc.law_name, "산업안전보건법");
        assert_eq!(doc.effective_date, "20240517");
        assert!(doc.source_url.contains("law.go.kr"));
    }

    #[test]
    fn article_tree_nests_four_levels_in_source_order() {
        let doc = parse_law_document(SAMPLE).unwrap();
        assert_eq!(doc.articles.len(), 1);
        let article = &doc.articles[0];
        assert_eq!(article.number, "52");
        assert_eq!(article.title.as_deref(), Some("근로자의 작업중지"));
        let paragraph = &article.children[0];
        assert_eq!(paragraph.unit_type, UnitType::Paragraph);
        let item = &paragraph.children[0];
        assert_eq!(item.unit_type, UnitType::Item);
        let sub_item = &item.children[0];
        assert_eq!(sub_item.unit_type, UnitType::SubItem);
        assert_eq!(sub_item.raw_text, "안전한 장소로 이동");
    }

    #[test]
    fn reconstruction_covers_all_levels() {
        let doc = parse_law_document(SAMPLE).unwrap();
        let text = reconstruct::full_text(&doc.articles[0]);
        assert_eq!(
            text,
            "근로자는 작업을 중지할 수 있다.\n산업재해가 발생할 급박한 위험이 있는 경우\n즉시 대피할 것\n안전한 장소로 이동"
        );
    }

    #[test]
    fn missing_metadata_fields_become_empty_strings() {
        let doc = parse_law_document("<법령><조문단위><조문번호>1</조문번호></조문단위></법령>").unwrap();
        assert_eq!(doc.law_name, "");
        assert_eq!(doc.effective_date, "");
        assert_eq!(doc.articles.len(), 1);
        assert_eq!(doc.articles[0].raw_text, "");
    }

    #[test]
    fn drifted_schema_falls_back_to_number_bearing_elements() {
        let xml = r#"<law>
            <provision><조문번호>3</조문번호><조문내용>본문</조문내용></provision>
            <provision><조문제목>벌칙</조문제목></provision>
        </law>"#;
        let doc = parse_law_document(xml).unwrap();
        assert_eq!(doc.articles.len(), 2);
        assert_eq!(doc.articles[0].number, "3");
        assert_eq!(doc.articles[1].title.as_deref(), Some("벌칙"));
    }

    #[test]
    fn article_free_tree_is_an_empty_document_not_an_error() {
        let doc = parse_law_document("<법령><기본정보><법령명_한글>빈 법령</법령명_한글></기본정보></법령>").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn rootless_input_is_malformed() {
        assert!(matches!(
            parse_xml("   "),
            Err(JomunError::MalformedDocument(_))
        ));
    }

    #[test]
    fn cdata_text_is_preserved() {
        let doc = parse_law_document(
            "<법령><조문단위><조문번호>1</조문번호><조문내용><![CDATA[<별표> 참조]]></조문내용></조문단위></법령>",
        )
        .unwrap();
        assert_eq!(doc.articles[0].raw_text, "<별표> 참조");
    }
}
