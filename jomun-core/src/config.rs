//! Configuration for jomun

use crate::JomunError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration as TOML
pub const DEFAULT_CONFIG: &str = r#"# jomun configuration

[search]
# Paging bounds for /search
default_page_size = 50
max_page_size = 100
# Field weights for ranked keyword search (fixed priority: body first)
body_weight = 8
title_weight = 4
number_weight = 2
law_name_weight = 1
# Bonus when the untokenized keyword appears verbatim in any field
exact_phrase_bonus = 10

# Acceptable column headers per logical field, highest priority first.
# The first alias present in the header row wins; missing optional
# columns degrade to empty cells.
[aliases]
law_id = ["법령ID", "법령 ID", "law_id", "lawId"]
law_name = ["법령명", "법령명칭", "law_name", "lawTitle"]
unit_type = ["조문단위", "단위", "unit_type", "unitType"]
article_no = ["조문번호", "조번호", "article_no", "unitNo"]
unit_no = ["단위번호", "항호목번호", "unit_no", "para"]
title = ["조문제목", "제목", "title"]
text_plain = ["조문내용(Plain)", "조문내용", "text_plain", "textPlain"]
text_html = ["조문내용(HTML)", "text_html", "textHtml"]
deleted = ["삭제여부", "삭제", "deleted"]
effective_date = ["시행일", "시행일자", "effective_date", "enactedAt"]
revised_date = ["최신개정일", "개정일", "revised_date", "amendedAt"]
source_url = ["출처URL", "출처", "source_url", "sourceUrl"]
"#;

/// jomun configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub aliases: AliasConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    #[serde(default = "default_body_weight")]
    pub body_weight: u32,
    #[serde(default = "default_title_weight")]
    pub title_weight: u32,
    #[serde(default = "default_number_weight")]
    pub number_weight: u32,
    #[serde(default = "default_law_name_weight")]
    pub law_name_weight: u32,
    #[serde(default = "default_exact_phrase_bonus")]
    pub exact_phrase_bonus: u32,
}

/// Header-alias table: logical field name to acceptable literal column
/// headers, ranked. Callers may supply their own table; the defaults
/// cover the DRF spreadsheet export and common English synonyms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasConfig {
    #[serde(default = "default_law_id_aliases")]
    pub law_id: Vec<String>,
    #[serde(default = "default_law_name_aliases")]
    pub law_name: Vec<String>,
    #[serde(default = "default_unit_type_aliases")]
    pub unit_type: Vec<String>,
    #[serde(default = "default_article_no_aliases")]
    pub article_no: Vec<String>,
    #[serde(default = "default_unit_no_aliases")]
    pub unit_no: Vec<String>,
    #[serde(default = "default_title_aliases")]
    pub title: Vec<String>,
    #[serde(default = "default_text_plain_aliases")]
    pub text_plain: Vec<String>,
    #[serde(default = "default_text_html_aliases")]
    pub text_html: Vec<String>,
    #[serde(default = "default_deleted_aliases")]
    pub deleted: Vec<String>,
    #[serde(default = "default_effective_date_aliases")]
    pub effective_date: Vec<String>,
    #[serde(default = "default_revised_date_aliases")]
    pub revised_date: Vec<String>,
    #[serde(default = "default_source_url_aliases")]
    pub source_url: Vec<String>,
}

impl Config {
    /// Load from a TOML file, or defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, JomunError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| JomunError::ConfigParse(e.to_string()))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            body_weight: default_body_weight(),
            title_weight: default_title_weight(),
            number_weight: default_number_weight(),
            law_name_weight: default_law_name_weight(),
            exact_phrase_bonus: default_exact_phrase_bonus(),
        }
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            law_id: default_law_id_aliases(),
            law_name: default_law_name_aliases(),
            unit_type: default_unit_type_aliases(),
            article_no: default_article_no_aliases(),
            unit_no: default_unit_no_aliases(),
            title: default_title_aliases(),
            text_plain: default_text_plain_aliases(),
            text_html: default_text_html_aliases(),
            deleted: default_deleted_aliases(),
            effective_date: default_effective_date_aliases(),
            revised_date: default_revised_date_aliases(),
            source_url: default_source_url_aliases(),
        }
    }
}

fn default_page_size() -> usize {
    50
}

fn default_max_page_size() -> usize {
    100
}

fn default_body_weight() -> u32 {
    8
}

fn default_title_weight() -> u32 {
    4
}

fn default_number_weight() -> u32 {
    2
}

fn default_law_name_weight() -> u32 {
    1
}

fn default_exact_phrase_bonus() -> u32 {
    10
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_law_id_aliases() -> Vec<String> {
    strings(&["법령ID", "법령 ID", "law_id", "lawId"])
}

fn default_law_name_aliases() -> Vec<String> {
    strings(&["법령명", "법령명칭", "law_name", "lawTitle"])
}

fn default_unit_type_aliases() -> Vec<String> {
    strings(&["조문단위", "단위", "unit_type", "unitType"])
}

fn default_article_no_aliases() -> Vec<String> {
    strings(&["조문번호", "조번호", "article_no", "unitNo"])
}

fn default_unit_no_aliases() -> Vec<String> {
    strings(&["단위번호", "항호목번호", "unit_no", "para"])
}

fn default_title_aliases() -> Vec<String> {
    strings(&["조문제목", "제목", "title"])
}

fn default_text_plain_aliases() -> Vec<String> {
    strings(&["조문내용(Plain)", "조문내용", "text_plain", "textPlain"])
}

fn default_text_html_aliases() -> Vec<String> {
    strings(&["조문내용(HTML)", "text_html", "textHtml"])
}

fn default_deleted_aliases() -> Vec<String> {
    strings(&["삭제여부", "삭제", "deleted"])
}

fn default_effective_date_aliases() -> Vec<String> {
    strings(&["시행일", "시행일자", "effective_date", "enactedAt"])
}

fn default_revised_date_aliases() -> Vec<String> {
    strings(&["최신개정일", "개정일", "revised_date", "amendedAt"])
}

fn default_source_url_aliases() -> Vec<String> {
    strings(&["출처URL", "출처", "source_url", "sourceUrl"])
}
