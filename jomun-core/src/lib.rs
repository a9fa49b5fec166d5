//! jomun core - Korean statute article reconstruction and keyword scan
//!
//! This library provides the pure engine behind the jomun service:
//! building an in-memory statute model from XML or tabular sources,
//! reconstructing flattened article text, and scanning it for keywords
//! with citation-ordered results. It performs no I/O and keeps no
//! global state; callers hand it materialized documents or row sets.

pub mod config;
pub mod document;
pub mod error;
pub mod normalize;
pub mod rank;
pub mod reconstruct;
pub mod route;
pub mod scan;
pub mod select;
pub mod table;
pub mod xml;

pub use config::{AliasConfig, Config, SearchConfig};
pub use document::{ArticleNode, CitationPath, LawDocument, MatchResult, UnitType};
pub use error::JomunError;
pub use rank::{search_records, RankedHit};
pub use reconstruct::{full_text, reconstruct, ScopeHint};
pub use route::{TopicRoute, TopicRouter};
pub use scan::{scan_document, scan_records_frequency, ScanMode};
pub use select::pick_latest_exact;
pub use table::{build_from_rows, documents_from_records, FlattenedRecord, HeaderIndex, Segment};
pub use xml::{build_from_xml, parse_law_document, parse_xml, XmlElement};

/// Result type alias for jomun operations
pub type Result<T> = std::result::Result<T, JomunError>;
