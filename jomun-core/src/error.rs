//! Error types for jomun operations

#[derive(Debug, thiserror::Error)]
pub enum JomunError {
    #[error("Mandatory column missing from header row: {column}")]
    Schema { column: &'static str },

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
