//! Snapshot loading from local TSV and XML sources
//!
//! The loader reads already-exported files and hands the parsing to the
//! core. A load either produces a complete snapshot or fails whole; the
//! caller decides whether to keep serving the previous one.

use crate::state::{Snapshot, Sources};
use jomun_core::{
    build_from_rows, documents_from_records, parse_law_document, Config, HeaderIndex, JomunError,
    LawDocument,
};
use std::path::Path;

/// Build a fresh snapshot from the configured sources. The generation
/// is stamped at publish time, not here.
pub fn load_snapshot(sources: &Sources, config: &Config) -> Result<Snapshot, JomunError> {
    let mut snapshot = Snapshot::empty(0);

    if let Some(path) = &sources.tsv_path {
        snapshot.records = load_tsv(path, config)?;
        snapshot.documents = documents_from_records(&snapshot.records);
    }

    if let Some(dir) = &sources.xml_dir {
        snapshot.documents.extend(load_xml_dir(dir)?);
    }

    Ok(snapshot)
}

fn load_tsv(path: &Path, config: &Config) -> Result<Vec<jomun_core::FlattenedRecord>, JomunError> {
    let text = std::fs::read_to_string(path)?;
    let mut lines = text.lines();
    let header: Vec<String> = match lines.next() {
        Some(line) => line.split('\t').map(|s| s.trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };
    let index = HeaderIndex::resolve(&header, &config.aliases)?;

    let rows: Vec<Vec<String>> = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').map(|s| s.to_string()).collect())
        .collect();

    Ok(build_from_rows(&rows, &index))
}

fn load_xml_dir(dir: &Path) -> Result<Vec<LawDocument>, JomunError> {
    let mut documents = Vec::new();
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("xml"))
        .collect();
    paths.sort();

    for path in paths {
        let content = std::fs::read_to_string(&path)?;
        match parse_law_document(&content) {
            Ok(doc) => documents.push(doc),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unparseable XML source");
            }
        }
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn tsv_and_xml_sources_combine_into_one_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let tsv = write_file(
            dir.path(),
            "laws.tsv",
            "법령ID\t법령명\t조문단위\t조문번호\t조문내용(Plain)\n\
             L1\t산업안전보건법\t조\t제1조\t목적 조항\n",
        );
        write_file(
            dir.path(),
            "law.xml",
            "<법령><기본정보><법령명_한글>중대재해처벌법</법령명_한글></기본정보>\
             <조문단위><조문번호>1</조문번호><조문내용>목적</조문내용></조문단위></법령>",
        );

        let sources = Sources {
            tsv_path: Some(tsv),
            xml_dir: Some(dir.path().to_path_buf()),
        };
        let snapshot = load_snapshot(&sources, &Config::default()).unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.documents.len(), 2);
        assert_eq!(snapshot.documents[1].law_name, "중대재해처벌법");
    }

    #[test]
    fn bad_tsv_header_fails_the_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let tsv = write_file(dir.path(), "laws.tsv", "이상한헤더\t내용\na\tb\n");
        let sources = Sources {
            tsv_path: Some(tsv),
            xml_dir: None,
        };
        let result = load_snapshot(&sources, &Config::default());
        assert!(matches!(result, Err(JomunError::Schema { .. })));
    }

    #[test]
    fn empty_sources_load_an_empty_snapshot() {
        let snapshot = load_snapshot(&Sources::default(), &Config::default()).unwrap();
        assert!(snapshot.records.is_empty());
        assert!(snapshot.documents.is_empty());
    }
}
