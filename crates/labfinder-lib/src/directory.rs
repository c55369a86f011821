//! In-memory lab directory loaded from the static JSON dataset.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{Error, Result};
use crate::query::LabQuery;
use crate::record::{LabId, LabRecord};
use crate::search::{compute_facets, search, search_at, Facets, SearchResult};

/// Immutable collection of lab records.
///
/// Nothing mutates a directory after it is loaded, so a single instance can be
/// shared across requests behind an `Arc` or a `OnceLock`.
#[derive(Debug, Clone, Default)]
pub struct LabDirectory {
    records: Vec<LabRecord>,
    source: Option<PathBuf>,
}

impl LabDirectory {
    /// Wrap already-parsed records.
    pub fn new(records: Vec<LabRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Load the directory from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = fs::File::open(path)?;
        let mut directory = Self::from_reader(file)?;
        directory.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            lab_count = directory.len(),
            "lab directory loaded"
        );
        Ok(directory)
    }

    /// Load the directory from a reader producing a JSON array of records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<LabRecord> =
            serde_json::from_reader(reader).map_err(|err| Error::DatasetParse {
                message: err.to_string(),
            })?;
        Ok(Self::new(records))
    }

    /// Load the directory from bundled bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let records: Vec<LabRecord> =
            serde_json::from_slice(bytes).map_err(|err| Error::DatasetParse {
                message: err.to_string(),
            })?;
        Ok(Self::new(records))
    }

    /// All records in dataset order.
    pub fn records(&self) -> &[LabRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lookup a record by identifier.
    pub fn get(&self, id: LabId) -> Option<&LabRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Facet lists over the whole directory.
    pub fn facets(&self) -> Facets {
        compute_facets(&self.records)
    }

    /// Run a search using the wall clock for certificate status.
    pub fn search(&self, query: &LabQuery) -> SearchResult {
        search(&self.records, query)
    }

    /// Run a search with an explicit "now".
    pub fn search_at(&self, query: &LabQuery, now: NaiveDateTime) -> SearchResult {
        search_at(&self.records, query, now)
    }

    /// Get the source path if the directory was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_json_array() {
        let json = r#"[{"id": 4, "labName": "Delta"}, {"id": 9, "labName": "Omega"}]"#;
        let directory = LabDirectory::from_reader(Cursor::new(json)).expect("parses");

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get(9).map(|r| r.name.as_str()), Some("Omega"));
        assert!(directory.get(5).is_none());
        assert!(directory.source_path().is_none());
    }

    #[test]
    fn rejects_non_array_json() {
        let err = LabDirectory::from_slice(br#"{"labs": []}"#).unwrap_err();
        assert!(matches!(err, Error::DatasetParse { .. }));
    }

    #[test]
    fn rejects_truncated_json() {
        let err = LabDirectory::from_slice(br#"[{"id": 1,"#).unwrap_err();
        assert!(matches!(err, Error::DatasetParse { .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = LabDirectory::from_path(Path::new("/nonexistent/labs.json")).unwrap_err();
        match err {
            Error::DatasetNotFound { path } => assert!(path.ends_with("labs.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_array_is_an_empty_directory() {
        let directory = LabDirectory::from_slice(b"[]").expect("parses");
        assert!(directory.is_empty());
        assert_eq!(directory.facets(), Facets::default());
    }
}
