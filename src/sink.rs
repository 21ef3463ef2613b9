use crate::error::ScrapeError;
use crate::results::ProductRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Ordered collection of every record found in a run, mirrored to a JSON file.
///
/// Each append rewrites the whole file, so the file on disk always holds
/// every record appended so far.
#[derive(Debug)]
pub struct RecordSink {
    path: PathBuf,
    records: Vec<ProductRecord>,
}

impl RecordSink {
    /// Creates an empty sink; nothing is written until the first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Adds `record` and persists the full collection before returning.
    ///
    /// If the snapshot cannot be written the record is dropped again, so a
    /// later append never persists it.
    pub fn append(&mut self, record: ProductRecord) -> Result<(), ScrapeError> {
        self.records.push(record);
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the snapshot to a sibling temp file and renames it over the target
    fn persist(&self) -> Result<(), ScrapeError> {
        let json = serde_json::to_string_pretty(&self.records)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        ::log::debug!(
            "Wrote {} records to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }
}
