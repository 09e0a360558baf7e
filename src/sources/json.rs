//! Reads the transaction log from a JSON array, the shape a spreadsheet
//! API export produces.

use std::path::PathBuf;

use crate::{Error, models::RawRecord, sources::RecordSource};

/// A record source backed by a JSON file holding an array of row objects.
///
/// Unlike CSV, JSON preserves the number-or-string ambiguity of the
/// original cells, which is exactly what the normalizer is built to
/// resolve: a `date` of `45762` and a `date` of `"01/05/2025"` can sit in
/// the same file.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecordSource {
    path: PathBuf,
}

impl JsonRecordSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonRecordSource {
    fn fetch_records(&self) -> Result<Vec<RawRecord>, Error> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|error| Error::SourceUnavailable {
                path: self.path.display().to_string(),
                reason: error.to_string(),
            })?;

        serde_json::from_str(&text).map_err(|error| Error::InvalidJson(error.to_string()))
    }
}
