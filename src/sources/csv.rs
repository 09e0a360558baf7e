//! Reads the transaction log from a headered CSV file.

use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    Error,
    models::{RawRecord, RawValue},
    sources::RecordSource,
};

/// A record source backed by a CSV export of the transaction log.
///
/// Column names follow the collaborator contract (`date`, `category`,
/// `description`, `amount`, `type`, `subCategory`, `quantity`,
/// `paymentMethod`, `timestamp`). Missing optional columns and empty cells
/// become absent fields; unknown columns are ignored. CSV cells are always
/// text, so every populated field arrives at the normalizer as a string.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    /// Create a source reading from `path`. The file is opened on each
    /// fetch, not now, so a source can be constructed before the log
    /// exists.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvRecordSource {
    fn fetch_records(&self) -> Result<Vec<RawRecord>, Error> {
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|error| Error::SourceUnavailable {
                path: self.path.display().to_string(),
                reason: error.to_string(),
            })?;

        let mut records = Vec::new();

        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|error| Error::InvalidCsv(error.to_string()))?;
            records.push(row.into());
        }

        Ok(records)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CsvRow {
    date: Option<String>,
    category: Option<String>,
    description: Option<String>,
    amount: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    sub_category: Option<String>,
    quantity: Option<String>,
    payment_method: Option<String>,
    timestamp: Option<String>,
}

impl From<CsvRow> for RawRecord {
    fn from(row: CsvRow) -> Self {
        RawRecord {
            date: row.date.map(RawValue::Text),
            category: row.category,
            description: row.description,
            amount: row.amount.map(RawValue::Text),
            kind: row.kind,
            sub_category: row.sub_category,
            quantity: row.quantity.map(RawValue::Text),
            payment_method: row.payment_method,
            timestamp: row.timestamp,
        }
    }
}
