//! The record-source collaborator contract and its file-backed
//! implementations.
//!
//! The engine never reads storage itself: it asks a [RecordSource] for the
//! full unordered history on every query, so there is no cached running
//! balance to go stale. Consistency of the source is the collaborator's
//! responsibility.

mod csv;
mod json;

pub use csv::CsvRecordSource;
pub use json::JsonRecordSource;

use crate::{Error, models::RawRecord};

/// A provider of the full, unordered raw transaction history.
pub trait RecordSource {
    /// Fetch every raw row the source holds.
    ///
    /// # Errors
    /// Returns a fatal [Error] when the source is unreachable or its
    /// content cannot be decoded. Implementations must not return partial
    /// histories: a truncated log would silently corrupt every balance
    /// replayed from it.
    fn fetch_records(&self) -> Result<Vec<RawRecord>, Error>;
}

/// An in-memory history, mainly for tests and embedding.
impl RecordSource for Vec<RawRecord> {
    fn fetch_records(&self) -> Result<Vec<RawRecord>, Error> {
        Ok(self.clone())
    }
}
