//! Dompet reconstructs running account state from an append-only, unordered
//! log of financial transaction records split across two independent payment
//! channels (bank account and cash), and derives the opening/closing balance
//! and statistics for any requested month.
//!
//! There is no persisted running balance: the flat transaction log is the
//! only source of truth, so every query performs a full, deterministic
//! chronological replay. The pipeline is raw rows → [`normalize`](normalize())
//! → [sort_chronological] → [`aggregate`](aggregate()) → [PeriodResult].

#![warn(missing_docs)]

mod aggregate;
mod config;
mod models;
mod normalize;
mod replay;
mod sort;
mod sources;

pub use aggregate::{aggregate, aggregate_from_source, aggregate_transactions};
pub use config::{EngineConfig, FuelConfig};
pub use models::{PaymentChannel, PeriodResult, RawRecord, RawValue, Transaction, TransactionKind};
pub use normalize::{Rejection, normalize, normalize_and_sort, serial_to_date};
pub use replay::{Ledger, replay};
pub use sort::sort_chronological;
pub use sources::{CsvRecordSource, JsonRecordSource, RecordSource};

/// The errors that may occur while supplying records to the engine.
///
/// Per-record problems (an unreadable date, a malformed amount) are not
/// represented here: they are recovered locally during normalization so a
/// single bad row never aborts a whole period computation. The variants
/// below are collaborator-level failures and are fatal to the query that
/// hit them; no partial result is ever returned alongside one.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The record source could not be reached or read at all.
    ///
    /// Callers own the retry policy and must present this differently from
    /// a legitimate zero-valued result: "could not retrieve data" is not
    /// "no data for this period".
    #[error("could not read records from \"{path}\": {reason}")]
    SourceUnavailable {
        /// The path or locator of the record source.
        path: String,
        /// The underlying I/O failure, as text.
        reason: String,
    },

    /// The CSV record log was readable but not decodable.
    #[error("could not parse the CSV record log: {0}")]
    InvalidCsv(String),

    /// The JSON record log was readable but not decodable.
    #[error("could not parse the JSON record log: {0}")]
    InvalidJson(String),

    /// The configuration file exists but could not be parsed.
    #[error("could not parse the configuration file: {0}")]
    InvalidConfig(String),
}
