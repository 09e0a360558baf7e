//! This file defines the type `Transaction`, the core type of the ledger
//! replay part of the engine.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Whether a transaction brought money in or took money out.
///
/// Direction is carried here, never by the sign of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money was earned or received.
    Income,
    /// Money was spent.
    Expense,
}

/// One of the two independent balance buckets a transaction affects.
///
/// The two channels are deliberately isolated: no transfer between them is
/// ever inferred, and a negative balance in either one is a valid,
/// reportable state rather than an error to correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentChannel {
    /// The bank account bucket. Also the fallback for unknown or empty
    /// payment methods, so that unclassified records stay visible in
    /// totals instead of disappearing.
    Account,
    /// The physical cash bucket.
    Cash,
}

/// An expense or income, i.e. an event where money was either spent or
/// earned, in canonical form.
///
/// Transactions are externally sourced facts: once built by
/// [`normalize`](crate::normalize()) they are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the transaction happened. A plain calendar date, no time zone.
    pub date: Date,
    /// Whether money came in or went out.
    pub kind: TransactionKind,
    /// The amount of money moved, in whole currency units. Always ≥ 0;
    /// see [TransactionKind] for direction.
    pub amount: f64,
    /// A free-text category, e.g. "Groceries", "Transportasi".
    pub category: String,
    /// An optional free-text sub-category.
    pub sub_category: Option<String>,
    /// The balance bucket this transaction affects.
    pub payment_channel: PaymentChannel,
    /// An optional note describing the transaction.
    pub note: Option<String>,
    /// An optional quantity, meaningful only for fuel tracking (litres
    /// bought alongside a fuel expense).
    pub quantity: Option<f64>,
    /// When the source system recorded the row, if known. Used only as a
    /// sort tie-break within a single day.
    pub source_timestamp: Option<OffsetDateTime>,
    /// The original date string as it appeared in the source row, retained
    /// for diagnostics.
    pub raw_date: String,
    /// The position of the row in the source log. Breaks same-day ties
    /// when no source timestamp is available, keeping the replay order
    /// deterministic.
    pub sequence: usize,
}

impl Transaction {
    /// The `(year, month)` key used to partition history around a queried
    /// month.
    ///
    /// Comparing these keys lexicographically is the only month arithmetic
    /// the engine does; year rollovers fall out of the tuple ordering.
    pub fn month_key(&self) -> (i32, u8) {
        (self.date.year(), self.date.month() as u8)
    }
}
