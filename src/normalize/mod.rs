//! Converts heterogeneous raw rows into canonical, immutable
//! [Transaction] values.
//!
//! Normalization is a pure function with one failure mode: a record whose
//! date cannot be resolved (or whose date/amount field is missing outright)
//! is rejected, and logging the drop is the caller's concern. A malformed
//! amount *string*, by contrast, coerces to zero and the record is kept.
//! The two leniency policies are deliberately different and changing either
//! would retroactively change totals for already-ingested history.

mod date;

pub(crate) use date::parse_record_date;
pub use date::serial_to_date;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    config::EngineConfig,
    models::{PaymentChannel, RawRecord, RawValue, Transaction, TransactionKind},
    sort::sort_chronological,
};

/// Why a raw record was not admitted into the working set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    /// The record has no date field at all.
    #[error("the record has no date")]
    MissingDate,

    /// The date field could not be resolved to a calendar date by any of
    /// the supported encodings.
    #[error("could not resolve \"{0}\" to a calendar date")]
    UnparseableDate(String),

    /// The record has no amount field at all.
    #[error("the record has no amount")]
    MissingAmount,
}

/// Convert one raw row into a canonical [Transaction].
///
/// `sequence` is the position of the row in the source log; it is retained
/// on the transaction as the deterministic same-day tie-break.
///
/// # Errors
/// Returns a [Rejection] when the date is missing or unresolvable, or when
/// the amount field is missing. No other input rejects: malformed amounts
/// coerce to zero, unknown types become expenses, and unknown payment
/// methods land in the bank-account channel.
pub fn normalize(
    raw: &RawRecord,
    sequence: usize,
    config: &EngineConfig,
) -> Result<Transaction, Rejection> {
    let raw_date = match &raw.date {
        Some(value) => value.to_text(),
        None => return Err(Rejection::MissingDate),
    };

    if raw_date.trim().is_empty() {
        return Err(Rejection::MissingDate);
    }

    let date = parse_record_date(&raw_date)
        .ok_or_else(|| Rejection::UnparseableDate(raw_date.clone()))?;

    let amount_field = raw.amount.as_ref().ok_or(Rejection::MissingAmount)?;
    let amount = parse_amount(amount_field);

    Ok(Transaction {
        date,
        kind: resolve_kind(raw.kind.as_deref(), config),
        amount,
        category: raw.category.clone().unwrap_or_default(),
        sub_category: raw.sub_category.clone().filter(|sub| !sub.is_empty()),
        payment_channel: resolve_channel(raw.payment_method.as_deref(), config),
        note: raw.description.clone().filter(|note| !note.is_empty()),
        quantity: raw.quantity.as_ref().and_then(parse_quantity),
        source_timestamp: raw
            .timestamp
            .as_deref()
            .and_then(|text| OffsetDateTime::parse(text, &Rfc3339).ok()),
        raw_date,
        sequence,
    })
}

/// Normalize a whole unordered history and impose the chronological total
/// order, logging every dropped record.
///
/// This is the front half of every period query: the output is ready to be
/// partitioned and replayed.
pub fn normalize_and_sort(records: &[RawRecord], config: &EngineConfig) -> Vec<Transaction> {
    let mut transactions: Vec<Transaction> = records
        .iter()
        .enumerate()
        .filter_map(|(sequence, record)| match normalize(record, sequence, config) {
            Ok(transaction) => Some(transaction),
            Err(rejection) => {
                tracing::warn!("dropping record {sequence}: {rejection}");
                None
            }
        })
        .collect();

    sort_chronological(&mut transactions);

    transactions
}

/// Parse an amount as a non-negative decimal in whole currency units.
///
/// Thousands separators and whitespace are stripped before parsing. A
/// value that still fails to parse coerces to `0` and the record is kept,
/// unlike an unparseable date, which drops the whole record. A minus sign
/// is discarded rather than treated as a parse failure: direction is
/// carried by the transaction type, never by sign.
fn parse_amount(value: &RawValue) -> f64 {
    match value {
        RawValue::Number(amount) if amount.is_finite() => amount.abs(),
        RawValue::Number(_) => 0.0,
        RawValue::Text(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();

            match cleaned.parse::<f64>() {
                Ok(amount) if amount.is_finite() => amount.abs(),
                _ => {
                    tracing::debug!("coercing unparseable amount \"{text}\" to 0");
                    0.0
                }
            }
        }
    }
}

/// Parse an optional quantity; unlike amounts, a malformed quantity is
/// simply absent rather than zero.
fn parse_quantity(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(quantity) if quantity.is_finite() => Some(*quantity),
        RawValue::Number(_) => None,
        RawValue::Text(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();

            cleaned.parse().ok()
        }
    }
}

/// Resolve the free-text type against the income synonym table; everything
/// else is an expense.
fn resolve_kind(kind: Option<&str>, config: &EngineConfig) -> TransactionKind {
    let Some(kind) = kind else {
        return TransactionKind::Expense;
    };

    let kind = kind.trim();
    let is_income = config
        .income_synonyms
        .iter()
        .any(|synonym| kind.eq_ignore_ascii_case(synonym));

    if is_income {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    }
}

/// Resolve the free-text payment method to a channel. Methods containing a
/// cash synonym go to [PaymentChannel::Cash]; anything else, including an
/// unknown or empty method, goes to [PaymentChannel::Account] so it stays
/// visible in totals rather than disappearing.
fn resolve_channel(method: Option<&str>, config: &EngineConfig) -> PaymentChannel {
    let Some(method) = method else {
        return PaymentChannel::Account;
    };

    let method = method.to_lowercase();
    let is_cash = config
        .cash_synonyms
        .iter()
        .any(|synonym| method.contains(&synonym.to_lowercase()));

    if is_cash {
        PaymentChannel::Cash
    } else {
        PaymentChannel::Account
    }
}
