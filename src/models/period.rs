//! The result of a period-balance query.

use serde::{Deserialize, Serialize};

/// The balances and statistics for one queried month.
///
/// A pure value recomputed from the full transaction log on every query and
/// never cached inside the engine. All fields are plain signed numbers in
/// whole currency units; formatting, localization and currency symbols are
/// the consumer's concern. Field names serialize in the shape the reporting
/// layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodResult {
    /// The combined closing balance of both channels at the end of the
    /// month.
    pub current_balance: f64,
    /// Everything spent during the month, across both channels.
    pub total_expense: f64,
    /// The bank-account balance immediately before the first day of the
    /// month.
    pub beginning_balance: f64,
    /// The bank-account closing balance.
    pub account_remaining: f64,
    /// Bank-account spending during the month.
    pub account_expenses: f64,
    /// The cash closing balance.
    pub cash_remaining: f64,
    /// Cash spending during the month.
    pub cash_expenses: f64,
    /// Fuel litres bought during the month, summed from the quantities of
    /// transactions matched by the fuel predicate.
    pub total_fuel: f64,
}
