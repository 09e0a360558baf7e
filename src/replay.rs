//! The ledger replay engine: a strict left-fold over an ordered
//! transaction sequence producing the two running channel balances.

use crate::models::{PaymentChannel, Transaction, TransactionKind};

/// The running balances of the two independent payment channels.
///
/// The channels never interact: money spent from cash never touches the
/// account balance and no transfer between them is ever inferred, even
/// when a bucket goes negative. A negative balance is a valid, reportable
/// result, not an error to correct.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ledger {
    /// The bank-account balance.
    pub account: f64,
    /// The cash balance.
    pub cash: f64,
}

impl Ledger {
    /// Apply one transaction: add income, subtract expense, in the bucket
    /// selected by its payment channel.
    pub fn apply(&mut self, transaction: &Transaction) {
        let delta = match transaction.kind {
            TransactionKind::Income => transaction.amount,
            TransactionKind::Expense => -transaction.amount,
        };

        match transaction.payment_channel {
            PaymentChannel::Account => self.account += delta,
            PaymentChannel::Cash => self.cash += delta,
        }
    }

    /// The combined balance of both channels.
    pub fn total(&self) -> f64 {
        self.account + self.cash
    }
}

/// Replay an ordered transaction sequence from zero.
///
/// Pure and deterministic: identical ordered input always produces an
/// identical ledger. Callers needing an opening state simply replay the
/// earlier window first; replaying a prefix and then continuing with the
/// suffix is exactly equivalent to replaying the whole sequence at once.
pub fn replay(ordered: &[Transaction]) -> Ledger {
    let mut ledger = Ledger::default();

    for transaction in ordered {
        ledger.apply(transaction);
    }

    ledger
}
