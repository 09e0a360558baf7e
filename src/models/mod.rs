//! The domain types of the engine: raw collaborator rows, canonical
//! transactions, and the period query result.

mod period;
mod raw;
mod transaction;

pub use period::PeriodResult;
pub use raw::{RawRecord, RawValue};
pub use transaction::{PaymentChannel, Transaction, TransactionKind};
