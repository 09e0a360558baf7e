//! Imposes the deterministic total order every replay depends on.

use crate::models::Transaction;

/// Sort transactions chronologically, in place.
///
/// The primary key is the calendar date. Within a single day, rows without
/// a source timestamp come first in their original ingestion order, then
/// timestamped rows ordered by timestamp; ingestion order breaks any
/// remaining tie. Comparing the `Option` timestamps directly keeps the
/// order total even when timestamp presence is mixed within one day.
/// Because the date is the primary key, a timestamp can never pull a
/// transaction across a date boundary.
pub fn sort_chronological(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.source_timestamp.cmp(&b.source_timestamp))
            .then(a.sequence.cmp(&b.sequence))
    });
}
