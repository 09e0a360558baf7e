//! Partitions the full transaction history around a requested month and
//! derives its opening/closing balances and statistics.

use time::Month;

use crate::{
    Error,
    config::EngineConfig,
    models::{PaymentChannel, PeriodResult, RawRecord, Transaction, TransactionKind},
    normalize::normalize_and_sort,
    replay::replay,
    sources::RecordSource,
};

/// Compute the [PeriodResult] for one month from the full raw history.
///
/// The history is normalized and sorted once, partitioned into the window
/// before the month and the month itself, and replayed. Bad records were
/// already dropped or defaulted during normalization, so this never fails
/// for business-data reasons; an empty history simply yields a zero-valued
/// result.
pub fn aggregate(
    month: Month,
    year: i32,
    records: &[RawRecord],
    config: &EngineConfig,
) -> PeriodResult {
    let transactions = normalize_and_sort(records, config);

    aggregate_transactions(month, year, &transactions, config.fuel.matcher())
}

/// Fetch the full history from a record source and aggregate one month.
///
/// # Errors
/// Propagates the source's [Error] untouched: a collaborator failure is
/// fatal to the query and no partial result is returned.
pub fn aggregate_from_source<S: RecordSource>(
    source: &S,
    month: Month,
    year: i32,
    config: &EngineConfig,
) -> Result<PeriodResult, Error> {
    let records = source.fetch_records()?;

    Ok(aggregate(month, year, &records, config))
}

/// Aggregate an already normalized, chronologically ordered history.
///
/// `is_fuel` decides which transactions contribute their quantity to the
/// fuel total; injecting it keeps locale-specific category labels out of
/// the replay logic. See [FuelConfig::matcher](crate::FuelConfig::matcher)
/// for the configured default.
pub fn aggregate_transactions(
    month: Month,
    year: i32,
    ordered: &[Transaction],
    is_fuel: impl Fn(&Transaction) -> bool,
) -> PeriodResult {
    let query = (year, month as u8);

    // Partition by lexicographic (year, month) comparison. Stepping a
    // "previous month" value by hand is how December gets lost from the
    // opening window at year rollovers.
    let mut before = Vec::new();
    let mut current = Vec::new();

    for transaction in ordered {
        let key = transaction.month_key();

        if key < query {
            before.push(transaction.clone());
        } else if key == query {
            current.push(transaction.clone());
        }
    }

    let opening = replay(&before);

    let mut closing = opening;
    let mut account_expenses = 0.0;
    let mut cash_expenses = 0.0;
    let mut total_income = 0.0;
    let mut total_fuel = 0.0;

    for transaction in &current {
        closing.apply(transaction);

        match transaction.kind {
            TransactionKind::Expense => match transaction.payment_channel {
                PaymentChannel::Account => account_expenses += transaction.amount,
                PaymentChannel::Cash => cash_expenses += transaction.amount,
            },
            TransactionKind::Income => total_income += transaction.amount,
        }

        if is_fuel(transaction) {
            if let Some(quantity) = transaction.quantity {
                total_fuel += quantity;
            }
        }
    }

    tracing::debug!(
        "aggregated {}-{:02}: {} prior and {} in-month transactions, income {total_income}",
        year,
        month as u8,
        before.len(),
        current.len(),
    );

    PeriodResult {
        current_balance: closing.total(),
        total_expense: account_expenses + cash_expenses,
        beginning_balance: opening.account,
        account_remaining: closing.account,
        account_expenses,
        cash_remaining: closing.cash,
        cash_expenses,
        total_fuel,
    }
}

#[cfg(test)]
mod aggregate_tests {
    use time::Month;

    use crate::{
        Error,
        aggregate::{aggregate, aggregate_from_source},
        config::EngineConfig,
        models::{RawRecord, RawValue},
        sources::RecordSource,
    };

    fn row(date: &str, amount: &str, kind: &str, method: &str) -> RawRecord {
        RawRecord {
            date: Some(RawValue::from(date)),
            amount: Some(RawValue::from(amount)),
            kind: Some(kind.to_owned()),
            payment_method: Some(method.to_owned()),
            ..Default::default()
        }
    }

    fn may_2025_history() -> Vec<RawRecord> {
        vec![
            row("01/05/2025", "1,000,000", "income", "cash"),
            row("15/05/2025", "200,000", "expense", "cash"),
        ]
    }

    #[test]
    fn scenario_queried_month_with_activity() {
        let result = aggregate(
            Month::May,
            2025,
            &may_2025_history(),
            &EngineConfig::default(),
        );

        assert_eq!(result.beginning_balance, 0.0);
        assert_eq!(result.cash_remaining, 800_000.0);
        assert_eq!(result.current_balance, 800_000.0);
        assert_eq!(result.total_expense, 200_000.0);
        assert_eq!(result.cash_expenses, 200_000.0);
        assert_eq!(result.account_expenses, 0.0);
        assert_eq!(result.account_remaining, 0.0);
    }

    #[test]
    fn scenario_following_month_carries_the_balance() {
        let result = aggregate(
            Month::June,
            2025,
            &may_2025_history(),
            &EngineConfig::default(),
        );

        assert_eq!(result.cash_remaining, 800_000.0);
        assert_eq!(result.current_balance, 800_000.0);
        assert_eq!(result.total_expense, 0.0);
        assert_eq!(result.cash_expenses, 0.0);
        assert_eq!(result.total_fuel, 0.0);
    }

    #[test]
    fn scenario_serial_date_aggregates_like_its_dmy_equivalent() {
        let config = EngineConfig::default();
        // 45762 = 2025-04-15.
        let serial = vec![row("45762", "50,000", "expense", "cash")];
        let written_out = vec![row("15/04/2025", "50,000", "expense", "cash")];

        let from_serial = aggregate(Month::April, 2025, &serial, &config);
        let from_text = aggregate(Month::April, 2025, &written_out, &config);

        assert_eq!(from_serial, from_text);
        assert_eq!(from_serial.total_expense, 50_000.0);
    }

    #[test]
    fn scenario_unparseable_amount_is_retained_as_zero() {
        let records = vec![
            row("01/05/2025", "abc", "expense", "cash"),
            row("02/05/2025", "100,000", "expense", "cash"),
        ];

        let result = aggregate(Month::May, 2025, &records, &EngineConfig::default());

        // The bad row contributes zero instead of disappearing.
        assert_eq!(result.total_expense, 100_000.0);
        assert_eq!(result.cash_remaining, -100_000.0);
    }

    #[test]
    fn january_opening_window_includes_all_of_previous_december() {
        let records = vec![
            row("31/12/2024", "500,000", "income", "transfer"),
            row("15/06/2024", "250,000", "income", "transfer"),
            row("02/01/2025", "100,000", "expense", "transfer"),
        ];

        let result = aggregate(Month::January, 2025, &records, &EngineConfig::default());

        assert_eq!(result.beginning_balance, 750_000.0);
        assert_eq!(result.account_remaining, 650_000.0);
    }

    #[test]
    fn first_day_of_month_belongs_to_current_not_before() {
        let records = vec![row("01/06/2025", "100,000", "expense", "transfer")];

        let result = aggregate(Month::June, 2025, &records, &EngineConfig::default());

        assert_eq!(result.beginning_balance, 0.0);
        assert_eq!(result.total_expense, 100_000.0);
    }

    #[test]
    fn transactions_after_the_queried_month_are_ignored() {
        let records = vec![
            row("15/05/2025", "200,000", "expense", "cash"),
            row("15/07/2025", "999,999", "expense", "cash"),
        ];

        let result = aggregate(Month::May, 2025, &records, &EngineConfig::default());

        assert_eq!(result.total_expense, 200_000.0);
        assert_eq!(result.cash_remaining, -200_000.0);
    }

    #[test]
    fn empty_history_yields_zero_valued_result() {
        let result = aggregate(Month::May, 2025, &[], &EngineConfig::default());

        assert_eq!(result, crate::models::PeriodResult::default());
    }

    #[test]
    fn is_idempotent_for_unchanged_input() {
        let records = may_2025_history();
        let config = EngineConfig::default();

        let first = aggregate(Month::May, 2025, &records, &config);
        let second = aggregate(Month::May, 2025, &records, &config);

        assert_eq!(first, second);
    }

    #[test]
    fn fuel_quantities_sum_only_for_matched_transactions() {
        let fuel = RawRecord {
            category: Some("Transportasi".to_owned()),
            sub_category: Some("Bensin".to_owned()),
            quantity: Some(RawValue::Number(25.5)),
            ..row("10/05/2025", "100,000", "expense", "cash")
        };
        let parking = RawRecord {
            category: Some("Transportasi".to_owned()),
            sub_category: Some("Parkir".to_owned()),
            quantity: Some(RawValue::Number(2.0)),
            ..row("11/05/2025", "5,000", "expense", "cash")
        };
        let second_fill = RawRecord {
            category: Some("Transportasi".to_owned()),
            sub_category: Some("bensin".to_owned()),
            quantity: Some(RawValue::from("10.5")),
            ..row("20/05/2025", "40,000", "expense", "cash")
        };

        let result = aggregate(
            Month::May,
            2025,
            &[fuel, parking, second_fill],
            &EngineConfig::default(),
        );

        assert_eq!(result.total_fuel, 36.0);
    }

    #[test]
    fn beginning_balance_reports_only_the_account_channel() {
        let records = vec![
            row("15/04/2025", "300,000", "income", "transfer"),
            row("16/04/2025", "100,000", "income", "cash"),
        ];

        let result = aggregate(Month::May, 2025, &records, &EngineConfig::default());

        assert_eq!(result.beginning_balance, 300_000.0);
        assert_eq!(result.current_balance, 400_000.0);
    }

    struct UnreachableSource;

    impl RecordSource for UnreachableSource {
        fn fetch_records(&self) -> Result<Vec<RawRecord>, Error> {
            Err(Error::SourceUnavailable {
                path: "sheet://budget".to_owned(),
                reason: "connection refused".to_owned(),
            })
        }
    }

    #[test]
    fn source_failure_is_fatal_with_no_partial_result() {
        let result = aggregate_from_source(
            &UnreachableSource,
            Month::May,
            2025,
            &EngineConfig::default(),
        );

        assert_eq!(
            result,
            Err(Error::SourceUnavailable {
                path: "sheet://budget".to_owned(),
                reason: "connection refused".to_owned(),
            })
        );
    }

    #[test]
    fn aggregate_from_source_reads_in_memory_records() {
        let source = may_2025_history();

        let result =
            aggregate_from_source(&source, Month::May, 2025, &EngineConfig::default()).unwrap();

        assert_eq!(result.cash_remaining, 800_000.0);
    }
}
