//! Property tests for the GL party statement.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn gl_entry() -> impl Strategy<Value = (u64, Decimal, Decimal, bool, bool)> {
    (0u64..120, amount(), amount(), any::<bool>(), prop::bool::weighted(0.1))
}

fn build(index: usize, row: (u64, Decimal, Decimal, bool, bool)) -> GlEntry {
    let (offset, debit, credit, is_opening, is_cancelled) = row;
    GlEntry {
        name: format!("GLE-{index:04}"),
        posting_date: base_date() + Days::new(offset),
        creation: None,
        company: "Acme".to_string(),
        account: "Debtors".to_string(),
        voucher_type: "Journal Entry".to_string(),
        voucher_no: format!("JV-{index}"),
        party_type: Some("Customer".to_string()),
        party: Some("CUST-1".to_string()),
        debit,
        credit,
        remarks: None,
        is_cancelled,
        is_opening,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Row N balance equals opening balance plus the net of rows 1..=N,
    /// and the closing balance equals the last row's balance.
    #[test]
    fn prop_running_balance_matches_prefix_sums(
        specs in prop::collection::vec(gl_entry(), 0..40),
        from_offset in 0u64..60,
        span in 0u64..60,
    ) {
        let store = InMemoryLedgerStore {
            entries: specs.into_iter().enumerate().map(|(i, s)| build(i, s)).collect(),
            ..InMemoryLedgerStore::default()
        };
        let filters = LedgerFilters {
            from_date: Some(base_date() + Days::new(from_offset)),
            to_date: Some(base_date() + Days::new(from_offset + span)),
            ..LedgerFilters::default()
        };
        let statement = StatementService::generate(
            &filters,
            &store,
            &c4reports_shared::ReportsConfig::default(),
        );

        let opening = statement.summary.opening_balance();
        let mut expected = opening;
        for row in statement.entry_rows() {
            expected += row.debit - row.credit;
            prop_assert_eq!(row.balance, expected);
        }
        prop_assert_eq!(statement.summary.closing_balance(), expected);

        let closing = statement.rows.last().unwrap();
        prop_assert_eq!(closing.kind, RowKind::Closing);
        prop_assert_eq!(closing.balance, expected);
    }

    /// Without a `to_date`, every non-cancelled entry lands in exactly one
    /// of the opening balance and the period rows.
    #[test]
    fn prop_opening_and_period_partition_history(
        specs in prop::collection::vec(gl_entry(), 0..40),
        from_offset in 0u64..60,
    ) {
        let entries: Vec<GlEntry> =
            specs.into_iter().enumerate().map(|(i, s)| build(i, s)).collect();
        let store = InMemoryLedgerStore {
            entries: entries.clone(),
            ..InMemoryLedgerStore::default()
        };
        let filters = LedgerFilters {
            from_date: Some(base_date() + Days::new(from_offset)),
            ..LedgerFilters::default()
        };
        let statement = StatementService::generate(
            &filters,
            &store,
            &c4reports_shared::ReportsConfig::default(),
        );

        let all = Totals::sum(entries.iter().filter(|e| !e.is_cancelled));
        prop_assert_eq!(statement.summary.closing, all);
    }
}
