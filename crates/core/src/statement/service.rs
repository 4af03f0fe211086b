//! GL party statement generation.

use c4reports_shared::ReportsConfig;
use serde::Serialize;
use tracing::debug;

use super::balance::{RunningBalance, StatementSummary};
use super::query::GlQuery;
use super::source::LedgerSource;
use super::types::{GlEntry, LedgerFilters, PartyKind, RowKind, StatementRow, Totals};
use crate::schema::{Column, FieldType, Record};

/// Columns and rows of a GL party statement.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerStatement {
    /// Column schema.
    pub columns: Vec<Column>,
    /// Opening row (only with a `from_date`), period rows, totals row,
    /// closing row.
    pub rows: Vec<StatementRow>,
    /// Opening, period and closing sums.
    pub summary: StatementSummary,
}

impl LedgerStatement {
    /// Period rows only.
    pub fn entry_rows(&self) -> impl Iterator<Item = &StatementRow> {
        self.rows.iter().filter(|r| r.kind == RowKind::Entry)
    }

    /// Generic rows keyed by column field key.
    #[must_use]
    pub fn to_records(&self) -> Vec<Record> {
        self.rows.iter().map(StatementRow::to_record).collect()
    }
}

/// Service for generating GL party statements.
pub struct StatementService;

impl StatementService {
    /// Builds the statement for `filters` from `source`.
    ///
    /// No condition is an error: with no matching entries the statement
    /// still carries its summary rows.
    pub fn generate<S>(
        filters: &LedgerFilters,
        source: &S,
        settings: &ReportsConfig,
    ) -> LedgerStatement
    where
        S: LedgerSource + ?Sized,
    {
        let opening = Self::opening_totals(filters, source, settings);
        let entries = source.gl_entries(&GlQuery::period(filters, &settings.default_voucher_types));

        debug!(
            from_date = ?filters.from_date,
            to_date = ?filters.to_date,
            opening_debit = %opening.debit,
            opening_credit = %opening.credit,
            entries = entries.len(),
            "Generating GL party statement"
        );

        Self::assemble(filters, opening, &entries, |kind, party| {
            source.party_name(kind, party)
        })
    }

    /// Debit and credit sums brought forward into the period.
    ///
    /// Zero without a `from_date`.
    pub fn opening_totals<S>(filters: &LedgerFilters, source: &S, settings: &ReportsConfig) -> Totals
    where
        S: LedgerSource + ?Sized,
    {
        GlQuery::opening(filters, &settings.default_voucher_types)
            .map(|query| source.totals(&query))
            .unwrap_or_default()
    }

    /// Walks `entries` in the given order and assembles the statement.
    ///
    /// Each period row's balance is the opening balance plus the net of
    /// every row up to and including it.
    pub fn assemble<F>(
        filters: &LedgerFilters,
        opening: Totals,
        entries: &[GlEntry],
        party_name: F,
    ) -> LedgerStatement
    where
        F: Fn(PartyKind, &str) -> Option<String>,
    {
        let summary = StatementSummary::new(opening, Totals::sum(entries));
        let mut running = RunningBalance::starting_at(summary.opening_balance());
        let mut rows = Vec::with_capacity(entries.len() + 3);

        if let Some(from_date) = filters.from_date {
            rows.push(Self::summary_row(
                filters,
                Summary::Opening,
                Some(from_date),
                summary.opening,
            ));
        }

        rows.extend(entries.iter().map(|entry| StatementRow {
            kind: RowKind::Entry,
            posting_date: Some(entry.posting_date),
            company: Some(entry.company.clone()),
            account: Some(entry.account.clone()),
            voucher_type: entry.voucher_type.clone(),
            voucher_no: entry.voucher_no.clone(),
            party_type: entry.party_type.clone(),
            party: entry.party.clone(),
            party_name: display_party(entry, &party_name),
            debit: entry.debit,
            credit: entry.credit,
            balance: running.apply(entry.net()),
            remarks: entry.remarks.clone(),
        }));

        rows.push(Self::summary_row(filters, Summary::Totals, None, summary.period));
        rows.push(Self::summary_row(
            filters,
            Summary::Closing,
            filters.to_date.or(filters.from_date),
            summary.closing,
        ));

        LedgerStatement {
            columns: Self::columns(),
            rows,
            summary,
        }
    }

    /// Column schema of the statement.
    #[must_use]
    pub fn columns() -> Vec<Column> {
        vec![
            Column::new("Posting Date", "posting_date", FieldType::Date, 110),
            Column::link("Company", "company", "Company", 140),
            Column::link("Account", "account", "Account", 180),
            Column::new("Voucher Type", "voucher_type", FieldType::Data, 130),
            Column::dynamic_link("Voucher No", "voucher_no", "voucher_type", 170),
            Column::new("Party Type", "party_type", FieldType::Data, 110),
            Column::dynamic_link("Party", "party", "party_type", 140),
            Column::new("Party Name", "party_name", FieldType::Data, 180),
            Column::new("Debit", "debit", FieldType::Currency, 120),
            Column::new("Credit", "credit", FieldType::Currency, 120),
            Column::new("Balance", "balance", FieldType::Currency, 120),
            Column::new("Remarks", "remarks", FieldType::SmallText, 260),
        ]
    }

    fn summary_row(
        filters: &LedgerFilters,
        summary: Summary,
        posting_date: Option<chrono::NaiveDate>,
        totals: Totals,
    ) -> StatementRow {
        let (kind, label, remarks) = match summary {
            Summary::Opening => (RowKind::Opening, "Opening", "Opening Balance"),
            Summary::Totals => (RowKind::Totals, "Totals", "Period Totals"),
            Summary::Closing => (RowKind::Closing, "Closing", "Closing Balance"),
        };

        StatementRow {
            kind,
            posting_date,
            company: filters.company.clone(),
            account: filters.account.clone(),
            voucher_type: label.to_string(),
            voucher_no: String::new(),
            party_type: filters.party_type.clone(),
            party: filters.party.clone(),
            party_name: Some(String::new()),
            debit: totals.debit,
            credit: totals.credit,
            balance: totals.balance(),
            remarks: Some(remarks.to_string()),
        }
    }
}

/// The summary rows framing the period entries.
#[derive(Debug, Clone, Copy)]
enum Summary {
    Opening,
    Totals,
    Closing,
}

/// Master display name for customers, suppliers and employees; the raw
/// party identifier for any other party type.
fn display_party<F>(entry: &GlEntry, party_name: &F) -> Option<String>
where
    F: Fn(PartyKind, &str) -> Option<String>,
{
    let kind = entry.party_type.as_deref().and_then(PartyKind::from_party_type);
    match kind {
        Some(kind) => entry.party.as_deref().and_then(|party| party_name(kind, party)),
        None => entry.party.clone(),
    }
}
