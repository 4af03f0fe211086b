//! Composable GL entry predicates.
//!
//! Filters compile into a list of typed conditions instead of an SQL
//! fragment, so a storage backend can translate them with bound parameters
//! and the in-memory store can evaluate them directly.

use chrono::NaiveDate;

use super::types::{GlEntry, LedgerFilters};

/// A single condition on a GL entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlCondition {
    /// `is_cancelled` is false.
    NotCancelled,
    /// Company equals.
    Company(String),
    /// `posting_date >= date`.
    PostingDateFrom(NaiveDate),
    /// `posting_date <= date`.
    PostingDateTo(NaiveDate),
    /// Account equals.
    Account(String),
    /// Voucher type is one of the given kinds.
    VoucherTypeIn(Vec<String>),
    /// Voucher number equals.
    VoucherNo(String),
    /// Party type equals.
    PartyType(String),
    /// Party equals.
    Party(String),
    /// `posting_date < date`, or `posting_date == date` for opening entries.
    OpeningCutoff(NaiveDate),
    /// Excludes opening entries posted on `date`.
    NotOpeningOn(NaiveDate),
}

impl GlCondition {
    /// Evaluates the condition against one entry.
    #[must_use]
    pub fn matches(&self, entry: &GlEntry) -> bool {
        match self {
            Self::NotCancelled => !entry.is_cancelled,
            Self::Company(company) => entry.company == *company,
            Self::PostingDateFrom(date) => entry.posting_date >= *date,
            Self::PostingDateTo(date) => entry.posting_date <= *date,
            Self::Account(account) => entry.account == *account,
            Self::VoucherTypeIn(kinds) => kinds.iter().any(|k| *k == entry.voucher_type),
            Self::VoucherNo(no) => entry.voucher_no == *no,
            Self::PartyType(party_type) => entry.party_type.as_ref() == Some(party_type),
            Self::Party(party) => entry.party.as_ref() == Some(party),
            Self::OpeningCutoff(date) => {
                entry.posting_date < *date || (entry.posting_date == *date && entry.is_opening)
            }
            Self::NotOpeningOn(date) => !(entry.posting_date == *date && entry.is_opening),
        }
    }
}

/// A conjunction of [`GlCondition`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlQuery {
    conditions: Vec<GlCondition>,
}

impl Default for GlQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl GlQuery {
    /// A query matching every non-cancelled entry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            conditions: vec![GlCondition::NotCancelled],
        }
    }

    /// Adds a condition.
    #[must_use]
    pub fn with(mut self, condition: GlCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds a condition when `condition` is `Some`.
    #[must_use]
    pub fn with_opt(self, condition: Option<GlCondition>) -> Self {
        match condition {
            Some(c) => self.with(c),
            None => self,
        }
    }

    /// Drops every condition for which `remove` returns true.
    ///
    /// `NotCancelled` is never removed.
    #[must_use]
    pub fn without<F>(mut self, remove: F) -> Self
    where
        F: Fn(&GlCondition) -> bool,
    {
        self.conditions
            .retain(|c| *c == GlCondition::NotCancelled || !remove(c));
        self
    }

    /// Conditions in the order they were added.
    #[must_use]
    pub fn conditions(&self) -> &[GlCondition] {
        &self.conditions
    }

    /// Returns true if `entry` satisfies every condition.
    #[must_use]
    pub fn matches(&self, entry: &GlEntry) -> bool {
        self.conditions.iter().all(|c| c.matches(entry))
    }

    /// Query for the period rows of a statement.
    ///
    /// Without a `voucher_type` filter the query is restricted to
    /// `default_voucher_types` (no restriction if that list is empty).
    /// Opening entries posted on `from_date` are left out; they belong to
    /// the opening balance.
    #[must_use]
    pub fn period(filters: &LedgerFilters, default_voucher_types: &[String]) -> Self {
        let text = |v: Option<&String>| LedgerFilters::text(v).map(str::to_string);

        let voucher_types = match text(filters.voucher_type.as_ref()) {
            Some(kind) => Some(GlCondition::VoucherTypeIn(vec![kind])),
            None if default_voucher_types.is_empty() => None,
            None => Some(GlCondition::VoucherTypeIn(default_voucher_types.to_vec())),
        };

        Self::new()
            .with_opt(text(filters.company.as_ref()).map(GlCondition::Company))
            .with_opt(filters.from_date.map(GlCondition::PostingDateFrom))
            .with_opt(filters.to_date.map(GlCondition::PostingDateTo))
            .with_opt(text(filters.account.as_ref()).map(GlCondition::Account))
            .with_opt(voucher_types)
            .with_opt(text(filters.voucher_no.as_ref()).map(GlCondition::VoucherNo))
            .with_opt(text(filters.party_type.as_ref()).map(GlCondition::PartyType))
            .with_opt(text(filters.party.as_ref()).map(GlCondition::Party))
            .with_opt(filters.from_date.map(GlCondition::NotOpeningOn))
    }

    /// Query for the opening balance, or `None` without a `from_date`.
    ///
    /// Same as [`GlQuery::period`] minus the date bounds and the voucher
    /// number, plus the opening cutoff at `from_date`.
    #[must_use]
    pub fn opening(filters: &LedgerFilters, default_voucher_types: &[String]) -> Option<Self> {
        let from_date = filters.from_date?;
        let query = Self::period(filters, default_voucher_types)
            .without(|c| {
                matches!(
                    c,
                    GlCondition::PostingDateFrom(_)
                        | GlCondition::PostingDateTo(_)
                        | GlCondition::VoucherNo(_)
                        | GlCondition::NotOpeningOn(_)
                )
            })
            .with(GlCondition::OpeningCutoff(from_date));
        Some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn entry(posting_date: NaiveDate, voucher_type: &str) -> GlEntry {
        GlEntry {
            name: "GLE-1".to_string(),
            posting_date,
            creation: None,
            company: "Acme".to_string(),
            account: "Debtors".to_string(),
            voucher_type: voucher_type.to_string(),
            voucher_no: "JV-1".to_string(),
            party_type: Some("Customer".to_string()),
            party: Some("CUST-1".to_string()),
            debit: Decimal::ONE,
            credit: Decimal::ZERO,
            remarks: None,
            is_cancelled: false,
            is_opening: false,
        }
    }

    fn defaults() -> Vec<String> {
        vec!["Journal Entry".to_string(), "Payment Entry".to_string()]
    }

    fn march_filters() -> LedgerFilters {
        LedgerFilters {
            company: Some("Acme".to_string()),
            from_date: Some(date(3, 1)),
            to_date: Some(date(3, 31)),
            voucher_no: Some("JV-1".to_string()),
            ..LedgerFilters::default()
        }
    }

    #[test]
    fn test_period_conditions() {
        let query = GlQuery::period(&march_filters(), &defaults());
        assert_eq!(
            query.conditions(),
            &[
                GlCondition::NotCancelled,
                GlCondition::Company("Acme".to_string()),
                GlCondition::PostingDateFrom(date(3, 1)),
                GlCondition::PostingDateTo(date(3, 31)),
                GlCondition::VoucherTypeIn(defaults()),
                GlCondition::VoucherNo("JV-1".to_string()),
                GlCondition::NotOpeningOn(date(3, 1)),
            ]
        );
    }

    #[test]
    fn test_opening_conditions() {
        let query = GlQuery::opening(&march_filters(), &defaults()).unwrap();
        assert_eq!(
            query.conditions(),
            &[
                GlCondition::NotCancelled,
                GlCondition::Company("Acme".to_string()),
                GlCondition::VoucherTypeIn(defaults()),
                GlCondition::OpeningCutoff(date(3, 1)),
            ]
        );
        assert!(GlQuery::opening(&LedgerFilters::default(), &defaults()).is_none());
    }

    #[test]
    fn test_voucher_type_filter_replaces_defaults() {
        let filters = LedgerFilters {
            voucher_type: Some("Sales Invoice".to_string()),
            ..LedgerFilters::default()
        };
        let query = GlQuery::period(&filters, &defaults());
        assert!(query.matches(&entry(date(3, 2), "Sales Invoice")));
        assert!(!query.matches(&entry(date(3, 2), "Journal Entry")));

        let unrestricted = GlQuery::period(&LedgerFilters::default(), &[]);
        assert!(unrestricted.matches(&entry(date(3, 2), "Sales Invoice")));
    }

    #[test]
    fn test_opening_cutoff() {
        let cutoff = GlCondition::OpeningCutoff(date(3, 1));
        let mut e = entry(date(3, 1), "Journal Entry");
        assert!(!cutoff.matches(&e));
        e.is_opening = true;
        assert!(cutoff.matches(&e));
        assert!(cutoff.matches(&entry(date(2, 29), "Journal Entry")));
        assert!(!cutoff.matches(&entry(date(3, 2), "Journal Entry")));
    }

    #[test]
    fn test_cancelled_always_excluded() {
        let mut e = entry(date(3, 5), "Journal Entry");
        e.is_cancelled = true;
        let query = GlQuery::new().without(|_| true);
        assert_eq!(query.conditions(), &[GlCondition::NotCancelled]);
        assert!(!query.matches(&e));
    }

    #[test]
    fn test_empty_text_filters_ignored() {
        let filters = LedgerFilters {
            company: Some(String::new()),
            party: Some(String::new()),
            ..LedgerFilters::default()
        };
        let query = GlQuery::period(&filters, &[]);
        assert_eq!(query.conditions(), &[GlCondition::NotCancelled]);
    }
}
