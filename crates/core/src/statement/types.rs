//! GL party statement types.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::Record;

/// A general-ledger entry as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlEntry {
    /// Entry identifier; last ordering key.
    pub name: String,
    /// Posting date; first ordering key.
    pub posting_date: NaiveDate,
    /// Creation timestamp; second ordering key.
    #[serde(default)]
    pub creation: Option<NaiveDateTime>,
    /// Company.
    pub company: String,
    /// Account.
    pub account: String,
    /// Voucher type, e.g. "Journal Entry".
    pub voucher_type: String,
    /// Voucher number.
    pub voucher_no: String,
    /// Party type, e.g. "Customer".
    #[serde(default)]
    pub party_type: Option<String>,
    /// Party identifier.
    #[serde(default)]
    pub party: Option<String>,
    /// Debit amount; missing means zero.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount; missing means zero.
    #[serde(default)]
    pub credit: Decimal,
    /// Free-text remarks.
    #[serde(default)]
    pub remarks: Option<String>,
    /// Cancelled entries never count.
    #[serde(default)]
    pub is_cancelled: bool,
    /// Carried-forward balance rather than a period transaction.
    #[serde(default)]
    pub is_opening: bool,
}

impl GlEntry {
    /// Debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Sort key `(posting_date, creation, name)`.
    #[must_use]
    pub fn ordering_key(&self) -> (NaiveDate, Option<NaiveDateTime>, &str) {
        (self.posting_date, self.creation, self.name.as_str())
    }
}

/// Filters accepted by the GL party statement. All optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerFilters {
    /// Company.
    pub company: Option<String>,
    /// Period start; enables the opening row.
    pub from_date: Option<NaiveDate>,
    /// Period end.
    pub to_date: Option<NaiveDate>,
    /// Account.
    pub account: Option<String>,
    /// Voucher type; when absent the configured default set applies.
    pub voucher_type: Option<String>,
    /// Voucher number; does not affect the opening balance.
    pub voucher_no: Option<String>,
    /// Party type.
    pub party_type: Option<String>,
    /// Party.
    pub party: Option<String>,
}

impl LedgerFilters {
    /// A text filter, treating empty strings as absent.
    #[must_use]
    pub fn text(value: Option<&String>) -> Option<&str> {
        value.map(String::as_str).filter(|s| !s.is_empty())
    }
}

/// Party types whose display name comes from a master record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyKind {
    /// Customer master, `customer_name`.
    Customer,
    /// Supplier master, `supplier_name`.
    Supplier,
    /// Employee master, `employee_name`.
    Employee,
}

impl PartyKind {
    /// Recognizes the party types with a master record.
    #[must_use]
    pub fn from_party_type(party_type: &str) -> Option<Self> {
        match party_type {
            "Customer" => Some(Self::Customer),
            "Supplier" => Some(Self::Supplier),
            "Employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

/// Debit and credit sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of debits.
    pub debit: Decimal,
    /// Sum of credits.
    pub credit: Decimal,
}

impl Totals {
    /// Creates totals.
    #[must_use]
    pub const fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }

    /// Debit minus credit.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Sums the debit and credit of `entries`.
    pub fn sum<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a GlEntry>,
    {
        entries.into_iter().fold(Self::default(), |acc, e| Self {
            debit: acc.debit + e.debit,
            credit: acc.credit + e.credit,
        })
    }
}

impl std::ops::Add for Totals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            debit: self.debit + rhs.debit,
            credit: self.credit + rhs.credit,
        }
    }
}

/// Role of a statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Balance brought forward.
    Opening,
    /// A period ledger entry.
    Entry,
    /// Sum of the period rows.
    Totals,
    /// Balance carried forward.
    Closing,
}

/// One row of the statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    /// Role of the row.
    pub kind: RowKind,
    /// Posting date; absent on the totals row.
    pub posting_date: Option<NaiveDate>,
    /// Company.
    pub company: Option<String>,
    /// Account.
    pub account: Option<String>,
    /// Voucher type, or the summary label.
    pub voucher_type: String,
    /// Voucher number; empty on summary rows.
    pub voucher_no: String,
    /// Party type.
    pub party_type: Option<String>,
    /// Party.
    pub party: Option<String>,
    /// Party display name.
    pub party_name: Option<String>,
    /// Debit.
    pub debit: Decimal,
    /// Credit.
    pub credit: Decimal,
    /// Running balance on entry rows, net balance on summary rows.
    pub balance: Decimal,
    /// Remarks.
    pub remarks: Option<String>,
}

impl StatementRow {
    /// Flattens the row into field key to value.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            "posting_date".into(),
            Value::from(self.posting_date.map(|d| d.to_string())),
        );
        record.insert("company".into(), Value::from(self.company.clone()));
        record.insert("account".into(), Value::from(self.account.clone()));
        record.insert("voucher_type".into(), Value::from(self.voucher_type.clone()));
        record.insert("voucher_no".into(), Value::from(self.voucher_no.clone()));
        record.insert("party_type".into(), Value::from(self.party_type.clone()));
        record.insert("party".into(), Value::from(self.party.clone()));
        record.insert("party_name".into(), Value::from(self.party_name.clone()));
        record.insert("debit".into(), Value::from(self.debit.to_string()));
        record.insert("credit".into(), Value::from(self.credit.to_string()));
        record.insert("balance".into(), Value::from(self.balance.to_string()));
        record.insert("remarks".into(), Value::from(self.remarks.clone()));
        record
    }
}
