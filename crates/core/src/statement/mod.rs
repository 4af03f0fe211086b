//! GL party statement.
//!
//! Lists general-ledger entries matching the filters with a running
//! balance, framed by an opening row (balance brought forward to
//! `from_date`), a period totals row and a closing row.
//!
//! Amounts use [`rust_decimal::Decimal`]; the balance is always
//! `debit - credit` accumulated in `(posting_date, creation, name)` order.

pub mod balance;
pub mod query;
pub mod service;
pub mod source;
pub mod types;

#[cfg(test)]
mod tests;

pub use balance::{RunningBalance, StatementSummary};
pub use query::{GlCondition, GlQuery};
pub use service::{LedgerStatement, StatementService};
pub use source::{InMemoryLedgerStore, LedgerSource};
pub use types::{GlEntry, LedgerFilters, PartyKind, RowKind, StatementRow, Totals};
