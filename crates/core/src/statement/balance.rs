//! Running balance over ordered ledger rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Totals;

/// Balance carried from row to row.
///
/// After row *i*: `current = opening + Σ(debit − credit)` over rows 1..=i.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Balance after the most recent row.
    pub current: Decimal,
}

impl RunningBalance {
    /// Starts at the opening balance.
    #[must_use]
    pub fn starting_at(opening_balance: Decimal) -> Self {
        Self {
            current: opening_balance,
        }
    }

    /// Applies one row's net amount (`debit - credit`) and returns the new
    /// balance.
    pub fn apply(&mut self, net: Decimal) -> Decimal {
        self.current += net;
        self.current
    }
}

/// Opening, period and closing sums of a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Entries before the period (plus opening entries on its first day).
    pub opening: Totals,
    /// Entries within the period.
    pub period: Totals,
    /// Opening plus period.
    pub closing: Totals,
}

impl StatementSummary {
    /// Derives the closing sums.
    #[must_use]
    pub fn new(opening: Totals, period: Totals) -> Self {
        Self {
            opening,
            period,
            closing: opening + period,
        }
    }

    /// `opening.debit - opening.credit`.
    #[must_use]
    pub fn opening_balance(&self) -> Decimal {
        self.opening.balance()
    }

    /// `period.debit - period.credit`.
    #[must_use]
    pub fn period_balance(&self) -> Decimal {
        self.period.balance()
    }

    /// `opening_balance + period_balance`.
    #[must_use]
    pub fn closing_balance(&self) -> Decimal {
        self.closing.balance()
    }
}
