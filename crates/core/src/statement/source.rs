//! General-ledger collaborators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::query::GlQuery;
use super::types::{GlEntry, PartyKind, Totals};

/// Read access to GL entries and party masters.
pub trait LedgerSource {
    /// Entries matching `query`, ordered by `(posting_date, creation, name)`.
    fn gl_entries(&self, query: &GlQuery) -> Vec<GlEntry>;

    /// Display name of a party from its master record.
    fn party_name(&self, kind: PartyKind, party: &str) -> Option<String>;

    /// Debit and credit sums of the entries matching `query`.
    ///
    /// Backends that can aggregate in place should override this.
    fn totals(&self, query: &GlQuery) -> Totals {
        Totals::sum(&self.gl_entries(query))
    }
}

/// A [`LedgerSource`] over in-memory rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryLedgerStore {
    /// GL entries in any order and state.
    pub entries: Vec<GlEntry>,
    /// Customer identifier to `customer_name`.
    pub customers: BTreeMap<String, String>,
    /// Supplier identifier to `supplier_name`.
    pub suppliers: BTreeMap<String, String>,
    /// Employee identifier to `employee_name`.
    pub employees: BTreeMap<String, String>,
}

impl LedgerSource for InMemoryLedgerStore {
    fn gl_entries(&self, query: &GlQuery) -> Vec<GlEntry> {
        let mut entries: Vec<GlEntry> = self
            .entries
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.ordering_key().cmp(&b.ordering_key()));
        entries
    }

    fn party_name(&self, kind: PartyKind, party: &str) -> Option<String> {
        let masters = match kind {
            PartyKind::Customer => &self.customers,
            PartyKind::Supplier => &self.suppliers,
            PartyKind::Employee => &self.employees,
        };
        masters.get(party).cloned()
    }

    fn totals(&self, query: &GlQuery) -> Totals {
        Totals::sum(self.entries.iter().filter(|e| query.matches(e)))
    }
}
