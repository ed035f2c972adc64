//! In-memory expense list, newest first.

use serde::{Deserialize, Serialize};

use crate::expense::ExpenseRecord;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseLedger {
    records: Vec<ExpenseRecord>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prepend, so the most recently added expense comes first.
    pub fn add(&mut self, record: ExpenseRecord) {
        self.records.insert(0, record);
    }

    /// Remove the whole record with `id`, if present.
    pub fn remove(&mut self, id: &str) -> Option<ExpenseRecord> {
        let pos = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(pos))
    }
}
