//! Expense record type shared by the ledger, classifier and chat responder

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A single recorded expense. Immutable once created.
///
/// Deserialization goes through the same checks as `with_id`, so a ledger
/// file with a negative or non-finite amount fails to load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "StoredExpense")]
pub struct ExpenseRecord {
    id: String,
    description: String,
    /// Non-negative amount spent
    amount: f64,
    category: Category,
    occurred_at: DateTime<Utc>,
}

/// On-disk shape, validated into an `ExpenseRecord`.
#[derive(Deserialize)]
struct StoredExpense {
    id: String,
    description: String,
    amount: f64,
    category: Category,
    occurred_at: DateTime<Utc>,
}

impl TryFrom<StoredExpense> for ExpenseRecord {
    type Error = anyhow::Error;

    fn try_from(s: StoredExpense) -> Result<Self> {
        Self::with_id(s.id, s.description, s.amount, s.category, s.occurred_at)
    }
}

impl ExpenseRecord {
    /// Create a record with a fresh id, stamped with the current time.
    pub fn new(description: impl Into<String>, amount: f64, category: Category) -> Result<Self> {
        Self::with_id(
            uuid::Uuid::new_v4().to_string(),
            description,
            amount,
            category,
            Utc::now(),
        )
    }

    pub fn with_id(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: Category,
        occurred_at: DateTime<Utc>,
    ) -> Result<Self> {
        ensure!(amount.is_finite(), "amount must be a finite number, got {amount}");
        ensure!(amount >= 0.0, "amount must not be negative, got {amount}");
        Ok(Self {
            id: id.into(),
            description: description.into(),
            amount,
            category,
            occurred_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// When the expense happened
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
