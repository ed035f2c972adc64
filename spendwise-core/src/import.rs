//! Import expenses from a CSV export.
//!
//! Expected header:
//! date,description,amount,category
//!
//! `date` is `YYYY-MM-DD` (taken as midnight UTC) or RFC 3339.
//! A missing or unknown category is filled in by the classifier.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::path::Path;

use crate::category::Category;
use crate::classifier::CategoryClassifier;
use crate::expense::ExpenseRecord;

#[derive(Debug, Deserialize)]
struct Row {
    date: String,
    description: String,
    amount: String,
    #[serde(default)]
    category: String,
}

/// Parse an expense CSV file. Rows with a bad date or amount are skipped.
pub fn parse_expense_csv(
    path: impl AsRef<Path>,
    classifier: &CategoryClassifier,
) -> Result<Vec<ExpenseRecord>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    read_rows(rdr, classifier)
}

fn read_rows<R: std::io::Read>(
    mut rdr: csv::Reader<R>,
    classifier: &CategoryClassifier,
) -> Result<Vec<ExpenseRecord>> {
    let mut out = Vec::new();
    for result in rdr.deserialize::<Row>() {
        let row = result.context("reading csv row")?;

        let Some(occurred_at) = parse_date(&row.date) else {
            continue;
        };
        let Ok(amount) = row.amount.replace(',', "").parse::<f64>() else {
            continue;
        };
        let category = row
            .category
            .parse::<Category>()
            .unwrap_or_else(|_| classifier.classify(&row.description));

        let id = uuid::Uuid::new_v4().to_string();
        match ExpenseRecord::with_id(id, row.description, amount, category, occurred_at) {
            Ok(rec) => out.push(rec),
            Err(_) => continue, // negative or non-finite amount
        }
    }
    Ok(out)
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(d.and_hms_opt(0, 0, 0)?.and_utc())
}
