//! Spending aggregates over a list of expenses.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::category::Category;
use crate::expense::ExpenseRecord;

pub fn total_spent(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.amount()).sum()
}

/// Total per category, in `Category::ALL` order. Categories with no spend are included as 0.
pub fn category_totals(records: &[ExpenseRecord]) -> Vec<(Category, f64)> {
    Category::ALL
        .iter()
        .map(|c| {
            let total = records
                .iter()
                .filter(|r| r.category() == *c)
                .map(|r| r.amount())
                .sum();
            (*c, total)
        })
        .collect()
}

/// Total for one calendar day as seen in `tz`.
pub fn spent_on(records: &[ExpenseRecord], day: NaiveDate, tz: Tz) -> f64 {
    records
        .iter()
        .filter(|r| r.occurred_at().with_timezone(&tz).date_naive() == day)
        .map(|r| r.amount())
        .sum()
}

/// Two-decimal money text. Exact half-cent ties round away from zero
/// (`0.125` is `"0.13"`); every other value rounds to the nearest cent.
pub fn format_money(amount: f64) -> String {
    let cents = amount * 100.0;
    // zero residual means `cents` is the exact product
    let exact = amount.mul_add(100.0, -cents) == 0.0;
    if exact && cents.fract().abs() == 0.5 {
        let away = cents.trunc() + cents.signum();
        return format!("{:.2}", away / 100.0);
    }
    format!("{amount:.2}")
}
