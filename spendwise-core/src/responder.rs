//! Canned answers to spending questions, matched on the question text.
//!
//! Checks run in order and the first hit answers:
//! total spending, transaction count, spending on a named category, help.

use anyhow::{Context, Result};
use regex::Regex;

use crate::analytics;
use crate::expense::ExpenseRecord;

const TOTAL_PHRASES: &[&str] = &["total spending", "how much did i spend in total"];
const COUNT_PHRASES: &[&str] = &["how many transactions", "transaction count"];
// ASCII word characters only, so "café" captures "caf"
const CATEGORY_QUERY: &str = r"how much.* on ((?-u:\w)+)";

pub const HELP_REPLY: &str =
    "I can answer questions about total spending, transaction counts, or spending on a specific category.";

#[derive(Debug, Clone)]
pub struct ChatResponder {
    total_phrases: Vec<String>,
    count_phrases: Vec<String>,
    category_query: Regex,
}

impl ChatResponder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            total_phrases: TOTAL_PHRASES.iter().map(|s| s.to_string()).collect(),
            count_phrases: COUNT_PHRASES.iter().map(|s| s.to_string()).collect(),
            category_query: Regex::new(CATEGORY_QUERY)
                .with_context(|| format!("compile {CATEGORY_QUERY:?}"))?,
        })
    }

    /// Answer `question` from `expenses`. Same inputs always give the same reply.
    pub fn respond(&self, question: &str, expenses: &[ExpenseRecord]) -> String {
        let q = question.to_lowercase();

        if self.total_phrases.iter().any(|p| q.contains(p.as_str())) {
            let total = analytics::format_money(analytics::total_spent(expenses));
            return format!("Your total spending is ${total}.");
        }

        if self.count_phrases.iter().any(|p| q.contains(p.as_str())) {
            return format!("You have made {} transactions.", expenses.len());
        }

        if let Some(word) = self.category_query.captures(&q).and_then(|c| c.get(1)) {
            let word = word.as_str();
            let spent: f64 = expenses
                .iter()
                .filter(|e| e.category().as_str().to_lowercase() == word)
                .map(|e| e.amount())
                .sum();
            // Unknown names and zero spend get the same answer.
            if spent > 0.0 {
                return format!("You spent ${} on {word}.", analytics::format_money(spent));
            }
            return format!("I couldn't find any spending for the category \"{word}\".");
        }

        HELP_REPLY.to_string()
    }
}
