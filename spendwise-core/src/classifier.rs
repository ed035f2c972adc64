//! Rule-based categorizer used when the AI backend is unavailable.
//!
//! Rules are evaluated in table order and the first match wins, so the
//! order of `DEFAULT_RULES` is part of the behavior.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::category::Category;

/// Built-in keyword table, in priority order.
pub const DEFAULT_RULES: &[(&str, Category)] = &[
    ("coffee|food|lunch|dinner", Category::Food),
    ("gas|uber|taxi|bus|train", Category::Transport),
    ("amazon|clothes|electronics", Category::Shopping),
    ("movie|concert|game", Category::Entertainment),
    ("electricity|internet|phone", Category::Bills),
];

/// A compiled keyword alternation and the category it assigns.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub pattern: Regex,
    pub category: Category,
}

#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl CategoryClassifier {
    /// Compile an ordered rule table. Patterns match case-insensitively anywhere
    /// in the description.
    pub fn from_rules(table: &[(&str, Category)]) -> Result<Self> {
        let rules = table
            .iter()
            .map(|(pattern, category)| {
                let pattern = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("compile category rule {pattern:?}"))?;
                Ok(CategoryRule {
                    pattern,
                    category: *category,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Classifier over `DEFAULT_RULES`.
    pub fn builtin() -> Result<Self> {
        Self::from_rules(DEFAULT_RULES)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Category of the first matching rule, or `Other`.
    pub fn classify(&self, description: &str) -> Category {
        self.rules
            .iter()
            .find(|r| r.pattern.is_match(description))
            .map(|r| r.category)
            .unwrap_or(Category::Other)
    }
}
