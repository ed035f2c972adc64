//! The closed set of expense categories shared by every component.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Expense category. Anything that does not match a known category is `Other`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    #[default]
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }

    /// `Food|Transport|...` for prompts that ask a model to pick one.
    pub fn prompt_choices() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the six categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {:?}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCategory(name.to_string()))
    }
}
