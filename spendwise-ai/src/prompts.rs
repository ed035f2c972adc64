//! Prompt text sent to the generative backend

use spendwise_core::{Category, ExpenseRecord};

pub fn predict_expense(description: &str) -> String {
    format!(
        "Analyze this expense description and predict the amount and category:\n\
Description: \"{description}\"\n\
\n\
Return JSON format:\n\
{{\n  \"description\": \"original description\",\n  \"amount\": number,\n  \"category\": \"{choices}\",\n  \"confidence\": 0-1\n}}\n\
\n\
Only return valid JSON, no additional text.",
        choices = Category::prompt_choices(),
    )
}

pub fn categorize_expense(description: &str) -> String {
    format!(
        "Categorize this expense into one of these categories:\n\
{choices}\n\
\n\
Description: \"{description}\"\n\
\n\
Return only the category name.",
        choices = Category::ALL.map(|c| c.as_str()).join(", "),
    )
}

pub fn smart_suggestions(recent: &[ExpenseRecord]) -> String {
    let mut listing = String::new();
    for e in recent {
        listing.push_str(&format!("- {}: ${:.2} ({})\n", e.description(), e.amount(), e.category()));
    }
    if listing.is_empty() {
        listing.push_str("(no expenses recorded yet)\n");
    }
    format!(
        "Based on these recent expenses, suggest 3 common expenses this user might have:\n\
{listing}\n\
Return JSON array format:\n\
[\n  {{\n    \"description\": \"suggested expense\",\n    \"amount\": number,\n    \"category\": \"{choices}\",\n    \"confidence\": 0-1\n  }}\n]\n\
\n\
Only return valid JSON, no additional text.",
        choices = Category::prompt_choices(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_prompt_mentions_input_and_shape() {
        let p = predict_expense("coffee with friend");
        assert!(p.contains("Description: \"coffee with friend\""));
        assert!(p.contains("\"confidence\": 0-1"));
        assert!(p.contains("Food|Transport|Shopping|Entertainment|Bills|Other"));
    }

    #[test]
    fn test_categorize_prompt_lists_categories() {
        let p = categorize_expense("bus");
        assert!(p.contains("Food, Transport, Shopping, Entertainment, Bills, Other"));
    }

    #[test]
    fn test_suggestion_prompt_lists_recent() {
        let e = ExpenseRecord::new("Uber ride", 80.0, Category::Transport).unwrap();
        let p = smart_suggestions(&[e]);
        assert!(p.contains("- Uber ride: $80.00 (Transport)"));
        assert!(smart_suggestions(&[]).contains("no expenses recorded yet"));
    }
}
