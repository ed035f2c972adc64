//! Deterministic-shape stand-ins used when no live backend answers.

use rand::Rng;
use spendwise_core::Category;

use crate::prediction::Prediction;

/// Random prediction: whole-dollar amount in [5, 105), uniform category,
/// confidence in [0.7, 1.0) so it always clears the autofill threshold.
pub fn mock_prediction<R: Rng + ?Sized>(description: &str, rng: &mut R) -> Prediction {
    let amount: u32 = rng.gen_range(5..105);
    let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
    Prediction {
        description: description.to_string(),
        amount: f64::from(amount),
        category,
        confidence: rng.gen_range(0.7..1.0),
    }
}

/// Suggestions shown when the backend cannot produce any.
pub fn fallback_suggestions() -> Vec<Prediction> {
    [
        ("Coffee", 5.0, Category::Food, 0.8),
        ("Gas", 40.0, Category::Transport, 0.7),
        ("Groceries", 50.0, Category::Food, 0.6),
    ]
    .into_iter()
    .map(|(description, amount, category, confidence)| Prediction {
        description: description.to_string(),
        amount,
        category,
        confidence,
    })
    .collect()
}
