//! Prediction result types

use serde::{Deserialize, Serialize};
use spendwise_core::Category;

use crate::error::PredictionError;

/// Minimum confidence at which a prediction may fill the form on its own.
pub const AUTOFILL_THRESHOLD: f64 = 0.7;

/// Structured guess for a free-text expense description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// The caller's input, echoed back
    pub description: String,
    pub amount: f64,
    pub category: Category,
    /// In [0, 1]
    pub confidence: f64,
}

impl Prediction {
    pub fn should_autofill(&self) -> bool {
        self.confidence >= AUTOFILL_THRESHOLD
    }
}

/// Where a prediction came from.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionSource {
    /// Parsed from the live backend's reply
    Live,
    /// Service runs without a backend
    Mock,
    /// Live call failed; the prediction is a mock
    Fallback(PredictionError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub prediction: Prediction,
    pub source: PredictionSource,
}

impl PredictionOutcome {
    /// The error that forced a fallback, if any.
    pub fn error(&self) -> Option<&PredictionError> {
        match &self.source {
            PredictionSource::Fallback(e) => Some(e),
            _ => None,
        }
    }
}
