//! Prediction service: live backend when configured, mock otherwise.
//!
//! Every public call returns usable data. Backend failures are logged and
//! replaced with the mock or rule-based answer.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use spendwise_core::{Category, CategoryClassifier, ExpenseRecord};

use crate::backend::GenerativeBackend;
use crate::config::AiSettings;
use crate::gemini::GeminiBackend;
use crate::mock;
use crate::parsing;
use crate::prediction::{Prediction, PredictionOutcome, PredictionSource};
use crate::prompts;

#[derive(Clone)]
pub struct PredictionService {
    /// `None` means permanent mock mode.
    backend: Option<Arc<dyn GenerativeBackend>>,
    classifier: CategoryClassifier,
}

impl PredictionService {
    /// Build from config. A missing key or `enabled = false` selects mock mode.
    pub fn from_settings(settings: &AiSettings, api_key: Option<&str>) -> Result<Self> {
        let classifier = CategoryClassifier::builtin()?;

        if !settings.enabled {
            info!("AI disabled in config; using mock predictions");
            return Ok(Self::mock(classifier));
        }

        match GeminiBackend::new(&settings.endpoint, api_key.unwrap_or_default(), settings.timeout()) {
            Ok(backend) => {
                info!(endpoint = %backend.endpoint(), "live AI predictions enabled");
                Ok(Self::with_backend(Arc::new(backend), classifier))
            }
            Err(e) => {
                info!(reason = %e, "using mock predictions");
                Ok(Self::mock(classifier))
            }
        }
    }

    pub fn mock(classifier: CategoryClassifier) -> Self {
        Self {
            backend: None,
            classifier,
        }
    }

    pub fn with_backend(backend: Arc<dyn GenerativeBackend>, classifier: CategoryClassifier) -> Self {
        Self {
            backend: Some(backend),
            classifier,
        }
    }

    pub fn is_live(&self) -> bool {
        self.backend.is_some()
    }

    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    /// Predict amount and category for `description`. Never fails.
    pub async fn predict(&self, description: &str) -> Prediction {
        self.predict_traced(description).await.prediction
    }

    /// Like `predict`, but also reports whether the answer is live, mock, or a fallback.
    pub async fn predict_traced(&self, description: &str) -> PredictionOutcome {
        let Some(backend) = &self.backend else {
            return PredictionOutcome {
                prediction: mock_for(description),
                source: PredictionSource::Mock,
            };
        };

        let prompt = prompts::predict_expense(description);
        let parsed = match backend.generate(&prompt).await {
            Ok(text) => parsing::parse_prediction(&text, description),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(prediction) => PredictionOutcome {
                prediction,
                source: PredictionSource::Live,
            },
            Err(e) => {
                warn!(error = %e, "live prediction failed; falling back to mock");
                PredictionOutcome {
                    prediction: mock_for(description),
                    source: PredictionSource::Fallback(e),
                }
            }
        }
    }

    /// Category only. Falls back to the keyword rules.
    pub async fn categorize(&self, description: &str) -> Category {
        let Some(backend) = &self.backend else {
            return self.classifier.classify(description);
        };

        let prompt = prompts::categorize_expense(description);
        let parsed = match backend.generate(&prompt).await {
            Ok(text) => parsing::parse_category(&text),
            Err(e) => Err(e),
        };

        parsed.unwrap_or_else(|e| {
            warn!(error = %e, "live categorize failed; using keyword rules");
            self.classifier.classify(description)
        })
    }

    /// Three likely expenses given recent history. Falls back to a fixed list.
    pub async fn suggest(&self, recent: &[ExpenseRecord]) -> Vec<Prediction> {
        let Some(backend) = &self.backend else {
            return mock::fallback_suggestions();
        };

        let prompt = prompts::smart_suggestions(recent);
        let parsed = match backend.generate(&prompt).await {
            Ok(text) => parsing::parse_suggestions(&text),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(s) if !s.is_empty() => s,
            Ok(_) => mock::fallback_suggestions(),
            Err(e) => {
                warn!(error = %e, "live suggestions failed; using defaults");
                mock::fallback_suggestions()
            }
        }
    }
}

fn mock_for(description: &str) -> Prediction {
    mock::mock_prediction(description, &mut rand::thread_rng())
}
