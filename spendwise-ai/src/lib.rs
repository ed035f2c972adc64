//! spendwise-ai: expense prediction with a live generative backend and a mock fallback

pub mod backend;
pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod parsing;
pub mod prediction;
pub mod prompts;
pub mod service;
pub mod worker;

pub use backend::GenerativeBackend;
pub use config::AiSettings;
pub use error::PredictionError;
pub use gemini::GeminiBackend;
pub use prediction::{Prediction, PredictionOutcome, PredictionSource, AUTOFILL_THRESHOLD};
pub use service::PredictionService;
pub use worker::{run_worker, PredictRequest, PredictionEvent, MIN_PREDICT_CHARS};
