//! Debounced prediction-on-type.
//!
//! Latest wins: each request aborts whatever the previous one was doing
//! (waiting out the debounce or awaiting the backend), so only the newest
//! request can ever produce an event.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::prediction::Prediction;
use crate::service::PredictionService;

/// Descriptions of this many characters or fewer are not sent.
pub const MIN_PREDICT_CHARS: usize = 3;

#[derive(Debug, Clone)]
pub struct PredictRequest {
    pub request_id: u64,
    pub description: String,
}

#[derive(Debug, Clone)]
pub enum PredictionEvent {
    Ready {
        request_id: u64,
        prediction: Prediction,
        /// Whether the form fields should be filled from this prediction
        autofill: bool,
    },
}

pub async fn run_worker(
    service: Arc<PredictionService>,
    debounce: Duration,
    mut rx: mpsc::UnboundedReceiver<PredictRequest>,
    tx: mpsc::UnboundedSender<PredictionEvent>,
) {
    let mut current: Option<tokio::task::JoinHandle<()>> = None;

    while let Some(req) = rx.recv().await {
        // cancel in-flight
        if let Some(h) = current.take() {
            h.abort();
        }

        if req.description.chars().count() <= MIN_PREDICT_CHARS {
            debug!(request_id = req.request_id, "description too short; skipped");
            continue;
        }

        let service = service.clone();
        let tx = tx.clone();
        current = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let prediction = service.predict(&req.description).await;
            let autofill = prediction.should_autofill();
            let _ = tx.send(PredictionEvent::Ready {
                request_id: req.request_id,
                prediction,
                autofill,
            });
        }));
    }
}
