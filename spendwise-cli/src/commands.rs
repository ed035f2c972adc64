use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use spendwise_ai::{run_worker, PredictRequest, PredictionEvent, PredictionService};
use spendwise_core::{Category, ExpenseRecord};

use crate::state;

/// Record an expense in the ledger at `ledger_path`.
///
/// Without an explicit category the service decides: the model when live,
/// the keyword rules otherwise.
pub async fn add_expense(
    ledger_path: &Path,
    service: &PredictionService,
    description: String,
    amount: f64,
    category: Option<&str>,
) -> Result<ExpenseRecord> {
    let category = match category {
        Some(c) => c.parse::<Category>()?,
        None => service.categorize(&description).await,
    };
    let record = ExpenseRecord::new(description, amount, category)?;

    let mut ledger = state::load_ledger(ledger_path)?;
    ledger.add(record.clone());
    state::save_ledger(ledger_path, &ledger)?;
    Ok(record)
}

fn event_line(ev: &PredictionEvent) -> String {
    let PredictionEvent::Ready {
        request_id,
        prediction,
        autofill,
    } = ev;
    format!(
        "#{request_id} {} -> ${:.2} {} (confidence={:.2}, autofill={})",
        prediction.description,
        prediction.amount,
        prediction.category,
        prediction.confidence,
        if *autofill { "yes" } else { "no" }
    )
}

/// Feed each input line to the prediction worker as an edit of the same
/// description and write one line per prediction that survives the debounce.
/// Returns `out` once the input ends and the last prediction is written.
pub async fn watch<R, W>(
    service: Arc<PredictionService>,
    debounce: Duration,
    input: R,
    mut out: W,
) -> Result<W>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();

    let worker = tokio::spawn(run_worker(service, debounce, req_rx, ev_tx));
    let printer = tokio::spawn(async move {
        while let Some(ev) = ev_rx.recv().await {
            writeln!(out, "{}", event_line(&ev))?;
            out.flush()?;
        }
        Ok::<W, std::io::Error>(out)
    });

    let mut lines = input.lines();
    let mut request_id = 0u64;
    while let Some(line) = lines.next_line().await? {
        request_id += 1;
        req_tx.send(PredictRequest {
            request_id,
            description: line.trim().to_string(),
        })?;
    }
    drop(req_tx);

    worker.await?;
    Ok(printer.await??)
}
