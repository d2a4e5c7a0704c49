use crate::charts::ChartSink;
use crate::render::{render_payload, show_error};
use crate::view::{ViewState, LOADING_TEXT};
use anyhow::Result;
use common::predictor::PredictorClient;
use common::PredictionResponse;
use log::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The ticker field was blank, nothing was requested.
    Skipped,
    Rendered,
    /// The request failed; the message is what the metrics pane shows.
    Failed(String),
}

/// Ticker to request: the field falls back to the default when empty, then
/// is trimmed and upper-cased. Whitespace only means there is nothing to do.
pub fn read_ticker<S>(view: &ViewState<S>) -> Option<String> {
    let input = if view.ticker_input.is_empty() {
        &view.default_ticker
    } else {
        &view.ticker_input
    };

    let ticker = input.trim().to_uppercase();
    (!ticker.is_empty()).then_some(ticker)
}

pub fn read_model<S>(view: &ViewState<S>) -> String {
    view.models
        .selected()
        .unwrap_or(view.default_model.as_str())
        .to_string()
}

/// A prediction that has been started and is waiting for its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticker: String,
    pub model: String,
}

/// Reads the inputs and puts the view in its loading state: metrics show
/// the loading text, the raw pane is cleared and the trigger is busy.
/// `None` when the ticker is blank, in which case nothing is touched.
pub fn begin<S>(view: &mut ViewState<S>) -> Option<PendingRequest> {
    let Some(ticker) = read_ticker(view) else {
        debug!("Blank ticker, skipping prediction");
        return None;
    };
    let model = read_model(view);

    view.metrics = LOADING_TEXT.to_string();
    view.payload.clear();
    view.trigger.set_busy();

    Some(PendingRequest { ticker, model })
}

/// Restores the trigger, then renders the response or shows the error.
pub fn finish<S: ChartSink>(
    view: &mut ViewState<S>,
    pending: &PendingRequest,
    result: common::Result<PredictionResponse>,
) -> Result<DispatchOutcome> {
    view.trigger.restore();

    match result {
        Ok(response) => {
            render_payload(view, &response)?;
            Ok(DispatchOutcome::Rendered)
        }
        Err(err) => {
            let message = err.to_string();
            error!(
                "Prediction for {} with {} failed: {message}",
                pending.ticker, pending.model
            );
            show_error(view, &message)?;
            Ok(DispatchOutcome::Failed(message))
        }
    }
}

/// Runs one prediction: request, then render or show the error.
///
/// Request failures are reported through [`DispatchOutcome::Failed`]; the
/// returned `Err` is reserved for the chart sink failing to draw.
pub async fn dispatch<S: ChartSink>(
    view: &mut ViewState<S>,
    client: &PredictorClient,
) -> Result<DispatchOutcome> {
    let Some(pending) = begin(view) else {
        return Ok(DispatchOutcome::Skipped);
    };

    let result = client.predict(&pending.ticker, &pending.model).await;
    finish(view, &pending, result)
}
