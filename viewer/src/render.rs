use crate::charts::constants::{ERROR_TITLE, NO_DATA_TITLE};
use crate::charts::{build_traces, ChartSink, Layout};
use crate::panes::{format_metrics, format_raw};
use crate::view::ViewState;
use anyhow::Result;
use common::PredictionResponse;
use log::info;

/// Fills both text panes and draws the chart for a successful response.
pub fn render_payload<S: ChartSink>(
    view: &mut ViewState<S>,
    response: &PredictionResponse,
) -> Result<()> {
    let payload = &response.payload;

    view.metrics = format_metrics(payload);
    view.payload = format_raw(&response.raw);

    let traces = build_traces(payload);
    if traces.is_empty() {
        info!("No candles for {}, showing placeholder", payload.ticker);
        return view.chart.clear(NO_DATA_TITLE);
    }

    info!(
        "Rendering {} traces for {} ({} history, {} predicted, {} signals)",
        traces.len(),
        payload.ticker,
        payload.history.len(),
        payload.predictions.len(),
        payload.signals.len()
    );
    view.chart.render(&traces, &Layout::candles())
}

/// Replaces everything with the error text and an "Error" placeholder chart.
pub fn show_error<S: ChartSink>(view: &mut ViewState<S>, message: &str) -> Result<()> {
    view.metrics = message.to_string();
    view.payload.clear();
    view.chart.clear(ERROR_TITLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartState, MemorySink, Trace};
    use common::ViewerConfig;
    use serde_json::json;

    fn view() -> ViewState<MemorySink> {
        ViewState::new(&ViewerConfig::default(), MemorySink::default())
    }

    #[test]
    fn test_render_full_payload() {
        let mut view = view();
        let response = PredictionResponse::from_value(json!({
            "ticker": "AAPL",
            "model": "xgb",
            "metrics": {"rmse": 0.5},
            "history": [{"date": "2024-01-02", "open": 1, "high": 2, "low": 0.5, "close": 1.5}],
            "signals": [{"date": "2024-01-02", "side": "buy", "price": 1.5}]
        }));

        render_payload(&mut view, &response).unwrap();

        assert_eq!(view.metrics, "Ticker: AAPL\nModel: xgb\n\nrmse: 0.5000");
        assert!(view.payload.starts_with("{\n  \"ticker\": \"AAPL\""));

        let ChartState::Plotted(figure) = &view.chart.state else {
            panic!("expected a plotted chart");
        };
        assert_eq!(figure.layout, Layout::candles());
        assert!(matches!(figure.data[0], Trace::Candlestick(_)));
        assert!(matches!(figure.data[1], Trace::Scatter(_)));
    }

    #[test]
    fn test_render_without_candles_shows_no_data() {
        let mut view = view();
        let response = PredictionResponse::from_value(json!({"ticker": "ZZZZ", "history": []}));

        render_payload(&mut view, &response).unwrap();

        assert_eq!(view.chart.placeholder_title(), Some("No data"));
        assert!(view.chart.traces().is_empty());
        assert!(view.metrics.starts_with("Ticker: ZZZZ"));
    }

    #[test]
    fn test_show_error_clears_everything() {
        let mut view = view();
        view.payload = "{}".to_string();

        show_error(&mut view, "Backend error: 502 bad gateway").unwrap();

        assert_eq!(view.metrics, "Backend error: 502 bad gateway");
        assert!(view.payload.is_empty());
        assert_eq!(view.chart.placeholder_title(), Some("Error"));
    }
}
