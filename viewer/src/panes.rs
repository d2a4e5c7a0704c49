use common::PredictionPayload;
use serde_json::Value;

/// Metrics pane text: ticker and model, a blank line, then one line per metric
/// in the order the API sent them.
pub fn format_metrics(payload: &PredictionPayload) -> String {
    let mut lines = vec![
        format!("Ticker: {}", payload.ticker),
        format!("Model: {}", payload.model),
        String::new(),
    ];

    lines.extend(
        payload
            .metrics
            .iter()
            .map(|(key, value)| format!("{key}: {}", format_metric_value(value))),
    );

    lines.join("\n")
}

pub fn format_metric_value(value: &Value) -> String {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(number) => format!("{number:.4}"),
            None => number.to_string(),
        },
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Raw pane text: the payload exactly as received, indented by two spaces.
pub fn format_raw(raw: &Value) -> String {
    serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string())
}
