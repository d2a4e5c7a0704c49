use crate::lenient;
use crate::prices::{OhlcBar, RawBar};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// Historical (backtested) trade marker.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Signal {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub side: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
}

impl Signal {
    /// `None` for anything other than an exact `"buy"` or `"sell"`.
    pub fn side(&self) -> Option<Side> {
        self.side.as_deref().and_then(|side| Side::from_str(side).ok())
    }
}

/// Forward-looking marker for the next session.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct NextSignal {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub side: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub prob: Option<f64>,
}

impl NextSignal {
    /// Anything that is not an explicit buy is drawn as a sell.
    pub fn is_buy(&self) -> bool {
        self.side.as_deref() == Some("buy")
    }
}

#[derive(Debug, Deserialize, Default)]
struct RawPayload {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    ticker: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    model: Option<String>,
    #[serde(default, deserialize_with = "lenient::map_or_empty")]
    metrics: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    history: Vec<RawBar>,
    #[serde(default, deserialize_with = "lenient::opt_vec")]
    predictions_next5: Option<Vec<RawBar>>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    predictions: Vec<RawBar>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    signals: Vec<Signal>,
    #[serde(default, deserialize_with = "lenient::opt_object")]
    next_signal: Option<NextSignal>,
}

/// Fully resolved prediction payload. Every optional part of the wire
/// format has already been defaulted, so rendering never has to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionPayload {
    pub ticker: String,
    pub model: String,
    pub metrics: Map<String, Value>,
    pub history: Vec<OhlcBar>,
    pub predictions: Vec<OhlcBar>,
    pub signals: Vec<Signal>,
    pub next_signal: Option<NextSignal>,
}

impl RawPayload {
    fn resolve(self) -> PredictionPayload {
        // `predictions_next5` wins whenever the key carries an array, even an empty one.
        let predictions = self.predictions_next5.unwrap_or(self.predictions);

        PredictionPayload {
            ticker: self.ticker.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            metrics: self.metrics,
            history: self.history.into_iter().map(OhlcBar::from).collect(),
            predictions: predictions.into_iter().map(OhlcBar::from).collect(),
            signals: self.signals,
            next_signal: self.next_signal,
        }
    }
}

impl PredictionPayload {
    /// Decodes any JSON value. Bodies that are not objects become an empty payload.
    pub fn from_value(value: &Value) -> Self {
        let raw = match value {
            Value::Object(_) => {
                serde_json::from_value::<RawPayload>(value.clone()).unwrap_or_default()
            }
            _ => RawPayload::default(),
        };
        raw.resolve()
    }

    pub fn has_candles(&self) -> bool {
        !self.history.is_empty() || !self.predictions.is_empty()
    }
}

/// What the API returned: the untouched JSON for display plus the decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResponse {
    pub raw: Value,
    pub payload: PredictionPayload,
}

impl PredictionResponse {
    pub fn from_value(raw: Value) -> Self {
        let payload = PredictionPayload::from_value(&raw);
        PredictionResponse { raw, payload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "ticker": "AAPL",
            "model": "xgb",
            "metrics": {"rmse": 1.23456, "direction_acc": 0.61, "notes": "walk-forward"},
            "history": [
                {"date": "2024-01-02", "open": 185.0, "high": 186.0, "low": 183.5, "close": 185.5},
                {"date": "2024-01-03", "open": 185.5, "high": 187.0, "low": 184.0, "close": 184.2}
            ],
            "predictions": [
                {"date": "2024-01-04", "open": 184.2, "high": 185.0, "low": 183.0, "close": 184.8}
            ],
            "signals": [
                {"date": "2024-01-02", "side": "buy", "price": 185.5},
                {"date": "2024-01-03", "side": "sell", "price": 184.2}
            ],
            "next_signal": {"date": "2024-01-04", "side": "buy", "price": 184.8, "prob": 0.837}
        })
    }

    #[test]
    fn test_decode_full_payload() {
        let payload = PredictionPayload::from_value(&sample());
        assert_eq!(payload.ticker, "AAPL");
        assert_eq!(payload.model, "xgb");
        assert_eq!(payload.history.len(), 2);
        assert_eq!(payload.predictions.len(), 1);
        assert_eq!(payload.signals[0].side(), Some(Side::Buy));
        assert_eq!(payload.signals[1].side(), Some(Side::Sell));

        let next = payload.next_signal.unwrap();
        assert!(next.is_buy());
        assert_eq!(next.prob, Some(0.837));
    }

    #[test]
    fn test_metrics_keep_insertion_order() {
        let payload = PredictionPayload::from_value(&sample());
        let keys: Vec<&str> = payload.metrics.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["rmse", "direction_acc", "notes"]);
    }

    #[test]
    fn test_predictions_next5_takes_precedence() {
        let payload = PredictionPayload::from_value(&json!({
            "predictions": [{"date": "2024-01-04"}],
            "predictions_next5": [{"date": "2024-01-05"}, {"date": "2024-01-08"}]
        }));
        let dates: Vec<_> = payload
            .predictions
            .iter()
            .map(|bar| bar.date.clone().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-01-05", "2024-01-08"]);

        // An explicit empty array still wins
        let payload = PredictionPayload::from_value(&json!({
            "predictions": [{"date": "2024-01-04"}],
            "predictions_next5": []
        }));
        assert!(payload.predictions.is_empty());

        // A non-array alias is ignored
        let payload = PredictionPayload::from_value(&json!({
            "predictions": [{"date": "2024-01-04"}],
            "predictions_next5": null
        }));
        assert_eq!(payload.predictions.len(), 1);
    }

    #[test]
    fn test_malformed_payload_degrades_to_empty() {
        let payload = PredictionPayload::from_value(&json!({
            "ticker": null,
            "metrics": "n/a",
            "history": {"not": "an array"},
            "signals": [1, "two", {"side": "hold"}],
            "next_signal": "soon"
        }));
        assert_eq!(payload.ticker, "");
        assert!(payload.metrics.is_empty());
        assert!(payload.history.is_empty());
        assert_eq!(payload.signals.len(), 1);
        assert_eq!(payload.signals[0].side(), None);
        assert!(payload.next_signal.is_none());
        assert!(!payload.has_candles());
    }

    #[test]
    fn test_non_object_body_is_empty_payload() {
        assert_eq!(
            PredictionPayload::from_value(&json!([1, 2, 3])),
            PredictionPayload::default()
        );
        assert_eq!(
            PredictionPayload::from_value(&Value::Null),
            PredictionPayload::default()
        );
        assert_eq!(
            PredictionPayload::from_value(&json!(["MSFT", "lstm", {"rmse": 1}, []])),
            PredictionPayload::default()
        );
    }

    #[test]
    fn test_array_shaped_entries_are_dropped() {
        let payload = PredictionPayload::from_value(&json!({
            "history": [
                ["2024-01-02", 1.0, 2.0, 0.5, 1.5],
                {"date": "2024-01-03", "open": 1.5, "high": 2.5, "low": 1.0, "close": 2.0}
            ],
            "predictions_next5": [["2024-01-04", 2.0, 2.5, 1.5, 2.2]],
            "signals": [["2024-01-02", "buy", 10.0], {"date": "2024-01-03", "side": "sell", "price": 2.0}]
        }));
        assert_eq!(payload.history.len(), 1);
        assert_eq!(payload.history[0].date.as_deref(), Some("2024-01-03"));
        assert!(payload.predictions.is_empty());
        assert_eq!(payload.signals.len(), 1);
        assert_eq!(payload.signals[0].side(), Some(Side::Sell));
    }

    #[test]
    fn test_side_is_case_sensitive() {
        let signal = Signal {
            side: Some("BUY".to_string()),
            ..Default::default()
        };
        assert_eq!(signal.side(), None);

        let next = NextSignal {
            side: Some("hold".to_string()),
            ..Default::default()
        };
        assert!(!next.is_buy());
    }

    #[test]
    fn test_response_keeps_raw_value() {
        let response = PredictionResponse::from_value(sample());
        assert_eq!(response.raw, sample());
        assert_eq!(response.payload.ticker, "AAPL");
    }
}
