use crate::lenient;
use serde::{Deserialize, Serialize};

/// Bar as it arrives on the wire. The API is not consistent about the name
/// of the date key, so all known spellings are accepted.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawBar {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub datetime: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub open: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub high: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub low: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub close: Option<f64>,
}

/// Resolved OHLC bar. Missing values stay `None` and show up as gaps.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct OhlcBar {
    pub date: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl From<RawBar> for OhlcBar {
    fn from(bar: RawBar) -> Self {
        OhlcBar {
            date: non_empty(bar.date)
                .or_else(|| non_empty(bar.datetime))
                .or_else(|| non_empty(bar.time)),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
        }
    }
}

impl OhlcBar {
    pub fn new(date: &str, open: f64, high: f64, low: f64, close: f64) -> Self {
        OhlcBar {
            date: Some(date.to_string()),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!((self.open, self.close), (Some(open), Some(close)) if close >= open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> OhlcBar {
        serde_json::from_value::<RawBar>(value).unwrap().into()
    }

    #[test]
    fn test_date_key_fallbacks() {
        let bar = decode(json!({"datetime": "2024-01-02 09:30:00", "time": "ignored"}));
        assert_eq!(bar.date.as_deref(), Some("2024-01-02 09:30:00"));

        let bar = decode(json!({"time": 1704153600000i64}));
        assert_eq!(bar.date.as_deref(), Some("1704153600000"));

        let bar = decode(json!({"date": "2024-01-02", "datetime": "2024-01-03"}));
        assert_eq!(bar.date.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_empty_date_falls_through() {
        let bar = decode(json!({"date": "", "datetime": "2024-01-02 09:30:00"}));
        assert_eq!(bar.date.as_deref(), Some("2024-01-02 09:30:00"));

        let bar = decode(json!({"date": "", "datetime": "", "time": "2024-01-02"}));
        assert_eq!(bar.date.as_deref(), Some("2024-01-02"));

        let bar = decode(json!({"date": ""}));
        assert!(bar.date.is_none());
    }

    #[test]
    fn test_string_prices_are_parsed() {
        let bar = decode(json!({
            "date": "2024-01-02",
            "open": "185.1",
            "high": 186.5,
            "low": "184.0",
            "close": 186
        }));
        assert_eq!(bar, OhlcBar::new("2024-01-02", 185.1, 186.5, 184.0, 186.0));
        assert!(bar.is_bullish());
    }

    #[test]
    fn test_missing_values_are_gaps() {
        let bar = decode(json!({"date": "2024-01-02", "open": null, "close": 10.0}));
        assert!(bar.open.is_none());
        assert!(bar.high.is_none());
        assert_eq!(bar.close, Some(10.0));
        assert!(!bar.is_bullish());
    }
}
