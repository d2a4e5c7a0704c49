use super::constants::*;
use common::{NextSignal, OhlcBar, PredictionPayload, Side, Signal};
use serde::Serialize;
use strum::Display;

/// One plotly series. Serializes to the JSON plotly.js expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Candlestick(CandlestickTrace),
    Scatter(MarkerTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickTrace {
    pub name: String,
    pub x: Vec<Option<String>>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increasing: Option<CandleDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decreasing: Option<CandleDirection>,
    #[serde(skip)]
    pub predicted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleDirection {
    pub line: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NamedColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerTrace {
    pub name: String,
    pub mode: &'static str,
    pub x: Vec<Option<String>>,
    pub y: Vec<Option<f64>>,
    pub marker: Marker,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub symbol: MarkerSymbol,
    pub size: u32,
    pub color: NamedColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    TriangleUp,
    TriangleDown,
}

impl CandlestickTrace {
    fn from_bars(name: &str, bars: &[OhlcBar]) -> Self {
        CandlestickTrace {
            name: name.to_string(),
            x: bars.iter().map(|bar| bar.date.clone()).collect(),
            open: bars.iter().map(|bar| bar.open).collect(),
            high: bars.iter().map(|bar| bar.high).collect(),
            low: bars.iter().map(|bar| bar.low).collect(),
            close: bars.iter().map(|bar| bar.close).collect(),
            increasing: None,
            decreasing: None,
            predicted: false,
        }
    }

    fn predicted(bars: &[OhlcBar]) -> Self {
        let heavy = || CandleDirection {
            line: LineStyle {
                width: PREDICTED_LINE_WIDTH,
                color: None,
            },
        };

        CandlestickTrace {
            increasing: Some(heavy()),
            decreasing: Some(heavy()),
            predicted: true,
            ..Self::from_bars(&format!("Predicted (next {})", bars.len()), bars)
        }
    }
}

impl MarkerTrace {
    /// Points as `(date, price)` pairs, gaps included.
    pub fn points(&self) -> impl Iterator<Item = (Option<&str>, Option<f64>)> {
        self.x
            .iter()
            .map(|date| date.as_deref())
            .zip(self.y.iter().copied())
    }
}

fn hover_template(label: &str) -> String {
    format!("{label}<br>%{{x}}<br>%{{y}}<extra></extra>")
}

fn signal_markers(side: Side, signals: &[&Signal]) -> MarkerTrace {
    let (name, symbol, color) = match side {
        Side::Buy => (BUY_NAME, MarkerSymbol::TriangleUp, NamedColor::Green),
        Side::Sell => (SELL_NAME, MarkerSymbol::TriangleDown, NamedColor::Red),
    };

    MarkerTrace {
        name: name.to_string(),
        mode: "markers",
        x: signals.iter().map(|signal| signal.date.clone()).collect(),
        y: signals.iter().map(|signal| signal.price).collect(),
        marker: Marker {
            symbol,
            size: SIGNAL_MARKER_SIZE,
            color,
            line: None,
        },
        hovertemplate: hover_template(name),
    }
}

/// Hover text for the next-day marker, e.g. `Predicted BUY<br>Confidence: 83.7%`.
pub fn next_signal_label(next: &NextSignal) -> String {
    let side = if next.is_buy() { "BUY" } else { "SELL" };
    match next.prob {
        Some(prob) => format!("Predicted {side}<br>Confidence: {:.1}%", prob * 100.0),
        None => format!("Predicted {side}"),
    }
}

fn next_signal_marker(next: &NextSignal) -> MarkerTrace {
    let (symbol, color) = if next.is_buy() {
        (MarkerSymbol::TriangleUp, NamedColor::LimeGreen)
    } else {
        (MarkerSymbol::TriangleDown, NamedColor::Red)
    };

    MarkerTrace {
        name: NEXT_SIGNAL_NAME.to_string(),
        mode: "markers",
        x: vec![next.date.clone()],
        y: vec![next.price],
        marker: Marker {
            symbol,
            size: NEXT_SIGNAL_MARKER_SIZE,
            color,
            line: Some(LineStyle {
                width: NEXT_SIGNAL_OUTLINE_WIDTH,
                color: Some(NamedColor::Black),
            }),
        },
        hovertemplate: hover_template(&next_signal_label(next)),
    }
}

/// Builds every trace for a payload. Empty when there are no candles at all,
/// in which case the caller shows the "No data" placeholder instead.
pub fn build_traces(payload: &PredictionPayload) -> Vec<Trace> {
    if !payload.has_candles() {
        return Vec::new();
    }

    let mut traces = vec![Trace::Candlestick(CandlestickTrace::from_bars(
        HISTORY_NAME,
        &payload.history,
    ))];

    if !payload.predictions.is_empty() {
        traces.push(Trace::Candlestick(CandlestickTrace::predicted(
            &payload.predictions,
        )));
    }

    let buys: Vec<&Signal> = payload
        .signals
        .iter()
        .filter(|signal| signal.side() == Some(Side::Buy))
        .collect();
    let sells: Vec<&Signal> = payload
        .signals
        .iter()
        .filter(|signal| signal.side() == Some(Side::Sell))
        .collect();

    if !buys.is_empty() {
        traces.push(Trace::Scatter(signal_markers(Side::Buy, &buys)));
    }
    if !sells.is_empty() {
        traces.push(Trace::Scatter(signal_markers(Side::Sell, &sells)));
    }

    if let Some(next) = &payload.next_signal {
        traces.push(Trace::Scatter(next_signal_marker(next)));
    }

    traces
}
