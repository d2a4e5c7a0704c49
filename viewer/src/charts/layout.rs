use super::traces::Trace;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub orientation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub r: u32,
    pub b: u32,
    pub l: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub rangeslider: RangeSlider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

impl Layout {
    /// Candlestick layout: horizontal legend above the plot, no range slider,
    /// drag to zoom.
    pub fn candles() -> Self {
        Layout {
            title: None,
            dragmode: Some("zoom"),
            showlegend: Some(true),
            legend: Some(Legend {
                x: 0.0,
                y: 1.1,
                orientation: "h",
            }),
            margin: Some(Margin {
                t: 40,
                r: 10,
                b: 40,
                l: 50,
            }),
            xaxis: Some(Axis {
                rangeslider: RangeSlider { visible: false },
            }),
        }
    }

    /// Empty chart that only shows a title.
    pub fn placeholder(title: &str) -> Self {
        Layout {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotConfig {
    pub responsive: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig { responsive: true }
    }
}

/// Everything `Plotly.newPlot` needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
    pub config: PlotConfig,
}

impl Figure {
    pub fn new(traces: &[Trace], layout: &Layout) -> Self {
        Figure {
            data: traces.to_vec(),
            layout: layout.clone(),
            config: PlotConfig::default(),
        }
    }

    pub fn placeholder(title: &str) -> Self {
        Figure::new(&[], &Layout::placeholder(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candles_layout_json() {
        let value = serde_json::to_value(Layout::candles()).unwrap();
        assert_eq!(
            value,
            json!({
                "dragmode": "zoom",
                "showlegend": true,
                "legend": {"x": 0.0, "y": 1.1, "orientation": "h"},
                "margin": {"t": 40, "r": 10, "b": 40, "l": 50},
                "xaxis": {"rangeslider": {"visible": false}}
            })
        );
    }

    #[test]
    fn test_placeholder_figure_json() {
        let value = serde_json::to_value(Figure::placeholder("No data")).unwrap();
        assert_eq!(
            value,
            json!({
                "data": [],
                "layout": {"title": "No data"},
                "config": {"responsive": true}
            })
        );
    }
}
