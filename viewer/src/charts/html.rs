use super::layout::{Figure, Layout};
use super::sink::ChartSink;
use super::traces::Trace;
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Writes a standalone page that draws the figure with plotly.js.
pub struct HtmlSink {
    path: PathBuf,
}

impl HtmlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HtmlSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, figure: &Figure) -> Result<()> {
        let page = figure_page(figure)?;
        std::fs::write(&self.path, page)
            .with_context(|| format!("Failed to write chart to {}", self.path.display()))?;
        info!("Chart written to {}", self.path.display());
        Ok(())
    }
}

pub fn figure_page(figure: &Figure) -> Result<String> {
    // `</script>` inside a string would end the script block early
    let figure_json = serde_json::to_string(figure)
        .context("Failed to serialize figure")?
        .replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Stock prediction</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="chart"></div>
<script>
const figure = {figure_json};
Plotly.newPlot("chart", figure.data, figure.layout, figure.config);
</script>
</body>
</html>
"#
    ))
}

impl ChartSink for HtmlSink {
    fn render(&mut self, traces: &[Trace], layout: &Layout) -> Result<()> {
        self.write(&Figure::new(traces, layout))
    }

    fn clear(&mut self, placeholder_title: &str) -> Result<()> {
        self.write(&Figure::placeholder(placeholder_title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::traces::build_traces;
    use common::PredictionPayload;
    use serde_json::json;

    #[test]
    fn test_render_writes_plotly_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.html");
        let mut sink = HtmlSink::new(&path);

        let payload = PredictionPayload::from_value(&json!({
            "history": [{"date": "2024-01-02", "open": 1, "high": 2, "low": 0.5, "close": 1.5}]
        }));
        sink.render(&build_traces(&payload), &Layout::candles())
            .unwrap();

        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.contains(PLOTLY_CDN));
        assert!(page.contains(r#""type":"candlestick""#));
        assert!(page.contains(r#"Plotly.newPlot("chart""#));
    }

    #[test]
    fn test_clear_writes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = HtmlSink::new(dir.path().join("chart.html"));

        sink.clear("Error").unwrap();

        let page = std::fs::read_to_string(sink.path()).unwrap();
        assert!(page.contains(r#""layout":{"title":"Error"}"#));
        assert!(page.contains(r#""data":[]"#));
    }

    #[test]
    fn test_script_close_tag_is_escaped() {
        let page = figure_page(&Figure::placeholder("</script><b>")).unwrap();
        assert!(!page.contains("</script><b>"));
        assert!(page.contains(r#"<\/script><b>"#));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = HtmlSink::new(dir.path().join("missing").join("chart.html"));
        assert!(sink.clear("No data").is_err());
    }
}
