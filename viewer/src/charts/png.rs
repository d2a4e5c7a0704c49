use super::constants::*;
use super::helpers::{padded_range, parse_bar_time};
use super::layout::Layout;
use super::sink::ChartSink;
use super::traces::{CandlestickTrace, MarkerSymbol, MarkerTrace, Trace};
use anyhow::{anyhow, Context, Result};
use image::{codecs::png::PngEncoder, ImageBuffer, ImageEncoder, ImageError, Pixel, Rgb};
use log::info;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Deref;
use std::path::{Path, PathBuf};

const DEFAULT_WIDTH: u32 = 1024;
const DEFAULT_HEIGHT: u32 = 768;
const CHART_MARGIN: u32 = 40;
const ONE_DAY_SECS: f64 = 86_400.0;

pub fn encode_png<P, Container>(img: &ImageBuffer<P, Container>) -> Result<Vec<u8>, ImageError>
where
    P: Pixel<Subpixel = u8> + image::PixelWithColorType + 'static,
    Container: Deref<Target = [P::Subpixel]>,
{
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(img, img.width(), img.height(), P::COLOR_TYPE)?;
    Ok(buf)
}

/// Rasterizes candles and markers into a PNG file. Text is not drawn, so
/// placeholders come out as a blank canvas.
pub struct PngSink {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PngSink {
            path: path.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, traces: &[Trace]) -> Result<()> {
        let png = draw_png(traces, self.width, self.height)?;
        std::fs::write(&self.path, png)
            .with_context(|| format!("Failed to write chart to {}", self.path.display()))?;
        info!("Chart written to {}", self.path.display());
        Ok(())
    }
}

impl ChartSink for PngSink {
    fn render(&mut self, traces: &[Trace], _layout: &Layout) -> Result<()> {
        self.write(traces)
    }

    fn clear(&mut self, placeholder_title: &str) -> Result<()> {
        info!("Clearing PNG chart: {placeholder_title}");
        self.write(&[])
    }
}

/// Data extent over every drawable point, in (epoch seconds, price).
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotBounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl PlotBounds {
    fn from_traces(traces: &[Trace]) -> Option<Self> {
        let mut bounds: Option<PlotBounds> = None;
        let mut extend = |x: f64, y: f64| {
            let b = bounds.get_or_insert(PlotBounds {
                min_x: x,
                max_x: x,
                min_y: y,
                max_y: y,
            });
            b.min_x = b.min_x.min(x);
            b.max_x = b.max_x.max(x);
            b.min_y = b.min_y.min(y);
            b.max_y = b.max_y.max(y);
        };

        for trace in traces {
            match trace {
                Trace::Candlestick(candles) => {
                    for (x, _, high, low, _) in candle_points(candles) {
                        extend(x, high);
                        extend(x, low);
                    }
                }
                Trace::Scatter(markers) => {
                    for (x, y) in marker_points(markers) {
                        extend(x, y);
                    }
                }
            }
        }

        bounds
    }
}

/// Candles with a parseable date and all four prices.
fn candle_points(candles: &CandlestickTrace) -> Vec<(f64, f64, f64, f64, f64)> {
    (0..candles.x.len())
        .filter_map(|i| {
            let x = parse_bar_time(candles.x[i].as_deref()?)? as f64;
            Some((
                x,
                candles.open.get(i).copied().flatten()?,
                candles.high.get(i).copied().flatten()?,
                candles.low.get(i).copied().flatten()?,
                candles.close.get(i).copied().flatten()?,
            ))
        })
        .collect()
}

fn marker_points(markers: &MarkerTrace) -> Vec<(f64, f64)> {
    markers
        .points()
        .filter_map(|(date, price)| Some((parse_bar_time(date?)? as f64, price?)))
        .collect()
}

/// Triangle outline in pixel offsets around the marker position.
fn triangle(symbol: MarkerSymbol, size: u32) -> Vec<(i32, i32)> {
    let half = (size / 2).max(1) as i32;
    match symbol {
        MarkerSymbol::TriangleUp => vec![(0, -half), (-half, half), (half, half)],
        MarkerSymbol::TriangleDown => vec![(0, half), (-half, -half), (half, -half)],
    }
}

fn draw_png(traces: &[Trace], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut buffer = vec![0; (width * height * 3) as usize];

    draw_traces(&mut buffer, traces, width, height)
        .map_err(|error| anyhow!("Failed to draw chart: {error}"))?;

    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, buffer)
        .ok_or_else(|| anyhow!("Chart buffer does not match {width}x{height}"))?;

    Ok(encode_png(&img)?)
}

fn draw_traces(
    buffer: &mut [u8],
    traces: &[Trace],
    width: u32,
    height: u32,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
    root.fill(&B_BLACK)?;

    let Some(bounds) = PlotBounds::from_traces(traces) else {
        root.present()?;
        return Ok(());
    };

    let (min_x, max_x) = padded_range(bounds.min_x, bounds.max_x, 0.02, ONE_DAY_SECS);
    let (min_y, max_y) = padded_range(bounds.min_y, bounds.max_y, 0.05, 1.0);

    let mut chart = ChartBuilder::on(&root)
        .margin(CHART_MARGIN)
        .build_cartesian_2d(min_x..max_x, min_y..max_y)?;

    let total_candles: usize = traces
        .iter()
        .map(|trace| match trace {
            Trace::Candlestick(candles) => candles.x.len(),
            Trace::Scatter(_) => 0,
        })
        .sum();
    let plot_width = width.saturating_sub(2 * CHART_MARGIN);
    let candle_width = (plot_width / total_candles.max(1) as u32).clamp(1, 12);

    for trace in traces {
        match trace {
            Trace::Candlestick(candles) => {
                let (gain, loss) = if candles.predicted {
                    (B_GREEN_DIM, B_RED_DIM)
                } else {
                    (B_GREEN, B_RED)
                };
                chart.draw_series(candle_points(candles).into_iter().map(
                    |(x, open, high, low, close)| {
                        CandleStick::new(
                            x,
                            open,
                            high,
                            low,
                            close,
                            gain.filled(),
                            loss.filled(),
                            candle_width,
                        )
                    },
                ))?;
            }
            Trace::Scatter(markers) => {
                let shape = triangle(markers.marker.symbol, markers.marker.size);
                let fill = markers.marker.color.rgb().filled();

                chart.draw_series(marker_points(markers).into_iter().map(|point| {
                    EmptyElement::at(point) + Polygon::new(shape.clone(), fill)
                }))?;

                if markers.marker.line.is_some() {
                    // Black outlines vanish on the dark canvas
                    let mut outline = shape.clone();
                    outline.push(shape[0]);
                    chart.draw_series(marker_points(markers).into_iter().map(|point| {
                        EmptyElement::at(point)
                            + PathElement::new(outline.clone(), OUTLINE_WHITE.stroke_width(1))
                    }))?;
                }
            }
        }
    }

    root.present()?;
    Ok(())
}
