pub use plotters::prelude::RGBColor;
use serde::Serialize;
use strum::Display;

// Trace names
pub const HISTORY_NAME: &str = "History";
pub const BUY_NAME: &str = "Buy";
pub const SELL_NAME: &str = "Sell";
pub const NEXT_SIGNAL_NAME: &str = "Next-Day Signal";

// Placeholders
pub const NO_DATA_TITLE: &str = "No data";
pub const ERROR_TITLE: &str = "Error";

// Markers
pub const SIGNAL_MARKER_SIZE: u32 = 10;
pub const NEXT_SIGNAL_MARKER_SIZE: u32 = 14;
pub const NEXT_SIGNAL_OUTLINE_WIDTH: f64 = 1.0;
pub const PREDICTED_LINE_WIDTH: f64 = 1.5;

/// Named colors understood by plotly, with their raster equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Green,
    LimeGreen,
    Red,
    Black,
}

impl NamedColor {
    pub fn rgb(self) -> RGBColor {
        match self {
            NamedColor::Green => RGBColor(0, 128, 0),
            NamedColor::LimeGreen => RGBColor(50, 205, 50),
            NamedColor::Red => RGBColor(255, 0, 0),
            NamedColor::Black => RGBColor(0, 0, 0),
        }
    }
}

// Raster palette
pub const B_RED: RGBColor = RGBColor(245, 71, 95);
pub const B_GREEN: RGBColor = RGBColor(17, 203, 129);
pub const B_GREEN_DIM: RGBColor = RGBColor(17 / 2, 203 / 2, 129 / 2);
pub const B_RED_DIM: RGBColor = RGBColor(245 / 2, 71 / 2, 95 / 2);
pub const B_BLACK: RGBColor = RGBColor(22, 26, 30);
pub const OUTLINE_WHITE: RGBColor = RGBColor(255, 255, 255);
