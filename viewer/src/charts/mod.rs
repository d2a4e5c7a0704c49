pub mod constants;
pub mod helpers;
pub mod html;
pub mod layout;
pub mod png;
pub mod sink;
pub mod traces;

pub use html::HtmlSink;
pub use layout::{Figure, Layout, PlotConfig};
pub use png::PngSink;
pub use sink::{ChartSink, ChartState, MemorySink};
pub use traces::{build_traces, Trace};
