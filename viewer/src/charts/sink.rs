use super::layout::{Figure, Layout};
use super::traces::Trace;
use anyhow::Result;

/// Where rendered charts go. `render` replaces whatever was shown before,
/// `clear` replaces it with an empty chart titled `placeholder_title`.
pub trait ChartSink {
    fn render(&mut self, traces: &[Trace], layout: &Layout) -> Result<()>;

    fn clear(&mut self, placeholder_title: &str) -> Result<()>;
}

impl<S: ChartSink + ?Sized> ChartSink for Box<S> {
    fn render(&mut self, traces: &[Trace], layout: &Layout) -> Result<()> {
        (**self).render(traces, layout)
    }

    fn clear(&mut self, placeholder_title: &str) -> Result<()> {
        (**self).clear(placeholder_title)
    }
}

/// Fan out to several sinks, stopping at the first failure.
impl<S: ChartSink> ChartSink for Vec<S> {
    fn render(&mut self, traces: &[Trace], layout: &Layout) -> Result<()> {
        self.iter_mut()
            .try_for_each(|sink| sink.render(traces, layout))
    }

    fn clear(&mut self, placeholder_title: &str) -> Result<()> {
        self.iter_mut()
            .try_for_each(|sink| sink.clear(placeholder_title))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChartState {
    #[default]
    Empty,
    Placeholder(String),
    Plotted(Figure),
}

/// Keeps the last chart in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub state: ChartState,
}

impl MemorySink {
    pub fn traces(&self) -> &[Trace] {
        match &self.state {
            ChartState::Plotted(figure) => &figure.data,
            _ => &[],
        }
    }

    pub fn placeholder_title(&self) -> Option<&str> {
        match &self.state {
            ChartState::Placeholder(title) => Some(title),
            _ => None,
        }
    }
}

impl ChartSink for MemorySink {
    fn render(&mut self, traces: &[Trace], layout: &Layout) -> Result<()> {
        self.state = ChartState::Plotted(Figure::new(traces, layout));
        Ok(())
    }

    fn clear(&mut self, placeholder_title: &str) -> Result<()> {
        self.state = ChartState::Placeholder(placeholder_title.to_string());
        Ok(())
    }
}
