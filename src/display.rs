//! Text view for the status display

use core::fmt::Write;

use heapless::String;

use crate::error::RenderError;
use crate::state::Trend;
use crate::{StatusDisplay, TextPanel};

/// Characters per display line.
pub const DISPLAY_LINE_WIDTH: usize = 24;

/// Formatted two-line status view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub value_line: String<DISPLAY_LINE_WIDTH>,
    pub trend_line: String<DISPLAY_LINE_WIDTH>,
}

impl StatusView {
    pub fn new(value: f32, trend: Trend) -> Result<Self, RenderError> {
        let mut value_line = String::new();
        write!(value_line, "Temp: {:.2} C", value).map_err(|_| RenderError::Overflow)?;

        let mut trend_line = String::new();
        write!(trend_line, "Trend: {}", trend.as_str()).map_err(|_| RenderError::Overflow)?;

        Ok(Self {
            value_line,
            trend_line,
        })
    }

    pub fn lines(&self) -> [&str; 2] {
        [self.value_line.as_str(), self.trend_line.as_str()]
    }
}

/// [`StatusDisplay`] that renders a [`StatusView`] onto a text panel
#[derive(Debug)]
pub struct TextDisplay<P: TextPanel> {
    panel: P,
}

impl<P: TextPanel> TextDisplay<P> {
    pub const fn new(panel: P) -> Self {
        Self { panel }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}

impl<P: TextPanel> StatusDisplay for TextDisplay<P> {
    fn render(&mut self, value: f32, trend: Trend) -> Result<(), RenderError> {
        let view = StatusView::new(value, trend)?;
        self.panel.draw_lines(&view.lines())
    }
}
