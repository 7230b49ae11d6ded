//! LED matrix painter
//!
//! Fills the whole matrix with the color of the current trend. While the
//! alert is on, the matrix shows all-white instead; clearing the alert
//! restores the trend pattern.

use crate::color::{Rgb, WHITE, scale_color, trend_color};
use crate::error::RenderError;
use crate::state::Trend;
use crate::{LedMatrix, OutputDriver};

/// Default matrix brightness (about 20%).
pub const DEFAULT_MATRIX_BRIGHTNESS: u8 = 50;

/// [`LedMatrix`] implementation on top of an [`OutputDriver`]
pub struct MatrixPainter<O: OutputDriver, const LEDS: usize> {
    output: O,
    frame: [Rgb; LEDS],
    brightness: u8,
    trend: Trend,
    alert: bool,
}

impl<O: OutputDriver, const LEDS: usize> MatrixPainter<O, LEDS> {
    pub fn new(output: O) -> Self {
        Self::with_brightness(output, DEFAULT_MATRIX_BRIGHTNESS)
    }

    pub fn with_brightness(output: O, brightness: u8) -> Self {
        Self {
            output,
            frame: [Rgb::default(); LEDS],
            brightness,
            trend: Trend::Unknown,
            alert: false,
        }
    }

    /// Last frame handed to the output, including one whose write failed.
    pub fn frame(&self) -> &[Rgb] {
        &self.frame
    }

    /// Whether the alert frame is what the output currently shows.
    pub const fn alert(&self) -> bool {
        self.alert
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    fn paint(&mut self, alert: bool) -> Result<(), RenderError> {
        let color = if alert {
            WHITE
        } else {
            trend_color(self.trend)
        };
        let color = scale_color(color, self.brightness);
        for led in &mut self.frame {
            *led = color;
        }
        self.output.write(&self.frame)
    }
}

impl<O: OutputDriver, const LEDS: usize> LedMatrix for MatrixPainter<O, LEDS> {
    fn set_pattern(&mut self, trend: Trend) -> Result<(), RenderError> {
        self.trend = trend;
        if self.alert {
            // Alert owns the matrix until it clears
            return Ok(());
        }
        self.paint(false)
    }

    fn set_alert(&mut self, on: bool) -> Result<(), RenderError> {
        if self.alert == on {
            return Ok(());
        }
        // Only a frame that reached the output switches the alert
        self.paint(on)?;
        self.alert = on;
        Ok(())
    }
}
