//! Per-cycle diagnostics report
//!
//! One line per completed cycle:
//!
//! ```text
//! Temperature: 23.50 °C | T1: 0.0000120s | T2: 0.0001830s | T3: 0.0000040s | T4: 0.0000610s | Trend: stable
//! ```
//!
//! T1 is acquisition, T2 the status display, T3 trend analysis and T4 the
//! LED matrix. Slots that were never measured print `--`.

use core::fmt::{self, Write};

use embassy_time::Duration;
use heapless::String;

use crate::error::RenderError;
use crate::state::{Analysis, Trend};
use crate::task::TaskId;
use crate::timing::TimingRecorder;

/// Capacity of a formatted report line.
pub const REPORT_LINE_CAPACITY: usize = 160;

/// Tasks reported as T1..T4, in column order.
pub const REPORTED_TASKS: [TaskId; 4] = [
    TaskId::Acquire,
    TaskId::RenderDisplay,
    TaskId::AnalyzeTrend,
    TaskId::RenderMatrix,
];

/// Snapshot taken by the diagnostics task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosticsReport {
    /// Sample the last trend analysis ran on
    pub temperature: Option<f32>,
    pub timings: [Option<Duration>; 4],
    pub trend: Trend,
}

impl DiagnosticsReport {
    /// Build a report from the last analysis and the recorded timings.
    pub fn capture(analysis: Option<Analysis>, timings: &TimingRecorder) -> Self {
        Self {
            temperature: analysis.map(|analysis| analysis.sample.average_value),
            timings: REPORTED_TASKS.map(|task| timings.measurement(task)),
            trend: analysis.map_or(Trend::Unknown, |analysis| analysis.trend),
        }
    }

    /// Format the report into a fixed-capacity line.
    pub fn to_line(&self) -> Result<String<REPORT_LINE_CAPACITY>, RenderError> {
        let mut line = String::new();
        write!(line, "{}", self).map_err(|_| RenderError::Overflow)?;
        Ok(line)
    }
}

#[allow(clippy::cast_precision_loss)]
fn write_seconds(f: &mut fmt::Formatter<'_>, elapsed: Option<Duration>) -> fmt::Result {
    match elapsed {
        Some(elapsed) => write!(f, "{:.7}s", elapsed.as_micros() as f64 / 1e6),
        None => f.write_str("--"),
    }
}

impl fmt::Display for DiagnosticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.temperature {
            Some(value) => write!(f, "Temperature: {:.2} °C", value)?,
            None => f.write_str("Temperature: --")?,
        }
        for (slot, elapsed) in self.timings.iter().enumerate() {
            write!(f, " | T{}: ", slot + 1)?;
            write_seconds(f, *elapsed)?;
        }
        write!(f, " | Trend: {}", self.trend.as_str())
    }
}
