#![no_std]

pub mod channel;
pub mod color;
pub mod display;
pub mod error;
pub mod executor;
pub mod flags;
pub mod matrix;
pub mod policy;
pub mod report;
pub mod state;
pub mod task;
pub mod timer;
pub mod timing;
pub mod trend;

pub use channel::{ReportChannel, ReportReceiver, ReportSender, TryReceiveError};
pub use display::{StatusView, TextDisplay};
pub use error::{AcquisitionError, RenderError};
pub use executor::{Executor, ExecutorConfig, Peripherals};
pub use flags::{ReadyFlags, on_timer};
pub use matrix::MatrixPainter;
pub use policy::{ChainedPolicy, IndependentPolicy, Policy, PolicyKind, SchedulingPolicy};
pub use report::DiagnosticsReport;
pub use state::{Analysis, CycleState, FaultCounters, SharedSample, Trend};
pub use task::{PRIORITY_ORDER, TaskId};
pub use timer::{PeriodicTimer, TaskPeriods, TimerBank};
pub use timing::{Clock, SystemClock, TaskTiming, TimingRecorder};
pub use trend::DeltaClassifier;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Source of averaged sensor readings
///
/// May block briefly while a conversion completes.
pub trait SensorSource {
    fn acquire_average(&mut self) -> Result<f32, AcquisitionError>;
}

/// Classifies the latest sample into a [`Trend`]
///
/// Implementations may keep their own sample history.
pub trait TrendClassifier {
    fn classify(&mut self, current: f32) -> Trend;
}

/// Status display showing value and trend
pub trait StatusDisplay {
    fn render(&mut self, value: f32, trend: Trend) -> Result<(), RenderError>;
}

/// Addressable LED matrix
pub trait LedMatrix {
    /// Show the color pattern of a trend
    fn set_pattern(&mut self, trend: Trend) -> Result<(), RenderError>;

    /// Switch the binary alert state
    fn set_alert(&mut self, on: bool) -> Result<(), RenderError>;
}

/// Consumer of per-cycle diagnostics reports
pub trait DiagnosticsSink {
    fn emit(&mut self, report: &DiagnosticsReport);
}

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// [`MatrixPainter`] is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED matrix
    fn write(&mut self, colors: &[Rgb]) -> Result<(), RenderError>;
}

/// Character display that shows whole lines
pub trait TextPanel {
    fn draw_lines(&mut self, lines: &[&str]) -> Result<(), RenderError>;
}
