#![allow(dead_code)]

use core::cell::Cell;

use tempcycle::{
    AcquisitionError, Clock, DeltaClassifier, DiagnosticsReport, DiagnosticsSink, Executor,
    ExecutorConfig, Instant, LedMatrix, Peripherals, PolicyKind, ReadyFlags, RenderError,
    SensorSource, StatusDisplay, TaskId, Trend,
};

/// Clock that advances by a fixed step on every read
pub struct ManualClock {
    now_us: Cell<u64>,
    step_us: u64,
}

impl ManualClock {
    pub fn new(step_us: u64) -> Self {
        Self {
            now_us: Cell::new(0),
            step_us,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let now = self.now_us.get();
        self.now_us.set(now + self.step_us);
        Instant::from_micros(now)
    }
}

/// Sensor replaying a script, repeating its last entry
pub struct ScriptedSensor {
    script: Vec<Result<f32, AcquisitionError>>,
    position: usize,
}

impl ScriptedSensor {
    pub fn new(values: &[f32]) -> Self {
        Self::with_script(values.iter().copied().map(Ok).collect())
    }

    pub fn with_script(script: Vec<Result<f32, AcquisitionError>>) -> Self {
        Self {
            script,
            position: 0,
        }
    }
}

impl SensorSource for ScriptedSensor {
    fn acquire_average(&mut self) -> Result<f32, AcquisitionError> {
        let index = self.position.min(self.script.len() - 1);
        self.position += 1;
        self.script[index]
    }
}

/// Sensor that arms another task while it is being sampled
pub struct ArmingSensor<'a> {
    pub flags: &'a ReadyFlags,
    pub task: TaskId,
    pub value: f32,
}

impl SensorSource for ArmingSensor<'_> {
    fn acquire_average(&mut self) -> Result<f32, AcquisitionError> {
        self.flags.arm(self.task);
        Ok(self.value)
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Vec<(f32, Trend)>,
    pub fail: bool,
}

impl StatusDisplay for RecordingDisplay {
    fn render(&mut self, value: f32, trend: Trend) -> Result<(), RenderError> {
        if self.fail {
            return Err(RenderError::Bus);
        }
        self.frames.push((value, trend));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixCall {
    Pattern(Trend),
    Alert(bool),
}

#[derive(Default)]
pub struct RecordingMatrix {
    pub calls: Vec<MatrixCall>,
    pub fail: bool,
}

impl RecordingMatrix {
    fn record(&mut self, call: MatrixCall) -> Result<(), RenderError> {
        self.calls.push(call);
        if self.fail {
            return Err(RenderError::Bus);
        }
        Ok(())
    }
}

impl LedMatrix for RecordingMatrix {
    fn set_pattern(&mut self, trend: Trend) -> Result<(), RenderError> {
        self.record(MatrixCall::Pattern(trend))
    }

    fn set_alert(&mut self, on: bool) -> Result<(), RenderError> {
        self.record(MatrixCall::Alert(on))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub reports: Vec<DiagnosticsReport>,
}

impl DiagnosticsSink for RecordingSink {
    fn emit(&mut self, report: &DiagnosticsReport) {
        self.reports.push(*report);
    }
}

pub type TestExecutor<'a, S = ScriptedSensor> = Executor<
    'a,
    S,
    DeltaClassifier,
    RecordingDisplay,
    RecordingMatrix,
    RecordingSink,
    ManualClock,
>;

/// Executor with recording collaborators and a 10 µs clock step.
pub fn executor<S: SensorSource>(
    flags: &ReadyFlags,
    sensor: S,
    policy: PolicyKind,
) -> TestExecutor<'_, S> {
    let config = ExecutorConfig {
        policy,
        ..ExecutorConfig::default()
    };
    Executor::new(
        flags,
        Peripherals {
            sensor,
            classifier: DeltaClassifier::default(),
            display: RecordingDisplay::default(),
            matrix: RecordingMatrix::default(),
            sink: RecordingSink::default(),
        },
        ManualClock::new(10),
        &config,
    )
}
