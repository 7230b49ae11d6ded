//! Task-readiness scheduler
//!
//! Each call to [`Executor::dispatch`] consumes the highest-priority ready
//! flag, runs that single task between two timestamps and lets the policy
//! arm whatever comes next. Tasks never yield; a slow collaborator stalls
//! the whole loop.
//!
//! # Usage
//!
//! ```ignore
//! static FLAGS: ReadyFlags = ReadyFlags::new();
//!
//! // Timer interrupt, one per task
//! fn on_acquire_timer() {
//!     on_timer(&FLAGS, TaskId::Acquire);
//! }
//!
//! let mut executor = Executor::new(&FLAGS, peripherals, SystemClock, &ExecutorConfig::default());
//! loop {
//!     executor.dispatch();
//! }
//! ```

use embassy_time::{Instant, Timer};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::flags::ReadyFlags;
use crate::policy::{Policy, PolicyKind, SchedulingPolicy};
use crate::report::DiagnosticsReport;
use crate::state::CycleState;
use crate::task::TaskId;
use crate::timer::{TaskPeriods, TimerBank};
use crate::timing::{Clock, TimingRecorder};
use crate::{DiagnosticsSink, LedMatrix, SensorSource, StatusDisplay, TrendClassifier};

/// Samples below this value turn the alert on.
pub const DEFAULT_ALERT_THRESHOLD: f32 = 1.0;

/// Configuration for the executor
#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    pub policy: PolicyKind,
    pub periods: TaskPeriods,
    pub alert_threshold: f32,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            periods: TaskPeriods::default(),
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
        }
    }
}

/// External collaborators driven by the tasks
pub struct Peripherals<S, T, D, M, R> {
    pub sensor: S,
    pub classifier: T,
    pub display: D,
    pub matrix: M,
    pub sink: R,
}

/// Cooperative executor for the task cycle
pub struct Executor<'a, S, T, D, M, R, C>
where
    S: SensorSource,
    T: TrendClassifier,
    D: StatusDisplay,
    M: LedMatrix,
    R: DiagnosticsSink,
    C: Clock,
{
    // External dependencies and configuration
    flags: &'a ReadyFlags,
    peripherals: Peripherals<S, T, D, M, R>,
    clock: C,
    policy: Policy,
    periods: TaskPeriods,
    alert_threshold: f32,

    // Internal state
    state: CycleState,
    timings: TimingRecorder,
}

impl<'a, S, T, D, M, R, C> Executor<'a, S, T, D, M, R, C>
where
    S: SensorSource,
    T: TrendClassifier,
    D: StatusDisplay,
    M: LedMatrix,
    R: DiagnosticsSink,
    C: Clock,
{
    pub fn new(
        flags: &'a ReadyFlags,
        peripherals: Peripherals<S, T, D, M, R>,
        clock: C,
        config: &ExecutorConfig,
    ) -> Self {
        Self {
            flags,
            peripherals,
            clock,
            policy: config.policy.to_policy(),
            periods: config.periods,
            alert_threshold: config.alert_threshold,
            state: CycleState::new(),
            timings: TimingRecorder::new(),
        }
    }

    /// Run at most one ready task.
    ///
    /// Returns the dispatched task, or `None` when no flag was set. Flags
    /// armed while the task runs are seen by the next call.
    pub fn dispatch(&mut self) -> Option<TaskId> {
        let task = self.flags.take_next()?;
        #[cfg(feature = "esp32-log")]
        println!("[Executor.dispatch] {}", task.as_str());

        self.timings.start(task, self.clock.now());
        self.run_task(task);
        self.timings.finish(task, self.clock.now());

        self.policy.after_dispatch(task, self.flags);
        Some(task)
    }

    /// Dispatch until no flag is left, returning how many tasks ran.
    ///
    /// With a task that keeps re-arming itself this never returns.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut count = 0;
        while self.dispatch().is_some() {
            count += 1;
        }
        count
    }

    /// Timers for this deployment, first firing one period after `start`.
    pub fn timer_bank(&self, start: Instant) -> TimerBank {
        TimerBank::new(&self.periods, &self.policy, start)
    }

    /// Fire every timer due at `now`, arming its flag.
    ///
    /// Stands in for the timer interrupts on hosted or simulated targets.
    /// Returns how many timers fired.
    pub fn poll_timers(&self, timers: &mut TimerBank, now: Instant) -> usize {
        timers.poll(now, self.flags)
    }

    /// Main loop for targets whose interrupts arm the flags. Never returns.
    ///
    /// Blocks on the flag notification instead of busy-polling.
    pub async fn run(&mut self) {
        loop {
            self.flags.wait().await;
            self.dispatch_pending();
        }
    }

    /// Main loop for hosted targets, with the timers in software. Never returns.
    pub async fn run_with_timers(&mut self, timers: &mut TimerBank) {
        loop {
            self.poll_timers(timers, self.clock.now());
            self.dispatch_pending();
            match timers.next_deadline() {
                Some(deadline) => Timer::at(deadline).await,
                None => self.flags.wait().await,
            }
        }
    }

    pub const fn state(&self) -> &CycleState {
        &self.state
    }

    pub const fn timings(&self) -> &TimingRecorder {
        &self.timings
    }

    pub const fn policy(&self) -> Policy {
        self.policy
    }

    pub const fn flags(&self) -> &ReadyFlags {
        self.flags
    }

    pub fn peripherals(&self) -> &Peripherals<S, T, D, M, R> {
        &self.peripherals
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<S, T, D, M, R> {
        &mut self.peripherals
    }

    fn run_task(&mut self, task: TaskId) {
        match task {
            TaskId::Acquire => self.acquire(),
            TaskId::Alert => self.alert(),
            TaskId::AnalyzeTrend => self.analyze_trend(),
            TaskId::RenderDisplay => self.render_display(),
            TaskId::RenderMatrix => self.render_matrix(),
            TaskId::Diagnostics => self.diagnostics(),
        }
    }

    fn acquire(&mut self) {
        match self.peripherals.sensor.acquire_average() {
            Ok(value) => self.state.set_sample(value),
            Err(_err) => {
                // Keep the previous sample
                let faults = self.state.faults_mut();
                faults.acquisition = faults.acquisition.saturating_add(1);
                #[cfg(feature = "esp32-log")]
                println!("[Executor.acquire] {}, keeping last sample", _err);
            }
        }
    }

    fn alert(&mut self) {
        let Some(sample) = self.state.sample() else {
            return;
        };
        let on = sample.average_value < self.alert_threshold;
        match self.peripherals.matrix.set_alert(on) {
            Ok(()) => self.state.set_alert(on),
            Err(_err) => {
                let faults = self.state.faults_mut();
                faults.matrix = faults.matrix.saturating_add(1);
                #[cfg(feature = "esp32-log")]
                println!("[Executor.alert] {}", _err);
            }
        }
    }

    fn analyze_trend(&mut self) {
        let Some(sample) = self.state.sample() else {
            return;
        };
        let trend = self.peripherals.classifier.classify(sample.average_value);
        self.state.set_analysis(sample, trend);
    }

    fn render_display(&mut self) {
        let Some(sample) = self.state.sample() else {
            return;
        };
        let trend = self.state.trend();
        if let Err(_err) = self.peripherals.display.render(sample.average_value, trend) {
            let faults = self.state.faults_mut();
            faults.display = faults.display.saturating_add(1);
            #[cfg(feature = "esp32-log")]
            println!("[Executor.render_display] {}", _err);
        }
    }

    fn render_matrix(&mut self) {
        if let Err(_err) = self.peripherals.matrix.set_pattern(self.state.trend()) {
            let faults = self.state.faults_mut();
            faults.matrix = faults.matrix.saturating_add(1);
            #[cfg(feature = "esp32-log")]
            println!("[Executor.render_matrix] {}", _err);
        }
    }

    fn diagnostics(&mut self) {
        let report = DiagnosticsReport::capture(self.state.analysis(), &self.timings);
        self.peripherals.sink.emit(&report);
    }
}
