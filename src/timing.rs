//! Per-task execution timing.
//!
//! Each dispatch is wrapped by a start and a finish timestamp. A slot only
//! reports an elapsed time after it has seen one complete start/finish pair,
//! so a task that never ran reads as "not measured" rather than zero.

use embassy_time::{Duration, Instant};

use crate::task::{TASK_COUNT, TaskId};

/// Monotonic time source
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by the global `embassy-time` driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Timing record of a single task
#[derive(Debug, Clone, Copy)]
pub struct TaskTiming {
    last_start: Option<Instant>,
    last_end: Option<Instant>,
    /// Start of a dispatch that has not finished yet
    pending: Option<Instant>,
    runs: u32,
    max_elapsed: Duration,
}

impl TaskTiming {
    pub const fn new() -> Self {
        Self {
            last_start: None,
            last_end: None,
            pending: None,
            runs: 0,
            max_elapsed: Duration::from_ticks(0),
        }
    }

    /// Start timestamp of the last completed run.
    pub const fn last_start(&self) -> Option<Instant> {
        self.last_start
    }

    /// End timestamp of the last completed run.
    pub const fn last_end(&self) -> Option<Instant> {
        self.last_end
    }

    /// Number of completed runs.
    pub const fn runs(&self) -> u32 {
        self.runs
    }

    pub const fn has_run(&self) -> bool {
        self.runs > 0
    }

    /// Duration of the last completed run.
    pub fn elapsed(&self) -> Option<Duration> {
        let start = self.last_start?;
        let end = self.last_end?;
        Some(end.saturating_duration_since(start))
    }

    /// Longest completed run so far.
    pub fn max_elapsed(&self) -> Option<Duration> {
        self.has_run().then_some(self.max_elapsed)
    }

    fn start(&mut self, now: Instant) {
        self.pending = Some(now);
    }

    fn finish(&mut self, now: Instant) {
        // A finish without a matching start is ignored
        let Some(start) = self.pending.take() else {
            return;
        };
        // Clamp so that end never precedes start
        let end = if now < start { start } else { now };

        self.last_start = Some(start);
        self.last_end = Some(end);
        self.runs = self.runs.saturating_add(1);

        let elapsed = end.saturating_duration_since(start);
        if elapsed > self.max_elapsed {
            self.max_elapsed = elapsed;
        }
    }
}

impl Default for TaskTiming {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing slots for every task of the cycle
#[derive(Debug, Clone)]
pub struct TimingRecorder {
    slots: [TaskTiming; TASK_COUNT],
}

impl TimingRecorder {
    pub const fn new() -> Self {
        Self {
            slots: [TaskTiming::new(); TASK_COUNT],
        }
    }

    /// Record the start of a dispatch.
    pub fn start(&mut self, task: TaskId, now: Instant) {
        self.slots[task.index()].start(now);
    }

    /// Record the end of a dispatch started with [`Self::start`].
    pub fn finish(&mut self, task: TaskId, now: Instant) {
        self.slots[task.index()].finish(now);
    }

    pub fn get(&self, task: TaskId) -> &TaskTiming {
        &self.slots[task.index()]
    }

    /// Elapsed time of the last completed run, `None` if never measured.
    pub fn measurement(&self, task: TaskId) -> Option<Duration> {
        self.get(task).elapsed()
    }

    /// Run `f` between a start and a finish timestamp taken from `clock`.
    pub fn measure<C: Clock, R>(&mut self, task: TaskId, clock: &C, f: impl FnOnce() -> R) -> R {
        self.start(task, clock.now());
        let result = f();
        self.finish(task, clock.now());
        result
    }
}

impl Default for TimingRecorder {
    fn default() -> Self {
        Self::new()
    }
}
