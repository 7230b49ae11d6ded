//! Software clock source
//!
//! On hardware each task has a repeating timer whose interrupt calls
//! [`on_timer`]. [`TimerBank`] reproduces that from a monotonic `now`, so the
//! same cycle can run on a hosted target or in a simulation. The caller is
//! responsible for sleeping until [`TimerBank::next_deadline`].

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::flags::{ReadyFlags, on_timer};
use crate::policy::SchedulingPolicy;
use crate::task::{PRIORITY_ORDER, TASK_COUNT, TaskId};

/// Default acquisition period (half a second).
pub const DEFAULT_ACQUIRE_PERIOD: Duration = Duration::from_millis(500);
/// Default alert period.
pub const DEFAULT_ALERT_PERIOD: Duration = Duration::from_millis(500);
/// Default trend analysis period.
pub const DEFAULT_ANALYZE_TREND_PERIOD: Duration = Duration::from_millis(1000);
/// Default display refresh period.
pub const DEFAULT_RENDER_DISPLAY_PERIOD: Duration = Duration::from_millis(1000);
/// Default LED matrix refresh period.
pub const DEFAULT_RENDER_MATRIX_PERIOD: Duration = Duration::from_millis(1000);

/// Timer periods, one per timed task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPeriods {
    pub acquire: Duration,
    pub alert: Duration,
    pub analyze_trend: Duration,
    pub render_display: Duration,
    pub render_matrix: Duration,
}

impl TaskPeriods {
    /// Period configured for `task`, `None` for tasks without a timer.
    pub const fn period(&self, task: TaskId) -> Option<Duration> {
        Some(match task {
            TaskId::Acquire => self.acquire,
            TaskId::Alert => self.alert,
            TaskId::AnalyzeTrend => self.analyze_trend,
            TaskId::RenderDisplay => self.render_display,
            TaskId::RenderMatrix => self.render_matrix,
            TaskId::Diagnostics => return None,
        })
    }
}

impl Default for TaskPeriods {
    fn default() -> Self {
        Self {
            acquire: DEFAULT_ACQUIRE_PERIOD,
            alert: DEFAULT_ALERT_PERIOD,
            analyze_trend: DEFAULT_ANALYZE_TREND_PERIOD,
            render_display: DEFAULT_RENDER_DISPLAY_PERIOD,
            render_matrix: DEFAULT_RENDER_MATRIX_PERIOD,
        }
    }
}

/// Repeating timer bound to one task
#[derive(Debug, Clone, Copy)]
pub struct PeriodicTimer {
    task: TaskId,
    period: Duration,
    next_due: Instant,
}

impl PeriodicTimer {
    /// Create a timer whose first event is one period after `start`.
    pub fn new(task: TaskId, period: Duration, start: Instant) -> Self {
        Self {
            task,
            period,
            next_due: start + period,
        }
    }

    pub const fn task(&self) -> TaskId {
        self.task
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub const fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Fire if due. Returns whether the task was armed.
    ///
    /// A timer more than two periods late drops its backlog and resyncs to
    /// `now` instead of firing in a burst.
    pub fn poll(&mut self, now: Instant, flags: &ReadyFlags) -> bool {
        if now < self.next_due {
            return false;
        }

        let max_drift = self.period + self.period;
        if now.saturating_duration_since(self.next_due) > max_drift {
            self.next_due = now;
        }

        on_timer(flags, self.task);
        self.next_due += self.period;
        true
    }
}

/// All timers of one deployment
#[derive(Debug, Clone)]
pub struct TimerBank {
    timers: Vec<PeriodicTimer, TASK_COUNT>,
}

impl TimerBank {
    /// Register a timer for every task the policy drives by time.
    pub fn new<P: SchedulingPolicy>(periods: &TaskPeriods, policy: &P, start: Instant) -> Self {
        let mut timers = Vec::new();
        for task in PRIORITY_ORDER {
            if !policy.timer_driven(task) {
                continue;
            }
            if let Some(period) = periods.period(task) {
                // Capacity equals the task count, so this cannot overflow
                let _ = timers.push(PeriodicTimer::new(task, period, start));
            }
        }
        Self { timers }
    }

    /// Fire every due timer and return how many fired.
    pub fn poll(&mut self, now: Instant, flags: &ReadyFlags) -> usize {
        let mut fired = 0;
        for timer in &mut self.timers {
            if timer.poll(now, flags) {
                fired += 1;
            }
        }
        fired
    }

    /// Earliest instant at which any timer fires next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(PeriodicTimer::next_due).min()
    }

    pub fn timers(&self) -> &[PeriodicTimer] {
        &self.timers
    }
}
