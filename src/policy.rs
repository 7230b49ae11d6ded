//! Scheduling policies
//!
//! A policy decides what happens after a task completes and which tasks are
//! armed by their own timer. An executor runs exactly one policy.

use crate::flags::ReadyFlags;
use crate::task::TaskId;

pub trait SchedulingPolicy {
    /// Called by the scheduler right after `task` finished.
    fn after_dispatch(&self, task: TaskId, flags: &ReadyFlags);

    /// Whether `task` gets a periodic timer under this policy.
    fn timer_driven(&self, task: TaskId) -> bool;
}

/// Completing a task arms the next one in the chain.
///
/// Only acquisition has a timer; it starts every cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainedPolicy;

impl SchedulingPolicy for ChainedPolicy {
    fn after_dispatch(&self, task: TaskId, flags: &ReadyFlags) {
        if let Some(next) = task.next_in_chain() {
            flags.arm(next);
        }
    }

    fn timer_driven(&self, task: TaskId) -> bool {
        task == TaskId::Acquire
    }
}

/// Every task is armed solely by its own timer.
///
/// Diagnostics has no timer and runs once per completed matrix render.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndependentPolicy;

impl SchedulingPolicy for IndependentPolicy {
    fn after_dispatch(&self, task: TaskId, flags: &ReadyFlags) {
        if task == TaskId::RenderMatrix {
            flags.arm(TaskId::Diagnostics);
        }
    }

    fn timer_driven(&self, task: TaskId) -> bool {
        task.has_timer()
    }
}

/// Policy selector used in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    Chained,
    Independent,
}

impl PolicyKind {
    pub const fn to_policy(self) -> Policy {
        match self {
            Self::Chained => Policy::Chained(ChainedPolicy),
            Self::Independent => Policy::Independent(IndependentPolicy),
        }
    }
}

/// Policy slot - enum containing all available policies
#[derive(Debug, Clone, Copy)]
pub enum Policy {
    Chained(ChainedPolicy),
    Independent(IndependentPolicy),
}

impl Policy {
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::Chained(_) => PolicyKind::Chained,
            Self::Independent(_) => PolicyKind::Independent,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        PolicyKind::default().to_policy()
    }
}

impl SchedulingPolicy for Policy {
    fn after_dispatch(&self, task: TaskId, flags: &ReadyFlags) {
        match self {
            Self::Chained(policy) => policy.after_dispatch(task, flags),
            Self::Independent(policy) => policy.after_dispatch(task, flags),
        }
    }

    fn timer_driven(&self, task: TaskId) -> bool {
        match self {
            Self::Chained(policy) => policy.timer_driven(task),
            Self::Independent(policy) => policy.timer_driven(task),
        }
    }
}
