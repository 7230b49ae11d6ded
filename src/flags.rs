//! Readiness flags shared between timer interrupts and the main loop.
//!
//! One bit per task, stored behind a `critical-section` mutex so that a
//! timer callback and the scheduler never observe a half-written mask.
//! Arming also raises a wakeup signal for loops that block instead of
//! busy-polling.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::task::{PRIORITY_ORDER, TaskId};

/// Set of per-task readiness flags.
///
/// Intended to live in a `static` so interrupt handlers can reach it.
pub struct ReadyFlags {
    mask: Mutex<Cell<u8>>,
    wakeup: Signal<CriticalSectionRawMutex, ()>,
}

impl ReadyFlags {
    /// Create a set with every flag cleared.
    pub const fn new() -> Self {
        Self {
            mask: Mutex::new(Cell::new(0)),
            wakeup: Signal::new(),
        }
    }

    /// Mark a task as ready.
    ///
    /// Safe to call from interrupt context. Arming an already armed task has
    /// no further effect.
    pub fn arm(&self, task: TaskId) {
        critical_section::with(|cs| {
            let mask = self.mask.borrow(cs);
            mask.set(mask.get() | task.bit());
        });
        self.wakeup.signal(());
    }

    /// Clear a single flag without dispatching.
    pub fn clear(&self, task: TaskId) {
        critical_section::with(|cs| {
            let mask = self.mask.borrow(cs);
            mask.set(mask.get() & !task.bit());
        });
    }

    /// Check whether a task is armed.
    pub fn is_armed(&self, task: TaskId) -> bool {
        self.snapshot() & task.bit() != 0
    }

    /// Check whether any task is armed.
    pub fn any(&self) -> bool {
        self.snapshot() != 0
    }

    /// Raw copy of the mask, bit `n` belonging to the task with raw id `n`.
    pub fn snapshot(&self) -> u8 {
        critical_section::with(|cs| self.mask.borrow(cs).get())
    }

    /// Consume the highest-priority armed flag.
    ///
    /// Lookup and clear happen in the same critical section, so a callback
    /// re-arming the task afterwards is never lost.
    pub fn take_next(&self) -> Option<TaskId> {
        critical_section::with(|cs| {
            let mask = self.mask.borrow(cs);
            let bits = mask.get();
            let task = PRIORITY_ORDER
                .into_iter()
                .find(|task| bits & task.bit() != 0)?;
            mask.set(bits & !task.bit());
            Some(task)
        })
    }

    /// Wait until at least one flag is armed.
    ///
    /// Replaces the busy-poll on hosted targets.
    pub async fn wait(&self) {
        loop {
            if self.any() {
                return;
            }
            self.wakeup.wait().await;
        }
    }
}

impl Default for ReadyFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer callback entry point.
///
/// The only effect of a timer event is arming its task; it never dispatches
/// and never clears.
pub fn on_timer(flags: &ReadyFlags, task: TaskId) {
    flags.arm(task);
}
