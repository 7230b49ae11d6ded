//! Bounded report queue between the cycle and a console consumer.
//!
//! Built on `critical-section` and `heapless::Deque`, so the producer and
//! the consumer may run in different interrupt priorities. When the queue is
//! full the oldest report is dropped: the console always sees the newest
//! cycles.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DiagnosticsSink;
use crate::report::DiagnosticsReport;

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

struct Queue<const SIZE: usize> {
    reports: Deque<DiagnosticsReport, SIZE>,
    dropped: u32,
}

/// A bounded, interrupt-safe queue of diagnostics reports.
///
/// `SIZE` must be at least 1; a zero-capacity channel fails to compile.
pub struct ReportChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Queue<SIZE>>>,
}

impl<const SIZE: usize> ReportChannel<SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        const { assert!(SIZE > 0, "ReportChannel needs room for one report") };
        Self {
            inner: Mutex::new(RefCell::new(Queue {
                reports: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Get a sender handle, usable as a [`DiagnosticsSink`].
    pub const fn sender(&self) -> ReportSender<'_, SIZE> {
        ReportSender { channel: self }
    }

    /// Get a receiver handle for the console side.
    pub const fn receiver(&self) -> ReportReceiver<'_, SIZE> {
        ReportReceiver { channel: self }
    }

    /// Queue a report, evicting the oldest one if the queue is full.
    ///
    /// Returns `true` if a report was evicted.
    pub fn push(&self, report: DiagnosticsReport) -> bool {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let evicted = queue.reports.is_full();
            if evicted {
                queue.reports.pop_front();
                queue.dropped = queue.dropped.saturating_add(1);
            }
            // SIZE > 0, so room was made above
            let _ = queue.reports.push_back(report);
            evicted
        })
    }

    /// Take the oldest queued report.
    pub fn try_receive(&self) -> Result<DiagnosticsReport, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.reports.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of reports currently queued.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().reports.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total reports discarded because the consumer fell behind.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().dropped)
    }
}

impl<const SIZE: usize> Default for ReportChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle for a [`ReportChannel`].
#[derive(Clone, Copy)]
pub struct ReportSender<'a, const SIZE: usize> {
    channel: &'a ReportChannel<SIZE>,
}

impl<const SIZE: usize> DiagnosticsSink for ReportSender<'_, SIZE> {
    fn emit(&mut self, report: &DiagnosticsReport) {
        if self.channel.push(*report) {
            #[cfg(feature = "esp32-log")]
            println!("[ReportChannel] consumer behind, oldest report dropped");
        }
    }
}

/// Consumer handle for a [`ReportChannel`].
#[derive(Clone, Copy)]
pub struct ReportReceiver<'a, const SIZE: usize> {
    channel: &'a ReportChannel<SIZE>,
}

impl<const SIZE: usize> ReportReceiver<'_, SIZE> {
    /// Take the oldest queued report.
    pub fn try_receive(&self) -> Result<DiagnosticsReport, TryReceiveError> {
        self.channel.try_receive()
    }
}
