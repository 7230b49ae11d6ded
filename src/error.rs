//! Collaborator failures
//!
//! None of these stop the cycle: the failing task logs, keeps the last known
//! value and the scheduler moves on.

use core::fmt;

/// Sensor acquisition failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionError {
    /// The sensor did not answer
    Unavailable,
    /// Conversion did not complete in time
    Timeout,
}

impl fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("sensor unavailable"),
            Self::Timeout => f.write_str("sensor timeout"),
        }
    }
}

/// Output peripheral failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Transfer on the peripheral bus failed
    Bus,
    /// Formatted view did not fit the output buffer
    Overflow,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => f.write_str("peripheral bus failure"),
            Self::Overflow => f.write_str("output buffer overflow"),
        }
    }
}
