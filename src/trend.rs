//! Reference trend classifier
//!
//! Compares each sample with the previous one. Differences within the
//! tolerance band count as stable.

use crate::TrendClassifier;
use crate::state::Trend;

/// Default stable band, in sensor units.
pub const DEFAULT_TREND_TOLERANCE: f32 = 0.1;

/// Classifies by the delta between two consecutive samples
#[derive(Debug, Clone, Copy)]
pub struct DeltaClassifier {
    tolerance: f32,
    previous: Option<f32>,
}

impl DeltaClassifier {
    pub const fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            previous: None,
        }
    }

    /// Forget the sample history.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    pub const fn tolerance(&self) -> f32 {
        self.tolerance
    }
}

impl Default for DeltaClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_TOLERANCE)
    }
}

impl TrendClassifier for DeltaClassifier {
    fn classify(&mut self, current: f32) -> Trend {
        let Some(previous) = self.previous.replace(current) else {
            return Trend::Unknown;
        };
        if current.is_nan() || previous.is_nan() {
            return Trend::Unknown;
        }

        let delta = current - previous;
        if libm::fabsf(delta) <= self.tolerance {
            Trend::Stable
        } else if delta > 0.0 {
            Trend::Rising
        } else {
            Trend::Falling
        }
    }
}
