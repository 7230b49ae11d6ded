//! State shared by the tasks of one cycle

const TREND_NAME_RISING: &str = "rising";
const TREND_NAME_FALLING: &str = "falling";
const TREND_NAME_STABLE: &str = "stable";
const TREND_NAME_UNKNOWN: &str = "unknown";

/// Short-term direction of the sensor value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
    #[default]
    Unknown,
}

impl Trend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rising => TREND_NAME_RISING,
            Self::Falling => TREND_NAME_FALLING,
            Self::Stable => TREND_NAME_STABLE,
            Self::Unknown => TREND_NAME_UNKNOWN,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            TREND_NAME_RISING => Some(Self::Rising),
            TREND_NAME_FALLING => Some(Self::Falling),
            TREND_NAME_STABLE => Some(Self::Stable),
            TREND_NAME_UNKNOWN => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Most recent averaged sensor reading
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SharedSample {
    pub average_value: f32,
}

/// Output of the last trend analysis, with the sample it was computed from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Analysis {
    pub sample: SharedSample,
    pub trend: Trend,
}

/// Collaborator faults seen so far
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaultCounters {
    pub acquisition: u32,
    pub display: u32,
    pub matrix: u32,
}

/// Process-wide cycle state
///
/// Each field has a single writer: `sample` is written by acquisition,
/// `trend` and `analysis` by trend analysis.
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleState {
    sample: Option<SharedSample>,
    trend: Trend,
    analysis: Option<Analysis>,
    alert: bool,
    faults: FaultCounters,
}

impl CycleState {
    pub const fn new() -> Self {
        Self {
            sample: None,
            trend: Trend::Unknown,
            analysis: None,
            alert: false,
            faults: FaultCounters {
                acquisition: 0,
                display: 0,
                matrix: 0,
            },
        }
    }

    /// Latest sample, `None` until the first successful acquisition.
    pub const fn sample(&self) -> Option<SharedSample> {
        self.sample
    }

    pub const fn trend(&self) -> Trend {
        self.trend
    }

    /// Sample and trend as they stood after the last trend analysis.
    pub const fn analysis(&self) -> Option<Analysis> {
        self.analysis
    }

    /// Alert state last pushed to the LED matrix.
    pub const fn alert(&self) -> bool {
        self.alert
    }

    pub const fn faults(&self) -> FaultCounters {
        self.faults
    }

    pub(crate) fn set_sample(&mut self, average_value: f32) {
        self.sample = Some(SharedSample { average_value });
    }

    pub(crate) fn set_analysis(&mut self, sample: SharedSample, trend: Trend) {
        self.trend = trend;
        self.analysis = Some(Analysis { sample, trend });
    }

    pub(crate) fn set_alert(&mut self, alert: bool) {
        self.alert = alert;
    }

    pub(crate) fn faults_mut(&mut self) -> &mut FaultCounters {
        &mut self.faults
    }
}
