//! Task identities and their fixed priority order
//!
//! Every unit of work in the cycle is named by a [`TaskId`]. The raw ids are
//! stable and double as bit positions in the readiness mask.

const TASK_NAME_ACQUIRE: &str = "acquire";
const TASK_NAME_ALERT: &str = "alert";
const TASK_NAME_ANALYZE_TREND: &str = "analyze_trend";
const TASK_NAME_RENDER_DISPLAY: &str = "render_display";
const TASK_NAME_RENDER_MATRIX: &str = "render_matrix";
const TASK_NAME_DIAGNOSTICS: &str = "diagnostics";

const TASK_ID_ACQUIRE: u8 = 0;
const TASK_ID_ALERT: u8 = 1;
const TASK_ID_ANALYZE_TREND: u8 = 2;
const TASK_ID_RENDER_DISPLAY: u8 = 3;
const TASK_ID_RENDER_MATRIX: u8 = 4;
const TASK_ID_DIAGNOSTICS: u8 = 5;

/// Number of tasks in the cycle, diagnostics included.
pub const TASK_COUNT: usize = 6;

/// Order in which the scheduler inspects readiness flags.
///
/// Static: a task that keeps re-arming ahead of a lower-priority one will
/// starve it.
pub const PRIORITY_ORDER: [TaskId; TASK_COUNT] = [
    TaskId::Acquire,
    TaskId::Alert,
    TaskId::AnalyzeTrend,
    TaskId::RenderDisplay,
    TaskId::RenderMatrix,
    TaskId::Diagnostics,
];

/// Known tasks of the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TaskId {
    /// Refresh the shared sample from the sensor
    Acquire = TASK_ID_ACQUIRE,
    /// Drive the binary low-value alert
    Alert = TASK_ID_ALERT,
    /// Classify the short-term trend of the sample
    AnalyzeTrend = TASK_ID_ANALYZE_TREND,
    /// Push value and trend to the status display
    RenderDisplay = TASK_ID_RENDER_DISPLAY,
    /// Paint the trend color on the LED matrix
    RenderMatrix = TASK_ID_RENDER_MATRIX,
    /// Emit the per-cycle timing report
    Diagnostics = TASK_ID_DIAGNOSTICS,
}

impl TaskId {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            TASK_ID_ACQUIRE => Self::Acquire,
            TASK_ID_ALERT => Self::Alert,
            TASK_ID_ANALYZE_TREND => Self::AnalyzeTrend,
            TASK_ID_RENDER_DISPLAY => Self::RenderDisplay,
            TASK_ID_RENDER_MATRIX => Self::RenderMatrix,
            TASK_ID_DIAGNOSTICS => Self::Diagnostics,
            _ => return None,
        })
    }

    /// Slot index used by per-task tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit of this task in a readiness mask.
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acquire => TASK_NAME_ACQUIRE,
            Self::Alert => TASK_NAME_ALERT,
            Self::AnalyzeTrend => TASK_NAME_ANALYZE_TREND,
            Self::RenderDisplay => TASK_NAME_RENDER_DISPLAY,
            Self::RenderMatrix => TASK_NAME_RENDER_MATRIX,
            Self::Diagnostics => TASK_NAME_DIAGNOSTICS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            TASK_NAME_ACQUIRE => Some(Self::Acquire),
            TASK_NAME_ALERT => Some(Self::Alert),
            TASK_NAME_ANALYZE_TREND => Some(Self::AnalyzeTrend),
            TASK_NAME_RENDER_DISPLAY => Some(Self::RenderDisplay),
            TASK_NAME_RENDER_MATRIX => Some(Self::RenderMatrix),
            TASK_NAME_DIAGNOSTICS => Some(Self::Diagnostics),
            _ => None,
        }
    }

    /// Task armed when this one completes in chained mode.
    ///
    /// Diagnostics terminates the chain.
    pub const fn next_in_chain(self) -> Option<Self> {
        match self {
            Self::Acquire => Some(Self::Alert),
            Self::Alert => Some(Self::AnalyzeTrend),
            Self::AnalyzeTrend => Some(Self::RenderDisplay),
            Self::RenderDisplay => Some(Self::RenderMatrix),
            Self::RenderMatrix => Some(Self::Diagnostics),
            Self::Diagnostics => None,
        }
    }

    /// Whether a periodic timer may arm this task.
    pub const fn has_timer(self) -> bool {
        !matches!(self, Self::Diagnostics)
    }
}
