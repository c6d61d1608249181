use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the boundary where host-provided raw values enter the core.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("unknown notification slot {0}")]
    UnknownNotificationKind(i32),

    #[error("unknown notification channel `{0}`")]
    UnknownChannel(String),

    #[error("unknown notification interval value {0}")]
    UnknownInterval(i32),

    #[error("week count {count} is outside 1..={max}")]
    WeekCountOutOfRange { count: u32, max: u32 },

    #[error("unable to read preferences at {path}")]
    PreferencesIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preferences: {0}")]
    PreferencesFormat(#[from] serde_json::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
