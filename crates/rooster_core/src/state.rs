use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const LESSON_STARTED_LABEL: &str = "lesson started";
pub const FINISHED_LABEL: &str = "finished";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LessonState {
    Upcoming,
    Ongoing,
    Finished,
}

/// Problems with upstream lesson data that classification tolerates but
/// callers should hear about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataQualityIssue {
    MalformedInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityIssue::MalformedInterval { start, end } => {
                write!(f, "lesson ends ({end}) before it starts ({start})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub state: LessonState,
    pub issue: Option<DataQualityIssue>,
}

/// Classifies a lesson against `now`. Both bounds are inclusive for
/// `Ongoing`. An inverted interval is reported and classified as `Finished`.
pub fn evaluate(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Classification {
    if start > end {
        return Classification {
            state: LessonState::Finished,
            issue: Some(DataQualityIssue::MalformedInterval { start, end }),
        };
    }

    let state = if start <= now && end >= now {
        LessonState::Ongoing
    } else if end < now {
        LessonState::Finished
    } else {
        LessonState::Upcoming
    };
    Classification { state, issue: None }
}

pub fn classify(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> LessonState {
    let classification = evaluate(start, end, now);
    if let Some(issue) = &classification.issue {
        tracing::warn!(%issue, "classifying malformed lesson as finished");
    }
    classification.state
}

pub fn time_range_label<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
}

/// Row label for a lesson in the given state.
pub fn display_label<Tz: TimeZone>(
    state: LessonState,
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> String
where
    Tz::Offset: fmt::Display,
{
    match state {
        LessonState::Ongoing => LESSON_STARTED_LABEL.to_string(),
        LessonState::Finished => FINISHED_LABEL.to_string(),
        LessonState::Upcoming => time_range_label(start, end),
    }
}
