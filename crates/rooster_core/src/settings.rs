use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

pub const DEFAULT_WEEK_COUNT: u32 = 4;
pub const MAX_WEEK_COUNT: u32 = 12;

/// How eagerly lesson notifications are shown, ordered from quiet to noisy.
/// Stored as the integers the settings screen has always written.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(try_from = "i32", into = "i32")]
pub enum NotificationInterval {
    #[default]
    NotSet,
    Off,
    OneHour,
    ThirtyMinutes,
    FifteenMinutes,
    AlwaysOn,
}

impl NotificationInterval {
    /// Choices offered by the interval picker, in display order.
    pub const CHOICES: [NotificationInterval; 4] = [
        NotificationInterval::OneHour,
        NotificationInterval::ThirtyMinutes,
        NotificationInterval::FifteenMinutes,
        NotificationInterval::AlwaysOn,
    ];

    pub fn as_stored(self) -> i32 {
        match self {
            NotificationInterval::NotSet => 0,
            NotificationInterval::Off => 1,
            NotificationInterval::OneHour => 2,
            NotificationInterval::ThirtyMinutes => 3,
            NotificationInterval::FifteenMinutes => 4,
            NotificationInterval::AlwaysOn => 5,
        }
    }

    /// Maps a picker row to its setting. Stored values are the index plus two.
    pub fn from_display_index(index: usize) -> Option<Self> {
        Self::CHOICES.get(index).copied()
    }

    pub fn display_index(self) -> Option<usize> {
        Self::CHOICES.iter().position(|choice| *choice == self)
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            NotificationInterval::NotSet => None,
            NotificationInterval::Off => Some("Off"),
            NotificationInterval::OneHour => Some("One hour before"),
            NotificationInterval::ThirtyMinutes => Some("Thirty minutes before"),
            NotificationInterval::FifteenMinutes => Some("Fifteen minutes before"),
            NotificationInterval::AlwaysOn => Some("Always on"),
        }
    }

    pub fn lessons_enabled(self) -> bool {
        !matches!(self, NotificationInterval::NotSet | NotificationInterval::Off)
    }

    /// How far ahead of a lesson a heads-up alert fires. `None` for settings
    /// that never alert ahead of time.
    pub fn lead_time(self) -> Option<Duration> {
        match self {
            NotificationInterval::OneHour => Some(Duration::hours(1)),
            NotificationInterval::ThirtyMinutes => Some(Duration::minutes(30)),
            NotificationInterval::FifteenMinutes => Some(Duration::minutes(15)),
            _ => None,
        }
    }
}

impl TryFrom<i32> for NotificationInterval {
    type Error = ScheduleError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NotificationInterval::NotSet),
            1 => Ok(NotificationInterval::Off),
            2 => Ok(NotificationInterval::OneHour),
            3 => Ok(NotificationInterval::ThirtyMinutes),
            4 => Ok(NotificationInterval::FifteenMinutes),
            5 => Ok(NotificationInterval::AlwaysOn),
            other => Err(ScheduleError::UnknownInterval(other)),
        }
    }
}

impl From<NotificationInterval> for i32 {
    fn from(value: NotificationInterval) -> Self {
        value.as_stored()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    pub notification_interval: NotificationInterval,
    pub schedule_change_notifications: bool,
    pub telemetry_enabled: bool,
    pub sync_calendar: bool,
    pub dark_mode: Option<bool>,
    pub week_count: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notification_interval: NotificationInterval::NotSet,
            schedule_change_notifications: true,
            telemetry_enabled: true,
            sync_calendar: false,
            dark_mode: None,
            week_count: DEFAULT_WEEK_COUNT,
        }
    }
}

impl Preferences {
    /// Loads preferences, falling back to defaults when the file does not exist yet.
    pub fn load(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no preferences stored, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ScheduleError::PreferencesIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let prefs: Preferences = serde_json::from_str(&raw)?;
        prefs.validate()?;
        Ok(prefs)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ScheduleResult<()> {
        let path = path.as_ref();
        self.validate()?;
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).map_err(|source| ScheduleError::PreferencesIo {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        if self.week_count == 0 || self.week_count > MAX_WEEK_COUNT {
            return Err(ScheduleError::WeekCountOutOfRange {
                count: self.week_count,
                max: MAX_WEEK_COUNT,
            });
        }
        Ok(())
    }

    pub fn lesson_notifications_enabled(&self) -> bool {
        self.notification_interval.lessons_enabled()
    }

    /// The lesson-notification switch: on means always on, off means off.
    pub fn set_lesson_notifications(&mut self, enabled: bool) {
        self.notification_interval = if enabled {
            NotificationInterval::AlwaysOn
        } else {
            NotificationInterval::Off
        };
    }

    /// Applies a row picked in the interval dialog. Returns `false` when
    /// nothing was picked.
    pub fn pick_interval(&mut self, index: Option<usize>) -> bool {
        match index.and_then(NotificationInterval::from_display_index) {
            Some(interval) => {
                self.notification_interval = interval;
                true
            }
            None => false,
        }
    }

    pub fn set_week_count(&mut self, count: u32) -> ScheduleResult<()> {
        if count == 0 || count > MAX_WEEK_COUNT {
            return Err(ScheduleError::WeekCountOutOfRange {
                count,
                max: MAX_WEEK_COUNT,
            });
        }
        self.week_count = count;
        Ok(())
    }

    /// Label for the interval row; `None` keeps the placeholder text.
    pub fn interval_label(&self) -> Option<&'static str> {
        self.notification_interval.label()
    }
}
