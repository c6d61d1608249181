use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rooster_core::{
    notifications::{provision_channels, NotificationKind, NotificationRequest, NotificationSink},
    settings::Preferences,
    HiddenLessons, Lesson, LessonKey, LessonNotice, LessonNotifier,
};
use tracing::{debug, info, warn};

use crate::rows::{build_rows, ScheduleRow};
use crate::sink::LogSink;

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub(crate) lessons_path: Option<PathBuf>,
    pub(crate) preferences_path: Option<PathBuf>,
    pub(crate) now_override: Option<DateTime<Utc>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("ROOSTER_LESSONS") {
            config.lessons_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("ROOSTER_PREFERENCES") {
            config.preferences_path = Some(PathBuf::from(path));
        }
        if let Ok(now) = std::env::var("ROOSTER_NOW") {
            let parsed = DateTime::parse_from_rfc3339(now.trim())
                .with_context(|| format!("ROOSTER_NOW is not an RFC 3339 instant: {now}"))?;
            config.now_override = Some(parsed.with_timezone(&Utc));
        }
        Ok(config)
    }

    pub fn with_lessons(mut self, path: impl Into<PathBuf>) -> Self {
        self.lessons_path = Some(path.into());
        self
    }

    pub fn with_preferences(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = Some(path.into());
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now_override = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.now_override.unwrap_or_else(Utc::now)
    }
}

/// Result of one refresh cycle: the rendered rows and what the lesson slot shows.
#[derive(Debug)]
pub struct Refresh {
    pub rows: Vec<ScheduleRow>,
    pub notice: LessonNotice,
    pub active: Vec<NotificationRequest>,
}

/// Long-lived app state. The notifier and the hidden-lesson set outlive a
/// single refresh so alerts are not repeated and hidden lessons stay hidden.
pub struct App {
    sink: LogSink,
    notifier: LessonNotifier,
    hidden: HiddenLessons,
}

impl App {
    pub fn new() -> Self {
        Self::with_sink(LogSink::new())
    }

    pub fn with_sink(sink: LogSink) -> Self {
        let notifier = LessonNotifier::new(Box::new(sink.clone()));
        Self {
            sink,
            notifier,
            hidden: HiddenLessons::new(),
        }
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    pub fn refresh(&self, config: &AppConfig) -> Result<Refresh> {
        let start = Instant::now();
        let prefs = match &config.preferences_path {
            Some(path) => Preferences::load(path)
                .with_context(|| format!("unable to load preferences from {}", path.display()))?,
            None => Preferences::default(),
        };
        let loaded = match &config.lessons_path {
            Some(path) => Lesson::load_all(path)?,
            None => {
                warn!("no lessons file configured");
                Vec::new()
            }
        };
        let lessons = self.hidden.visible(&loaded);
        let now = config.now();

        provision_channels(&self.sink);
        if prefs.lesson_notifications_enabled() {
            self.sink.post(NotificationRequest::service());
        } else {
            self.sink.cancel(NotificationKind::Service.slot());
        }

        let rows = build_rows(&lessons, now);
        for row in &rows {
            debug!(subject = %row.subject, state = ?row.state, label = %row.label, "row");
        }

        let notice = self.notifier.tick(&lessons, &prefs, now);
        info!(
            lessons = lessons.len(),
            hidden = loaded.len() - lessons.len(),
            interval = ?prefs.notification_interval,
            elapsed_ms = %start.elapsed().as_millis(),
            "refresh completed"
        );

        Ok(Refresh {
            rows,
            notice,
            active: self.sink.active(),
        })
    }

    /// Hides a lesson and restarts lesson notifications. Keep the key to undo.
    pub fn hide_lesson(&self, lesson: &Lesson) -> LessonKey {
        let key = self.hidden.hide(lesson);
        self.notifier.clear();
        key
    }

    /// Undoes `hide_lesson`.
    pub fn restore_lesson(&self, key: &LessonKey) -> bool {
        let restored = self.hidden.restore(key);
        if restored {
            self.notifier.clear();
        }
        restored
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run(config: AppConfig) -> Result<()> {
    let result = App::new().refresh(&config)?;
    for row in &result.rows {
        println!(
            "{:<14} {:<28} {:<10} {}",
            row.label, row.subject, row.room, row.companion
        );
    }
    for notification in &result.active {
        println!(
            "[{}] {}: {}",
            notification.selection.channel, notification.title, notification.body
        );
    }
    Ok(())
}
