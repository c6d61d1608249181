use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{self, Classification, LessonState};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    #[default]
    Student,
    Teacher,
}

/// A single lesson as delivered by the schedule store. Instants keep the
/// offset they were published with so labels render in local wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub subject: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub class_name: String,
    pub schedule_id: String,
    #[serde(default)]
    pub schedule_type: ScheduleType,
}

/// Identifies a lesson across refreshes of the same schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LessonKey {
    pub schedule_id: String,
    pub subject: String,
    pub start: DateTime<Utc>,
}

impl Lesson {
    pub fn key(&self) -> LessonKey {
        LessonKey {
            schedule_id: self.schedule_id.clone(),
            subject: self.subject.clone(),
            start: self.start_time.with_timezone(&Utc),
        }
    }

    /// Reads a JSON array of lessons and returns them in display order.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Lesson>> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("unable to read lessons from {}", path.display()))?;
        let mut lessons: Vec<Lesson> = serde_json::from_str(&raw)
            .with_context(|| format!("malformed lessons file {}", path.display()))?;
        lessons.sort();
        Ok(lessons)
    }

    /// The secondary line shown under the subject: the class for teacher
    /// schedules, the teacher for student schedules.
    pub fn companion(&self) -> &str {
        match self.schedule_type {
            ScheduleType::Teacher => &self.class_name,
            ScheduleType::Student => &self.teacher,
        }
    }

    pub fn evaluate(&self, now: DateTime<Utc>) -> Classification {
        state::evaluate(
            self.start_time.with_timezone(&Utc),
            self.end_time.with_timezone(&Utc),
            now,
        )
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> LessonState {
        state::classify(
            self.start_time.with_timezone(&Utc),
            self.end_time.with_timezone(&Utc),
            now,
        )
    }

    pub fn label_at(&self, now: DateTime<Utc>) -> String {
        state::display_label(self.state_at(now), &self.start_time, &self.end_time)
    }

    pub fn time_range(&self) -> String {
        state::time_range_label(&self.start_time, &self.end_time)
    }
}

impl PartialEq for Lesson {
    fn eq(&self, other: &Self) -> bool {
        self.start_time == other.start_time
            && self.end_time == other.end_time
            && self.subject == other.subject
            && self.room == other.room
            && self.schedule_id == other.schedule_id
    }
}

impl Eq for Lesson {}

impl PartialOrd for Lesson {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Lesson {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_time
            .cmp(&other.start_time)
            .then_with(|| self.end_time.cmp(&other.end_time))
            .then_with(|| self.subject.cmp(&other.subject))
            .then_with(|| self.room.cmp(&other.room))
            .then_with(|| self.schedule_id.cmp(&other.schedule_id))
    }
}
