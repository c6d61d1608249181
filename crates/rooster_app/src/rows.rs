use chrono::{DateTime, Utc};
use rooster_core::{Lesson, LessonState};
use xxhash_rust::xxh64::xxh64;

/// Marker colours (ARGB) for the stripe that tells schedules apart.
const SCHEDULE_COLOURS: [u32; 8] = [
    0xFF1E88E5, 0xFFE53935, 0xFF43A047, 0xFFFB8C00, 0xFF8E24AA, 0xFF00ACC1, 0xFF6D4C41,
    0xFFD81B60,
];

/// Stable colour for a schedule, so the same class or teacher keeps its
/// colour across runs and devices.
pub fn schedule_colour(schedule_id: &str) -> u32 {
    let index = xxh64(schedule_id.as_bytes(), 0) % SCHEDULE_COLOURS.len() as u64;
    SCHEDULE_COLOURS[index as usize]
}

/// View model for one row of the day list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub subject: String,
    pub room: String,
    pub companion: String,
    pub schedule_id: String,
    pub colour: u32,
    pub state: LessonState,
    pub label: String,
    status_label: String,
    time_range: String,
    showing_range: bool,
}

impl ScheduleRow {
    pub fn from_lesson(lesson: &Lesson, now: DateTime<Utc>) -> Self {
        let state = lesson.state_at(now);
        let label = lesson.label_at(now);
        Self {
            subject: lesson.subject.clone(),
            room: lesson.room.clone(),
            companion: lesson.companion().to_string(),
            schedule_id: lesson.schedule_id.clone(),
            colour: schedule_colour(&lesson.schedule_id),
            state,
            status_label: label.clone(),
            label,
            time_range: lesson.time_range(),
            showing_range: state == LessonState::Upcoming,
        }
    }

    /// Tapping a started or finished lesson flips between its status and its
    /// times. Upcoming rows always show their times.
    pub fn toggle(&mut self) -> bool {
        if self.state == LessonState::Upcoming {
            return false;
        }
        self.showing_range = !self.showing_range;
        self.label = if self.showing_range {
            self.time_range.clone()
        } else {
            self.status_label.clone()
        };
        true
    }

    pub fn showing_range(&self) -> bool {
        self.showing_range
    }
}

pub fn build_rows(lessons: &[Lesson], now: DateTime<Utc>) -> Vec<ScheduleRow> {
    lessons
        .iter()
        .map(|lesson| ScheduleRow::from_lesson(lesson, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use rooster_core::ScheduleType;

    fn lesson(schedule_type: ScheduleType) -> Lesson {
        let offset = FixedOffset::east_opt(3600).unwrap();
        Lesson {
            start_time: offset.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap(),
            end_time: offset.with_ymd_and_hms(2026, 10, 19, 10, 50, 0).unwrap(),
            subject: "Operating Systems".to_string(),
            room: "X2.01".to_string(),
            teacher: "M. Bakker".to_string(),
            class_name: "ICTc".to_string(),
            schedule_id: "ICTc".to_string(),
            schedule_type,
        }
    }

    fn local(h: u32, m: u32) -> DateTime<Utc> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, h, m, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn ongoing_row_toggles_between_status_and_times() {
        let mut row = ScheduleRow::from_lesson(&lesson(ScheduleType::Student), local(10, 10));
        assert_eq!(row.state, LessonState::Ongoing);
        assert_eq!(row.label, "lesson started");
        assert_eq!(row.companion, "M. Bakker");

        assert!(row.toggle());
        assert_eq!(row.label, "10:00 - 10:50");
        assert!(row.toggle());
        assert_eq!(row.label, "lesson started");
    }

    #[test]
    fn finished_row_toggles_and_upcoming_row_does_not() {
        let mut finished = ScheduleRow::from_lesson(&lesson(ScheduleType::Teacher), local(11, 0));
        assert_eq!(finished.label, "finished");
        assert_eq!(finished.companion, "ICTc");
        assert!(finished.toggle());
        assert!(finished.showing_range());
        assert!(finished.toggle());
        assert_eq!(finished.label, "finished");

        let mut upcoming = ScheduleRow::from_lesson(&lesson(ScheduleType::Teacher), local(9, 0));
        assert_eq!(upcoming.label, "10:00 - 10:50");
        assert!(!upcoming.toggle());
        assert_eq!(upcoming.label, "10:00 - 10:50");
    }

    #[test]
    fn schedule_colour_is_stable_per_schedule() {
        let row = ScheduleRow::from_lesson(&lesson(ScheduleType::Student), local(9, 0));
        assert_eq!(row.colour, schedule_colour("ICTc"));
        assert_eq!(schedule_colour("ICTc"), schedule_colour("ICTc"));
        assert!(SCHEDULE_COLOURS.contains(&schedule_colour("ICTc")));

        let distinct: std::collections::HashSet<u32> = ["ICTa", "ICTb", "ICTc", "ICTd", "BKa", "BKb"]
            .iter()
            .map(|id| schedule_colour(id))
            .collect();
        assert!(distinct.len() > 1, "schedules should not all share one colour");
    }
}
