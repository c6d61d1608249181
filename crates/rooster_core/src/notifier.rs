use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use crate::lesson::{Lesson, LessonKey};
use crate::notifications::{NotificationKind, NotificationRequest, NotificationSink};
use crate::settings::{NotificationInterval, Preferences};
use crate::state::LessonState;

pub const NO_MORE_LESSONS_TEXT: &str = "No more lessons today";

/// What the lesson slot should show for one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LessonNotice {
    Clear,
    /// Low-priority ticker for the current or next lesson.
    Ticker { text: String },
    /// One-off alert shortly before a lesson starts.
    HeadsUp { key: LessonKey, text: String },
    /// Dismissible notice once the day is over.
    DayFinished { text: String },
}

fn describe_current(lesson: &Lesson) -> String {
    let mut text = format!("Now: {}", lesson.subject);
    if !lesson.room.is_empty() {
        text.push_str(&format!(" in {}", lesson.room));
    }
    text.push_str(&format!(", until {}", lesson.end_time.format("%H:%M")));
    text
}

fn describe_next(lesson: &Lesson) -> String {
    let mut text = format!(
        "Next: {} at {}",
        lesson.subject,
        lesson.start_time.format("%H:%M")
    );
    if !lesson.room.is_empty() {
        text.push_str(&format!(" in {}", lesson.room));
    }
    text
}

/// Decides the lesson notification for `now`. `lessons` are the visible
/// lessons of the day in display order.
pub fn plan_lesson_notice(
    lessons: &[Lesson],
    interval: NotificationInterval,
    now: DateTime<Utc>,
) -> LessonNotice {
    if !interval.lessons_enabled() || lessons.is_empty() {
        return LessonNotice::Clear;
    }

    let mut current: Option<&Lesson> = None;
    let mut next: Option<&Lesson> = None;
    for lesson in lessons {
        let classification = lesson.evaluate(now);
        if let Some(issue) = &classification.issue {
            tracing::warn!(subject = %lesson.subject, %issue, "skipping malformed lesson");
        }
        match classification.state {
            LessonState::Ongoing if current.is_none() => current = Some(lesson),
            LessonState::Upcoming => {
                let earlier = next.map_or(true, |n| lesson.start_time < n.start_time);
                if earlier {
                    next = Some(lesson);
                }
            }
            _ => {}
        }
    }

    if interval == NotificationInterval::AlwaysOn {
        return match (current, next) {
            (Some(lesson), _) => LessonNotice::Ticker {
                text: describe_current(lesson),
            },
            (None, Some(lesson)) => LessonNotice::Ticker {
                text: describe_next(lesson),
            },
            (None, None) => LessonNotice::DayFinished {
                text: NO_MORE_LESSONS_TEXT.to_string(),
            },
        };
    }

    let (Some(lead), Some(lesson)) = (interval.lead_time(), next) else {
        return LessonNotice::Clear;
    };
    if lesson.start_time.with_timezone(&Utc) - now <= lead {
        LessonNotice::HeadsUp {
            key: lesson.key(),
            text: describe_next(lesson),
        }
    } else {
        LessonNotice::Clear
    }
}

/// Applies lesson notices to a sink. The sink is the only side effect; the
/// notifier only remembers which lesson it last alerted for.
pub struct LessonNotifier {
    sink: Box<dyn NotificationSink>,
    last_alerted: Mutex<Option<LessonKey>>,
}

impl LessonNotifier {
    pub fn new(sink: Box<dyn NotificationSink>) -> Self {
        Self {
            sink,
            last_alerted: Mutex::new(None),
        }
    }

    pub fn sink(&self) -> &dyn NotificationSink {
        self.sink.as_ref()
    }

    pub fn tick(&self, lessons: &[Lesson], prefs: &Preferences, now: DateTime<Utc>) -> LessonNotice {
        let notice = plan_lesson_notice(lessons, prefs.notification_interval, now);
        let slot = NotificationKind::Lesson.slot();
        match &notice {
            LessonNotice::Clear => self.sink.cancel(slot),
            LessonNotice::Ticker { text } => {
                self.sink.post(NotificationRequest::lesson(text.clone(), false, true));
            }
            LessonNotice::DayFinished { text } => {
                self.sink.post(NotificationRequest::lesson(text.clone(), false, false));
            }
            LessonNotice::HeadsUp { key, text } => {
                let mut last = self.last_alerted.lock();
                if last.as_ref() == Some(key) {
                    tracing::debug!(subject = %key.subject, "lesson already alerted");
                } else {
                    tracing::info!(subject = %key.subject, start = %key.start, "posting lesson alert");
                    self.sink.post(NotificationRequest::lesson(text.clone(), true, false));
                    *last = Some(key.clone());
                }
            }
        }
        notice
    }

    /// Posts the schedule-changed notification if the user wants it.
    pub fn schedule_changed(&self, prefs: &Preferences) -> bool {
        if !prefs.schedule_change_notifications {
            tracing::debug!("schedule change notifications disabled");
            return false;
        }
        self.sink.post(NotificationRequest::schedule_changed());
        true
    }

    pub fn clear(&self) {
        self.sink.cancel(NotificationKind::Lesson.slot());
        *self.last_alerted.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn lesson(subject: &str, start: (u32, u32), end: (u32, u32)) -> Lesson {
        let offset = FixedOffset::east_opt(0).unwrap();
        Lesson {
            start_time: offset.with_ymd_and_hms(2026, 10, 19, start.0, start.1, 0).unwrap(),
            end_time: offset.with_ymd_and_hms(2026, 10, 19, end.0, end.1, 0).unwrap(),
            subject: subject.to_string(),
            room: "B1.04".to_string(),
            teacher: String::new(),
            class_name: String::new(),
            schedule_id: "ICTa".to_string(),
            schedule_type: Default::default(),
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, h, m, 0).unwrap()
    }

    fn day() -> Vec<Lesson> {
        vec![
            lesson("Networking", (10, 0), (10, 50)),
            lesson("Databases", (13, 0), (13, 50)),
        ]
    }

    #[test]
    fn notifier_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LessonNotifier>();
    }

    #[test]
    fn disabled_interval_clears() {
        for interval in [NotificationInterval::NotSet, NotificationInterval::Off] {
            assert_eq!(
                plan_lesson_notice(&day(), interval, at(9, 55)),
                LessonNotice::Clear
            );
        }
    }

    #[test]
    fn heads_up_fires_inside_the_lead_time_only() {
        let early = plan_lesson_notice(&day(), NotificationInterval::FifteenMinutes, at(9, 40));
        assert_eq!(early, LessonNotice::Clear);

        let due = plan_lesson_notice(&day(), NotificationInterval::FifteenMinutes, at(9, 45));
        match due {
            LessonNotice::HeadsUp { key, text } => {
                assert_eq!(key.subject, "Networking");
                assert_eq!(text, "Next: Networking at 10:00 in B1.04");
            }
            other => panic!("expected heads-up, got {other:?}"),
        }

        let hour = plan_lesson_notice(&day(), NotificationInterval::OneHour, at(12, 0));
        assert!(matches!(hour, LessonNotice::HeadsUp { ref key, .. } if key.subject == "Databases"));
    }

    #[test]
    fn always_on_tracks_current_then_next_then_end_of_day() {
        let interval = NotificationInterval::AlwaysOn;
        assert_eq!(
            plan_lesson_notice(&day(), interval, at(10, 50)),
            LessonNotice::Ticker {
                text: "Now: Networking in B1.04, until 10:50".to_string()
            }
        );
        assert_eq!(
            plan_lesson_notice(&day(), interval, at(11, 0)),
            LessonNotice::Ticker {
                text: "Next: Databases at 13:00 in B1.04".to_string()
            }
        );
        assert_eq!(
            plan_lesson_notice(&day(), interval, at(14, 0)),
            LessonNotice::DayFinished {
                text: NO_MORE_LESSONS_TEXT.to_string()
            }
        );
    }

    #[test]
    fn empty_day_clears_even_when_always_on() {
        assert_eq!(
            plan_lesson_notice(&[], NotificationInterval::AlwaysOn, at(9, 0)),
            LessonNotice::Clear
        );
    }

    #[test]
    fn inverted_lessons_are_never_announced() {
        let broken = vec![lesson("Broken", (11, 0), (10, 0))];
        assert_eq!(
            plan_lesson_notice(&broken, NotificationInterval::OneHour, at(10, 30)),
            LessonNotice::Clear
        );
    }
}
