use std::collections::HashSet;

use parking_lot::RwLock;

use crate::lesson::{Lesson, LessonKey};

/// Lessons the user chose to hide from the day list. Hidden lessons are
/// neither shown nor announced.
#[derive(Debug, Default)]
pub struct HiddenLessons {
    keys: RwLock<HashSet<LessonKey>>,
}

impl HiddenLessons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hides a lesson and returns the key needed to undo it.
    pub fn hide(&self, lesson: &Lesson) -> LessonKey {
        let key = lesson.key();
        if self.keys.write().insert(key.clone()) {
            tracing::info!(subject = %key.subject, start = %key.start, "lesson hidden");
        }
        key
    }

    /// Undoes a hide. Returns `false` when the lesson was not hidden.
    pub fn restore(&self, key: &LessonKey) -> bool {
        let restored = self.keys.write().remove(key);
        if restored {
            tracing::info!(subject = %key.subject, start = %key.start, "lesson restored");
        }
        restored
    }

    pub fn is_hidden(&self, lesson: &Lesson) -> bool {
        self.keys.read().contains(&lesson.key())
    }

    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }

    /// Filters `lessons` down to the ones still visible, keeping their order.
    pub fn visible(&self, lessons: &[Lesson]) -> Vec<Lesson> {
        let keys = self.keys.read();
        lessons
            .iter()
            .filter(|lesson| !keys.contains(&lesson.key()))
            .cloned()
            .collect()
    }
}
