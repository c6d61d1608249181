pub mod channels;
pub mod error;
pub mod hidden;
pub mod lesson;
pub mod notifications;
pub mod notifier;
pub mod settings;
pub mod state;

pub use crate::error::{ScheduleError, ScheduleResult};
pub use crate::hidden::HiddenLessons;
pub use crate::lesson::{Lesson, LessonKey, ScheduleType};
pub use crate::notifier::{LessonNotice, LessonNotifier};
pub use crate::state::{classify, display_label, LessonState};
