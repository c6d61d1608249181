use serde::{Deserialize, Serialize};

use crate::channels::{ChannelId, ChannelSpec};
use crate::error::ScheduleError;

pub const APP_TITLE: &str = "Rooster";
pub const SCHEDULE_CHANGED_TEXT: &str = "Your schedule has changed";
pub const SERVICE_TEXT: &str =
    "Open the channel settings and turn off this notification to hide it";

/// The kinds of notification the app posts. Each kind owns one slot so a new
/// notification replaces the previous one of the same kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Lesson,
    ScheduleChanged,
    Service,
}

impl NotificationKind {
    pub fn slot(self) -> i32 {
        match self {
            NotificationKind::Lesson => 0,
            NotificationKind::ScheduleChanged => 1,
            NotificationKind::Service => 2,
        }
    }
}

impl TryFrom<i32> for NotificationKind {
    type Error = ScheduleError;

    fn try_from(slot: i32) -> Result<Self, Self::Error> {
        match slot {
            0 => Ok(NotificationKind::Lesson),
            1 => Ok(NotificationKind::ScheduleChanged),
            2 => Ok(NotificationKind::Service),
            other => Err(ScheduleError::UnknownNotificationKind(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Min,
    Low,
    Default,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    /// Sound, vibration and lights.
    Full,
    /// Whatever the channel dictates.
    Channel,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChannelSelection {
    pub channel: ChannelId,
    pub priority: Priority,
    pub alert: Alert,
    pub ongoing: bool,
    pub auto_cancel: bool,
}

/// Picks the channel and presentation for a lesson notification.
pub fn select_channel(is_heads_up: bool, is_ongoing: bool) -> ChannelSelection {
    match (is_heads_up, is_ongoing) {
        (true, ongoing) => ChannelSelection {
            channel: ChannelId::Push,
            priority: Priority::High,
            alert: Alert::Full,
            ongoing,
            auto_cancel: !ongoing,
        },
        (false, true) => ChannelSelection {
            channel: ChannelId::Persistent,
            priority: Priority::Min,
            alert: Alert::Channel,
            ongoing: true,
            auto_cancel: false,
        },
        (false, false) => ChannelSelection {
            channel: ChannelId::Persistent,
            priority: Priority::Default,
            alert: Alert::Channel,
            ongoing: false,
            auto_cancel: true,
        },
    }
}

pub fn schedule_changed_selection() -> ChannelSelection {
    ChannelSelection {
        channel: ChannelId::Push,
        priority: Priority::High,
        alert: Alert::Full,
        ongoing: false,
        auto_cancel: true,
    }
}

pub fn service_selection() -> ChannelSelection {
    ChannelSelection {
        channel: ChannelId::Service,
        priority: Priority::Min,
        alert: Alert::Channel,
        ongoing: true,
        auto_cancel: false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRequest {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub selection: ChannelSelection,
    pub category: Option<String>,
}

impl NotificationRequest {
    pub fn lesson(body: impl Into<String>, is_heads_up: bool, is_ongoing: bool) -> Self {
        Self {
            kind: NotificationKind::Lesson,
            title: APP_TITLE.to_string(),
            body: body.into(),
            selection: select_channel(is_heads_up, is_ongoing),
            category: None,
        }
    }

    pub fn schedule_changed() -> Self {
        Self {
            kind: NotificationKind::ScheduleChanged,
            title: APP_TITLE.to_string(),
            body: SCHEDULE_CHANGED_TEXT.to_string(),
            selection: schedule_changed_selection(),
            category: None,
        }
    }

    pub fn service() -> Self {
        Self {
            kind: NotificationKind::Service,
            title: APP_TITLE.to_string(),
            body: SERVICE_TEXT.to_string(),
            selection: service_selection(),
            category: Some("service".to_string()),
        }
    }

    pub fn slot(&self) -> i32 {
        self.kind.slot()
    }
}

/// Platform-specific notification adapters will implement this trait.
pub trait NotificationSink: Send + Sync {
    fn channel_exists(&self, id: ChannelId) -> bool;
    fn create_channel(&self, spec: &ChannelSpec);
    fn post(&self, notification: NotificationRequest);
    fn cancel(&self, slot: i32);
}

/// Registers every channel the sink does not know yet. Returns how many were
/// created.
pub fn provision_channels(sink: &dyn NotificationSink) -> usize {
    let mut created = 0;
    for id in ChannelId::ALL {
        if sink.channel_exists(id) {
            tracing::debug!(channel = %id, "notification channel already present");
            continue;
        }
        sink.create_channel(&id.spec());
        created += 1;
    }
    tracing::info!(created, "notification channels provisioned");
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use parking_lot::Mutex;

    #[derive(Default)]
    struct CountingSink {
        channels: Mutex<HashMap<ChannelId, usize>>,
    }

    impl NotificationSink for CountingSink {
        fn channel_exists(&self, id: ChannelId) -> bool {
            self.channels.lock().contains_key(&id)
        }

        fn create_channel(&self, spec: &ChannelSpec) {
            *self.channels.lock().entry(spec.id).or_default() += 1;
        }

        fn post(&self, _notification: NotificationRequest) {}

        fn cancel(&self, _slot: i32) {}
    }

    #[test]
    fn heads_up_uses_push_with_full_alert() {
        let selection = select_channel(true, false);
        assert_eq!(selection.channel, ChannelId::Push);
        assert_eq!(selection.priority, Priority::High);
        assert_eq!(selection.alert, Alert::Full);
        assert!(selection.auto_cancel);
    }

    #[test]
    fn ongoing_heads_up_stays_on_push_but_is_sticky() {
        let selection = select_channel(true, true);
        assert_eq!(selection.channel, ChannelId::Push);
        assert_eq!(selection.priority, Priority::High);
        assert_eq!(selection.alert, Alert::Full);
        assert!(selection.ongoing);
        assert!(!selection.auto_cancel);
    }

    #[test]
    fn ongoing_ticker_is_silent_and_sticky() {
        let selection = select_channel(false, true);
        assert_eq!(selection.channel, ChannelId::Persistent);
        assert_eq!(selection.priority, Priority::Min);
        assert_eq!(selection.alert, Alert::Channel);
        assert!(selection.ongoing);
        assert!(!selection.auto_cancel);
    }

    #[test]
    fn plain_notice_is_dismissible() {
        let selection = select_channel(false, false);
        assert_eq!(selection.channel, ChannelId::Persistent);
        assert_eq!(selection.priority, Priority::Default);
        assert!(!selection.ongoing);
        assert!(selection.auto_cancel);
    }

    #[test]
    fn every_flag_pair_picks_a_known_channel() {
        for heads_up in [false, true] {
            for ongoing in [false, true] {
                let selection = select_channel(heads_up, ongoing);
                assert!(ChannelId::ALL.contains(&selection.channel));
                assert_ne!(selection.channel, ChannelId::Service);
                assert_eq!(selection.channel == ChannelId::Push, heads_up);
            }
        }
    }

    #[test]
    fn schedule_changed_is_always_push_high() {
        let request = NotificationRequest::schedule_changed();
        assert_eq!(request.slot(), 1);
        assert_eq!(request.selection.channel, ChannelId::Push);
        assert_eq!(request.selection.priority, Priority::High);
        assert_eq!(request.selection.alert, Alert::Full);
    }

    #[test]
    fn service_notification_lives_on_the_service_channel() {
        let request = NotificationRequest::service();
        assert_eq!(request.slot(), 2);
        assert_eq!(request.selection.channel, ChannelId::Service);
        assert_eq!(request.selection.priority, Priority::Min);
        assert!(request.selection.ongoing);
        assert_eq!(request.category.as_deref(), Some("service"));
    }

    #[test]
    fn slots_round_trip_and_unknown_slots_are_rejected() {
        for kind in [
            NotificationKind::Lesson,
            NotificationKind::ScheduleChanged,
            NotificationKind::Service,
        ] {
            assert_eq!(NotificationKind::try_from(kind.slot()).unwrap(), kind);
        }
        assert!(matches!(
            NotificationKind::try_from(7),
            Err(ScheduleError::UnknownNotificationKind(7))
        ));
    }

    #[test]
    fn provisioning_twice_creates_each_channel_once() {
        let sink = CountingSink::default();
        assert_eq!(provision_channels(&sink), 3);
        assert_eq!(provision_channels(&sink), 0);
        let channels = sink.channels.lock();
        assert_eq!(channels.len(), 3);
        assert!(channels.values().all(|count| *count == 1));
    }
}
