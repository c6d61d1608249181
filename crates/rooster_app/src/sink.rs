use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use rooster_core::{
    channels::{ChannelId, ChannelSpec},
    notifications::{NotificationRequest, NotificationSink},
};
use tracing::{debug, info};

#[derive(Default)]
struct Inner {
    channels: RwLock<HashSet<ChannelId>>,
    slots: RwLock<BTreeMap<i32, NotificationRequest>>,
    history: RwLock<Vec<NotificationRequest>>,
}

/// Desktop stand-in for the platform notification manager: keeps the visible
/// notification per slot and logs every change.
#[derive(Clone, Default)]
pub struct LogSink {
    inner: Arc<Inner>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Vec<NotificationRequest> {
        self.inner.slots.read().values().cloned().collect()
    }

    /// Every notification posted so far, oldest first.
    pub fn history(&self) -> Vec<NotificationRequest> {
        self.inner.history.read().clone()
    }

    pub fn channel_count(&self) -> usize {
        self.inner.channels.read().len()
    }
}

impl NotificationSink for LogSink {
    fn channel_exists(&self, id: ChannelId) -> bool {
        self.inner.channels.read().contains(&id)
    }

    fn create_channel(&self, spec: &ChannelSpec) {
        // Concurrent provisioning may race here; inserting twice is harmless.
        if self.inner.channels.write().insert(spec.id) {
            info!(channel = %spec.id, importance = ?spec.importance, "channel created");
        }
    }

    fn post(&self, notification: NotificationRequest) {
        info!(
            slot = notification.slot(),
            channel = %notification.selection.channel,
            priority = ?notification.selection.priority,
            ongoing = notification.selection.ongoing,
            body = %notification.body,
            "notification posted"
        );
        self.inner.history.write().push(notification.clone());
        self.inner
            .slots
            .write()
            .insert(notification.slot(), notification);
    }

    fn cancel(&self, slot: i32) {
        if self.inner.slots.write().remove(&slot).is_some() {
            debug!(slot, "notification cancelled");
        }
    }
}
