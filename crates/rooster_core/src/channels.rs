use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

const PUSH_CHANNEL_ID: &str = "nl.rooster.notification.push";
const PERSISTENT_CHANNEL_ID: &str = "nl.rooster.notification.persistent";
const SERVICE_CHANNEL_ID: &str = "nl.rooster.notification.service";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChannelId {
    /// Schedule changes and heads-up lesson alerts.
    Push,
    /// The low-key ticker for the current or next lesson.
    Persistent,
    /// Keeps the background refresh alive.
    Service,
}

impl ChannelId {
    pub const ALL: [ChannelId; 3] = [ChannelId::Push, ChannelId::Persistent, ChannelId::Service];

    pub fn as_str(self) -> &'static str {
        match self {
            ChannelId::Push => PUSH_CHANNEL_ID,
            ChannelId::Persistent => PERSISTENT_CHANNEL_ID,
            ChannelId::Service => SERVICE_CHANNEL_ID,
        }
    }

    pub fn spec(self) -> ChannelSpec {
        match self {
            ChannelId::Push => ChannelSpec {
                id: self,
                name: "Push notifications",
                description: "Alerts for schedule changes and lessons that are about to start",
                importance: Importance::High,
                lights: true,
                vibration: true,
                show_badge: true,
                lockscreen: LockscreenVisibility::Public,
                sound: Sound::Default,
            },
            ChannelId::Persistent => ChannelSpec {
                id: self,
                name: "Persistent notification",
                description: "Shows the current or next lesson",
                importance: Importance::Min,
                lights: false,
                vibration: false,
                show_badge: false,
                lockscreen: LockscreenVisibility::Public,
                sound: Sound::Silent,
            },
            ChannelId::Service => ChannelSpec {
                id: self,
                name: "Background service",
                description: "Required to keep lesson notifications up to date",
                importance: Importance::Min,
                lights: false,
                vibration: false,
                show_badge: false,
                lockscreen: LockscreenVisibility::Secret,
                sound: Sound::Silent,
            },
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelId {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ScheduleError::UnknownChannel(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Min,
    Low,
    Default,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LockscreenVisibility {
    Public,
    Private,
    Secret,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    Default,
    Silent,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChannelSpec {
    pub id: ChannelId,
    pub name: &'static str,
    pub description: &'static str,
    pub importance: Importance,
    pub lights: bool,
    pub vibration: bool,
    pub show_badge: bool,
    pub lockscreen: LockscreenVisibility,
    pub sound: Sound,
}

pub fn all_channels() -> Vec<ChannelSpec> {
    ChannelId::ALL.into_iter().map(ChannelId::spec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_channel_is_the_only_loud_one() {
        for spec in all_channels() {
            let loud = spec.importance == Importance::High;
            assert_eq!(loud, spec.id == ChannelId::Push, "{:?}", spec.id);
            assert_eq!(spec.lights, loud);
            assert_eq!(spec.vibration, loud);
            assert_eq!(spec.show_badge, loud);
            assert_eq!(spec.sound == Sound::Default, loud);
        }
    }

    #[test]
    fn service_channel_is_hidden_from_the_lockscreen() {
        assert_eq!(
            ChannelId::Service.spec().lockscreen,
            LockscreenVisibility::Secret
        );
        assert_eq!(
            ChannelId::Persistent.spec().lockscreen,
            LockscreenVisibility::Public
        );
        assert_eq!(
            ChannelId::Push.spec().lockscreen,
            LockscreenVisibility::Public
        );
    }

    #[test]
    fn channel_ids_parse_back_and_reject_strangers() {
        for id in ChannelId::ALL {
            assert_eq!(id.as_str().parse::<ChannelId>().unwrap(), id);
        }
        let err = "nl.rooster.notification.unknown"
            .parse::<ChannelId>()
            .unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownChannel(_)));
    }
}
