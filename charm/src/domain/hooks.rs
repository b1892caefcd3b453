//! Hook names delivered by the orchestrator.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::HookError;

/// A lifecycle event. Relation hooks carry the endpoint they fired on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Install,
    ConfigChanged,
    Start,
    Stop,
    UpgradeCharm,
    UpdateStatus,
    LeaderElected,
    LeaderSettingsChanged,
    Relation(Endpoint, RelationEvent),
}

/// Relation endpoints declared by the charm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Etcd,
    Cni,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationEvent {
    Joined,
    Changed,
    Departed,
    Broken,
}

impl Endpoint {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Etcd => "etcd",
            Endpoint::Cni => "cni",
        }
    }
}

impl RelationEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RelationEvent::Joined => "joined",
            RelationEvent::Changed => "changed",
            RelationEvent::Departed => "departed",
            RelationEvent::Broken => "broken",
        }
    }
}

impl Hook {
    /// Every hook the charm answers to; used to install `hooks/` symlinks.
    pub const ALL: [Hook; 16] = [
        Hook::Install,
        Hook::ConfigChanged,
        Hook::Start,
        Hook::Stop,
        Hook::UpgradeCharm,
        Hook::UpdateStatus,
        Hook::LeaderElected,
        Hook::LeaderSettingsChanged,
        Hook::Relation(Endpoint::Etcd, RelationEvent::Joined),
        Hook::Relation(Endpoint::Etcd, RelationEvent::Changed),
        Hook::Relation(Endpoint::Etcd, RelationEvent::Departed),
        Hook::Relation(Endpoint::Etcd, RelationEvent::Broken),
        Hook::Relation(Endpoint::Cni, RelationEvent::Joined),
        Hook::Relation(Endpoint::Cni, RelationEvent::Changed),
        Hook::Relation(Endpoint::Cni, RelationEvent::Departed),
        Hook::Relation(Endpoint::Cni, RelationEvent::Broken),
    ];

    /// `stop` tears the deployment down instead of dispatching handlers.
    #[must_use]
    pub fn is_teardown(self) -> bool {
        self == Hook::Stop
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Install => f.write_str("install"),
            Hook::ConfigChanged => f.write_str("config-changed"),
            Hook::Start => f.write_str("start"),
            Hook::Stop => f.write_str("stop"),
            Hook::UpgradeCharm => f.write_str("upgrade-charm"),
            Hook::UpdateStatus => f.write_str("update-status"),
            Hook::LeaderElected => f.write_str("leader-elected"),
            Hook::LeaderSettingsChanged => f.write_str("leader-settings-changed"),
            Hook::Relation(endpoint, event) => {
                write!(f, "{}-relation-{}", endpoint.as_str(), event.as_str())
            }
        }
    }
}

impl FromStr for Hook {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hook::ALL
            .into_iter()
            .find(|h| h.to_string() == s)
            .ok_or_else(|| HookError::Unknown(s.to_string()))
    }
}
