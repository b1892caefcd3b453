use std::fmt;

use serde::{Deserialize, Serialize};

/// Workload status states understood by `status-set`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Maintenance,
    Blocked,
    Waiting,
    Active,
}

impl StatusState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatusState::Maintenance => "maintenance",
            StatusState::Blocked => "blocked",
            StatusState::Waiting => "waiting",
            StatusState::Active => "active",
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status reported to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadStatus {
    pub state: StatusState,
    pub message: String,
}

impl WorkloadStatus {
    pub fn new(state: StatusState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }

    pub fn maintenance(message: impl Into<String>) -> Self {
        Self::new(StatusState::Maintenance, message)
    }

    pub fn blocked(message: impl Into<String>) -> Self {
        Self::new(StatusState::Blocked, message)
    }

    pub fn waiting(message: impl Into<String>) -> Self {
        Self::new(StatusState::Waiting, message)
    }

    pub fn active(message: impl Into<String>) -> Self {
        Self::new(StatusState::Active, message)
    }
}

/// Overlay backend written into etcd
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    #[default]
    Vxlan,
}

/// `Backend` object of the flannel network config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Backend {
    #[serde(rename = "Type")]
    pub kind: BackendType,
}

/// Document stored under `/coreos.com/network/config`.
///
/// Field order matters only for readability of the stored value: `Network`
/// first, then `Backend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(rename = "Network")]
    pub network: String,
    #[serde(rename = "Backend")]
    pub backend: Backend,
}

impl NetworkConfig {
    /// VXLAN overlay spanning `cidr`.
    pub fn vxlan(cidr: impl Into<String>) -> Self {
        Self {
            network: cidr.into(),
            backend: Backend::default(),
        }
    }
}
