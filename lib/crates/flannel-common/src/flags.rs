use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named boolean marking a completed install step or an observed relation
/// condition.
///
/// Charm flags are persisted between hook invocations. Relation flags are
/// recomputed from relation data every time the charm runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Flag {
    #[serde(rename = "flannel.binaries.installed")]
    #[cfg_attr(feature = "clap", value(name = "flannel.binaries.installed"))]
    BinariesInstalled,
    #[serde(rename = "flannel.cni.configured")]
    #[cfg_attr(feature = "clap", value(name = "flannel.cni.configured"))]
    CniConfigured,
    #[serde(rename = "flannel.etcd.credentials.installed")]
    #[cfg_attr(feature = "clap", value(name = "flannel.etcd.credentials.installed"))]
    EtcdCredentialsInstalled,
    #[serde(rename = "flannel.service.installed")]
    #[cfg_attr(feature = "clap", value(name = "flannel.service.installed"))]
    ServiceInstalled,
    #[serde(rename = "flannel.network.configured")]
    #[cfg_attr(feature = "clap", value(name = "flannel.network.configured"))]
    NetworkConfigured,
    #[serde(rename = "flannel.service.started")]
    #[cfg_attr(feature = "clap", value(name = "flannel.service.started"))]
    ServiceStarted,
    #[serde(rename = "flannel.cni.available")]
    #[cfg_attr(feature = "clap", value(name = "flannel.cni.available"))]
    CniAvailable,
    #[serde(rename = "flannel.version.set")]
    #[cfg_attr(feature = "clap", value(name = "flannel.version.set"))]
    VersionSet,
    #[serde(rename = "etcd.connected")]
    #[cfg_attr(feature = "clap", value(skip))]
    EtcdConnected,
    #[serde(rename = "etcd.available")]
    #[cfg_attr(feature = "clap", value(skip))]
    EtcdAvailable,
    #[serde(rename = "etcd.tls.available")]
    #[cfg_attr(feature = "clap", value(skip))]
    EtcdTlsAvailable,
    #[serde(rename = "cni.connected")]
    #[cfg_attr(feature = "clap", value(skip))]
    CniConnected,
    #[serde(rename = "cni.is-master")]
    #[cfg_attr(feature = "clap", value(skip))]
    CniIsMaster,
    #[serde(rename = "cni.is-worker")]
    #[cfg_attr(feature = "clap", value(skip))]
    CniIsWorker,
}

impl Flag {
    /// Every flag, charm flags first.
    pub const ALL: [Flag; 14] = [
        Flag::BinariesInstalled,
        Flag::CniConfigured,
        Flag::EtcdCredentialsInstalled,
        Flag::ServiceInstalled,
        Flag::NetworkConfigured,
        Flag::ServiceStarted,
        Flag::CniAvailable,
        Flag::VersionSet,
        Flag::EtcdConnected,
        Flag::EtcdAvailable,
        Flag::EtcdTlsAvailable,
        Flag::CniConnected,
        Flag::CniIsMaster,
        Flag::CniIsWorker,
    ];

    /// Stable name, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::BinariesInstalled => "flannel.binaries.installed",
            Flag::CniConfigured => "flannel.cni.configured",
            Flag::EtcdCredentialsInstalled => "flannel.etcd.credentials.installed",
            Flag::ServiceInstalled => "flannel.service.installed",
            Flag::NetworkConfigured => "flannel.network.configured",
            Flag::ServiceStarted => "flannel.service.started",
            Flag::CniAvailable => "flannel.cni.available",
            Flag::VersionSet => "flannel.version.set",
            Flag::EtcdConnected => "etcd.connected",
            Flag::EtcdAvailable => "etcd.available",
            Flag::EtcdTlsAvailable => "etcd.tls.available",
            Flag::CniConnected => "cni.connected",
            Flag::CniIsMaster => "cni.is-master",
            Flag::CniIsWorker => "cni.is-worker",
        }
    }

    /// Relation flags are derived from relation data and never persisted.
    #[must_use]
    pub fn is_relation(self) -> bool {
        matches!(
            self,
            Flag::EtcdConnected
                | Flag::EtcdAvailable
                | Flag::EtcdTlsAvailable
                | Flag::CniConnected
                | Flag::CniIsMaster
                | Flag::CniIsWorker
        )
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a flag name that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown flag: {0}")]
pub struct UnknownFlag(pub String);

impl FromStr for Flag {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flag::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFlag(s.to_string()))
    }
}

/// Ordered set of raised flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet(BTreeSet<Flag>);

impl FlagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise `flag`. Returns `true` if it was not already raised.
    pub fn set(&mut self, flag: Flag) -> bool {
        self.0.insert(flag)
    }

    /// Lower `flag`. Returns `true` if it was raised.
    pub fn clear(&mut self, flag: Flag) -> bool {
        self.0.remove(&flag)
    }

    #[must_use]
    pub fn contains(&self, flag: Flag) -> bool {
        self.0.contains(&flag)
    }

    /// `true` when every flag in `flags` is raised (vacuously true when empty).
    #[must_use]
    pub fn all(&self, flags: &[Flag]) -> bool {
        flags.iter().all(|f| self.contains(*f))
    }

    /// `true` when no flag in `flags` is raised.
    #[must_use]
    pub fn none(&self, flags: &[Flag]) -> bool {
        !flags.iter().any(|f| self.contains(*f))
    }

    /// `true` when at least one flag in `flags` is raised, or `flags` is empty.
    #[must_use]
    pub fn any(&self, flags: &[Flag]) -> bool {
        flags.is_empty() || flags.iter().any(|f| self.contains(*f))
    }

    /// Drop every relation flag, keeping only what the charm owns.
    #[must_use]
    pub fn charm_flags(&self) -> FlagSet {
        FlagSet(self.0.iter().copied().filter(|f| !f.is_relation()).collect())
    }

    /// Replace every relation flag with those in `observed`.
    pub fn replace_relation_flags(&mut self, observed: &FlagSet) {
        self.0.retain(|f| !f.is_relation());
        self.0
            .extend(observed.0.iter().copied().filter(|f| f.is_relation()));
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        FlagSet(iter.into_iter().collect())
    }
}
