//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `flannel_common`, never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use flannel_common::{FlagSet, WorkloadStatus};

use crate::domain::CharmConfig;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Orchestrator Ports ────────────────────────────────────────────────────────

/// Severity passed to `juju-log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Hook tools for status, logging, resources, and options.
#[allow(async_fn_in_trait)]
pub trait HookTools {
    /// Report workload status.
    async fn status_set(&self, status: &WorkloadStatus) -> Result<()>;
    /// Write a line to the unit log.
    async fn log(&self, level: LogLevel, message: &str) -> Result<()>;
    /// Fetch a charm resource.
    ///
    /// Returns `Ok(None)` when the resource has not been provided.
    ///
    /// # Errors
    ///
    /// Returns an error if the orchestrator cannot be asked at all.
    async fn resource_get(&self, name: &str) -> Result<Option<PathBuf>>;
    /// Read the charm options.
    async fn config_get(&self) -> Result<CharmConfig>;
    /// Publish the workload version.
    async fn application_version_set(&self, version: &str) -> Result<()>;
}

/// Relation data access.
#[allow(async_fn_in_trait)]
pub trait RelationData {
    /// Relation ids established on `endpoint`.
    async fn relation_ids(&self, endpoint: &str) -> Result<Vec<String>>;
    /// Remote units participating in `relation_id`.
    async fn relation_list(&self, relation_id: &str) -> Result<Vec<String>>;
    /// Settings published by `unit` on `relation_id`.
    async fn relation_get(&self, relation_id: &str, unit: &str)
    -> Result<BTreeMap<String, String>>;
    /// Publish settings from this unit on `relation_id`.
    async fn relation_set(&self, relation_id: &str, settings: &[(&str, &str)]) -> Result<()>;
}

// ── Host Ports ────────────────────────────────────────────────────────────────

/// Host service manager (systemd).
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    async fn start(&self, service: &str) -> Result<()>;
    async fn stop(&self, service: &str) -> Result<()>;
    /// Reload unit files after one was written.
    async fn daemon_reload(&self) -> Result<()>;
}

/// Host network inspection and link management.
#[allow(async_fn_in_trait)]
pub trait HostNetwork {
    /// Raw output of `route`.
    async fn route_table(&self) -> Result<String>;
    async fn link_down(&self, iface: &str) -> Result<()>;
    async fn link_delete(&self, iface: &str) -> Result<()>;
}

/// TLS client material for `etcdctl`.
pub struct EtcdctlTls<'a> {
    pub endpoint: &'a str,
    pub cert_file: &'a Path,
    pub key_file: &'a Path,
    pub ca_file: &'a Path,
}

/// etcd writes through the installed `etcdctl`.
#[allow(async_fn_in_trait)]
pub trait Etcdctl {
    async fn set(&self, tls: &EtcdctlTls<'_>, key: &str, value: &str) -> Result<()>;
}

/// Version probe for the installed daemon.
#[allow(async_fn_in_trait)]
pub trait FlannelProbe {
    /// Combined stdout and stderr of `flanneld -version`.
    async fn flanneld_version(&self, flanneld: &Path) -> Result<String>;
}

/// Composite trait: everything a handler may ask of the orchestrator and host.
pub trait CharmHost:
    HookTools + RelationData + ServiceManager + HostNetwork + Etcdctl + FlannelProbe
{
}

/// Blanket implementation: any type implementing all sub-traits is a `CharmHost`.
impl<T> CharmHost for T where
    T: HookTools + RelationData + ServiceManager + HostNetwork + Etcdctl + FlannelProbe
{
}

// ── Filesystem and State Ports ────────────────────────────────────────────────

/// Abstracts local filesystem operations.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    /// Size of the file at `path` in bytes.
    fn file_size(&self, path: &Path) -> Result<u64>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Write `content` to `path`, creating parents, then apply `mode`.
    fn write(&self, path: &Path, content: &[u8], mode: u32) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    /// Extract a gzip-compressed tarball into `dest`.
    fn unpack_tar_gz(&self, archive: &Path, dest: &Path) -> Result<()>;
    /// Copy `src` to `dest` as an executable, creating parent directories.
    fn install_executable(&self, src: &Path, dest: &Path) -> Result<()>;
}

/// Abstracts persistence of charm flags between hook invocations.
pub trait FlagStore {
    /// Load persisted flags; an absent store yields an empty set.
    fn load(&self) -> Result<FlagSet>;
    /// Persist `flags`. Relation flags are dropped.
    fn save(&self, flags: &FlagSet) -> Result<()>;
}
