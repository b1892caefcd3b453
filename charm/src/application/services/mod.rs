//! Application services: use-case orchestration.
//!
//! Each service module implements one step of the install sequence by
//! composing domain logic with port trait calls. Services import only from
//! `crate::domain` and `crate::application::ports`, never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

pub mod cni;
pub mod etcd;
pub mod hook;
pub mod install;
pub mod reactor;
pub mod relations;
pub mod status;
pub mod teardown;
pub mod unit;
pub mod version;

#[cfg(test)]
pub(crate) mod test_support;

use std::fmt::Display;

use anyhow::Result;
use flannel_common::WorkloadStatus;

use crate::application::ports::{CharmHost, HookTools, LocalFs, LogLevel};
use crate::application::services::relations::Relations;
use crate::domain::Layout;

/// Everything a handler needs for one dispatch.
pub struct Charm<'a, H, F> {
    pub host: &'a H,
    pub fs: &'a F,
    pub layout: &'a Layout,
    /// Relation data observed at the start of the hook.
    pub relations: &'a Relations,
}

impl<H: CharmHost, F: LocalFs> Charm<'_, H, F> {
    /// Log `message` and report it as a blocked status.
    pub(crate) async fn block(&self, message: impl Display) -> Result<()> {
        let message = message.to_string();
        log(self.host, LogLevel::Warning, &message).await;
        self.host
            .status_set(&WorkloadStatus::blocked(message))
            .await
    }

    pub(crate) async fn maintenance(&self, message: &str) -> Result<()> {
        self.host
            .status_set(&WorkloadStatus::maintenance(message))
            .await
    }
}

/// Send `message` to the unit log.
///
/// A failing `juju-log` is traced and otherwise ignored; logging never aborts
/// a step.
pub(crate) async fn log(host: &impl HookTools, level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!("{message}"),
        LogLevel::Info => tracing::info!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Error => tracing::error!("{message}"),
    }
    if let Err(err) = host.log(level, message).await {
        tracing::warn!(error = %format!("{err:#}"), "juju-log failed");
    }
}
