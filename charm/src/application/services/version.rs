//! Workload version reporting.

use anyhow::{Context, Result};
use flannel_common::{Flag, FlagSet};

use crate::application::ports::{CharmHost, LocalFs, LogLevel};
use crate::application::services::{Charm, log};
use crate::domain::parse_flannel_version;

/// Surface the installed flanneld version to the orchestrator.
///
/// Unparseable output is logged and the step retried on the next hook.
///
/// # Errors
///
/// Returns an error if flanneld cannot be run or the version cannot be set.
pub async fn set_flannel_version(
    charm: &Charm<'_, impl CharmHost, impl LocalFs>,
    flags: &mut FlagSet,
) -> Result<()> {
    charm.maintenance("Setting flannel version.").await?;
    let output = charm
        .host
        .flanneld_version(&charm.layout.flanneld())
        .await
        .context("running flanneld -version")?;

    let Some(version) = parse_flannel_version(&output) else {
        log(
            charm.host,
            LogLevel::Warning,
            &format!("Unable to parse flanneld version from {output:?}"),
        )
        .await;
        return Ok(());
    };
    charm.host.application_version_set(&version).await?;
    flags.set(Flag::VersionSet);
    Ok(())
}
