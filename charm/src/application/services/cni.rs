//! CNI plugin configuration and readiness signalling.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use flannel_common::{Flag, FlagSet};

use crate::application::ports::{CharmHost, LocalFs};
use crate::application::services::Charm;
use crate::application::services::relations::set_cni_available;
use crate::domain::artifacts::cni_config;

/// Write `10-flannel.conf` so the container runtime delegates to flannel.
///
/// # Errors
///
/// Returns an error if the config file cannot be written.
pub async fn configure_cni(
    charm: &Charm<'_, impl CharmHost, impl LocalFs>,
    flags: &mut FlagSet,
) -> Result<()> {
    let path = charm.layout.cni_config();
    charm
        .fs
        .write(&path, cni_config().as_bytes(), 0o644)
        .with_context(|| format!("writing {}", path.display()))?;
    flags.set(Flag::CniConfigured);
    Ok(())
}

/// Tell the Kubernetes side that the CNI provider is ready.
///
/// # Errors
///
/// Returns an error if `relation-set` fails.
pub async fn set_available(
    charm: &Charm<'_, impl CharmHost, impl LocalFs>,
    flags: &mut FlagSet,
) -> Result<()> {
    set_cni_available(charm.host, &charm.relations.cni).await?;
    flags.set(Flag::CniAvailable);
    Ok(())
}
