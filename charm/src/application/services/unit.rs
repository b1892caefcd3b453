//! flannel systemd unit: render, install, start.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use flannel_common::paths::names;
use flannel_common::{Flag, FlagSet};

use crate::application::ports::{CharmHost, LocalFs};
use crate::application::services::Charm;
use crate::domain::artifacts::{UnitParams, flannel_unit};
use crate::domain::default_interface;

/// Status shown when neither the `iface` option nor a default route names an
/// interface.
pub const NO_INTERFACE: &str = "Unable to determine the default network interface.";

/// Render `flannel.service` for the configured (or default-route) interface.
///
/// # Errors
///
/// Returns an error if `route` fails, the unit cannot be written, or systemd
/// cannot reload.
pub async fn install_flannel_service(
    charm: &Charm<'_, impl CharmHost, impl LocalFs>,
    flags: &mut FlagSet,
) -> Result<()> {
    let Some(connection_string) = charm.relations.etcd.connection_string.as_deref() else {
        tracing::debug!("no etcd connection string published yet");
        return Ok(());
    };
    charm.maintenance("Installing flannel service.").await?;

    let config = charm.host.config_get().await?;
    let iface = match config.iface() {
        Some(iface) => iface.to_string(),
        None => {
            let routes = charm.host.route_table().await.context("reading routes")?;
            match default_interface(&routes) {
                Some(iface) => iface,
                None => return charm.block(NO_INTERFACE).await,
            }
        }
    };

    let layout = charm.layout;
    let flanneld = layout.flanneld();
    let cert_dir = layout.etcd_cert_dir();
    let unit = flannel_unit(&UnitParams {
        flanneld: &flanneld,
        iface: &iface,
        connection_string,
        cert_dir: &cert_dir,
    });
    let path = layout.systemd_unit();
    charm
        .fs
        .write(&path, unit.as_bytes(), 0o644)
        .with_context(|| format!("writing {}", path.display()))?;
    charm.host.daemon_reload().await?;
    tracing::info!(%iface, unit = %path.display(), "flannel service installed");

    flags.set(Flag::ServiceInstalled);
    Ok(())
}

/// Start `flannel.service`.
///
/// # Errors
///
/// Returns an error if systemd fails to start the unit.
pub async fn start_flannel_service(
    charm: &Charm<'_, impl CharmHost, impl LocalFs>,
    flags: &mut FlagSet,
) -> Result<()> {
    charm.maintenance("Starting flannel service.").await?;
    charm
        .host
        .start(names::SERVICE)
        .await
        .context("starting flannel service")?;
    flags.set(Flag::ServiceStarted);
    Ok(())
}
