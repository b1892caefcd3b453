//! etcd credential installation and network bootstrap.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use flannel_common::paths::names;
use flannel_common::{Flag, FlagSet};

use crate::application::ports::{CharmHost, EtcdctlTls, LocalFs, LogLevel};
use crate::application::services::{Charm, log};
use crate::domain::artifacts::network_config_json;
use crate::domain::validate_cidr;

/// Write the etcd client key, certificate, and CA into the TLS directory.
///
/// # Errors
///
/// Returns an error if a credential file cannot be written.
pub async fn install_etcd_credentials(
    charm: &Charm<'_, impl CharmHost, impl LocalFs>,
    flags: &mut FlagSet,
) -> Result<()> {
    let Some(creds) = charm.relations.etcd.credentials.as_ref() else {
        tracing::debug!("no etcd client credentials published yet");
        return Ok(());
    };
    let layout = charm.layout;
    charm.fs.create_dir_all(&layout.etcd_cert_dir())?;
    for (path, content, mode) in [
        (layout.client_key(), &creds.key, 0o600),
        (layout.client_cert(), &creds.cert, 0o644),
        (layout.client_ca(), &creds.ca, 0o644),
    ] {
        charm
            .fs
            .write(&path, content.as_bytes(), mode)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    log(
        charm.host,
        LogLevel::Info,
        &format!("Installed etcd client credentials in {}", layout.etcd_cert_dir().display()),
    )
    .await;
    flags.set(Flag::EtcdCredentialsInstalled);
    Ok(())
}

/// Store the initial overlay network config in etcd.
///
/// An invalid `cidr` option blocks the unit and leaves
/// `flannel.network.configured` lowered.
///
/// # Errors
///
/// Returns an error if options cannot be read or `etcdctl` fails.
pub async fn configure_network(
    charm: &Charm<'_, impl CharmHost, impl LocalFs>,
    flags: &mut FlagSet,
) -> Result<()> {
    let Some(endpoint) = charm.relations.etcd.connection_string.as_deref() else {
        tracing::debug!("no etcd connection string published yet");
        return Ok(());
    };
    let config = charm.host.config_get().await?;
    let cidr = config.cidr();
    if let Err(err) = validate_cidr(cidr) {
        return charm.block(err).await;
    }

    let value = network_config_json(cidr)?;
    let layout = charm.layout;
    let (cert_file, key_file, ca_file) =
        (layout.client_cert(), layout.client_key(), layout.client_ca());
    let tls = EtcdctlTls {
        endpoint,
        cert_file: &cert_file,
        key_file: &key_file,
        ca_file: &ca_file,
    };
    charm
        .host
        .set(&tls, names::NETWORK_CONFIG_KEY, &value)
        .await
        .context("writing flannel network config to etcd")?;
    tracing::info!(key = names::NETWORK_CONFIG_KEY, %value, "network config stored");

    flags.set(Flag::NetworkConfigured);
    Ok(())
}
