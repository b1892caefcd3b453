//! Rendered artifact content, pure functions, no I/O, no async.
//!
//! Each function returns the file content as a `String`. The caller is
//! responsible for writing to disk.

#![allow(clippy::format_push_string)]

use std::path::Path;

use anyhow::{Context, Result};
use flannel_common::NetworkConfig;
use flannel_common::paths::tls;

/// Inputs for the `flannel.service` unit.
pub struct UnitParams<'a> {
    /// Absolute path of the installed `flanneld`.
    pub flanneld: &'a Path,
    /// Interface flanneld binds to.
    pub iface: &'a str,
    /// etcd endpoints, as published on the etcd relation.
    pub connection_string: &'a str,
    /// Directory holding the client TLS material.
    pub cert_dir: &'a Path,
}

/// Generate `flannel.service` content.
///
/// Returns the unit file string, does NOT write to disk.
#[must_use]
pub fn flannel_unit(params: &UnitParams<'_>) -> String {
    let UnitParams {
        flanneld,
        iface,
        connection_string,
        cert_dir,
    } = params;
    let cert = cert_dir.join(tls::CLIENT_CERT);
    let key = cert_dir.join(tls::CLIENT_KEY);
    let ca = cert_dir.join(tls::CLIENT_CA);

    let mut out = String::new();
    out.push_str("# Generated by the flannel charm - DO NOT EDIT\n");
    out.push_str("[Unit]\n");
    out.push_str("Description=Flannel Overlay Network\n");
    out.push_str("Documentation=https://github.com/coreos/flannel\n");
    out.push_str("Requires=network-online.target\n");
    out.push_str("After=network-online.target\n");
    out.push('\n');
    out.push_str("[Service]\n");
    out.push_str(&format!(
        "ExecStart={} -iface={iface} -etcd-endpoints={connection_string} \
         -etcd-certfile={} -etcd-keyfile={} -etcd-cafile={}\n",
        flanneld.display(),
        cert.display(),
        key.display(),
        ca.display(),
    ));
    out.push_str("TimeoutStartSec=0\n");
    out.push_str("Restart=on-failure\n");
    out.push_str("LimitNOFILE=65536\n");
    out.push('\n');
    out.push_str("[Install]\n");
    out.push_str("WantedBy=multi-user.target\n");

    out
}

/// Generate `10-flannel.conf`: the CNI network config delegating to the
/// flannel plugin.
#[must_use]
pub fn cni_config() -> String {
    let conf = serde_json::json!({
        "name": "flannel",
        "type": "flannel",
    });
    format!("{conf:#}\n")
}

/// Serialize the etcd value for `/coreos.com/network/config`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn network_config_json(cidr: &str) -> Result<String> {
    serde_json::to_string(&NetworkConfig::vxlan(cidr)).context("serializing network config")
}
