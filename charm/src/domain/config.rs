//! Charm options and their validators.
//!
//! Pure functions only, no I/O, no async, no filesystem access.

use std::net::Ipv4Addr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Overlay network used when the operator leaves `cidr` unset.
pub const DEFAULT_CIDR: &str = "10.1.0.0/16";

// ── Config schema ────────────────────────────────────────────────────────────

/// Charm options as returned by `config-get --format=json`.
///
/// Juju emits `null` for options without a value, so both fields are
/// optional on the wire and normalised by the accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharmConfig {
    /// Overlay network CIDR handed to flannel through etcd.
    pub cidr: Option<String>,
    /// Interface flanneld binds to. Empty means "use the default route".
    pub iface: Option<String>,
}

impl CharmConfig {
    /// Configured CIDR, or [`DEFAULT_CIDR`].
    #[must_use]
    pub fn cidr(&self) -> &str {
        match self.cidr.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_CIDR,
        }
    }

    /// Configured interface, `None` when unset or blank.
    #[must_use]
    pub fn iface(&self) -> Option<&str> {
        self.iface
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates an IPv4 network in `a.b.c.d/n` form.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidCidr`] if the address or prefix is malformed.
pub fn validate_cidr(cidr: &str) -> Result<()> {
    let invalid = || ConfigError::InvalidCidr(cidr.to_string());
    let (addr, prefix) = cidr.split_once('/').ok_or_else(invalid)?;
    addr.parse::<Ipv4Addr>().map_err(|_| invalid())?;
    let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
    if prefix > 32 {
        return Err(invalid().into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
