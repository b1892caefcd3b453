//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Resource errors ───────────────────────────────────────────────────────────

/// Problems with the `flannel` charm resource.
///
/// The `Display` strings are the exact status messages shown to operators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Error fetching the flannel resource.")]
    FetchFailed,

    #[error("Missing flannel resource.")]
    Missing,

    #[error("Incomplete flannel resource")]
    Incomplete { size: u64 },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to charm option validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid cidr configuration: {0}")]
    InvalidCidr(String),
}

// ── Hook errors ───────────────────────────────────────────────────────────────

/// Errors related to resolving which hook is running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HookError {
    #[error("Unknown hook: {0}")]
    Unknown(String),

    #[error("No hook name given. Pass one explicitly or set JUJU_HOOK_NAME.")]
    Unspecified,
}
