//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod hooks;
pub mod layout;
pub mod route;
pub mod version;

pub use config::{CharmConfig, validate_cidr};
pub use error::{ConfigError, HookError, ResourceError};
pub use hooks::Hook;
pub use layout::{BinaryInstall, Layout};
pub use route::default_interface;
pub use version::parse_flannel_version;
