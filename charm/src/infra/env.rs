//! Hook environment, loaded from process variables via `envy`.
//!
//! Recognised variables:
//!   - `CHARM_DIR`           (charm root; defaults to the working directory)
//!   - `JUJU_HOOK_NAME`      (hook being run, when not given on the command line)
//!   - `JUJU_UNIT_NAME`      (unit identity, used in log context only)
//!   - `FLANNEL_CHARM_ROOT`  (prefix for host paths; defaults to `/`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::Layout;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookEnv {
    pub charm_dir: Option<PathBuf>,
    pub juju_hook_name: Option<String>,
    pub juju_unit_name: Option<String>,
    pub flannel_charm_root: Option<PathBuf>,
}

impl HookEnv {
    /// # Errors
    ///
    /// Returns an error if a variable is present but not valid unicode.
    pub fn from_env() -> Result<Self> {
        envy::from_env().context("reading hook environment")
    }

    /// Hook name from `JUJU_HOOK_NAME`, ignoring a blank value.
    #[must_use]
    pub fn hook_name(&self) -> Option<&str> {
        self.juju_hook_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        let root = self
            .flannel_charm_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("/"));
        let charm_dir = self
            .charm_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        Layout::new(root, charm_dir)
    }
}
