//! Infrastructure implementation of the `FlagStore` port.
//!
//! `JsonFlagStore` keeps the charm flags in `$CHARM_DIR/.flannel-flags.json`
//! and writes through a temp file and rename so a killed hook never leaves a
//! truncated state file behind.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flannel_common::FlagSet;

use crate::application::ports::FlagStore;

/// Flag file manager.
pub struct JsonFlagStore {
    path: PathBuf,
}

impl JsonFlagStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlagStore for JsonFlagStore {
    fn load(&self) -> Result<FlagSet> {
        if !self.path.exists() {
            return Ok(FlagSet::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading flag file {}", self.path.display()))?;
        let flags: FlagSet = serde_json::from_str(&content)
            .with_context(|| format!("parsing flag file {}", self.path.display()))?;
        Ok(flags.charm_flags())
    }

    fn save(&self, flags: &FlagSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content =
            serde_json::to_string_pretty(&flags.charm_flags()).context("serializing flags")?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing flag file {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), count = flags.charm_flags().len(), "flags saved");
        Ok(())
    }
}
