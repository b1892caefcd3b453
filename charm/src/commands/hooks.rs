//! `flannel-charm hooks link`: point every hook name at this executable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::{AppContext, OutputMode};
use crate::domain::Hook;

#[derive(Subcommand)]
pub enum HooksCommand {
    /// Create a symlink per hook in DIR pointing at the charm binary
    Link {
        /// Charm hooks directory
        #[arg(default_value = "hooks")]
        dir: PathBuf,

        /// Executable the links point to (defaults to this binary)
        #[arg(long)]
        target: Option<PathBuf>,
    },
}

/// Run the hooks command.
///
/// # Errors
///
/// Returns an error if the current executable cannot be located or a link
/// cannot be created.
pub fn run(app: &AppContext, cmd: &HooksCommand) -> Result<()> {
    match cmd {
        HooksCommand::Link { dir, target } => {
            let target = match target {
                Some(t) => t.clone(),
                None => std::env::current_exe().context("locating current executable")?,
            };
            let links = link_hooks(dir, &target)?;
            match app.mode {
                OutputMode::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "target": target,
                        "links": links,
                    }))
                    .context("JSON serialization failed")?
                ),
                OutputMode::Human => app.output.success(&format!(
                    "linked {} hooks in {} to {}",
                    links.len(),
                    dir.display(),
                    target.display()
                )),
            }
            Ok(())
        }
    }
}

/// Create `dir/<hook>` symlinks to `target` for every handled hook,
/// replacing entries already there.
///
/// # Errors
///
/// Returns an error if `dir` cannot be created or an entry cannot be replaced.
pub fn link_hooks(dir: &Path, target: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut links = Vec::with_capacity(Hook::ALL.len());
    for hook in Hook::ALL {
        let link = dir.join(hook.to_string());
        if link.symlink_metadata().is_ok() {
            std::fs::remove_file(&link)
                .with_context(|| format!("removing {}", link.display()))?;
        }
        std::os::unix::fs::symlink(target, &link)
            .with_context(|| format!("linking {}", link.display()))?;
        links.push(link);
    }
    Ok(links)
}
