//! `flannel-charm flags`: inspect and edit the persisted charm flags.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use flannel_common::{Flag, FlagSet};

use crate::app::{AppContext, OutputMode};
use crate::application::ports::FlagStore;
use crate::output::json;

#[derive(Args)]
pub struct FlagsArgs {
    #[command(subcommand)]
    pub action: Option<FlagsAction>,
}

#[derive(Subcommand)]
pub enum FlagsAction {
    /// Forget one flag so its step runs again on the next hook
    Clear {
        /// Charm flag to clear
        flag: Flag,
    },
}

/// Run the flags command.
///
/// # Errors
///
/// Returns an error if the flag file cannot be read or written.
pub fn run(app: &AppContext, args: &FlagsArgs) -> Result<()> {
    let store = app.flag_store();
    let path = store.path().display().to_string();
    match &args.action {
        None => {
            let flags = store.load()?;
            render_list(app, &path, &flags)
        }
        Some(FlagsAction::Clear { flag }) => {
            let cleared = clear_flag(&store, *flag)?;
            match app.mode {
                OutputMode::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "flag": flag.as_str(),
                        "cleared": cleared,
                    }))
                    .context("JSON serialization failed")?
                ),
                OutputMode::Human if cleared => app.output.success(&format!("cleared {flag}")),
                OutputMode::Human => app.output.info(&format!("{flag} was not set")),
            }
            Ok(())
        }
    }
}

/// Remove `flag` from the store. Returns whether it was set.
///
/// # Errors
///
/// Returns an error if the store cannot be loaded or saved.
pub fn clear_flag(store: &impl FlagStore, flag: Flag) -> Result<bool> {
    let mut flags = store.load()?;
    if !flags.clear(flag) {
        return Ok(false);
    }
    store.save(&flags)?;
    Ok(true)
}

fn render_list(app: &AppContext, path: &str, flags: &FlagSet) -> Result<()> {
    match app.mode {
        OutputMode::Json => println!("{}", json::format_flags(path, flags)?),
        OutputMode::Human => {
            app.output.header(path);
            if flags.is_empty() {
                app.output.info("no flags set");
            }
            for flag in flags.iter() {
                app.output.success(flag.as_str());
            }
        }
    }
    Ok(())
}
