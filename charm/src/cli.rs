//! CLI argument parsing with clap derive

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags, OutputMode};
use crate::commands;
use crate::domain::Hook;
use crate::output::json;

/// Juju charm that installs and supervises the flannel overlay network
#[derive(Parser)]
#[command(
    name = "flannel-charm",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a hook (defaults to JUJU_HOOK_NAME)
    Hook(commands::hook::HookArgs),

    /// Inspect or edit persisted charm flags
    Flags(commands::flags::FlagsArgs),

    /// Manage hook symlinks
    #[command(subcommand)]
    Hooks(commands::hooks::HooksCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;
        let app = AppContext::new(&OutputFlags {
            no_color,
            quiet,
            json,
        })?;
        let result = match command {
            Command::Version => {
                commands::version::run(&app);
                Ok(())
            }
            Command::Hook(args) => commands::hook::run(&app, &args).await,
            Command::Flags(args) => commands::flags::run(&app, &args),
            Command::Hooks(cmd) => commands::hooks::run(&app, &cmd),
        };
        if let (OutputMode::Json, Err(e)) = (app.mode, &result) {
            println!("{}", json::format_error(&format!("{e:#}"), "COMMAND_FAILED")?);
        }
        result
    }
}

/// Hook named by the executable's file name, when invoked as `hooks/<name>`.
#[must_use]
pub fn hook_from_argv0(argv0: &str) -> Option<Hook> {
    Path::new(argv0).file_name()?.to_str()?.parse().ok()
}
