//! flannel charm - hook executable and operator CLI

use clap::Parser;
use flannel_charm::app::{AppContext, OutputFlags};
use flannel_charm::cli::{Cli, hook_from_argv0};
use flannel_charm::commands;
use flannel_charm::domain::Hook;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Invoked through a `hooks/<name>` symlink: no CLI parsing, no stdout chatter.
async fn run_as_hook(hook: Hook) -> anyhow::Result<()> {
    let app = AppContext::new(&OutputFlags {
        no_color: true,
        quiet: true,
        json: false,
    })?;
    commands::hook::execute(&app, hook).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let argv0 = std::env::args().next().unwrap_or_default();
    let result = match hook_from_argv0(&argv0) {
        Some(hook) => run_as_hook(hook).await,
        None => Cli::parse().run().await,
    };
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
