//! `flannel-charm hook`: run one hook against the real host.

use anyhow::{Context, Result};
use clap::Args;
use tracing::Instrument;

use crate::app::{AppContext, OutputMode};
use crate::application::services::hook::{HookOutcome, HookReport, run_hook};
use crate::domain::{Hook, HookError};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::HostFs;
use crate::infra::juju::JujuHost;

#[derive(Args)]
pub struct HookArgs {
    /// Hook to run, e.g. `config-changed` (defaults to JUJU_HOOK_NAME)
    pub name: Option<String>,
}

/// Pick the hook from the command line, falling back to `JUJU_HOOK_NAME`.
///
/// # Errors
///
/// Returns [`HookError::Unspecified`] when neither names a hook, and
/// [`HookError::Unknown`] for a name the charm does not handle.
pub fn resolve(explicit: Option<&str>, from_env: Option<&str>) -> Result<Hook, HookError> {
    explicit
        .or(from_env)
        .ok_or(HookError::Unspecified)?
        .parse()
}

/// Run the hook command.
///
/// # Errors
///
/// Returns an error if no valid hook is named or the hook cannot complete.
pub async fn run(app: &AppContext, args: &HookArgs) -> Result<()> {
    let hook = resolve(args.name.as_deref(), app.env.hook_name())?;
    execute(app, hook).await
}

/// Run `hook` with production adapters and report the result.
///
/// # Errors
///
/// Returns an error if flags cannot be persisted or the orchestrator cannot be
/// reached. Handler failures are reported through the unit status instead.
pub async fn execute(app: &AppContext, hook: Hook) -> Result<()> {
    let unit = app.env.juju_unit_name.as_deref().unwrap_or("-");
    let span = tracing::info_span!("hook", %hook, unit);

    let host = JujuHost::new(TokioCommandRunner::default(), app.layout.etcdctl());
    let store = app.flag_store();
    let report = run_hook(hook, &host, &HostFs, &store, &app.layout)
        .instrument(span)
        .await
        .with_context(|| format!("running {hook} hook"))?;

    render(app, &report)
}

fn render(app: &AppContext, report: &HookReport) -> Result<()> {
    match app.mode {
        OutputMode::Json => {
            println!("{}", to_json(report)?);
        }
        OutputMode::Human => {
            app.output.header(&report.hook.to_string());
            match &report.outcome {
                HookOutcome::TornDown(teardown) => {
                    for path in &teardown.removed {
                        app.output.kv("removed", &path.display().to_string());
                    }
                    for failure in &teardown.failures {
                        app.output.warn(failure);
                    }
                }
                HookOutcome::Dispatched(dispatch) => {
                    if dispatch.ran.is_empty() {
                        app.output.info("nothing to do");
                    }
                    for handler in &dispatch.ran {
                        match &dispatch.failure {
                            Some(f) if f.handler == *handler => app
                                .output
                                .error(&format!("{} failed: {}", handler.name(), f.error)),
                            _ => app.output.success(handler.name()),
                        }
                    }
                }
            }
            let flags: Vec<&str> = report.flags.iter().map(|f| f.as_str()).collect();
            app.output.kv("flags", &flags.join(" "));
        }
    }
    Ok(())
}

fn to_json(report: &HookReport) -> Result<String> {
    let flags: Vec<&str> = report.flags.iter().map(|f| f.as_str()).collect();
    let doc = match &report.outcome {
        HookOutcome::TornDown(teardown) => serde_json::json!({
            "hook": report.hook.to_string(),
            "removed": teardown.removed,
            "failures": teardown.failures,
            "flags": flags,
        }),
        HookOutcome::Dispatched(dispatch) => {
            let ran: Vec<&str> = dispatch.ran.iter().map(|h| h.name()).collect();
            let failure = dispatch.failure.as_ref().map(|f| {
                serde_json::json!({ "handler": f.handler.name(), "error": f.error })
            });
            serde_json::json!({
                "hook": report.hook.to_string(),
                "ran": ran,
                "failure": failure,
                "flags": flags,
            })
        }
    };
    serde_json::to_string_pretty(&doc).context("JSON serialization failed")
}
