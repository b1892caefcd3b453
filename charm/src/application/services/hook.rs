//! One hook invocation end to end: load flags, observe relations, dispatch,
//! persist.

use anyhow::{Context, Result};
use flannel_common::FlagSet;

use crate::application::ports::{CharmHost, FlagStore, LocalFs};
use crate::application::services::reactor::{DispatchReport, dispatch};
use crate::application::services::relations::observe;
use crate::application::services::teardown::{
    TeardownReport, cleanup_deployment, reset_for_upgrade,
};
use crate::application::services::Charm;
use crate::domain::{Hook, Layout};

/// What a hook run did.
#[derive(Debug)]
pub enum HookOutcome {
    Dispatched(DispatchReport),
    TornDown(TeardownReport),
}

#[derive(Debug)]
pub struct HookReport {
    pub hook: Hook,
    pub outcome: HookOutcome,
    /// Flags held once the hook finished, relation flags included.
    pub flags: FlagSet,
}

/// Run `hook` against the host.
///
/// Handler failures are reported through the workload status and surface in
/// the returned report; they do not make this function fail.
///
/// # Errors
///
/// Returns an error if flags cannot be loaded or saved, relation data cannot
/// be read, or a handler failure cannot be reported.
pub async fn run_hook(
    hook: Hook,
    host: &impl CharmHost,
    fs: &impl LocalFs,
    store: &impl FlagStore,
    layout: &Layout,
) -> Result<HookReport> {
    tracing::info!(%hook, "running hook");
    let mut flags = store.load().context("loading charm flags")?;

    if hook.is_teardown() {
        let report = cleanup_deployment(host, fs, layout).await;
        store
            .save(&FlagSet::new())
            .context("clearing charm flags")?;
        return Ok(HookReport {
            hook,
            outcome: HookOutcome::TornDown(report),
            flags: FlagSet::new(),
        });
    }

    if hook == Hook::UpgradeCharm {
        reset_for_upgrade(&mut flags);
    }

    let relations = observe(host).await.context("reading relation data")?;
    flags.replace_relation_flags(&relations.flags());

    let charm = Charm {
        host,
        fs,
        layout,
        relations: &relations,
    };
    let report = dispatch(&charm, &mut flags).await;
    // Flags raised before a failure are kept even if reporting it failed.
    store.save(&flags).context("saving charm flags")?;
    let report = report?;
    tracing::info!(%hook, ran = report.ran.len(), failed = report.failure.is_some(), "hook finished");

    Ok(HookReport {
        hook,
        outcome: HookOutcome::Dispatched(report),
        flags,
    })
}
