//! Teardown on `stop` and flag reset on `upgrade-charm`.
//!
//! Nothing here escalates: every failure is logged and the next step runs.

use std::path::PathBuf;

use flannel_common::paths::names;
use flannel_common::{Flag, FlagSet};

use crate::application::ports::{CharmHost, LocalFs, LogLevel};
use crate::application::services::log;
use crate::domain::Layout;

/// What the teardown managed to do.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Files that existed and were removed.
    pub removed: Vec<PathBuf>,
    /// Human-readable descriptions of steps that failed.
    pub failures: Vec<String>,
}

impl TeardownReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Stop the daemon, remove its VXLAN interface, and delete the deployed files.
pub async fn cleanup_deployment(
    host: &impl CharmHost,
    fs: &impl LocalFs,
    layout: &Layout,
) -> TeardownReport {
    let mut report = TeardownReport::default();

    if let Err(err) = host.stop(names::SERVICE).await {
        let msg = format!("Unable to stop {}: {err:#}", names::SERVICE);
        log(host, LogLevel::Warning, &msg).await;
        report.failures.push(msg);
    }

    let iface = names::VXLAN_IFACE;
    let link = match host.link_down(iface).await {
        Ok(()) => host.link_delete(iface).await,
        Err(err) => Err(err),
    };
    if let Err(err) = link {
        tracing::debug!(error = %format!("{err:#}"), iface, "link removal failed");
        log(host, LogLevel::Warning, &format!("Unable to remove iface {iface}")).await;
        log(
            host,
            LogLevel::Warning,
            "Potential indication that cleanup is not possible",
        )
        .await;
        report.failures.push(format!("Unable to remove iface {iface}"));
    }

    for path in layout.teardown_files() {
        if !fs.exists(&path) {
            continue;
        }
        log(host, LogLevel::Info, &format!("Removing {}", path.display())).await;
        match fs.remove_file(&path) {
            Ok(()) => report.removed.push(path),
            Err(err) => {
                let msg = format!("Unable to remove {}: {err:#}", path.display());
                log(host, LogLevel::Warning, &msg).await;
                report.failures.push(msg);
            }
        }
    }

    report
}

/// Forget the installed binaries so the new resource is unpacked and its
/// version re-reported.
pub fn reset_for_upgrade(flags: &mut FlagSet) {
    flags.clear(Flag::BinariesInstalled);
    flags.clear(Flag::VersionSet);
}
