//! Terminal status handlers.

use anyhow::Result;
use flannel_common::WorkloadStatus;

use crate::application::ports::HookTools;

pub const ACTIVE: &str = "Flannel is active.";
pub const WAITING_FOR_ETCD: &str = "Waiting for etcd relation.";

/// Report the unit as active.
///
/// # Errors
///
/// Returns an error if `status-set` fails.
pub async fn ready(host: &impl HookTools) -> Result<()> {
    host.status_set(&WorkloadStatus::active(ACTIVE)).await
}

/// Tell the operator the unit is waiting on etcd.
///
/// # Errors
///
/// Returns an error if `status-set` fails.
pub async fn halt_execution(host: &impl HookTools) -> Result<()> {
    host.status_set(&WorkloadStatus::waiting(WAITING_FOR_ETCD))
        .await
}
