//! Binary installation from the `flannel` charm resource.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use flannel_common::paths::{MIN_RESOURCE_SIZE, names};
use flannel_common::{Flag, FlagSet};

use crate::application::ports::{CharmHost, LocalFs, LogLevel};
use crate::application::services::{Charm, log};
use crate::domain::ResourceError;

/// Reject bundles too small to hold the five binaries.
fn check_resource_size(size: u64) -> Result<(), ResourceError> {
    if size < MIN_RESOURCE_SIZE {
        return Err(ResourceError::Incomplete { size });
    }
    Ok(())
}

/// Unpack the resource bundle and install each binary to its fixed path.
///
/// A missing, unfetchable, or undersized resource blocks the unit and leaves
/// `flannel.binaries.installed` lowered.
///
/// # Errors
///
/// Returns an error if unpacking or installing a binary fails.
pub async fn install_flannel_binaries(
    charm: &Charm<'_, impl CharmHost, impl LocalFs>,
    flags: &mut FlagSet,
) -> Result<()> {
    let archive = match charm.host.resource_get(names::RESOURCE).await {
        Ok(Some(path)) => path,
        Ok(None) => return charm.block(ResourceError::Missing).await,
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "resource-get failed");
            return charm.block(ResourceError::FetchFailed).await;
        }
    };

    let size = charm
        .fs
        .file_size(&archive)
        .with_context(|| format!("reading size of {}", archive.display()))?;
    if let Err(err) = check_resource_size(size) {
        tracing::warn!(size, min = MIN_RESOURCE_SIZE, "flannel resource too small");
        return charm.block(err).await;
    }

    charm.maintenance("Unpacking flannel resource.").await?;
    let unpack_dir = charm.layout.unpack_dir();
    charm.fs.create_dir_all(&unpack_dir)?;
    log(
        charm.host,
        LogLevel::Info,
        &format!("Unpacking {} into {}", archive.display(), unpack_dir.display()),
    )
    .await;
    charm.fs.unpack_tar_gz(&archive, &unpack_dir)?;

    for bin in charm.layout.binaries() {
        let src = unpack_dir.join(bin.name);
        charm
            .fs
            .install_executable(&src, &bin.dest)
            .with_context(|| format!("installing {}", bin.name))?;
        tracing::info!(binary = bin.name, dest = %bin.dest.display(), "installed");
    }

    flags.set(Flag::BinariesInstalled);
    Ok(())
}
