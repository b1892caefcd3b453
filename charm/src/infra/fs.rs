//! Filesystem infrastructure: implements `LocalFs` on the real host.

use std::fs::File;
use std::io::{BufReader, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tempfile::NamedTempFile;

use crate::application::ports::LocalFs;

/// Production filesystem.
pub struct HostFs;

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}

fn set_mode(path: &Path, mode: u32) -> Result<()> {
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("setting permissions on {}", path.display()))
}

impl LocalFs for HostFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        Ok(std::fs::metadata(path)
            .with_context(|| format!("reading metadata of {}", path.display()))?
            .len())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    fn write(&self, path: &Path, content: &[u8], mode: u32) -> Result<()> {
        create_parent(path)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        // Permissions are applied before the rename so secrets are never
        // readable under their final name.
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        tmp.write_all(content)
            .with_context(|| format!("writing temp file for {}", path.display()))?;
        set_mode(tmp.path(), mode)?;
        tmp.persist(path)
            .with_context(|| format!("finalizing {}", path.display()))?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).with_context(|| format!("removing file {}", path.display()))
    }

    fn unpack_tar_gz(&self, archive: &Path, dest: &Path) -> Result<()> {
        let file =
            File::open(archive).with_context(|| format!("opening {}", archive.display()))?;
        std::fs::create_dir_all(dest)
            .with_context(|| format!("creating directory {}", dest.display()))?;
        let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        tar.set_preserve_permissions(true);
        tar.unpack(dest)
            .with_context(|| format!("extracting {} to {}", archive.display(), dest.display()))
    }

    fn install_executable(&self, src: &Path, dest: &Path) -> Result<()> {
        create_parent(dest)?;
        let dir = dest.parent().unwrap_or_else(|| Path::new("."));
        // A running binary cannot be opened for writing; replace it by rename.
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        let mut source =
            File::open(src).with_context(|| format!("opening {}", src.display()))?;
        std::io::copy(&mut source, &mut tmp)
            .with_context(|| format!("copying {} to {}", src.display(), dest.display()))?;
        set_mode(tmp.path(), 0o755)?;
        tmp.persist(dest)
            .with_context(|| format!("finalizing {}", dest.display()))?;
        Ok(())
    }
}
