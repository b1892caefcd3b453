//! Where everything the charm touches lives on disk.

use std::path::{Path, PathBuf};

use flannel_common::paths::{host, tls};

/// File name of the persisted charm flags inside the charm directory.
pub const FLAGS_FILE: &str = ".flannel-flags.json";

/// One binary from the resource bundle and where it is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryInstall {
    /// File name inside the unpacked bundle.
    pub name: &'static str,
    /// Absolute install path.
    pub dest: PathBuf,
}

/// Filesystem layout rooted at `root` (`/` in production).
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    charm_dir: PathBuf,
}

impl Layout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, charm_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            charm_dir: charm_dir.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn charm_dir(&self) -> &Path {
        &self.charm_dir
    }

    fn host(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Scratch directory the resource bundle is unpacked into.
    #[must_use]
    pub fn unpack_dir(&self) -> PathBuf {
        self.charm_dir.join("files").join("flannel")
    }

    #[must_use]
    pub fn flags_file(&self) -> PathBuf {
        self.charm_dir.join(FLAGS_FILE)
    }

    #[must_use]
    pub fn flanneld(&self) -> PathBuf {
        self.host(host::LOCAL_BIN).join("flanneld")
    }

    #[must_use]
    pub fn etcdctl(&self) -> PathBuf {
        self.host(host::LOCAL_BIN).join("etcdctl")
    }

    #[must_use]
    pub fn etcd_cert_dir(&self) -> PathBuf {
        self.host(host::ETCD_CERT_DIR)
    }

    #[must_use]
    pub fn client_key(&self) -> PathBuf {
        self.etcd_cert_dir().join(tls::CLIENT_KEY)
    }

    #[must_use]
    pub fn client_cert(&self) -> PathBuf {
        self.etcd_cert_dir().join(tls::CLIENT_CERT)
    }

    #[must_use]
    pub fn client_ca(&self) -> PathBuf {
        self.etcd_cert_dir().join(tls::CLIENT_CA)
    }

    #[must_use]
    pub fn systemd_unit(&self) -> PathBuf {
        self.host(host::SYSTEMD_UNIT)
    }

    #[must_use]
    pub fn cni_config(&self) -> PathBuf {
        self.host(host::CNI_CONFIG)
    }

    #[must_use]
    pub fn subnet_env(&self) -> PathBuf {
        self.host(host::SUBNET_ENV)
    }

    /// The five binaries shipped in the resource bundle, in install order.
    #[must_use]
    pub fn binaries(&self) -> Vec<BinaryInstall> {
        let local_bin = self.host(host::LOCAL_BIN);
        let cni_bin = self.host(host::CNI_BIN);
        vec![
            BinaryInstall { name: "flanneld", dest: local_bin.join("flanneld") },
            BinaryInstall { name: "etcdctl", dest: local_bin.join("etcdctl") },
            BinaryInstall { name: "flannel", dest: cni_bin.join("flannel") },
            BinaryInstall { name: "bridge", dest: cni_bin.join("bridge") },
            BinaryInstall { name: "host-local", dest: cni_bin.join("host-local") },
        ]
    }

    /// Files removed when the unit stops.
    ///
    /// `etcdctl` and the CNI plugins are shared with other charms on the
    /// machine and are left in place.
    #[must_use]
    pub fn teardown_files(&self) -> Vec<PathBuf> {
        vec![
            self.flanneld(),
            self.host(host::SYSTEMD_LEGACY_UNIT),
            self.systemd_unit(),
            self.client_key(),
            self.client_cert(),
            self.client_ca(),
            self.subnet_env(),
        ]
    }
}
