/// Fixed host paths, relative to the filesystem root.
///
/// Callers join these onto a root prefix (`/` in production) so the installer
/// can run against a scratch directory.
pub mod host {
    /// Directory holding `flanneld` and `etcdctl`.
    pub const LOCAL_BIN: &str = "usr/local/bin";

    /// Directory holding the CNI plugins.
    pub const CNI_BIN: &str = "opt/cni/bin";

    /// Directory holding the etcd client TLS material.
    pub const ETCD_CERT_DIR: &str = "etc/ssl/flannel";

    /// Rendered systemd unit.
    pub const SYSTEMD_UNIT: &str = "lib/systemd/system/flannel.service";

    /// Legacy unit path removed on teardown.
    pub const SYSTEMD_LEGACY_UNIT: &str = "lib/systemd/system/flannel";

    /// Rendered CNI config.
    pub const CNI_CONFIG: &str = "etc/cni/net.d/10-flannel.conf";

    /// Subnet lease file written by `flanneld` at runtime.
    pub const SUBNET_ENV: &str = "var/run/flannel/subnet.env";
}

/// TLS file names inside [`host::ETCD_CERT_DIR`].
pub mod tls {
    pub const CLIENT_KEY: &str = "client-key.pem";
    pub const CLIENT_CERT: &str = "client-cert.pem";
    pub const CLIENT_CA: &str = "client-ca.pem";
}

/// Names shared with the orchestrator and the daemon.
pub mod names {
    /// Charm resource holding the binary bundle.
    pub const RESOURCE: &str = "flannel";

    /// systemd service name.
    pub const SERVICE: &str = "flannel";

    /// VXLAN interface created by `flanneld`.
    pub const VXLAN_IFACE: &str = "flannel.1";

    /// etcd key holding the overlay network config.
    pub const NETWORK_CONFIG_KEY: &str = "/coreos.com/network/config";

    /// Relation endpoint providing etcd.
    pub const ETCD_ENDPOINT: &str = "etcd";

    /// Relation endpoint towards the Kubernetes control plane / workers.
    pub const CNI_ENDPOINT: &str = "cni";
}

/// Minimum plausible size of the binary bundle, in bytes.
pub const MIN_RESOURCE_SIZE: u64 = 1_000_000;
