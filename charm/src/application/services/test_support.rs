//! Shared test doubles for service tests.
//!
//! `MockHost` records every orchestrator and host call as a flat string so
//! tests can assert on the exact sequence. `MemFs` is an in-memory
//! filesystem with just enough behaviour for the install steps.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::Result;
use flannel_common::{FlagSet, StatusState, WorkloadStatus};

use crate::application::ports::{
    Etcdctl, EtcdctlTls, FlagStore, FlannelProbe, HookTools, HostNetwork, LocalFs, LogLevel,
    RelationData, ServiceManager,
};
use crate::domain::{CharmConfig, Layout};

pub const RESOURCE_PATH: &str = "/resources/flannel.tar.gz";
pub const CONNECTION_STRING: &str = "https://10.0.0.5:2379";

pub const ROUTE_OUTPUT: &str = "Kernel IP routing table
Destination     Gateway         Genmask         Flags Metric Ref    Use Iface
default         10.0.0.1        0.0.0.0         UG    100    0        0 ens4
";

pub fn layout() -> Layout {
    Layout::new("/", "/charm")
}

/// What `resource-get` answers.
#[derive(Clone)]
pub enum ResourceReply {
    Path(PathBuf),
    Missing,
    Error,
}

type Units = Vec<(String, BTreeMap<String, String>)>;

pub struct MockHost {
    pub calls: RefCell<Vec<String>>,
    pub statuses: RefCell<Vec<WorkloadStatus>>,
    pub resource: ResourceReply,
    pub config: CharmConfig,
    pub route: String,
    pub version_output: String,
    relations: BTreeMap<String, Vec<(String, Units)>>,
    failing: BTreeSet<&'static str>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            statuses: RefCell::new(Vec::new()),
            resource: ResourceReply::Path(PathBuf::from(RESOURCE_PATH)),
            config: CharmConfig::default(),
            route: ROUTE_OUTPUT.to_string(),
            version_output: "v0.7.0\n".to_string(),
            relations: BTreeMap::new(),
            failing: BTreeSet::new(),
        }
    }

    /// A host with a complete etcd relation and a worker cni relation.
    pub fn related() -> Self {
        Self::new().with_etcd(true).with_cni(Some(false))
    }

    pub fn with_resource(mut self, reply: ResourceReply) -> Self {
        self.resource = reply;
        self
    }

    pub fn with_config(mut self, cidr: Option<&str>, iface: Option<&str>) -> Self {
        self.config = CharmConfig {
            cidr: cidr.map(str::to_string),
            iface: iface.map(str::to_string),
        };
        self
    }

    pub fn with_route(mut self, route: &str) -> Self {
        self.route = route.to_string();
        self
    }

    pub fn with_version_output(mut self, output: &str) -> Self {
        self.version_output = output.to_string();
        self
    }

    /// Add an etcd relation; `complete` publishes connection string and TLS.
    pub fn with_etcd(mut self, complete: bool) -> Self {
        let mut data = BTreeMap::new();
        if complete {
            data.insert("connection_string".to_string(), CONNECTION_STRING.to_string());
            data.insert("client_key".to_string(), "KEY".to_string());
            data.insert("client_cert".to_string(), "CERT".to_string());
            data.insert("client_ca".to_string(), "CA".to_string());
        }
        self.relations.insert(
            "etcd".to_string(),
            vec![("etcd:1".to_string(), vec![("etcd/0".to_string(), data)])],
        );
        self
    }

    /// Add a cni relation; `is_master` of `None` publishes nothing yet.
    pub fn with_cni(mut self, is_master: Option<bool>) -> Self {
        let mut data = BTreeMap::new();
        if let Some(master) = is_master {
            let value = if master { "True" } else { "False" };
            data.insert("is_master".to_string(), value.to_string());
        }
        self.relations.insert(
            "cni".to_string(),
            vec![(
                "cni:2".to_string(),
                vec![("kubernetes-worker/0".to_string(), data)],
            )],
        );
        self
    }

    /// Make the named operation fail.
    pub fn failing(mut self, op: &'static str) -> Self {
        self.failing.insert(op);
        self
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn check(&self, op: &'static str) -> Result<()> {
        if self.failing.contains(op) {
            anyhow::bail!("{op} failed");
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls that are not `juju-log` lines.
    pub fn actions(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("juju-log"))
            .collect()
    }

    pub fn logged(&self, needle: &str) -> bool {
        self.calls()
            .iter()
            .any(|c| c.starts_with("juju-log") && c.contains(needle))
    }

    pub fn last_status(&self) -> Option<WorkloadStatus> {
        self.statuses.borrow().last().cloned()
    }

    pub fn last_state(&self) -> Option<StatusState> {
        self.last_status().map(|s| s.state)
    }
}

impl HookTools for MockHost {
    async fn status_set(&self, status: &WorkloadStatus) -> Result<()> {
        self.record(format!("status-set {} {}", status.state, status.message));
        self.statuses.borrow_mut().push(status.clone());
        Ok(())
    }

    async fn log(&self, level: LogLevel, message: &str) -> Result<()> {
        self.record(format!("juju-log {} {message}", level.as_str()));
        Ok(())
    }

    async fn resource_get(&self, name: &str) -> Result<Option<PathBuf>> {
        self.record(format!("resource-get {name}"));
        match &self.resource {
            ResourceReply::Path(p) => Ok(Some(p.clone())),
            ResourceReply::Missing => Ok(None),
            ResourceReply::Error => anyhow::bail!("resource-get: command not found"),
        }
    }

    async fn config_get(&self) -> Result<CharmConfig> {
        Ok(self.config.clone())
    }

    async fn application_version_set(&self, version: &str) -> Result<()> {
        self.record(format!("application-version-set {version}"));
        Ok(())
    }
}

impl RelationData for MockHost {
    async fn relation_ids(&self, endpoint: &str) -> Result<Vec<String>> {
        Ok(self
            .relations
            .get(endpoint)
            .map(|rels| rels.iter().map(|(id, _)| id.clone()).collect())
            .unwrap_or_default())
    }

    async fn relation_list(&self, relation_id: &str) -> Result<Vec<String>> {
        Ok(self
            .relations
            .values()
            .flatten()
            .find(|(id, _)| id == relation_id)
            .map(|(_, units)| units.iter().map(|(u, _)| u.clone()).collect())
            .unwrap_or_default())
    }

    async fn relation_get(
        &self,
        relation_id: &str,
        unit: &str,
    ) -> Result<BTreeMap<String, String>> {
        Ok(self
            .relations
            .values()
            .flatten()
            .filter(|(id, _)| id == relation_id)
            .flat_map(|(_, units)| units.iter())
            .find(|(u, _)| u == unit)
            .map(|(_, data)| data.clone())
            .unwrap_or_default())
    }

    async fn relation_set(&self, relation_id: &str, settings: &[(&str, &str)]) -> Result<()> {
        let pairs: Vec<String> = settings.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.record(format!("relation-set {relation_id} {}", pairs.join(" ")));
        Ok(())
    }
}

impl ServiceManager for MockHost {
    async fn start(&self, service: &str) -> Result<()> {
        self.record(format!("systemctl start {service}"));
        self.check("start")
    }

    async fn stop(&self, service: &str) -> Result<()> {
        self.record(format!("systemctl stop {service}"));
        self.check("stop")
    }

    async fn daemon_reload(&self) -> Result<()> {
        self.record("systemctl daemon-reload");
        self.check("daemon_reload")
    }
}

impl HostNetwork for MockHost {
    async fn route_table(&self) -> Result<String> {
        self.record("route");
        self.check("route")?;
        Ok(self.route.clone())
    }

    async fn link_down(&self, iface: &str) -> Result<()> {
        self.record(format!("ip link set {iface} down"));
        self.check("link_down")
    }

    async fn link_delete(&self, iface: &str) -> Result<()> {
        self.record(format!("ip link delete {iface}"));
        self.check("link_delete")
    }
}

impl Etcdctl for MockHost {
    async fn set(&self, tls: &EtcdctlTls<'_>, key: &str, value: &str) -> Result<()> {
        self.record(format!("etcdctl --endpoint {} set {key} {value}", tls.endpoint));
        self.check("etcdctl")
    }
}

impl FlannelProbe for MockHost {
    async fn flanneld_version(&self, flanneld: &Path) -> Result<String> {
        self.record(format!("{} -version", flanneld.display()));
        Ok(self.version_output.clone())
    }
}

// ── In-memory filesystem ─────────────────────────────────────────────────────

/// In-memory filesystem keyed by absolute path.
pub struct MemFs {
    pub files: RefCell<BTreeMap<PathBuf, (Vec<u8>, u32)>>,
    /// Entries materialised by `unpack_tar_gz`.
    pub archive_entries: Vec<&'static str>,
    pub failing_removals: BTreeSet<PathBuf>,
}

impl MemFs {
    pub fn new() -> Self {
        Self {
            files: RefCell::new(BTreeMap::new()),
            archive_entries: vec!["flanneld", "etcdctl", "flannel", "bridge", "host-local"],
            failing_removals: BTreeSet::new(),
        }
    }

    /// A filesystem already holding a full-size resource archive.
    pub fn with_resource() -> Self {
        let fs = Self::new();
        fs.put(RESOURCE_PATH, &vec![0u8; 2_000_000]);
        fs
    }

    pub fn put(&self, path: impl Into<PathBuf>, content: &[u8]) {
        self.files
            .borrow_mut()
            .insert(path.into(), (content.to_vec(), 0o644));
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .borrow()
            .get(path.as_ref())
            .map(|(c, _)| String::from_utf8_lossy(c).into_owned())
    }

    pub fn mode(&self, path: impl AsRef<Path>) -> Option<u32> {
        self.files.borrow().get(path.as_ref()).map(|(_, m)| *m)
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl LocalFs for MemFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        self.files
            .borrow()
            .get(path)
            .map(|(c, _)| c.len() as u64)
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", path.display()))
    }

    fn create_dir_all(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn write(&self, path: &Path, content: &[u8], mode: u32) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), (content.to_vec(), mode));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        if self.failing_removals.contains(path) {
            anyhow::bail!("permission denied: {}", path.display());
        }
        self.files.borrow_mut().remove(path);
        Ok(())
    }

    fn unpack_tar_gz(&self, archive: &Path, dest: &Path) -> Result<()> {
        anyhow::ensure!(self.exists(archive), "no such archive: {}", archive.display());
        for name in &self.archive_entries {
            self.put(dest.join(name), name.as_bytes());
        }
        Ok(())
    }

    fn install_executable(&self, src: &Path, dest: &Path) -> Result<()> {
        let content = self
            .files
            .borrow()
            .get(src)
            .map(|(c, _)| c.clone())
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", src.display()))?;
        self.files
            .borrow_mut()
            .insert(dest.to_path_buf(), (content, 0o755));
        Ok(())
    }
}

/// Flag store held in memory.
#[derive(Default)]
pub struct MemFlagStore {
    pub saved: RefCell<Option<FlagSet>>,
}

impl MemFlagStore {
    pub fn with(flags: FlagSet) -> Self {
        Self {
            saved: RefCell::new(Some(flags)),
        }
    }

    pub fn saved(&self) -> FlagSet {
        self.saved.borrow().clone().unwrap_or_default()
    }
}

impl FlagStore for MemFlagStore {
    fn load(&self) -> Result<FlagSet> {
        Ok(self.saved())
    }

    fn save(&self, flags: &FlagSet) -> Result<()> {
        *self.saved.borrow_mut() = Some(flags.charm_flags());
        Ok(())
    }
}
