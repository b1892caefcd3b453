//! Relation observation: turns remote relation data into relation flags.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::collections::BTreeMap;

use anyhow::Result;
use flannel_common::paths::names;
use flannel_common::{Flag, FlagSet};

use crate::application::ports::RelationData;

/// TLS client material published by etcd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub key: String,
    pub cert: String,
    pub ca: String,
}

impl ClientCredentials {
    /// Build from relation settings; `None` unless all three are present.
    #[must_use]
    pub fn from_settings(settings: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            key: non_empty(settings, "client_key")?,
            cert: non_empty(settings, "client_cert")?,
            ca: non_empty(settings, "client_ca")?,
        })
    }
}

/// What the etcd endpoint currently offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EtcdRelation {
    pub connected: bool,
    pub connection_string: Option<String>,
    pub credentials: Option<ClientCredentials>,
}

/// What the cni endpoint currently offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CniRelation {
    pub relation_ids: Vec<String>,
    pub connected: bool,
    /// Remote `is_master` setting; `None` until published.
    pub is_master: Option<bool>,
}

/// Snapshot of both endpoints taken at the start of a hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relations {
    pub etcd: EtcdRelation,
    pub cni: CniRelation,
}

impl Relations {
    /// Relation flags implied by this snapshot.
    #[must_use]
    pub fn flags(&self) -> FlagSet {
        let mut flags = FlagSet::new();
        if self.etcd.connected {
            flags.set(Flag::EtcdConnected);
        }
        if self.etcd.connection_string.is_some() {
            flags.set(Flag::EtcdAvailable);
        }
        if self.etcd.credentials.is_some() {
            flags.set(Flag::EtcdTlsAvailable);
        }
        if self.cni.connected {
            flags.set(Flag::CniConnected);
        }
        match self.cni.is_master {
            Some(true) => flags.set(Flag::CniIsMaster),
            Some(false) => flags.set(Flag::CniIsWorker),
            None => false,
        };
        flags
    }
}

fn non_empty(settings: &BTreeMap<String, String>, key: &str) -> Option<String> {
    settings
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Read both endpoints.
///
/// # Errors
///
/// Returns an error if a relation hook tool fails.
pub async fn observe(rel: &impl RelationData) -> Result<Relations> {
    Ok(Relations {
        etcd: observe_etcd(rel).await?,
        cni: observe_cni(rel).await?,
    })
}

async fn observe_etcd(rel: &impl RelationData) -> Result<EtcdRelation> {
    let mut etcd = EtcdRelation::default();
    for rid in rel.relation_ids(names::ETCD_ENDPOINT).await? {
        for unit in rel.relation_list(&rid).await? {
            etcd.connected = true;
            let settings = rel.relation_get(&rid, &unit).await?;
            if etcd.connection_string.is_none() {
                etcd.connection_string = non_empty(&settings, "connection_string");
            }
            if etcd.credentials.is_none() {
                etcd.credentials = ClientCredentials::from_settings(&settings);
            }
        }
    }
    Ok(etcd)
}

async fn observe_cni(rel: &impl RelationData) -> Result<CniRelation> {
    let mut cni = CniRelation {
        relation_ids: rel.relation_ids(names::CNI_ENDPOINT).await?,
        ..CniRelation::default()
    };
    for rid in &cni.relation_ids {
        for unit in rel.relation_list(rid).await? {
            cni.connected = true;
            if cni.is_master.is_none() {
                let settings = rel.relation_get(rid, &unit).await?;
                cni.is_master = settings.get("is_master").and_then(|v| parse_bool(v));
            }
        }
    }
    Ok(cni)
}

/// Tell every related Kubernetes unit that the CNI provider is ready.
///
/// # Errors
///
/// Returns an error if `relation-set` fails.
pub async fn set_cni_available(rel: &impl RelationData, cni: &CniRelation) -> Result<()> {
    for rid in &cni.relation_ids {
        rel.relation_set(rid, &[("available", "True")]).await?;
    }
    Ok(())
}
