//! Command-backed implementation of the orchestrator and host ports.
//!
//! Every port method maps to one hook tool or host utility. A non-zero exit
//! is an error carrying the tool's stderr, except for `resource-get` where it
//! means the resource has not been attached.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::{Context, Result};
use flannel_common::WorkloadStatus;
use serde::de::DeserializeOwned;

use crate::application::ports::{
    CommandRunner, Etcdctl, EtcdctlTls, FlannelProbe, HookTools, HostNetwork, LogLevel,
    RelationData, ServiceManager,
};
use crate::domain::CharmConfig;
use crate::infra::command_runner::SLOW_CMD_TIMEOUT;

/// Orchestrator and host access through subprocesses.
pub struct JujuHost<R> {
    runner: R,
    etcdctl: PathBuf,
}

impl<R: CommandRunner> JujuHost<R> {
    /// `etcdctl` is the binary installed from the flannel resource.
    pub fn new(runner: R, etcdctl: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            etcdctl: etcdctl.into(),
        }
    }

    async fn call(&self, program: &str, args: &[&str]) -> Result<Output> {
        let output = self.runner.run(program, args).await?;
        check(program, output)
    }

    async fn call_slow(&self, program: &str, args: &[&str]) -> Result<Output> {
        let output = self
            .runner
            .run_with_timeout(program, args, SLOW_CMD_TIMEOUT)
            .await?;
        check(program, output)
    }

    async fn json<T: DeserializeOwned>(&self, program: &str, args: &[&str]) -> Result<T> {
        let output = self.call(program, args).await?;
        serde_json::from_slice(&output.stdout)
            .with_context(|| format!("parsing {program} output"))
    }
}

fn check(program: &str, output: Output) -> Result<Output> {
    if output.status.success() {
        return Ok(output);
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("{program} failed ({}): {}", output.status, stderr.trim())
}

/// Relation settings as strings; non-string JSON values keep their JSON text.
fn stringify(settings: BTreeMap<String, serde_json::Value>) -> BTreeMap<String, String> {
    settings
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => (k, s),
            other => (k, other.to_string()),
        })
        .collect()
}

impl<R: CommandRunner> HookTools for JujuHost<R> {
    async fn status_set(&self, status: &WorkloadStatus) -> Result<()> {
        self.call("status-set", &[status.state.as_str(), status.message.as_str()])
            .await?;
        Ok(())
    }

    async fn log(&self, level: LogLevel, message: &str) -> Result<()> {
        self.call("juju-log", &["-l", level.as_str(), message]).await?;
        Ok(())
    }

    async fn resource_get(&self, name: &str) -> Result<Option<PathBuf>> {
        let output = self
            .runner
            .run("resource-get", &[name])
            .await
            .with_context(|| format!("fetching resource {name}"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(resource = name, stderr = stderr.trim(), "resource not attached");
            return Ok(None);
        }
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!path.is_empty()).then(|| PathBuf::from(path)))
    }

    async fn config_get(&self) -> Result<CharmConfig> {
        self.json("config-get", &["--format=json"]).await
    }

    async fn application_version_set(&self, version: &str) -> Result<()> {
        self.call("application-version-set", &[version]).await?;
        Ok(())
    }
}

impl<R: CommandRunner> RelationData for JujuHost<R> {
    async fn relation_ids(&self, endpoint: &str) -> Result<Vec<String>> {
        let ids: Option<Vec<String>> = self
            .json("relation-ids", &[endpoint, "--format=json"])
            .await?;
        Ok(ids.unwrap_or_default())
    }

    async fn relation_list(&self, relation_id: &str) -> Result<Vec<String>> {
        let units: Option<Vec<String>> = self
            .json("relation-list", &["-r", relation_id, "--format=json"])
            .await?;
        Ok(units.unwrap_or_default())
    }

    async fn relation_get(
        &self,
        relation_id: &str,
        unit: &str,
    ) -> Result<BTreeMap<String, String>> {
        let settings: Option<BTreeMap<String, serde_json::Value>> = self
            .json("relation-get", &["-r", relation_id, "--format=json", "-", unit])
            .await?;
        Ok(settings.map(stringify).unwrap_or_default())
    }

    async fn relation_set(&self, relation_id: &str, settings: &[(&str, &str)]) -> Result<()> {
        let pairs: Vec<String> = settings.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let mut args = vec!["-r", relation_id];
        args.extend(pairs.iter().map(String::as_str));
        self.call("relation-set", &args).await?;
        Ok(())
    }
}

impl<R: CommandRunner> ServiceManager for JujuHost<R> {
    async fn start(&self, service: &str) -> Result<()> {
        self.call_slow("systemctl", &["start", service]).await?;
        Ok(())
    }

    async fn stop(&self, service: &str) -> Result<()> {
        self.call_slow("systemctl", &["stop", service]).await?;
        Ok(())
    }

    async fn daemon_reload(&self) -> Result<()> {
        self.call_slow("systemctl", &["daemon-reload"]).await?;
        Ok(())
    }
}

impl<R: CommandRunner> HostNetwork for JujuHost<R> {
    async fn route_table(&self) -> Result<String> {
        let output = self.call("route", &[]).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn link_down(&self, iface: &str) -> Result<()> {
        self.call("ip", &["link", "set", iface, "down"]).await?;
        Ok(())
    }

    async fn link_delete(&self, iface: &str) -> Result<()> {
        self.call("ip", &["link", "delete", iface]).await?;
        Ok(())
    }
}

impl<R: CommandRunner> Etcdctl for JujuHost<R> {
    async fn set(&self, tls: &EtcdctlTls<'_>, key: &str, value: &str) -> Result<()> {
        let program = self.etcdctl.to_string_lossy();
        let cert = tls.cert_file.to_string_lossy();
        let key_file = tls.key_file.to_string_lossy();
        let ca = tls.ca_file.to_string_lossy();
        self.call_slow(
            &program,
            &[
                "--endpoint",
                tls.endpoint,
                "--cert-file",
                &*cert,
                "--key-file",
                &*key_file,
                "--ca-file",
                &*ca,
                "set",
                key,
                value,
            ],
        )
        .await?;
        Ok(())
    }
}

impl<R: CommandRunner> FlannelProbe for JujuHost<R> {
    async fn flanneld_version(&self, flanneld: &Path) -> Result<String> {
        let program = flanneld.to_string_lossy();
        let output = self.call(&program, &["-version"]).await?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(combined)
    }
}
