//! Argument construction and output parsing for `JujuHost`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use flannel_charm::application::ports::{
    Etcdctl, EtcdctlTls, FlannelProbe, HookTools, HostNetwork, LogLevel, RelationData,
    ServiceManager,
};
use flannel_charm::infra::juju::JujuHost;
use flannel_common::{StatusState, WorkloadStatus};

use crate::helpers::{ScriptedRunner, err_output, ok_output};

const ETCDCTL: &str = "/usr/local/bin/etcdctl";

fn host(runner: &ScriptedRunner) -> JujuHost<ScriptedRunner> {
    JujuHost::new(runner.clone(), ETCDCTL)
}

#[tokio::test]
async fn test_status_set_passes_state_and_message() {
    let runner = ScriptedRunner::always("");
    host(&runner)
        .status_set(&WorkloadStatus::new(StatusState::Blocked, "Missing flannel resource."))
        .await
        .unwrap();
    assert_eq!(
        runner.calls(),
        vec![(
            "status-set".to_string(),
            vec!["blocked".to_string(), "Missing flannel resource.".to_string()]
        )]
    );
}

#[tokio::test]
async fn test_juju_log_passes_level() {
    let runner = ScriptedRunner::always("");
    host(&runner).log(LogLevel::Error, "boom").await.unwrap();
    assert_eq!(runner.lines(), vec!["juju-log -l ERROR boom"]);
}

#[tokio::test]
async fn test_resource_get_returns_trimmed_path() {
    let runner = ScriptedRunner::always("/var/lib/juju/resources/flannel/flannel.tar.gz\n");
    let path = host(&runner).resource_get("flannel").await.unwrap();
    assert_eq!(
        path,
        Some(PathBuf::from("/var/lib/juju/resources/flannel/flannel.tar.gz"))
    );
    assert_eq!(runner.lines(), vec!["resource-get flannel"]);
}

#[tokio::test]
async fn test_resource_get_non_zero_exit_means_missing() {
    let runner = ScriptedRunner::new(|_, _| Ok(err_output(1, b"resource not found")));
    assert_eq!(host(&runner).resource_get("flannel").await.unwrap(), None);
}

#[tokio::test]
async fn test_resource_get_empty_output_means_missing() {
    let runner = ScriptedRunner::always("  \n");
    assert_eq!(host(&runner).resource_get("flannel").await.unwrap(), None);
}

#[tokio::test]
async fn test_resource_get_spawn_failure_is_an_error() {
    let runner = ScriptedRunner::new(|p, _| anyhow::bail!("failed to spawn {p}"));
    let err = host(&runner).resource_get("flannel").await.unwrap_err();
    assert!(format!("{err:#}").contains("fetching resource flannel"), "got: {err:#}");
}

#[tokio::test]
async fn test_config_get_parses_json_with_nulls() {
    let runner = ScriptedRunner::always(r#"{"cidr":"10.2.0.0/16","iface":null}"#);
    let config = host(&runner).config_get().await.unwrap();
    assert_eq!(config.cidr(), "10.2.0.0/16");
    assert_eq!(config.iface(), None);
    assert_eq!(runner.lines(), vec!["config-get --format=json"]);
}

#[tokio::test]
async fn test_relation_listing_parses_arrays() {
    let runner = ScriptedRunner::new(|program, _| {
        let body: &[u8] = match program {
            "relation-ids" => br#"["etcd:4"]"#,
            "relation-list" => br#"["etcd/0","etcd/1"]"#,
            _ => b"null",
        };
        Ok(ok_output(body))
    });
    let host = host(&runner);

    assert_eq!(host.relation_ids("etcd").await.unwrap(), vec!["etcd:4"]);
    assert_eq!(
        host.relation_list("etcd:4").await.unwrap(),
        vec!["etcd/0", "etcd/1"]
    );
    assert_eq!(
        runner.lines(),
        vec![
            "relation-ids etcd --format=json",
            "relation-list -r etcd:4 --format=json",
        ]
    );
}

#[tokio::test]
async fn test_relation_ids_null_is_empty() {
    let runner = ScriptedRunner::always("null");
    assert!(host(&runner).relation_ids("cni").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_relation_get_stringifies_values() {
    let runner = ScriptedRunner::always(
        r#"{"connection_string":"https://10.0.0.5:2379","port":2379,"egress-subnets":null}"#,
    );
    let settings = host(&runner).relation_get("etcd:4", "etcd/0").await.unwrap();
    assert_eq!(settings["connection_string"], "https://10.0.0.5:2379");
    assert_eq!(settings["port"], "2379");
    assert!(!settings.contains_key("egress-subnets"));
    assert_eq!(
        runner.lines(),
        vec!["relation-get -r etcd:4 --format=json - etcd/0"]
    );
}

#[tokio::test]
async fn test_relation_set_formats_pairs() {
    let runner = ScriptedRunner::always("");
    host(&runner)
        .relation_set("cni:2", &[("available", "True")])
        .await
        .unwrap();
    assert_eq!(runner.lines(), vec!["relation-set -r cni:2 available=True"]);
}

#[tokio::test]
async fn test_systemctl_uses_slow_timeout() {
    let runner = ScriptedRunner::always("");
    host(&runner).start("flannel").await.unwrap();
    assert_eq!(runner.lines(), vec!["systemctl start flannel"]);
    assert_eq!(runner.last_timeout(), Some(Duration::from_secs(120)));
}

#[tokio::test]
async fn test_non_zero_exit_carries_stderr() {
    let runner = ScriptedRunner::new(|_, _| {
        Ok(err_output(5, b"Job for flannel.service failed.\n"))
    });
    let err = host(&runner).start("flannel").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("systemctl failed"), "got: {msg}");
    assert!(msg.contains("Job for flannel.service failed."), "got: {msg}");
}

#[tokio::test]
async fn test_link_management_commands() {
    let runner = ScriptedRunner::always("");
    let host = host(&runner);
    host.link_down("flannel.1").await.unwrap();
    host.link_delete("flannel.1").await.unwrap();
    host.daemon_reload().await.unwrap();
    assert_eq!(
        runner.lines(),
        vec![
            "ip link set flannel.1 down",
            "ip link delete flannel.1",
            "systemctl daemon-reload",
        ]
    );
}

#[tokio::test]
async fn test_route_table_returns_stdout() {
    let runner = ScriptedRunner::always("default via 10.0.0.1 dev ens4\n");
    let routes = host(&runner).route_table().await.unwrap();
    assert_eq!(routes, "default via 10.0.0.1 dev ens4\n");
    assert_eq!(runner.lines(), vec!["route"]);
}

#[tokio::test]
async fn test_etcdctl_set_passes_tls_material() {
    let runner = ScriptedRunner::always("");
    let tls = EtcdctlTls {
        endpoint: "https://10.0.0.5:2379",
        cert_file: Path::new("/etc/ssl/flannel/client-cert.pem"),
        key_file: Path::new("/etc/ssl/flannel/client-key.pem"),
        ca_file: Path::new("/etc/ssl/flannel/client-ca.pem"),
    };
    host(&runner)
        .set(&tls, "/coreos.com/network/config", "{}")
        .await
        .unwrap();

    let calls = runner.calls();
    assert_eq!(calls[0].0, ETCDCTL);
    assert_eq!(
        calls[0].1,
        [
            "--endpoint",
            "https://10.0.0.5:2379",
            "--cert-file",
            "/etc/ssl/flannel/client-cert.pem",
            "--key-file",
            "/etc/ssl/flannel/client-key.pem",
            "--ca-file",
            "/etc/ssl/flannel/client-ca.pem",
            "set",
            "/coreos.com/network/config",
            "{}",
        ]
    );
    assert_eq!(runner.last_timeout(), Some(Duration::from_secs(120)));
}

#[tokio::test]
async fn test_flanneld_version_combines_streams() {
    let runner = ScriptedRunner::new(|_, _| {
        let mut out = ok_output(b"");
        out.stderr = b"v0.7.0\n".to_vec();
        Ok(out)
    });
    let output = host(&runner)
        .flanneld_version(Path::new("/usr/local/bin/flanneld"))
        .await
        .unwrap();
    assert_eq!(output, "v0.7.0\n");
    assert_eq!(runner.lines(), vec!["/usr/local/bin/flanneld -version"]);
}
