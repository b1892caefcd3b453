//! Ordered handler list and the dispatch loop that drives it.
//!
//! Handlers are gated on flag predicates. Each dispatch runs passes over the
//! list in order; a handler runs at most once per dispatch, and passes repeat
//! until one runs nothing.

use anyhow::Result;
use flannel_common::{Flag, FlagSet, WorkloadStatus};

use crate::application::ports::{CharmHost, LocalFs, LogLevel};
use crate::application::services::{
    Charm, cni, etcd, install, log, status, unit, version,
};

/// Flag conditions under which a handler may run.
#[derive(Debug, Clone, Copy)]
pub struct Predicate {
    /// Every flag must be raised.
    pub when: &'static [Flag],
    /// No flag may be raised.
    pub when_not: &'static [Flag],
    /// At least one flag must be raised (ignored when empty).
    pub when_any: &'static [Flag],
}

impl Predicate {
    #[must_use]
    pub fn holds(&self, flags: &FlagSet) -> bool {
        flags.all(self.when) && flags.none(self.when_not) && flags.any(self.when_any)
    }
}

/// The steps of the install sequence, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    InstallFlannelBinaries,
    ConfigureCni,
    InstallEtcdCredentials,
    InstallFlannelService,
    ConfigureNetwork,
    StartFlannelService,
    SetCniAvailable,
    SetFlannelVersion,
    Ready,
    HaltExecution,
}

const fn gate(
    when: &'static [Flag],
    when_not: &'static [Flag],
    when_any: &'static [Flag],
) -> Predicate {
    Predicate { when, when_not, when_any }
}

const ETCD_READY: &[Flag] = &[
    Flag::BinariesInstalled,
    Flag::EtcdCredentialsInstalled,
    Flag::EtcdAvailable,
];

impl Handler {
    pub const ORDER: [Handler; 10] = [
        Handler::InstallFlannelBinaries,
        Handler::ConfigureCni,
        Handler::InstallEtcdCredentials,
        Handler::InstallFlannelService,
        Handler::ConfigureNetwork,
        Handler::StartFlannelService,
        Handler::SetCniAvailable,
        Handler::SetFlannelVersion,
        Handler::Ready,
        Handler::HaltExecution,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Handler::InstallFlannelBinaries => "install_flannel_binaries",
            Handler::ConfigureCni => "configure_cni",
            Handler::InstallEtcdCredentials => "install_etcd_credentials",
            Handler::InstallFlannelService => "install_flannel_service",
            Handler::ConfigureNetwork => "configure_network",
            Handler::StartFlannelService => "start_flannel_service",
            Handler::SetCniAvailable => "set_available",
            Handler::SetFlannelVersion => "set_flannel_version",
            Handler::Ready => "ready",
            Handler::HaltExecution => "halt_execution",
        }
    }

    #[must_use]
    pub fn predicate(self) -> Predicate {
        match self {
            Handler::InstallFlannelBinaries => gate(&[], &[Flag::BinariesInstalled], &[]),
            Handler::ConfigureCni => gate(&[Flag::CniIsWorker], &[Flag::CniConfigured], &[]),
            Handler::InstallEtcdCredentials => gate(
                &[Flag::EtcdTlsAvailable],
                &[Flag::EtcdCredentialsInstalled],
                &[],
            ),
            Handler::InstallFlannelService => gate(ETCD_READY, &[Flag::ServiceInstalled], &[]),
            Handler::ConfigureNetwork => gate(ETCD_READY, &[Flag::NetworkConfigured], &[]),
            Handler::StartFlannelService => gate(
                &[
                    Flag::BinariesInstalled,
                    Flag::ServiceInstalled,
                    Flag::NetworkConfigured,
                ],
                &[Flag::ServiceStarted],
                &[],
            ),
            Handler::SetCniAvailable => gate(
                &[Flag::ServiceStarted, Flag::CniIsWorker],
                &[Flag::CniAvailable],
                &[],
            ),
            Handler::SetFlannelVersion => gate(&[Flag::BinariesInstalled], &[Flag::VersionSet], &[]),
            Handler::Ready => gate(
                &[Flag::ServiceStarted],
                &[],
                &[Flag::CniIsMaster, Flag::CniAvailable],
            ),
            Handler::HaltExecution => gate(&[], &[Flag::EtcdConnected], &[]),
        }
    }

    async fn invoke(
        self,
        charm: &Charm<'_, impl CharmHost, impl LocalFs>,
        flags: &mut FlagSet,
    ) -> Result<()> {
        match self {
            Handler::InstallFlannelBinaries => install::install_flannel_binaries(charm, flags).await,
            Handler::ConfigureCni => cni::configure_cni(charm, flags).await,
            Handler::InstallEtcdCredentials => etcd::install_etcd_credentials(charm, flags).await,
            Handler::InstallFlannelService => unit::install_flannel_service(charm, flags).await,
            Handler::ConfigureNetwork => etcd::configure_network(charm, flags).await,
            Handler::StartFlannelService => unit::start_flannel_service(charm, flags).await,
            Handler::SetCniAvailable => cni::set_available(charm, flags).await,
            Handler::SetFlannelVersion => version::set_flannel_version(charm, flags).await,
            Handler::Ready => status::ready(charm.host).await,
            Handler::HaltExecution => status::halt_execution(charm.host).await,
        }
    }
}

/// Handler that returned an error and stopped the dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub handler: Handler,
    pub error: String,
}

/// What one dispatch did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handlers invoked, in order.
    pub ran: Vec<Handler>,
    pub failure: Option<HandlerFailure>,
}

/// Run handlers to a fixpoint.
///
/// A failing handler is logged, reported as a blocked status, and ends the
/// dispatch; flags raised by earlier handlers are kept.
///
/// # Errors
///
/// Returns an error only if the blocked status for a failed handler cannot
/// be reported.
pub async fn dispatch(
    charm: &Charm<'_, impl CharmHost, impl LocalFs>,
    flags: &mut FlagSet,
) -> Result<DispatchReport> {
    let mut report = DispatchReport::default();
    loop {
        let mut progressed = false;
        for handler in Handler::ORDER {
            if report.ran.contains(&handler) || !handler.predicate().holds(flags) {
                continue;
            }
            tracing::debug!(handler = handler.name(), "invoking");
            report.ran.push(handler);
            progressed = true;
            if let Err(err) = handler.invoke(charm, flags).await {
                let error = format!("{err:#}");
                log(
                    charm.host,
                    LogLevel::Error,
                    &format!("{} failed: {error}", handler.name()),
                )
                .await;
                charm
                    .host
                    .status_set(&WorkloadStatus::blocked(format!(
                        "{} failed: {error}",
                        handler.name()
                    )))
                    .await?;
                report.failure = Some(HandlerFailure { handler, error });
                return Ok(report);
            }
        }
        if !progressed {
            return Ok(report);
        }
    }
}
