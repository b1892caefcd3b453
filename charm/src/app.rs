//! Application context: unified state passed to every command handler.

use anyhow::Result;

use crate::domain::Layout;
use crate::infra::env::HookEnv;
use crate::infra::state::JsonFlagStore;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output flags passed from the top-level CLI.
pub struct OutputFlags {
    pub no_color: bool,
    pub quiet: bool,
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    pub mode: OutputMode,
    /// Hook environment read at startup.
    pub env: HookEnv,
    /// Host and charm paths derived from `env`.
    pub layout: Layout,
}

impl AppContext {
    /// Construct an `AppContext` from CLI flags and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the hook environment cannot be read.
    pub fn new(flags: &OutputFlags) -> Result<Self> {
        Ok(Self::with_env(flags, HookEnv::from_env()?))
    }

    #[must_use]
    pub fn with_env(flags: &OutputFlags, env: HookEnv) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        let layout = env.layout();
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            env,
            layout,
        }
    }

    /// Store for the persisted charm flags.
    #[must_use]
    pub fn flag_store(&self) -> JsonFlagStore {
        JsonFlagStore::new(self.layout.flags_file())
    }
}
