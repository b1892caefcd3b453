//! Shared test helpers: a scripted `CommandRunner` and output constructors.

#![allow(dead_code)]

use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use flannel_charm::application::ports::CommandRunner;

// ── ExitStatus construction ──────────────────────────────────────────────────

/// Build an `ExitStatus` from a logical exit code.
///
/// The raw wait-status encodes the exit code in bits 8–15, so we shift.
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── ScriptedRunner ───────────────────────────────────────────────────────────

type Reply = dyn Fn(&str, &[&str]) -> Result<Output> + Send + Sync;

/// A `CommandRunner` that records every call and answers through a closure.
///
/// Cloning shares the call log, so a clone can be handed to the adapter
/// under test while the original is kept for assertions.
#[derive(Clone)]
pub struct ScriptedRunner {
    calls: Arc<Mutex<Vec<(String, Vec<String>, Option<Duration>)>>>,
    reply: Arc<Reply>,
}

impl ScriptedRunner {
    pub fn new(reply: impl Fn(&str, &[&str]) -> Result<Output> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(reply),
        }
    }

    /// Every call succeeds with `stdout`.
    pub fn always(stdout: &'static str) -> Self {
        Self::new(move |_, _| Ok(ok_output(stdout.as_bytes())))
    }

    /// `(program, args)` in call order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls
            .lock()
            .expect("mutex poisoned")
            .iter()
            .map(|(p, a, _)| (p.clone(), a.clone()))
            .collect()
    }

    /// Calls rendered as shell-like lines.
    pub fn lines(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(p, a)| {
                if a.is_empty() {
                    p
                } else {
                    format!("{p} {}", a.join(" "))
                }
            })
            .collect()
    }

    /// Timeout override passed with the last call, if any.
    pub fn last_timeout(&self) -> Option<Duration> {
        self.calls
            .lock()
            .expect("mutex poisoned")
            .last()
            .and_then(|(_, _, t)| *t)
    }

    fn record(&self, program: &str, args: &[&str], timeout: Option<Duration>) {
        self.calls.lock().expect("mutex poisoned").push((
            program.to_owned(),
            args.iter().map(|s| (*s).to_string()).collect(),
            timeout,
        ));
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.record(program, args, None);
        (self.reply)(program, args)
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        self.record(program, args, Some(timeout));
        (self.reply)(program, args)
    }
}
