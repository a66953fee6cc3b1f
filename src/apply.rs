//! Activation of the persisted netplan configuration
//!
//! Runs the activation command (`netplan apply` by default) exactly once per
//! call. The command reads every file in the netplan directory, not only the
//! one this editor writes.

use crate::error::{Error, Result};
use crate::settings::Settings;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Captured result of a finished activation command
#[derive(Debug)]
pub struct ApplyOutput {
    /// Exit status of the command
    pub status: ExitStatus,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl ApplyOutput {
    /// Get combined output (stdout + stderr)
    pub fn combined(&self) -> String {
        Self::combine(&self.stdout, &self.stderr)
    }

    fn combine(stdout: &str, stderr: &str) -> String {
        if stdout.is_empty() {
            stderr.to_string()
        } else if stderr.is_empty() {
            stdout.to_string()
        } else {
            format!("{}\n{}", stdout, stderr)
        }
    }
}

/// Runner for the activation command
#[derive(Debug, Clone)]
pub struct Applier {
    /// Program followed by its arguments
    command: Vec<String>,
    /// Give up after this long (None waits indefinitely)
    timeout: Option<Duration>,
}

impl Applier {
    /// Create an applier for `command` (program followed by arguments)
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            timeout: None,
        }
    }

    /// Applier configured from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let applier = Self::new(settings.apply_command.clone());
        match settings.apply_timeout {
            0 => applier,
            secs => applier.timeout(Duration::from_secs(secs)),
        }
    }

    /// Kill the command if it runs longer than `timeout`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Command line for messages
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Run the activation command once
    ///
    /// A non-zero exit is reported as [`Error::Apply`] carrying the combined
    /// output of the command.
    pub fn apply(&self) -> Result<ApplyOutput> {
        let line = self.command_line();
        let (program, args) = self.command.split_first().ok_or_else(|| Error::Apply {
            message: "no activation command configured".to_string(),
            output: String::new(),
        })?;

        tracing::info!(command = %line, "applying network configuration");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Apply {
                message: format!("{} failed: {}", line, e),
                output: String::new(),
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child, &line);
        let stdout = join(stdout);
        let stderr = join(stderr);

        let Some(status) = status? else {
            tracing::warn!(command = %line, "activation timed out");
            return Err(Error::ApplyTimeout {
                seconds: self.timeout.map_or(0, |t| t.as_secs()),
                output: ApplyOutput::combine(&stdout, &stderr),
            });
        };

        let output = ApplyOutput {
            status,
            stdout,
            stderr,
        };

        if !output.status.success() {
            tracing::warn!(command = %line, status = %output.status, "activation failed");
            return Err(Error::Apply {
                message: format!("{} failed: {}", line, output.status),
                output: output.combined(),
            });
        }

        tracing::info!(command = %line, "activation succeeded");
        Ok(output)
    }

    /// Wait for the child, enforcing the timeout if one is set
    ///
    /// Returns `None` once a timed-out child has been killed and reaped.
    fn wait(&self, child: &mut Child, line: &str) -> Result<Option<ExitStatus>> {
        let wait_error = |e: std::io::Error| Error::Apply {
            message: format!("{} failed: could not wait on process: {}", line, e),
            output: String::new(),
        };

        let Some(timeout) = self.timeout else {
            return child.wait().map(Some).map_err(wait_error);
        };

        let start = Instant::now();
        loop {
            match child.try_wait().map_err(wait_error)? {
                Some(status) => return Ok(Some(status)),
                None => {
                    if start.elapsed() > timeout {
                        let _ = child.kill();
                        // Wait for process to be reaped after kill
                        let _ = child.wait();
                        return Ok(None);
                    }
                    thread::sleep(Duration::from_millis(100));
                }
            }
        }
    }
}

/// Read a pipe to completion on a separate thread so a chatty child cannot
/// block on a full pipe while we wait for it
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
