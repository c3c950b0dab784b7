use std::{process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::process::Command;

/// Runs a shell pipeline and hands back what it printed.
///
/// Implementations never fail: a command that cannot be spawned, exits
/// non-zero or times out yields whatever stdout it produced, possibly
/// nothing. Endpoints report that text as is.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> String;
}

/// [`CommandRunner`] backed by `sh -c`.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    #[tracing::instrument(skip(self), fields(timeout = ?self.timeout))]
    async fn run(&self, command: &str) -> String {
        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!("unable to spawn sh :: {:?}", e);
                return String::new();
            }
        };

        // dropping the pending future on timeout kills the child
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(output) => output,
                Err(_) => {
                    tracing::warn!("command timed out after {:?}", limit);
                    return String::new();
                }
            },
            None => child.wait_with_output().await,
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("unable to collect command output :: {:?}", e);
                return String::new();
            }
        };

        if !output.status.success() {
            tracing::warn!(status = %output.status, "command exited unsuccessfully");
        }
        if !output.stderr.is_empty() {
            tracing::warn!(stderr = %String::from_utf8_lossy(&output.stderr).trim_end());
        }

        strip_trailing_newline(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}
