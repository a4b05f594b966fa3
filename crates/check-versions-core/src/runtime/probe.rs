//! Tool probing: run `<binary> --version` and capture what it prints
//!
//! The [`ProcessRunner`] seam lets the driver be exercised without real
//! binaries; [`SystemRunner`] is the tokio-backed implementation.

use crate::error::{CheckError, Result};
use crate::version::extract_version;
use std::future::Future;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

/// Default bound on a single `--version` invocation
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability to run a tool with `--version` and return its output
pub trait ProcessRunner {
    /// Run `binary --version` to completion and return what it printed.
    fn version_output(&self, binary: &str) -> impl Future<Output = Result<String>>;
}

/// Runs real child processes via tokio
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl ProcessRunner for SystemRunner {
    async fn version_output(&self, binary: &str) -> Result<String> {
        debug!("Running {} --version", binary);

        let child = TokioCommand::new(binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CheckError::ToolNotPresent {
                    binary: binary.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        // Read until exit rather than the first chunk; dropping the future on
        // timeout kills the child.
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                return Err(CheckError::Timeout {
                    what: format!("'{} --version'", binary),
                    after: self.timeout,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let has_stdout = !stdout.trim().is_empty();

        // Shims (nvm, asdf) may print noise on stderr next to a good version
        if has_stdout && output.status.success() {
            return Ok(stdout);
        }

        if is_not_found_message(&stdout) || is_not_found_message(&stderr) {
            return Err(CheckError::ToolNotPresent {
                binary: binary.to_string(),
            });
        }

        if !output.status.success() && !has_stdout {
            return Err(CheckError::ProbeFailed {
                binary: binary.to_string(),
                code: output.status.code(),
            });
        }

        // Some tools report their version on stderr
        if !has_stdout {
            Ok(stderr)
        } else {
            Ok(stdout)
        }
    }
}

/// Whether output looks like a shell's "command not found" reply.
pub fn is_not_found_message(output: &str) -> bool {
    output.contains("command not found")
}

/// Probe a tool and extract its installed version.
pub async fn probe_version<R: ProcessRunner>(runner: &R, binary: &str) -> Result<String> {
    let output = runner.version_output(binary).await?;

    if is_not_found_message(&output) {
        return Err(CheckError::ToolNotPresent {
            binary: binary.to_string(),
        });
    }

    let version = extract_version(&output)?;
    debug!("{} reports version {}", binary, version);
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedRunner(&'static str);

    impl ProcessRunner for CannedRunner {
        async fn version_output(&self, _binary: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_not_found_message_detection() {
        assert!(is_not_found_message("zsh: command not found: node"));
        assert!(is_not_found_message("bash: git: command not found\n"));
        assert!(!is_not_found_message("v20.1.0"));
    }

    #[tokio::test]
    async fn test_probe_version_extracts() {
        let version = probe_version(&CannedRunner("git version 2.39.1 (Apple)\n"), "git")
            .await
            .unwrap();
        assert_eq!(version, "2.39.1");
    }

    #[tokio::test]
    async fn test_probe_version_command_not_found() {
        let err = probe_version(&CannedRunner("command not found"), "npm")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::ToolNotPresent { binary } if binary == "npm"));
    }

    #[tokio::test]
    async fn test_probe_version_without_version_text() {
        let err = probe_version(&CannedRunner("usage: tool [options]"), "tool")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Extraction { .. }));
    }

    #[tokio::test]
    async fn test_missing_binary_is_not_present() {
        let runner = SystemRunner::default();
        let err = runner
            .version_output("check-versions-definitely-missing-binary")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::ToolNotPresent { .. }));
    }

    #[cfg(unix)]
    mod scripts {
        use super::super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};
        use tempfile::TempDir;

        fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_reads_stdout_until_exit() {
            let temp = TempDir::new().unwrap();
            let script = write_script(
                temp.path(),
                "fake-tool",
                "echo 'fake-tool'\nsleep 0.1\necho 'version 3.4.5'",
            );

            let output = SystemRunner::default()
                .version_output(script.to_str().unwrap())
                .await
                .unwrap();
            assert!(output.contains("3.4.5"));
        }

        #[tokio::test]
        async fn test_falls_back_to_stderr() {
            let temp = TempDir::new().unwrap();
            let script = write_script(temp.path(), "stderr-tool", "echo 'tool 1.8.0' >&2");

            let output = SystemRunner::default()
                .version_output(script.to_str().unwrap())
                .await
                .unwrap();
            assert!(output.contains("1.8.0"));
        }

        #[tokio::test]
        async fn test_stderr_noise_does_not_hide_stdout_version() {
            let temp = TempDir::new().unwrap();
            let script = write_script(
                temp.path(),
                "shimmed-node",
                "echo 'sh: nvm_helper: command not found' >&2\necho 'v20.1.0'",
            );

            let version = probe_version(&SystemRunner::default(), script.to_str().unwrap())
                .await
                .unwrap();
            assert_eq!(version, "20.1.0");
        }

        #[tokio::test]
        async fn test_shell_not_found_on_stderr_is_not_present() {
            let temp = TempDir::new().unwrap();
            let script = write_script(
                temp.path(),
                "wrapper",
                "echo 'sh: node: command not found' >&2\nexit 127",
            );

            let err = SystemRunner::default()
                .version_output(script.to_str().unwrap())
                .await
                .unwrap_err();
            assert!(matches!(err, CheckError::ToolNotPresent { .. }));
        }

        #[tokio::test]
        async fn test_failing_exit_without_output() {
            let temp = TempDir::new().unwrap();
            let script = write_script(temp.path(), "broken-tool", "exit 3");

            let err = SystemRunner::default()
                .version_output(script.to_str().unwrap())
                .await
                .unwrap_err();
            assert!(matches!(err, CheckError::ProbeFailed { code: Some(3), .. }));
        }

        #[tokio::test]
        async fn test_hanging_tool_times_out() {
            let temp = TempDir::new().unwrap();
            let script = write_script(temp.path(), "slow-tool", "sleep 5");

            let err = SystemRunner::new(Duration::from_millis(200))
                .version_output(script.to_str().unwrap())
                .await
                .unwrap_err();
            assert!(matches!(err, CheckError::Timeout { .. }));
        }
    }
}
