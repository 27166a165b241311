//! Helpers for running the external `task` binary.
//!
//! Every call is a blocking round-trip: commands run to completion or fail
//! hard. There are no timeouts and no retries; a nonzero exit from the store
//! aborts the whole workflow.

use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::{debug, instrument};

/// Run a command and capture its stdout as UTF-8 text.
///
/// Stderr is captured too and included in the error on abnormal exit.
#[instrument(skip_all, fields(program = ?cmd.get_program()))]
pub fn run_captured(mut cmd: Command) -> Result<String> {
    debug!(args = ?cmd.get_args().collect::<Vec<_>>(), "running captured command");
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .context("spawn store command")?;
    if !output.status.success() {
        bail!(
            "store command failed with status {:?}: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    let stdout = String::from_utf8(output.stdout).context("decode store command output")?;
    debug!(bytes = stdout.len(), "captured command finished");
    Ok(stdout)
}

/// Run a command with inherited stdio, for human-readable reports.
#[instrument(skip_all, fields(program = ?cmd.get_program()))]
pub fn run_passthrough(mut cmd: Command) -> Result<()> {
    debug!(args = ?cmd.get_args().collect::<Vec<_>>(), "running passthrough command");
    let status = cmd.status().context("spawn store command")?;
    if !status.success() {
        bail!("store command failed with status {:?}", status.code());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_returns_stdout() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("printf 'a\\nb\\n'");
        let out = run_captured(cmd).expect("run");
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn captured_fails_on_nonzero_exit_with_stderr() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo boom >&2; exit 3");
        let err = run_captured(cmd).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("status Some(3)"), "unexpected error: {msg}");
        assert!(msg.contains("boom"), "unexpected error: {msg}");
    }

    #[test]
    fn passthrough_propagates_failure() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("exit 1");
        assert!(run_passthrough(cmd).is_err());
    }
}
