//! Timed synchronous subprocess invocation.
//!
//! Every external call goes through `run_timed`, which blocks until the
//! child exits and returns a structured result; abort policy is decided by
//! the caller, not here. Wall time comes from a monotonic clock; user CPU
//! time is the `getrusage(RUSAGE_CHILDREN)` delta around the call on Unix
//! (zero elsewhere). The driver is single-threaded and runs children
//! strictly sequentially, so the delta belongs to this child alone.

use anyhow::{Context, Result};
use lateral_utils::ElapsedTimes;
use std::process::Command;
use std::time::{Duration, Instant};

/// Structured result of one external invocation
#[derive(Debug)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub times: ElapsedTimes,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run a command to completion, capturing output and timing.
/// There is no timeout: a hung child blocks indefinitely.
pub fn run_timed(cmd: &mut Command) -> Result<ProcessOutput> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(command = ?cmd, "invoking external command");

    let user_before = children_user_time();
    let start = Instant::now();
    let output = cmd
        .output()
        .with_context(|| format!("Failed to execute {program}"))?;
    let wall = start.elapsed();
    let user = children_user_time().saturating_sub(user_before);

    Ok(ProcessOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        times: ElapsedTimes { wall, user },
    })
}

/// Cumulative user CPU time of all reaped children
#[cfg(unix)]
fn children_user_time() -> Duration {
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_CHILDREN, &mut usage) };
    if rc != 0 {
        return Duration::ZERO;
    }
    Duration::new(
        usage.ru_utime.tv_sec.max(0) as u64,
        (usage.ru_utime.tv_usec.max(0) as u32).saturating_mul(1000),
    )
}

#[cfg(not(unix))]
fn children_user_time() -> Duration {
    Duration::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_and_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo hello; exit 0");
        let out = run_timed(&mut cmd).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error_here() {
        // abort policy belongs to the caller
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo oops >&2; exit 3");
        let out = run_timed(&mut cmd).unwrap();
        assert!(!out.success());
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.stderr.trim(), "oops");
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let mut cmd = Command::new("/nonexistent/hgt-binary");
        assert!(run_timed(&mut cmd).is_err());
    }

    #[test]
    fn test_wall_time_is_measured() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("sleep 0.1");
        let out = run_timed(&mut cmd).unwrap();
        assert!(out.times.wall >= Duration::from_millis(90));
    }
}
