//! Batch-queue job submission.
//!
//! One job per tool. In local mode the command runs synchronously in place;
//! in queue mode it is wrapped with the environment preamble and handed to
//! SGE's `qsub` with a job name and resource limits. No retries and no
//! idempotence: one call produces exactly one job, and a failed submission
//! surfaces as an error for that tool's launch only.

use crate::invoke::run_timed;
use crate::types::Tool;
use anyhow::{bail, Context, Result};
use lateral_core::config::QueueConfig;
use lateral_core::RunParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Resource limits passed to the scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resources {
    pub threads: usize,
    pub wall_time: String,
    pub memory: String,
}

impl From<&QueueConfig> for Resources {
    fn from(config: &QueueConfig) -> Self {
        Self {
            threads: config.threads,
            wall_time: config.wall_time.clone(),
            memory: config.memory.clone(),
        }
    }
}

/// One ready-to-submit job; consumed exactly once
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub name: String,
    pub command: String,
    pub resources: Resources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Local,
    Queue,
}

pub struct Submitter {
    mode: SubmitMode,
    preamble: String,
    delay: Duration,
}

impl Submitter {
    pub fn new(mode: SubmitMode, config: &QueueConfig) -> Self {
        Self {
            mode,
            preamble: config.preamble.clone(),
            delay: Duration::from_secs(config.submit_delay_secs),
        }
    }

    /// Fail the whole launch up front when the submission tool is missing
    pub fn preflight(&self) -> Result<()> {
        if self.mode == SubmitMode::Queue && which::which("qsub").is_err() {
            bail!("qsub not found on PATH; queue submission is unavailable");
        }
        Ok(())
    }

    /// The qsub argument vector for a job (split out for testability)
    pub fn qsub_args(&self, job: &JobRequest) -> Vec<String> {
        vec![
            "-N".to_string(),
            job.name.clone(),
            "-pe".to_string(),
            "smp".to_string(),
            job.resources.threads.to_string(),
            "-l".to_string(),
            format!("h_rt={}", job.resources.wall_time),
            "-l".to_string(),
            format!("mem_free={}", job.resources.memory),
            "-b".to_string(),
            "y".to_string(),
            "-cwd".to_string(),
            format!("{}; {}", self.preamble, job.command),
        ]
    }

    /// Submit (or directly execute) one job
    pub fn submit(&self, job: JobRequest) -> Result<()> {
        match self.mode {
            SubmitMode::Local => {
                tracing::info!(job = %job.name, "running job locally");
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(&job.command);
                let out = run_timed(&mut cmd)?;
                if !out.success() {
                    bail!(
                        "job '{}' failed with exit code {}: {}",
                        job.name,
                        out.exit_code,
                        out.stderr.trim()
                    );
                }
                Ok(())
            }
            SubmitMode::Queue => {
                let qsub = which::which("qsub")
                    .context("qsub not found on PATH; queue submission is unavailable")?;
                tracing::info!(job = %job.name, "submitting to batch queue");
                let mut cmd = Command::new(qsub);
                cmd.args(self.qsub_args(&job));
                let out = run_timed(&mut cmd)?;
                if !out.success() {
                    bail!(
                        "qsub rejected job '{}' (exit code {}): {}",
                        job.name,
                        out.exit_code,
                        out.stderr.trim()
                    );
                }
                // pace submissions so the queue intake is not hammered
                std::thread::sleep(self.delay);
                Ok(())
            }
        }
    }
}

fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}

/// Build one `lateral run` job per requested tool from the resolved
/// parameters. The command re-invokes the current executable.
pub fn launch_plan(
    params: &RunParams,
    tools: &[Tool],
    resources: &Resources,
) -> Result<Vec<JobRequest>> {
    let exe = std::env::current_exe().unwrap_or_else(|_| "lateral".into());

    let mut jobs = Vec::with_capacity(tools.len());
    for tool in tools {
        let mut command = format!("{} run --tool {}", shell_quote(&exe), tool.name());
        let flags: [(&str, &Option<std::path::PathBuf>); 5] = [
            ("--gene-trees-dir", &params.gene_trees_dir),
            ("--species-tree", &params.species_tree),
            ("--msa-dir", &params.msa_dir),
            ("--work-dir", &params.work_dir),
            ("--tools-dir", &params.tools_dir),
        ];
        for (flag, value) in flags {
            if let Some(path) = value {
                command.push_str(&format!(" {flag} {}", shell_quote(path)));
            }
        }
        if params.verbose {
            command.push_str(" --verbose");
        }

        jobs.push(JobRequest {
            name: format!("lateral_{}", tool.name()),
            command,
            resources: resources.clone(),
        });
    }
    Ok(jobs)
}
