//! Lab autograder entry point.
//!
//! Grading outcomes — including a missing submission — are data, not
//! process errors, so the process exits 0 for every graded run. Only a
//! failure to write the output artifacts terminates with a non-zero exit.

use chrono::Utc;
use marker::{GradeOutcome, GradingJob};
use std::fs;
use std::path::Path;
use util::commit::{self, CommitInfo};
use util::config::GraderConfig;

mod artifacts;

#[tokio::main]
async fn main() {
    let config = GraderConfig::from_env();
    common::logger::init_logger(&config.log_level, config.log_file.as_deref());

    let outcome = grade(&config).await;

    if let Err(err) = artifacts::write_artifacts(&config, &outcome) {
        log::error!("Failed to write grading artifacts: {err}");
        std::process::exit(1);
    }

    println!(
        "✔ Lab graded: {}/{} (status={})",
        outcome.summary.earned,
        outcome.summary.possible,
        outcome.summary.status.code()
    );
}

async fn grade(config: &GraderConfig) -> GradeOutcome {
    let student = config.student_id();
    let submission_display = config.submission_path.display().to_string();
    let source = read_submission(&config.submission_path);

    let commit = commit::head_commit().unwrap_or_else(|| {
        log::warn!("No HEAD commit metadata available; using sentinels");
        CommitInfo::unknown()
    });

    let (compile_error, runtime_error) = match source.as_deref() {
        Some(code) if !marker::normalize::is_effectively_empty(code) => {
            run_sandbox(code, config.sandbox_timeout_ms).await
        }
        _ => (None, None),
    };

    GradingJob::new(
        &config.lab_name,
        &student,
        &submission_display,
        source.as_deref(),
        Utc::now(),
    )
    .with_commit(&commit)
    .with_diagnostics(compile_error.as_deref(), runtime_error.as_deref())
    .grade()
}

/// Read the submission file. A present-but-unreadable file degrades to empty
/// text, which the grading pass then classifies as an empty submission.
fn read_submission(path: &Path) -> Option<String> {
    if path.is_file() {
        Some(fs::read_to_string(path).unwrap_or_default())
    } else {
        None
    }
}

/// Run the best-effort sandbox. A compile failure short-circuits execution;
/// a sandbox that cannot run at all (no interpreter on PATH) degrades to no
/// diagnostics.
async fn run_sandbox(code: &str, timeout_ms: u64) -> (Option<String>, Option<String>) {
    let compile = match code_runner::try_compile(code).await {
        Ok(compile) => compile,
        Err(err) => {
            log::warn!("Sandbox parse check unavailable: {err}");
            return (None, None);
        }
    };

    if !compile.ok {
        return (compile.error, None);
    }

    match code_runner::run_isolated(code, timeout_ms).await {
        Ok(run) => {
            for line in &run.logs {
                log::debug!("sandbox console: {line}");
            }
            (None, run.runtime_error)
        }
        Err(err) => {
            log::warn!("Sandbox execution unavailable: {err}");
            (None, None)
        }
    }
}
