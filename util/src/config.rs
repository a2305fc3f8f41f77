//! Runtime configuration for a grading run.
//!
//! All environment access happens once, up front, producing an explicit
//! `GraderConfig` that the rest of the pipeline receives by reference. There
//! is deliberately no global config instance: a grading run is a single pass
//! and threading the object through keeps the core crates pure.

use std::env;
use std::path::PathBuf;

/// Fallback identifier when nothing in the environment names the student.
pub const FALLBACK_STUDENT_ID: &str = "student";

/// Configuration for one grading run, resolved from `.env` and the process
/// environment.
#[derive(Debug, Clone)]
pub struct GraderConfig {
    /// Lab identifier shown in the report header.
    pub lab_name: String,
    /// Location of the required submission file, relative to the working dir.
    pub submission_path: PathBuf,
    /// Root directory for output artifacts.
    pub artifacts_dir: PathBuf,
    /// Explicit student identifier override (`STUDENT_USERNAME`).
    pub student_override: Option<String>,
    /// Full repository slug (`GITHUB_REPOSITORY`, `org/repo`).
    pub repository: Option<String>,
    /// CI actor (`GITHUB_ACTOR`).
    pub actor: Option<String>,
    /// CI step-summary stream to append the report to, when configured.
    pub step_summary_path: Option<PathBuf>,
    /// Interpreter budget for the best-effort sandbox, in milliseconds.
    pub sandbox_timeout_ms: u64,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl GraderConfig {
    /// Load configuration from `.env` (if present) and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            lab_name: env::var("LAB_NAME").unwrap_or_else(|_| "5-1-dome-api-tasks".into()),
            submission_path: env::var("SUBMISSION_PATH")
                .unwrap_or_else(|_| "script.js".into())
                .into(),
            artifacts_dir: env::var("ARTIFACTS_DIR")
                .unwrap_or_else(|_| "artifacts".into())
                .into(),
            student_override: non_empty(env::var("STUDENT_USERNAME").ok()),
            repository: non_empty(env::var("GITHUB_REPOSITORY").ok()),
            actor: non_empty(env::var("GITHUB_ACTOR").ok()),
            step_summary_path: non_empty(env::var("GITHUB_STEP_SUMMARY").ok()).map(PathBuf::from),
            sandbox_timeout_ms: env::var("SANDBOX_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_file: non_empty(env::var("LOG_FILE").ok()),
        }
    }

    /// Resolve the student identifier.
    ///
    /// Order: explicit override, then the suffix of the repository name after
    /// its last hyphen (classroom repos are named `<assignment>-<username>`),
    /// then the CI actor, then the bare repository name, then
    /// [`FALLBACK_STUDENT_ID`].
    pub fn student_id(&self) -> String {
        if let Some(id) = &self.student_override {
            return id.clone();
        }

        let repo_name = self
            .repository
            .as_deref()
            .map(|full| full.split_once('/').map_or(full, |(_, name)| name));

        if let Some(name) = repo_name {
            if let Some((_, suffix)) = name.rsplit_once('-') {
                if !suffix.is_empty() {
                    return suffix.to_string();
                }
            }
        }

        if let Some(actor) = &self.actor {
            return actor.clone();
        }

        if let Some(name) = repo_name {
            if !name.is_empty() {
                return name.to_string();
            }
        }

        FALLBACK_STUDENT_ID.to_string()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
