//! Best-effort HEAD commit metadata.
//!
//! The grader records which commit was graded, but version-control access is
//! strictly optional: any failure degrades to `"unknown"` sentinels and
//! never blocks grading.

use chrono::{DateTime, SecondsFormat, Utc};
use std::process::Command;

/// Sentinel for commit fields that could not be resolved.
pub const UNKNOWN: &str = "unknown";

/// Metadata of the repository HEAD commit at grading time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub author: String,
    pub email: String,
    /// Commit time as a UTC ISO-8601 string, or [`UNKNOWN`].
    pub timestamp_iso: String,
    pub subject: String,
}

impl CommitInfo {
    /// All-sentinel value used when no repository metadata is available.
    pub fn unknown() -> Self {
        Self {
            sha: UNKNOWN.to_string(),
            author: UNKNOWN.to_string(),
            email: UNKNOWN.to_string(),
            timestamp_iso: UNKNOWN.to_string(),
            subject: String::new(),
        }
    }
}

/// Read HEAD commit metadata from the repository in the working directory.
///
/// Returns `None` when git is missing, the directory is not a repository, or
/// the output cannot be parsed.
pub fn head_commit() -> Option<CommitInfo> {
    let output = Command::new("git")
        .args(["log", "-1", "--format=%H|%ct|%an|%ae|%s"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    parse_record(String::from_utf8_lossy(&output.stdout).trim())
}

/// Parse one `%H|%ct|%an|%ae|%s` record. The subject is the unsplit
/// remainder, so subjects containing `|` survive intact.
fn parse_record(record: &str) -> Option<CommitInfo> {
    if record.is_empty() {
        return None;
    }

    let mut parts = record.splitn(5, '|');
    let sha = parts.next()?;
    let epoch = parts.next()?;
    let author = parts.next()?;
    let email = parts.next()?;
    let subject = parts.next().unwrap_or("");

    let timestamp_iso = epoch
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| UNKNOWN.to_string());

    Some(CommitInfo {
        sha: or_unknown(sha),
        author: or_unknown(author),
        email: or_unknown(email),
        timestamp_iso,
        subject: subject.to_string(),
    })
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}
