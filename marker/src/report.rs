//! Markdown report assembly.
//!
//! Rendering is a pure function of [`ReportContext`], so identical inputs
//! (including the run timestamp) produce byte-identical output. The report
//! doubles as the CI step summary, hence plain GitHub-flavored Markdown.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as _;
use util::commit::CommitInfo;

use crate::scorer::SUBMISSION_MAX;
use crate::types::{Requirement, SubmissionStatus, TaskResult};

/// Everything the renderer needs for one report.
pub struct ReportContext<'a> {
    pub lab_name: &'a str,
    pub student: &'a str,
    /// One-line note about the submission file (found / empty / missing).
    pub submission_note: &'a str,
    /// One-line summary of the submission-marks decision.
    pub submission_status_text: &'a str,
    pub commit: &'a CommitInfo,
    pub status: SubmissionStatus,
    pub tasks: &'a [TaskResult],
    pub submission_marks: u32,
    pub total_earned: u32,
    /// Parse diagnostic; takes precedence over `runtime_error` when present.
    pub compile_error: Option<&'a str>,
    pub runtime_error: Option<&'a str>,
    pub generated_at: DateTime<Utc>,
}

/// Render the full feedback report.
pub fn render_markdown(ctx: &ReportContext) -> String {
    let commit = ctx.commit;
    let mut out = String::new();

    let _ = write!(
        out,
        "# Lab | {} | Autograding Summary\n\n\
         - Student: `{}`\n\
         - {}\n\
         - {}\n\n\
         - Repo HEAD commit:\n\
         \x20 - SHA: `{}`\n\
         \x20 - Author: `{}` <{}>\n\
         \x20 - Time (UTC ISO): `{}`\n\n\
         - Status: **{}** (0=on time, 1=late, 2=no submission/empty)\n\
         - Run: `{}`\n\n\
         ## Marks Breakdown\n\n\
         | Item | Marks |\n\
         |------|------:|\n",
        ctx.lab_name,
        ctx.student,
        ctx.submission_note,
        ctx.submission_status_text,
        commit.sha,
        commit.author,
        commit.email,
        commit.timestamp_iso,
        ctx.status.code(),
        ctx.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    );

    for task in ctx.tasks {
        let _ = writeln!(out, "| {} | {}/{} |", task.name, task.earned, task.max);
    }
    let _ = writeln!(out, "| Submission | {}/{} |", ctx.submission_marks, SUBMISSION_MAX);

    let _ = write!(
        out,
        "\n## Total Marks\n\n**{} / 100**\n\n## Detailed Feedback\n",
        ctx.total_earned
    );

    for task in ctx.tasks {
        let _ = write!(out, "\n### {}\n{}\n", task.name, format_requirements(&task.requirements));
    }

    if let Some(err) = ctx.compile_error {
        let _ = write!(
            out,
            "\n---\n⚠️ **SyntaxError: code could not compile (best-effort).**\n\n```\n{err}\n```\n"
        );
    } else if let Some(err) = ctx.runtime_error {
        let _ = write!(
            out,
            "\n---\n⚠️ **Runtime error detected (best-effort captured):**\n\n```\n{err}\n```\n"
        );
    }

    out
}

/// Checklist lines: `- ✅ label` / `- ❌ label — detail`.
fn format_requirements(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(|r| {
            if r.satisfied {
                format!("- ✅ {}", r.label)
            } else if r.failure_detail.is_empty() {
                format!("- ❌ {}", r.label)
            } else {
                format!("- ❌ {} — {}", r.label, r.failure_detail)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
