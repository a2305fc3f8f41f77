//! # Marker Library
//!
//! Core grading logic for the DOM-API lab autograder: text normalization,
//! pattern detectors, the four task rule sets, proportional scoring, and the
//! Markdown report renderer.
//!
//! ## Key Concepts
//! - **GradingJob**: one grading pass over a single submission, producing
//!   task results, a grade summary and the rendered report.
//! - **Detectors**: pure text-pattern predicates (no parsing, by design).
//! - **Requirements**: named boolean checks; each task scores a proportional
//!   share of its maximum for the requirements it satisfies.
//!
//! Grading is deterministic: the run timestamp and commit metadata are
//! inputs, so identical inputs yield identical reports.

pub mod detectors;
pub mod normalize;
pub mod report;
pub mod scorer;
pub mod tasks;
pub mod types;

use chrono::{DateTime, Utc};
use util::commit::CommitInfo;

use crate::report::ReportContext;
use crate::types::{GradeSummary, SubmissionStatus, TaskResult};

/// Everything produced by one grading pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeOutcome {
    pub status: SubmissionStatus,
    /// Task results in report order (TODO 1 → TODO 4).
    pub tasks: Vec<TaskResult>,
    pub submission_marks: u32,
    pub summary: GradeSummary,
    /// The full feedback report.
    pub markdown: String,
}

/// A grading job for a single student submission.
///
/// Construct with [`GradingJob::new`], optionally attach commit metadata and
/// sandbox diagnostics, then call [`GradingJob::grade`].
pub struct GradingJob<'a> {
    lab_name: &'a str,
    student: &'a str,
    /// Display path of the submission file, for the report's note lines.
    submission_path: &'a str,
    /// Raw submission source; `None` when the file does not exist.
    source: Option<&'a str>,
    commit: Option<&'a CommitInfo>,
    compile_error: Option<&'a str>,
    runtime_error: Option<&'a str>,
    generated_at: DateTime<Utc>,
}

impl<'a> GradingJob<'a> {
    pub fn new(
        lab_name: &'a str,
        student: &'a str,
        submission_path: &'a str,
        source: Option<&'a str>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            lab_name,
            student,
            submission_path,
            source,
            commit: None,
            compile_error: None,
            runtime_error: None,
            generated_at,
        }
    }

    /// Attach HEAD commit metadata for the report header.
    pub fn with_commit(mut self, commit: &'a CommitInfo) -> Self {
        self.commit = Some(commit);
        self
    }

    /// Attach best-effort sandbox diagnostics. These are advisory only and
    /// never change the numeric grade; a compile error suppresses the
    /// runtime error in the rendered report.
    pub fn with_diagnostics(
        mut self,
        compile_error: Option<&'a str>,
        runtime_error: Option<&'a str>,
    ) -> Self {
        self.compile_error = compile_error;
        self.runtime_error = runtime_error;
        self
    }

    /// Run the grading pass.
    ///
    /// # Steps
    /// 1. Classify the submission (present / effectively empty / missing).
    /// 2. Evaluate the four task rule sets against comment-stripped source,
    ///    or substitute zeroed results when there is nothing to grade.
    /// 3. Compute submission marks and the capped total.
    /// 4. Render the Markdown report.
    pub fn grade(self) -> GradeOutcome {
        let empty = match self.source {
            Some(code) => normalize::is_effectively_empty(code),
            None => true,
        };

        let status = if empty {
            SubmissionStatus::MissingOrEmpty
        } else {
            // No due date is configured for this lab, so a usable submission
            // is always on time.
            SubmissionStatus::OnTime
        };

        let tasks = match self.source {
            Some(code) if status != SubmissionStatus::MissingOrEmpty => {
                tasks::check_all(&normalize::strip_comments(code))
            }
            _ => tasks::missing_submission_results(),
        };

        let submission_marks = scorer::submission_marks(status);
        let total = scorer::total_earned(&tasks, submission_marks);

        let summary = GradeSummary {
            student: self.student.to_string(),
            earned: total,
            possible: scorer::TOTAL_MAX,
            status,
        };

        let unknown = CommitInfo::unknown();
        let commit = self.commit.unwrap_or(&unknown);

        let submission_note = match self.source {
            None => format!("❌ Required file not found: `{}`.", self.submission_path),
            Some(_) if empty => format!(
                "⚠️ Found `{}` but it appears empty (or only comments).",
                self.submission_path
            ),
            Some(_) => format!("✅ Found `{}`.", self.submission_path),
        };

        let submission_status_text = if status == SubmissionStatus::MissingOrEmpty {
            format!(
                "No submission detected (missing/empty {}): submission marks = 0/{}.",
                self.submission_path,
                scorer::SUBMISSION_MAX
            )
        } else {
            format!(
                "Submission detected: {}/{}. (HEAD: {} @ {})",
                submission_marks,
                scorer::SUBMISSION_MAX,
                commit.sha,
                commit.timestamp_iso
            )
        };

        let markdown = report::render_markdown(&ReportContext {
            lab_name: self.lab_name,
            student: self.student,
            submission_note: &submission_note,
            submission_status_text: &submission_status_text,
            commit,
            status,
            tasks: &tasks,
            submission_marks,
            total_earned: total,
            compile_error: self.compile_error,
            runtime_error: self.runtime_error,
            generated_at: self.generated_at,
        });

        GradeOutcome {
            status,
            tasks,
            submission_marks,
            summary,
            markdown,
        }
    }
}
