//! Output artifacts: the CSV summary row, the feedback README, and the
//! optional CI step-summary append.
//!
//! Producing these files is the whole point of the tool, so unlike every
//! other failure in the pipeline, a write failure here is fatal and must
//! surface with the offending path.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use marker::GradeOutcome;
use marker::types::GradeSummary;
use util::config::GraderConfig;
use util::paths;

/// Render the two-line CSV summary. The column layout is a contract with
/// downstream consumers and must stay byte-for-byte stable.
pub fn grade_csv(summary: &GradeSummary) -> String {
    format!(
        "student_username,obtained_marks,total_marks,status\n{},{},{},{}\n",
        summary.student,
        summary.earned,
        summary.possible,
        summary.status.code()
    )
}

/// Write all grading artifacts for this run.
pub fn write_artifacts(config: &GraderConfig, outcome: &GradeOutcome) -> Result<(), String> {
    paths::ensure_dir(&config.artifacts_dir)
        .map_err(|e| format!("Failed to create {}: {e}", config.artifacts_dir.display()))?;
    paths::ensure_dir(paths::feedback_dir(&config.artifacts_dir)).map_err(|e| {
        format!(
            "Failed to create {}: {e}",
            paths::feedback_dir(&config.artifacts_dir).display()
        )
    })?;

    let csv_path = paths::grade_csv_path(&config.artifacts_dir);
    write_file(&csv_path, &grade_csv(&outcome.summary))?;

    let readme_path = paths::feedback_readme_path(&config.artifacts_dir);
    write_file(&readme_path, &outcome.markdown)?;

    if let Some(step_summary) = &config.step_summary_path {
        append_file(step_summary, &outcome.markdown)?;
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    fs::write(path, contents).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn append_file(path: &Path, contents: &str) -> Result<(), String> {
    paths::ensure_parent_dir(path)
        .map_err(|e| format!("Failed to create parent of {}: {e}", path.display()))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| format!("Failed to append to {}: {e}", path.display()))
}
