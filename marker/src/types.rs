//! Core value objects of the grading pass.
//!
//! Everything here is constructed once per run and never mutated afterwards.

/// One named, independently evaluated boolean check contributing to a task's
/// score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Short human-readable label shown in the feedback checklist.
    pub label: String,
    pub satisfied: bool,
    /// Optional one-line explanation, rendered only when unsatisfied.
    pub failure_detail: String,
}

impl Requirement {
    pub fn new(label: impl Into<String>, satisfied: bool) -> Self {
        Self {
            label: label.into(),
            satisfied,
            failure_detail: String::new(),
        }
    }

    pub fn with_detail(label: impl Into<String>, satisfied: bool, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            satisfied,
            failure_detail: detail.into(),
        }
    }
}

/// Outcome of one graded task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// Display name, e.g. `TODO 2`.
    pub name: String,
    pub earned: u32,
    pub max: u32,
    /// Ordered checklist; order is part of the rendered report.
    pub requirements: Vec<Requirement>,
}

/// Tri-state submission classification. The numeric codes are part of the
/// CSV contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    OnTime,
    /// Never produced for this lab (no due date is configured), but the code
    /// remains reserved in the CSV contract.
    Late,
    MissingOrEmpty,
}

impl SubmissionStatus {
    pub fn code(self) -> u8 {
        match self {
            SubmissionStatus::OnTime => 0,
            SubmissionStatus::Late => 1,
            SubmissionStatus::MissingOrEmpty => 2,
        }
    }
}

/// Final grade for one submission, the source of the CSV summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSummary {
    pub student: String,
    pub earned: u32,
    pub possible: u32,
    pub status: SubmissionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_csv_contract() {
        assert_eq!(SubmissionStatus::OnTime.code(), 0);
        assert_eq!(SubmissionStatus::Late.code(), 1);
        assert_eq!(SubmissionStatus::MissingOrEmpty.code(), 2);
    }

    #[test]
    fn requirement_detail_defaults_to_empty() {
        let req = Requirement::new("Has a click handler", true);
        assert!(req.failure_detail.is_empty());

        let req = Requirement::with_detail("Calls the endpoint", false, "expected dummyjson.com");
        assert_eq!(req.failure_detail, "expected dummyjson.com");
    }
}
