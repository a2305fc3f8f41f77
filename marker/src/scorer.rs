//! Score computation.
//!
//! Every task awards a proportional share of its maximum for the
//! requirements it satisfies. Count-based proportions keep the formula
//! auditable and stable when requirements are added or removed.

use crate::types::{Requirement, SubmissionStatus, TaskResult};

/// Marks awarded for handing in a non-empty submission. This lab has no due
/// date, so a present submission always earns the full amount.
pub const SUBMISSION_MAX: u32 = 20;

/// Overall maximum: four tasks plus the submission component.
pub const TOTAL_MAX: u32 = 100;

/// Proportional score: `round(max * satisfied / total)`. The divisor is
/// clamped to at least 1 so an empty requirement list scores 0 rather than
/// dividing by zero.
pub fn score_from_requirements(requirements: &[Requirement], max: u32) -> u32 {
    let total = requirements.len().max(1) as u32;
    let satisfied = requirements.iter().filter(|r| r.satisfied).count() as u32;
    (f64::from(max) * f64::from(satisfied) / f64::from(total)).round() as u32
}

pub fn submission_marks(status: SubmissionStatus) -> u32 {
    match status {
        SubmissionStatus::MissingOrEmpty => 0,
        SubmissionStatus::OnTime | SubmissionStatus::Late => SUBMISSION_MAX,
    }
}

/// Total grade, capped at [`TOTAL_MAX`].
pub fn total_earned(tasks: &[TaskResult], submission_marks: u32) -> u32 {
    let task_sum: u32 = tasks.iter().map(|t| t.earned).sum();
    (task_sum + submission_marks).min(TOTAL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(flags: &[bool]) -> Vec<Requirement> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &ok)| Requirement::new(format!("req {i}"), ok))
            .collect()
    }

    fn task(earned: u32) -> TaskResult {
        TaskResult {
            name: "t".into(),
            earned,
            max: 20,
            requirements: vec![],
        }
    }

    #[test]
    fn all_satisfied_earns_max() {
        assert_eq!(score_from_requirements(&reqs(&[true, true, true]), 20), 20);
    }

    #[test]
    fn none_satisfied_earns_zero() {
        assert_eq!(score_from_requirements(&reqs(&[false, false]), 20), 0);
    }

    #[test]
    fn three_of_nine_rounds_to_seven() {
        let flags = [true, true, true, false, false, false, false, false, false];
        assert_eq!(score_from_requirements(&reqs(&flags), 20), 7);
    }

    #[test]
    fn two_of_three_rounds_to_thirteen() {
        assert_eq!(score_from_requirements(&reqs(&[true, true, false]), 20), 13);
    }

    #[test]
    fn score_stays_within_bounds() {
        for n in 1..=9usize {
            for k in 0..=n {
                let mut flags = vec![true; k];
                flags.resize(n, false);
                let score = score_from_requirements(&reqs(&flags), 20);
                assert!(score <= 20, "{k}/{n} scored {score}");
            }
        }
    }

    #[test]
    fn empty_requirement_list_scores_zero() {
        assert_eq!(score_from_requirements(&[], 20), 0);
    }

    #[test]
    fn submission_marks_by_status() {
        assert_eq!(submission_marks(SubmissionStatus::OnTime), 20);
        assert_eq!(submission_marks(SubmissionStatus::Late), 20);
        assert_eq!(submission_marks(SubmissionStatus::MissingOrEmpty), 0);
    }

    #[test]
    fn total_sums_tasks_and_submission() {
        let tasks = vec![task(20), task(13), task(7), task(0)];
        assert_eq!(total_earned(&tasks, 20), 60);
        assert_eq!(total_earned(&tasks, 0), 40);
    }

    #[test]
    fn total_is_capped_at_one_hundred() {
        let tasks = vec![task(30), task(30), task(30), task(30)];
        assert_eq!(total_earned(&tasks, 20), 100);
    }
}
