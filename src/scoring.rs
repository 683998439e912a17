//! The attendance update rule.
//!
//! The score is a clamped accumulator, not attended/total: a first present
//! mark adds 1, a first absent mark subtracts 3, and flipping an existing
//! mark for the same date moves the score by 4 in the matching direction.

use crate::models::{AttendanceLedger, DailyMarkSet, MarkKind, SubjectRecord, MAX_SCORE, MIN_SCORE};
use thiserror::Error;

const PRESENT_CREDIT: f64 = 1.0;
const ABSENT_PENALTY: f64 = 3.0;
const FLIP_DELTA: f64 = PRESENT_CREDIT + ABSENT_PENALTY;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MarkError {
    #[error("subject must not be empty")]
    EmptySubject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkOutcome {
    pub subject: String,
    pub ledger: AttendanceLedger,
    pub marks: DailyMarkSet,
    pub kind: MarkKind,
    pub previous: Option<bool>,
    pub record: SubjectRecord,
}

/// Applies one present/absent mark for `subject` on the date that `marks`
/// belongs to. Inputs are left untouched; the updated copies are returned.
pub fn record_mark(
    ledger: &AttendanceLedger,
    marks: &DailyMarkSet,
    subject: &str,
    is_present: bool,
) -> Result<MarkOutcome, MarkError> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(MarkError::EmptySubject);
    }

    let mut ledger = ledger.clone();
    let mut marks = marks.clone();
    let previous = marks.get(subject).copied();

    let record = ledger.entry(subject.to_string()).or_default();
    let kind = match previous {
        None => {
            record.total_classes = record.total_classes.saturating_add(1);
            record.attendance_score = if is_present {
                raise(record.attendance_score, PRESENT_CREDIT)
            } else {
                lower(record.attendance_score, ABSENT_PENALTY)
            };
            MarkKind::Marked
        }
        Some(true) if !is_present => {
            record.attendance_score = lower(record.attendance_score, FLIP_DELTA);
            MarkKind::Updated
        }
        Some(false) if is_present => {
            record.attendance_score = raise(record.attendance_score, FLIP_DELTA);
            MarkKind::Updated
        }
        Some(_) => MarkKind::Unchanged,
    };
    let record = *record;

    marks.insert(subject.to_string(), is_present);

    Ok(MarkOutcome {
        subject: subject.to_string(),
        ledger,
        marks,
        kind,
        previous,
        record,
    })
}

/// Message shown after a mark, e.g. `Attendance Marked! CO: Present (+1%)`.
pub fn describe(subject: &str, kind: MarkKind, is_present: bool) -> String {
    let verb = match kind {
        MarkKind::Marked => "Marked",
        MarkKind::Updated | MarkKind::Unchanged => "Updated",
    };
    let delta = if is_present { "Present (+1%)" } else { "Absent (-3%)" };
    format!("Attendance {verb}! {subject}: {delta}")
}

fn raise(score: f64, by: f64) -> f64 {
    (score + by).min(MAX_SCORE)
}

fn lower(score: f64, by: f64) -> f64 {
    (score - by).max(MIN_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(subject: &str, total_classes: u32, attendance_score: f64) -> AttendanceLedger {
        let mut ledger = AttendanceLedger::new();
        ledger.insert(
            subject.to_string(),
            SubjectRecord {
                total_classes,
                attendance_score,
            },
        );
        ledger
    }

    #[test]
    fn first_present_mark_adds_one() {
        let outcome = record_mark(&ledger_with("CO", 4, 50.0), &DailyMarkSet::new(), "CO", true).unwrap();
        assert_eq!(outcome.kind, MarkKind::Marked);
        assert_eq!(outcome.record.total_classes, 5);
        assert_eq!(outcome.record.attendance_score, 51.0);
        assert_eq!(outcome.marks.get("CO"), Some(&true));
    }

    #[test]
    fn first_absent_mark_subtracts_three() {
        let outcome = record_mark(&ledger_with("CO", 4, 50.0), &DailyMarkSet::new(), "CO", false).unwrap();
        assert_eq!(outcome.record.total_classes, 5);
        assert_eq!(outcome.record.attendance_score, 47.0);
    }

    #[test]
    fn score_is_clamped_at_both_ends() {
        let top = record_mark(&ledger_with("CO", 1, 100.0), &DailyMarkSet::new(), "CO", true).unwrap();
        assert_eq!(top.record.attendance_score, 100.0);

        let bottom = record_mark(&ledger_with("CO", 1, 2.0), &DailyMarkSet::new(), "CO", false).unwrap();
        assert_eq!(bottom.record.attendance_score, 0.0);
    }

    #[test]
    fn flipping_present_to_absent_moves_four_without_counting_again() {
        let first = record_mark(&ledger_with("MDC", 0, 60.0), &DailyMarkSet::new(), "MDC", true).unwrap();
        let edit = record_mark(&first.ledger, &first.marks, "MDC", false).unwrap();
        assert_eq!(edit.kind, MarkKind::Updated);
        assert_eq!(edit.previous, Some(true));
        assert_eq!(edit.record.total_classes, 1);
        assert_eq!(edit.record.attendance_score, 57.0);
    }

    #[test]
    fn flipping_absent_to_present_moves_four() {
        let first = record_mark(&ledger_with("MDC", 0, 60.0), &DailyMarkSet::new(), "MDC", false).unwrap();
        let edit = record_mark(&first.ledger, &first.marks, "MDC", true).unwrap();
        assert_eq!(edit.record.total_classes, 1);
        assert_eq!(edit.record.attendance_score, 61.0);
    }

    #[test]
    fn same_mark_twice_is_a_no_op() {
        let first = record_mark(&AttendanceLedger::new(), &DailyMarkSet::new(), "C++", true).unwrap();
        let again = record_mark(&first.ledger, &first.marks, "C++", true).unwrap();
        assert_eq!(again.kind, MarkKind::Unchanged);
        assert_eq!(again.ledger, first.ledger);
        assert_eq!(again.marks, first.marks);
    }

    #[test]
    fn monday_tuesday_edit_scenario() {
        let monday = record_mark(&AttendanceLedger::new(), &DailyMarkSet::new(), "CO", true).unwrap();
        assert_eq!(monday.record, SubjectRecord { total_classes: 1, attendance_score: 1.0 });

        let tuesday = record_mark(&monday.ledger, &DailyMarkSet::new(), "CO", false).unwrap();
        assert_eq!(tuesday.record, SubjectRecord { total_classes: 2, attendance_score: 0.0 });

        let edit = record_mark(&tuesday.ledger, &monday.marks, "CO", false).unwrap();
        assert_eq!(edit.record, SubjectRecord { total_classes: 2, attendance_score: 0.0 });
    }

    #[test]
    fn score_stays_in_range_over_long_sequences() {
        let mut ledger = AttendanceLedger::new();
        let mut day = DailyMarkSet::new();
        for step in 0u32..500 {
            if step % 7 == 0 {
                day = DailyMarkSet::new();
            }
            let present = (step * 31 + 7) % 5 != 0;
            let outcome = record_mark(&ledger, &day, "TCP/IP", present).unwrap();
            let score = outcome.record.attendance_score;
            assert!((0.0..=100.0).contains(&score), "score {score} out of range at step {step}");
            ledger = outcome.ledger;
            day = outcome.marks;
        }
    }

    #[test]
    fn subjects_are_case_sensitive_and_trimmed() {
        let first = record_mark(&AttendanceLedger::new(), &DailyMarkSet::new(), " co ", true).unwrap();
        let second = record_mark(&first.ledger, &first.marks, "CO", true).unwrap();
        assert_eq!(second.ledger.len(), 2);
        assert!(second.ledger.contains_key("co"));
    }

    #[test]
    fn empty_subject_is_rejected() {
        let err = record_mark(&AttendanceLedger::new(), &DailyMarkSet::new(), "  ", true).unwrap_err();
        assert_eq!(err, MarkError::EmptySubject);
    }

    #[test]
    fn describe_matches_mark_kind() {
        assert_eq!(describe("CO", MarkKind::Marked, true), "Attendance Marked! CO: Present (+1%)");
        assert_eq!(describe("CO", MarkKind::Updated, false), "Attendance Updated! CO: Absent (-3%)");
    }
}
