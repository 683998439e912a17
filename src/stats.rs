use crate::config::SemesterWindow;
use crate::models::{AttendanceLedger, AttendanceStatus, SemesterSummary, StatsResponse, SubjectRecord, SubjectStats};
use crate::timetable::Timetable;
use chrono::NaiveDate;

pub const SAFE_THRESHOLD: f64 = 75.0;
pub const CRITICAL_THRESHOLD: f64 = 50.0;

pub fn build_stats_at(
    today: NaiveDate,
    ledger: &AttendanceLedger,
    timetable: &Timetable,
    semester: SemesterWindow,
) -> StatsResponse {
    let weeks_remaining = weeks_remaining(today, semester);

    let subjects: Vec<SubjectStats> = ledger
        .iter()
        .map(|(subject, record)| subject_stats(subject, record, timetable, weeks_remaining))
        .collect();

    let overall_attendance = overall_attendance(ledger);
    let total_classes = ledger
        .values()
        .fold(0u32, |sum, record| sum.saturating_add(record.total_classes));

    StatsResponse {
        overall_attendance,
        overall_status: classify(overall_attendance),
        total_subjects: ledger.len(),
        total_classes,
        semester: SemesterSummary {
            start: semester.start,
            end: semester.end,
            weeks_remaining,
            elapsed_percent: elapsed_percent(today, semester),
        },
        subjects,
    }
}

/// Mean score across subjects, 0 for an empty ledger.
pub fn overall_attendance(ledger: &AttendanceLedger) -> f64 {
    if ledger.is_empty() {
        return 0.0;
    }
    let sum: f64 = ledger.values().map(|record| record.attendance_score).sum();
    sum / ledger.len() as f64
}

pub fn classify(score: f64) -> AttendanceStatus {
    if score < CRITICAL_THRESHOLD {
        AttendanceStatus::Critical
    } else if score < SAFE_THRESHOLD {
        AttendanceStatus::Warning
    } else {
        AttendanceStatus::Good
    }
}

/// Attended count back-derived from the score; an approximation because the
/// score is not a ratio.
pub fn attended_classes(record: &SubjectRecord) -> u32 {
    let attended = (record.attendance_score / 100.0 * f64::from(record.total_classes)).round();
    (attended.max(0.0) as u32).min(record.total_classes)
}

/// Smallest N with `(attended + N) / (total + N) >= 0.75`.
pub fn classes_needed_for_75(record: &SubjectRecord) -> u32 {
    if record.attendance_score >= SAFE_THRESHOLD {
        return 0;
    }
    let attended = i64::from(attended_classes(record));
    let total = i64::from(record.total_classes);
    (3 * total - 4 * attended).max(0) as u32
}

/// Consecutive presents the scoring rule needs (one point each) to reach 75.
pub fn classes_to_safe_zone(record: &SubjectRecord) -> u32 {
    (SAFE_THRESHOLD - record.attendance_score).ceil().max(0.0) as u32
}

fn subject_stats(subject: &str, record: &SubjectRecord, timetable: &Timetable, weeks_remaining: u32) -> SubjectStats {
    let attended = attended_classes(record);
    let classes_per_week = timetable.classes_per_week(subject);
    let remaining_classes = classes_per_week.saturating_mul(weeks_remaining);
    let projected_total = record.total_classes.saturating_add(remaining_classes);
    let completion_percent = if projected_total == 0 {
        0.0
    } else {
        f64::from(record.total_classes) / f64::from(projected_total) * 100.0
    };

    SubjectStats {
        subject: subject.to_string(),
        total_classes: record.total_classes,
        attendance_score: record.attendance_score,
        attended_classes: attended,
        missed_classes: record.total_classes - attended,
        status: classify(record.attendance_score),
        classes_needed_for_75: classes_needed_for_75(record),
        classes_to_safe_zone: classes_to_safe_zone(record),
        classes_per_week,
        remaining_classes,
        projected_total,
        completion_percent,
    }
}

fn weeks_remaining(today: NaiveDate, semester: SemesterWindow) -> u32 {
    let from = today.max(semester.start);
    if from >= semester.end {
        return 0;
    }
    let days = (semester.end - from).num_days();
    ((days + 6) / 7) as u32
}

fn elapsed_percent(today: NaiveDate, semester: SemesterWindow) -> f64 {
    let length = (semester.end - semester.start).num_days();
    if length <= 0 {
        return if today >= semester.end { 100.0 } else { 0.0 };
    }
    let elapsed = (today.clamp(semester.start, semester.end) - semester.start).num_days();
    elapsed as f64 / length as f64 * 100.0
}
