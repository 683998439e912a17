use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_SCORE: f64 = 100.0;
pub const MIN_SCORE: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SubjectRecord {
    pub total_classes: u32,
    pub attendance_score: f64,
}

/// Per-subject counters, keyed by subject name (case-sensitive).
pub type AttendanceLedger = BTreeMap<String, SubjectRecord>;

/// Marks recorded for one calendar date: subject name to present/absent.
pub type DailyMarkSet = BTreeMap<String, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    Marked,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Critical,
    Warning,
    Good,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Good => "Good",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkRequest {
    pub subject: String,
    pub date: Option<NaiveDate>,
    pub present: bool,
}

#[derive(Debug, Deserialize)]
pub struct MarkForm {
    pub subject: String,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkResponse {
    pub subject: String,
    pub date: NaiveDate,
    pub present: bool,
    pub kind: MarkKind,
    pub message: String,
    pub record: SubjectRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotStatus {
    Awaiting,
    Marked { present: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectSlot {
    pub subject: String,
    pub periods: u32,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub weekday: String,
    pub is_weekend: bool,
    pub is_today: bool,
    pub previous: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
    pub subjects: Vec<SubjectSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectStats {
    pub subject: String,
    pub total_classes: u32,
    pub attendance_score: f64,
    pub attended_classes: u32,
    pub missed_classes: u32,
    pub status: AttendanceStatus,
    pub classes_needed_for_75: u32,
    pub classes_to_safe_zone: u32,
    pub classes_per_week: u32,
    pub remaining_classes: u32,
    pub projected_total: u32,
    pub completion_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub weeks_remaining: u32,
    pub elapsed_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub overall_attendance: f64,
    pub overall_status: AttendanceStatus,
    pub total_subjects: usize,
    pub total_classes: u32,
    pub semester: SemesterSummary,
    pub subjects: Vec<SubjectStats>,
}
