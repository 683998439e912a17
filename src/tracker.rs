use crate::config::SemesterWindow;
use crate::daily::build_day_view;
use crate::models::{AttendanceLedger, DailyMarkSet, DayView, StatsResponse};
use crate::scoring::{record_mark, MarkError, MarkOutcome};
use crate::stats::build_stats_at;
use crate::storage::{day_key, load_or_default, KeyValueStore, StoreError, LEDGER_KEY};
use crate::timetable::{is_weekend, weekday_name, Timetable};
use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Mark(#[from] MarkError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no classes are scheduled on {weekday} {date}")]
    NoClasses { date: NaiveDate, weekday: &'static str },
    #[error("{subject} is not scheduled on {weekday} {date}")]
    NotScheduled {
        subject: String,
        date: NaiveDate,
        weekday: &'static str,
    },
}

/// Attendance bookkeeping over an injected key-value store.
pub struct Tracker {
    store: Box<dyn KeyValueStore>,
    timetable: Timetable,
    semester: SemesterWindow,
}

impl Tracker {
    pub fn new(store: Box<dyn KeyValueStore>, timetable: Timetable, semester: SemesterWindow) -> Self {
        Self {
            store,
            timetable,
            semester,
        }
    }

    pub fn ledger(&self) -> Result<AttendanceLedger, StoreError> {
        load_or_default(self.store.as_ref(), LEDGER_KEY)
    }

    pub fn marks_for(&self, date: NaiveDate) -> Result<DailyMarkSet, StoreError> {
        load_or_default(self.store.as_ref(), &day_key(date))
    }

    /// Records a mark for a subject scheduled on `date` and writes the ledger
    /// and the date's marks together.
    pub fn mark(&self, subject: &str, date: NaiveDate, is_present: bool) -> Result<MarkOutcome, TrackerError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(MarkError::EmptySubject.into());
        }
        let weekday = date.weekday();
        if is_weekend(weekday) {
            return Err(TrackerError::NoClasses {
                date,
                weekday: weekday_name(weekday),
            });
        }
        if !self.timetable.is_scheduled(date, subject) {
            return Err(TrackerError::NotScheduled {
                subject: subject.to_string(),
                date,
                weekday: weekday_name(weekday),
            });
        }

        let ledger = self.ledger()?;
        let marks = self.marks_for(date)?;
        let outcome = record_mark(&ledger, &marks, subject, is_present)?;

        self.store.set_all(vec![
            (LEDGER_KEY.to_string(), serde_json::to_string(&outcome.ledger).map_err(StoreError::from)?),
            (day_key(date), serde_json::to_string(&outcome.marks).map_err(StoreError::from)?),
        ])?;

        info!(
            subject = %outcome.subject,
            %date,
            present = is_present,
            kind = ?outcome.kind,
            score = outcome.record.attendance_score,
            total = outcome.record.total_classes,
            "attendance recorded"
        );
        Ok(outcome)
    }

    pub fn day_view(&self, date: NaiveDate, today: NaiveDate) -> Result<DayView, StoreError> {
        let marks = self.marks_for(date)?;
        Ok(build_day_view(date, today, &self.timetable, &marks))
    }

    pub fn stats(&self, today: NaiveDate) -> Result<StatsResponse, StoreError> {
        let ledger = self.ledger()?;
        Ok(build_stats_at(today, &ledger, &self.timetable, self.semester))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MarkKind, SlotStatus, SubjectRecord};
    use crate::storage::MemoryStore;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker() -> Tracker {
        Tracker::new(Box::new(MemoryStore::new()), Timetable::default(), SemesterWindow::default())
    }

    #[test]
    fn marks_persist_ledger_and_day() {
        let tracker = tracker();
        let monday = date(2025, 6, 2);
        let wednesday = date(2025, 6, 4);

        tracker.mark("CO", monday, true).unwrap();
        assert_eq!(tracker.ledger().unwrap()["CO"], SubjectRecord { total_classes: 1, attendance_score: 1.0 });

        tracker.mark("CO", wednesday, false).unwrap();
        assert_eq!(tracker.ledger().unwrap()["CO"], SubjectRecord { total_classes: 2, attendance_score: 0.0 });

        let edit = tracker.mark("CO", monday, false).unwrap();
        assert_eq!(edit.kind, MarkKind::Updated);
        assert_eq!(tracker.ledger().unwrap()["CO"], SubjectRecord { total_classes: 2, attendance_score: 0.0 });
        assert_eq!(tracker.marks_for(monday).unwrap().get("CO"), Some(&false));
    }

    #[test]
    fn day_view_reflects_marks() {
        let tracker = tracker();
        let monday = date(2025, 6, 2);
        tracker.mark("TCP/IP", monday, true).unwrap();

        let view = tracker.day_view(monday, monday).unwrap();
        let slot = view.subjects.iter().find(|slot| slot.subject == "TCP/IP").unwrap();
        assert_eq!(slot.status, SlotStatus::Marked { present: true });
    }

    #[test]
    fn weekend_marks_are_rejected() {
        let tracker = tracker();
        let saturday = date(2025, 6, 7);
        let err = tracker.mark("Physics", saturday, false).unwrap_err();
        assert!(matches!(err, TrackerError::NoClasses { .. }));
        assert!(tracker.ledger().unwrap().is_empty());
        assert!(tracker.marks_for(saturday).unwrap().is_empty());
    }

    #[test]
    fn unscheduled_subjects_are_rejected() {
        let tracker = tracker();
        let tuesday = date(2025, 6, 3);
        let err = tracker.mark("CO", tuesday, true).unwrap_err();
        assert!(matches!(err, TrackerError::NotScheduled { ref subject, .. } if subject == "CO"));
        assert!(tracker.ledger().unwrap().is_empty());

        let outcome = tracker.mark(" MDC ", tuesday, true).unwrap();
        assert_eq!(outcome.subject, "MDC");
    }

    #[test]
    fn weekend_view_is_empty_even_with_ledger_data() {
        let tracker = tracker();
        tracker.mark("CO", date(2025, 6, 2), true).unwrap();
        let view = tracker.day_view(date(2025, 6, 7), date(2025, 6, 7)).unwrap();
        assert!(view.is_weekend);
        assert!(view.subjects.is_empty());
    }

    #[test]
    fn stats_cover_every_marked_subject() {
        let tracker = tracker();
        let monday = date(2025, 6, 2);
        tracker.mark("CO", monday, true).unwrap();
        tracker.mark("MDC", monday, false).unwrap();

        let stats = tracker.stats(monday).unwrap();
        assert_eq!(stats.total_subjects, 2);
        assert_eq!(stats.total_classes, 2);
        assert_eq!(stats.overall_attendance, 0.5);
    }

    #[test]
    fn malformed_stored_ledger_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(LEDGER_KEY, "not json".to_string()).unwrap();
        let tracker = Tracker::new(Box::new(store), Timetable::default(), SemesterWindow::default());

        assert!(tracker.ledger().unwrap().is_empty());
        let outcome = tracker.mark("CO", date(2025, 6, 2), true).unwrap();
        assert_eq!(outcome.record.total_classes, 1);
    }

    struct FlakyStore {
        inner: MemoryStore,
        fail: Arc<AtomicBool>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set_all(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set_all(entries)
        }
    }

    #[test]
    fn failed_write_does_not_double_count() {
        let fail = Arc::new(AtomicBool::new(false));
        let store = FlakyStore {
            inner: MemoryStore::new(),
            fail: Arc::clone(&fail),
        };
        let tracker = Tracker::new(Box::new(store), Timetable::default(), SemesterWindow::default());
        let monday = date(2025, 6, 2);

        fail.store(true, Ordering::SeqCst);
        assert!(matches!(tracker.mark("CO", monday, true), Err(TrackerError::Store(_))));
        assert!(tracker.ledger().unwrap().is_empty());
        assert!(tracker.marks_for(monday).unwrap().is_empty());

        fail.store(false, Ordering::SeqCst);
        tracker.mark("CO", monday, true).unwrap();
        tracker.mark("CO", monday, true).unwrap();
        assert_eq!(tracker.ledger().unwrap()["CO"].total_classes, 1);
    }

    #[test]
    fn empty_subject_is_a_mark_error() {
        let tracker = tracker();
        let err = tracker.mark("", date(2025, 6, 2), true).unwrap_err();
        assert!(matches!(err, TrackerError::Mark(MarkError::EmptySubject)));
    }
}
