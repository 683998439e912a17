use crate::models::{DailyMarkSet, DayView, SlotStatus, SubjectSlot};
use crate::timetable::{is_weekend, weekday_name, Timetable};
use chrono::{Datelike, NaiveDate};

/// Cross-references a date's stored marks with that weekday's timetable row.
/// Weekends carry no subjects whatever was stored for them.
pub fn build_day_view(
    date: NaiveDate,
    today: NaiveDate,
    timetable: &Timetable,
    marks: &DailyMarkSet,
) -> DayView {
    let weekday = date.weekday();
    let is_weekend = is_weekend(weekday);

    let subjects = if is_weekend {
        Vec::new()
    } else {
        timetable
            .periods_on(weekday)
            .into_iter()
            .map(|(subject, periods)| {
                let status = match marks.get(&subject) {
                    Some(&present) => SlotStatus::Marked { present },
                    None => SlotStatus::Awaiting,
                };
                SubjectSlot {
                    subject,
                    periods,
                    status,
                }
            })
            .collect()
    };

    DayView {
        date,
        weekday: weekday_name(weekday).to_string(),
        is_weekend,
        is_today: date == today,
        previous: date.pred_opt(),
        next: date.succ_opt(),
        subjects,
    }
}
