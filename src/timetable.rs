use chrono::{Datelike, NaiveDate, Weekday};

const MONDAY: &[&str] = &["Minor", "MDC", "TCP/IP", "C++", "CO"];
const TUESDAY: &[&str] = &["Minor", "Minor", "MDC", "E-Waste", "TCP/IP"];
const WEDNESDAY: &[&str] = &["Minor", "CO", "MDC", "E-Waste", "TCP/IP"];
const THURSDAY: &[&str] = &["Minor", "C++", "TCP/IP", "E-Waste", "CO"];
const FRIDAY: &[&str] = &["Minor", "CO", "C++", "E-Waste", "C++"];

/// Weekly schedule, one ordered row per weekday starting at Monday.
/// A subject listed twice in a row has two periods that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    rows: [Vec<String>; 7],
}

impl Default for Timetable {
    fn default() -> Self {
        Self::from_weekdays(&[MONDAY, TUESDAY, WEDNESDAY, THURSDAY, FRIDAY])
    }
}

impl Timetable {
    /// Builds a timetable from weekday rows (Monday first). Missing rows and
    /// the weekend stay empty.
    pub fn from_weekdays(rows: &[&[&str]]) -> Self {
        let mut table: [Vec<String>; 7] = Default::default();
        for (slot, row) in table.iter_mut().take(5).zip(rows) {
            *slot = row.iter().map(|subject| subject.to_string()).collect();
        }
        Self { rows: table }
    }

    pub fn subjects_on(&self, weekday: Weekday) -> &[String] {
        if is_weekend(weekday) {
            return &[];
        }
        &self.rows[weekday.num_days_from_monday() as usize]
    }

    pub fn subjects_for(&self, date: NaiveDate) -> &[String] {
        self.subjects_on(date.weekday())
    }

    pub fn is_scheduled(&self, date: NaiveDate, subject: &str) -> bool {
        self.subjects_for(date).iter().any(|scheduled| scheduled == subject)
    }

    /// Distinct subjects of a day in first-seen order, with their period count.
    pub fn periods_on(&self, weekday: Weekday) -> Vec<(String, u32)> {
        let mut periods: Vec<(String, u32)> = Vec::new();
        for subject in self.subjects_on(weekday) {
            match periods.iter_mut().find(|(name, _)| name == subject) {
                Some((_, count)) => *count += 1,
                None => periods.push((subject.clone(), 1)),
            }
        }
        periods
    }

    pub fn classes_per_week(&self, subject: &str) -> u32 {
        self.rows
            .iter()
            .flatten()
            .filter(|scheduled| scheduled.as_str() == subject)
            .count() as u32
    }
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
