use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TimetableError;
use crate::catalog::{CourseCode, CourseEntity};
use crate::resolver::{resolve_among, Resolution};

/// Invalid break period bounds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Break must end after it starts (got {start}-{end})")]
pub struct BreakPeriodError {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A recurring weekly block kept free of classes
///
/// Breaks are not checked against course times or each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BreakRecord")]
pub struct BreakPeriod {
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub label: String,
}

#[derive(Deserialize)]
struct BreakRecord {
    day: Weekday,
    start: NaiveTime,
    end: NaiveTime,
    #[serde(default)]
    label: String,
}

impl TryFrom<BreakRecord> for BreakPeriod {
    type Error = BreakPeriodError;

    fn try_from(record: BreakRecord) -> Result<Self, Self::Error> {
        BreakPeriod::new(record.day, record.start, record.end, record.label)
    }
}

impl BreakPeriod {
    pub fn new(
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
        label: impl Into<String>,
    ) -> Result<Self, BreakPeriodError> {
        if end <= start {
            return Err(BreakPeriodError { start, end });
        }
        Ok(Self {
            day,
            start,
            end,
            label: label.into(),
        })
    }

    pub fn render(&self) -> String {
        let mut line = format!(
            "{} {}-{}",
            weekday_name(self.day),
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        );
        if !self.label.is_empty() {
            line.push(' ');
            line.push_str(&self.label);
        }
        line
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A named timetable
///
/// Courses keep insertion order and never repeat a code. Schedules are
/// created through [`TimetableStore`](super::TimetableStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleRecord")]
pub struct Schedule {
    name: String,
    courses: Vec<CourseEntity>,
    breaks: Vec<BreakPeriod>,
}

/// Saved form of a [`Schedule`], rebuilt through `add_course`
#[derive(Deserialize)]
struct ScheduleRecord {
    name: String,
    #[serde(default)]
    courses: Vec<CourseEntity>,
    #[serde(default)]
    breaks: Vec<BreakPeriod>,
}

impl TryFrom<ScheduleRecord> for Schedule {
    type Error = TimetableError;

    fn try_from(record: ScheduleRecord) -> Result<Self, Self::Error> {
        let name = record.name.trim();
        if name.is_empty() {
            return Err(TimetableError::EmptyName);
        }

        let mut schedule = Schedule::new(name);
        for course in record.courses {
            if !schedule.add_course(course) {
                tracing::warn!("Dropped repeated course in saved timetable '{}'", name);
            }
        }
        schedule.breaks = record.breaks;
        Ok(schedule)
    }
}

impl Schedule {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            courses: Vec::new(),
            breaks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn courses(&self) -> &[CourseEntity] {
        &self.courses
    }

    pub fn breaks(&self) -> &[BreakPeriod] {
        &self.breaks
    }

    pub fn contains(&self, code: &CourseCode) -> bool {
        self.courses.iter().any(|c| &c.code == code)
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Append `course` unless its code is already present
    ///
    /// Returns whether the course was added.
    pub(crate) fn add_course(&mut self, course: CourseEntity) -> bool {
        if self.contains(&course.code) {
            return false;
        }
        self.courses.push(course);
        true
    }

    /// Remove the course with `code`, returning whether one was removed
    pub(crate) fn remove_course(&mut self, code: &CourseCode) -> bool {
        let before = self.courses.len();
        self.courses.retain(|c| &c.code != code);
        self.courses.len() != before
    }

    pub(crate) fn add_break(&mut self, period: BreakPeriod) {
        self.breaks.push(period);
    }

    /// Match `query` against the courses in this schedule
    ///
    /// Code first, then case-insensitive name; duplicate names are
    /// reported as ambiguous.
    pub fn find_course(&self, query: &str) -> Resolution {
        resolve_among(&self.courses, query)
    }

    /// Total credits of all scheduled courses
    pub fn total_credits(&self) -> f64 {
        self.courses.iter().map(|c| c.credits).sum()
    }

    /// Deterministic listing of courses then breaks
    pub fn render(&self) -> String {
        let mut lines = vec![format!("Timetable: {}", self.name)];

        lines.push(format!("Courses ({} MCs):", self.total_credits()));
        if self.courses.is_empty() {
            lines.push("  (no courses)".to_string());
        }
        for (i, course) in self.courses.iter().enumerate() {
            lines.push(format!(
                "  {}. {} - {} ({} MCs)",
                i + 1,
                course.code,
                course.name,
                course.credits
            ));
        }

        lines.push("Breaks:".to_string());
        if self.breaks.is_empty() {
            lines.push("  (no breaks)".to_string());
        }
        for (i, period) in self.breaks.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, period.render()));
        }

        lines.join("\n")
    }
}
