//! Catalog value types
//!
//! Course codes are canonicalised to uppercase on construction so that every
//! map keyed by [`CourseCode`] compares codes case-insensitively.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Month in which a new academic year begins (August)
const ACADEMIC_YEAR_START_MONTH: u32 = 8;

/// An academic year, identified by the calendar year it starts in
///
/// Renders as `2024-2025`, which is also the path segment the NUSMods API
/// uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AcademicYear(i32);

/// Errors produced when parsing an academic year
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseYearError {
    #[error("'{0}' is not an academic year (expected e.g. 2024 or 2024-2025)")]
    Invalid(String),

    #[error("academic year must span consecutive years (got {start}-{end})")]
    NotConsecutive { start: i32, end: i32 },
}

impl AcademicYear {
    /// Create an academic year from its starting calendar year
    pub const fn new(start: i32) -> Self {
        Self(start)
    }

    /// The calendar year this academic year starts in
    pub fn start(&self) -> i32 {
        self.0
    }

    /// The academic year containing today's date
    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// The academic year containing `date`
    ///
    /// January to July belong to the year that started the previous August.
    pub fn for_date(date: NaiveDate) -> Self {
        if date.month() >= ACADEMIC_YEAR_START_MONTH {
            Self(date.year())
        } else {
            Self(date.year() - 1)
        }
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.0 + 1)
    }
}

impl FromStr for AcademicYear {
    type Err = ParseYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse_part = |part: &str| -> Result<i32, ParseYearError> {
            if part.len() != 4 || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(ParseYearError::Invalid(s.to_string()));
            }
            part.parse::<i32>()
                .map_err(|_| ParseYearError::Invalid(s.to_string()))
        };

        match trimmed.split_once(|c: char| c == '-' || c == '/') {
            Some((start, end)) => {
                let start = parse_part(start)?;
                let end = parse_part(end)?;
                if end != start + 1 {
                    return Err(ParseYearError::NotConsecutive { start, end });
                }
                Ok(Self(start))
            }
            None => parse_part(trimmed).map(Self),
        }
    }
}

impl TryFrom<String> for AcademicYear {
    type Error = ParseYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AcademicYear> for String {
    fn from(year: AcademicYear) -> Self {
        year.to_string()
    }
}

/// Canonical (trimmed, uppercase) course code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseCode {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for CourseCode {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<CourseCode> for String {
    fn from(code: CourseCode) -> Self {
        code.0
    }
}

/// Lightweight catalog entry: a code and its title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub code: CourseCode,
    pub name: String,
}

impl CourseSummary {
    pub fn new(code: impl Into<CourseCode>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A teaching period within an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Semester {
    One,
    Two,
    SpecialTermOne,
    SpecialTermTwo,
}

impl Semester {
    /// Map the provider's semester number (1-4)
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Semester::One),
            2 => Some(Semester::Two),
            3 => Some(Semester::SpecialTermOne),
            4 => Some(Semester::SpecialTermTwo),
            _ => None,
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Semester::One => "Semester 1",
            Semester::Two => "Semester 2",
            Semester::SpecialTermOne => "Special Term I",
            Semester::SpecialTermTwo => "Special Term II",
        };
        f.write_str(label)
    }
}

/// Expected weekly hours, split by activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyWorkload {
    pub lecture: f64,
    pub tutorial: f64,
    pub project: f64,
    pub preparation: f64,
}

impl WeeklyWorkload {
    pub fn total(&self) -> f64 {
        self.lecture + self.tutorial + self.project + self.preparation
    }
}

/// Full course record
///
/// Prerequisites are held as codes rather than nested records; provider
/// data may describe cyclic prerequisite chains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntity {
    pub code: CourseCode,
    pub name: String,
    pub faculty: String,
    pub credits: f64,
    pub is_graded: bool,
    #[serde(default)]
    pub offered_semesters: BTreeSet<Semester>,
    #[serde(default)]
    pub prerequisites: Vec<CourseCode>,
    #[serde(default)]
    pub workload: Option<WeeklyWorkload>,
}

impl CourseEntity {
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }

    /// Multi-line description for display
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("{} - {}", self.code, self.name),
            format!("Faculty: {}", self.faculty),
            format!("Credits: {} MCs", self.credits),
            format!(
                "Grading: {}",
                if self.is_graded { "Graded" } else { "Completed Satisfactory/Unsatisfactory" }
            ),
        ];

        if self.offered_semesters.is_empty() {
            lines.push("Offered: not offered this year".to_string());
        } else {
            let semesters: Vec<String> =
                self.offered_semesters.iter().map(|s| s.to_string()).collect();
            lines.push(format!("Offered: {}", semesters.join(", ")));
        }

        if self.prerequisites.is_empty() {
            lines.push("Prerequisites: none".to_string());
        } else {
            let codes: Vec<&str> = self.prerequisites.iter().map(|c| c.as_str()).collect();
            lines.push(format!("Prerequisites: {}", codes.join(", ")));
        }

        if let Some(workload) = &self.workload {
            lines.push(format!(
                "Weekly workload: {} hours (lecture {}, tutorial {}, project {}, preparation {})",
                workload.total(),
                workload.lecture,
                workload.tutorial,
                workload.project,
                workload.preparation
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_academic_year_parsing() {
        assert_eq!("2024".parse::<AcademicYear>(), Ok(AcademicYear::new(2024)));
        assert_eq!("2024-2025".parse::<AcademicYear>(), Ok(AcademicYear::new(2024)));
        assert_eq!(" 2023/2024 ".parse::<AcademicYear>(), Ok(AcademicYear::new(2023)));

        assert_eq!(
            "2024-2026".parse::<AcademicYear>(),
            Err(ParseYearError::NotConsecutive {
                start: 2024,
                end: 2026
            })
        );
        assert!(matches!(
            "24".parse::<AcademicYear>(),
            Err(ParseYearError::Invalid(_))
        ));
        assert!("next year".parse::<AcademicYear>().is_err());
    }

    #[test]
    fn test_academic_year_display() {
        assert_eq!(AcademicYear::new(2024).to_string(), "2024-2025");
    }

    #[test]
    fn test_academic_year_starts_in_august() {
        let july = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        let august = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();

        assert_eq!(AcademicYear::for_date(july), AcademicYear::new(2024));
        assert_eq!(AcademicYear::for_date(august), AcademicYear::new(2025));
    }

    #[test]
    fn test_academic_year_serde_as_string() {
        let json = serde_json::to_string(&AcademicYear::new(2022)).unwrap();
        assert_eq!(json, "\"2022-2023\"");

        let parsed: AcademicYear = serde_json::from_str("\"2022\"").unwrap();
        assert_eq!(parsed, AcademicYear::new(2022));
    }

    #[test]
    fn test_course_code_is_canonical() {
        assert_eq!(CourseCode::new("  cs2103t "), CourseCode::new("CS2103T"));
        assert_eq!(CourseCode::new("cs2103t").as_str(), "CS2103T");

        let parsed: CourseCode = serde_json::from_str("\"ma1521\"").unwrap();
        assert_eq!(parsed.as_str(), "MA1521");
    }

    #[test]
    fn test_semester_numbers() {
        assert_eq!(Semester::from_number(1), Some(Semester::One));
        assert_eq!(Semester::from_number(4), Some(Semester::SpecialTermTwo));
        assert_eq!(Semester::from_number(5), None);
    }

    #[test]
    fn test_render_course() {
        let course = CourseEntity {
            code: CourseCode::new("CS2103"),
            name: "Software Engineering".to_string(),
            faculty: "Computing".to_string(),
            credits: 4.0,
            is_graded: true,
            offered_semesters: [Semester::Two, Semester::One].into_iter().collect(),
            prerequisites: vec![CourseCode::new("CS2030"), CourseCode::new("CS2040")],
            workload: Some(WeeklyWorkload {
                lecture: 2.0,
                tutorial: 1.0,
                project: 4.0,
                preparation: 3.0,
            }),
        };

        let expected = "\
CS2103 - Software Engineering
Faculty: Computing
Credits: 4 MCs
Grading: Graded
Offered: Semester 1, Semester 2
Prerequisites: CS2030, CS2040
Weekly workload: 10 hours (lecture 2, tutorial 1, project 4, preparation 3)";

        assert_eq!(course.render(), expected);
    }
}
