//! ModMate core library
//!
//! Turns free-text course queries into canonical course records and keeps a
//! user's named timetables consistent. Nothing in this crate writes to the
//! console; callers render the returned outcomes.

pub mod catalog;
pub mod config;
pub mod resolver;
pub mod timetable;
pub mod user;

pub use catalog::{
    AcademicYear, CatalogError, CatalogIndex, CatalogProvider, CourseCode, CourseEntity,
    CourseSummary, InMemoryCatalog, NusModsClient, Semester, WeeklyWorkload,
};
pub use config::ModmateConfig;
pub use resolver::{EntityResolver, Resolution};
pub use timetable::{BreakPeriod, BreakPeriodError, Schedule, TimetableError, TimetableStore};
pub use user::User;
