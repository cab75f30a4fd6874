//! Timetables - named schedules of courses and break periods
//!
//! [`TimetableStore`] owns every [`Schedule`] and is the only way to create,
//! find, change or remove one.

mod schedule;
mod store;

pub use schedule::{BreakPeriod, BreakPeriodError, Schedule};
pub use store::{TimetableError, TimetableStore};
