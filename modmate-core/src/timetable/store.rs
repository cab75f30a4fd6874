use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BreakPeriod, Schedule};
use crate::catalog::{CourseCode, CourseEntity};

/// Timetable store failures
///
/// All of these are reported to the user; none are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    #[error("A timetable named '{0}' already exists")]
    DuplicateName(String),

    #[error("Timetable '{0}' not found")]
    ScheduleNotFound(String),

    #[error("Timetable name cannot be empty")]
    EmptyName,
}

/// A user's named schedules
///
/// Names are unique ignoring case. Schedules keep creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Schedule>", into = "Vec<Schedule>")]
pub struct TimetableStore {
    schedules: Vec<Schedule>,
}

impl TryFrom<Vec<Schedule>> for TimetableStore {
    type Error = TimetableError;

    fn try_from(schedules: Vec<Schedule>) -> Result<Self, Self::Error> {
        let mut store = Self::new();
        for schedule in schedules {
            if let Some(existing) = store.find_schedule(schedule.name()) {
                return Err(TimetableError::DuplicateName(existing.name().to_string()));
            }
            store.schedules.push(schedule);
        }
        Ok(store)
    }
}

impl From<TimetableStore> for Vec<Schedule> {
    fn from(store: TimetableStore) -> Self {
        store.schedules
    }
}

impl TimetableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty schedule called `name`
    pub fn create_schedule(&mut self, name: &str) -> Result<&Schedule, TimetableError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TimetableError::EmptyName);
        }
        if let Some(existing) = self.find_schedule(name) {
            return Err(TimetableError::DuplicateName(existing.name().to_string()));
        }

        tracing::info!("Created timetable '{}'", name);
        self.schedules.push(Schedule::new(name));
        Ok(&self.schedules[self.schedules.len() - 1])
    }

    /// Case-insensitive lookup
    pub fn find_schedule(&self, name: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.has_name(name))
    }

    fn schedule_mut(&mut self, name: &str) -> Result<&mut Schedule, TimetableError> {
        self.schedules
            .iter_mut()
            .find(|s| s.has_name(name))
            .ok_or_else(|| TimetableError::ScheduleNotFound(name.trim().to_string()))
    }

    /// Add `course` to the named schedule
    ///
    /// Returns false when the schedule already holds that code.
    pub fn add_course_to(
        &mut self,
        name: &str,
        course: CourseEntity,
    ) -> Result<bool, TimetableError> {
        let schedule = self.schedule_mut(name)?;
        let code = course.code.clone();
        let added = schedule.add_course(course);
        if added {
            tracing::info!("Added {} to timetable '{}'", code, schedule.name());
        }
        Ok(added)
    }

    /// Remove the course with `code` from the named schedule
    pub fn remove_course_from(
        &mut self,
        name: &str,
        code: &CourseCode,
    ) -> Result<bool, TimetableError> {
        let schedule = self.schedule_mut(name)?;
        let removed = schedule.remove_course(code);
        if removed {
            tracing::info!("Removed {} from timetable '{}'", code, schedule.name());
        }
        Ok(removed)
    }

    pub fn add_break_to(&mut self, name: &str, period: BreakPeriod) -> Result<(), TimetableError> {
        let schedule = self.schedule_mut(name)?;
        schedule.add_break(period);
        Ok(())
    }

    /// Remove and return the named schedule
    pub fn remove_schedule(&mut self, name: &str) -> Result<Schedule, TimetableError> {
        let position = self
            .schedules
            .iter()
            .position(|s| s.has_name(name))
            .ok_or_else(|| TimetableError::ScheduleNotFound(name.trim().to_string()))?;

        let removed = self.schedules.remove(position);
        tracing::info!("Deleted timetable '{}'", removed.name());
        Ok(removed)
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
