//! User aggregate - timetables and bookmarks owned by one user

use serde::{Deserialize, Serialize};

use crate::catalog::{CourseCode, CourseEntity};
use crate::resolver::{resolve_among, Resolution};
use crate::timetable::TimetableStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserRecord")]
pub struct User {
    timetables: TimetableStore,
    bookmarks: Vec<CourseEntity>,
}

/// Saved form of a [`User`]; bookmarks are re-added one by one
#[derive(Deserialize)]
struct UserRecord {
    #[serde(default)]
    timetables: TimetableStore,
    #[serde(default)]
    bookmarks: Vec<CourseEntity>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let mut user = User {
            timetables: record.timetables,
            bookmarks: Vec::new(),
        };
        for course in record.bookmarks {
            if !user.push_bookmark(course) {
                tracing::warn!("Dropped repeated bookmark in saved session");
            }
        }
        user
    }
}

impl User {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timetables(&self) -> &TimetableStore {
        &self.timetables
    }

    pub fn timetables_mut(&mut self) -> &mut TimetableStore {
        &mut self.timetables
    }

    pub fn bookmarks(&self) -> &[CourseEntity] {
        &self.bookmarks
    }

    /// Bookmark `course` unless its code is already bookmarked
    pub fn add_bookmark(&mut self, course: CourseEntity) -> bool {
        let code = course.code.clone();
        let added = self.push_bookmark(course);
        if added {
            tracing::info!("Bookmarked {}", code);
        }
        added
    }

    fn push_bookmark(&mut self, course: CourseEntity) -> bool {
        if self.bookmarks.iter().any(|b| b.code == course.code) {
            return false;
        }
        self.bookmarks.push(course);
        true
    }

    pub fn remove_bookmark(&mut self, code: &CourseCode) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| &b.code != code);
        self.bookmarks.len() != before
    }

    /// Match `query` against bookmarked courses
    pub fn find_bookmark(&self, query: &str) -> Resolution {
        resolve_among(&self.bookmarks, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn course(code: &str, name: &str) -> CourseEntity {
        CourseEntity {
            code: CourseCode::new(code),
            name: name.to_string(),
            faculty: "Science".to_string(),
            credits: 4.0,
            is_graded: true,
            offered_semesters: Default::default(),
            prerequisites: Vec::new(),
            workload: None,
        }
    }

    #[test]
    fn test_bookmarks_dedup_by_code() {
        let mut user = User::new();

        assert!(user.add_bookmark(course("MA1521", "Calculus for Computing")));
        assert!(!user.add_bookmark(course("ma1521", "Calculus for Computing")));
        assert_eq!(user.bookmarks().len(), 1);
    }

    #[test]
    fn test_remove_bookmark() {
        let mut user = User::new();
        user.add_bookmark(course("MA1521", "Calculus for Computing"));

        let resolved = user.find_bookmark("calculus for computing").found().unwrap();
        assert!(user.remove_bookmark(&resolved.code));
        assert!(!user.remove_bookmark(&resolved.code));
        assert!(user.bookmarks().is_empty());
    }

    #[test]
    fn test_user_round_trips_through_json() {
        let mut user = User::new();
        user.add_bookmark(course("MA1521", "Calculus for Computing"));
        user.timetables_mut().create_schedule("Y1S1").unwrap();
        user.timetables_mut()
            .add_course_to("y1s1", course("CS1231", "Discrete Structures"))
            .unwrap();

        let json = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn test_saved_timetable_names_stay_unique() {
        let json = r#"{
            "timetables": [
                {"name": "CS", "courses": [], "breaks": []},
                {"name": "cs", "courses": [], "breaks": []}
            ],
            "bookmarks": []
        }"#;

        let err = serde_json::from_str::<User>(json).unwrap_err();
        assert!(err.to_string().contains("A timetable named 'CS' already exists"));
    }

    #[test]
    fn test_saved_repeats_are_dropped() {
        let software_engineering = serde_json::to_value(course("CS2103", "Software Engineering"))
            .unwrap();
        let json = serde_json::json!({
            "timetables": [{
                "name": "Y2S1",
                "courses": [software_engineering, software_engineering],
                "breaks": []
            }],
            "bookmarks": [software_engineering, software_engineering]
        });

        let user: User = serde_json::from_value(json).unwrap();
        let schedule = user.timetables().find_schedule("y2s1").unwrap();
        assert_eq!(schedule.courses().len(), 1);
        assert_eq!(user.bookmarks().len(), 1);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let user: User = serde_json::from_str("{}").unwrap();
        assert_eq!(user, User::new());
    }
}
