//! Timetable store behaviour with resolved courses

mod common;

use chrono::{NaiveTime, Weekday};
use common::{course, init_test_logging, software_engineering_catalog};
use modmate_core::{
    AcademicYear, BreakPeriod, CatalogIndex, EntityResolver, TimetableError, TimetableStore,
};
use pretty_assertions::assert_eq;

#[test]
fn test_duplicate_name_ignores_case() {
    init_test_logging();
    let mut store = TimetableStore::new();

    store.create_schedule("CS").unwrap();
    assert_eq!(
        store.create_schedule("cs").unwrap_err(),
        TimetableError::DuplicateName("CS".to_string())
    );

    assert_eq!(store.len(), 1);
    assert_eq!(store.schedules()[0].name(), "CS");
}

#[test]
fn test_empty_name_is_rejected() {
    let mut store = TimetableStore::new();
    assert_eq!(store.create_schedule("  ").unwrap_err(), TimetableError::EmptyName);
    assert!(store.is_empty());
}

#[test]
fn test_course_added_once() {
    init_test_logging();
    let mut store = TimetableStore::new();
    store.create_schedule("CS").unwrap();

    let x = course("CS2103", "Software Engineering");
    assert!(store.add_course_to("CS", x.clone()).unwrap());
    assert!(!store.add_course_to("CS", x).unwrap());

    let schedule = store.find_schedule("cs").unwrap();
    assert_eq!(schedule.courses().len(), 1);
}

#[test]
fn test_removal_reports_true_once() {
    init_test_logging();
    let mut store = TimetableStore::new();
    store.create_schedule("CS").unwrap();

    let x = course("CS2103", "Software Engineering");
    store.add_course_to("CS", x.clone()).unwrap();

    assert!(store.remove_course_from("CS", &x.code).unwrap());
    assert!(!store.remove_course_from("CS", &x.code).unwrap());
}

#[test]
fn test_unknown_schedule() {
    let mut store = TimetableStore::new();
    let x = course("CS2103", "Software Engineering");
    let lunch = BreakPeriod::new(
        Weekday::Fri,
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        "Lunch",
    )
    .unwrap();

    let expected = TimetableError::ScheduleNotFound("Y2S1".to_string());
    assert_eq!(store.add_course_to("Y2S1", x.clone()).unwrap_err(), expected);
    assert_eq!(store.remove_course_from("Y2S1", &x.code).unwrap_err(), expected);
    assert_eq!(store.add_break_to("Y2S1", lunch).unwrap_err(), expected);
    assert_eq!(store.remove_schedule("Y2S1").unwrap_err(), expected);
}

#[test]
fn test_resolved_course_through_mixed_case_names() {
    init_test_logging();
    let catalog = software_engineering_catalog();
    let index = CatalogIndex::bootstrap(&catalog, AcademicYear::new(2024)).unwrap();
    let resolver = EntityResolver::new(&index, &catalog);
    let mut store = TimetableStore::new();

    store.create_schedule("Y1S1").unwrap();
    let cs2103 = resolver.resolve("CS2103").found().unwrap();
    assert!(store.add_course_to("Y1S1", cs2103.clone()).unwrap());
    assert!(store.remove_course_from("y1s1", &cs2103.code).unwrap());
    assert!(store.find_schedule("Y1S1").unwrap().courses().is_empty());
}

#[test]
fn test_delete_schedule_frees_name() {
    let mut store = TimetableStore::new();
    store.create_schedule("Y1S1").unwrap();
    store.create_schedule("Y1S2").unwrap();

    let removed = store.remove_schedule("y1s1").unwrap();
    assert_eq!(removed.name(), "Y1S1");
    assert_eq!(store.len(), 1);

    store.create_schedule("y1s1").unwrap();
    let names: Vec<&str> = store.schedules().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Y1S2", "y1s1"]);
}
