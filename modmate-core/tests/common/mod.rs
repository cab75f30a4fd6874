//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Once;

use modmate_core::{AcademicYear, CourseCode, CourseEntity, InMemoryCatalog};

static INIT: Once = Once::new();

/// Route tracing output through the test harness (once per test binary)
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn course(code: &str, name: &str) -> CourseEntity {
    CourseEntity {
        code: CourseCode::new(code),
        name: name.to_string(),
        faculty: "Computing".to_string(),
        credits: 4.0,
        is_graded: true,
        offered_semesters: Default::default(),
        prerequisites: Vec::new(),
        workload: None,
    }
}

/// Two 2024 courses sharing the title "Software Engineering"
pub fn software_engineering_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    let year = AcademicYear::new(2024);
    catalog.insert_course(year, course("CS2103", "Software Engineering"));
    catalog.insert_course(year, course("CS2106", "Software Engineering"));
    catalog.insert_course(year, course("CS1231", "Discrete Structures"));
    catalog
}
