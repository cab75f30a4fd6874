//! Course catalog - per-year course listings and detail lookup
//!
//! # Overview
//!
//! A catalog is partitioned by academic year. Each year lists every course
//! code with its title; full course records are fetched one at a time.
//!
//! # Architecture
//!
//! ```text
//! CatalogProvider (NUSMods API, in-memory)
//!     │
//!     ├── list_codes_for_year  ← code → summary map for one year
//!     └── fetch_detail         ← full record for one code
//!            │
//!            ▼
//!     CatalogIndex             ← years loaded so far, in load order
//!            │
//!            ▼
//!     EntityResolver           ← query → Found / Ambiguous / NotFound
//! ```

mod index;
mod memory;
mod model;
mod nusmods;
mod provider;

pub use index::CatalogIndex;
pub use memory::InMemoryCatalog;
pub use model::{
    AcademicYear, CourseCode, CourseEntity, CourseSummary, ParseYearError, Semester,
    WeeklyWorkload,
};
pub use nusmods::{NusModsClient, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use provider::{CatalogError, CatalogProvider, SummaryMap};
