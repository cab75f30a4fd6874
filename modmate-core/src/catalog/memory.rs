//! In-memory catalog provider
//!
//! Backs tests and embedders that already hold course data. Supports
//! summary-only entries and unavailable years so partial data can be
//! modelled.

use std::cell::Cell;
use std::collections::{BTreeMap, HashSet};

use super::{
    AcademicYear, CatalogError, CatalogProvider, CourseCode, CourseEntity, CourseSummary,
    SummaryMap,
};

#[derive(Debug, Default)]
struct YearData {
    summaries: SummaryMap,
    details: BTreeMap<CourseCode, CourseEntity>,
}

/// Catalog provider backed by maps held in memory
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    years: BTreeMap<AcademicYear, YearData>,
    unavailable: HashSet<AcademicYear>,
    list_calls: Cell<usize>,
    detail_calls: Cell<usize>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a course with both its summary and its full record
    pub fn insert_course(&mut self, year: AcademicYear, course: CourseEntity) {
        let data = self.years.entry(year).or_default();
        data.summaries.insert(course.code.clone(), course.summary());
        data.details.insert(course.code.clone(), course);
    }

    /// Add a listing entry whose full record cannot be fetched
    pub fn insert_summary(&mut self, year: AcademicYear, summary: CourseSummary) {
        let data = self.years.entry(year).or_default();
        data.summaries.insert(summary.code.clone(), summary);
    }

    /// Make every request for `year` fail with [`CatalogError::Unavailable`]
    pub fn mark_unavailable(&mut self, year: AcademicYear) {
        self.unavailable.insert(year);
    }

    /// Number of `list_codes_for_year` calls served so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    /// Number of `fetch_detail` calls served so far
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.get()
    }

    fn check_available(&self, year: AcademicYear) -> Result<(), CatalogError> {
        if self.unavailable.contains(&year) {
            return Err(CatalogError::Unavailable {
                year,
                reason: "year marked unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn list_codes_for_year(&self, year: AcademicYear) -> Result<SummaryMap, CatalogError> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.check_available(year)?;

        Ok(self
            .years
            .get(&year)
            .map(|data| data.summaries.clone())
            .unwrap_or_default())
    }

    fn fetch_detail(
        &self,
        year: AcademicYear,
        code: &CourseCode,
    ) -> Result<Option<CourseEntity>, CatalogError> {
        self.detail_calls.set(self.detail_calls.get() + 1);
        self.check_available(year)?;

        Ok(self
            .years
            .get(&year)
            .and_then(|data| data.details.get(code))
            .cloned())
    }
}
