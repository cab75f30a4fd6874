//! Catalog provider seam
//!
//! A provider is the only component that talks to the outside world for
//! course data. Everything above it works on the values it returns.

use std::collections::BTreeMap;
use thiserror::Error;

use super::{AcademicYear, CourseCode, CourseEntity, CourseSummary};

/// All summaries for one academic year, ordered by code
pub type SummaryMap = BTreeMap<CourseCode, CourseSummary>;

/// Provider-layer failures
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The provider could not be reached or refused the request
    #[error("Course catalog for {year} is unavailable: {reason}")]
    Unavailable { year: AcademicYear, reason: String },

    /// The provider answered with data that could not be decoded
    #[error("Malformed catalog data for {context}: {reason}")]
    Malformed { context: String, reason: String },
}

/// Source of course listings and course records
pub trait CatalogProvider {
    /// List every course code offered in `year`
    fn list_codes_for_year(&self, year: AcademicYear) -> Result<SummaryMap, CatalogError>;

    /// Fetch the full record for `code` as catalogued in `year`
    ///
    /// `Ok(None)` means the provider has no record for that code.
    fn fetch_detail(
        &self,
        year: AcademicYear,
        code: &CourseCode,
    ) -> Result<Option<CourseEntity>, CatalogError>;
}
