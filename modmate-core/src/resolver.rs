//! Entity resolution - free-text query to a single course record
//!
//! Resolution runs in two passes over the loaded catalog years:
//!
//! 1. **Code pass**: the uppercased query is looked up as a code, year by
//!    year in load order. The first year containing the code wins.
//! 2. **Name pass**: only when no code matched. Every loaded summary whose
//!    name equals the query (case-insensitive) is collected. One distinct
//!    code is a match; several are reported as ambiguous.
//!
//! A single match is then fetched in full from the provider, using the year
//! the summary was found in. A missing or failed fetch resolves to
//! [`Resolution::NotFound`].

use std::collections::HashSet;

use crate::catalog::{
    AcademicYear, CatalogIndex, CatalogProvider, CourseCode, CourseEntity, CourseSummary,
};

/// Outcome of resolving a query
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Exactly one course matched
    Found(CourseEntity),
    /// Several courses share the queried name; retry by code
    Ambiguous(Vec<CourseSummary>),
    /// Nothing matched, or the matched record could not be fetched
    NotFound,
}

impl Resolution {
    /// The resolved course, if any
    pub fn found(self) -> Option<CourseEntity> {
        match self {
            Resolution::Found(course) => Some(course),
            _ => None,
        }
    }
}

/// Match within an arbitrary collection of records
///
/// Same two-pass rule as catalog resolution, without a provider fetch.
/// Used for courses already held in a schedule or the bookmark list.
pub(crate) fn resolve_among<'a, I>(courses: I, query: &str) -> Resolution
where
    I: IntoIterator<Item = &'a CourseEntity>,
    I::IntoIter: Clone,
{
    let query = query.trim();
    if query.is_empty() {
        return Resolution::NotFound;
    }

    let courses = courses.into_iter();
    let code = CourseCode::new(query);
    if let Some(course) = courses.clone().find(|c| c.code == code) {
        return Resolution::Found(course.clone());
    }

    let query_lower = query.to_lowercase();
    let matches: Vec<&CourseEntity> = courses
        .filter(|c| c.name.to_lowercase() == query_lower)
        .collect();

    match matches.as_slice() {
        [] => Resolution::NotFound,
        [single] => Resolution::Found((*single).clone()),
        many => Resolution::Ambiguous(many.iter().map(|c| c.summary()).collect()),
    }
}

enum SummaryMatch<'a> {
    Unique(AcademicYear, &'a CourseSummary),
    Ambiguous(Vec<CourseSummary>),
    None,
}

/// Resolves course queries against the loaded catalog years
pub struct EntityResolver<'a> {
    index: &'a CatalogIndex,
    provider: &'a dyn CatalogProvider,
}

impl<'a> EntityResolver<'a> {
    pub fn new(index: &'a CatalogIndex, provider: &'a dyn CatalogProvider) -> Self {
        Self { index, provider }
    }

    /// Resolve a code or name to one course record
    ///
    /// Only years already loaded into the index are searched.
    pub fn resolve(&self, query: &str) -> Resolution {
        let (year, summary) = match self.match_summary(query) {
            SummaryMatch::Unique(year, summary) => (year, summary),
            SummaryMatch::Ambiguous(candidates) => {
                tracing::debug!(
                    "Query '{}' matches {} courses by name",
                    query.trim(),
                    candidates.len()
                );
                return Resolution::Ambiguous(candidates);
            }
            SummaryMatch::None => {
                tracing::debug!("Query '{}' matches no loaded course", query.trim());
                return Resolution::NotFound;
            }
        };

        match self.provider.fetch_detail(year, &summary.code) {
            Ok(Some(course)) => Resolution::Found(course),
            Ok(None) => {
                tracing::warn!("Course {} is listed for {} but has no record", summary.code, year);
                Resolution::NotFound
            }
            Err(e) => {
                tracing::warn!("Failed to fetch course {}: {}", summary.code, e);
                Resolution::NotFound
            }
        }
    }

    fn match_summary(&self, query: &str) -> SummaryMatch<'a> {
        let query = query.trim();
        if query.is_empty() {
            return SummaryMatch::None;
        }

        let code = CourseCode::new(query);
        for year in self.index.years() {
            if let Some(summary) = self
                .index
                .loaded_summaries(year)
                .and_then(|summaries| summaries.get(&code))
            {
                return SummaryMatch::Unique(year, summary);
            }
        }

        // A code listed in several years is one course, first year wins
        let query_lower = query.to_lowercase();
        let mut seen = HashSet::new();
        let matches: Vec<(AcademicYear, &'a CourseSummary)> = self
            .index
            .all_loaded_summaries()
            .filter(|(_, summary)| summary.name.to_lowercase() == query_lower)
            .filter(|(_, summary)| seen.insert(summary.code.clone()))
            .collect();

        match matches.as_slice() {
            [] => SummaryMatch::None,
            [(year, summary)] => SummaryMatch::Unique(*year, *summary),
            many => SummaryMatch::Ambiguous(many.iter().map(|(_, s)| (*s).clone()).collect()),
        }
    }
}
