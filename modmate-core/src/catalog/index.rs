//! Catalog index - per-year course listings cached for the process lifetime
//!
//! Years are kept in the order they were loaded. The current year is loaded
//! first at start-up, so it is always the first year consulted during
//! resolution.

use super::{AcademicYear, CatalogError, CatalogProvider, CourseSummary, SummaryMap};
use std::collections::HashSet;

#[derive(Debug, Clone)]
struct YearListing {
    year: AcademicYear,
    summaries: SummaryMap,
}

/// Loaded academic-year listings, in load order
///
/// Mutation requires `&mut self`; a caller sharing the index across
/// threads must wrap it in a lock so a year's listing is only ever observed
/// fully inserted.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    years: Vec<YearListing>,
}

impl CatalogIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index with `current_year` loaded first
    pub fn bootstrap(
        provider: &dyn CatalogProvider,
        current_year: AcademicYear,
    ) -> Result<Self, CatalogError> {
        let mut index = Self::new();
        index.ensure_year_loaded(provider, current_year)?;
        Ok(index)
    }

    /// Load `year` from the provider unless it is already cached
    ///
    /// A failed load leaves the year absent so a later call retries.
    pub fn ensure_year_loaded(
        &mut self,
        provider: &dyn CatalogProvider,
        year: AcademicYear,
    ) -> Result<(), CatalogError> {
        if self.is_loaded(year) {
            tracing::debug!("Using cached catalog for {}", year);
            return Ok(());
        }

        let summaries = provider.list_codes_for_year(year)?;
        tracing::info!("Loaded catalog for {}: {} courses", year, summaries.len());
        self.insert_year(year, summaries);
        Ok(())
    }

    /// Cached listing for `year`, loading it first if necessary
    pub fn summaries_for_year(
        &mut self,
        provider: &dyn CatalogProvider,
        year: AcademicYear,
    ) -> Result<&SummaryMap, CatalogError> {
        self.ensure_year_loaded(provider, year)?;
        self.loaded_summaries(year)
            .ok_or_else(|| CatalogError::Malformed {
                context: year.to_string(),
                reason: "catalog year missing right after loading".to_string(),
            })
    }

    /// Insert a listing directly
    ///
    /// Returns false, leaving the index unchanged, when `year` is already
    /// present.
    pub fn insert_year(&mut self, year: AcademicYear, summaries: SummaryMap) -> bool {
        if self.is_loaded(year) {
            return false;
        }
        self.years.push(YearListing { year, summaries });
        true
    }

    /// Cached listing for `year`, without loading
    pub fn loaded_summaries(&self, year: AcademicYear) -> Option<&SummaryMap> {
        self.years
            .iter()
            .find(|listing| listing.year == year)
            .map(|listing| &listing.summaries)
    }

    pub fn is_loaded(&self, year: AcademicYear) -> bool {
        self.years.iter().any(|listing| listing.year == year)
    }

    /// Loaded years, in load order
    pub fn years(&self) -> impl Iterator<Item = AcademicYear> + '_ {
        self.years.iter().map(|listing| listing.year)
    }

    /// Every cached summary, year by year in load order
    pub fn all_loaded_summaries(&self) -> impl Iterator<Item = (AcademicYear, &CourseSummary)> {
        self.years.iter().flat_map(|listing| {
            listing
                .summaries
                .values()
                .map(move |summary| (listing.year, summary))
        })
    }

    /// Search loaded summaries by query string
    ///
    /// Matches the code or name as a case-insensitive substring. A code
    /// present in several years is reported once, from the first year that
    /// has it. Results are sorted by code.
    pub fn search(&self, query: &str) -> Vec<(AcademicYear, &CourseSummary)> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut results: Vec<(AcademicYear, &CourseSummary)> = self
            .all_loaded_summaries()
            .filter(|(_, summary)| {
                summary.code.as_str().to_lowercase().contains(&query_lower)
                    || summary.name.to_lowercase().contains(&query_lower)
            })
            .filter(|(_, summary)| seen.insert(summary.code.clone()))
            .collect();

        results.sort_by(|a, b| a.1.code.cmp(&b.1.code));
        results
    }

    /// Total number of summaries across loaded years
    pub fn course_count(&self) -> usize {
        self.years.iter().map(|listing| listing.summaries.len()).sum()
    }
}
