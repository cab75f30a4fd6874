//! State shared by every command for the lifetime of the shell

use modmate_core::catalog::SummaryMap;
use modmate_core::{
    AcademicYear, CatalogError, CatalogIndex, CatalogProvider, EntityResolver, Resolution, User,
};

pub struct AppContext {
    provider: Box<dyn CatalogProvider>,
    index: CatalogIndex,
    user: User,
    current_year: AcademicYear,
}

impl AppContext {
    pub fn new(
        provider: Box<dyn CatalogProvider>,
        index: CatalogIndex,
        user: User,
        current_year: AcademicYear,
    ) -> Self {
        Self {
            provider,
            index,
            user,
            current_year,
        }
    }

    pub fn current_year(&self) -> AcademicYear {
        self.current_year
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut User {
        &mut self.user
    }

    /// Resolve a course query against the years loaded so far
    pub fn resolve(&self, query: &str) -> Resolution {
        EntityResolver::new(&self.index, self.provider.as_ref()).resolve(query)
    }

    /// Listing for `year`, fetched on first use
    pub fn load_year(&mut self, year: AcademicYear) -> Result<&SummaryMap, CatalogError> {
        self.index.summaries_for_year(self.provider.as_ref(), year)
    }
}
