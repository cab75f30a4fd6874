//! NUSMods catalog provider
//!
//! Fetches course listings and course records from the public NUSMods API:
//!
//! ```text
//! {base}/{acadYear}/moduleList.json      ← [{ moduleCode, title, ... }]
//! {base}/{acadYear}/modules/{code}.json  ← full module record
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

use super::{
    AcademicYear, CatalogError, CatalogProvider, CourseCode, CourseEntity, CourseSummary,
    Semester, SummaryMap, WeeklyWorkload,
};

/// Default NUSMods API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.nusmods.com/v2";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the NUSMods API
pub struct NusModsClient {
    base_url: String,
    #[cfg(feature = "nusmods")]
    http: reqwest::blocking::Client,
}

impl NusModsClient {
    /// Create a client for `base_url` with a per-request timeout
    #[cfg(feature = "nusmods")]
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CatalogError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("modmate/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CatalogError::Malformed {
                context: "HTTP client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Stub for when the nusmods feature is disabled
    #[cfg(not(feature = "nusmods"))]
    pub fn new(base_url: &str, _timeout_secs: u64) -> Result<Self, CatalogError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn module_list_url(&self, year: AcademicYear) -> String {
        format!("{}/{}/moduleList.json", self.base_url, year)
    }

    fn module_url(&self, year: AcademicYear, code: &CourseCode) -> String {
        format!("{}/{}/modules/{}.json", self.base_url, year, code)
    }

    /// GET `url`, returning `None` on 404
    #[cfg(feature = "nusmods")]
    fn get_text(&self, url: &str, year: AcademicYear) -> Result<Option<String>, CatalogError> {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| CatalogError::Unavailable {
                year,
                reason: format!("request to {url} failed: {e}"),
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(CatalogError::Unavailable {
                year,
                reason: format!("HTTP {} from {}", response.status(), url),
            });
        }

        let body = response.text().map_err(|e| CatalogError::Unavailable {
            year,
            reason: format!("failed to read response body from {url}: {e}"),
        })?;

        Ok(Some(body))
    }

    #[cfg(not(feature = "nusmods"))]
    fn get_text(&self, _url: &str, year: AcademicYear) -> Result<Option<String>, CatalogError> {
        Err(CatalogError::Unavailable {
            year,
            reason: "NUSMods support is not enabled. Rebuild with --features nusmods".to_string(),
        })
    }
}

impl CatalogProvider for NusModsClient {
    fn list_codes_for_year(&self, year: AcademicYear) -> Result<SummaryMap, CatalogError> {
        let url = self.module_list_url(year);
        match self.get_text(&url, year)? {
            Some(body) => parse_module_list(&body, year),
            None => Err(CatalogError::Unavailable {
                year,
                reason: format!("no module list published at {url}"),
            }),
        }
    }

    fn fetch_detail(
        &self,
        year: AcademicYear,
        code: &CourseCode,
    ) -> Result<Option<CourseEntity>, CatalogError> {
        let url = self.module_url(year, code);
        match self.get_text(&url, year)? {
            Some(body) => parse_module_detail(&body).map(Some),
            None => {
                tracing::debug!("No NUSMods record for {} in {}", code, year);
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModuleListEntry {
    module_code: String,
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModuleDetail {
    module_code: String,
    title: String,
    #[serde(default)]
    faculty: String,
    #[serde(default)]
    module_credit: Value,
    #[serde(default)]
    grading_basis_description: Option<String>,
    #[serde(default)]
    workload: Option<Value>,
    #[serde(default)]
    prereq_tree: Option<Value>,
    #[serde(default)]
    semester_data: Vec<SemesterEntry>,
}

#[derive(Debug, Deserialize)]
struct SemesterEntry {
    semester: u8,
}

/// Decode a `moduleList.json` body
pub(crate) fn parse_module_list(body: &str, year: AcademicYear) -> Result<SummaryMap, CatalogError> {
    let entries: Vec<ModuleListEntry> =
        serde_json::from_str(body).map_err(|e| CatalogError::Malformed {
            context: format!("module list for {year}"),
            reason: e.to_string(),
        })?;

    Ok(entries
        .into_iter()
        .map(|entry| {
            let summary = CourseSummary::new(entry.module_code, entry.title);
            (summary.code.clone(), summary)
        })
        .collect())
}

/// Decode a `modules/{code}.json` body
pub(crate) fn parse_module_detail(body: &str) -> Result<CourseEntity, CatalogError> {
    let detail: ModuleDetail = serde_json::from_str(body).map_err(|e| CatalogError::Malformed {
        context: "module record".to_string(),
        reason: e.to_string(),
    })?;

    let code = CourseCode::new(&detail.module_code);
    let credits = parse_credits(&detail.module_credit).ok_or_else(|| CatalogError::Malformed {
        context: format!("module {code}"),
        reason: format!("unreadable moduleCredit: {}", detail.module_credit),
    })?;

    let offered_semesters: BTreeSet<Semester> = detail
        .semester_data
        .iter()
        .filter_map(|entry| Semester::from_number(entry.semester))
        .collect();

    let mut prerequisites = Vec::new();
    if let Some(tree) = &detail.prereq_tree {
        collect_prerequisites(tree, &mut prerequisites);
    }

    Ok(CourseEntity {
        code,
        name: detail.title,
        faculty: detail.faculty,
        credits,
        is_graded: detail.grading_basis_description.as_deref() == Some("Graded"),
        offered_semesters,
        prerequisites,
        workload: detail.workload.as_ref().and_then(parse_workload),
    })
}

fn parse_credits(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Workload arrays are `[lecture, tutorial, laboratory, project, preparation]`
fn parse_workload(value: &Value) -> Option<WeeklyWorkload> {
    let hours = value.as_array()?;
    if hours.len() < 5 {
        return None;
    }
    Some(WeeklyWorkload {
        lecture: hours[0].as_f64()?,
        tutorial: hours[1].as_f64()?,
        project: hours[3].as_f64()?,
        preparation: hours[4].as_f64()?,
    })
}

/// Collect leaf codes from a prerequisite tree in first-seen order
///
/// Leaves look like `CS1010:D`; the grade suffix is dropped.
fn collect_prerequisites(tree: &Value, codes: &mut Vec<CourseCode>) {
    match tree {
        Value::String(leaf) => {
            let raw = leaf.split(':').next().unwrap_or_default().trim();
            if raw.is_empty() {
                return;
            }
            let code = CourseCode::new(raw);
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_prerequisites(item, codes);
            }
        }
        Value::Object(map) => {
            for value in map.values() {
                collect_prerequisites(value, codes);
            }
        }
        _ => {}
    }
}
