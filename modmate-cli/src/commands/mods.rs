//! Catalog browsing commands

use anyhow::{Context, Result};
use std::io::Write;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use modmate_core::{AcademicYear, Resolution};

use super::{write_candidates, Command, Flow};
use crate::context::AppContext;

/// Table row for a course listing
#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Title")]
    title: String,
}

/// Table row for search results
#[derive(Tabled)]
struct SearchResultRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Year")]
    year: String,
}

fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

/// `viewmod <code or name>`
pub struct ViewModCommand;

impl Command for ViewModCommand {
    fn name(&self) -> &'static str {
        "viewmod"
    }

    fn syntax(&self) -> &'static str {
        "viewmod <mod code or name>"
    }

    fn description(&self) -> &'static str {
        "View the details of a mod."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[("<mod code or name>", "The code or name of the mod to view.")]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let query = args.trim();
        if query.is_empty() {
            return Err(self.invalid_arguments().into());
        }

        match ctx.resolve(query) {
            Resolution::Found(course) => writeln!(out, "{}", course.render())?,
            Resolution::Ambiguous(candidates) => {
                writeln!(
                    out,
                    "Multiple modules found with that name. Please specify by module code:"
                )?;
                write_candidates(out, &candidates)?;
            }
            Resolution::NotFound => writeln!(out, "Mod \"{query}\" not found.")?,
        }
        Ok(Flow::Continue)
    }
}

/// `viewallmods [year]`
pub struct ViewAllModsCommand;

impl Command for ViewAllModsCommand {
    fn name(&self) -> &'static str {
        "viewallmods"
    }

    fn syntax(&self) -> &'static str {
        "viewallmods [year]"
    }

    fn description(&self) -> &'static str {
        "View all mods offered in an academic year."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[(
            "[year]",
            "Academic year such as 2024 or 2024-2025. Defaults to the current year.",
        )]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let arg = args.trim();
        let year = if arg.is_empty() {
            ctx.current_year()
        } else {
            match arg.parse::<AcademicYear>() {
                Ok(year) => year,
                Err(e) => {
                    writeln!(out, "Invalid academic year \"{arg}\": {e}")?;
                    return Ok(Flow::Continue);
                }
            }
        };

        let summaries = ctx
            .load_year(year)
            .with_context(|| format!("Could not load modules for academic year {year}"))?;

        if summaries.is_empty() {
            writeln!(out, "No module data found for academic year {year}.")?;
            return Ok(Flow::Continue);
        }

        let rows: Vec<CourseRow> = summaries
            .values()
            .map(|summary| CourseRow {
                code: summary.code.to_string(),
                title: summary.name.clone(),
            })
            .collect();

        writeln!(out, "Modules for academic year {year} ({}):", rows.len())?;
        writeln!(out, "{}", render_table(&rows))?;
        Ok(Flow::Continue)
    }
}

/// `searchmod <term>`
pub struct SearchModCommand;

impl Command for SearchModCommand {
    fn name(&self) -> &'static str {
        "searchmod"
    }

    fn syntax(&self) -> &'static str {
        "searchmod <search query>"
    }

    fn description(&self) -> &'static str {
        "Search loaded mods by code or name."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[(
            "<search query>",
            "Text contained in the code or name, ignoring case.",
        )]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let query = args.trim();
        if query.is_empty() {
            return Err(self.invalid_arguments().into());
        }

        tracing::info!("Searching for '{}'", query);
        let results = ctx.index().search(query);
        if results.is_empty() {
            writeln!(out, "No mods found matching the search query.")?;
            return Ok(Flow::Continue);
        }

        let rows: Vec<SearchResultRow> = results
            .iter()
            .map(|(year, summary)| SearchResultRow {
                code: summary.code.to_string(),
                title: summary.name.clone(),
                year: year.to_string(),
            })
            .collect();

        writeln!(out, "Found {} mod(s):", rows.len())?;
        writeln!(out, "{}", render_table(&rows))?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, run};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_viewmod_found() {
        let mut ctx = context();
        let (_, output) = run(&mut ctx, "viewmod", "cs1231");
        assert!(output.starts_with("CS1231 - Discrete Structures\n"));
    }

    #[test]
    fn test_viewmod_ambiguous() {
        let mut ctx = context();
        let (_, output) = run(&mut ctx, "viewmod", "software engineering");
        assert_eq!(
            output,
            "Multiple modules found with that name. Please specify by module code:\n\
             - CS2103: Software Engineering\n\
             - CS2106: Software Engineering\n"
        );
    }

    #[test]
    fn test_viewmod_not_found() {
        let mut ctx = context();
        let (_, output) = run(&mut ctx, "viewmod", "ZZ9999");
        assert_eq!(output, "Mod \"ZZ9999\" not found.\n");

        let (_, output) = run(&mut ctx, "viewmod", "  ");
        assert_eq!(output, "Usage: viewmod <mod code or name>\n");
    }

    #[test]
    fn test_viewallmods_loads_requested_year() {
        let mut ctx = context();
        let previous = AcademicYear::new(2023);
        assert!(!ctx.index().is_loaded(previous));

        let (_, output) = run(&mut ctx, "viewallmods", "2023/2024");
        assert!(output.starts_with("Modules for academic year 2023-2024 (1):\n"));
        assert!(output.contains("CS1101S"));
        assert!(ctx.index().is_loaded(previous));

        // Now resolvable from the later-loaded year
        let (_, output) = run(&mut ctx, "viewmod", "programming methodology");
        assert!(output.starts_with("CS1101S - Programming Methodology"));
    }

    #[test]
    fn test_viewallmods_current_year_sorted() {
        let mut ctx = context();
        let (_, output) = run(&mut ctx, "viewallmods", "");

        assert!(output.starts_with("Modules for academic year 2024-2025 (4):\n"));
        let cs1231 = output.find("CS1231").unwrap();
        let cs2103 = output.find("CS2103").unwrap();
        let ma1521 = output.find("MA1521").unwrap();
        assert!(cs1231 < cs2103 && cs2103 < ma1521);
    }

    #[test]
    fn test_viewallmods_bad_or_empty_year() {
        let mut ctx = context();
        let (_, output) = run(&mut ctx, "viewallmods", "next year");
        assert!(output.starts_with("Invalid academic year \"next year\""));

        let (_, output) = run(&mut ctx, "viewallmods", "2010");
        assert_eq!(output, "No module data found for academic year 2010-2011.\n");
    }

    #[test]
    fn test_searchmod() {
        let mut ctx = context();
        let (_, output) = run(&mut ctx, "searchmod", "SOFTWARE");
        assert!(output.starts_with("Found 2 mod(s):\n"));
        assert!(output.contains("CS2103") && output.contains("CS2106"));
        assert!(output.contains("2024-2025"));

        let (_, output) = run(&mut ctx, "searchmod", "quantum");
        assert_eq!(output, "No mods found matching the search query.\n");
    }
}
