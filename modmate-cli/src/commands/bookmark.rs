use anyhow::Result;
use std::io::Write;

use modmate_core::Resolution;

use super::{write_candidates, Command, Flow};
use crate::context::AppContext;

/// `bookmark <code or name>`
pub struct BookmarkCommand;

impl Command for BookmarkCommand {
    fn name(&self) -> &'static str {
        "bookmark"
    }

    fn syntax(&self) -> &'static str {
        "bookmark <mod code or name>"
    }

    fn description(&self) -> &'static str {
        "Bookmark a mod for later reference."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[("<mod code or name>", "The code or name of the mod to bookmark.")]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let query = args.trim();
        if query.is_empty() {
            return Err(self.invalid_arguments().into());
        }

        match ctx.resolve(query) {
            Resolution::Found(course) => {
                let line = format!("{}: {}", course.code, course.name);
                if ctx.user_mut().add_bookmark(course) {
                    writeln!(out, "Bookmarked {line}")?;
                } else {
                    writeln!(out, "Already bookmarked {line}")?;
                }
            }
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

/// `bookmarks`
pub struct BookmarksCommand;

impl Command for BookmarksCommand {
    fn name(&self) -> &'static str {
        "bookmarks"
    }

    fn syntax(&self) -> &'static str {
        "bookmarks"
    }

    fn description(&self) -> &'static str {
        "View all bookmarked mods."
    }

    fn execute(&self, ctx: &mut AppContext, _args: &str, out: &mut dyn Write) -> Result<Flow> {
        let bookmarks = ctx.user().bookmarks();
        if bookmarks.is_empty() {
            writeln!(out, "You have no bookmarks.")?;
            return Ok(Flow::Continue);
        }

        writeln!(out, "Bookmarks:")?;
        for (i, course) in bookmarks.iter().enumerate() {
            writeln!(out, "  {}. {} - {}", i + 1, course.code, course.name)?;
        }
        Ok(Flow::Continue)
    }
}

/// `removebookmark <code or name>`
pub struct RemoveBookmarkCommand;

impl Command for RemoveBookmarkCommand {
    fn name(&self) -> &'static str {
        "removebookmark"
    }

    fn syntax(&self) -> &'static str {
        "removebookmark <mod code or name>"
    }

    fn description(&self) -> &'static str {
        "Remove a mod from your bookmarks."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[("<mod code or name>", "The code or name of the bookmarked mod.")]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let query = args.trim();
        if query.is_empty() {
            return Err(self.invalid_arguments().into());
        }

        match ctx.user().find_bookmark(query) {
            Resolution::Found(course) => {
                ctx.user_mut().remove_bookmark(&course.code);
                writeln!(out, "Removed bookmark {}.", course.code)?;
            }
            Resolution::Ambiguous(candidates) => {
                writeln!(
                    out,
                    "Multiple bookmarks found with that name. Please specify by module code:"
                )?;
                write_candidates(out, &candidates)?;
            }
            Resolution::NotFound => writeln!(out, "Mod \"{query}\" is not bookmarked.")?,
        }
        Ok(Flow::Continue)
    }
}
