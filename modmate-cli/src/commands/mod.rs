//! Shell commands
//!
//! Every command implements [`Command`] and is registered once in
//! [`CommandRegistry::with_defaults`]. Commands are the only place where
//! resolver and timetable outcomes are turned into text.

use anyhow::Result;
use std::io::{self, Write};
use thiserror::Error;

use modmate_core::CourseSummary;

use crate::context::AppContext;

mod bookmark;
mod mods;
mod system;
mod timetable;

/// What the shell should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments. Usage: {syntax}")]
    InvalidArguments { syntax: &'static str },
}

pub trait Command {
    /// Token typed at the prompt
    fn name(&self) -> &'static str;

    fn syntax(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Placeholder names with their meaning
    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    fn usage(&self) -> String {
        let mut usage = format!("Usage: {}", self.syntax());
        for (placeholder, meaning) in self.arguments() {
            usage.push_str(&format!("\n  {placeholder}: {meaning}"));
        }
        usage
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow>;

    fn invalid_arguments(&self) -> CommandError {
        CommandError::InvalidArguments {
            syntax: self.syntax(),
        }
    }
}

/// Help text snapshot of a registered command
#[derive(Debug, Clone)]
pub struct HelpEntry {
    pub name: &'static str,
    pub syntax: &'static str,
    pub description: &'static str,
    pub usage: String,
}

impl HelpEntry {
    fn of(command: &dyn Command) -> Self {
        Self {
            name: command.name(),
            syntax: command.syntax(),
            description: command.description(),
            usage: command.usage(),
        }
    }
}

/// Dispatch table from command token to command
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Registry holding every shell command, help first
    pub fn with_defaults() -> Self {
        let commands: Vec<Box<dyn Command>> = vec![
            Box::new(system::ExitCommand),
            Box::new(mods::ViewModCommand),
            Box::new(mods::ViewAllModsCommand),
            Box::new(mods::SearchModCommand),
            Box::new(bookmark::BookmarkCommand),
            Box::new(bookmark::BookmarksCommand),
            Box::new(bookmark::RemoveBookmarkCommand),
            Box::new(timetable::CreateTimetableCommand),
            Box::new(timetable::DeleteTimetableCommand),
            Box::new(timetable::ViewTimetableCommand),
            Box::new(timetable::ListTimetablesCommand),
            Box::new(timetable::AddModCommand),
            Box::new(timetable::RemoveModCommand),
            Box::new(timetable::AddBreakCommand),
        ];

        let mut registry = Self::new();
        let help = system::HelpCommand::new(Vec::new());
        let mut entries = vec![HelpEntry::of(&help)];
        entries.extend(commands.iter().map(|c| HelpEntry::of(c.as_ref())));

        registry.register(Box::new(system::HelpCommand::new(entries)));
        for command in commands {
            registry.register(command);
        }
        registry
    }

    /// Add a command; a later registration of the same token replaces it
    pub fn register(&mut self, command: Box<dyn Command>) {
        if let Some(existing) = self.commands.iter_mut().find(|c| c.name() == command.name()) {
            tracing::debug!("Replacing command '{}'", command.name());
            *existing = command;
        } else {
            self.commands.push(command);
        }
    }

    pub fn get(&self, token: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name() == token)
            .map(|c| c.as_ref())
    }

    /// Registered tokens in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name())
    }

    /// Run the command for `token`
    ///
    /// Unknown tokens and command failures are reported on `out`; only a
    /// failure to write there is returned.
    pub fn dispatch(
        &self,
        token: &str,
        args: &str,
        ctx: &mut AppContext,
        out: &mut dyn Write,
    ) -> io::Result<Flow> {
        let Some(command) = self.get(token) else {
            tracing::debug!("Unknown command '{}'", token);
            writeln!(out, "Invalid command: {token}")?;
            return Ok(Flow::Continue);
        };

        tracing::debug!("Executing '{}' with args '{}'", token, args);
        match command.execute(ctx, args, out) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                if let Some(CommandError::InvalidArguments { syntax }) =
                    e.downcast_ref::<CommandError>()
                {
                    writeln!(out, "Usage: {syntax}")?;
                } else {
                    tracing::error!("Command '{}' failed: {:#}", token, e);
                    writeln!(out, "Error: {e:#}")?;
                }
                Ok(Flow::Continue)
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `args` into its first word and the trimmed remainder
///
/// Both parts must be non-empty.
fn split_first_word(args: &str) -> Option<(&str, &str)> {
    let (first, rest) = args.trim().split_once(char::is_whitespace)?;
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    Some((first, rest))
}

fn write_candidates(out: &mut dyn Write, candidates: &[CourseSummary]) -> io::Result<()> {
    for candidate in candidates {
        writeln!(out, "- {}: {}", candidate.code, candidate.name)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use modmate_core::{
        AcademicYear, CatalogIndex, CourseCode, CourseEntity, InMemoryCatalog, User,
    };

    use super::{CommandRegistry, Flow};
    use crate::context::AppContext;

    pub const YEAR: AcademicYear = AcademicYear::new(2024);

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

    /// Context over a small catalog with two courses sharing a title
    pub fn context() -> AppContext {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert_course(YEAR, course("CS2103", "Software Engineering"));
        catalog.insert_course(YEAR, course("CS2106", "Software Engineering"));
        catalog.insert_course(YEAR, course("CS1231", "Discrete Structures"));
        catalog.insert_course(YEAR, course("MA1521", "Calculus for Computing"));
        catalog.insert_course(
            AcademicYear::new(2023),
            course("CS1101S", "Programming Methodology"),
        );

        let index = CatalogIndex::bootstrap(&catalog, YEAR).unwrap();
        AppContext::new(Box::new(catalog), index, User::new(), YEAR)
    }

    /// Dispatch one line and capture what it printed
    pub fn run(ctx: &mut AppContext, token: &str, args: &str) -> (Flow, String) {
        let registry = CommandRegistry::with_defaults();
        let mut out = Vec::new();
        let flow = registry.dispatch(token, args, ctx, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }
}
