use anyhow::Result;
use std::io::Write;

use super::{Command, Flow, HelpEntry};
use crate::context::AppContext;

/// `-h [command]`
pub struct HelpCommand {
    entries: Vec<HelpEntry>,
}

impl HelpCommand {
    pub fn new(entries: Vec<HelpEntry>) -> Self {
        Self { entries }
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "-h"
    }

    fn syntax(&self) -> &'static str {
        "-h [command]"
    }

    fn description(&self) -> &'static str {
        "Display this help message, or the usage of one command."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[("[command]", "Optional command to describe in detail.")]
    }

    fn execute(&self, _ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let topic = args.trim().to_lowercase();

        if topic.is_empty() {
            writeln!(out, "Commands:")?;
            for entry in &self.entries {
                writeln!(out, "  {}: {}", entry.syntax, entry.description)?;
            }
            return Ok(Flow::Continue);
        }

        match self.entries.iter().find(|entry| entry.name == topic) {
            Some(entry) => {
                writeln!(out, "{}", entry.description)?;
                writeln!(out, "{}", entry.usage)?;
            }
            None => writeln!(out, "Invalid command: {topic}")?,
        }
        Ok(Flow::Continue)
    }
}

/// `exit`
pub struct ExitCommand;

impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn syntax(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exit the application."
    }

    fn execute(&self, _ctx: &mut AppContext, _args: &str, out: &mut dyn Write) -> Result<Flow> {
        tracing::info!("Exiting application");
        writeln!(out, "Exiting...")?;
        Ok(Flow::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, run};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_help_lists_every_command() {
        let mut ctx = context();
        let (flow, output) = run(&mut ctx, "-h", "");

        assert_eq!(flow, Flow::Continue);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Commands:");
        assert_eq!(lines.len(), 16);
        assert!(output.contains("  addmod <timetable> <mod code or name>: "));
        assert!(output.contains("  exit: Exit the application."));
    }

    #[test]
    fn test_help_for_one_command() {
        let mut ctx = context();
        let (_, output) = run(&mut ctx, "-h", "RemoveMod");

        assert_eq!(
            output,
            "Remove a mod from a timetable.\n\
             Usage: removemod <timetable> <mod code or name>\n  \
             <timetable>: The name of the timetable.\n  \
             <mod code or name>: The code or name of the mod to remove.\n"
        );

        let (_, output) = run(&mut ctx, "-h", "nope");
        assert_eq!(output, "Invalid command: nope\n");
    }

    #[test]
    fn test_exit() {
        let mut ctx = context();
        let (flow, output) = run(&mut ctx, "exit", "");
        assert_eq!(flow, Flow::Exit);
        assert_eq!(output, "Exiting...\n");
    }
}
