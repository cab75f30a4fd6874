//! Read-evaluate loop

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::commands::{CommandRegistry, Flow};
use crate::context::AppContext;

const BANNER: &str = "Welcome to ModMate!";
const PROMPT: &str = "Enter command ('exit' to quit, '-h' for help):";

/// One line of user input
///
/// The command token is case-folded; the argument keeps its case.
#[derive(Debug, PartialEq, Eq)]
pub struct Input<'a> {
    pub command: String,
    pub argument: &'a str,
}

impl<'a> Input<'a> {
    /// `None` for a blank line
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (command, argument) = line
            .split_once(char::is_whitespace)
            .map(|(command, rest)| (command, rest.trim()))
            .unwrap_or((line, ""));

        Some(Self {
            command: command.to_lowercase(),
            argument,
        })
    }
}

/// Run commands from `input` until `exit` or end of input
pub fn run<R: BufRead, W: Write>(
    registry: &CommandRegistry,
    ctx: &mut AppContext,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{BANNER}")?;

    let mut line = String::new();
    loop {
        writeln!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .context("Failed to read command")?;
        if read == 0 {
            tracing::debug!("End of input");
            break;
        }

        let Some(parsed) = Input::parse(&line) else {
            continue;
        };

        tracing::debug!("Received command '{}'", parsed.command);
        let flow = registry
            .dispatch(&parsed.command, parsed.argument, ctx, out)
            .context("Failed to write output")?;
        if flow == Flow::Exit {
            break;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn session(script: &str) -> (String, AppContext) {
        let registry = CommandRegistry::with_defaults();
        let mut ctx = context();
        let mut out = Vec::new();
        run(&registry, &mut ctx, Cursor::new(script), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), ctx)
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(Input::parse("   \n"), None);
        assert_eq!(
            Input::parse("  ADDMOD  Y1S1   Software Engineering \n"),
            Some(Input {
                command: "addmod".to_string(),
                argument: "Y1S1   Software Engineering",
            })
        );
        assert_eq!(
            Input::parse("exit"),
            Some(Input {
                command: "exit".to_string(),
                argument: "",
            })
        );
    }

    #[test]
    fn test_exit_stops_the_loop() {
        let (output, ctx) = session("createtimetable Y1S1\nexit\ncreatetimetable Y1S2\n");

        assert!(output.starts_with("Welcome to ModMate!\n"));
        assert!(output.ends_with("Exiting...\n"));
        assert_eq!(ctx.user().timetables().len(), 1);
    }

    #[test]
    fn test_end_of_input_stops_the_loop() {
        let (output, ctx) = session("\n\nCreateTimetable Y1S1\nADDMOD y1s1 cs2103");

        assert_eq!(output.matches(PROMPT).count(), 5);
        assert!(output.contains("Added CS2103 to timetable \"Y1S1\"."));
        assert_eq!(
            ctx.user().timetables().find_schedule("Y1S1").unwrap().courses().len(),
            1
        );
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let (output, _) = session("bogus\nviewmod\nviewmod cs1231\nexit\n");

        assert!(output.contains("Invalid command: bogus\n"));
        assert!(output.contains("Usage: viewmod <mod code or name>\n"));
        assert!(output.contains("CS1231 - Discrete Structures\n"));
    }
}
