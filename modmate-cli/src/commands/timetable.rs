//! Timetable commands

use anyhow::Result;
use chrono::{NaiveTime, Weekday};
use std::io::Write;

use modmate_core::{BreakPeriod, Resolution, TimetableError};

use super::{split_first_word, write_candidates, Command, Flow};
use crate::context::AppContext;

const TIMETABLE_ARG: (&str, &str) = ("<timetable>", "The name of the timetable.");

/// `createtimetable <name>`
pub struct CreateTimetableCommand;

impl Command for CreateTimetableCommand {
    fn name(&self) -> &'static str {
        "createtimetable"
    }

    fn syntax(&self) -> &'static str {
        "createtimetable <timetable>"
    }

    fn description(&self) -> &'static str {
        "Create a new, empty timetable."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[("<timetable>", "A single-word name, unique ignoring case.")]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let name = args.trim();
        if name.is_empty() {
            return Err(self.invalid_arguments().into());
        }
        if name.contains(char::is_whitespace) {
            writeln!(out, "Timetable names must be a single word.")?;
            return Ok(Flow::Continue);
        }

        match ctx.user_mut().timetables_mut().create_schedule(name) {
            Ok(schedule) => writeln!(out, "Created timetable \"{}\".", schedule.name())?,
            Err(TimetableError::DuplicateName(existing)) => {
                writeln!(out, "Timetable \"{existing}\" already exists.")?
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Flow::Continue)
    }
}

/// `deletetimetable <name>`
pub struct DeleteTimetableCommand;

impl Command for DeleteTimetableCommand {
    fn name(&self) -> &'static str {
        "deletetimetable"
    }

    fn syntax(&self) -> &'static str {
        "deletetimetable <timetable>"
    }

    fn description(&self) -> &'static str {
        "Delete a timetable and everything in it."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[TIMETABLE_ARG]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let name = args.trim();
        if name.is_empty() {
            return Err(self.invalid_arguments().into());
        }

        match ctx.user_mut().timetables_mut().remove_schedule(name) {
            Ok(removed) => writeln!(out, "Deleted timetable \"{}\".", removed.name())?,
            Err(_) => writeln!(out, "Timetable \"{name}\" not found.")?,
        }
        Ok(Flow::Continue)
    }
}

/// `timetable <name>`
pub struct ViewTimetableCommand;

impl Command for ViewTimetableCommand {
    fn name(&self) -> &'static str {
        "timetable"
    }

    fn syntax(&self) -> &'static str {
        "timetable <timetable>"
    }

    fn description(&self) -> &'static str {
        "Display a timetable."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[TIMETABLE_ARG]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let name = args.trim();
        if name.is_empty() {
            return Err(self.invalid_arguments().into());
        }

        match ctx.user().timetables().find_schedule(name) {
            Some(schedule) => writeln!(out, "{}", schedule.render())?,
            None => writeln!(out, "Timetable \"{name}\" not found.")?,
        }
        Ok(Flow::Continue)
    }
}

/// `timetables`
pub struct ListTimetablesCommand;

impl Command for ListTimetablesCommand {
    fn name(&self) -> &'static str {
        "timetables"
    }

    fn syntax(&self) -> &'static str {
        "timetables"
    }

    fn description(&self) -> &'static str {
        "List your timetables."
    }

    fn execute(&self, ctx: &mut AppContext, _args: &str, out: &mut dyn Write) -> Result<Flow> {
        let store = ctx.user().timetables();
        if store.is_empty() {
            writeln!(out, "You have no timetables.")?;
            return Ok(Flow::Continue);
        }

        writeln!(out, "Timetables:")?;
        for (i, schedule) in store.schedules().iter().enumerate() {
            writeln!(
                out,
                "  {}. {} ({} mods, {} MCs)",
                i + 1,
                schedule.name(),
                schedule.courses().len(),
                schedule.total_credits()
            )?;
        }
        Ok(Flow::Continue)
    }
}

/// `addmod <timetable> <code or name>`
pub struct AddModCommand;

impl Command for AddModCommand {
    fn name(&self) -> &'static str {
        "addmod"
    }

    fn syntax(&self) -> &'static str {
        "addmod <timetable> <mod code or name>"
    }

    fn description(&self) -> &'static str {
        "Add a mod to a timetable."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[
            TIMETABLE_ARG,
            ("<mod code or name>", "The code or name of the mod to add."),
        ]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let (name, query) = split_first_word(args).ok_or_else(|| self.invalid_arguments())?;

        let Some(stored) = ctx
            .user()
            .timetables()
            .find_schedule(name)
            .map(|schedule| schedule.name().to_string())
        else {
            tracing::warn!("Timetable '{}' not found", name);
            writeln!(out, "Timetable \"{name}\" not found.")?;
            return Ok(Flow::Continue);
        };

        let course = match ctx.resolve(query) {
            Resolution::Found(course) => course,
            Resolution::Ambiguous(candidates) => {
                writeln!(
                    out,
                    "Multiple modules found with that name. Please specify by module code:"
                )?;
                write_candidates(out, &candidates)?;
                return Ok(Flow::Continue);
            }
            Resolution::NotFound => {
                writeln!(out, "Mod \"{query}\" not found.")?;
                return Ok(Flow::Continue);
            }
        };

        let code = course.code.clone();
        match ctx.user_mut().timetables_mut().add_course_to(name, course) {
            Ok(true) => writeln!(out, "Added {code} to timetable \"{stored}\".")?,
            Ok(false) => writeln!(out, "{code} is already in timetable \"{stored}\".")?,
            Err(_) => writeln!(out, "Timetable \"{name}\" not found.")?,
        }
        Ok(Flow::Continue)
    }
}

/// `removemod <timetable> <code or name>`
pub struct RemoveModCommand;

impl Command for RemoveModCommand {
    fn name(&self) -> &'static str {
        "removemod"
    }

    fn syntax(&self) -> &'static str {
        "removemod <timetable> <mod code or name>"
    }

    fn description(&self) -> &'static str {
        "Remove a mod from a timetable."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[
            TIMETABLE_ARG,
            ("<mod code or name>", "The code or name of the mod to remove."),
        ]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let (name, query) = split_first_word(args).ok_or_else(|| self.invalid_arguments())?;

        let Some(schedule) = ctx.user().timetables().find_schedule(name) else {
            tracing::warn!("Timetable '{}' not found", name);
            writeln!(out, "Timetable \"{name}\" not found.")?;
            return Ok(Flow::Continue);
        };
        let stored = schedule.name().to_string();

        let code = match schedule.find_course(query) {
            Resolution::Found(course) => course.code,
            Resolution::Ambiguous(candidates) => {
                writeln!(
                    out,
                    "Multiple modules found with that name in your timetable. \
                     Please specify by module code:"
                )?;
                write_candidates(out, &candidates)?;
                return Ok(Flow::Continue);
            }
            Resolution::NotFound => {
                writeln!(out, "Mod \"{query}\" not found in timetable \"{stored}\".")?;
                return Ok(Flow::Continue);
            }
        };

        if ctx
            .user_mut()
            .timetables_mut()
            .remove_course_from(name, &code)?
        {
            writeln!(out, "Removed {code} from timetable \"{stored}\".")?;
        }
        Ok(Flow::Continue)
    }
}

/// `addbreak <timetable> <day> <start> <end> [label]`
pub struct AddBreakCommand;

impl Command for AddBreakCommand {
    fn name(&self) -> &'static str {
        "addbreak"
    }

    fn syntax(&self) -> &'static str {
        "addbreak <timetable> <day> <HH:MM> <HH:MM> [label]"
    }

    fn description(&self) -> &'static str {
        "Reserve a weekly break in a timetable."
    }

    fn arguments(&self) -> &'static [(&'static str, &'static str)] {
        &[
            TIMETABLE_ARG,
            ("<day>", "Day of the week, e.g. mon or Monday."),
            ("<HH:MM> <HH:MM>", "Start and end time, 24-hour clock."),
            ("[label]", "Optional description of the break."),
        ]
    }

    fn execute(&self, ctx: &mut AppContext, args: &str, out: &mut dyn Write) -> Result<Flow> {
        let parts: Vec<&str> = args.split_whitespace().collect();
        let [name, day, start, end, label @ ..] = parts.as_slice() else {
            return Err(self.invalid_arguments().into());
        };

        let Ok(day) = day.parse::<Weekday>() else {
            writeln!(out, "Invalid day \"{day}\". Use a weekday name such as mon or Monday.")?;
            return Ok(Flow::Continue);
        };
        let (Some(start_time), Some(end_time)) = (parse_time(start), parse_time(end)) else {
            writeln!(out, "Invalid time. Use HH:MM, e.g. 09:00 or 13:30.")?;
            return Ok(Flow::Continue);
        };

        let period = match BreakPeriod::new(day, start_time, end_time, label.join(" ")) {
            Ok(period) => period,
            Err(e) => {
                writeln!(out, "{e}")?;
                return Ok(Flow::Continue);
            }
        };

        let rendered = period.render();
        let timetables = ctx.user_mut().timetables_mut();
        match timetables.add_break_to(name, period) {
            Ok(()) => {
                let stored = timetables.find_schedule(name).map_or(*name, |s| s.name());
                writeln!(out, "Added break {rendered} to timetable \"{stored}\".")?
            }
            Err(_) => writeln!(out, "Timetable \"{name}\" not found.")?,
        }
        Ok(Flow::Continue)
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}
