//! Interactive menu loop
//!
//! Each action re-prompts on malformed input, and `q` returns to the menu.
//! The [`SleepLog`] is passed in explicitly and reloaded by every mutation.

use std::io::Write;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use sleeplog_core::{format_date, parse_bedtime, parse_date, BedtimeSeries, SleepLog};
use tracing::debug;

use crate::chart::render_chart;
use crate::format::{
    format_history, format_matches, format_notice, format_success, format_warning, OutputFormat,
};
use crate::prompt::Prompter;

/// Menu entries in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    History,
    Chart,
    Delete,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Add,
        MenuChoice::History,
        MenuChoice::Chart,
        MenuChoice::Delete,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add today's record",
            MenuChoice::History => "View history",
            MenuChoice::Chart => "Show chart",
            MenuChoice::Delete => "Delete a record",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Chart dimensions used by the menu
#[derive(Debug, Clone, Copy)]
pub struct ChartSize {
    pub width: usize,
    pub height: usize,
}

/// What a delete session ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    Returned,
}

/// Run the menu until the user exits. `today` supplies the date for adds.
pub fn run<P, W, F>(
    log: &mut SleepLog,
    prompter: &mut P,
    out: &mut W,
    today: F,
    chart: ChartSize,
) -> Result<()>
where
    P: Prompter,
    W: Write,
    F: Fn() -> NaiveDate,
{
    let labels = MenuChoice::ALL.map(MenuChoice::label);
    loop {
        writeln!(out)?;
        let index = prompter.select("Sleep log", &labels)?;
        let choice = MenuChoice::ALL
            .get(index)
            .copied()
            .ok_or_else(|| anyhow!("Menu selection {} out of range", index))?;
        debug!("Menu choice {:?}", choice);

        match choice {
            MenuChoice::Add => add_record(log, prompter, out, today())?,
            MenuChoice::History => view_history(log, prompter, out)?,
            MenuChoice::Chart => show_chart(log, prompter, out, chart)?,
            MenuChoice::Delete => {
                delete_record(log, prompter, out)?;
            }
            MenuChoice::Exit => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
        }
    }
}

fn is_quit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("q")
}

/// Prompt for last night's bedtime and store it under `today`.
pub fn add_record<P: Prompter, W: Write>(
    log: &mut SleepLog,
    prompter: &mut P,
    out: &mut W,
    today: NaiveDate,
) -> Result<()> {
    loop {
        let input = prompter.input("Bedtime last night (HH:MM, q to return)")?;
        if is_quit(&input) {
            return Ok(());
        }

        match parse_bedtime(&input) {
            Ok(bedtime) => {
                log.add(today, bedtime)?;
                writeln!(
                    out,
                    "{}",
                    format_success(&format!("{} record saved", format_date(today)))
                )?;
                prompter.pause("Press Enter to continue")?;
                return Ok(());
            }
            Err(e) => {
                writeln!(out, "{}", format_warning(&e.to_string()))?;
            }
        }
    }
}

/// Print history newest first until the user enters `q`.
pub fn view_history<P: Prompter, W: Write>(
    log: &SleepLog,
    prompter: &mut P,
    out: &mut W,
) -> Result<()> {
    loop {
        writeln!(out, "{}", format_history(&log.history(), &OutputFormat::Table)?)?;

        let input = prompter.input("Enter q to return")?;
        if is_quit(&input) {
            return Ok(());
        }
    }
}

pub fn show_chart<P: Prompter, W: Write>(
    log: &SleepLog,
    prompter: &mut P,
    out: &mut W,
    size: ChartSize,
) -> Result<()> {
    match BedtimeSeries::from_records(log.records()) {
        Some(series) => {
            writeln!(out, "{}", render_chart(&series, size.width, size.height))?;
            prompter.pause("Press Enter to return to the menu")?;
        }
        None => {
            writeln!(out, "{}", format_notice("No data to chart"))?;
            prompter.pause("Press Enter to return")?;
        }
    }
    Ok(())
}

/// Prompt for a date, show what matches and delete it once confirmed.
pub fn delete_record<P: Prompter, W: Write>(
    log: &mut SleepLog,
    prompter: &mut P,
    out: &mut W,
) -> Result<DeleteOutcome> {
    loop {
        let input = prompter.input("Date to delete (YYYY-MM-DD, q to return)")?;
        if is_quit(&input) {
            return Ok(DeleteOutcome::Returned);
        }

        let date = match parse_date(&input) {
            Ok(date) => date,
            Err(e) => {
                writeln!(out, "{}", format_warning(&e.to_string()))?;
                continue;
            }
        };

        let matches = log.matching(date);
        if matches.is_empty() {
            writeln!(
                out,
                "{}",
                format_warning(&format!("No record found for {}", format_date(date)))
            )?;
            prompter.pause("Press Enter to continue")?;
            continue;
        }

        writeln!(out, "{}", format_matches(&matches))?;
        if !prompter.confirm("Delete the record(s) above?")? {
            writeln!(out, "{}", format_notice("Deletion cancelled"))?;
            return Ok(DeleteOutcome::Cancelled);
        }

        log.delete(date)?;
        writeln!(out, "{}", format_success("Record deleted"))?;
        prompter.pause("Press Enter to return")?;
        return Ok(DeleteOutcome::Deleted);
    }
}
