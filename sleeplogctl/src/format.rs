//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use sleeplog_core::SleepRecord;

use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Parse a validated config value; anything but `json` is a table.
    pub fn from_config(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Weekday")]
    weekday: String,
    #[tabled(rename = "Bedtime")]
    bedtime: String,
}

fn record_table(records: &[&SleepRecord]) -> String {
    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow {
            date: r.date_string(),
            weekday: r.weekday.clone(),
            bedtime: r.bedtime_string().cyan().to_string(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format sleep history, newest first as given
pub fn format_history(records: &[&SleepRecord], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Table => {
            if records.is_empty() {
                return Ok(format_notice("No records yet"));
            }
            Ok(format!(
                "{}\n{}",
                "Sleep History:".bold(),
                record_table(records)
            ))
        }
    }
}

/// Format the records about to be deleted
pub fn format_matches(records: &[&SleepRecord]) -> String {
    format!(
        "Found {} record(s):\n{}",
        records.len().to_string().yellow(),
        record_table(records)
    )
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}

/// Format a recoverable problem with user input
pub fn format_warning(message: &str) -> String {
    format!("{} {}", "!".yellow().bold(), message)
}

/// Format an informational notice
pub fn format_notice(message: &str) -> String {
    message.dimmed().to_string()
}
