//! Command execution handlers

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sleeplog_core::{format_date, parse_bedtime, parse_date, BedtimeSeries, SleepLog, SleepLogError};

use crate::chart::render_chart;
use crate::config::CliConfig;
use crate::format::{format_history, format_matches, format_notice, format_success, OutputFormat};
use crate::menu::ChartSize;
use crate::prompt::Prompter;

use super::commands::ConfigCommands;

/// Handle add command
pub fn handle_add<W: Write>(
    log: &mut SleepLog,
    bedtime: &str,
    today: NaiveDate,
    format: &OutputFormat,
    out: &mut W,
) -> Result<()> {
    let bedtime = parse_bedtime(bedtime)?;
    let record = log.add(today, bedtime)?;

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "{}",
                format_success(&format!(
                    "{} record saved ({})",
                    record.date_string(),
                    record.bedtime_string()
                ))
            )?;
        }
    }

    Ok(())
}

/// Handle list command
pub fn handle_list<W: Write>(log: &SleepLog, format: &OutputFormat, out: &mut W) -> Result<()> {
    writeln!(out, "{}", format_history(&log.history(), format)?)?;
    Ok(())
}

/// Handle chart command
pub fn handle_chart<W: Write>(
    log: &SleepLog,
    size: ChartSize,
    format: &OutputFormat,
    out: &mut W,
) -> Result<()> {
    let series = BedtimeSeries::from_records(log.records());

    match (format, series) {
        (OutputFormat::Json, Some(series)) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&series)?)?;
        }
        (OutputFormat::Json, None) => {
            writeln!(out, "null")?;
        }
        (OutputFormat::Table, Some(series)) => {
            writeln!(out, "{}", render_chart(&series, size.width, size.height))?;
        }
        (OutputFormat::Table, None) => {
            writeln!(out, "{}", format_notice("No data to chart"))?;
        }
    }

    Ok(())
}

/// Handle delete command
///
/// Asks for confirmation through `prompter` unless `yes` is set.
pub fn handle_delete<P: Prompter, W: Write>(
    log: &mut SleepLog,
    date: &str,
    yes: bool,
    prompter: &mut P,
    format: &OutputFormat,
    out: &mut W,
) -> Result<()> {
    let date = parse_date(date)?;

    let matches = log.matching(date);
    if matches.is_empty() {
        return Err(SleepLogError::RecordNotFound(date).into());
    }

    if !yes {
        // stdout stays pure JSON; the preview goes to stderr beside the prompt.
        match format {
            OutputFormat::Json => eprintln!("{}", format_matches(&matches)),
            OutputFormat::Table => writeln!(out, "{}", format_matches(&matches))?,
        }
        if !prompter.confirm("Delete the record(s) above?")? {
            return match format {
                OutputFormat::Json => write_removed(out, date, 0),
                OutputFormat::Table => {
                    writeln!(out, "{}", format_notice("Deletion cancelled"))?;
                    Ok(())
                }
            };
        }
    }

    let removed = log.delete(date)?;

    match format {
        OutputFormat::Json => write_removed(out, date, removed)?,
        OutputFormat::Table => {
            writeln!(
                out,
                "{}",
                format_success(&format!("Deleted {} record(s) for {}", removed, format_date(date)))
            )?;
        }
    }

    Ok(())
}

fn write_removed<W: Write>(out: &mut W, date: NaiveDate, removed: usize) -> Result<()> {
    let response = serde_json::json!({
        "date": format_date(date),
        "removed": removed,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
    Ok(())
}

/// Handle config commands
pub fn handle_config<W: Write>(
    command: ConfigCommands,
    config: &CliConfig,
    config_path: &Path,
    format: &OutputFormat,
    out: &mut W,
) -> Result<()> {
    match command {
        ConfigCommands::Show => match format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
            }
            OutputFormat::Table => {
                writeln!(out, "Current Configuration:")?;
                writeln!(out, "  Data File: {}", config.data_file.display())?;
                writeln!(out, "  Output Format: {}", config.output_format)?;
                writeln!(out, "  Verbose: {}", config.verbose)?;
                writeln!(
                    out,
                    "  Chart Size: {}x{}",
                    config.chart_width, config.chart_height
                )?;
            }
        },
        ConfigCommands::Path => {
            writeln!(out, "{}", config_path.display())?;
        }
        ConfigCommands::Init { force } => {
            if config_path.exists() && !force {
                return Err(anyhow::anyhow!(
                    "Config file {} already exists (use --force to overwrite)",
                    config_path.display()
                ));
            }
            CliConfig::default()
                .save(config_path)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            writeln!(
                out,
                "{}",
                format_success(&format!("Wrote {}", config_path.display()))
            )?;
        }
    }

    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    let mut cmd = super::commands::Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
