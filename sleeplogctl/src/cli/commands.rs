//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SleepLog bedtime tracker
///
/// Without a subcommand the interactive menu starts.
#[derive(Parser, Debug)]
#[command(name = "sleeplogctl")]
#[command(version, about = "Record, list and chart your bedtimes", long_about = None)]
pub struct Cli {
    /// Data file path (overrides config file)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long, global = true)]
    pub verbose: Option<bool>,

    /// Don't load config file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Config file path (default: ~/.config/sleeplog/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record last night's bedtime under today's date
    Add {
        /// Bedtime as HH:MM
        bedtime: String,
    },

    /// Show sleep history, newest first
    List,

    /// Draw the bedtime trend chart
    Chart {
        /// Chart width in columns
        #[arg(long)]
        width: Option<usize>,

        /// Chart height in rows
        #[arg(long)]
        height: Option<usize>,
    },

    /// Delete the record for a date
    Delete {
        /// Date as YYYY-MM-DD
        date: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Start the interactive menu
    Menu,

    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["sleeplogctl"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_delete_with_global_flags() {
        let cli = Cli::try_parse_from([
            "sleeplogctl",
            "delete",
            "2024-01-01",
            "--yes",
            "--file",
            "/tmp/log.csv",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("/tmp/log.csv")));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        match cli.command {
            Some(Commands::Delete { date, yes }) => {
                assert_eq!(date, "2024-01-01");
                assert!(yes);
            }
            other => panic!("Expected delete, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_chart_size() {
        let cli = Cli::try_parse_from(["sleeplogctl", "chart", "--width", "100"]).unwrap();
        match cli.command {
            Some(Commands::Chart { width, height }) => {
                assert_eq!(width, Some(100));
                assert_eq!(height, None);
            }
            other => panic!("Expected chart, got {:?}", other),
        }
    }
}
