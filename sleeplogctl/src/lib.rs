//! SleepLog CLI Library
//!
//! This library provides the core functionality for the `sleeplogctl` tool:
//! the interactive menu, the non-interactive command handlers, terminal
//! chart rendering and configuration.
//!
//! ```no_run
//! use sleeplog_core::{today, RecordStore, SleepLog};
//! use sleeplogctl::menu::{self, ChartSize};
//! use sleeplogctl::prompt::TerminalPrompter;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut log = SleepLog::open(RecordStore::new("sleep_records.csv"))?;
//! let size = ChartSize { width: 72, height: 16 };
//! menu::run(&mut log, &mut TerminalPrompter::new(), &mut std::io::stdout(), today, size)?;
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// Terminal rendering of the bedtime chart.
pub mod chart;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

/// Interactive menu loop.
pub mod menu;

/// User prompting abstraction.
pub mod prompt;

#[cfg(test)]
pub mod test_utils;
