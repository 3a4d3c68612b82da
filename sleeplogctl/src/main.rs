//! SleepLog CLI
//!
//! Records a bedtime per day, lists history, charts the trend and deletes
//! records by date. Starts the interactive menu when no subcommand is given.

use anyhow::Result;
use clap::Parser;
use sleeplog_core::{default_config_path, today, RecordStore, SleepLog};
use sleeplogctl::cli::{
    generate_completion, handle_add, handle_chart, handle_config, handle_delete, handle_list, Cli,
    Commands,
};
use sleeplogctl::config::CliConfig;
use sleeplogctl::format::OutputFormat;
use sleeplogctl::menu::{self, ChartSize};
use sleeplogctl::prompt::TerminalPrompter;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    // Build configuration using priority chain: CLI args → env → file → defaults
    let config = match build_config(&cli, &config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.verbose);
    debug!("Data file: {}", config.data_file.display());
    debug!("Output format: {}", config.output_format);

    if let Err(e) = run(cli, &config, &config_path) {
        eprintln!("Error: {}", e);
        if config.verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn build_config(cli: &Cli, config_path: &std::path::Path) -> Result<CliConfig> {
    let mut builder = CliConfig::builder();

    if let Some(ref file) = cli.file {
        builder = builder.with_data_file(file)?;
    }
    if let Some(ref format) = cli.format {
        builder = builder.with_output_format(format.as_str())?;
    }
    if let Some(verbose) = cli.verbose {
        builder = builder.with_verbose(verbose);
    }
    if let Some(Commands::Chart { width, height }) = &cli.command {
        if let Some(width) = width {
            builder = builder.with_chart_width(*width)?;
        }
        if let Some(height) = height {
            builder = builder.with_chart_height(*height)?;
        }
    }

    builder = builder.with_env_overrides();

    let file = (!cli.no_config).then_some(config_path);
    builder.with_config_file(file)?.build()
}

fn run(cli: Cli, config: &CliConfig, config_path: &std::path::Path) -> Result<()> {
    let format = OutputFormat::from_config(&config.output_format);
    let size = ChartSize {
        width: config.chart_width,
        height: config.chart_height,
    };
    let mut stdout = std::io::stdout();

    match cli.command {
        None | Some(Commands::Menu) => {
            let mut log = open_log(config)?;
            menu::run(&mut log, &mut TerminalPrompter::new(), &mut stdout, today, size)
        }
        Some(Commands::Add { bedtime }) => {
            let mut log = open_log(config)?;
            handle_add(&mut log, &bedtime, today(), &format, &mut stdout)
        }
        Some(Commands::List) => handle_list(&open_log(config)?, &format, &mut stdout),
        Some(Commands::Chart { .. }) => handle_chart(&open_log(config)?, size, &format, &mut stdout),
        Some(Commands::Delete { date, yes }) => {
            let mut log = open_log(config)?;
            handle_delete(
                &mut log,
                &date,
                yes,
                &mut TerminalPrompter::new(),
                &format,
                &mut stdout,
            )
        }
        Some(Commands::Config { command }) => {
            handle_config(command, config, config_path, &format, &mut stdout)
        }
        Some(Commands::Completion { shell }) => {
            generate_completion(shell);
            Ok(())
        }
    }
}

/// Load the record store; a malformed data file aborts before any prompt.
fn open_log(config: &CliConfig) -> Result<SleepLog> {
    let log = SleepLog::open(RecordStore::new(&config.data_file))?;
    debug!("Loaded {} record(s)", log.len());
    Ok(log)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
