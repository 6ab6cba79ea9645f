//! number-gauge CLI
//!
//! Ticking random number with a gauge, a menu, and themes, in the terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use number_gauge::logging::{self, LogTarget};
use number_gauge::random::{draw_number, ThreadRngSource};
use number_gauge::report::{format_rolls, Roll};
use number_gauge::tui;
use number_gauge::types::{OutputFormat, RunConfig, Theme};

#[derive(Parser)]
#[command(name = "number-gauge")]
#[command(about = "Ticking random number with a gauge, a menu, and themes")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive widget (default)
    Run(RunArgs),

    /// Draw numbers without the interactive UI and print them
    Roll {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// How many numbers to draw
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Initial theme
    #[arg(long, value_enum, default_value = "system")]
    theme: ThemeArg,

    /// Start paused
    #[arg(long)]
    paused: bool,

    /// Start with the gauge hidden
    #[arg(long)]
    no_gauge: bool,

    /// Ticker interval in milliseconds
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// How often to re-read the OS colour scheme while the system theme is selected
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(1..))]
    scheme_poll_ms: u64,

    /// Append logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    System,
    LowContrast,
    HighContrast,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::System => Theme::System,
            ThemeArg::LowContrast => Theme::LowContrast,
            ThemeArg::HighContrast => Theme::HighContrast,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

impl From<&RunArgs> for RunConfig {
    fn from(args: &RunArgs) -> Self {
        RunConfig {
            interval: Duration::from_millis(args.interval_ms),
            scheme_poll: Duration::from_millis(args.scheme_poll_ms),
            initial_theme: args.theme.into(),
            start_running: !args.paused,
            show_gauge: !args.no_gauge,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::Roll { format, count }) => cmd_roll(format.into(), count),
        None => cmd_run(&cli.run),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_run(args: &RunArgs) -> Result<(), String> {
    let target = match &args.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Disabled,
    };
    logging::init(&target).map_err(|e| e.to_string())?;

    let config = RunConfig::from(args);
    info!(?config, "starting interactive session");
    tui::run::run(config).map_err(|e| format!("Terminal error: {}", e))
}

fn cmd_roll(format: OutputFormat, count: usize) -> Result<(), String> {
    logging::init(&LogTarget::Stderr).map_err(|e| e.to_string())?;

    let mut rng = ThreadRngSource;
    let rolls: Vec<Roll> = (0..count).map(|_| Roll::new(draw_number(&mut rng))).collect();
    debug!(count, "rolled");

    print!("{}", format_rolls(&rolls, format));
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
