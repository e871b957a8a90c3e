//! ui-orchestrator CLI
//!
//! Runs the terminal demo and inspects the effective configuration.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, Subcommand};

use ui_orchestrator::config::{load_or_default, UiConfig};
use ui_orchestrator::tui::run::run;
use ui_orchestrator::types::Mode;

#[derive(Parser)]
#[command(name = "ui-orchestrator")]
#[command(about = "Drive a set of UI screens with faded mode transitions")]
#[command(version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip transition animations
    #[arg(long, global = true)]
    automated: bool,

    /// Write logs to this file (default: platform data dir)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive terminal demo (default)
    Run,

    /// Print the effective configuration as JSON
    Config,

    /// List modes and whether switching to or from them is faded
    Modes,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref(), cli.automated).and_then(|config| {
        match cli.command.unwrap_or(Commands::Run) {
            Commands::Run => cmd_run(&config, cli.log_file),
            Commands::Config => cmd_config(&config),
            Commands::Modes => cmd_modes(&config),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Load config; `--automated` overrides the file.
fn load_config(path: Option<&Path>, automated: bool) -> Result<UiConfig, String> {
    let mut config = load_or_default(path).map_err(|e| e.to_string())?;
    config.automated |= automated;
    Ok(config)
}

/// Default log location: ~/.local/share/ui-orchestrator/ui-orchestrator.log on Linux.
fn default_log_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ui-orchestrator")
        .join("ui-orchestrator.log")
}

/// Initialize tracing to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<(), String> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let file = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;

    // By default, only log from this crate at info level
    // Users can override with RUST_LOG environment variable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ui_orchestrator=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
    Ok(())
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_run(config: &UiConfig, log_file: Option<PathBuf>) -> Result<(), String> {
    let log_file = log_file.unwrap_or_else(default_log_file);
    init_logging(&log_file)?;
    run(config).map_err(|e| e.to_string())
}

fn cmd_config(config: &UiConfig) -> Result<(), String> {
    println!("{}", config.to_json());
    Ok(())
}

fn cmd_modes(config: &UiConfig) -> Result<(), String> {
    let transitions = config.transition_set();
    for (i, mode) in Mode::ALL.iter().enumerate() {
        let marker = if transitions.contains(*mode) { "faded" } else { "instant" };
        println!("  [{}] {:<16} {}", i + 1, mode.label(), marker);
    }
    if config.automated {
        println!();
        println!("Automated mode: all switches are instant.");
    }
    Ok(())
}
