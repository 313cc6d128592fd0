//! signup-tui - Main entry point

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{stdout, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use signup_tui::app::App;
use signup_tui::cli::{Cli, Commands};
use signup_tui::error::SignupError;
use signup_tui::{run_check, FormConfig, ValidationRules};

/// Initialize logging.
///
/// The interactive form owns the terminal, so it only logs when a log file is
/// given. Headless commands log to stderr. `RUST_LOG` overrides the filter.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    init_logging(cli.log_file.as_deref(), cli.is_interactive())?;
    info!("signup-tui starting up");

    match cli.command.clone().unwrap_or(Commands::Run) {
        Commands::Run => {
            let rules = cli.rules()?;
            run_tui(rules)?;
        }
        Commands::Check {
            username,
            password,
            confirm,
        } => {
            let rules = cli.rules()?;
            let confirm = confirm.unwrap_or_else(|| password.clone());
            debug!(%username, "running headless check");
            let report = run_check(rules, &username, &password, &confirm);
            println!("{}", report);
            if report.submit_disabled {
                std::process::exit(1);
            }
        }
        Commands::ValidateConfig { path } => {
            info!("Validating configuration file: {:?}", path);
            match FormConfig::load_from_file(&path).and_then(|config| {
                config.validate()?;
                Ok(config)
            }) {
                Ok(config) => {
                    info!("Configuration validation successful");
                    println!("✓ Configuration file is valid: {:?}", config);
                }
                Err(e) => {
                    error!("Configuration validation failed: {:#}", e);
                    eprintln!("✗ Configuration validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Run the interactive form
fn run_tui(rules: ValidationRules) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| SignupError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    enter_alternate_screen(stdout(), || {
        let _ = disable_raw_mode();
    })?;

    let result = run_app(rules);

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}

/// Switch to the alternate screen. Raw mode is already on, so a failure runs
/// `restore` before the error is returned.
fn enter_alternate_screen<W: Write>(mut out: W, restore: impl FnOnce()) -> Result<(), SignupError> {
    crossterm::execute!(out, crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        restore();
        SignupError::terminal(format!("Failed to enter alternate screen: {}", e))
    })
}

fn run_app(rules: ValidationRules) -> Result<(), Box<dyn std::error::Error>> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| SignupError::terminal(format!("Failed to create terminal: {}", e)))?;

    App::new(rules).run(&mut terminal)?;
    Ok(())
}
