//! LS-8 virtual machine CLI.
//!
//! Loads one program file and runs it on the machine clock. It performs:
//! 1. **Argument handling:** Exactly one positional program path; anything else is a usage error.
//! 2. **Configuration:** Built-in defaults, or the JSON file named by `LS8_CONFIG`.
//! 3. **Run:** Drives the machine until `HALT` or a fault and maps the outcome to an exit code.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ls8_core::config::Config;
use ls8_core::sim::Simulator;

/// Environment variable naming an optional JSON configuration file.
const CONFIG_ENV: &str = "LS8_CONFIG";

/// Exit code for usage, load, configuration and machine failures.
const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "ls8",
    author,
    version,
    about = "LS-8 virtual machine",
    long_about = "Run an LS-8 program.\n\nThe program file holds one 8-bit binary literal per line; `#` starts a comment.\nPRN output goes to stdout, diagnostics to stderr (filter with RUST_LOG).\nSet LS8_CONFIG to a JSON file to change the clock period or enable tracing.\n\nExample:\n  ls8 programs/mult.ls8"
)]
struct Cli {
    /// Program file to load at address 0.
    program: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("usage: ls8 <program>");
            let _ = e.print();
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ls8: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    init_tracing(&config);
    debug!(?config, "configuration");

    let mut sim = Simulator::new(&config);
    match sim.load_file(&cli.program) {
        Ok(len) => info!(program = %cli.program.display(), len, "program loaded"),
        Err(e) => {
            eprintln!("ls8: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    }

    match sim.run() {
        Ok(summary) => {
            info!(state = %summary.state, ticks = summary.ticks, "done");
            ExitCode::SUCCESS
        }
        Err(fault) => {
            eprintln!("\nls8: FATAL: {fault}");
            sim.machine.dump_state();
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Returns the configuration named by `LS8_CONFIG`, or the defaults.
fn load_config() -> Result<Config, ls8_core::common::ConfigError> {
    match env::var_os(CONFIG_ENV) {
        Some(path) => Config::from_json_file(path),
        None => Ok(Config::default()),
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set. Otherwise warnings and faults are shown, plus
/// every executed instruction when `general.trace_instructions` is on.
fn init_tracing(config: &Config) {
    let default_level = if config.general.trace_instructions {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
