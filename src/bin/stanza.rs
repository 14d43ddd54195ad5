//! Stanza CLI Binary
//!
//! Runs the statement console over the bundled document backend.

use clap::Parser;
use stanza::backend::{self, DocumentBackend};
use stanza::cli::{Cli, RunContext};
use stanza::config::ConfigLoader;
use stanza::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Stanza starting");

    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", stanza::cli::map_error(&e));
            process::exit(1);
        }
    };

    let result = context.run(backend::shared(DocumentBackend::new()));
    match &result {
        Ok(end) => info!(reason = ?end, "Session ended"),
        Err(e) => {
            error!("Session failed: {}", e);
            eprintln!("{}", stanza::cli::map_error(e));
        }
    }
    process::exit(stanza::cli::exit_code(&result));
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load(cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    config
}
