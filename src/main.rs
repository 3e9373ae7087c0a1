//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ip_geo_join` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Exit code policy
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ip_geo_join::app::{evaluate_exit_code, EXIT_ERROR};
use ip_geo_join::initialization::init_logger_with;
use ip_geo_join::{run_join, Config};

fn main() -> Result<()> {
    // .env may carry RUST_LOG; a missing file is fine
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_join(&config) {
        Ok(report) => {
            if let Some(path) = &report.output {
                eprintln!(
                    "Joined {} record{} ({} matched, {} unmatched) - results saved in {}",
                    report.total_records,
                    if report.total_records == 1 { "" } else { "s" },
                    report.matched,
                    report.unmatched,
                    path.display()
                );
            }
            let code = evaluate_exit_code(config.fail_on, config.fail_on_pct_threshold, &report);
            if code != 0 {
                process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ip_geo_join error: {:#}", e);
            process::exit(EXIT_ERROR);
        }
    }
}
