#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod app;
mod exporters;

use crate::app::{
    options::{get_command, Options},
    runtime::Config,
};

/// Send log events to stderr so they never mix with exported records
fn init_logging(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // Get args from command line
    let command = get_command();
    let args = command.get_matches();

    // Create application options
    let options = match Options::from_args(&args) {
        Ok(options) => options,
        Err(why) => {
            eprintln!("{why}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(options.quiet);

    // Create app state and start
    match Config::new(options) {
        Ok(app) => match app.start() {
            Ok(()) => ExitCode::SUCCESS,
            Err(why) => {
                eprintln!("Unable to export: {why}");
                ExitCode::FAILURE
            }
        },
        Err(why) => {
            eprintln!("{why}");
            ExitCode::FAILURE
        }
    }
}
