// Stock chart command-line front end
use std::process::ExitCode;

mod app;
mod cli;
mod config;
mod services;

use app::RunOutcome;
use cli::{RunArgs, USAGE};
use config::AppConfig;
use services::ConsoleErrorDisplay;

fn main() -> ExitCode {
    // stdout carries only the result paths.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = match RunArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let config = match &args.config_path {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load_default(),
    };
    let config = match config {
        Ok(cfg) => {
            tracing::info!("Loaded configuration version {}.", cfg.version);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match app::run(&config, &args, &mut ConsoleErrorDisplay) {
        Ok(RunOutcome::Completed { chart_path, csv_path, rows, traces }) => {
            println!("chart: {} ({} rows, {} traces)", chart_path.display(), rows, traces);
            println!("csv:   {}", csv_path.display());
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Rejected) => ExitCode::from(2),
        Err(e) => {
            tracing::error!("Chart run failed: {:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
