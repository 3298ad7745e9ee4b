mod chart;
mod cli;
mod color;
mod data;
mod export;
mod run;

#[cfg(feature = "plot")]
mod app;
#[cfg(feature = "plot")]
mod render;
#[cfg(feature = "plot")]
mod ui;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use run::RunEnv;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run::run(&cli, &RunEnv::detect()) {
        Ok(report) if report.succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
