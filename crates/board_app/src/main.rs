//! board-scraper: submit a board to the scraping service and view the pins.

mod cli;
mod config;
mod render;
mod session;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use board_engine::{Osc52Clipboard, ReqwestScrapeService, SubmissionController};
use board_logging::{board_info, LogDestination};
use clap::Parser;

use cli::{Args, Command};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let loaded = config::load(args.config.as_deref())?;
    let file_config = loaded.config;
    let destination = if file_config.log_file {
        LogDestination::both_default()
    } else {
        LogDestination::Terminal
    };
    board_logging::initialize(destination, args.log_level);
    match &loaded.path {
        Some(path) => board_info!("Loaded config from {:?}", path),
        None => board_info!("No config file found, using defaults"),
    }

    let settings = file_config.service_settings(args.service_url.as_ref())?;
    board_info!("Using scraping service at {}", settings.base_url);
    let service = Arc::new(ReqwestScrapeService::new(settings).context("building HTTP client")?);

    // One logical actor: every message and request runs on this thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let clipboard = Osc52Clipboard::stderr();
    runtime.block_on(async move {
        match args.command {
            Command::Scrape(scrape) => {
                let controller = SubmissionController::new(service);
                let mut stdout = io::stdout();
                session::run_scrape(controller, scrape, &mut stdout, &clipboard).await
            }
            Command::Shell => {
                let controller = SubmissionController::new(service);
                session::run_shell(controller, &clipboard).await
            }
            Command::Health => session::run_health(service.as_ref()).await,
        }
    })
}
