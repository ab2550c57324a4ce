mod cli;
mod console;
mod display;
mod error;
mod layouts;
mod workspace;

use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, RunArgs};

const DEFAULT_DIRECTIVE: &str = "mosaic=info";

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config comes first so its log level can seed the filter.
    let loaded = mosaic_config::load_config(args.config.as_deref().map(Path::new));

    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => format!("mosaic={}", config.logging.level.as_directive()),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_string(),
    };
    let directive: Directive = directive
        .parse()
        .or_else(|_| DEFAULT_DIRECTIVE.parse())
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("Mosaic v{} starting", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        mosaic_config::MosaicConfig::default()
    });

    if let Some(ref dir) = args.directory {
        if let Err(e) = std::env::set_current_dir(dir) {
            tracing::warn!("Failed to change directory to {dir}: {e}");
        }
    }

    let result = match args.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(run) => workspace::run(config, run).await,
        Command::Layouts { action } => layouts::run(&config, action),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("mosaic: {e}");
            ExitCode::FAILURE
        }
    }
}
