mod app;
mod cli;
mod config;
mod effects;
mod render;

use anyhow::Context;
use clap::Parser;
use qchat_engine::Engine;
use qchat_logging::{qchat_info, qchat_warn, LevelFilter, LogDestination};

use crate::app::App;
use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = config::load(&cli.config)?;
    let found_config = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    if let Some(token) = cli.id_token.clone() {
        config.id_token = Some(token);
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match &config.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    qchat_logging::initialize(destination, level);

    if !found_config {
        qchat_warn!("No config at {:?}; using defaults", cli.config);
    }
    if config.endpoint_base.is_empty() {
        qchat_warn!("endpoint_base is not configured; remote status calls will fail");
    }

    // Single-threaded: handlers suspend only at network calls.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let mut app = App::new(config.user(), Engine::new(config.engine_config()));
    let view = runtime.block_on(app.run(cli.command));
    qchat_info!("Done: {} requests listed", view.ongoing_pocs);

    print!("{}", render::render(&view));
    Ok(())
}
