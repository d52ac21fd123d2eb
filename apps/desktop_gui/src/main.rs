use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{config, CatalogClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{CatalogApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Shopping catalog desktop client")]
struct Args {
    /// Product list endpoint; overrides catalog.toml and environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Settings file to read instead of ./catalog.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    title_max_len: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_SETTINGS_FILE));
    let mut settings = config::load_settings_from(&config_path, |key| std::env::var(key).ok())
        .context("failed to load catalog settings")?;
    if let Some(endpoint) = args.endpoint.as_deref() {
        settings = settings.with_endpoint(endpoint)?;
    }
    if let Some(title_max_len) = args.title_max_len {
        settings.title_max_len = title_max_len;
    }
    tracing::info!(endpoint = %settings.endpoint_url, "starting catalog desktop client");

    let client = CatalogClient::new(&settings).context("failed to build catalog client")?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(client));

    let startup = StartupConfig {
        title_max_len: settings.title_max_len,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Shopping")
            .with_inner_size([480.0, 820.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Shopping",
        options,
        Box::new(move |_cc| Ok(Box::new(CatalogApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("desktop client exited with error: {err}"))
}
