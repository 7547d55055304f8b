#![windows_subsystem = "windows"]

//! Country Picker - pick a country from a list fetched at startup.

mod api;
mod app;
mod config;
mod error;
mod picker;
mod theme;
mod worker;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::PickerConfig;
use crate::theme::Palette;

/// Country Picker Application
#[derive(Parser, Debug)]
#[command(name = "country-picker", version, about, long_about = None)]
struct Cli {
    /// Pre-select a country (case-insensitive exact name)
    #[arg(long, value_name = "COUNTRY")]
    select: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = PickerConfig::from_env();
    info!("Starting Country Picker against {}", config.api_url);

    let palette = Palette::load_or_default(&config.stylesheet_path());

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(config.window_size)
        .with_resizable(false)
        .with_title("Country Picker");

    if let Some(icon) = theme::load_icon(&config.icon_path()) {
        viewport = viewport.with_icon(Arc::new(icon));
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Country Picker",
        options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, config, palette, cli.select)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {}", e))?;

    info!("Window closed");
    Ok(())
}
