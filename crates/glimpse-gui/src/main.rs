mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::states::AppConfig;

#[derive(Parser)]
#[command(name = "glimpse", about = "Side-by-side image comparison viewer")]
#[command(version)]
struct Cli {
    /// Image to open at startup
    file: Option<PathBuf>,

    /// TOML file with [viewer] and [processing] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let initial_file = cli.file;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Glimpse")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Glimpse",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::GlimpseApp::new(
                &cc.egui_ctx,
                config,
                initial_file,
            )?))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {e}"))
}
