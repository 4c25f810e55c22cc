mod app;
mod config;
mod controller;
mod error;
mod upload;
mod utils;

use anyhow::Context;
use app::PipelineUploader;
use crate::config::UploaderConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use upload::HttpUploadEndpoint;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pipeline_uploader=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = UploaderConfig::load()?;
    let endpoint = HttpUploadEndpoint::new(&config.base_url()?)?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([400.0, 500.0]),
        ..Default::default()
    };

    tracing::info!(server = %config.server_url, "Starting Pipeline Formatter Uploader");

    eframe::run_native(
        "Pipeline Formatter Uploader",
        options,
        Box::new(
            move |cc: &eframe::CreationContext<'_>| -> Box<dyn eframe::App> {
                Box::new(PipelineUploader::new(cc, &config, endpoint, handle))
            },
        ),
    )
    .map_err(|e| anyhow::anyhow!("Window closed with error: {}", e))?;

    Ok(())
}
