//! P4Lens - Main Entry Point
//!
//! Desktop explorer for P4 program structure documents. An optional first
//! argument names a document to open at startup.

use p4lens::{
    config::{log_dir, AppConfig},
    frontend::P4LensApp,
    loader::{FileSource, LoaderBridge},
};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set up tracing; the returned guard flushes the log file on drop
fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new(p4lens::config::DEFAULT_LOG_FILTER));

    let (file_layer, guard) = match log_dir().filter(|_| config.logging.log_to_file) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "p4lens.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let (config, config_error) = AppConfig::load_or_default();
    let _log_guard = init_logging(&config);

    tracing::info!("Starting P4Lens");
    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    // Spawn the loader thread
    let (loader, loader_handle) = match LoaderBridge::spawn(FileSource) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to start loader thread: {}", e);
            std::process::exit(1);
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_title("P4Lens"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "P4Lens",
        native_options,
        Box::new(|cc| Ok(Box::new(P4LensApp::new(cc, loader, config, initial_file)))),
    );

    tracing::info!("Shutting down...");
    if loader_handle.join().is_err() {
        tracing::warn!("Loader thread panicked");
    }

    result
}
