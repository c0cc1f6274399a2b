mod app;

use std::path::PathBuf;

use uinav::config::{load_cfg, load_cfg_or_default};
use uinav::logging::init_logging;

use crate::app::DemoApp;

const DEFAULT_CONFIG: &str = "uinav.json";

fn main() -> eframe::Result {
    let config_path = std::env::var_os("UINAV_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    // The configured level drives logging, so read the file before the subscriber exists
    let config = match load_cfg(&config_path) {
        Ok(config) => {
            init_logging(&config.log_level).unwrap_or_else(|e| eprintln!("{e}"));
            config
        }
        Err(_) => {
            init_logging("info").unwrap_or_else(|e| eprintln!("{e}"));
            load_cfg_or_default(&config_path)
        }
    };
    tracing::info!(?config, "starting uinav demo");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 360.0])
            .with_min_inner_size([480.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "uinav demo",
        options,
        Box::new(move |_cc| Ok(Box::new(DemoApp::new(&config)?))),
    )
}
