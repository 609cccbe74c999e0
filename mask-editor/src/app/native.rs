use std::{io, path::PathBuf};

use log::info;

use super::MaskEditorApp;
use crate::config::Config;

const CONFIG_FILE: &str = "config.json";

pub fn run_native() -> eframe::Result {
    env_logger::init();

    let config: Config = match std::fs::File::open(CONFIG_FILE) {
        Ok(f) => serde_json::from_reader(f).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Config::default(),
        Err(e) => Err(eframe::Error::AppCreation(Box::new(e)))?,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.viewport),
        ..Default::default()
    };

    // An image given on the command line replaces the placeholder
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    info!("Run with config: {config:?}, initial image: {initial:?}");
    eframe::run_native(
        "Mask Editor",
        options,
        Box::new(|cc| Ok(Box::new(MaskEditorApp::new(cc, config, initial)))),
    )
}
