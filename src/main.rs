mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::DexboardApp;
use eframe::egui;
use state::{AppState, DEFAULT_DATA_FILE};

fn main() -> eframe::Result {
    env_logger::init();

    // The catalog is read exactly once, before the window opens.
    let state = AppState::load(Path::new(DEFAULT_DATA_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dexboard – Creature Catalog",
        options,
        Box::new(move |_cc| Ok(Box::new(DexboardApp::new(state)))),
    )
}
