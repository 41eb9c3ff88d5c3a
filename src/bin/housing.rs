use std::path::Path;
use std::sync::Arc;

use chartdeck::apps::housing::HousingApp;
use chartdeck::data::loader;
use eframe::egui;

const DATASET_PATH: &str = "assets/housing.csv";

fn main() -> eframe::Result {
    env_logger::init();

    // Startup load; a missing or malformed file is fatal.
    let dataset = match loader::load_csv(Path::new(DATASET_PATH)) {
        Ok(ds) => {
            log::info!("loaded {} housing rows from {DATASET_PATH}", ds.len());
            Arc::new(ds)
        }
        Err(e) => {
            log::error!("failed to load {DATASET_PATH}: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Housing Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(HousingApp::new(dataset)))),
    )
}
