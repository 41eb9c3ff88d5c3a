use std::sync::Arc;

use chartdeck::apps::gapminder::GapminderApp;
use chartdeck::data::gapminder;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let dataset = match gapminder::load() {
        Ok(ds) => {
            log::info!("loaded {} gapminder rows", ds.len());
            Arc::new(ds)
        }
        Err(e) => {
            log::error!("failed to load bundled dataset: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gapminder Dataset Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(GapminderApp::new(dataset)))),
    )
}
