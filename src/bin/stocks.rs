use std::sync::Arc;

use chartdeck::apps::stocks::StocksApp;
use chartdeck::market::yahoo::YahooClient;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let provider = match YahooClient::new() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("failed to build http client: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stock Candlestick Chart Tool",
        options,
        Box::new(move |_cc| Ok(Box::new(StocksApp::new(provider)))),
    )
}
