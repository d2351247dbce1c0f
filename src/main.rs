mod analysis;
mod app;
mod config;
mod data;
mod strategy;
mod ui;

use app::SimTraderApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_min_inner_size([760.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Algo Sim Trader",
        options,
        Box::new(|_cc| Ok(Box::new(SimTraderApp::default()))),
    )
}
