mod app;
mod config;
mod data;
mod state;
mod ui;

use app::InsuranceExplorerApp;
use config::ExplorerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ExplorerConfig::from_env();
    log::info!(
        "Reading datasets from {} (risk threshold {})",
        config.data_dir.display(),
        config.risk_threshold
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Insurance Explorer – Synthetic Datasets",
        options,
        Box::new(move |_cc| Ok(Box::new(InsuranceExplorerApp::new(&config)))),
    )
}
