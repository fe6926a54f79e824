#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::PvSimApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("PV Sim"),
        ..Default::default()
    };

    eframe::run_native(
        "PV Sim",
        options,
        Box::new(|cc| Ok(Box::new(PvSimApp::new(cc)))),
    )
}
