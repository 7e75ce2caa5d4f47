mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::MovieGenresApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env_and_args();
    log::info!("Using data file {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Movie Genres – Box Office",
        options,
        Box::new(|_cc| Ok(Box::new(MovieGenresApp::new(config)))),
    )
}
