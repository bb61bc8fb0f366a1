use eframe::egui;
use hwcompare::{
    gui::{
        settings::SettingsData,
        CompareApp,
    },
    logging,
    persistence::{
        load_json_or_default,
        SETTINGS_FILE,
    },
};
use tracing::info;

fn main() -> eframe::Result<()> {
    let settings: SettingsData =
        logging::with_startup_logging(|| load_json_or_default(SETTINGS_FILE));
    logging::init_logging(&settings.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting hwcompare");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("CPU Compare"),
        ..Default::default()
    };

    eframe::run_native(
        "hwcompare",
        options,
        Box::new(|cc| Ok(Box::new(CompareApp::new(cc, settings)))),
    )
}
