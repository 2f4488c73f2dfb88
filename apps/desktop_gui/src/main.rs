mod controller;
mod ui;

use eframe::egui;
use shared::{settings::load_settings, Settings};
use tracing_subscriber::EnvFilter;

use crate::ui::MixerTableApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (settings, startup_status) = settings_or_defaults(load_settings());
    tracing::info!(
        rows = settings.row_count.get(),
        first_title = settings.first_title,
        "starting row list screen"
    );

    let app_name = settings.window_title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app_name.clone())
            .with_inner_size([390.0, 760.0])
            .with_min_inner_size([280.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| Ok(Box::new(MixerTableApp::new(cc, settings, startup_status)))),
    )
}

/// A bad settings file should not keep the window from opening; the screen
/// starts on defaults and says so in its status line.
fn settings_or_defaults(
    loaded: Result<Settings, impl std::fmt::Display>,
) -> (Settings, Option<String>) {
    match loaded {
        Ok(settings) => (settings, None),
        Err(err) => {
            tracing::error!("ignoring invalid settings: {err:#}");
            (
                Settings::default(),
                Some(format!("Invalid settings, using defaults: {err:#}")),
            )
        }
    }
}
