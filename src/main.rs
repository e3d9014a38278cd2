use eframe::egui;
use std::path::PathBuf;

use orbit_portfolio::content::{ContentError, ContentPayload};
use orbit_portfolio::scene::{SceneConfig, ScenePreset};

mod app;
mod ui;

use app::PortfolioApp;

/// Path of a JSON payload replacing the embedded content.
const CONTENT_ENV: &str = "ORBIT_PORTFOLIO_CONTENT";
/// Scene layout: `classic` or `extended`.
const PRESET_ENV: &str = "ORBIT_PORTFOLIO_PRESET";

fn main() {
    env_logger::init();

    let config = scene_config();
    let content = load_content(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(format!("{} | {}", content.profile.name, content.profile.tagline)),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Orbit Portfolio",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(PortfolioApp::new(content, config)))
        }),
    );
    if let Err(e) = result {
        log::error!("failed to start: {}", e);
        std::process::exit(1);
    }
}

fn scene_config() -> SceneConfig {
    let preset = match std::env::var(PRESET_ENV) {
        Ok(name) => ScenePreset::from_name(&name).unwrap_or_else(|| {
            log::warn!("unknown {} '{}', using extended", PRESET_ENV, name);
            ScenePreset::Extended
        }),
        Err(_) => ScenePreset::default(),
    };
    log::info!("scene preset: {:?}", preset);
    preset.config()
}

/// Content from `ORBIT_PORTFOLIO_CONTENT` when set and valid, otherwise the
/// embedded payload.
fn load_content(config: &SceneConfig) -> ContentPayload {
    if let Ok(path) = std::env::var(CONTENT_ENV) {
        let path = PathBuf::from(path);
        match load_validated(|| ContentPayload::from_path(&path), &config.sections) {
            Ok(payload) => {
                log::info!("content loaded from {}", path.display());
                return payload;
            }
            Err(e) => log::warn!("{}, falling back to embedded content", e),
        }
    }

    match load_validated(ContentPayload::embedded, &config.sections) {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn load_validated(
    load: impl FnOnce() -> Result<ContentPayload, ContentError>,
    sections: &[orbit_portfolio::navigation::Section],
) -> Result<ContentPayload, ContentError> {
    let payload = load()?;
    payload.validate(sections)?;
    Ok(payload)
}
