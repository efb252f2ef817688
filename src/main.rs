mod engine;
mod model;
mod ui;
mod view;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::ui::settings::SERVER_URL_ENV;

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "narrative_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ui::settings_io::load_settings()
        .with_env_override(std::env::var(SERVER_URL_ENV).ok());
    info!(server = %settings.server_url, "starting narrative client");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Narrative Client")
            .with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "narrative_client",
        options,
        Box::new(move |cc| {
            if let Some(path) = &settings.cjk_font_path {
                if let Err(e) = install_font(&cc.egui_ctx, path) {
                    warn!(error = %e, "CJK font not installed, Chinese text may not render");
                }
            }
            Ok(Box::new(ui::app::NarrativeApp::new(settings)))
        }),
    )
}

/// Appends a fallback font so glyphs missing from egui's defaults render.
fn install_font(ctx: &egui::Context, path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);

    info!(path = %path.display(), "installed CJK font");
    Ok(())
}
