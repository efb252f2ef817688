use eframe::egui;
use std::path::PathBuf;

use tracing::{error, info};

use crate::ui::app::{LeftTab, NarrativeApp};
use crate::ui::settings_io::save_settings;

pub fn draw_left_panel(ctx: &egui::Context, app: &mut NarrativeApp) {
    egui::SidePanel::left("left")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut app.ui.left_tab, LeftTab::Settings, "Settings");
                ui.selectable_value(&mut app.ui.left_tab, LeftTab::Server, "Server");
            });

            ui.separator();

            let tab = app.ui.left_tab;
            egui::ScrollArea::vertical().show(ui, |ui| match tab {
                LeftTab::Settings => draw_settings(ui, app),
                LeftTab::Server => draw_server(ui, app),
            });
        });
}

/* =========================
   Settings UI
   ========================= */

fn draw_settings(ui: &mut egui::Ui, app: &mut NarrativeApp) {
    let s = &mut app.ui.settings;
    let mut changed = false;

    ui.label("UI Scale");
    changed |= ui.add(egui::Slider::new(&mut s.ui_scale, 0.75..=2.0)).changed();

    ui.separator();
    ui.label("Scene typing (ms/char)");
    changed |= ui.add(egui::DragValue::new(&mut s.scene_typing_ms).range(0..=200)).changed();

    ui.label("Narration typing (ms/char)");
    changed |= ui.add(egui::DragValue::new(&mut s.narration_typing_ms).range(0..=200)).changed();

    ui.label("Next scene delay (ms)");
    changed |= ui.add(egui::DragValue::new(&mut s.next_scene_delay_ms).range(0..=10_000)).changed();

    ui.separator();
    ui.label("CJK font file");
    let mut font = s
        .cjk_font_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    if ui.text_edit_singleline(&mut font).changed() {
        s.cjk_font_path = Some(font.trim())
            .filter(|f| !f.is_empty())
            .map(PathBuf::from);
        changed = true;
    }
    ui.small("Font changes apply on restart.");

    if changed {
        let timing = s.timing();
        app.controller.set_timing(timing);
        app.ui.settings_dirty = true;
    }

    ui.separator();
    ui.add_enabled_ui(app.ui.settings_dirty, |ui| {
        if ui.button("Save").clicked() {
            match save_settings(&app.ui.settings) {
                Ok(()) => {
                    info!("settings saved");
                    app.ui.settings_dirty = false;
                }
                Err(e) => error!(error = %e, "failed to save settings"),
            }
        }
    });
}

/* =========================
   Server UI
   ========================= */

fn draw_server(ui: &mut egui::Ui, app: &mut NarrativeApp) {
    ui.label("Server URL");
    if ui.text_edit_singleline(&mut app.ui.settings.server_url).changed() {
        app.ui.settings_dirty = true;
    }
    ui.small("Takes effect on restart.");

    if ui.button("Reload scene").clicked() {
        let cmd = app.controller.load_scene();
        app.send(cmd);
    }

    ui.separator();
    ui.label("API key");
    ui.add(
        egui::TextEdit::singleline(&mut app.ui.api_key_input)
            .password(true)
            .hint_text("sk-…"),
    );

    if ui.button("Send key").clicked() {
        if let Some(cmd) = app.controller.set_api_key(&app.ui.api_key_input) {
            app.send(cmd);
            app.ui.api_key_input.clear();
        }
    }
}
