use eframe::egui;
use std::time::Instant;

use super::app::NarrativeApp;

pub fn draw_center_panel(ctx: &egui::Context, app: &mut NarrativeApp, now: Instant) {
    let enabled = !app.is_blocked();

    // ---------- Player bar ----------
    egui::TopBottomPanel::top("player_bar").show(ctx, |ui| {
        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name");
                ui.add_sized(
                    [200.0, 20.0],
                    egui::TextEdit::singleline(app.controller.player_name_mut()),
                );

                if ui.button("Set name").clicked() {
                    let cmd = app.controller.set_name();
                    app.send(cmd);
                }

                if ui.button("Reset").clicked() {
                    app.ui.confirm_reset = true;
                }

                if let Some(turn) = app.controller.view().turn {
                    ui.separator();
                    ui.label(format!("Turn {turn}"));
                }
            });
        });
    });

    // ---------- Status line ----------
    if let Some(status) = app.controller.view().status.clone() {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(egui::RichText::new(status).color(egui::Color32::LIGHT_RED));
        });
    }

    // ---------- Scene ----------
    let clicked = egui::CentralPanel::default()
        .show(ctx, |ui| {
            let view = app.controller.view();

            egui::ScrollArea::vertical()
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(view.scene_text(now)).size(18.0));

                    ui.add_space(12.0);

                    let mut clicked = None;
                    ui.add_enabled_ui(enabled && view.choices_enabled, |ui| {
                        for choice in &view.choices {
                            if ui.button(choice.label.as_str()).clicked() {
                                clicked = Some(choice.index);
                            }
                        }
                    });

                    ui.add_space(12.0);
                    ui.separator();

                    let narration = view.narration(now);
                    if !narration.is_empty() {
                        ui.label(egui::RichText::new(narration).italics());
                    }

                    clicked
                })
                .inner
        })
        .inner;

    if let Some(idx) = clicked {
        if let Some(cmd) = app.controller.choose(idx) {
            app.send(cmd);
        }
    }
}
