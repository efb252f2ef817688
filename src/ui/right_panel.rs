use eframe::egui;
use serde_json::Value;

use super::app::{bubble, list, NarrativeApp, RightTab};
use crate::model::scene::{Item, Player, Scene};

const LOG_ROW: egui::Color32 = egui::Color32::from_rgb(80, 80, 80);

pub fn draw_right_panel(ctx: &egui::Context, app: &mut NarrativeApp) {
    egui::SidePanel::right("right")
        .resizable(true)
        .default_width(340.0)
        .min_width(260.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut app.ui.right_tab, RightTab::Log, "Log");
                ui.selectable_value(&mut app.ui.right_tab, RightTab::Player, "Player");
                ui.selectable_value(&mut app.ui.right_tab, RightTab::Scene, "Scene");
            });

            ui.separator();

            let view = app.controller.view();
            let tab = app.ui.right_tab;
            egui::ScrollArea::vertical().show(ui, |ui| match tab {
                RightTab::Log => {
                    for row in &view.log {
                        bubble(ui, LOG_ROW, row);
                        ui.add_space(4.0);
                    }
                }
                RightTab::Player => draw_player(ui, view.player.as_ref()),
                RightTab::Scene => draw_scene(ui, view.scene.as_ref(), view.turn, &view.context),
            });
        });
}

/* =========================
   Player UI
   ========================= */

fn draw_player(ui: &mut egui::Ui, player: Option<&Player>) {
    let Some(p) = player else {
        ui.label("No player loaded.");
        return;
    };

    ui.heading(p.name.as_deref().unwrap_or("—"));
    if let Some(identity) = &p.identity {
        ui.label(identity);
    }

    list(ui, "Traits", &p.traits);
    list(ui, "Conditions", &p.conditions);
    items(ui, "Inventory", &p.inventory);
}

/* =========================
   Scene UI
   ========================= */

fn draw_scene(
    ui: &mut egui::Ui,
    scene: Option<&Scene>,
    turn: Option<i64>,
    context: &serde_json::Map<String, Value>,
) {
    if let Some(turn) = turn {
        ui.label(format!("Turn {turn}"));
    }

    let Some(s) = scene else {
        ui.label("No scene loaded.");
        return;
    };

    if let Some(id) = &s.scene_id {
        ui.small(id);
    }

    list(ui, "Environment", &s.env_tags);
    list(ui, "NPCs", &s.npcs);
    list(ui, "Threats", &s.threats);
    list(ui, "Clues", &s.clues);
    items(ui, "Loot", &s.loot);

    ui.collapsing("Checks", |ui| {
        for c in &s.choices {
            let tag = c.check_tag.as_deref().unwrap_or("?");
            ui.label(format!("{} [{}]", c.action, tag));
            if let Some(leads) = &c.leads {
                ui.small(leads);
            }
        }
    });

    ui.collapsing("Context", |ui| {
        if context.is_empty() {
            ui.label("None");
        }
        for (k, v) in context {
            let v = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            ui.label(format!("{k}: {v}"));
        }
    });
}

fn items(ui: &mut egui::Ui, label: &str, items: &[Item]) {
    ui.collapsing(label, |ui| {
        if items.is_empty() {
            ui.label("None");
        }
        for item in items {
            ui.group(|ui| {
                ui.strong(&item.name);
                if !item.description.is_empty() {
                    ui.label(&item.description);
                }
                if !item.effect_tags.is_empty() {
                    ui.small(item.effect_tags.join(", "));
                }
                if !item.usage_notes.is_empty() {
                    ui.small(&item.usage_notes);
                }
            });
        }
    });
}
