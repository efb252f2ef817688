use eframe::egui;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use tracing::error;

use crate::engine::api_client::HttpGameApi;
use crate::engine::engine::Engine;
use crate::engine::protocol::{ClientCommand, ClientResponse};
use crate::ui::center_panel::draw_center_panel;
use crate::ui::left_panel::draw_left_panel;
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::ClientSettings;
use crate::view::controller::ViewController;
use crate::view::format::RESET_PROMPT;

/* =========================
   Tabs
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftTab {
    #[default]
    Settings,
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RightTab {
    #[default]
    Log,
    Player,
    Scene,
}

/* =========================
   UI State
   ========================= */

/// Window chrome that is not part of the game view.
#[derive(Default)]
pub struct UiState {
    pub settings: ClientSettings,
    pub settings_dirty: bool,
    pub api_key_input: String,

    pub confirm_reset: bool,

    pub left_tab: LeftTab,
    pub right_tab: RightTab,
}

/* =========================
   App
   ========================= */

pub struct NarrativeApp {
    pub controller: ViewController,
    pub ui: UiState,

    cmd_tx: mpsc::Sender<ClientCommand>,
    resp_rx: mpsc::Receiver<ClientResponse>,
}

impl NarrativeApp {
    pub fn new(settings: ClientSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let api = HttpGameApi::new(&settings.server_url);
        std::thread::spawn(move || {
            let mut engine = Engine::new(api, cmd_rx, resp_tx);
            engine.run();
        });

        let mut app = Self {
            controller: ViewController::new(settings.timing()),
            ui: UiState {
                settings,
                ..Default::default()
            },
            cmd_tx,
            resp_rx,
        };

        let initial = app.controller.load_scene();
        app.send(initial);
        app
    }

    pub fn send(&self, cmd: ClientCommand) {
        if let Err(e) = self.cmd_tx.send(cmd) {
            error!(error = %e, "engine thread is gone");
        }
    }

    fn draw_modals(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.controller.view().alert.clone() {
            let mut dismissed = false;
            modal("alert").show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
            if dismissed {
                self.controller.dismiss_alert();
            }
        }

        if self.ui.confirm_reset {
            let mut answer = None;
            modal("confirm_reset").show(ctx, |ui| {
                ui.label(RESET_PROMPT);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

            if let Some(confirmed) = answer {
                self.ui.confirm_reset = false;
                if confirmed {
                    let cmd = self.controller.reset();
                    self.send(cmd);
                }
            }
        }
    }

    /// True while a modal is open and the rest of the window must not react.
    pub fn is_blocked(&self) -> bool {
        self.controller.view().alert.is_some() || self.ui.confirm_reset
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for NarrativeApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.settings.ui_scale);

        let now = Instant::now();
        while let Ok(resp) = self.resp_rx.try_recv() {
            self.controller.apply(resp, now);
        }
        self.controller.tick(now);

        draw_left_panel(ctx, self);
        draw_right_panel(ctx, self);
        draw_center_panel(ctx, self, now);
        self.draw_modals(ctx);

        // Answers arrive on a channel that does not wake egui, so keep polling.
        let next_frame = if self.controller.is_animating(now) {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };
        ctx.request_repaint_after(next_frame);
    }
}

/* =========================
   UI Helpers
   ========================= */

fn modal(id: &str) -> egui::Window<'static> {
    egui::Window::new("")
        .id(egui::Id::new(id))
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 120.0])
}

pub fn bubble(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
        });
}

pub fn list(ui: &mut egui::Ui, label: &str, items: &[String]) {
    ui.collapsing(label, |ui| {
        if items.is_empty() {
            ui.label("None");
        } else {
            for i in items {
                ui.label(format!("• {i}"));
            }
        }
    });
}
