use eframe::egui;

use crate::state::AppState;
use crate::ui::{dialogs, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TsViewerApp {
    pub state: AppState,
}

impl TsViewerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for TsViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Keyboard navigation (ignored while a text field is focused) ----
        if !ctx.wants_keyboard_input() {
            ctx.input(|i| {
                if i.key_pressed(egui::Key::ArrowRight) {
                    self.state.advance();
                }
                if i.key_pressed(egui::Key::ArrowLeft) {
                    self.state.go_back();
                }
                if i.key_pressed(egui::Key::Space) {
                    self.state.toggle_play();
                }
            });
        }

        // ---- Playback ----
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        self.state.tick(dt);
        if self.state.playing {
            ctx.request_repaint();
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: navigation controls ----
        egui::TopBottomPanel::bottom("control_bar").show(ctx, |ui| {
            panels::control_bar(ui, &mut self.state);
        });

        // ---- Central panel: surface grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::surface_grid(ui, &mut self.state);
        });

        // ---- Floating windows ----
        dialogs::shape_dialog(ctx, &mut self.state);
        dialogs::shortcuts_window(ctx, &mut self.state);
    }
}
