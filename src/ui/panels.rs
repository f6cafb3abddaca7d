use eframe::egui::{self, Color32, RichText, TextEdit, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Shortcuts").clicked() {
                state.show_shortcuts = true;
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} surfaces loaded ({})",
                ds.len(),
                if ds.is_1d() { "1D" } else { "2D" }
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom control bar – arrangement, navigation, playback
// ---------------------------------------------------------------------------

/// Render the navigation bar below the plots.
pub fn control_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        // ---- Arrangement fields ----
        ui.label("Arrange:");
        let rows_edit = ui.add(TextEdit::singleline(&mut state.rows_text).desired_width(25.0));
        ui.label("x");
        let cols_edit = ui.add(TextEdit::singleline(&mut state.cols_text).desired_width(25.0));
        if rows_edit.lost_focus() || cols_edit.lost_focus() {
            match (
                state.rows_text.trim().parse::<usize>(),
                state.cols_text.trim().parse::<usize>(),
            ) {
                (Ok(rows), Ok(cols)) => state.rearrange(rows, cols),
                _ => state.reset_control_texts(),
            }
        }

        ui.separator();

        // ---- Navigation buttons ----
        if ui.button("⏴ Back").clicked() {
            state.go_back();
        }
        let play_label = if state.playing { "Pause" } else { "Play" };
        if ui.button(play_label).clicked() {
            state.toggle_play();
        }
        if ui.button("Advance ⏵").clicked() {
            state.advance();
        }

        // ---- Current / total, right-aligned ----
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.label(format!("/ {}", state.total()));
            let idx_edit = ui.add(TextEdit::singleline(&mut state.index_text).desired_width(50.0));
            if idx_edit.lost_focus() {
                match state.index_text.trim().parse::<isize>() {
                    Ok(idx) => state.set_current(idx - 1),
                    Err(_) => state.reset_control_texts(),
                }
            }
        });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open time surface file")
        .add_filter("Time surface data", &["tsd", "txt", "json"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}
