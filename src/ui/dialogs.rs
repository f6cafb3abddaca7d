use eframe::egui::{self, Context, TextEdit, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shape dialog – asks for the surface shape of a headerless file
// ---------------------------------------------------------------------------

enum ShapeOutcome {
    Keep,
    Accept,
    Cancel,
}

/// Show the pending shape dialog, if any. Cancelling keeps whatever data was
/// already loaded (or the empty state).
pub fn shape_dialog(ctx: &Context, state: &mut AppState) {
    let Some(mut dialog) = state.shape_dialog.take() else {
        return;
    };

    let mut outcome = ShapeOutcome::Keep;

    egui::Window::new("Time surface shape")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label("Please enter the time surface shape:");
            ui.horizontal(|ui: &mut Ui| {
                ui.add(TextEdit::singleline(&mut dialog.rows_text).desired_width(40.0));
                ui.label("x");
                ui.add(TextEdit::singleline(&mut dialog.cols_text).desired_width(40.0));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Delimiter:");
                ui.add(TextEdit::singleline(&mut dialog.delimiter_text).desired_width(40.0));
            });
            ui.checkbox(&mut dialog.has_times, "First column are times");

            ui.add_space(4.0);
            ui.horizontal(|ui: &mut Ui| {
                // Ok stays disabled until the shape parses.
                let valid = dialog.options().is_some();
                if ui.add_enabled(valid, egui::Button::new("Ok")).clicked() {
                    outcome = ShapeOutcome::Accept;
                }
                if ui.button("Cancel").clicked() {
                    outcome = ShapeOutcome::Cancel;
                }
            });
        });

    match outcome {
        ShapeOutcome::Keep => state.shape_dialog = Some(dialog),
        ShapeOutcome::Cancel => {}
        ShapeOutcome::Accept => {
            if let Some(options) = dialog.options() {
                // Remember the choice for the next headerless file.
                state.load_options = options.clone();
                state.open_with_options(dialog.path, options);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Shortcuts window
// ---------------------------------------------------------------------------

/// Small informational window listing the keyboard shortcuts.
pub fn shortcuts_window(ctx: &Context, state: &mut AppState) {
    if !state.show_shortcuts {
        return;
    }

    let mut open = true;
    egui::Window::new("Keyboard shortcuts")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui: &mut Ui| {
            ui.label("Left/Right arrows: navigate");
            ui.label("Space: Play/Pause");
        });
    state.show_shortcuts = open;
}
