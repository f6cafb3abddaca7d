use eframe::egui::{self, Color32, Rect, Sense, Ui, Vec2};
use egui_plot::{Line, Plot, PlotPoints};

use crate::color::generate_palette;
use crate::data::model::TimeSurface;
use crate::state::{AppState, DEFAULT_ROTATION};
use crate::ui::surface3d;

const TITLE_HEIGHT: f32 = 18.0;
const TITLE_COLOR: Color32 = Color32::from_rgb(160, 160, 155);

// ---------------------------------------------------------------------------
// Surface grid (central panel)
// ---------------------------------------------------------------------------

/// Render the current page of time surfaces as a grid of subplots.
///
/// 1D surfaces become line plots, 2D surfaces become 3D plots. All 3D
/// subplots share one pair of view angles: dragging in any cell rotates them
/// all, double-click resets the view.
pub fn surface_grid(ui: &mut Ui, state: &mut AppState) {
    let mut rotation_delta = Vec2::ZERO;
    let mut reset_rotation = false;

    {
        let Some(dataset) = &state.dataset else {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view time surfaces  (File → Open…)");
            });
            return;
        };

        let (rows, cols) = state.arrangement();
        let palette = generate_palette(state.page_size());
        let full = ui.available_rect_before_wrap();
        let cell_w = full.width() / cols as f32;
        let cell_h = full.height() / rows as f32;

        for i in 0..state.page_size() {
            let idx = state.current() + i;
            if idx >= dataset.len() {
                // Leave trailing cells of the last page empty.
                continue;
            }

            let grid_r = i / cols;
            let grid_c = i % cols;
            let cell = Rect::from_min_size(
                egui::pos2(
                    full.left() + grid_c as f32 * cell_w,
                    full.top() + grid_r as f32 * cell_h,
                ),
                egui::vec2(cell_w, cell_h),
            );

            ui.painter().text(
                cell.center_top() + egui::vec2(0.0, 2.0),
                egui::Align2::CENTER_TOP,
                dataset.label(idx),
                egui::FontId::proportional(12.0),
                TITLE_COLOR,
            );

            let body = Rect::from_min_max(cell.min + egui::vec2(2.0, TITLE_HEIGHT), cell.max);
            let surface = &dataset.surfaces[idx];
            let color = palette[i];

            if surface.is_1d() {
                line_subplot(ui, body, i, surface, color);
            } else {
                let response = ui.allocate_rect(body, Sense::click_and_drag());
                if response.dragged() {
                    rotation_delta += response.drag_delta();
                }
                if response.double_clicked() {
                    reset_rotation = true;
                }
                surface3d::draw_surface(ui.painter(), body, surface, state.rotation, color);
            }
        }
    }

    if reset_rotation {
        state.rotation = DEFAULT_ROTATION;
    } else {
        state.rotation[0] += rotation_delta.y * 0.008;
        state.rotation[1] += rotation_delta.x * 0.008;
    }
}

/// One 1D surface as a line plot, y pinned to `[0, 1]`.
fn line_subplot(ui: &mut Ui, rect: Rect, cell: usize, surface: &TimeSurface, color: Color32) {
    let points: PlotPoints = surface
        .as_slice()
        .iter()
        .enumerate()
        .map(|(x, &y)| [x as f64, y])
        .collect();

    ui.allocate_new_ui(egui::UiBuilder::new().max_rect(rect), |ui: &mut Ui| {
        Plot::new(("ts_line", cell))
            .width(rect.width())
            .height(rect.height())
            .include_x(0.0)
            .include_x(surface.len().saturating_sub(1) as f64)
            .include_y(0.0)
            .include_y(1.0)
            .allow_boxed_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).color(color).width(1.5));
            });
    });
}
