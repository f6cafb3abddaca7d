use eframe::egui::{self, Color32, Painter, Pos2, Rect, Stroke};

use crate::data::model::TimeSurface;

// ---------------------------------------------------------------------------
// 3D → 2D projection helpers
// ---------------------------------------------------------------------------

/// Project a 3D point to screen space. Returns `(screen_pos, depth_z)`;
/// larger depth means closer to the viewer.
pub fn project(pos: [f32; 3], rot: [f32; 2], rect: Rect) -> (Pos2, f32) {
    let (sx, cx) = rot[0].sin_cos();
    let (sy, cy) = rot[1].sin_cos();
    let x = pos[0] * cy + pos[2] * sy;
    let y = pos[0] * sx * sy + pos[1] * cx - pos[2] * sx * cy;
    let z = -pos[0] * cx * sy + pos[1] * sx + pos[2] * cx * cy;
    let size = rect.width().min(rect.height()) * 0.34;
    let c = rect.center();
    (egui::pos2(c.x + x * size, c.y - y * size), z)
}

/// Grid vertex of a surface in normalized model space: the row axis spans x,
/// the column axis spans y, the value spans z. The surface is transposed
/// relative to array indexing so non-square surfaces keep their orientation.
fn vertex(ts: &TimeSurface, row: usize, col: usize) -> [f32; 3] {
    let axis = |i: usize, n: usize| {
        let f = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.5 };
        (f - 0.5) * 1.6
    };
    [
        axis(row, ts.rows()),
        axis(col, ts.cols()),
        ts.value(row, col) as f32 - 0.5,
    ]
}

fn shade(color: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let scale = 0.35 + 0.65 * t;
    Color32::from_rgb(
        (color.r() as f32 * scale) as u8,
        (color.g() as f32 * scale) as u8,
        (color.b() as f32 * scale) as u8,
    )
}

// ---------------------------------------------------------------------------
// Surface rendering
// ---------------------------------------------------------------------------

struct Quad {
    corners: [Pos2; 4],
    depth: f32,
    value: f32,
}

/// Draw a 2D time surface as a rotatable 3D plot: height-shaded quads with a
/// wireframe, painted back to front.
pub fn draw_surface(painter: &Painter, rect: Rect, ts: &TimeSurface, rot: [f32; 2], color: Color32) {
    draw_axes(painter, rect, rot);

    let mut quads = Vec::with_capacity((ts.rows() - 1) * (ts.cols() - 1));
    for r in 0..ts.rows() - 1 {
        for c in 0..ts.cols() - 1 {
            let cells = [(r, c), (r + 1, c), (r + 1, c + 1), (r, c + 1)];
            let mut corners = [Pos2::ZERO; 4];
            let mut depth = 0.0;
            let mut value = 0.0;
            for (i, &(qr, qc)) in cells.iter().enumerate() {
                let (p, z) = project(vertex(ts, qr, qc), rot, rect);
                corners[i] = p;
                depth += z * 0.25;
                value += ts.value(qr, qc) as f32 * 0.25;
            }
            quads.push(Quad {
                corners,
                depth,
                value,
            });
        }
    }

    // Painter's algorithm: far quads first.
    quads.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    for quad in &quads {
        let fill = shade(color, quad.value);
        let mut mesh = egui::Mesh::default();
        for p in quad.corners {
            mesh.colored_vertex(p, fill);
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        painter.add(egui::Shape::mesh(mesh));

        let wire = Stroke::new(0.6, shade(color, quad.value * 0.4));
        for i in 0..4 {
            painter.line_segment([quad.corners[i], quad.corners[(i + 1) % 4]], wire);
        }
    }
}

/// Base-plane axis lines with "x"/"y" labels and a vertical value axis.
fn draw_axes(painter: &Painter, rect: Rect, rot: [f32; 2]) {
    const AXIS: Color32 = Color32::from_rgb(130, 130, 125);
    let origin = [-0.8, -0.8, -0.5];
    let ends = [
        ([0.8, -0.8, -0.5], Some("x")),
        ([-0.8, 0.8, -0.5], Some("y")),
        ([-0.8, -0.8, 0.5], None),
    ];

    let (o, _) = project(origin, rot, rect);
    for (end, label) in ends {
        let (e, _) = project(end, rot, rect);
        painter.line_segment([o, e], Stroke::new(1.0, AXIS));
        if let Some(label) = label {
            let tip = o + (e - o) * 1.12;
            painter.text(
                tip,
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(11.0),
                AXIS,
            );
        }
    }
}
