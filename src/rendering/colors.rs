use macroquad::prelude::*;

use super::{LABEL_COLOR, draw_panel_error};
use crate::application::ColorBench;
use crate::domain::{Matrix, Rgb};
use crate::ui::{COLOR_RANDOMIZE_BUTTON, COLOR_SIZE_Y, Button, Dropdown, Slider, draw_dropdowns, panel_inner_x};

use super::sum_table::table_cell_size;

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

/// One bordered swatch per matrix entry. Nothing is drawn without a matrix.
pub fn draw_color_matrix(matrix: Option<&Matrix<Rgb>>, area: (f32, f32, f32, f32)) {
    let Some(matrix) = matrix.filter(|m| !m.is_empty()) else {
        return;
    };
    let (x, y, _, _) = area;
    let (cols, rows) = matrix.dimensions();
    let cell = table_cell_size(cols, rows, area);

    for (row, values) in matrix.rows().enumerate() {
        for (col, &rgb) in values.iter().enumerate() {
            let cx = x + col as f32 * cell;
            let cy = y + row as f32 * cell;
            draw_rectangle(cx + 1.0, cy + 1.0, cell - 2.0, cell - 2.0, to_color(rgb));
            draw_rectangle_lines(cx, cy, cell, cell, 1.0, GRAY);
        }
    }
}

/// Color panel. The Randomize button is only shown once a matrix exists.
pub fn draw_color_panel(
    bench: &ColorBench,
    buttons: &[Button],
    slider: &Slider,
    mode: &Dropdown,
    mouse_pos: (f32, f32),
) {
    let px = panel_inner_x();
    draw_text(&format!("Matrix Size: {}", bench.size()), px, COLOR_SIZE_Y, 16.0, WHITE);

    buttons
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != COLOR_RANDOMIZE_BUTTON || bench.can_randomize())
        .for_each(|(_, b)| b.draw(mouse_pos));
    slider.draw(mouse_pos);

    draw_text(&bench.time_label(), px, 330.0, 14.0, WHITE);
    draw_text(&format!("Mode: {}", bench.mode.description()), px, 348.0, 12.0, LABEL_COLOR);
    if let Some(error) = &bench.last_error {
        draw_panel_error(error, 370.0);
    }

    draw_dropdowns(&[mode], mouse_pos);
}
