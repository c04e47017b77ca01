use macroquad::prelude::*;

use super::{LABEL_COLOR, draw_panel_error, timing_color};
use crate::application::{SumDemo, format_ms};
use crate::domain::Matrix;
use crate::ui::panel_inner_x;

const MAX_CELL: f32 = 56.0;

/// Side of a table cell so that `cols x rows` fits in the area
pub fn table_cell_size(cols: usize, rows: usize, area: (f32, f32, f32, f32)) -> f32 {
    if cols == 0 || rows == 0 {
        return 0.0;
    }
    let (_, _, w, h) = area;
    (w / cols as f32).min(h / rows as f32).min(MAX_CELL)
}

/// Bordered table of values, or the demo status while there is none
pub fn draw_sum_table(demo: &SumDemo, area: (f32, f32, f32, f32)) {
    let (x, y, _, _) = area;
    let Some(matrix) = demo.matrix() else {
        draw_text(demo.status(), x + 10.0, y + 30.0, 24.0, WHITE);
        return;
    };
    draw_table(matrix, area);
}

fn draw_table(matrix: &Matrix<u32>, area: (f32, f32, f32, f32)) {
    let (x, y, _, _) = area;
    let (cols, rows) = matrix.dimensions();
    let cell = table_cell_size(cols, rows, area);
    let font_size = (cell * 0.45).max(10.0);

    for (row, values) in matrix.rows().enumerate() {
        for (col, value) in values.iter().enumerate() {
            let cx = x + col as f32 * cell;
            let cy = y + row as f32 * cell;
            draw_rectangle_lines(cx, cy, cell, cell, 1.0, GRAY);

            let text = value.to_string();
            let size = measure_text(&text, None, font_size as u16, 1.0);
            draw_text(
                &text,
                cx + (cell - size.width) / 2.0,
                cy + (cell + size.height) / 2.0,
                font_size,
                WHITE,
            );
        }
    }
}

pub fn draw_sum_panel(demo: &SumDemo) {
    let px = panel_inner_x();
    draw_text("Sum Grid", px, 75.0, 20.0, WHITE);
    draw_text("cell (x, y) = x + y", px, 95.0, 14.0, LABEL_COLOR);

    if let Some(backend) = demo.backend() {
        draw_text(&format!("Backend: {backend}"), px, 125.0, 14.0, LABEL_COLOR);
    }
    let elapsed = demo.elapsed_ms().unwrap_or_default();
    draw_text(
        &format!("Time: {}", format_ms(demo.elapsed_ms())),
        px,
        142.0,
        14.0,
        timing_color(elapsed),
    );

    if let Some(error) = demo.last_error() {
        draw_panel_error(error, 170.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_cell_size() {
        assert_eq!(table_cell_size(10, 10, (0.0, 0.0, 300.0, 400.0)), 30.0);
        assert_eq!(table_cell_size(10, 10, (0.0, 0.0, 2000.0, 2000.0)), MAX_CELL);
        assert_eq!(table_cell_size(0, 10, (0.0, 0.0, 100.0, 100.0)), 0.0);
    }
}
