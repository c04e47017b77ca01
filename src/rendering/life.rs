use macroquad::prelude::*;

use super::{LABEL_COLOR, draw_panel_error, format_number, timing_color};
use crate::application::{GridView, LifeState};
use crate::compute::Backend;
use crate::domain::{LifeGrid, Pattern};
use crate::ui::{Button, Dropdown, draw_dropdowns, panel_inner_x};

const ALIVE: [u8; 4] = [0, 255, 150, 255];
const DEAD: [u8; 4] = [15, 15, 15, 255];
const GRID_LINE_COLOR: Color = Color::new(40.0 / 255.0, 40.0 / 255.0, 40.0 / 255.0, 1.0);

/// Cell size in pixels from which grid lines are drawn
const GRID_LINES_FROM: f32 = 6.0;

/// The life grid as a one-pixel-per-cell texture, scaled up when drawn.
/// The texture is reused until the grid changes shape.
#[derive(Default)]
pub struct LifeCanvas {
    image: Option<Image>,
    texture: Option<Texture2D>,
}

impl LifeCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn upload(&mut self, grid: &LifeGrid) -> Option<&Texture2D> {
        let (w, h) = grid.dimensions();
        let (w16, h16) = (u16::try_from(w).ok()?, u16::try_from(h).ok()?);
        if grid.is_empty() {
            return None;
        }

        let reuse = self
            .image
            .as_ref()
            .is_some_and(|img| img.width() == w && img.height() == h);
        if !reuse {
            self.image = Some(Image::gen_image_color(w16, h16, BLACK));
            self.texture = None;
        }
        let image = self.image.as_mut()?;

        image
            .bytes
            .chunks_exact_mut(4)
            .zip(grid.words())
            .for_each(|(pixel, &word)| pixel.copy_from_slice(if word != 0 { &ALIVE } else { &DEAD }));

        let texture = match self.texture.take() {
            Some(texture) => {
                texture.update(image);
                texture
            }
            None => {
                let texture = Texture2D::from_image(image);
                texture.set_filter(FilterMode::Nearest);
                texture
            }
        };
        Some(&*self.texture.insert(texture))
    }

    /// Draw the grid through `view`
    pub fn draw(&mut self, grid: &LifeGrid, view: &GridView) {
        let (cols, rows) = grid.dimensions();
        let cell = view.cell_size();
        let (ox, oy) = view.origin();

        if let Some(texture) = self.upload(grid) {
            draw_texture_ex(
                texture,
                ox,
                oy,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(cols as f32 * cell, rows as f32 * cell)),
                    ..Default::default()
                },
            );
        }

        if cell >= GRID_LINES_FROM {
            let (x0, y0, x1, y1) = view.visible_cells();
            let (left, top) = view.cell_to_screen(x0 as i64, y0 as i64);
            let (right, bottom) = view.cell_to_screen(x1 as i64, y1 as i64);
            for x in x0..=x1 {
                let (sx, _) = view.cell_to_screen(x as i64, 0);
                draw_line(sx, top, sx, bottom, 1.0, GRID_LINE_COLOR);
            }
            for y in y0..=y1 {
                let (_, sy) = view.cell_to_screen(0, y as i64);
                draw_line(left, sy, right, sy, 1.0, GRID_LINE_COLOR);
            }
        }
    }
}

/// Semi-transparent preview of a pattern centered on the hovered cell
pub fn draw_pattern_preview(pattern: &Pattern, view: &GridView, mouse_pos: (f32, f32)) {
    let cell = view.cell_size();
    let (cx, cy) = view.screen_to_cell(mouse_pos.0, mouse_pos.1);
    let (start_x, start_y) = pattern.origin_for_center(cx, cy);

    for &(dx, dy) in &pattern.cells {
        let (sx, sy) = view.cell_to_screen(start_x + dx as i64, start_y + dy as i64);
        draw_rectangle(sx, sy, cell, cell, Color::from_rgba(0, 255, 150, 120));
        draw_rectangle_lines(sx, sy, cell, cell, 1.5, Color::from_rgba(0, 255, 150, 200));
    }

    let (bx, by) = view.cell_to_screen(start_x, start_y);
    draw_rectangle_lines(
        bx,
        by,
        pattern.width as f32 * cell,
        pattern.height as f32 * cell,
        2.0,
        Color::from_rgba(255, 255, 0, 180),
    );
}

/// Life side panel: info, buttons, then dropdowns on top
pub fn draw_life_panel(
    state: &LifeState,
    view: &GridView,
    buttons: &[Button],
    dropdowns: &[&Dropdown],
    gpu_name: Option<&str>,
    mouse_pos: (f32, f32),
) {
    let px = panel_inner_x();
    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let (gw, gh) = state.grid.dimensions();
    let step_ms = state.last_step_time_ms;
    let status = if state.pending_pattern.is_some() {
        ("Placing pattern", Color::from_rgba(255, 255, 0, 255))
    } else if state.is_running {
        ("Running", Color::from_rgba(0, 255, 0, 255))
    } else {
        ("Paused", Color::from_rgba(255, 165, 0, 255))
    };

    let labels = [
        (format!("Grid: {gw}x{gh} ({})", state.grid.topology().name()), 315.0, 13.0, LABEL_COLOR),
        (format!("Population: {}", format_number(state.grid.population())), 332.0, 13.0, LABEL_COLOR),
        (format!("Generation: {}", state.generation), 349.0, 13.0, Color::from_rgba(0, 255, 150, 255)),
        (format!("Step ({}): {step_ms:.2} ms", state.backend), 372.0, 13.0, timing_color(step_ms)),
        (format!("Render: {:.1} ms", state.last_render_time_ms), 389.0, 13.0, timing_color(state.last_render_time_ms)),
        (format!("{:.0} gen/s | FPS: {}", state.updates_per_second, get_fps()), 406.0, 13.0, LABEL_COLOR),
        (format!("Zoom: {:.1}x", view.zoom), 423.0, 13.0, LABEL_COLOR),
        (status.0.to_string(), 446.0, 16.0, status.1),
    ];
    for (text, y, size, color) in &labels {
        draw_text(text, px, *y, *size, *color);
    }

    let adapter = match (state.backend, gpu_name) {
        (Backend::Gpu, Some(name)) => name.to_string(),
        (Backend::Gpu, None) => "no GPU adapter".to_string(),
        (backend, _) => backend.description().to_string(),
    };
    draw_text(&adapter, px, 466.0, 11.0, GRAY);

    if let Some(error) = &state.last_error {
        draw_panel_error(error, 482.0);
    }

    let help = ["LMB drag: paint", "Space: play  S: step", "C: clear  R: random", "Wheel: zoom  MMB: pan"];
    for (i, line) in help.iter().enumerate() {
        draw_text(line, px, 665.0 + i as f32 * 14.0, 12.0, GRAY);
    }

    draw_dropdowns(dropdowns, mouse_pos);
}
