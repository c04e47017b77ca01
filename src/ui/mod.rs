mod button;
mod dropdown;
mod slider;

pub use button::{Button, ButtonStyle};
pub use dropdown::{Dropdown, click_dropdowns, close_others, draw_dropdowns, fit_text, update_dropdowns};
pub use slider::Slider;

// Layout is recomputed every frame so the window can be resized
use macroquad::prelude::{screen_height, screen_width};

use crate::application::DemoTab;

pub const PANEL_WIDTH: f32 = 200.0;
pub const TAB_BAR_HEIGHT: f32 = 40.0;
pub const BUTTON_HEIGHT: f32 = 36.0;
pub const MARGIN: f32 = 10.0;

/// Hit test shared by all widgets. Edges count as inside.
pub fn point_in_rect(pos: (f32, f32), x: f32, y: f32, w: f32, h: f32) -> bool {
    pos.0 >= x && pos.0 <= x + w && pos.1 >= y && pos.1 <= y + h
}

/// X position where the side panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Inner x of panel widgets
pub fn panel_inner_x() -> f32 {
    panel_x() + MARGIN
}

pub fn panel_inner_width() -> f32 {
    PANEL_WIDTH - 2.0 * MARGIN
}

/// `(x, y, w, h)` left for the demo itself, below the tabs and left of the panel
pub fn content_area() -> (f32, f32, f32, f32) {
    content_area_for(screen_width(), screen_height())
}

pub fn content_area_for(width: f32, height: f32) -> (f32, f32, f32, f32) {
    (
        MARGIN,
        TAB_BAR_HEIGHT + MARGIN,
        (width - PANEL_WIDTH - 2.0 * MARGIN).max(0.0),
        (height - TAB_BAR_HEIGHT - 2.0 * MARGIN).max(0.0),
    )
}

/// One button per demo across the top
pub fn create_tab_buttons() -> Vec<Button> {
    let width = (screen_width() / DemoTab::all().len() as f32).min(180.0);
    DemoTab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| Button::new(i as f32 * width, 0.0, width, TAB_BAR_HEIGHT, tab.title()))
        .collect()
}

/// Life panel dropdown rows, in top-to-bottom order
pub const LIFE_DROPDOWN_Y: [f32; 5] = [70.0, 120.0, 170.0, 220.0, 270.0];

/// Life panel buttons: Play/Pause, Step, Clear, Random
pub fn create_life_buttons() -> Vec<Button> {
    let x = panel_inner_x();
    let w = panel_inner_width();
    let half = (w - MARGIN) / 2.0;
    vec![
        Button::new(x, 520.0, w, BUTTON_HEIGHT, "Play/Pause"),
        Button::new(x, 565.0, half, BUTTON_HEIGHT, "Step"),
        Button::new(x + half + MARGIN, 565.0, half, BUTTON_HEIGHT, "Clear").with_style(ButtonStyle::Danger),
        Button::new(x, 610.0, w, BUTTON_HEIGHT, "Random").with_style(ButtonStyle::Success),
    ]
}

pub const COLOR_SIZE_Y: f32 = 80.0;
pub const COLOR_SLIDER_Y: f32 = 160.0;
pub const COLOR_MODE_Y: f32 = 215.0;
pub const COLOR_RANDOMIZE_Y: f32 = 265.0;

/// Index of Randomize in [`create_color_buttons`]
pub const COLOR_RANDOMIZE_BUTTON: usize = 2;

/// Color panel buttons: +, -, Randomize
pub fn create_color_buttons() -> Vec<Button> {
    let x = panel_inner_x();
    vec![
        Button::new(x + 110.0, COLOR_SIZE_Y - 22.0, 30.0, 30.0, "+"),
        Button::new(x + 145.0, COLOR_SIZE_Y - 22.0, 30.0, 30.0, "-").with_style(ButtonStyle::Danger),
        Button::new(x, COLOR_RANDOMIZE_Y, panel_inner_width(), BUTTON_HEIGHT, "Randomize")
            .with_style(ButtonStyle::Success),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_rect_edges() {
        assert!(point_in_rect((10.0, 10.0), 10.0, 10.0, 5.0, 5.0));
        assert!(point_in_rect((15.0, 15.0), 10.0, 10.0, 5.0, 5.0));
        assert!(!point_in_rect((15.1, 12.0), 10.0, 10.0, 5.0, 5.0));
        assert!(!point_in_rect((12.0, 9.9), 10.0, 10.0, 5.0, 5.0));
    }

    #[test]
    fn test_content_area_leaves_room_for_panel_and_tabs() {
        let (x, y, w, h) = content_area_for(1000.0, 800.0);
        assert_eq!((x, y), (MARGIN, TAB_BAR_HEIGHT + MARGIN));
        assert_eq!(w, 1000.0 - PANEL_WIDTH - 2.0 * MARGIN);
        assert_eq!(h, 800.0 - TAB_BAR_HEIGHT - 2.0 * MARGIN);
        assert_eq!(content_area_for(100.0, 20.0), (MARGIN, TAB_BAR_HEIGHT + MARGIN, 0.0, 0.0));
    }
}
