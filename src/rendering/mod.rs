mod colors;
mod life;
mod sum_table;

pub use colors::{draw_color_matrix, draw_color_panel};
pub use life::{LifeCanvas, draw_life_panel, draw_pattern_preview};
pub use sum_table::{draw_sum_panel, draw_sum_table};

use macroquad::prelude::*;

use crate::ui::{Button, PANEL_WIDTH, TAB_BAR_HEIGHT, panel_inner_width, panel_inner_x, panel_x};

pub const PANEL_COLOR: Color = Color::new(30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0, 1.0);
pub const LABEL_COLOR: Color = Color::new(180.0 / 255.0, 180.0 / 255.0, 180.0 / 255.0, 1.0);
pub const ERROR_COLOR: Color = Color::new(1.0, 90.0 / 255.0, 90.0 / 255.0, 1.0);

/// Format large numbers with K/M suffixes
pub fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{n}")
    }
}

/// Green/yellow/orange/red by how much of a 60 FPS frame `ms` eats
pub fn timing_color(ms: f32) -> Color {
    if ms < 5.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if ms < 16.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else if ms < 50.0 {
        Color::from_rgba(255, 165, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    }
}

/// Split `text` into lines of at most `max_chars` characters at spaces
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn draw_panel_background() {
    draw_rectangle(panel_x(), TAB_BAR_HEIGHT, PANEL_WIDTH, screen_height(), PANEL_COLOR);
}

/// Tab buttons across the top, the active one highlighted
pub fn draw_tab_bar(tabs: &[Button], active: usize, mouse_pos: (f32, f32)) {
    draw_rectangle(0.0, 0.0, screen_width(), TAB_BAR_HEIGHT, Color::from_rgba(20, 20, 20, 255));
    tabs.iter()
        .enumerate()
        .for_each(|(i, tab)| tab.clone().with_active(i == active).draw(mouse_pos));
}

/// Wrapped red error text in the side panel starting at `y`
pub fn draw_panel_error(message: &str, y: f32) {
    let max_chars = (panel_inner_width() / 7.0) as usize;
    for (i, line) in wrap_text(message, max_chars.max(8)).iter().enumerate() {
        draw_text(line, panel_inner_x(), y + i as f32 * 14.0, 13.0, ERROR_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(4096), "4.1K");
        assert_eq!(format_number(1_048_576), "1.0M");
    }

    #[test]
    fn test_timing_color_bands() {
        assert_eq!(timing_color(1.0), Color::from_rgba(0, 255, 0, 255));
        assert_eq!(timing_color(10.0), Color::from_rgba(255, 255, 0, 255));
        assert_eq!(timing_color(20.0), Color::from_rgba(255, 165, 0, 255));
        assert_eq!(timing_color(500.0), Color::from_rgba(255, 0, 0, 255));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("no GPU adapter found", 10), vec!["no GPU", "adapter", "found"]);
        assert_eq!(wrap_text("", 10), Vec::<String>::new());
        assert_eq!(wrap_text("unbreakablewordhere", 5), vec!["unbreakablewordhere"]);
    }
}
