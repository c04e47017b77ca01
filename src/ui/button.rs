use macroquad::prelude::*;

use super::point_in_rect;

/// Color scheme of a button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    #[default]
    Primary,
    Danger,
    Success,
}

impl ButtonStyle {
    /// `(normal, hovered)` fill colors
    fn colors(self) -> (Color, Color) {
        match self {
            ButtonStyle::Primary => (Color::from_rgba(70, 130, 180, 255), Color::from_rgba(100, 149, 237, 255)),
            ButtonStyle::Danger => (Color::from_rgba(190, 60, 60, 255), Color::from_rgba(220, 80, 80, 255)),
            ButtonStyle::Success => (Color::from_rgba(50, 160, 80, 255), Color::from_rgba(70, 190, 100, 255)),
        }
    }
}

/// Clickable rectangle with a centered label
#[derive(Clone)]
pub struct Button {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    text: String,
    style: ButtonStyle,
    active: bool,
}

impl Button {
    pub fn new(x: f32, y: f32, width: f32, height: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            text: text.into(),
            style: ButtonStyle::default(),
            active: false,
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Highlighted, e.g. the selected tab
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        point_in_rect(mouse_pos, self.x, self.y, self.width, self.height)
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let (normal, hovered) = self.style.colors();
        let color = if self.is_hovered(mouse_pos) || self.active { hovered } else { normal };

        draw_rectangle(self.x, self.y, self.width, self.height, color);
        let border = if self.active { YELLOW } else { WHITE };
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, border);

        let font_size = if self.height < BUTTON_TEXT_BREAKPOINT { 16 } else { 20 };
        let text_size = measure_text(&self.text, None, font_size, 1.0);
        draw_text(
            &self.text,
            self.x + (self.width - text_size.width) / 2.0,
            self.y + (self.height + text_size.height) / 2.0,
            font_size as f32,
            WHITE,
        );
    }

    /// Left button went down over this button this frame
    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.is_hovered(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }
}

const BUTTON_TEXT_BREAKPOINT: f32 = 32.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_uses_bounds() {
        let button = Button::new(10.0, 20.0, 100.0, 30.0, "Step");
        assert!(button.is_hovered((10.0, 20.0)));
        assert!(button.is_hovered((110.0, 50.0)));
        assert!(!button.is_hovered((111.0, 30.0)));
        assert_eq!(button.text(), "Step");
    }

    #[test]
    fn test_styles_differ() {
        assert_ne!(ButtonStyle::Primary.colors().0, ButtonStyle::Danger.colors().0);
        assert_ne!(ButtonStyle::Danger.colors().0, ButtonStyle::Success.colors().0);
    }
}
