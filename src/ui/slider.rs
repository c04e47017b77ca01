use macroquad::prelude::*;

use super::point_in_rect;

const TRACK_HEIGHT: f32 = 6.0;
const KNOB_RADIUS: f32 = 8.0;

/// Horizontal integer slider over `min..=max`
#[derive(Clone)]
pub struct Slider {
    x: f32,
    y: f32,
    width: f32,
    min: u32,
    max: u32,
    value: u32,
    dragging: bool,
    label: String,
}

impl Slider {
    pub fn new(x: f32, y: f32, width: f32, label: impl Into<String>, min: u32, max: u32, value: u32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            x,
            y,
            width,
            min,
            max,
            value: value.clamp(min, max),
            dragging: false,
            label: label.into(),
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set_value(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Value under a screen x coordinate, clamped to the track
    pub fn value_at(&self, mouse_x: f32) -> u32 {
        if self.width <= 0.0 {
            return self.min;
        }
        let t = ((mouse_x - self.x) / self.width).clamp(0.0, 1.0) as f64;
        let span = (self.max - self.min) as f64;
        self.min + (t * span).round() as u32
    }

    fn knob_x(&self) -> f32 {
        let span = (self.max - self.min).max(1) as f32;
        self.x + self.width * (self.value - self.min) as f32 / span
    }

    fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        point_in_rect(
            mouse_pos,
            self.x - KNOB_RADIUS,
            self.y - KNOB_RADIUS,
            self.width + 2.0 * KNOB_RADIUS,
            2.0 * KNOB_RADIUS,
        )
    }

    /// Drive the slider from explicit mouse state. Returns true if the
    /// value changed.
    pub fn drag(&mut self, mouse_pos: (f32, f32), pressed: bool, down: bool) -> bool {
        if pressed && self.is_hovered(mouse_pos) {
            self.dragging = true;
        }
        if !down {
            self.dragging = false;
        }
        if !self.dragging {
            return false;
        }

        let value = self.value_at(mouse_pos.0);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Feed this frame's mouse state. Returns true if the value changed.
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> bool {
        self.drag(
            mouse_pos,
            is_mouse_button_pressed(MouseButton::Left),
            is_mouse_button_down(MouseButton::Left),
        )
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_text(&format!("{}: {}", self.label, self.value), self.x, self.y - 14.0, 16.0, WHITE);

        draw_rectangle(
            self.x,
            self.y - TRACK_HEIGHT / 2.0,
            self.width,
            TRACK_HEIGHT,
            Color::from_rgba(60, 60, 60, 255),
        );
        let knob_x = self.knob_x();
        draw_rectangle(
            self.x,
            self.y - TRACK_HEIGHT / 2.0,
            knob_x - self.x,
            TRACK_HEIGHT,
            Color::from_rgba(70, 130, 180, 255),
        );

        let knob_color = if self.dragging || self.is_hovered(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(200, 200, 200, 255)
        };
        draw_circle(knob_x, self.y, KNOB_RADIUS, knob_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loop_slider() -> Slider {
        Slider::new(100.0, 50.0, 100.0, "Loop Count", 1, 101, 51)
    }

    #[test]
    fn test_value_at_maps_track() {
        let slider = loop_slider();
        assert_eq!(slider.value_at(100.0), 1);
        assert_eq!(slider.value_at(150.0), 51);
        assert_eq!(slider.value_at(200.0), 101);
        assert_eq!(slider.value_at(-50.0), 1);
        assert_eq!(slider.value_at(900.0), 101);
    }

    #[test]
    fn test_drag_only_after_press_on_slider() {
        let mut slider = loop_slider();
        assert!(!slider.drag((120.0, 300.0), true, true));
        assert_eq!(slider.value(), 51);

        assert!(slider.drag((120.0, 50.0), true, true));
        assert_eq!(slider.value(), 21);
        // keeps tracking while held, even off the track
        assert!(slider.drag((190.0, 300.0), false, true));
        assert_eq!(slider.value(), 91);
        assert!(!slider.drag((100.0, 300.0), false, false));
        assert_eq!(slider.value(), 91);
    }

    #[test]
    fn test_construction_clamps() {
        let mut slider = Slider::new(0.0, 0.0, 10.0, "x", 10, 5, 100);
        assert_eq!(slider.value(), 10);
        slider.set_value(0);
        assert_eq!(slider.value(), 5);
    }
}
