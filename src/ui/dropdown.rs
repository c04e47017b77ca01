use macroquad::prelude::*;

use super::point_in_rect;

const ROW_HEIGHT: f32 = 30.0;
const FONT_SIZE: u16 = 16;

/// Shorten `text` with an ellipsis until `measure` says it fits in `max_width`
pub fn fit_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> String {
    if measure(text) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if measure(&candidate) <= max_width {
            return candidate;
        }
    }
    "...".to_string()
}

fn text_width(text: &str) -> f32 {
    measure_text(text, None, FONT_SIZE, 1.0).width
}

/// Labeled selector that opens into a list below itself
#[derive(Clone)]
pub struct Dropdown {
    x: f32,
    y: f32,
    width: f32,
    items: Vec<String>,
    selected: usize,
    is_open: bool,
    label: String,
}

impl Dropdown {
    pub fn new(x: f32, y: f32, width: f32, label: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            x,
            y,
            width,
            items,
            selected: 0,
            is_open: false,
            label: label.into(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Ignored when `index` is out of range
    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn item_y(&self, index: usize) -> f32 {
        self.y + ROW_HEIGHT * (index as f32 + 1.0)
    }

    fn is_hovered_main(&self, mouse_pos: (f32, f32)) -> bool {
        point_in_rect(mouse_pos, self.x, self.y, self.width, ROW_HEIGHT)
    }

    fn hovered_item(&self, mouse_pos: (f32, f32)) -> Option<usize> {
        if !self.is_open {
            return None;
        }
        (0..self.items.len()).find(|&i| point_in_rect(mouse_pos, self.x, self.item_y(i), self.width, ROW_HEIGHT))
    }

    /// Handle a click at `mouse_pos`. Returns true if the selection changed.
    pub fn click(&mut self, mouse_pos: (f32, f32)) -> bool {
        if self.is_hovered_main(mouse_pos) {
            self.is_open = !self.is_open;
            return false;
        }
        if !self.is_open {
            return false;
        }

        let hovered = self.hovered_item(mouse_pos);
        self.is_open = false;
        match hovered {
            Some(i) if i != self.selected => {
                self.selected = i;
                true
            }
            _ => false,
        }
    }

    /// Feed this frame's mouse state. Returns true if the selection changed.
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> bool {
        is_mouse_button_pressed(MouseButton::Left) && self.click(mouse_pos)
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_text(&self.label, self.x, self.y - 5.0, 14.0, GRAY);

        let button_color = if self.is_hovered_main(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };
        draw_rectangle(self.x, self.y, self.width, ROW_HEIGHT, button_color);
        draw_rectangle_lines(self.x, self.y, self.width, ROW_HEIGHT, 2.0, WHITE);

        let current = self.selected_item().unwrap_or("");
        let shown = fit_text(current, self.width - 30.0, text_width);
        draw_text(&shown, self.x + 5.0, self.y + 21.0, FONT_SIZE as f32, WHITE);
        draw_text(if self.is_open { "^" } else { "v" }, self.x + self.width - 18.0, self.y + 21.0, 16.0, WHITE);

        if !self.is_open {
            return;
        }

        let menu_height = self.items.len() as f32 * ROW_HEIGHT;
        draw_rectangle(self.x, self.y + ROW_HEIGHT, self.width, menu_height, Color::from_rgba(30, 30, 30, 255));

        let hovered = self.hovered_item(mouse_pos);
        for (i, item) in self.items.iter().enumerate() {
            let item_y = self.item_y(i);
            let item_color = if hovered == Some(i) {
                Color::from_rgba(100, 149, 237, 255)
            } else if i == self.selected {
                Color::from_rgba(50, 100, 150, 255)
            } else {
                Color::from_rgba(45, 45, 45, 255)
            };
            draw_rectangle(self.x, item_y, self.width, ROW_HEIGHT, item_color);
            draw_rectangle_lines(self.x, item_y, self.width, ROW_HEIGHT, 1.0, Color::from_rgba(80, 80, 80, 255));

            let shown = fit_text(item, self.width - 10.0, text_width);
            draw_text(&shown, self.x + 5.0, item_y + 21.0, FONT_SIZE as f32, WHITE);
        }
        draw_rectangle_lines(self.x, self.y + ROW_HEIGHT, self.width, menu_height, 2.0, WHITE);
    }
}

/// Draw closed dropdowns first and the open one last, so its list
/// covers everything below it
pub fn draw_dropdowns(dropdowns: &[&Dropdown], mouse_pos: (f32, f32)) {
    dropdowns
        .iter()
        .filter(|d| !d.is_open())
        .for_each(|d| d.draw(mouse_pos));
    dropdowns
        .iter()
        .filter(|d| d.is_open())
        .for_each(|d| d.draw(mouse_pos));
}

/// At most one dropdown open: when `opened` just opened, close the rest
pub fn close_others(dropdowns: &mut [&mut Dropdown], opened: usize) {
    dropdowns
        .iter_mut()
        .enumerate()
        .filter(|&(i, _)| i != opened)
        .for_each(|(_, d)| d.close());
}

/// Route one click through a column of dropdowns. An open list takes
/// the click alone, otherwise the header under the mouse does, so one
/// press never reaches two dropdowns. Returns `(dropdown, item)` when a
/// selection changed.
pub fn click_dropdowns(dropdowns: &mut [&mut Dropdown], mouse_pos: (f32, f32)) -> Option<(usize, usize)> {
    let target = dropdowns
        .iter()
        .position(|d| d.is_open())
        .or_else(|| dropdowns.iter().position(|d| d.is_hovered_main(mouse_pos)))?;

    let changed = dropdowns[target].click(mouse_pos);
    if dropdowns[target].is_open() {
        close_others(dropdowns, target);
    }
    changed.then(|| (target, dropdowns[target].selected()))
}

/// [`click_dropdowns`] fed with this frame's left press
pub fn update_dropdowns(dropdowns: &mut [&mut Dropdown], mouse_pos: (f32, f32)) -> Option<(usize, usize)> {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return None;
    }
    click_dropdowns(dropdowns, mouse_pos)
}
