use macroquad::prelude::*;

use crate::application::{Brush, ColorBench, DemoTab, GridView, LifeState};
use crate::compute::BackendSet;
use crate::ui::{Button, COLOR_RANDOMIZE_BUTTON, Slider};

/// Mouse state of the life demo that lives across frames
#[derive(Debug, Default)]
pub struct LifeInput {
    pub brush: Brush,
    pan_anchor: Option<(f32, f32)>,
}

impl LifeInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pan with middle mouse button drag
    pub fn handle_pan(&mut self, view: &mut GridView, mouse_pos: (f32, f32)) {
        if !is_mouse_button_down(MouseButton::Middle) {
            self.pan_anchor = None;
            return;
        }
        if let Some((lx, ly)) = self.pan_anchor {
            view.pan(mouse_pos.0 - lx, mouse_pos.1 - ly);
        }
        self.pan_anchor = Some(mouse_pos);
    }

    /// Pattern placement if one is armed, otherwise brush strokes.
    /// Presses that start outside the grid area are left to the widgets.
    pub fn handle_mouse(&mut self, state: &mut LifeState, view: &GridView, mouse_pos: (f32, f32)) {
        let in_area = view.area_contains(mouse_pos.0, mouse_pos.1);
        let (cx, cy) = view.screen_to_cell(mouse_pos.0, mouse_pos.1);

        if state.pending_pattern.is_some() {
            if is_mouse_button_pressed(MouseButton::Right) || is_key_pressed(KeyCode::Escape) {
                state.cancel_pattern();
            } else if is_mouse_button_pressed(MouseButton::Left) && in_area {
                let placed = state.place_pending(cx, cy);
                log::debug!("placed pattern at ({cx}, {cy}), {placed} cells on grid");
            }
            return;
        }

        if is_mouse_button_pressed(MouseButton::Left) && in_area {
            self.brush.begin(&mut state.grid, (cx, cy));
        } else if is_mouse_button_down(MouseButton::Left) {
            self.brush.drag(&mut state.grid, (cx, cy));
        } else if self.brush.is_active() {
            self.brush.end();
        }
    }
}

/// Zoom with mouse wheel
pub fn handle_zoom(view: &mut GridView) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        view.zoom_in(1.1);
    } else if wheel < 0.0 {
        view.zoom_out(1.1);
    }
}

/// Tab chosen with the number keys
pub fn tab_from_keys() -> Option<DemoTab> {
    [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3]
        .iter()
        .position(|&key| is_key_pressed(key))
        .and_then(DemoTab::from_index)
}

/// Process life keyboard shortcuts functionally
pub fn process_life_keys(state: LifeState, view: &mut GridView, backends: &mut BackendSet) -> LifeState {
    type KeyAction = (KeyCode, fn(LifeState) -> LifeState);

    let actions: [KeyAction; 5] = [
        (KeyCode::Space, LifeState::toggle_running),
        (KeyCode::C, LifeState::clear),
        (KeyCode::R, LifeState::randomize),
        (KeyCode::Up, |s| s.adjust_speed(1.0)),
        (KeyCode::Down, |s| s.adjust_speed(-1.0)),
    ];

    let mut state = actions.iter().fold(state, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    });

    if is_key_pressed(KeyCode::S) {
        state.advance(backends);
    }
    // 'H' (home) resets zoom and pan
    if is_key_pressed(KeyCode::H) {
        view.reset();
    }

    state
}

/// Play/Pause, Step, Clear, Random
pub fn process_life_buttons(
    state: LifeState,
    buttons: &[Button],
    mouse_pos: (f32, f32),
    backends: &mut BackendSet,
) -> LifeState {
    buttons
        .iter()
        .enumerate()
        .fold(state, |mut s, (idx, btn)| {
            if !btn.is_clicked(mouse_pos) {
                return s;
            }
            match idx {
                0 => s.toggle_running(),
                1 => {
                    s.advance(backends);
                    s
                }
                2 => s.clear(),
                3 => s.randomize(),
                _ => s,
            }
        })
}

/// +, -, Randomize and the loop count slider
pub fn process_color_input(
    bench: &mut ColorBench,
    buttons: &[Button],
    slider: &mut Slider,
    mouse_pos: (f32, f32),
    backends: &mut BackendSet,
) {
    if slider.update(mouse_pos) {
        bench.set_loop_count(slider.value());
    }

    for (idx, btn) in buttons.iter().enumerate() {
        if !btn.is_clicked(mouse_pos) {
            continue;
        }
        match idx {
            0 => {
                bench.grow(backends);
            }
            1 => {
                bench.shrink(backends);
            }
            COLOR_RANDOMIZE_BUTTON if bench.can_randomize() => {
                bench.randomize(backends);
            }
            _ => {}
        }
    }
}
