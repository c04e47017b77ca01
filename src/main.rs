use std::time::Instant;

use macroquad::prelude::*;
use gpu_compute_demo::{
    application::{ColorBench, DemoTab, GridView, LifeState, SumDemo},
    compute::{Backend, BackendSet},
    config::{DEFAULT_LOOP_COUNT, DEFAULT_SIZE, DemoConfig, LIFE_GRID_SIZES, MAX_LOOP_COUNT, MIN_LOOP_COUNT},
    domain::{LifeRule, Topology, presets},
    input::{self, LifeInput},
    rendering::{self, LifeCanvas},
    ui::{self, Dropdown, Slider, update_dropdowns},
};

fn window_conf() -> Conf {
    Conf {
        window_title: "GPU Compute Demos".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

fn labels<T>(items: &[T], name: impl Fn(&T) -> String) -> Vec<String> {
    items.iter().map(name).collect()
}

/// Size table entries, plus the configured size if the table lacks it
fn life_sizes(configured: usize) -> Vec<(usize, String)> {
    let mut sizes: Vec<(usize, String)> = LIFE_GRID_SIZES
        .iter()
        .map(|&(size, name)| (size, name.to_string()))
        .collect();
    if !sizes.iter().any(|&(size, _)| size == configured) {
        sizes.push((configured, format!("{configured}×{configured}")));
        sizes.sort_by_key(|&(size, _)| size);
    }
    sizes
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DemoConfig::from_env();
    let mut backends = BackendSet::detect();
    let backend = backends.resolve(config.preferred_backend);
    log::info!("life and color demos start on {backend}");

    let available: Vec<Backend> = backends.available();
    let rules = LifeRule::presets();
    let topologies = Topology::all();
    let patterns = presets::all_patterns();
    let sizes = life_sizes(config.life_size);

    let mut tab = DemoTab::default();
    let mut sum = SumDemo::new();
    let mut state = LifeState::from_config(&config, backend);
    let mut view = GridView::fit(config.life_size, config.life_size, ui::content_area());
    let mut canvas = LifeCanvas::new();
    let mut life_input = LifeInput::new();
    let mut bench = ColorBench::new(DEFAULT_SIZE, DEFAULT_LOOP_COUNT, backend);
    bench.randomize(&mut backends);

    let px = ui::panel_inner_x();
    let width = ui::panel_inner_width();
    let backend_index = available.iter().position(|&b| b == backend).unwrap_or_default();

    let mut size_dropdown = Dropdown::new(px, 0.0, width, "Grid Size", labels(&sizes, |(_, name)| name.clone()));
    size_dropdown.set_selected(sizes.iter().position(|&(s, _)| s == config.life_size).unwrap_or_default());
    let mut rule_dropdown = Dropdown::new(px, 0.0, width, "Rule", labels(&rules, |r| r.to_string()));
    let mut backend_dropdown = Dropdown::new(px, 0.0, width, "Backend", labels(&available, |b| b.to_string()));
    backend_dropdown.set_selected(backend_index);
    let mut edge_dropdown = Dropdown::new(px, 0.0, width, "Edges", labels(&topologies, |t| t.name().to_string()));
    let mut pattern_items = vec!["(none)".to_string()];
    pattern_items.extend(patterns.iter().map(|p| p.name.to_string()));
    let mut pattern_dropdown = Dropdown::new(px, 0.0, width, "Pattern", pattern_items);

    let mut mode_dropdown = Dropdown::new(px, 0.0, width, "Mode", labels(&available, |b| b.to_string()));
    mode_dropdown.set_selected(backend_index);
    let mut loop_slider = Slider::new(px, 0.0, width, "Loop Count", MIN_LOOP_COUNT, MAX_LOOP_COUNT, bench.loop_count());

    loop {
        let mouse_pos = mouse_position();
        let px = ui::panel_inner_x();
        let area = ui::content_area();

        let tabs = ui::create_tab_buttons();
        let chosen = tabs
            .iter()
            .position(|t| t.is_clicked(mouse_pos))
            .and_then(DemoTab::from_index)
            .or_else(input::tab_from_keys);
        if let Some(chosen) = chosen {
            // coming back to a failed sum grid tries it again
            if chosen == DemoTab::Sum && tab != DemoTab::Sum {
                sum.retry();
            }
            tab = chosen;
        }

        clear_background(BLACK);

        match tab {
            DemoTab::Sum => {
                rendering::draw_sum_table(&sum, area);
                rendering::draw_panel_background();
                rendering::draw_sum_panel(&sum);
            }

            DemoTab::Life => {
                let (cols, rows) = state.grid.dimensions();
                view.refit(cols, rows, area);

                let mut dropdowns = [
                    &mut size_dropdown,
                    &mut rule_dropdown,
                    &mut backend_dropdown,
                    &mut edge_dropdown,
                    &mut pattern_dropdown,
                ];
                for (dropdown, &y) in dropdowns.iter_mut().zip(&ui::LIFE_DROPDOWN_Y) {
                    dropdown.set_position(px, y);
                }
                let menu_open = dropdowns.iter().any(|d| d.is_open());
                let mut picked = [None; 5];
                if let Some((i, item)) = update_dropdowns(&mut dropdowns, mouse_pos) {
                    picked[i] = Some(item);
                }

                if let Some(&(size, _)) = picked[0].and_then(|i| sizes.get(i)) {
                    state.resize(size, size);
                    view = GridView::fit(size, size, area);
                }
                if let Some(rule) = picked[1].and_then(|i| rules.get(i)) {
                    state.set_rule(*rule);
                }
                if let Some(&backend) = picked[2].and_then(|i| available.get(i)) {
                    state.set_backend(backend);
                }
                if let Some(&topology) = picked[3].and_then(|i| topologies.get(i)) {
                    state.set_topology(topology);
                }
                match picked[4] {
                    Some(0) => state.cancel_pattern(),
                    Some(i) => {
                        if let Some(pattern) = patterns.get(i - 1) {
                            state.arm_pattern(pattern.clone());
                        }
                    }
                    None => {}
                }

                let buttons = ui::create_life_buttons();
                if !menu_open {
                    if view.area_contains(mouse_pos.0, mouse_pos.1) {
                        input::handle_zoom(&mut view);
                    }
                    life_input.handle_pan(&mut view, mouse_pos);
                    life_input.handle_mouse(&mut state, &view, mouse_pos);
                    state = input::process_life_buttons(state, &buttons, mouse_pos, &mut backends);
                }
                if state.pending_pattern.is_none() {
                    pattern_dropdown.set_selected(0);
                }
                state = input::process_life_keys(state, &mut view, &mut backends);
                state = state.tick(get_frame_time(), &mut backends);

                let render_start = Instant::now();
                canvas.draw(&state.grid, &view);
                if let Some(pattern) = &state.pending_pattern {
                    if view.area_contains(mouse_pos.0, mouse_pos.1) {
                        rendering::draw_pattern_preview(pattern, &view, mouse_pos);
                    }
                }
                rendering::draw_panel_background();
                rendering::draw_life_panel(
                    &state,
                    &view,
                    &buttons,
                    &[&size_dropdown, &rule_dropdown, &backend_dropdown, &edge_dropdown, &pattern_dropdown],
                    backends.gpu_adapter_name(),
                    mouse_pos,
                );
                state.last_render_time_ms = render_start.elapsed().as_secs_f32() * 1000.0;
            }

            DemoTab::Colors => {
                mode_dropdown.set_position(px, ui::COLOR_MODE_Y);
                loop_slider.set_position(px, ui::COLOR_SLIDER_Y);

                let menu_open = mode_dropdown.is_open();
                if mode_dropdown.update(mouse_pos) {
                    if let Some(&mode) = available.get(mode_dropdown.selected()) {
                        bench.mode = mode;
                    }
                }

                let buttons = ui::create_color_buttons();
                if !menu_open {
                    input::process_color_input(&mut bench, &buttons, &mut loop_slider, mouse_pos, &mut backends);
                }

                rendering::draw_color_matrix(bench.matrix.as_ref(), area);
                rendering::draw_panel_background();
                rendering::draw_color_panel(&bench, &buttons, &loop_slider, &mode_dropdown, mouse_pos);
            }
        }

        rendering::draw_tab_bar(&tabs, DemoTab::all().iter().position(|&t| t == tab).unwrap_or_default(), mouse_pos);

        // the first Sum frame shows "Computing..." before the kernel runs
        if tab == DemoTab::Sum && sum.needs_compute() {
            sum.ensure_computed(&mut backends);
        }

        next_frame().await;
    }
}
