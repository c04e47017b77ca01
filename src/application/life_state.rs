use crate::compute::{Backend, BackendSet, ComputeError};
use crate::config::{DemoConfig, MAX_SPEED, MIN_SPEED};
use crate::domain::{LifeGrid, LifeRule, Pattern, Topology};

use super::timing::measure;

/// LifeState orchestrates the automaton: which backend steps it, how
/// fast, and whether it is running.
#[derive(Debug)]
pub struct LifeState {
    pub grid: LifeGrid,
    pub rule: LifeRule,
    pub backend: Backend,
    pub is_running: bool,
    pub generation: u64,
    pub update_timer: f32,
    pub updates_per_second: f32,
    pub random_density: f64,
    pub last_step_time_ms: f32,
    pub last_render_time_ms: f32,
    /// Message of the last failed step, cleared by the next good one
    pub last_error: Option<String>,
    /// Pattern waiting to be stamped by the next click (None = paint mode)
    pub pending_pattern: Option<Pattern>,
}

impl LifeState {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: LifeGrid::new(width, height),
            rule: LifeRule::default(),
            backend: Backend::default(),
            is_running: false,
            generation: 0,
            update_timer: 0.0,
            updates_per_second: 10.0,
            random_density: 0.25,
            last_step_time_ms: 0.0,
            last_render_time_ms: 0.0,
            last_error: None,
            pending_pattern: None,
        }
    }

    /// Square grid and speed from `config`, stepped on `backend`
    pub fn from_config(config: &DemoConfig, backend: Backend) -> Self {
        let mut state = Self::new(config.life_size, config.life_size);
        state.backend = backend;
        state.updates_per_second = config.updates_per_second.clamp(MIN_SPEED, MAX_SPEED);
        state.random_density = config.random_density;
        state
    }

    /// Replace the grid with an empty one of the new size
    pub fn resize(&mut self, width: usize, height: usize) {
        self.grid = LifeGrid::with_topology(width, height, self.grid.topology());
        self.generation = 0;
        self.is_running = false;
        log::debug!("life grid resized to {width}x{height}");
    }

    pub fn set_rule(&mut self, rule: LifeRule) {
        log::debug!("life rule set to {rule}");
        self.rule = rule;
    }

    pub fn set_backend(&mut self, backend: Backend) {
        self.backend = backend;
        self.last_error = None;
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.grid.set_topology(topology);
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        self
    }

    /// Kill every cell and reset the generation counter
    pub fn clear(mut self) -> Self {
        self.grid.clear();
        self.generation = 0;
        self.is_running = false;
        self
    }

    /// Fill the grid at `random_density` and reset the generation counter
    pub fn randomize(mut self) -> Self {
        self.grid.randomize(&mut rand::rng(), self.random_density);
        self.generation = 0;
        self.is_running = false;
        self
    }

    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta).clamp(MIN_SPEED, MAX_SPEED);
        self
    }

    /// Advance one generation on the selected backend
    pub fn step_once(&mut self, backends: &mut BackendSet) -> Result<(), ComputeError> {
        let compute = backends.get_mut(self.backend)?;
        let (next, elapsed_ms) = measure(|| compute.life_step(&self.grid, &self.rule));
        self.grid = next?;
        self.last_step_time_ms = elapsed_ms;
        self.generation += 1;
        self.last_error = None;
        Ok(())
    }

    /// [`LifeState::step_once`], but a failure pauses the automaton and
    /// is kept for the side panel instead of being returned
    pub fn advance(&mut self, backends: &mut BackendSet) -> bool {
        match self.step_once(backends) {
            Ok(()) => true,
            Err(e) => {
                log::error!("life step on {} failed: {e}", self.backend);
                self.last_error = Some(e.to_string());
                self.is_running = false;
                false
            }
        }
    }

    /// Update by one frame, stepping once per `1 / updates_per_second`
    pub fn tick(mut self, delta_time: f32, backends: &mut BackendSet) -> Self {
        if !self.is_running {
            return self;
        }

        self.update_timer += delta_time;
        let update_interval = 1.0 / self.updates_per_second;

        if self.update_timer >= update_interval {
            self.advance(backends);
            self.update_timer = 0.0;
        }

        self
    }

    /// Arm a pattern for placement; the automaton pauses meanwhile
    pub fn arm_pattern(&mut self, pattern: Pattern) {
        self.pending_pattern = Some(pattern);
        self.is_running = false;
    }

    pub fn cancel_pattern(&mut self) {
        self.pending_pattern = None;
    }

    /// Stamp the armed pattern centered on a cell. Returns the number of
    /// cells that landed on the grid.
    pub fn place_pending(&mut self, cx: i64, cy: i64) -> usize {
        match self.pending_pattern.take() {
            Some(pattern) => pattern.place_centered(&mut self.grid, cx, cy),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, presets};

    fn blinker_state() -> LifeState {
        let mut state = LifeState::new(5, 5);
        state.backend = Backend::Cpu;
        for x in 1..4 {
            state.grid.set(x, 2, Cell::Alive);
        }
        state
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut backends = BackendSet::cpu_only();
        let mut state = blinker_state().toggle_running();
        state.updates_per_second = 10.0;

        state = state.tick(0.05, &mut backends);
        assert_eq!(state.generation, 0);
        state = state.tick(0.06, &mut backends);
        assert_eq!(state.generation, 1);
        assert!(state.grid.is_alive(2, 1) && state.grid.is_alive(2, 3));
        assert!(!state.grid.is_alive(1, 2));
        assert_eq!(state.update_timer, 0.0);
    }

    #[test]
    fn test_tick_does_nothing_when_paused() {
        let mut backends = BackendSet::cpu_only();
        let state = blinker_state().tick(10.0, &mut backends);
        assert_eq!(state.generation, 0);
        assert_eq!(state.update_timer, 0.0);
    }

    #[test]
    fn test_step_once_updates_counters() {
        let mut backends = BackendSet::cpu_only();
        let mut state = blinker_state();
        state.step_once(&mut backends).unwrap();
        state.step_once(&mut backends).unwrap();
        assert_eq!(state.generation, 2);
        assert_eq!(state.grid.population(), 3);
        assert!(state.grid.is_alive(1, 2));
    }

    #[test]
    fn test_failed_step_pauses_and_records_error() {
        let mut backends = BackendSet::cpu_only();
        let mut state = blinker_state().toggle_running();
        state.backend = Backend::Gpu;

        state = state.tick(1.0, &mut backends);
        assert!(!state.is_running);
        assert_eq!(state.generation, 0);
        assert!(state.last_error.is_some());

        state.set_backend(Backend::CpuParallel);
        assert!(state.last_error.is_none());
        assert!(state.advance(&mut backends));
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn test_speed_is_clamped() {
        let state = LifeState::new(4, 4).adjust_speed(-100.0);
        assert_eq!(state.updates_per_second, MIN_SPEED);
        let state = state.adjust_speed(1000.0);
        assert_eq!(state.updates_per_second, MAX_SPEED);
    }

    #[test]
    fn test_clear_and_resize_reset_generation() {
        let mut backends = BackendSet::cpu_only();
        let mut state = blinker_state();
        state.step_once(&mut backends).unwrap();

        let mut state = state.toggle_running().clear();
        assert_eq!(state.generation, 0);
        assert!(!state.is_running);
        assert_eq!(state.grid.population(), 0);

        state.set_topology(Topology::Bounded);
        state.resize(9, 7);
        assert_eq!(state.grid.dimensions(), (9, 7));
        assert_eq!(state.grid.topology(), Topology::Bounded);
    }

    #[test]
    fn test_randomize_respects_density() {
        let mut state = LifeState::new(20, 20);
        state.random_density = 1.0;
        let state = state.randomize();
        assert_eq!(state.grid.population(), 400);
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn test_place_pending_pattern() {
        let mut state = LifeState::new(10, 10).toggle_running();
        state.arm_pattern(presets::blinker());
        assert!(!state.is_running);

        assert_eq!(state.place_pending(5, 5), 3);
        assert!(state.pending_pattern.is_none());
        assert_eq!(state.place_pending(5, 5), 0);
        assert_eq!(state.grid.population(), 3);
    }

    #[test]
    fn test_from_config() {
        let config = DemoConfig {
            life_size: 16,
            updates_per_second: 25.0,
            ..DemoConfig::default()
        };
        let state = LifeState::from_config(&config, Backend::CpuParallel);
        assert_eq!(state.grid.dimensions(), (16, 16));
        assert_eq!(state.updates_per_second, 25.0);
        assert_eq!(state.backend, Backend::CpuParallel);
    }
}
