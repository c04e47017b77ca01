use crate::compute::{Backend, BackendSet, ComputeError};
use crate::config::{DEFAULT_LOOP_COUNT, DEFAULT_SIZE, MAX_LOOP_COUNT, MAX_SIZE, MIN_LOOP_COUNT, MIN_SIZE};
use crate::domain::{Matrix, Rgb};

use super::timing::{format_ms, measure};

/// Random color matrix benchmark.
///
/// Only a size change or an explicit [`ColorBench::randomize`] produces a
/// new matrix. Loop count and mode changes apply to the next run.
#[derive(Debug)]
pub struct ColorBench {
    size: usize,
    loop_count: u32,
    pub mode: Backend,
    pub matrix: Option<Matrix<Rgb>>,
    /// Wall time of the last generation in ms
    pub time_taken_ms: Option<f32>,
    pub last_error: Option<String>,
}

impl Default for ColorBench {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_LOOP_COUNT, Backend::Gpu)
    }
}

impl ColorBench {
    pub fn new(size: usize, loop_count: u32, mode: Backend) -> Self {
        Self {
            size: size.clamp(MIN_SIZE, MAX_SIZE),
            loop_count: loop_count.clamp(MIN_LOOP_COUNT, MAX_LOOP_COUNT),
            mode,
            matrix: None,
            time_taken_ms: None,
            last_error: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    /// Set the matrix side and regenerate if it changed. Returns whether
    /// a new matrix was generated.
    pub fn set_size(&mut self, size: usize, backends: &mut BackendSet) -> bool {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        if size == self.size && self.matrix.is_some() {
            return false;
        }
        self.size = size;
        self.randomize(backends);
        true
    }

    pub fn grow(&mut self, backends: &mut BackendSet) -> bool {
        self.set_size(self.size.saturating_add(1), backends)
    }

    pub fn shrink(&mut self, backends: &mut BackendSet) -> bool {
        self.set_size(self.size.saturating_sub(1), backends)
    }

    pub fn set_loop_count(&mut self, loop_count: u32) {
        self.loop_count = loop_count.clamp(MIN_LOOP_COUNT, MAX_LOOP_COUNT);
    }

    /// Randomize is offered only once a matrix exists
    pub fn can_randomize(&self) -> bool {
        self.matrix.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Generate a new matrix with the current settings and time it
    pub fn generate(&mut self, backends: &mut BackendSet) -> Result<(), ComputeError> {
        let compute = backends.get_mut(self.mode)?;
        let (result, elapsed_ms) = measure(|| compute.random_colors(self.size, self.loop_count));
        let matrix = result?;
        log::debug!(
            "{0}x{0} colors x{1} on {2} in {3:.2} ms",
            self.size,
            self.loop_count,
            self.mode,
            elapsed_ms
        );
        self.matrix = Some(matrix);
        self.time_taken_ms = Some(elapsed_ms);
        self.last_error = None;
        Ok(())
    }

    /// [`ColorBench::generate`], keeping a failure for display. A failed
    /// run leaves no matrix and no time.
    pub fn randomize(&mut self, backends: &mut BackendSet) -> bool {
        match self.generate(backends) {
            Ok(()) => true,
            Err(e) => {
                log::error!("color matrix on {} failed: {e}", self.mode);
                self.matrix = None;
                self.time_taken_ms = None;
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// `Time Taken (GPU): 1.23 ms`
    pub fn time_label(&self) -> String {
        format!("Time Taken ({}): {}", self.mode, format_ms(self.time_taken_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_bench() -> ColorBench {
        ColorBench::new(DEFAULT_SIZE, 3, Backend::Cpu)
    }

    #[test]
    fn test_defaults() {
        let bench = ColorBench::default();
        assert_eq!(bench.size(), 8);
        assert_eq!(bench.loop_count(), 5000);
        assert_eq!(bench.mode, Backend::Gpu);
        assert!(!bench.can_randomize());
        assert_eq!(bench.time_label(), "Time Taken (GPU): N/A");
    }

    #[test]
    fn test_limits_are_clamped() {
        let mut backends = BackendSet::cpu_only();
        let mut bench = ColorBench::new(0, 0, Backend::Cpu);
        assert_eq!(bench.size(), MIN_SIZE);
        assert_eq!(bench.loop_count(), MIN_LOOP_COUNT);

        bench.set_size(1000, &mut backends);
        assert_eq!(bench.size(), MAX_SIZE);
        bench.set_loop_count(u32::MAX);
        assert_eq!(bench.loop_count(), MAX_LOOP_COUNT);

        bench.set_size(MIN_SIZE, &mut backends);
        assert!(!bench.shrink(&mut backends));
        assert_eq!(bench.size(), MIN_SIZE);
    }

    #[test]
    fn test_size_change_regenerates() {
        let mut backends = BackendSet::cpu_only();
        let mut bench = cpu_bench();
        assert!(bench.set_size(DEFAULT_SIZE, &mut backends));
        assert!(!bench.set_size(DEFAULT_SIZE, &mut backends));

        assert!(bench.grow(&mut backends));
        assert_eq!(bench.matrix.as_ref().map(Matrix::dimensions), Some((9, 9)));
        assert!(bench.time_taken_ms.is_some());
        assert!(bench.can_randomize());
        assert!(bench.time_label().starts_with("Time Taken (CPU): "));
        assert!(bench.time_label().ends_with(" ms"));
    }

    #[test]
    fn test_loop_count_and_mode_do_not_regenerate() {
        let mut backends = BackendSet::cpu_only();
        let mut bench = cpu_bench();
        bench.randomize(&mut backends);
        let before = bench.matrix.clone();
        let time = bench.time_taken_ms;

        bench.set_loop_count(10);
        bench.mode = Backend::CpuParallel;
        assert_eq!(bench.matrix, before);
        assert_eq!(bench.time_taken_ms, time);
    }

    #[test]
    fn test_unavailable_mode_reports_error() {
        let mut backends = BackendSet::cpu_only();
        let mut bench = ColorBench::new(4, 1, Backend::Gpu);
        assert!(!bench.randomize(&mut backends));
        assert!(bench.matrix.is_none());
        assert!(bench.last_error.is_some());
        assert_eq!(bench.time_label(), "Time Taken (GPU): N/A");

        bench.mode = Backend::Cpu;
        assert!(bench.randomize(&mut backends));
        assert!(bench.last_error.is_none());
    }
}
