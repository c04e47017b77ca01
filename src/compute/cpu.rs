//! CPU backends.
//!
//! [`CpuBackend`] is the single-threaded baseline the GPU is compared
//! against. [`ParallelCpuBackend`] spreads rows across cores with rayon
//! and is the fallback when no GPU is present.

use rayon::prelude::*;

use super::{Backend, ComputeBackend, ComputeError};
use crate::domain::{LifeGrid, LifeRule, Matrix, Rgb};

fn sum_value(x: usize, y: usize) -> u32 {
    (x + y) as u32
}

/// Serial loops on the calling thread
#[derive(Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for CpuBackend {
    fn backend(&self) -> Backend {
        Backend::Cpu
    }

    fn sum_grid(&mut self, width: usize, height: usize) -> Result<Matrix<u32>, ComputeError> {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(sum_value(x, y));
            }
        }
        Ok(Matrix::from_vec(width, height, values).unwrap_or_default())
    }

    fn life_step(&mut self, grid: &LifeGrid, rule: &LifeRule) -> Result<LifeGrid, ComputeError> {
        Ok(grid.step(rule))
    }

    fn random_colors(&mut self, size: usize, loop_count: u32) -> Result<Matrix<Rgb>, ComputeError> {
        let mut rng = rand::rng();
        let mut values = Vec::with_capacity(size * size);
        for _ in 0..size * size {
            values.push(Rgb::random_repeated(&mut rng, loop_count));
        }
        Ok(Matrix::from_vec(size, size, values).unwrap_or_default())
    }
}

/// Rows spread across rayon's global pool
#[derive(Debug)]
pub struct ParallelCpuBackend {
    threads: usize,
}

impl ParallelCpuBackend {
    pub fn new() -> Self {
        Self { threads: rayon::current_num_threads() }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for ParallelCpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for ParallelCpuBackend {
    fn backend(&self) -> Backend {
        Backend::CpuParallel
    }

    fn sum_grid(&mut self, width: usize, height: usize) -> Result<Matrix<u32>, ComputeError> {
        let values: Vec<u32> = (0..width * height)
            .into_par_iter()
            .map(|i| sum_value(i % width, i / width))
            .collect();
        Ok(Matrix::from_vec(width, height, values).unwrap_or_default())
    }

    fn life_step(&mut self, grid: &LifeGrid, rule: &LifeRule) -> Result<LifeGrid, ComputeError> {
        Ok(grid.step_parallel(rule))
    }

    fn random_colors(&mut self, size: usize, loop_count: u32) -> Result<Matrix<Rgb>, ComputeError> {
        let mut values = vec![Rgb::BLACK; size * size];
        if size > 0 {
            values
                .par_chunks_mut(size)
                .for_each_init(rand::rng, |rng, row| {
                    row.iter_mut()
                        .for_each(|cell| *cell = Rgb::random_repeated(rng, loop_count));
                });
        }
        Ok(Matrix::from_vec(size, size, values).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CHANNEL_RANGE, Cell};

    #[test]
    fn test_sum_grid_values() {
        let m = CpuBackend::new().sum_grid(10, 10).unwrap();
        assert_eq!(m.dimensions(), (10, 10));
        assert_eq!(m.get(0, 0), Some(&0));
        assert_eq!(m.get(9, 0), Some(&9));
        assert_eq!(m.get(3, 7), Some(&10));
        assert_eq!(m.get(9, 9), Some(&18));
    }

    #[test]
    fn test_parallel_sum_grid_non_square() {
        let m = ParallelCpuBackend::new().sum_grid(4, 2).unwrap();
        assert_eq!(m.values(), &[0, 1, 2, 3, 1, 2, 3, 4]);
    }

    #[test]
    fn test_random_colors_shape_and_range() {
        let backends: Vec<Box<dyn ComputeBackend>> =
            vec![Box::new(CpuBackend::new()), Box::new(ParallelCpuBackend::new())];
        for mut backend in backends {
            let m = backend.random_colors(6, 3).unwrap();
            assert_eq!(m.dimensions(), (6, 6));
            assert!(m.values().iter().all(|c| c.r < CHANNEL_RANGE && c.g < CHANNEL_RANGE && c.b < CHANNEL_RANGE));
        }
    }

    #[test]
    fn test_zero_loop_count_is_black() {
        let m = ParallelCpuBackend::new().random_colors(3, 0).unwrap();
        assert!(m.values().iter().all(|&c| c == Rgb::BLACK));
    }

    #[test]
    fn test_empty_sizes() {
        assert!(CpuBackend::new().random_colors(0, 5).unwrap().is_empty());
        assert!(ParallelCpuBackend::new().random_colors(0, 5).unwrap().is_empty());
        assert!(ParallelCpuBackend::new().sum_grid(0, 3).unwrap().is_empty());
    }

    #[test]
    fn test_life_step_backends_agree() {
        let mut grid = LifeGrid::new(12, 9);
        for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2), (8, 4), (8, 5), (8, 6)] {
            grid.set(x, y, Cell::Alive);
        }
        let rule = LifeRule::conway();
        let serial = CpuBackend::new().life_step(&grid, &rule).unwrap();
        let parallel = ParallelCpuBackend::new().life_step(&grid, &rule).unwrap();
        assert_eq!(serial, parallel);
    }
}
