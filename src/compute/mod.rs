//! Execution strategies for the three demo workloads.
//!
//! Every strategy implements [`ComputeBackend`], so the demos can swap
//! the GPU path for a CPU path and time the difference:
//!
//! 1. **GPU** - WGSL compute shaders dispatched through wgpu
//! 2. **CPU+Par** - rayon across all cores
//! 3. **CPU** - plain serial loops
//!
//! The GPU is detected at runtime. When no adapter is found the demos
//! keep working on the CPU backends.

mod cpu;
mod error;
pub mod gpu;

use std::fmt;
use std::str::FromStr;

use crate::domain::{LifeGrid, LifeRule, Matrix, Rgb};

pub use cpu::{CpuBackend, ParallelCpuBackend};
pub use error::ComputeError;
pub use gpu::{GpuBackend, GpuContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    #[default]
    Gpu,
    CpuParallel,
    Cpu,
}

impl Backend {
    pub fn all() -> [Backend; 3] {
        [Backend::Gpu, Backend::CpuParallel, Backend::Cpu]
    }

    /// Short label for dropdowns and timing readouts
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Gpu => "GPU",
            Backend::CpuParallel => "CPU+Par",
            Backend::Cpu => "CPU",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Backend::Gpu => "WGSL compute shader via wgpu",
            Backend::CpuParallel => "rayon, one task per row",
            Backend::Cpu => "serial loops on one core",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpu" => Ok(Backend::Gpu),
            "parallel" | "cpu+par" | "rayon" => Ok(Backend::CpuParallel),
            "cpu" | "serial" => Ok(Backend::Cpu),
            other => Err(format!("unknown backend {other:?}, expected gpu, parallel or cpu")),
        }
    }
}

/// One way of running the demo workloads
pub trait ComputeBackend {
    fn backend(&self) -> Backend;

    /// `width x height` grid where entry (x, y) is `x + y`
    fn sum_grid(&mut self, width: usize, height: usize) -> Result<Matrix<u32>, ComputeError>;

    /// Advance the automaton by one generation
    fn life_step(&mut self, grid: &LifeGrid, rule: &LifeRule) -> Result<LifeGrid, ComputeError>;

    /// `size x size` random colors. Each cell repeats its random draw
    /// `loop_count` times and keeps the last one.
    fn random_colors(&mut self, size: usize, loop_count: u32) -> Result<Matrix<Rgb>, ComputeError>;
}

/// Owns one instance of every backend. The GPU slot is empty when no
/// usable adapter was found.
pub struct BackendSet {
    cpu: CpuBackend,
    parallel: ParallelCpuBackend,
    gpu: Option<GpuBackend>,
}

impl BackendSet {
    /// Probe for a GPU and build all backends
    pub fn detect() -> Self {
        let gpu = match GpuBackend::new() {
            Ok(gpu) => {
                log::info!("GPU detected: {}", gpu.adapter_name());
                Some(gpu)
            }
            Err(e) => {
                log::warn!("GPU unavailable, using CPU backends only: {e}");
                None
            }
        };
        Self::with_gpu(gpu)
    }

    /// CPU backends only
    pub fn cpu_only() -> Self {
        Self::with_gpu(None)
    }

    pub fn with_gpu(gpu: Option<GpuBackend>) -> Self {
        Self {
            cpu: CpuBackend::new(),
            parallel: ParallelCpuBackend::new(),
            gpu,
        }
    }

    pub fn has_gpu(&self) -> bool {
        self.gpu.is_some()
    }

    pub fn is_available(&self, backend: Backend) -> bool {
        backend != Backend::Gpu || self.has_gpu()
    }

    /// Backends that can actually run, GPU first
    pub fn available(&self) -> Vec<Backend> {
        Backend::all()
            .into_iter()
            .filter(|&b| self.is_available(b))
            .collect()
    }

    /// `preferred` if it can run, otherwise the parallel CPU backend
    pub fn resolve(&self, preferred: Backend) -> Backend {
        if self.is_available(preferred) {
            preferred
        } else {
            log::warn!("{preferred} backend requested but not available, falling back to {}", Backend::CpuParallel);
            Backend::CpuParallel
        }
    }

    pub fn get_mut(&mut self, backend: Backend) -> Result<&mut dyn ComputeBackend, ComputeError> {
        match backend {
            Backend::Cpu => Ok(&mut self.cpu),
            Backend::CpuParallel => Ok(&mut self.parallel),
            Backend::Gpu => self
                .gpu
                .as_mut()
                .map(|gpu| gpu as &mut dyn ComputeBackend)
                .ok_or(ComputeError::Unavailable(Backend::Gpu)),
        }
    }

    pub fn gpu_adapter_name(&self) -> Option<&str> {
        self.gpu.as_ref().map(GpuBackend::adapter_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_names() {
        assert_eq!("GPU".parse::<Backend>(), Ok(Backend::Gpu));
        assert_eq!("parallel".parse::<Backend>(), Ok(Backend::CpuParallel));
        assert_eq!(" cpu ".parse::<Backend>(), Ok(Backend::Cpu));
        assert!("cuda".parse::<Backend>().is_err());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Backend::all().iter().map(|b| b.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_cpu_only_set_rejects_gpu() {
        let mut set = BackendSet::cpu_only();
        assert!(!set.has_gpu());
        assert_eq!(set.available(), vec![Backend::CpuParallel, Backend::Cpu]);
        assert_eq!(set.resolve(Backend::Gpu), Backend::CpuParallel);
        assert!(matches!(set.get_mut(Backend::Gpu), Err(ComputeError::Unavailable(Backend::Gpu))));
        assert_eq!(set.get_mut(Backend::Cpu).unwrap().backend(), Backend::Cpu);
    }

    #[test]
    fn test_all_cpu_backends_agree_on_sum_grid() {
        let mut set = BackendSet::cpu_only();
        let serial = set.get_mut(Backend::Cpu).unwrap().sum_grid(10, 10).unwrap();
        let parallel = set.get_mut(Backend::CpuParallel).unwrap().sum_grid(10, 10).unwrap();
        assert_eq!(serial, parallel);
    }
}
