//! GPU backend built on wgpu compute shaders.

mod buffer;
mod context;
mod kernel;

use bytemuck::{Pod, Zeroable};

pub use buffer::GpuBuffer;
pub use context::GpuContext;
pub use kernel::{Kernel, KernelSource, WORKGROUP_SIZE, workgroup_count};

use super::{Backend, ComputeBackend, ComputeError};
use crate::config::MAX_LOOP_COUNT;
use crate::domain::{LifeGrid, LifeRule, Matrix, Rgb, Topology};

pub const SUM_KERNEL: KernelSource = KernelSource {
    label: "sum_grid",
    wgsl: include_str!("shaders/sum.wgsl"),
    entry_point: "sum",
    reads_input: false,
};

pub const LIFE_KERNEL: KernelSource = KernelSource {
    label: "life_step",
    wgsl: include_str!("shaders/life.wgsl"),
    entry_point: "life_step",
    reads_input: true,
};

pub const COLOR_KERNEL: KernelSource = KernelSource {
    label: "random_color",
    wgsl: include_str!("shaders/random_color.wgsl"),
    entry_point: "fill",
    reads_input: false,
};

/// Uniform block of `sum.wgsl`
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GridParams {
    pub width: u32,
    pub height: u32,
    pub _pad: [u32; 2],
}

/// Uniform block of `life.wgsl`
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LifeParams {
    pub width: u32,
    pub height: u32,
    pub birth_mask: u32,
    pub survive_mask: u32,
    pub wrap_edges: u32,
    pub _pad: [u32; 3],
}

impl LifeParams {
    pub fn new(grid: &LifeGrid, rule: &LifeRule) -> Self {
        let (width, height) = grid.dimensions();
        Self {
            width: width as u32,
            height: height as u32,
            birth_mask: rule.birth_mask(),
            survive_mask: rule.survive_mask(),
            wrap_edges: u32::from(grid.topology() == Topology::Toroidal),
            _pad: [0; 3],
        }
    }
}

/// Uniform block of `random_color.wgsl`
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ColorParams {
    pub width: u32,
    pub height: u32,
    pub loop_count: u32,
    pub seed: u32,
}

fn shape(width: usize, height: usize) -> [u32; 2] {
    [width as u32, height as u32]
}

/// Runs the demo workloads on the GPU.
///
/// Kernels keep their buffers, so the color and life kernels are cached
/// and only rebuilt when the requested shape changes. Replacing a kernel
/// drops the old pipeline and buffers.
pub struct GpuBackend {
    context: GpuContext,
    adapter_name: String,
    color_kernel: Option<Kernel<ColorParams>>,
    life_kernel: Option<Kernel<LifeParams>>,
}

impl GpuBackend {
    pub fn new() -> Result<Self, ComputeError> {
        GpuContext::new_blocking().map(Self::from_context)
    }

    pub fn from_context(context: GpuContext) -> Self {
        let adapter_name = context.adapter_name();
        Self {
            context,
            adapter_name,
            color_kernel: None,
            life_kernel: None,
        }
    }

    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    pub fn context(&self) -> &GpuContext {
        &self.context
    }

    /// Build the color kernel for an `n x n` output, replacing any kernel
    /// of a different size. Returns whether a new kernel was compiled.
    pub fn prepare_color_kernel(&mut self, size: usize) -> Result<bool, ComputeError> {
        let wanted = shape(size, size);
        if self.color_kernel.as_ref().is_some_and(|k| k.output_shape() == wanted) {
            return Ok(false);
        }
        if self.color_kernel.take().is_some() {
            log::debug!("releasing color kernel before resizing to {size}x{size}");
        }
        self.color_kernel = Some(Kernel::new(&self.context, &COLOR_KERNEL, wanted)?);
        Ok(true)
    }

    fn prepare_life_kernel(&mut self, width: usize, height: usize) -> Result<(), ComputeError> {
        let wanted = shape(width, height);
        if self.life_kernel.as_ref().is_some_and(|k| k.output_shape() == wanted) {
            return Ok(());
        }
        self.life_kernel = None;
        self.life_kernel = Some(Kernel::new(&self.context, &LIFE_KERNEL, wanted)?);
        Ok(())
    }

    pub fn color_kernel_shape(&self) -> Option<[u32; 2]> {
        self.color_kernel.as_ref().map(Kernel::output_shape)
    }
}

impl ComputeBackend for GpuBackend {
    fn backend(&self) -> Backend {
        Backend::Gpu
    }

    fn sum_grid(&mut self, width: usize, height: usize) -> Result<Matrix<u32>, ComputeError> {
        let kernel = Kernel::<GridParams>::new(&self.context, &SUM_KERNEL, shape(width, height))?;
        let params = GridParams {
            width: width as u32,
            height: height as u32,
            _pad: [0; 2],
        };
        let values = kernel.run(&self.context, &params, None)?;
        Matrix::from_vec(width, height, values).ok_or(ComputeError::ShapeMismatch {
            expected: width * height,
            actual: kernel.len(),
        })
    }

    fn life_step(&mut self, grid: &LifeGrid, rule: &LifeRule) -> Result<LifeGrid, ComputeError> {
        let (width, height) = grid.dimensions();
        self.prepare_life_kernel(width, height)?;
        let Some(kernel) = &self.life_kernel else {
            return Err(ComputeError::Unavailable(Backend::Gpu));
        };

        let words = kernel.run(&self.context, &LifeParams::new(grid, rule), Some(grid.words()))?;
        Ok(LifeGrid::from_words(width, height, grid.topology(), words))
    }

    fn random_colors(&mut self, size: usize, loop_count: u32) -> Result<Matrix<Rgb>, ComputeError> {
        self.prepare_color_kernel(size)?;
        let Some(kernel) = &self.color_kernel else {
            return Err(ComputeError::Unavailable(Backend::Gpu));
        };

        let params = ColorParams {
            width: size as u32,
            height: size as u32,
            loop_count: loop_count.min(MAX_LOOP_COUNT),
            seed: rand::random(),
        };
        let words = kernel.run(&self.context, &params, None)?;
        Matrix::from_vec(size, size, words)
            .map(|m| m.map(Rgb::unpack))
            .ok_or(ComputeError::ShapeMismatch {
                expected: size * size,
                actual: kernel.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CHANNEL_RANGE, Cell, presets};

    /// GPU tests need an adapter; CI machines often have none.
    fn gpu() -> Option<GpuBackend> {
        match GpuBackend::new() {
            Ok(gpu) => Some(gpu),
            Err(e) => {
                eprintln!("skipping GPU test: {e}");
                None
            }
        }
    }

    #[test]
    fn test_uniform_blocks_are_16_byte_multiples() {
        assert_eq!(size_of::<GridParams>(), 16);
        assert_eq!(size_of::<LifeParams>(), 32);
        assert_eq!(size_of::<ColorParams>(), 16);
    }

    #[test]
    fn test_life_params_encode_rule_and_topology() {
        let grid = LifeGrid::with_topology(7, 5, Topology::Bounded);
        let params = LifeParams::new(&grid, &LifeRule::highlife());
        assert_eq!((params.width, params.height), (7, 5));
        assert_eq!(params.birth_mask, (1 << 3) | (1 << 6));
        assert_eq!(params.survive_mask, (1 << 2) | (1 << 3));
        assert_eq!(params.wrap_edges, 0);
    }

    #[test]
    fn test_gpu_sum_grid() {
        let Some(mut gpu) = gpu() else { return };
        let m = gpu.sum_grid(10, 10).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(m.get(x, y), Some(&((x + y) as u32)));
            }
        }
    }

    #[test]
    fn test_gpu_life_matches_cpu() {
        let Some(mut gpu) = gpu() else { return };
        for topology in Topology::all() {
            for rule in LifeRule::presets() {
                let mut grid = LifeGrid::with_topology(29, 19, topology);
                presets::glider().place_at(&mut grid, 0, 0);
                presets::r_pentomino().place_at(&mut grid, 12, 8);
                grid.set(28, 18, Cell::Alive);
                let expected = grid.step(&rule);
                assert_eq!(gpu.life_step(&grid, &rule).unwrap(), expected, "{} {:?}", rule.name(), topology);
            }
        }
    }

    #[test]
    fn test_gpu_color_kernel_rebuilt_only_on_resize() {
        let Some(mut gpu) = gpu() else { return };
        assert!(gpu.prepare_color_kernel(8).unwrap());
        assert!(!gpu.prepare_color_kernel(8).unwrap());
        assert!(gpu.prepare_color_kernel(9).unwrap());
        assert_eq!(gpu.color_kernel_shape(), Some([9, 9]));
    }

    #[test]
    fn test_gpu_random_colors_range() {
        let Some(mut gpu) = gpu() else { return };
        let m = gpu.random_colors(16, 50).unwrap();
        assert_eq!(m.dimensions(), (16, 16));
        assert!(m.values().iter().all(|c| c.r < CHANNEL_RANGE && c.g < CHANNEL_RANGE && c.b < CHANNEL_RANGE));
        // 256 cells all sharing one color would mean the hash ignores the index
        assert!(m.values().iter().any(|c| c != &m.values()[0]));

        let black = gpu.random_colors(4, 0).unwrap();
        assert!(black.values().iter().all(|&c| c == Rgb::BLACK));
    }
}
