//! Limits and runtime options.
//!
//! Compile-time limits live here as constants. A few options can be
//! overridden at startup through environment variables:
//!
//! - `GPU_DEMO_BACKEND`: `gpu`, `parallel` or `cpu`
//! - `GPU_DEMO_LIFE_SIZE`: side of the square life grid
//! - `GPU_DEMO_SPEED`: generations per second
//!
//! Log output is controlled by `RUST_LOG` through `env_logger`.

use std::env;

use crate::compute::Backend;

/// Side of the summation grid
pub const SUM_GRID_SIZE: usize = 10;

pub const MIN_SIZE: usize = 1;
pub const MAX_SIZE: usize = 32;
pub const DEFAULT_SIZE: usize = 8;

pub const MIN_LOOP_COUNT: u32 = 1;
pub const MAX_LOOP_COUNT: u32 = 10_000;
pub const DEFAULT_LOOP_COUNT: u32 = 5000;

pub const MIN_SPEED: f32 = 1.0;
pub const MAX_SPEED: f32 = 60.0;

pub const MIN_LIFE_SIZE: usize = 8;
pub const MAX_LIFE_SIZE: usize = 1024;

/// Life grid sizes offered in the side panel
pub const LIFE_GRID_SIZES: &[(usize, &str)] = &[
    (32, "32×32"),
    (64, "64×64"),
    (128, "128×128"),
    (256, "256×256"),
    (512, "512×512"),
    (1024, "1024×1024"),
];

pub const ENV_BACKEND: &str = "GPU_DEMO_BACKEND";
pub const ENV_LIFE_SIZE: &str = "GPU_DEMO_LIFE_SIZE";
pub const ENV_SPEED: &str = "GPU_DEMO_SPEED";

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Backend for the life and color demos. Falls back to the parallel
    /// CPU backend when it is the GPU and no adapter exists.
    pub preferred_backend: Backend,
    pub life_size: usize,
    pub updates_per_second: f32,
    /// Fraction of cells alive after Random
    pub random_density: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            preferred_backend: Backend::Gpu,
            life_size: 64,
            updates_per_second: 10.0,
            random_density: 0.25,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Invalid values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BACKEND) {
            match raw.parse::<Backend>() {
                Ok(backend) => config.preferred_backend = backend,
                Err(e) => log::warn!("ignoring {ENV_BACKEND}: {e}"),
            }
        }

        if let Some(raw) = lookup(ENV_LIFE_SIZE) {
            match raw.trim().parse::<usize>() {
                Ok(size) => config.life_size = size.clamp(MIN_LIFE_SIZE, MAX_LIFE_SIZE),
                Err(e) => log::warn!("ignoring {ENV_LIFE_SIZE}={raw:?}: {e}"),
            }
        }

        if let Some(raw) = lookup(ENV_SPEED) {
            match raw.trim().parse::<f32>() {
                Ok(speed) if speed.is_finite() => {
                    config.updates_per_second = speed.clamp(MIN_SPEED, MAX_SPEED);
                }
                Ok(_) => log::warn!("ignoring {ENV_SPEED}={raw:?}: not a finite number"),
                Err(e) => log::warn!("ignoring {ENV_SPEED}={raw:?}: {e}"),
            }
        }

        config
    }
}
