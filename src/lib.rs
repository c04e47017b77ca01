// Domain layer - cells, rules, grids, matrices
pub mod domain;

// Compute layer - CPU and GPU backends behind one trait
pub mod compute;

// Application layer - per-demo state
pub mod application;

pub mod config;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use application::{Brush, ColorBench, LifeState, SumDemo};
pub use compute::{Backend, BackendSet, ComputeBackend, ComputeError};
pub use domain::{Cell, LifeGrid, LifeRule, Matrix, Pattern, Rgb, presets};
