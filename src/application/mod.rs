mod brush;
mod color_bench;
mod demo;
mod grid_view;
mod life_state;
mod sum_demo;
mod timing;

pub use brush::Brush;
pub use color_bench::ColorBench;
pub use demo::DemoTab;
pub use grid_view::{GridView, MAX_ZOOM, MIN_ZOOM};
pub use life_state::LifeState;
pub use sum_demo::SumDemo;
pub use timing::{format_ms, measure};
