mod cell;
mod color;
mod life_grid;
mod line;
mod matrix;
mod patterns;
mod rules;

pub use cell::Cell;
pub use color::{CHANNEL_RANGE, Rgb};
pub use life_grid::{LifeGrid, Topology};
pub use line::line_cells;
pub use matrix::Matrix;
pub use patterns::{Pattern, presets};
pub use rules::{LifeRule, MAX_NEIGHBORS, RuleParseError};
