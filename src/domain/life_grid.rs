use std::fmt;

use rand::Rng;
use rayon::prelude::*;

use super::{Cell, LifeRule};

/// How neighbors are looked up past the edge of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Topology {
    /// Edges wrap around like a torus
    #[default]
    Toroidal,
    /// Everything outside the grid is dead
    Bounded,
}

impl Topology {
    pub fn all() -> [Topology; 2] {
        [Topology::Toroidal, Topology::Bounded]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Topology::Toroidal => "Wrap",
            Topology::Bounded => "Bounded",
        }
    }
}

/// Row-major automaton state. Each cell is one `u32` word (0 or 1),
/// the layout the life kernel reads and writes.
#[derive(Clone, PartialEq, Eq)]
pub struct LifeGrid {
    width: usize,
    height: usize,
    topology: Topology,
    cells: Vec<u32>,
}

impl LifeGrid {
    /// Create a new grid with all cells dead
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_topology(width, height, Topology::default())
    }

    pub fn with_topology(width: usize, height: usize, topology: Topology) -> Self {
        Self {
            width,
            height,
            topology,
            cells: vec![0; width * height],
        }
    }

    /// Rebuild a grid from kernel output. Non-zero words become 1.
    pub fn from_words(width: usize, height: usize, topology: Topology, mut words: Vec<u32>) -> Self {
        words.resize(width * height, 0);
        words.iter_mut().for_each(|w| *w = u32::from(*w != 0));
        Self { width, height, topology, cells: words }
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn topology(&self) -> Topology {
        self.topology
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    /// Raw cell words for upload
    pub fn words(&self) -> &[u32] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at position, `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| Cell::from_word(self.cells[self.index(x, y)]))
    }

    /// Signed lookup used by painting, where strokes may leave the grid
    pub fn get_signed(&self, x: i64, y: i64) -> Option<Cell> {
        self.in_bounds(x, y).then(|| Cell::from_word(self.cells[self.index(x as usize, y as usize)]))
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(Cell::is_alive)
    }

    /// Set a cell; writes outside the grid are ignored
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell.as_word();
        }
    }

    /// Signed variant of [`LifeGrid::set`]. Returns whether a cell was written.
    pub fn set_signed(&mut self, x: i64, y: i64, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.set(x as usize, y as usize, cell);
        true
    }

    /// Flip one cell, returning its new state
    pub fn toggle(&mut self, x: usize, y: usize) -> Option<Cell> {
        let next = self.get(x, y)?.toggle();
        self.set(x, y, next);
        Some(next)
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|w| *w = 0);
    }

    /// Fill each cell alive with probability `density`
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        self.cells
            .iter_mut()
            .for_each(|w| *w = u32::from(rng.random_bool(density)));
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&w| w != 0).count()
    }

    /// Count the 8 Moore neighbors of (x, y) under the grid's topology
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let w = self.width as i64;
        let h = self.height as i64;

        (-1i64..=1)
            .flat_map(|dy| (-1i64..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(|(dx, dy)| {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                match self.topology {
                    Topology::Toroidal => self.get_signed(nx.rem_euclid(w), ny.rem_euclid(h)),
                    Topology::Bounded => self.get_signed(nx, ny),
                }
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    fn next_word(&self, rule: &LifeRule, x: usize, y: usize) -> u32 {
        let current = Cell::from_word(self.cells[self.index(x, y)]);
        rule.next_state(current, self.count_live_neighbors(x, y)).as_word()
    }

    /// Serial reference step
    pub fn step(&self, rule: &LifeRule) -> Self {
        let cells: Vec<u32> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| self.next_word(rule, x, y))
            .collect();

        self.with_cells(cells)
    }

    /// Row-parallel step using rayon
    pub fn step_parallel(&self, rule: &LifeRule) -> Self {
        let mut cells = vec![0u32; self.cells.len()];
        if self.width > 0 {
            cells
                .par_chunks_mut(self.width)
                .enumerate()
                .for_each(|(y, row)| {
                    row.iter_mut()
                        .enumerate()
                        .for_each(|(x, word)| *word = self.next_word(rule, x, y));
                });
        }

        self.with_cells(cells)
    }

    /// Same shape and topology, new cell words
    fn with_cells(&self, cells: Vec<u32>) -> Self {
        Self {
            width: self.width,
            height: self.height,
            topology: self.topology,
            cells,
        }
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &w)| (i % self.width.max(1), i / self.width.max(1), Cell::from_word(w)))
    }
}

impl fmt::Debug for LifeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LifeGrid {}x{} ({:?})", self.width, self.height, self.topology)?;
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|&w| if w != 0 { 'O' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid_with(width: usize, height: usize, alive: &[(usize, usize)]) -> LifeGrid {
        let mut grid = LifeGrid::new(width, height);
        for &(x, y) in alive {
            grid.set(x, y, Cell::Alive);
        }
        grid
    }

    #[test]
    fn test_bounds() {
        let mut grid = LifeGrid::new(4, 3);
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 3), None);
        grid.set(10, 10, Cell::Alive);
        assert_eq!(grid.population(), 0);
        assert!(!grid.set_signed(-1, 0, Cell::Alive));
        assert_eq!(grid.get_signed(-1, 0), None);
    }

    #[test]
    fn test_toggle() {
        let mut grid = LifeGrid::new(3, 3);
        assert_eq!(grid.toggle(1, 1), Some(Cell::Alive));
        assert_eq!(grid.toggle(1, 1), Some(Cell::Dead));
        assert_eq!(grid.toggle(5, 5), None);
    }

    #[test]
    fn test_count_neighbors_wraps_on_torus() {
        let grid = grid_with(5, 5, &[(4, 4), (0, 4), (4, 0)]);
        assert_eq!(grid.count_live_neighbors(0, 0), 3);

        let mut bounded = grid.clone();
        bounded.set_topology(Topology::Bounded);
        assert_eq!(bounded.count_live_neighbors(0, 0), 0);
    }

    #[test]
    fn test_blinker_oscillates() {
        let rule = LifeRule::conway();
        let horizontal = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let vertical = horizontal.step(&rule);

        assert_eq!(vertical, grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]));
        assert_eq!(vertical.step(&rule), horizontal);
    }

    #[test]
    fn test_block_still_life() {
        let rule = LifeRule::conway();
        let block = grid_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(block.step(&rule), block);
    }

    #[test]
    fn test_glider_crosses_torus_edge() {
        let rule = LifeRule::conway();
        let mut grid = grid_with(6, 6, &[(4, 3), (5, 4), (3, 5), (4, 5), (5, 5)]);
        for _ in 0..4 {
            grid = grid.step(&rule);
        }
        // a glider moves one cell down-right every four generations
        assert_eq!(grid, grid_with(6, 6, &[(5, 4), (0, 5), (4, 0), (5, 0), (0, 0)]));
    }

    #[test]
    fn test_bounded_edge_kills_blinker_arm() {
        let rule = LifeRule::conway();
        let mut grid = LifeGrid::with_topology(3, 3, Topology::Bounded);
        for x in 0..3 {
            grid.set(x, 0, Cell::Alive);
        }
        let next = grid.step(&rule);
        assert_eq!(next.population(), 2);
        assert!(next.is_alive(1, 0));
        assert!(next.is_alive(1, 1));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut rng = StdRng::seed_from_u64(7);
        for rule in LifeRule::presets() {
            let mut grid = LifeGrid::new(37, 23);
            grid.randomize(&mut rng, 0.35);
            assert_eq!(grid.step_parallel(&rule), grid.step(&rule), "{}", rule.name());
        }
    }

    #[test]
    fn test_from_words_normalizes_and_pads() {
        let grid = LifeGrid::from_words(2, 2, Topology::Bounded, vec![0, 5, 1]);
        assert_eq!(grid.words(), &[0, 1, 1, 0]);
        assert_eq!(grid.topology(), Topology::Bounded);
    }

    #[test]
    fn test_randomize_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = LifeGrid::new(8, 8);
        grid.randomize(&mut rng, 1.0);
        assert_eq!(grid.population(), 64);
        grid.randomize(&mut rng, 0.0);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_iter_cells_positions() {
        let grid = grid_with(3, 2, &[(2, 1)]);
        let alive: Vec<_> = grid.iter_cells().filter(|(_, _, c)| c.is_alive()).collect();
        assert_eq!(alive, vec![(2, 1, Cell::Alive)]);
    }
}
