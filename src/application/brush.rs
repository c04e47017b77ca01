use crate::domain::{Cell, LifeGrid, line_cells};

/// Click-drag painting on the life grid.
///
/// Pressing a cell picks the paint: the inverse of that cell's state, so
/// a stroke started on a dead cell draws and one started on a live cell
/// erases. Mouse samples arrive once per frame, so every drag paints the
/// whole line from the previous sample to the new one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    paint: Option<Cell>,
    last: Option<(i64, i64)>,
}

impl Brush {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.paint.is_some()
    }

    pub fn paint(&self) -> Option<Cell> {
        self.paint
    }

    /// Start a stroke at `cell`. Presses outside the grid start nothing.
    /// Returns the number of cells painted.
    pub fn begin(&mut self, grid: &mut LifeGrid, cell: (i64, i64)) -> usize {
        let Some(current) = grid.get_signed(cell.0, cell.1) else {
            self.end();
            return 0;
        };

        let paint = current.toggle();
        grid.set_signed(cell.0, cell.1, paint);
        self.paint = Some(paint);
        self.last = Some(cell);
        1
    }

    /// Continue the stroke to `cell`, filling the gap from the last sample.
    /// Cells off the grid are skipped but still count as the last sample.
    pub fn drag(&mut self, grid: &mut LifeGrid, cell: (i64, i64)) -> usize {
        let (Some(paint), Some(last)) = (self.paint, self.last) else {
            return 0;
        };
        if last == cell {
            return 0;
        }

        self.last = Some(cell);
        line_cells(last, cell)
            .into_iter()
            .skip(1)
            .filter(|&(x, y)| grid.set_signed(x, y, paint))
            .count()
    }

    pub fn end(&mut self) {
        self.paint = None;
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_inverts_pressed_cell() {
        let mut grid = LifeGrid::new(5, 5);
        let mut brush = Brush::new();
        assert_eq!(brush.begin(&mut grid, (2, 2)), 1);
        assert_eq!(brush.paint(), Some(Cell::Alive));
        assert!(grid.is_alive(2, 2));

        brush.end();
        brush.begin(&mut grid, (2, 2));
        assert_eq!(brush.paint(), Some(Cell::Dead));
        assert!(!grid.is_alive(2, 2));
    }

    #[test]
    fn test_fast_drag_leaves_no_gaps() {
        let mut grid = LifeGrid::new(12, 12);
        let mut brush = Brush::new();
        brush.begin(&mut grid, (0, 0));
        assert_eq!(brush.drag(&mut grid, (9, 3)), 9);
        assert_eq!(grid.population(), 10);
        for (x, y) in line_cells((0, 0), (9, 3)) {
            assert!(grid.is_alive(x as usize, y as usize), "gap at ({x}, {y})");
        }
    }

    #[test]
    fn test_erasing_stroke() {
        let mut grid = LifeGrid::new(6, 1);
        for x in 0..6 {
            grid.set(x, 0, Cell::Alive);
        }
        let mut brush = Brush::new();
        brush.begin(&mut grid, (0, 0));
        brush.drag(&mut grid, (5, 0));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_drag_clips_outside_grid() {
        let mut grid = LifeGrid::new(4, 4);
        let mut brush = Brush::new();
        brush.begin(&mut grid, (1, 1));
        assert_eq!(brush.drag(&mut grid, (6, 1)), 2);
        // re-entering continues from the off-grid sample
        assert_eq!(brush.drag(&mut grid, (2, 1)), 2);
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn test_press_outside_grid_starts_nothing() {
        let mut grid = LifeGrid::new(4, 4);
        let mut brush = Brush::new();
        assert_eq!(brush.begin(&mut grid, (-1, 2)), 0);
        assert!(!brush.is_active());
        assert_eq!(brush.drag(&mut grid, (1, 1)), 0);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_same_sample_paints_nothing() {
        let mut grid = LifeGrid::new(4, 4);
        let mut brush = Brush::new();
        brush.begin(&mut grid, (1, 1));
        assert_eq!(brush.drag(&mut grid, (1, 1)), 0);
        brush.end();
        assert!(!brush.is_active());
    }
}
