use super::{Cell, LifeGrid};

/// A stampable arrangement of live cells
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    /// Offsets of live cells from the top-left corner
    pub cells: Vec<(usize, usize)>,
}

impl Pattern {
    /// Build from plaintext rows where `O` is alive and anything else dead
    pub fn from_plaintext(name: &'static str, description: &'static str, rows: &[&str]) -> Self {
        let cells: Vec<(usize, usize)> = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .filter(|&(_, c)| c == 'O')
                    .map(move |(x, _)| (x, y))
            })
            .collect();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        Self { name, description, width, height: rows.len(), cells }
    }

    /// Stamp the pattern with its top-left corner at (x, y).
    /// Cells that fall off the grid are dropped.
    pub fn place_at(&self, grid: &mut LifeGrid, x: i64, y: i64) -> usize {
        self.cells
            .iter()
            .filter(|&&(dx, dy)| grid.set_signed(x + dx as i64, y + dy as i64, Cell::Alive))
            .count()
    }

    /// Stamp the pattern centered on a cell
    pub fn place_centered(&self, grid: &mut LifeGrid, cx: i64, cy: i64) -> usize {
        self.place_at(grid, cx - self.width as i64 / 2, cy - self.height as i64 / 2)
    }

    /// Top-left corner used by [`Pattern::place_centered`]
    pub fn origin_for_center(&self, cx: i64, cy: i64) -> (i64, i64) {
        (cx - self.width as i64 / 2, cy - self.height as i64 / 2)
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::Pattern;

    pub fn glider() -> Pattern {
        Pattern::from_plaintext("Glider", "Moves diagonally (period 4)", &[
            ".O.",
            "..O",
            "OOO",
        ])
    }

    pub fn blinker() -> Pattern {
        Pattern::from_plaintext("Blinker", "Oscillator (period 2)", &["OOO"])
    }

    pub fn toad() -> Pattern {
        Pattern::from_plaintext("Toad", "Oscillator (period 2)", &[
            ".OOO",
            "OOO.",
        ])
    }

    pub fn beacon() -> Pattern {
        Pattern::from_plaintext("Beacon", "Oscillator (period 2)", &[
            "OO..",
            "O...",
            "...O",
            "..OO",
        ])
    }

    pub fn pulsar() -> Pattern {
        Pattern::from_plaintext("Pulsar", "Oscillator (period 3)", &[
            "..OOO...OOO..",
            ".............",
            "O....O.O....O",
            "O....O.O....O",
            "O....O.O....O",
            "..OOO...OOO..",
            ".............",
            "..OOO...OOO..",
            "O....O.O....O",
            "O....O.O....O",
            "O....O.O....O",
            ".............",
            "..OOO...OOO..",
        ])
    }

    pub fn lwss() -> Pattern {
        Pattern::from_plaintext("LWSS", "Lightweight spaceship (period 4)", &[
            ".O..O",
            "O....",
            "O...O",
            "OOOO.",
        ])
    }

    pub fn glider_gun() -> Pattern {
        Pattern::from_plaintext("Gosper Gun", "Emits a glider every 30 gens", &[
            "........................O...........",
            "......................O.O...........",
            "............OO......OO............OO",
            "...........O...O....OO............OO",
            "OO........O.....O...OO..............",
            "OO........O...O.OO....O.O...........",
            "..........O.....O.......O...........",
            "...........O...O....................",
            "............OO......................",
        ])
    }

    pub fn r_pentomino() -> Pattern {
        Pattern::from_plaintext("R-pentomino", "Methuselah, settles at gen 1103", &[
            ".OO",
            "OO.",
            ".O.",
        ])
    }

    pub fn acorn() -> Pattern {
        Pattern::from_plaintext("Acorn", "Methuselah, settles at gen 5206", &[
            ".O.....",
            "...O...",
            "OO..OOO",
        ])
    }

    pub fn block() -> Pattern {
        Pattern::from_plaintext("Block", "Still life", &["OO", "OO"])
    }

    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            glider(),
            blinker(),
            toad(),
            beacon(),
            pulsar(),
            lwss(),
            glider_gun(),
            r_pentomino(),
            acorn(),
            block(),
        ]
    }
}
