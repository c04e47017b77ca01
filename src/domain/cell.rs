/// Cell represents one square of the automaton.
/// On the grid it is stored as a `u32` word (0 or 1) so the whole grid
/// can be handed to a compute shader as-is.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Flip the cell state
    pub const fn toggle(self) -> Self {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }

    pub const fn from_alive(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }

    /// Decode a grid word. Any non-zero word counts as alive.
    pub const fn from_word(word: u32) -> Self {
        Self::from_alive(word != 0)
    }

    /// Encode as the grid word understood by the life kernel
    pub const fn as_word(self) -> u32 {
        match self {
            Cell::Alive => 1,
            Cell::Dead => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(Cell::Alive.toggle(), Cell::Dead);
        assert_eq!(Cell::Dead.toggle(), Cell::Alive);
    }

    #[test]
    fn test_word_encoding() {
        assert_eq!(Cell::Alive.as_word(), 1);
        assert_eq!(Cell::Dead.as_word(), 0);
        assert_eq!(Cell::from_word(0), Cell::Dead);
        assert_eq!(Cell::from_word(1), Cell::Alive);
        assert_eq!(Cell::from_word(7), Cell::Alive);
    }

    #[test]
    fn test_default_is_dead() {
        assert!(!Cell::default().is_alive());
    }
}
