//! Life-like rules in birth/survival notation.
//!
//! A rule is two bitmasks over the neighbor count (0..=8): bit `n` of
//! `birth` means a dead cell with `n` live neighbors is born, bit `n` of
//! `survive` means a live cell with `n` live neighbors stays alive. The
//! masks travel to the life kernel unchanged.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::Cell;

/// Largest neighbor count in a Moore neighborhood
pub const MAX_NEIGHBORS: u8 = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("rule must look like B3/S23, got {0:?}")]
    Malformed(String),

    #[error("neighbor count {0} is out of range 0..=8")]
    CountOutOfRange(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeRule {
    name: &'static str,
    birth: u16,
    survive: u16,
}

impl LifeRule {
    /// Build a rule from the neighbor counts that cause birth and survival
    pub fn from_counts(name: &'static str, birth: &[u8], survive: &[u8]) -> Self {
        let mask = |counts: &[u8]| {
            counts
                .iter()
                .filter(|&&n| n <= MAX_NEIGHBORS)
                .fold(0u16, |acc, &n| acc | (1 << n))
        };
        Self { name, birth: mask(birth), survive: mask(survive) }
    }

    /// Conway's Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::from_counts("Conway", &[3], &[2, 3])
    }

    /// HighLife (B36/S23), known for its replicator
    pub fn highlife() -> Self {
        Self::from_counts("HighLife", &[3, 6], &[2, 3])
    }

    /// Seeds (B2/S): every live cell dies each generation
    pub fn seeds() -> Self {
        Self::from_counts("Seeds", &[2], &[])
    }

    /// Day & Night (B3678/S34678), symmetric under inversion
    pub fn day_and_night() -> Self {
        Self::from_counts("Day&Night", &[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    /// All built-in rules, Conway first
    pub fn presets() -> Vec<LifeRule> {
        vec![Self::conway(), Self::highlife(), Self::seeds(), Self::day_and_night()]
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn birth_mask(&self) -> u32 {
        self.birth as u32
    }

    pub const fn survive_mask(&self) -> u32 {
        self.survive as u32
    }

    /// Next state of a cell given its live neighbor count
    pub const fn next_state(&self, current: Cell, neighbors: u8) -> Cell {
        if neighbors > MAX_NEIGHBORS {
            return Cell::Dead;
        }
        let mask = match current {
            Cell::Alive => self.survive,
            Cell::Dead => self.birth,
        };
        Cell::from_alive(mask & (1 << neighbors) != 0)
    }

    /// Parse `B3/S23` style notation. Case-insensitive, the survival
    /// part may be empty (`B2/S`).
    pub fn parse(notation: &str) -> Result<Self, RuleParseError> {
        let malformed = || RuleParseError::Malformed(notation.to_string());
        let upper = notation.trim().to_ascii_uppercase();
        let (birth, survive) = upper.split_once('/').ok_or_else(malformed)?;
        let birth = birth.strip_prefix('B').ok_or_else(malformed)?;
        let survive = survive.strip_prefix('S').ok_or_else(malformed)?;

        let counts = |digits: &str| -> Result<u16, RuleParseError> {
            digits.chars().try_fold(0u16, |acc, c| {
                let n = c.to_digit(10).ok_or_else(malformed)?;
                if n > MAX_NEIGHBORS as u32 {
                    return Err(RuleParseError::CountOutOfRange(n));
                }
                Ok(acc | (1 << n))
            })
        };

        let birth = counts(birth)?;
        let survive = counts(survive)?;
        let name = Self::presets()
            .into_iter()
            .find(|preset| preset.birth == birth && preset.survive == survive)
            .map_or("Custom", |preset| preset.name);
        Ok(Self { name, birth, survive })
    }

    /// Render as `B…/S…`
    pub fn notation(&self) -> String {
        let digits = |mask: u16| -> String {
            (0..=MAX_NEIGHBORS)
                .filter(|n| mask & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };
        format!("B{}/S{}", digits(self.birth), digits(self.survive))
    }
}

impl Default for LifeRule {
    fn default() -> Self {
        Self::conway()
    }
}

impl FromStr for LifeRule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LifeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_every_neighbor_count() {
        let rule = LifeRule::conway();
        for n in 0..=8 {
            let survives = matches!(n, 2 | 3);
            let born = n == 3;
            assert_eq!(rule.next_state(Cell::Alive, n), Cell::from_alive(survives), "alive, {n}");
            assert_eq!(rule.next_state(Cell::Dead, n), Cell::from_alive(born), "dead, {n}");
        }
    }

    #[test]
    fn test_highlife_reproduction() {
        let rule = LifeRule::highlife();
        assert_eq!(rule.next_state(Cell::Dead, 6), Cell::Alive);
        assert_eq!(rule.next_state(Cell::Dead, 3), Cell::Alive);
        assert_eq!(rule.next_state(Cell::Alive, 6), Cell::Dead);
    }

    #[test]
    fn test_seeds_always_dies() {
        let rule = LifeRule::seeds();
        for n in 0..=8 {
            assert_eq!(rule.next_state(Cell::Alive, n), Cell::Dead);
        }
        assert_eq!(rule.next_state(Cell::Dead, 2), Cell::Alive);
        assert_eq!(rule.next_state(Cell::Dead, 3), Cell::Dead);
    }

    #[test]
    fn test_neighbor_count_above_eight_is_dead() {
        assert_eq!(LifeRule::day_and_night().next_state(Cell::Alive, 9), Cell::Dead);
    }

    #[test]
    fn test_parse_known_rule_keeps_name() {
        let rule: LifeRule = "b36/s23".parse().unwrap();
        assert_eq!(rule, LifeRule::highlife());
        assert_eq!(rule.name(), "HighLife");
    }

    #[test]
    fn test_parse_custom_and_empty_survival() {
        let rule = LifeRule::parse("B1/S").unwrap();
        assert_eq!(rule.name(), "Custom");
        assert_eq!(rule.survive_mask(), 0);
        assert_eq!(rule.birth_mask(), 0b10);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(LifeRule::parse("23/3"), Err(RuleParseError::Malformed(_))));
        assert!(matches!(LifeRule::parse("B3S23"), Err(RuleParseError::Malformed(_))));
        assert!(matches!(LifeRule::parse("B3x/S23"), Err(RuleParseError::Malformed(_))));
        assert_eq!(LifeRule::parse("B9/S23"), Err(RuleParseError::CountOutOfRange(9)));
    }

    #[test]
    fn test_notation_round_trips_presets() {
        for rule in LifeRule::presets() {
            assert_eq!(LifeRule::parse(&rule.notation()).unwrap(), rule);
        }
        assert_eq!(LifeRule::day_and_night().notation(), "B3678/S34678");
    }
}
