use rand::Rng;

/// Exclusive upper bound of a random channel, matching `floor(random * 255)`
pub const CHANNEL_RANGE: u8 = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// One random color, each channel in `0..CHANNEL_RANGE`
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(
            rng.random_range(0..CHANNEL_RANGE),
            rng.random_range(0..CHANNEL_RANGE),
            rng.random_range(0..CHANNEL_RANGE),
        )
    }

    /// Repeat the random draw `loop_count` times and keep the last one.
    /// The repetition is the benchmark workload; zero draws leave black.
    pub fn random_repeated<R: Rng>(rng: &mut R, loop_count: u32) -> Self {
        (0..loop_count).fold(Self::BLACK, |_, _| Self::random(rng))
    }

    /// `0x00RRGGBB`, the layout written by the color kernel
    pub const fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn unpack(word: u32) -> Self {
        Self::new((word >> 16) as u8, (word >> 8) as u8, word as u8)
    }

    /// CSS-style `rgb(r, g, b)` label
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pack_layout() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).pack(), 0x0012_3456);
        assert_eq!(Rgb::unpack(0xff12_3456), Rgb::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_random_channels_below_255() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..2_000 {
            let c = Rgb::random(&mut rng);
            assert!(c.r < CHANNEL_RANGE && c.g < CHANNEL_RANGE && c.b < CHANNEL_RANGE);
        }
    }

    #[test]
    fn test_zero_loops_is_black() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(Rgb::random_repeated(&mut rng, 0), Rgb::BLACK);
    }

    #[test]
    fn test_repeated_keeps_last_draw() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        let repeated = Rgb::random_repeated(&mut a, 3);
        let last = (0..3).map(|_| Rgb::random(&mut b)).last().unwrap();
        assert_eq!(repeated, last);
    }

    #[test]
    fn test_css() {
        assert_eq!(Rgb::new(1, 2, 3).css(), "rgb(1, 2, 3)");
    }
}
