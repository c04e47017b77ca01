//! Integer line rasterization for drag painting.
//!
//! Mouse samples arrive once per frame, so a fast drag jumps several
//! cells between samples. Painting every cell on the segment between
//! the previous and current sample keeps strokes connected.

/// Cells on the segment from `from` to `to`, both endpoints included,
/// in order. Consecutive cells are 8-adjacent and the result has
/// `max(|dx|, |dy|) + 1` entries.
pub fn line_cells(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut cells = Vec::with_capacity(dx.max(-dy) as usize + 1);
    loop {
        cells.push((x, y));
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_connected(cells: &[(i64, i64)]) {
        for pair in cells.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let step = ((a.0 - b.0).abs(), (a.1 - b.1).abs());
            assert!(step.0 <= 1 && step.1 <= 1 && step != (0, 0), "{a:?} -> {b:?}");
        }
    }

    #[test]
    fn test_single_point() {
        assert_eq!(line_cells((3, -2), (3, -2)), vec![(3, -2)]);
    }

    #[test]
    fn test_horizontal_and_vertical() {
        assert_eq!(line_cells((0, 0), (3, 0)), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(line_cells((1, 2), (1, -1)), vec![(1, 2), (1, 1), (1, 0), (1, -1)]);
    }

    #[test]
    fn test_diagonal() {
        assert_eq!(line_cells((0, 0), (3, 3)), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_shallow_slope() {
        assert_eq!(
            line_cells((0, 0), (5, 2)),
            vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]
        );
    }

    #[test]
    fn test_every_octant_is_connected_and_complete() {
        let targets = [(7, 3), (3, 7), (-3, 7), (-7, 3), (-7, -3), (-3, -7), (3, -7), (7, -3)];
        for to in targets {
            let cells = line_cells((0, 0), to);
            assert_eq!(cells.first(), Some(&(0, 0)));
            assert_eq!(cells.last(), Some(&to));
            assert_eq!(cells.len() as i64, to.0.abs().max(to.1.abs()) + 1);
            assert_connected(&cells);
        }
    }

    #[test]
    fn test_reverse_covers_same_length() {
        let forward = line_cells((2, 9), (14, 1));
        let backward = line_cells((14, 1), (2, 9));
        assert_eq!(forward.len(), backward.len());
        assert_connected(&backward);
    }
}
