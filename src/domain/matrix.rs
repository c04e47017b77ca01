/// Row-major 2D array of values produced by a kernel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T> {
    width: usize,
    height: usize,
    values: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Matrix with every entry set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            values: vec![value; width * height],
        }
    }
}

impl<T> Matrix<T> {
    /// Wrap row-major values. Returns `None` when the length does not
    /// match `width * height`.
    pub fn from_vec(width: usize, height: usize, values: Vec<T>) -> Option<Self> {
        (values.len() == width * height).then_some(Self { width, height, values })
    }

    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            values: Vec::new(),
        }
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        (x < self.width && y < self.height).then(|| &self.values[y * self.width + x])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.values.chunks(self.width.max(1))
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Apply `f` to every entry
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Matrix<U> {
        Matrix {
            width: self.width,
            height: self.height,
            values: self.values.into_iter().map(f).collect(),
        }
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_and_get() {
        let m = Matrix::filled(3, 2, 7u32);
        assert_eq!(m.dimensions(), (3, 2));
        assert_eq!(m.get(2, 1), Some(&7));
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Matrix::from_vec(2, 2, vec![1, 2, 3]).is_none());
        let m = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let rows: Vec<&[i32]> = m.rows().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..]]);
    }

    #[test]
    fn test_empty_has_no_rows() {
        let m: Matrix<u8> = Matrix::empty();
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
    }

    #[test]
    fn test_map() {
        let m = Matrix::from_vec(2, 1, vec![1u32, 2]).unwrap().map(|v| v * 10);
        assert_eq!(m.values(), &[10, 20]);
    }
}
