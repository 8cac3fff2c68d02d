use std::ops;

use serde::{Deserialize, Serialize};

use crate::dims::Position;

/// Flat row-major matrix addressed by [`Position`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawArray2D<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

#[derive(Deserialize)]
struct RawArray2D<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> TryFrom<RawArray2D<T>> for Array2D<T> {
    type Error = String;

    fn try_from(raw: RawArray2D<T>) -> Result<Self, Self::Error> {
        if raw.rows.checked_mul(raw.cols) != Some(raw.buf.len()) {
            return Err(format!(
                "{}x{} matrix holds {} items",
                raw.rows,
                raw.cols,
                raw.buf.len()
            ));
        }

        Ok(Self {
            buf: raw.buf,
            rows: raw.rows,
            cols: raw.cols,
        })
    }
}

impl<T> Array2D<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn dim_to_idx(&self, pos: Position) -> Option<usize> {
        if pos.r < 0 || pos.c < 0 {
            return None;
        }

        let (r, c) = (pos.r as usize, pos.c as usize);
        if r >= self.rows || c >= self.cols {
            return None;
        }

        Some(r * self.cols + c)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Position> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Position::from_linear_index(idx, self.cols))
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.buf.iter_mut()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Array2D<U> {
        Array2D {
            buf: self.buf.into_iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    /// Builds an array from a `Vec` of rows.
    ///
    /// Returns the index of the first row whose length differs from the first one on failure.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, (usize, usize, usize)> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut buf = Vec::with_capacity(row_count * cols);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err((i, cols, row.len()));
            }
            buf.extend(row);
        }

        Ok(Self {
            buf,
            rows: row_count,
            cols,
        })
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, rows: usize, cols: usize) -> Self {
        Self {
            buf: vec![item; rows * cols],
            rows,
            cols,
        }
    }

    pub fn fill(&mut self, value: T) {
        self.buf.fill(value);
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![];
        }

        self.buf.chunks(self.cols).map(<[T]>::to_vec).collect()
    }
}

impl<T> ops::Index<Position> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Position) -> &Self::Output {
        self.get(index).expect("Index out of bounds")
    }
}

impl<T> ops::IndexMut<Position> for Array2D<T> {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        self.get_mut(index).expect("Index out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged() {
        assert_eq!(
            Array2D::from_rows(vec![vec![0, 0], vec![0]]).unwrap_err(),
            (1, 2, 1)
        );

        let arr = Array2D::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(arr.rows(), 2);
        assert_eq!(arr.cols(), 3);
        assert_eq!(arr[Position::new(1, 0)], 4);
        assert_eq!(arr.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn decoding_checks_buffer_length() {
        let arr: Array2D<u8> = ron::from_str("(buf: [1, 2, 3, 4], rows: 2, cols: 2)").unwrap();
        assert_eq!(arr[Position::new(1, 1)], 4);

        assert!(ron::from_str::<Array2D<u8>>("(buf: [1, 2, 3], rows: 2, cols: 2)").is_err());
        assert!(ron::from_str::<Array2D<u8>>("(buf: [], rows: 3, cols: 0)").is_ok());
    }

    #[test]
    fn out_of_bounds_get() {
        let arr = Array2D::new(0u8, 2, 2);
        assert!(arr.get(Position::new(-1, 0)).is_none());
        assert!(arr.get(Position::new(0, 2)).is_none());
        assert!(arr.get(Position::new(1, 1)).is_some());
    }
}
