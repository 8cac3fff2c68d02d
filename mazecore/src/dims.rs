use std::{
    fmt,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

/// Grid coordinate, `r` is the row (growing downwards) and `c` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub r: i32,
    pub c: i32,
}

/// Row/column delta between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset(pub i32, pub i32);

impl Position {
    pub const ZERO: Position = Position { r: 0, c: 0 };

    pub const fn new(r: i32, c: i32) -> Self {
        Position { r, c }
    }

    pub fn all_non_negative(self) -> bool {
        self.r >= 0 && self.c >= 0
    }

    /// Manhattan distance, two positions are 4-adjacent iff this is 1.
    pub fn abs_diff_sum(self, other: Position) -> i32 {
        (self.r - other.r).abs() + (self.c - other.c).abs()
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.abs_diff_sum(other) == 1
    }

    /// Row-major linear index for a grid `cols` wide.
    pub fn linear_index(&self, cols: usize) -> usize {
        assert!(self.all_non_negative());
        self.r as usize * cols + self.c as usize
    }

    pub fn from_linear_index(idx: usize, cols: usize) -> Self {
        Position::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Iterates all positions of a `rows` × `cols` grid in row-major order.
    pub fn iter_fill(rows: usize, cols: usize) -> impl Iterator<Item = Position> {
        (0..rows as i32).flat_map(move |r| (0..cols as i32).map(move |c| Position::new(r, c)))
    }
}

impl Add<Offset> for Position {
    type Output = Position;

    fn add(self, other: Offset) -> Position {
        Position::new(self.r + other.0, self.c + other.1)
    }
}

impl Sub for Position {
    type Output = Offset;

    fn sub(self, other: Position) -> Offset {
        Offset(self.r - other.r, self.c - other.c)
    }
}

impl From<(i32, i32)> for Position {
    fn from(tuple: (i32, i32)) -> Self {
        Position::new(tuple.0, tuple.1)
    }
}

impl From<Position> for (i32, i32) {
    fn from(val: Position) -> Self {
        (val.r, val.c)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}
