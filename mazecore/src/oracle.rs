//! Movement and exit rules shared by every solver.
//!
//! Wall grids decide by the wall flag of the cell being left, binary grids only look at the
//! value of the cell being entered. Both answer the same two questions through [`Adjacency`],
//! so solvers are written once.

use smallvec::SmallVec;

use crate::{
    array::Array2D,
    dims::Position,
    error::MazeError,
    grid::{maze::first_asymmetry, Cell, CellWall, MazeGrid, BLOCKED, PASSABLE},
};

pub trait Adjacency {
    /// `(rows, cols)` of the underlying grid.
    fn size(&self) -> (usize, usize);

    /// Whether a single 4-connected step from `from` to `to` is allowed.
    ///
    /// Non-adjacent or out of bounds pairs are never allowed.
    fn can_move_between(&self, from: Position, to: Position) -> bool;

    /// Whether `pos` is a border cell with an opening to the outside.
    fn can_exit(&self, pos: Position) -> bool;

    /// Rejects layouts the movement rules cannot answer consistently, checked before every
    /// search. Validated grids have nothing left to check.
    fn check_layout(&self) -> Result<(), MazeError> {
        Ok(())
    }

    fn is_in_bounds(&self, pos: Position) -> bool {
        let (rows, cols) = self.size();
        pos.all_non_negative() && (pos.r as usize) < rows && (pos.c as usize) < cols
    }

    /// Neighbors reachable in one step, in up, down, left, right order.
    fn passable_neighbors(&self, pos: Position) -> SmallVec<[Position; 4]> {
        CellWall::get_in_order()
            .into_iter()
            .map(|wall| pos + wall.to_offset())
            .filter(|&to| self.can_move_between(pos, to))
            .collect()
    }
}

fn outward_walls(pos: Position, rows: usize, cols: usize) -> SmallVec<[CellWall; 4]> {
    let mut walls = SmallVec::new();
    if pos.r == 0 {
        walls.push(CellWall::Top);
    }
    if pos.r == rows as i32 - 1 {
        walls.push(CellWall::Bottom);
    }
    if pos.c == 0 {
        walls.push(CellWall::Left);
    }
    if pos.c == cols as i32 - 1 {
        walls.push(CellWall::Right);
    }
    walls
}

impl Adjacency for Array2D<Cell> {
    fn size(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    fn can_move_between(&self, from: Position, to: Position) -> bool {
        if !self.is_in_bounds(to) {
            return false;
        }

        match (self.get(from), MazeGrid::which_wall_between(from, to)) {
            (Some(cell), Some(wall)) => cell.is_open(wall),
            _ => false,
        }
    }

    fn check_layout(&self) -> Result<(), MazeError> {
        match first_asymmetry(self) {
            Some((from, to)) => Err(MazeError::AsymmetricWalls { from, to }),
            None => Ok(()),
        }
    }

    fn can_exit(&self, pos: Position) -> bool {
        let Some(cell) = self.get(pos) else {
            return false;
        };

        outward_walls(pos, self.rows(), self.cols())
            .into_iter()
            .any(|wall| cell.is_open(wall))
    }
}

impl Adjacency for Array2D<u8> {
    fn size(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    fn can_move_between(&self, from: Position, to: Position) -> bool {
        from.is_adjacent(to) && self.get(to) == Some(&PASSABLE)
    }

    fn check_layout(&self) -> Result<(), MazeError> {
        match self.iter_pos().find(|&pos| self[pos] > BLOCKED) {
            Some(pos) => Err(MazeError::InvalidBinaryValue {
                pos,
                value: self[pos],
            }),
            None => Ok(()),
        }
    }

    fn can_exit(&self, pos: Position) -> bool {
        self.get(pos) == Some(&PASSABLE) && !outward_walls(pos, self.rows(), self.cols()).is_empty()
    }
}

impl Adjacency for MazeGrid {
    fn size(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    fn can_move_between(&self, from: Position, to: Position) -> bool {
        match self.cells() {
            Some(cells) => cells.can_move_between(from, to),
            None => self.binary().can_move_between(from, to),
        }
    }

    fn can_exit(&self, pos: Position) -> bool {
        match self.cells() {
            Some(cells) => cells.can_exit(pos),
            None => self.binary().can_exit(pos),
        }
    }
}

impl MazeGrid {
    /// All cells that satisfy [`Adjacency::can_exit`], in row-major order.
    pub fn exits(&self) -> Vec<Position> {
        Position::iter_fill(self.rows(), self.cols())
            .filter(|&pos| self.can_exit(pos))
            .collect()
    }
}
