use serde::{Deserialize, Serialize};

use crate::{
    array::Array2D,
    dims::Position,
    error::MazeError,
    grid::cell::{Cell, CellWall},
};

/// Value of a passable cell in the binary representation.
pub const PASSABLE: u8 = 0;
/// Value of a blocked cell in the binary representation.
pub const BLOCKED: u8 = 1;

/// Rectangular maze.
///
/// Wall data is optional: grids built with [`MazeGrid::from_binary`] only carry the degraded
/// passable/blocked matrix and are solved in binary mode. Decoding goes through the same checks
/// as the constructors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawMazeGrid")]
pub struct MazeGrid {
    pub(crate) cells: Option<Array2D<Cell>>,
    pub(crate) binary: Array2D<u8>,
    pub(crate) start: Position,
}

#[derive(Deserialize)]
struct RawMazeGrid {
    cells: Option<Array2D<Cell>>,
    binary: Array2D<u8>,
    start: Position,
}

impl TryFrom<RawMazeGrid> for MazeGrid {
    type Error = MazeError;

    fn try_from(raw: RawMazeGrid) -> Result<Self, Self::Error> {
        let grid = MazeGrid {
            cells: raw.cells,
            binary: raw.binary,
            start: raw.start,
        };
        grid.validate()?;
        Ok(grid)
    }
}

impl MazeGrid {
    /// Fully walled grid, every cell closed and unvisited.
    pub(crate) fn walled(rows: usize, cols: usize) -> Self {
        MazeGrid {
            cells: Some(Array2D::new(Cell::new(), rows, cols)),
            binary: Array2D::new(BLOCKED, rows, cols),
            start: Position::ZERO,
        }
    }

    /// Builds a wall-based grid from externally supplied cells.
    ///
    /// Rejects ragged or empty input, out of bounds `start` and walls that are open on one side
    /// only. Every cell is considered passable in the derived binary form.
    pub fn from_cells(rows: Vec<Vec<Cell>>, start: Position) -> Result<Self, MazeError> {
        let cells = Self::rectangular(rows)?;
        let binary = Array2D::new(PASSABLE, cells.rows(), cells.cols());
        let grid = MazeGrid {
            cells: Some(cells),
            binary,
            start,
        };
        grid.validate()?;

        Ok(grid)
    }

    /// Builds a degraded grid without wall data, `0` is passable and `1` blocked.
    pub fn from_binary(rows: Vec<Vec<u8>>, start: Position) -> Result<Self, MazeError> {
        let grid = MazeGrid {
            cells: None,
            binary: Self::rectangular(rows)?,
            start,
        };
        grid.validate()?;

        Ok(grid)
    }

    /// Checks size, matching layers, binary values, start and wall symmetry.
    fn validate(&self) -> Result<(), MazeError> {
        let binary = (self.binary.rows(), self.binary.cols());
        if binary.0 == 0 || binary.1 == 0 {
            return Err(MazeError::InvalidSize(binary.0, binary.1));
        }

        if let Some(cells) = &self.cells {
            let cells = (cells.rows(), cells.cols());
            if cells != binary {
                return Err(MazeError::LayerSizeMismatch { cells, binary });
            }
        }

        if let Some(pos) = self.binary.iter_pos().find(|&p| self.binary[p] > BLOCKED) {
            return Err(MazeError::InvalidBinaryValue {
                pos,
                value: self.binary[pos],
            });
        }

        if !self.is_in_bounds(self.start) {
            return Err(MazeError::StartOutOfBounds(self.start));
        }

        if let Some((from, to)) = self.check_symmetry() {
            return Err(MazeError::AsymmetricWalls { from, to });
        }

        Ok(())
    }

    fn rectangular<T>(rows: Vec<Vec<T>>) -> Result<Array2D<T>, MazeError> {
        let arr = Array2D::from_rows(rows).map_err(|(row, expected, found)| {
            MazeError::NonRectangular {
                row,
                expected,
                found,
            }
        })?;

        if arr.rows() == 0 || arr.cols() == 0 {
            return Err(MazeError::InvalidSize(arr.rows(), arr.cols()));
        }

        Ok(arr)
    }

    pub fn rows(&self) -> usize {
        self.binary.rows()
    }

    pub fn cols(&self) -> usize {
        self.binary.cols()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Moves the start, failing if the new position is outside of the grid.
    pub fn set_start(&mut self, start: Position) -> Result<(), MazeError> {
        if !self.is_in_bounds(start) {
            return Err(MazeError::StartOutOfBounds(start));
        }
        self.start = start;
        Ok(())
    }

    pub fn has_walls(&self) -> bool {
        self.cells.is_some()
    }

    pub fn cells(&self) -> Option<&Array2D<Cell>> {
        self.cells.as_ref()
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.as_ref().and_then(|cells| cells.get(pos))
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.cells.as_mut().and_then(|cells| cells.get_mut(pos))
    }

    pub fn binary(&self) -> &Array2D<u8> {
        &self.binary
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.binary.get(pos).is_some()
    }

    pub fn is_border(&self, pos: Position) -> bool {
        self.is_in_bounds(pos)
            && (pos.r == 0
                || pos.c == 0
                || pos.r == self.rows() as i32 - 1
                || pos.c == self.cols() as i32 - 1)
    }

    /// Returns the wall of `cell` that faces `cell2`, `None` if they are not 4-adjacent.
    pub fn which_wall_between(cell: Position, cell2: Position) -> Option<CellWall> {
        CellWall::from_offset(cell2 - cell)
    }

    /// In-bounds 4-neighbors of `cell`, in up, down, left, right order.
    pub fn get_neighbors_pos(&self, cell: Position) -> impl Iterator<Item = Position> + '_ {
        CellWall::get_in_order()
            .into_iter()
            .map(move |wall| cell + wall.to_offset())
            .filter(|&pos| self.is_in_bounds(pos))
    }

    /// Clears the wall on both sides, or only on `cell` when the wall faces outside of the maze.
    ///
    /// Does nothing on grids without wall data.
    pub fn remove_wall(&mut self, cell: Position, wall: CellWall) {
        if !self.is_in_bounds(cell) {
            return;
        }

        let neighbor = cell + wall.to_offset();
        let neighbor_in_bounds = self.is_in_bounds(neighbor);
        let Some(cells) = self.cells.as_mut() else {
            return;
        };

        cells[cell].remove_wall(wall);
        if neighbor_in_bounds {
            cells[neighbor].remove_wall(wall.reverse_wall());
        }
    }

    /// Returns the first pair of adjacent cells where one side is open and the other is not.
    pub fn check_symmetry(&self) -> Option<(Position, Position)> {
        first_asymmetry(self.cells.as_ref()?)
    }

    /// Rebuilds the binary representation from the generator's visited flags.
    pub(crate) fn rebuild_binary(&mut self) {
        let Some(cells) = self.cells.as_ref() else {
            return;
        };

        for pos in cells.iter_pos() {
            self.binary[pos] = if cells[pos].visited {
                PASSABLE
            } else {
                BLOCKED
            };
        }
    }

    /// Clears the generator scratch flags.
    pub(crate) fn clear_visited(&mut self) {
        if let Some(cells) = self.cells.as_mut() {
            cells.iter_mut().for_each(|cell| cell.visited = false);
        }
    }
}

/// First pair of adjacent cells in row-major order whose shared wall is set on one side only.
pub fn first_asymmetry(cells: &Array2D<Cell>) -> Option<(Position, Position)> {
    for pos in cells.iter_pos() {
        for wall in [CellWall::Right, CellWall::Bottom] {
            let neighbor = pos + wall.to_offset();
            if let Some(other) = cells.get(neighbor) {
                if cells[pos].get_wall(wall) != other.get_wall(wall.reverse_wall()) {
                    return Some((pos, neighbor));
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_3x3() -> Vec<Vec<Cell>> {
        let mut grid = MazeGrid::walled(3, 3);
        for pos in Position::iter_fill(3, 3) {
            for wall in [CellWall::Right, CellWall::Bottom] {
                if grid.is_in_bounds(pos + wall.to_offset()) {
                    grid.remove_wall(pos, wall);
                }
            }
        }
        grid.cells.unwrap().to_rows()
    }

    #[test]
    fn from_cells_accepts_symmetric() {
        let grid = MazeGrid::from_cells(open_3x3(), Position::new(1, 1)).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert!(grid.has_walls());
        assert!(grid.check_symmetry().is_none());
    }

    #[test]
    fn from_cells_rejects_asymmetric() {
        let mut rows = open_3x3();
        rows[1][1].set_wall(CellWall::Right, true);

        assert_eq!(
            MazeGrid::from_cells(rows, Position::ZERO).unwrap_err(),
            MazeError::AsymmetricWalls {
                from: Position::new(1, 1),
                to: Position::new(1, 2),
            }
        );
    }

    #[test]
    fn invalid_inputs_fail_fast() {
        assert_eq!(
            MazeGrid::from_binary(vec![], Position::ZERO).unwrap_err(),
            MazeError::InvalidSize(0, 0)
        );
        assert_eq!(
            MazeGrid::from_binary(vec![vec![0, 0], vec![0]], Position::ZERO).unwrap_err(),
            MazeError::NonRectangular {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            MazeGrid::from_binary(vec![vec![0, 0]], Position::new(1, 0)).unwrap_err(),
            MazeError::StartOutOfBounds(Position::new(1, 0))
        );
        assert_eq!(
            MazeGrid::from_binary(vec![vec![0, 2]], Position::ZERO).unwrap_err(),
            MazeError::InvalidBinaryValue {
                pos: Position::new(0, 1),
                value: 2
            }
        );
    }

    #[test]
    fn remove_wall_keeps_symmetry() {
        let mut grid = MazeGrid::walled(2, 2);
        grid.remove_wall(Position::ZERO, CellWall::Bottom);
        assert!(grid.cell(Position::ZERO).unwrap().is_open(CellWall::Bottom));
        assert!(grid.cell(Position::new(1, 0)).unwrap().is_open(CellWall::Top));

        // border wall, only one side exists
        grid.remove_wall(Position::ZERO, CellWall::Top);
        assert!(grid.cell(Position::ZERO).unwrap().is_open(CellWall::Top));
        assert!(grid.check_symmetry().is_none());
    }

    #[test]
    fn decoding_validates_like_constructors() {
        let grid = MazeGrid::from_cells(open_3x3(), Position::new(1, 1)).unwrap();
        let decoded: MazeGrid = ron::from_str(&ron::to_string(&grid).unwrap()).unwrap();
        assert_eq!(decoded.cells(), grid.cells());
        assert_eq!(decoded.start(), grid.start());

        // wall matrix larger than the binary one, (0, 0) opens towards a row the searches
        // would not have room for
        let mut cells = Array2D::new(Cell::new(), 2, 2);
        cells[Position::ZERO].remove_wall(CellWall::Bottom);
        cells[Position::new(1, 0)].remove_wall(CellWall::Top);
        let mismatched = MazeGrid {
            cells: Some(cells),
            binary: Array2D::new(PASSABLE, 1, 1),
            start: Position::ZERO,
        };
        let err = ron::from_str::<MazeGrid>(&ron::to_string(&mismatched).unwrap()).unwrap_err();
        assert!(err.to_string().contains("binary matrix"), "{}", err);

        let mut asymmetric = grid.clone();
        if let Some(cell) = asymmetric.cell_mut(Position::new(1, 1)) {
            cell.set_wall(CellWall::Right, true);
        }
        let err = ron::from_str::<MazeGrid>(&ron::to_string(&asymmetric).unwrap()).unwrap_err();
        assert!(err.to_string().contains("not symmetric"), "{}", err);

        let mut outside = grid;
        outside.start = Position::new(5, 5);
        assert!(ron::from_str::<MazeGrid>(&ron::to_string(&outside).unwrap()).is_err());
    }

    #[test]
    fn first_asymmetry_on_raw_cells() {
        let mut cells = Array2D::new(Cell::new(), 2, 2);
        assert_eq!(first_asymmetry(&cells), None);

        cells[Position::new(1, 0)].remove_wall(CellWall::Right);
        assert_eq!(
            first_asymmetry(&cells),
            Some((Position::new(1, 0), Position::new(1, 1)))
        );
    }

    #[test]
    fn border_detection() {
        let grid = MazeGrid::walled(3, 4);
        assert!(grid.is_border(Position::new(0, 2)));
        assert!(grid.is_border(Position::new(2, 1)));
        assert!(grid.is_border(Position::new(1, 3)));
        assert!(!grid.is_border(Position::new(1, 1)));
        assert!(!grid.is_border(Position::new(3, 0)));
    }
}
