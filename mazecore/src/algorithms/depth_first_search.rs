use rand::Rng;
use smallvec::SmallVec;

use super::Difficulty;

use crate::{dims::Position, grid::MazeGrid};

/// Randomized depth-first carving ("recursive backtracker") on an explicit stack.
#[derive(Debug)]
pub struct DepthFirstSearch;

impl DepthFirstSearch {
    /// Carves passages starting from `seed_cell` until every cell reachable from it is visited.
    ///
    /// Returns the number of visited cells.
    pub fn carve<R: Rng + ?Sized>(
        grid: &mut MazeGrid,
        seed_cell: Position,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> usize {
        let (rows, cols) = (grid.rows(), grid.cols());
        let Some(seed) = grid.cell_mut(seed_cell) else {
            return 0;
        };
        seed.visited = true;

        let mut visited = 1;
        let mut stack = Vec::with_capacity(rows * cols);
        stack.push(seed_cell);

        while let Some(current) = stack.pop() {
            let unvisited_neighbors = grid
                .get_neighbors_pos(current)
                .filter(|&pos| grid.cell(pos).is_some_and(|cell| !cell.visited))
                .collect::<SmallVec<[_; 4]>>();

            let Some(next) = difficulty.pick_neighbor(&unvisited_neighbors, rows, cols, rng) else {
                continue;
            };

            stack.push(current);
            if let Some(wall) = MazeGrid::which_wall_between(current, next) {
                grid.remove_wall(current, wall);
            }
            if let Some(cell) = grid.cell_mut(next) {
                cell.visited = true;
            }
            visited += 1;
            stack.push(next);
        }

        visited
    }
}
