//! Maze model, generator and instrumented exit searches.
//!
//! ```
//! use mazecore::{Algorithm, Difficulty, Generator};
//!
//! let grid = Generator::new(Difficulty::Normal)
//!     .with_seed(7)
//!     .generate(15, 10)
//!     .unwrap();
//! let solution = mazecore::solve(&grid, Algorithm::AStar).unwrap().unwrap();
//! assert!(solution.is_valid_on(&grid, grid.start()));
//! ```

pub mod algorithms;
pub mod array;
pub mod dims;
pub mod error;
pub mod grid;
pub mod oracle;
pub mod solver;

pub use algorithms::{generate, Difficulty, Generator};
pub use dims::Position;
pub use error::MazeError;
pub use grid::{Cell, CellWall, MazeGrid};
pub use oracle::Adjacency;
pub use solver::{
    solve, solve_all, solve_from, Algorithm, ScoreGrids, Solution, StepInfo, TraceStep,
};
