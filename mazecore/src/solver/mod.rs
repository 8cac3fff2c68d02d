//! Exit-finding searches.
//!
//! Every algorithm starts from a single cell, stops the moment the cell it settles satisfies
//! [`Adjacency::can_exit`], and records one [`TraceStep`] per settled cell. The trace and
//! [`Solution::visited`] are therefore always the same length and in the same order.
//!
//! | Algorithm | Shortest path | Frontier |
//! |---|---|---|
//! | [`Algorithm::Bfs`] | yes | FIFO queue |
//! | [`Algorithm::Dfs`] | no | explicit stack |
//! | [`Algorithm::AStar`] | yes | linear open list, lowest f first |
//! | [`Algorithm::Dijkstra`] | yes | linear open list, lowest distance first |

mod astar;
mod bfs;
mod dfs;
mod dijkstra;

use std::{fmt, str::FromStr};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{array::Array2D, dims::Position, error::MazeError, grid::MazeGrid, oracle::Adjacency};

/// Marks a cell without predecessor in the flat parent arrays.
pub(crate) const NO_PARENT: usize = usize::MAX;
/// Distance of a cell the search has not reached.
pub(crate) const UNREACHABLE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bfs,
    Dfs,
    AStar,
    Dijkstra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::AStar,
        Algorithm::Dijkstra,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "astar",
            Algorithm::Dijkstra => "dijkstra",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.tag() == s || (s == "a*" && *alg == Algorithm::AStar))
            .ok_or_else(|| format!("unknown algorithm '{}'", s))
    }
}

/// Algorithm specific telemetry of one settled cell.
///
/// Sizes are taken after the cell's neighbors were admitted. The exit cell is never expanded,
/// so its admission counts are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepInfo {
    Bfs {
        queue_size: usize,
        level: u32,
        enqueued: usize,
    },
    Dfs {
        stack_depth: usize,
        dead_end: bool,
        backtracking: bool,
    },
    AStar {
        g: u32,
        h: u32,
        f: u32,
        open_set: usize,
    },
    Dijkstra {
        distance: u32,
        frontier: usize,
        relaxed: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub pos: Position,
    pub step: usize,
    pub info: StepInfo,
}

impl TraceStep {
    pub fn new(pos: Position, step: usize, info: StepInfo) -> Self {
        Self { pos, step, info }
    }
}

/// A* score matrices at the moment the search stopped, `+inf` where g is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreGrids {
    pub g: Array2D<f64>,
    pub h: Array2D<f64>,
    pub f: Array2D<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Number of steps along `path`.
    pub distance: usize,
    /// From the start to the exit cell, both included.
    pub path: Vec<Position>,
    /// Settled cells in exploration order.
    pub visited: Vec<Position>,
    pub algorithm: Algorithm,
    pub trace: Vec<TraceStep>,
    /// Only filled by A*.
    pub scores: Option<ScoreGrids>,
}

impl Solution {
    pub(crate) fn found(
        algorithm: Algorithm,
        path: Vec<Position>,
        visited: Vec<Position>,
        trace: Vec<TraceStep>,
    ) -> Self {
        let distance = path.len().saturating_sub(1);
        log::debug!(
            "{} reached exit {:?} in {} steps, settled {} cells",
            algorithm,
            path.last(),
            distance,
            visited.len()
        );

        Self {
            distance,
            path,
            visited,
            algorithm,
            trace,
            scores: None,
        }
    }

    pub fn exit(&self) -> Option<Position> {
        self.path.last().copied()
    }

    /// Checks that the path starts at `start`, moves only through allowed steps and ends on an
    /// exit.
    pub fn is_valid_on<A: Adjacency + ?Sized>(&self, adj: &A, start: Position) -> bool {
        self.path.first() == Some(&start)
            && self.distance + 1 == self.path.len()
            && self
                .path
                .windows(2)
                .all(|pair| adj.can_move_between(pair[0], pair[1]))
            && self.path.last().is_some_and(|&pos| adj.can_exit(pos))
    }
}

/// Walks the parent links back from `end` and returns the path in start to end order.
pub(crate) fn reconstruct_path(parents: &[usize], end: usize, cols: usize) -> Vec<Position> {
    let mut path = Vec::new();
    let mut ci = end;
    while ci != NO_PARENT {
        path.push(Position::from_linear_index(ci, cols));
        ci = parents[ci];
    }
    path.reverse();
    path
}

/// Removes and returns the open list entry with the lowest key, the earliest one on ties.
pub(crate) fn take_min(open: &mut Vec<usize>, key: impl Fn(usize) -> u32) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (slot, &idx) in open.iter().enumerate() {
        let k = key(idx);
        if best.map_or(true, |(_, best_k)| k < best_k) {
            best = Some((slot, k));
        }
    }

    best.map(|(slot, _)| open.remove(slot))
}

/// Searches from the grid's own start.
///
/// `Ok(None)` means no exit is reachable.
pub fn solve(grid: &MazeGrid, algorithm: Algorithm) -> Result<Option<Solution>, MazeError> {
    solve_from(grid, grid.start(), algorithm)
}

/// Searches any [`Adjacency`] from an explicit start.
pub fn solve_from<A: Adjacency + ?Sized>(
    adj: &A,
    start: Position,
    algorithm: Algorithm,
) -> Result<Option<Solution>, MazeError> {
    let (rows, cols) = adj.size();
    if rows == 0 || cols == 0 {
        return Err(MazeError::InvalidSize(rows, cols));
    }
    if !adj.is_in_bounds(start) {
        return Err(MazeError::StartOutOfBounds(start));
    }
    adj.check_layout()?;

    let solution = match algorithm {
        Algorithm::Bfs => bfs::search(adj, start),
        Algorithm::Dfs => dfs::search(adj, start),
        Algorithm::AStar => astar::search(adj, start),
        Algorithm::Dijkstra => dijkstra::search(adj, start),
    };

    if solution.is_none() {
        log::debug!("{} exhausted the maze from {} without finding an exit", algorithm, start);
    }

    Ok(solution)
}

/// Runs every algorithm on the same grid in parallel, results are in [`Algorithm::ALL`] order.
pub fn solve_all(grid: &MazeGrid) -> Result<Vec<(Algorithm, Option<Solution>)>, MazeError> {
    Algorithm::ALL
        .as_slice()
        .par_iter()
        .map(|&algorithm| solve(grid, algorithm).map(|solution| (algorithm, solution)))
        .collect()
}
