use super::{
    reconstruct_path, take_min, Algorithm, Solution, StepInfo, TraceStep, NO_PARENT, UNREACHABLE,
};
use crate::{dims::Position, oracle::Adjacency};

/// Uniform-cost search, settles cells in order of their distance from the start.
pub(super) fn search<A: Adjacency + ?Sized>(adj: &A, start: Position) -> Option<Solution> {
    let (rows, cols) = adj.size();
    let mut dist = vec![UNREACHABLE; rows * cols];
    let mut parents = vec![NO_PARENT; rows * cols];
    let mut visited = Vec::new();
    let mut trace = Vec::new();

    let si = start.linear_index(cols);
    dist[si] = 0;
    let mut open = vec![si];

    while let Some(ci) = take_min(&mut open, |idx| dist[idx]) {
        let current = Position::from_linear_index(ci, cols);
        let distance = dist[ci];
        visited.push(current);

        let exit = adj.can_exit(current);
        let mut relaxed = 0;
        if !exit {
            for next in adj.passable_neighbors(current) {
                let ni = next.linear_index(cols);
                if distance + 1 >= dist[ni] {
                    continue;
                }

                dist[ni] = distance + 1;
                parents[ni] = ci;
                relaxed += 1;
                if !open.contains(&ni) {
                    open.push(ni);
                }
            }
        }

        log::trace!("dijkstra settled {} at {}, relaxed {}", current, distance, relaxed);
        trace.push(TraceStep::new(
            current,
            trace.len(),
            StepInfo::Dijkstra {
                distance,
                frontier: open.len(),
                relaxed,
            },
        ));

        if exit {
            let path = reconstruct_path(&parents, ci, cols);
            return Some(Solution::found(Algorithm::Dijkstra, path, visited, trace));
        }
    }

    None
}
