use std::collections::VecDeque;

use super::{reconstruct_path, Algorithm, Solution, StepInfo, TraceStep, NO_PARENT, UNREACHABLE};
use crate::{dims::Position, oracle::Adjacency};

/// Breadth-first search, the returned distance is the smallest over all reachable exits.
pub(super) fn search<A: Adjacency + ?Sized>(adj: &A, start: Position) -> Option<Solution> {
    let (rows, cols) = adj.size();
    let mut parents = vec![NO_PARENT; rows * cols];
    let mut levels = vec![UNREACHABLE; rows * cols];
    let mut visited = Vec::new();
    let mut trace = Vec::new();

    let mut queue = VecDeque::new();
    let si = start.linear_index(cols);
    levels[si] = 0;
    queue.push_back(si);

    while let Some(ci) = queue.pop_front() {
        let current = Position::from_linear_index(ci, cols);
        let level = levels[ci];
        visited.push(current);

        if adj.can_exit(current) {
            trace.push(TraceStep::new(
                current,
                trace.len(),
                StepInfo::Bfs {
                    queue_size: queue.len(),
                    level,
                    enqueued: 0,
                },
            ));
            let path = reconstruct_path(&parents, ci, cols);
            return Some(Solution::found(Algorithm::Bfs, path, visited, trace));
        }

        let mut enqueued = 0;
        for next in adj.passable_neighbors(current) {
            let ni = next.linear_index(cols);
            if levels[ni] != UNREACHABLE {
                continue;
            }

            levels[ni] = level + 1;
            parents[ni] = ci;
            queue.push_back(ni);
            enqueued += 1;
        }

        log::trace!("bfs settled {} at level {}, queued {}", current, level, enqueued);
        trace.push(TraceStep::new(
            current,
            trace.len(),
            StepInfo::Bfs {
                queue_size: queue.len(),
                level,
                enqueued,
            },
        ));
    }

    None
}
