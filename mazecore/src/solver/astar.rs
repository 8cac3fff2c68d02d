use super::{
    reconstruct_path, take_min, Algorithm, ScoreGrids, Solution, StepInfo, TraceStep, NO_PARENT,
    UNREACHABLE,
};
use crate::{array::Array2D, dims::Position, oracle::Adjacency};

/// Steps to the nearest border, a lower bound of the steps to any exit.
pub(crate) fn border_distance(pos: Position, rows: usize, cols: usize) -> u32 {
    let (rows, cols) = (rows as i32, cols as i32);
    pos.r.min(pos.c).min(rows - 1 - pos.r).min(cols - 1 - pos.c).max(0) as u32
}

fn snapshot(g: &[u32], rows: usize, cols: usize) -> ScoreGrids {
    let mut gs = Array2D::new(f64::INFINITY, rows, cols);
    let mut hs = Array2D::new(f64::INFINITY, rows, cols);
    let mut fs = Array2D::new(f64::INFINITY, rows, cols);

    for pos in Position::iter_fill(rows, cols) {
        let h = border_distance(pos, rows, cols) as f64;
        hs[pos] = h;

        let g = g[pos.linear_index(cols)];
        if g != UNREACHABLE {
            gs[pos] = g as f64;
            fs[pos] = g as f64 + h;
        }
    }

    ScoreGrids {
        g: gs,
        h: hs,
        f: fs,
    }
}

/// A* towards the nearest exit.
///
/// The open list is scanned linearly for the lowest f, so equal scores are taken in the order
/// they were admitted and the exploration order is reproducible.
pub(super) fn search<A: Adjacency + ?Sized>(adj: &A, start: Position) -> Option<Solution> {
    let (rows, cols) = adj.size();
    let h = |idx: usize| border_distance(Position::from_linear_index(idx, cols), rows, cols);

    let mut g = vec![UNREACHABLE; rows * cols];
    let mut parents = vec![NO_PARENT; rows * cols];
    let mut visited = Vec::new();
    let mut trace = Vec::new();

    let si = start.linear_index(cols);
    g[si] = 0;
    let mut open = vec![si];

    while let Some(ci) = take_min(&mut open, |idx| g[idx].saturating_add(h(idx))) {
        let current = Position::from_linear_index(ci, cols);
        let (gc, hc) = (g[ci], h(ci));
        visited.push(current);

        if !adj.can_exit(current) {
            for next in adj.passable_neighbors(current) {
                let ni = next.linear_index(cols);
                let tentative = gc + 1;
                if tentative >= g[ni] {
                    continue;
                }

                g[ni] = tentative;
                parents[ni] = ci;
                if !open.contains(&ni) {
                    open.push(ni);
                }
            }
        }

        log::trace!("astar expanded {} g={} h={} open={}", current, gc, hc, open.len());
        trace.push(TraceStep::new(
            current,
            trace.len(),
            StepInfo::AStar {
                g: gc,
                h: hc,
                f: gc + hc,
                open_set: open.len(),
            },
        ));

        if adj.can_exit(current) {
            let path = reconstruct_path(&parents, ci, cols);
            let mut solution = Solution::found(Algorithm::AStar, path, visited, trace);
            solution.scores = Some(snapshot(&g, rows, cols));
            return Some(solution);
        }
    }

    None
}
