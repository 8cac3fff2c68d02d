use super::{reconstruct_path, Algorithm, Solution, StepInfo, TraceStep, NO_PARENT};
use crate::{dims::Position, grid::CellWall, oracle::Adjacency};

struct Frame {
    idx: usize,
    // next direction of `CellWall::get_in_order` to try
    dir: usize,
}

struct Dfs<'a, A: ?Sized> {
    adj: &'a A,
    cols: usize,
    seen: Vec<bool>,
    parents: Vec<usize>,
    stack: Vec<Frame>,
    visited: Vec<Position>,
    trace: Vec<TraceStep>,
}

impl<A: Adjacency + ?Sized> Dfs<'_, A> {
    /// Enters `idx` and records it, returns `true` when it is an exit.
    fn visit(&mut self, idx: usize, parent: usize) -> bool {
        let pos = Position::from_linear_index(idx, self.cols);
        self.seen[idx] = true;
        self.parents[idx] = parent;
        self.stack.push(Frame { idx, dir: 0 });

        let dead_end = self
            .adj
            .passable_neighbors(pos)
            .iter()
            .all(|next| self.seen[next.linear_index(self.cols)]);
        let backtracking = self.visited.last().is_some_and(|prev| !prev.is_adjacent(pos));

        self.visited.push(pos);
        self.trace.push(TraceStep::new(
            pos,
            self.trace.len(),
            StepInfo::Dfs {
                stack_depth: self.stack.len(),
                dead_end,
                backtracking,
            },
        ));
        log::trace!(
            "dfs entered {} at depth {}{}",
            pos,
            self.stack.len(),
            if backtracking { " after backtracking" } else { "" }
        );

        self.adj.can_exit(pos)
    }

    /// Next unseen neighbor of the frame on top of the stack, advancing its direction cursor.
    fn next_unseen(&mut self) -> Option<usize> {
        let directions = CellWall::get_in_order();
        let frame = self.stack.last_mut()?;
        let current = Position::from_linear_index(frame.idx, self.cols);

        while let Some(wall) = directions.get(frame.dir) {
            frame.dir += 1;
            let next = current + wall.to_offset();
            if self.adj.can_move_between(current, next) && !self.seen[next.linear_index(self.cols)]
            {
                return Some(next.linear_index(self.cols));
            }
        }

        None
    }
}

/// Depth-first search, descends into the first open neighbor before trying its siblings.
///
/// The returned path is whatever the descent found first, not necessarily the shortest.
pub(super) fn search<A: Adjacency + ?Sized>(adj: &A, start: Position) -> Option<Solution> {
    let (rows, cols) = adj.size();
    let mut dfs = Dfs {
        adj,
        cols,
        seen: vec![false; rows * cols],
        parents: vec![NO_PARENT; rows * cols],
        stack: Vec::new(),
        visited: Vec::new(),
        trace: Vec::new(),
    };

    let mut exit = dfs.visit(start.linear_index(cols), NO_PARENT).then_some(start);

    while exit.is_none() {
        let Some(top) = dfs.stack.last().map(|frame| frame.idx) else {
            break;
        };

        match dfs.next_unseen() {
            Some(next) => {
                if dfs.visit(next, top) {
                    exit = Some(Position::from_linear_index(next, cols));
                }
            }
            None => {
                dfs.stack.pop();
            }
        }
    }

    let exit = exit?;
    let path = reconstruct_path(&dfs.parents, exit.linear_index(cols), cols);
    Some(Solution::found(Algorithm::Dfs, path, dfs.visited, dfs.trace))
}
