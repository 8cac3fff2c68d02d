//! Text output of maze and search results.

use mazecore::{Algorithm, MazeGrid, Solution, StepInfo, TraceStep};
use ron::ser::PrettyConfig;

use crate::error::AppError;

pub fn maze_header(grid: &MazeGrid, seed: u64) -> String {
    let exits: Vec<_> = grid.exits().iter().map(ToString::to_string).collect();
    format!(
        "maze {}x{}, seed {}, start {}, exit {}",
        grid.cols(),
        grid.rows(),
        seed,
        grid.start(),
        exits.join(" ")
    )
}

pub fn summary_line(algorithm: Algorithm, solution: Option<&Solution>) -> String {
    match solution {
        Some(solution) => format!(
            "{:<8} distance {:>4}  visited {:>5}  exit {}",
            algorithm.tag(),
            solution.distance,
            solution.visited.len(),
            solution
                .exit()
                .map(|pos| pos.to_string())
                .unwrap_or_default()
        ),
        None => format!("{:<8} no reachable exit", algorithm.tag()),
    }
}

pub fn describe_step(info: &StepInfo) -> String {
    match *info {
        StepInfo::Bfs {
            queue_size,
            level,
            enqueued,
        } => format!("queue {} level {} enqueued {}", queue_size, level, enqueued),
        StepInfo::Dfs {
            stack_depth,
            dead_end,
            backtracking,
        } => {
            let mut line = format!("depth {}", stack_depth);
            if dead_end {
                line.push_str(" dead-end");
            }
            if backtracking {
                line.push_str(" backtracked");
            }
            line
        }
        StepInfo::AStar { g, h, f, open_set } => {
            format!("g {} h {} f {} open {}", g, h, f, open_set)
        }
        StepInfo::Dijkstra {
            distance,
            frontier,
            relaxed,
        } => format!("dist {} frontier {} relaxed {}", distance, frontier, relaxed),
    }
}

pub fn trace_line(step: &TraceStep) -> String {
    format!("{:>5} {:<10} {}", step.step, step.pos.to_string(), describe_step(&step.info))
}

pub fn to_ron(solution: &Solution) -> Result<String, AppError> {
    Ok(ron::ser::to_string_pretty(solution, PrettyConfig::default())?)
}

#[cfg(test)]
mod tests {
    use mazecore::{Position, TraceStep};

    use super::*;

    fn corridor() -> MazeGrid {
        MazeGrid::from_binary(
            vec![vec![1, 1, 1], vec![0, 0, 1], vec![1, 1, 1]],
            Position::new(1, 1),
        )
        .unwrap()
    }

    #[test]
    fn summaries() {
        let grid = corridor();
        let solution = mazecore::solve(&grid, Algorithm::Bfs).unwrap();

        assert_eq!(
            summary_line(Algorithm::Bfs, solution.as_ref()),
            "bfs      distance    1  visited     2  exit (1, 0)"
        );
        assert_eq!(summary_line(Algorithm::Dfs, None), "dfs      no reachable exit");
        assert_eq!(
            maze_header(&grid, 3),
            "maze 3x3, seed 3, start (1, 1), exit (1, 0)"
        );
    }

    #[test]
    fn step_descriptions() {
        let dfs = StepInfo::Dfs {
            stack_depth: 4,
            dead_end: true,
            backtracking: true,
        };
        assert_eq!(describe_step(&dfs), "depth 4 dead-end backtracked");

        let step = TraceStep::new(
            Position::new(2, 3),
            7,
            StepInfo::AStar {
                g: 3,
                h: 1,
                f: 4,
                open_set: 2,
            },
        );
        assert_eq!(trace_line(&step), "    7 (2, 3)     g 3 h 1 f 4 open 2");
    }

    #[test]
    fn ron_output_parses_back() {
        let grid = corridor();
        let solution = mazecore::solve(&grid, Algorithm::AStar).unwrap().unwrap();

        let text = to_ron(&solution).unwrap();
        let parsed: Solution = ron::from_str(&text).unwrap();
        assert_eq!(parsed.path, solution.path);
        assert_eq!(parsed.trace, solution.trace);
    }
}
