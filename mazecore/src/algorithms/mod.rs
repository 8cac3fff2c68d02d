mod depth_first_search;

use std::{fmt, str::FromStr};

use rand::{seq::SliceRandom as _, thread_rng, Rng, SeedableRng as _};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    dims::Position,
    error::MazeError,
    grid::{CellWall, MazeGrid},
};
pub use depth_first_search::DepthFirstSearch;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Chance that an easy maze only considers neighbors close to the border.
const EASY_BORDER_BIAS: f64 = 0.7;
/// Chance that a hard maze only considers neighbors in the middle of the maze.
const HARD_CENTER_BIAS: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Cell the carving starts from: a corner for easy mazes, the center otherwise.
    pub fn carve_seed(self, rows: usize, cols: usize) -> Position {
        match self {
            Difficulty::Easy => Position::ZERO,
            Difficulty::Normal | Difficulty::Hard => {
                Position::new(rows as i32 / 2, cols as i32 / 2)
            }
        }
    }

    /// Picks the next cell to carve into, `None` when there are no candidates.
    pub fn pick_neighbor<R: Rng + ?Sized>(
        self,
        candidates: &[Position],
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Option<Position> {
        let biased: SmallVec<[Position; 4]> = match self {
            Difficulty::Easy if rng.gen_bool(EASY_BORDER_BIAS) => candidates
                .iter()
                .copied()
                .filter(|&pos| in_outer_third(pos, rows, cols))
                .collect(),
            Difficulty::Hard if rng.gen_bool(HARD_CENTER_BIAS) => candidates
                .iter()
                .copied()
                .filter(|&pos| in_inner_half(pos, rows, cols))
                .collect(),
            _ => SmallVec::new(),
        };

        if biased.is_empty() {
            candidates.choose(rng).copied()
        } else {
            biased.choose(rng).copied()
        }
    }

    /// Whether `pos` belongs to the preferred pool of start cells.
    pub fn prefers_start(self, pos: Position, rows: usize) -> bool {
        let half = rows as i32 / 2;
        match self {
            Difficulty::Easy => pos.r < half,
            Difficulty::Hard => pos.r >= half,
            Difficulty::Normal => true,
        }
    }
}

fn in_outer_third(pos: Position, rows: usize, cols: usize) -> bool {
    let (rows, cols) = (rows as i32, cols as i32);
    let (tr, tc) = (rows / 3, cols / 3);
    pos.r < tr || pos.r >= rows - tr || pos.c < tc || pos.c >= cols - tc
}

fn in_inner_half(pos: Position, rows: usize, cols: usize) -> bool {
    let (rows, cols) = (rows as i32, cols as i32);
    let (qr, qc) = (rows / 4, cols / 4);
    (qr..rows - qr).contains(&pos.r) && (qc..cols - qc).contains(&pos.c)
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Exit carved by the generator: the top wall of the cell next to the top-left corner.
pub fn exit_cell(cols: usize) -> Position {
    Position::new(0, (cols as i32 - 1).min(1))
}

/// Maze generator, deterministic when a seed is given.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    seed: Option<u64>,
    difficulty: Difficulty,
}

impl Generator {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            seed: None,
            difficulty,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Generates a `width` × `height` maze (`width` columns, `height` rows).
    pub fn generate(&self, width: usize, height: usize) -> Result<MazeGrid, MazeError> {
        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        log::debug!(
            "Generating {}x{} {} maze, seed {}",
            width,
            height,
            self.difficulty,
            seed
        );

        let mut rng = Random::seed_from_u64(seed);
        self.generate_with(&mut rng, width, height)
    }

    /// Same as [`Generator::generate`], but draws randomness from `rng`, ignoring the seed.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        width: usize,
        height: usize,
    ) -> Result<MazeGrid, MazeError> {
        let (rows, cols) = (height, width);
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidSize(rows, cols));
        }

        let mut grid = MazeGrid::walled(rows, cols);

        let seed_cell = self.difficulty.carve_seed(rows, cols);
        let visited = DepthFirstSearch::carve(&mut grid, seed_cell, self.difficulty, rng);
        log::trace!("Carved from {}, visited {} cells", seed_cell, visited);

        let exit = exit_cell(cols);
        grid.remove_wall(exit, CellWall::Top);

        grid.rebuild_binary();

        let reachable: Vec<Position> = grid
            .cells()
            .map(|cells| cells.iter_pos().filter(|&pos| cells[pos].visited).collect())
            .unwrap_or_default();
        let preferred = reachable
            .iter()
            .copied()
            .filter(|&pos| self.difficulty.prefers_start(pos, rows))
            .collect::<Vec<_>>();
        let pool = if preferred.is_empty() {
            &reachable
        } else {
            &preferred
        };
        grid.start = pool.choose(rng).copied().unwrap_or(seed_cell);
        grid.clear_visited();

        log::debug!("Maze ready, exit at {}, start at {}", exit, grid.start);

        Ok(grid)
    }
}

/// Generates a maze with a random seed.
pub fn generate(
    width: usize,
    height: usize,
    difficulty: Difficulty,
) -> Result<MazeGrid, MazeError> {
    Generator::new(difficulty).generate(width, height)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::oracle::Adjacency;
    use crate::solver::{solve, Algorithm};

    fn reachable_count(grid: &MazeGrid) -> usize {
        let mut seen = vec![false; grid.rows() * grid.cols()];
        let mut stack = vec![grid.start()];
        seen[grid.start().linear_index(grid.cols())] = true;
        let mut count = 1;

        while let Some(pos) = stack.pop() {
            for next in grid.passable_neighbors(pos) {
                let idx = next.linear_index(grid.cols());
                if !seen[idx] {
                    seen[idx] = true;
                    count += 1;
                    stack.push(next);
                }
            }
        }

        count
    }

    #[test]
    fn generated_mazes_are_valid() {
        for difficulty in Difficulty::ALL {
            for seed in 0..20 {
                let (width, height) = (9 + seed as usize % 13, 9 + (seed as usize * 7) % 13);
                let grid = Generator::new(difficulty)
                    .with_seed(seed)
                    .generate(width, height)
                    .unwrap();

                assert_eq!(grid.rows(), height);
                assert_eq!(grid.cols(), width);
                assert!(grid.check_symmetry().is_none());
                assert_eq!(grid.exits(), vec![exit_cell(width)]);
                assert!(grid.binary().iter().all(|&v| v == crate::grid::PASSABLE));
                assert_eq!(reachable_count(&grid), width * height);
                assert!(solve(&grid, Algorithm::Bfs).unwrap().is_some());
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = Generator::new(Difficulty::Hard).with_seed(42).generate(15, 11).unwrap();
        let b = Generator::new(Difficulty::Hard).with_seed(42).generate(15, 11).unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.start(), b.start());
    }

    #[test]
    fn start_follows_difficulty() {
        for seed in 0..30 {
            let easy = Generator::new(Difficulty::Easy).with_seed(seed).generate(12, 12).unwrap();
            assert!(easy.start().r < 6);

            let hard = Generator::new(Difficulty::Hard).with_seed(seed).generate(12, 12).unwrap();
            assert!(hard.start().r >= 6);
        }
    }

    #[test]
    fn tiny_sizes_degrade_gracefully() {
        assert_eq!(
            generate(0, 5, Difficulty::Normal).unwrap_err(),
            MazeError::InvalidSize(5, 0)
        );

        let single = generate(1, 1, Difficulty::Easy).unwrap();
        assert_eq!(single.start(), Position::ZERO);
        assert!(single.can_exit(Position::ZERO));

        let column = generate(1, 6, Difficulty::Hard).unwrap();
        assert_eq!(column.exits(), vec![Position::ZERO]);
        assert_eq!(reachable_count(&column), 6);
    }

    #[test]
    fn neighbor_bias_falls_back_to_all_candidates() {
        let mut rng = Random::seed_from_u64(3);
        // both candidates are in the inner area, easy bias finds nothing and falls back
        let candidates = [Position::new(4, 4), Position::new(4, 5)];
        for _ in 0..50 {
            let picked = Difficulty::Easy
                .pick_neighbor(&candidates, 9, 9, &mut rng)
                .unwrap();
            assert!(candidates.contains(&picked));
        }
        assert!(Difficulty::Hard.pick_neighbor(&[], 9, 9, &mut rng).is_none());
    }

    fn share_of(difficulty: Difficulty, preferred: Position, other: Position, seed: u64) -> f64 {
        const DRAWS: usize = 4000;
        let mut rng = Random::seed_from_u64(seed);
        let candidates = [other, preferred];
        let hits = (0..DRAWS)
            .filter(|_| difficulty.pick_neighbor(&candidates, 9, 9, &mut rng) == Some(preferred))
            .count();
        hits as f64 / DRAWS as f64
    }

    #[test]
    fn easy_leans_towards_the_border() {
        // 0.7 + 0.3 / 2
        let share = share_of(Difficulty::Easy, Position::new(1, 4), Position::new(4, 4), 11);
        assert!((0.80..0.90).contains(&share), "{}", share);
    }

    #[test]
    fn hard_leans_towards_the_center() {
        // 0.3 + 0.7 / 2
        let share = share_of(Difficulty::Hard, Position::new(4, 4), Position::new(0, 4), 12);
        assert!((0.60..0.70).contains(&share), "{}", share);
    }

    #[test]
    fn normal_picks_uniformly() {
        let share = share_of(Difficulty::Normal, Position::new(1, 4), Position::new(4, 4), 13);
        assert!((0.45..0.55).contains(&share), "{}", share);
    }

    #[test]
    fn bias_region_boundaries() {
        // 9x9: outer third is r or c in 0..3 or 6..9, inner half is r and c in 2..7
        assert!(in_outer_third(Position::new(2, 4), 9, 9));
        assert!(!in_outer_third(Position::new(3, 4), 9, 9));
        assert!(!in_outer_third(Position::new(5, 5), 9, 9));
        assert!(in_outer_third(Position::new(6, 4), 9, 9));
        assert!(in_outer_third(Position::new(4, 8), 9, 9));

        for r in 2..=6 {
            assert!(in_inner_half(Position::new(r, 4), 9, 9));
        }
        assert!(!in_inner_half(Position::new(1, 4), 9, 9));
        assert!(!in_inner_half(Position::new(7, 4), 9, 9));
        assert!(!in_inner_half(Position::new(4, 1), 9, 9));
    }

    #[test]
    fn difficulty_from_str() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("medium".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }
}
