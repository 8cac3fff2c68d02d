use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use mazecore::{solve, solve_all, Difficulty, Generator, Solution};
use mazetrace::{
    error::AppError,
    logging, report,
    settings::{AlgorithmSet, Settings},
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "mazetrace")]
struct Args {
    #[clap(short = 'W', long, help = "Maze width in cells")]
    width: Option<usize>,
    #[clap(short = 'H', long, help = "Maze height in cells")]
    height: Option<usize>,
    #[clap(short, long, help = "easy, normal or hard")]
    difficulty: Option<Difficulty>,
    #[clap(short, long, help = "Comma separated algorithms (bfs, dfs, astar, dijkstra) or all")]
    algorithm: Option<AlgorithmSet>,
    #[clap(short, long, help = "Seed of the maze generator")]
    seed: Option<u64>,
    #[clap(short, long, action, help = "Print every settled cell of each search")]
    trace: bool,
    #[clap(long, action, help = "Print the full solutions as RON")]
    ron: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "Log more, repeat for even more")]
    verbose: u8,
    #[clap(short, long, help = "Use this config file instead of the default one")]
    config: Option<PathBuf>,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
}

fn print_solution(solution: &Solution, args: &Args) -> Result<(), AppError> {
    if args.trace {
        for step in &solution.trace {
            println!("{}", report::trace_line(step));
        }
    }
    if args.ron {
        println!("{}", report::to_ron(solution)?);
    }
    Ok(())
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let settings_path = match &args.config {
        Some(path) => path.clone(),
        None => Settings::default_path()?,
    };

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    better_panic::install();

    logging::init(logging::raise_level(LevelFilter::Warn, args.verbose))?;
    let settings = Settings::load(&settings_path)?;

    if args.debug_config {
        println!("{:#?}", settings.populate());
        return Ok(());
    }

    logging::set_level(logging::raise_level(settings.get_log_level()?, args.verbose));

    let width = args.width.unwrap_or(settings.get_width());
    let height = args.height.unwrap_or(settings.get_height());
    let difficulty = args.difficulty.unwrap_or(settings.get_difficulty());
    let algorithms = args.algorithm.clone().unwrap_or(settings.get_algorithms());
    let seed = args
        .seed
        .or(settings.get_seed())
        .unwrap_or_else(rand::random);

    let grid = Generator::new(difficulty)
        .with_seed(seed)
        .generate(width, height)?;
    println!("{}", report::maze_header(&grid, seed));

    let results = if algorithms.is_all() {
        log::info!("Solving with all algorithms in parallel");
        solve_all(&grid)?
    } else {
        algorithms
            .iter()
            .map(|algorithm| solve(&grid, algorithm).map(|solution| (algorithm, solution)))
            .collect::<Result<Vec<_>, _>>()?
    };

    for (algorithm, solution) in &results {
        println!("{}", report::summary_line(*algorithm, solution.as_ref()));

        if let Some(solution) = solution {
            if !solution.is_valid_on(&grid, grid.start()) {
                log::error!("{} returned an invalid path", algorithm);
            }
            print_solution(solution, &args)?;
        }
    }

    Ok(())
}
