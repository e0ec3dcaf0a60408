//! Command-line interface for the SRPSO library
//!
//! This binary runs the optimizer on a JSON run configuration against one of
//! the built-in benchmark objectives.
//!
//! # Usage
//!
//! ```bash
//! # Maximize the negated sphere function around a target point
//! srpso run --config run.json --objective sphere --target 1.0 --target 5.0
//!
//! # Same run with a fixed seed, parallel evaluation and a progress bar
//! srpso run --config run.json --objective rastrigin --seed 42 --parallel --progress
//!
//! # Show the decoded search space of a configuration
//! srpso inspect --config run.json
//! ```

use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use srpso::{
    benchmarks,
    io::{load_config, save_history_csv, save_report},
    objective::{DataBundle, Objective},
    optim::{
        DecodedVariables, LogObserver, Observe, OptimizationReport, Problem, ProgressObserver,
        SRPSO,
    },
};

/// Main CLI configuration struct
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Run the optimizer on a benchmark objective
    Run {
        /// Path to the JSON run configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Objective to maximize
        #[arg(long, value_enum, default_value_t = BenchmarkObjective::Sphere)]
        objective: BenchmarkObjective,

        /// Target point of the sphere objective, one value per parameter (defaults to the origin)
        #[arg(long)]
        target: Vec<f64>,

        /// Seed overriding the one in the configuration
        #[arg(long)]
        seed: Option<u64>,

        /// Evaluate the particles of each iteration in parallel
        #[arg(long, default_value_t = false)]
        parallel: bool,

        /// Show a progress bar instead of per-iteration log lines
        #[arg(long, default_value_t = false)]
        progress: bool,

        /// Path to save the report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to save the convergence history as CSV
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Show the decoded search space of a run configuration
    Inspect {
        /// Path to the JSON run configuration
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Built-in objectives
#[derive(Clone, Copy, ValueEnum)]
enum BenchmarkObjective {
    /// Negated squared distance to the target point
    Sphere,
    /// Negated Rastrigin function
    Rastrigin,
    /// Constant zero, useful to inspect the swarm dynamics alone
    Constant,
}

/// Main entry point for the CLI application
pub fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            objective,
            target,
            seed,
            parallel,
            progress,
            output,
            history,
        } => run(RunArgs {
            config,
            objective,
            target,
            seed,
            parallel,
            progress,
            output,
            history,
        }),
        Commands::Inspect { config } => inspect(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

struct RunArgs {
    config: PathBuf,
    objective: BenchmarkObjective,
    target: Vec<f64>,
    seed: Option<u64>,
    parallel: bool,
    progress: bool,
    output: Option<PathBuf>,
    history: Option<PathBuf>,
}

fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args.config)?;
    let optimizer = SRPSO::new(config.pso.clone(), args.seed.or(config.seed));
    let warm_start = config.warm_start.as_deref();

    let mut observer: Box<dyn Observe> = if args.progress {
        Box::new(ProgressObserver::new(config.pso.max_iters))
    } else {
        Box::new(LogObserver)
    };

    let report = match args.objective {
        BenchmarkObjective::Sphere => {
            let target = if args.target.is_empty() {
                vec![0.0; config.variables.len()]
            } else {
                args.target
            };
            let problem =
                Problem::new(&config.variables, DataBundle::empty(), benchmarks::sphere(target))?;
            solve(&optimizer, &problem, warm_start, &mut *observer, args.parallel)?
        }
        BenchmarkObjective::Rastrigin => {
            let problem =
                Problem::new(&config.variables, DataBundle::empty(), benchmarks::rastrigin())?;
            solve(&optimizer, &problem, warm_start, &mut *observer, args.parallel)?
        }
        BenchmarkObjective::Constant => {
            let problem =
                Problem::new(&config.variables, DataBundle::empty(), benchmarks::constant(0.0))?;
            solve(&optimizer, &problem, warm_start, &mut *observer, args.parallel)?
        }
    };

    println!("{report}");

    if let Some(path) = args.output {
        save_report(&path, &report)?;
        println!("{} {}", "Report written to".green(), path.display());
    }
    if let Some(path) = args.history {
        save_history_csv(&path, &report.history)?;
        println!("{} {}", "History written to".green(), path.display());
    }

    Ok(())
}

fn solve<O>(
    optimizer: &SRPSO,
    problem: &Problem<(), (), O>,
    warm_start: Option<&[f64]>,
    observer: &mut dyn Observe,
    parallel: bool,
) -> Result<OptimizationReport, Box<dyn Error>>
where
    O: Objective<(), ()> + Sync,
{
    let report = if parallel {
        optimizer.optimize_parallel(problem, warm_start, Some(observer))?
    } else {
        optimizer.optimize(problem, warm_start, Some(observer))?
    };
    Ok(report)
}

fn inspect(config: PathBuf) -> Result<(), Box<dyn Error>> {
    let config = load_config(&config)?;
    let decoded = DecodedVariables::decode(&config.variables)?;
    config.pso.validate()?;

    println!("{decoded}");
    println!(
        "{} {} particles, {} iterations, inertia {} -> {} over {} iterations",
        "Swarm:".bold(),
        config.pso.swarm_size,
        config.pso.max_iters,
        config.pso.w_start,
        config.pso.w_end,
        config.pso.vary_for()
    );

    if let Some(warm_start) = &config.warm_start {
        decoded.validate_warm_start(warm_start)?;
        println!("{} {warm_start:?}", "Warm start:".bold());
    }

    Ok(())
}
