//! torus-life - Entry Point
//!
//! Builds a driver from config and CLI flags, then either runs a fixed number
//! of generations headlessly (JSON lines on stdout) or reads commands from
//! stdin in a simple interactive loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use clap::{Parser, ValueEnum};

use torus_life::core::config::{LifeConfig, ScanKind, SeedKind};
use torus_life::core::error::Result;
use torus_life::core::types::Cell;
use torus_life::driver::command::HELP;
use torus_life::driver::{Command, Driver, LoggingSink, Response, TextRenderer};
use torus_life::engine::RuleSet;
use torus_life::patterns::Pattern;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    Counted,
    Probability,
}

/// Toroidal Game of Life with column sonification
#[derive(Parser, Debug)]
#[command(name = "torus-life")]
#[command(about = "Toroidal cellular automaton with a column-scanning pitch mapper")]
struct Args {
    /// TOML config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Rule in B/S notation, e.g. B3/S23
    #[arg(long)]
    rule: Option<String>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Random seeding strategy
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Number of draws for the counted strategy
    #[arg(long)]
    count: Option<usize>,

    /// Report raw rows instead of folded pitches
    #[arg(long)]
    no_fold: bool,

    /// Row index at which pitches fold back
    #[arg(long)]
    fold_threshold: Option<usize>,

    /// Enable column sonification
    #[arg(long)]
    sonify: bool,

    /// Start from a named pattern at the board center instead of a random board
    #[arg(long)]
    pattern: Option<String>,

    /// Run this many generations without interaction and print JSON tick reports
    #[arg(long)]
    headless: Option<u64>,

    /// Print the board after every tick
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    tracing::info!(
        "Board {}x{}, rule {}, scan {:?}",
        config.board.rows,
        config.board.cols,
        config.rule_set()?,
        config.fold_policy()
    );

    let mut driver = Driver::from_config(&config)?;
    driver.set_sink(Some(Box::new(LoggingSink::new())));
    if args.verbose {
        driver.set_renderer(Some(Box::new(TextRenderer::new(io::stdout()))));
    }

    match &args.pattern {
        Some(name) => {
            let pattern = Pattern::named(name)?;
            let dims = driver.engine().dimensions();
            let (height, width) = pattern.size();
            let origin = Cell::new(
                dims.rows.saturating_sub(height) / 2,
                dims.cols.saturating_sub(width) / 2,
            );
            driver.engine_mut().place(&pattern, origin)?;
        }
        None => driver.reseed(),
    }

    match args.headless {
        Some(generations) => run_headless(&mut driver, generations),
        None => run_interactive(&mut driver),
    }
}

fn build_config(args: &Args) -> Result<LifeConfig> {
    let mut config = match &args.config {
        Some(path) => LifeConfig::load(path)?,
        None => LifeConfig::default(),
    };

    if let Some(rows) = args.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.board.cols = cols;
    }
    if let Some(rule) = &args.rule {
        let rule = RuleSet::from_notation(rule)?;
        config.rules.stay = rule.stay_counts();
        config.rules.begin = rule.begin_counts();
    }
    if args.seed.is_some() {
        config.seeding.seed = args.seed;
    }
    match args.strategy {
        Some(Strategy::Counted) => config.seeding.strategy = SeedKind::Counted,
        Some(Strategy::Probability) => config.seeding.strategy = SeedKind::Probability,
        None => {}
    }
    if args.count.is_some() {
        config.seeding.density_count = args.count;
    }
    if args.no_fold {
        config.scan.policy = ScanKind::Identity;
    }
    if args.fold_threshold.is_some() {
        config.scan.fold_threshold = args.fold_threshold;
    }
    if args.sonify {
        config.driver.sonification = true;
    }

    config.validate()?;
    Ok(config)
}

/// Unpaused, unthrottled run printing one JSON tick report per line
fn run_headless(driver: &mut Driver, generations: u64) -> Result<()> {
    driver.state_mut().paused = false;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for _ in 0..generations {
        let report = driver.tick()?;
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    }
    tracing::info!(
        "Finished {} generations with {} live cells",
        driver.engine().generation(),
        driver.engine().live_count()
    );
    Ok(())
}

fn run_interactive(driver: &mut Driver) -> Result<()> {
    println!("\n=== TORUS LIFE ===");
    println!("{}", HELP);
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", driver.status_line());
        print!("> ");
        io::stdout().flush()?;

        let input = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        let command = match Command::parse(input) {
            Ok(Command::Run(n)) => {
                run_scheduled(driver, n)?;
                continue;
            }
            Ok(command) => command,
            Err(e) => {
                println!("{} (type 'help' for commands)", e);
                continue;
            }
        };

        match driver.execute(command) {
            Ok(Response::Quit) => break,
            Ok(Response::Done) => {}
            Ok(Response::Message(message)) => println!("{}", message),
            Ok(Response::Ticks(reports)) => {
                if let Some(last) = reports.last() {
                    println!(
                        "Generation {} ({} live cells)",
                        last.generation, last.live_cells
                    );
                }
            }
            Err(e) => {
                tracing::warn!("Command rejected: {}", e);
                println!("Error: {}", e);
            }
        }
    }

    println!(
        "\nGoodbye! Final state: {} live cells after {} generations.",
        driver.engine().live_count(),
        driver.engine().generation()
    );
    Ok(())
}

/// Scheduled ticks paced by the driver's tick interval
fn run_scheduled(driver: &mut Driver, ticks: u64) -> Result<()> {
    if driver.state().paused {
        println!("Paused - use 'pause' to resume or 'step <n>' to advance anyway");
        return Ok(());
    }
    for _ in 0..ticks {
        driver.tick()?;
        thread::sleep(driver.state().tick_interval());
    }
    println!(
        "Completed {} ticks. Now at generation {}.",
        ticks,
        driver.engine().generation()
    );
    Ok(())
}
