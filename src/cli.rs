use clap::Parser;
use std::path::PathBuf;

use crate::config::SolverConfig;
use crate::error::CrosswordError;
use crate::fill_order::FillOrder;
use crate::grid::Grid;
use crate::memo::MemoStrategy;
use crate::solver::DEFAULT_PROGRESS_INTERVAL;

/// False-positive rate used when only a bloom capacity is given.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.002;

/// Crossword grid solver CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a dictionary file, one or more period-separated word forms per line
    #[arg(short = 'i', long = "input")]
    pub dictionary_path: Option<PathBuf>,

    /// Side length of the grid
    #[arg(short = 's', long = "size")]
    pub size: usize,

    /// Remember dead ends in a bloom filter sized for this many paths instead of an exact set
    #[arg(long = "bloom-capacity")]
    pub bloom_capacity: Option<usize>,

    /// Target false-positive rate of the bloom filter
    #[arg(long = "false-positive-rate", default_value_t = DEFAULT_FALSE_POSITIVE_RATE)]
    pub false_positive_rate: f64,

    /// Order in which cells are filled
    #[arg(long, value_enum, default_value_t = FillOrder::RowMajor)]
    pub order: FillOrder,

    /// Race one worker per viable first letter
    #[arg(long)]
    pub parallel: bool,

    /// Log progress every N backtracks (0 disables)
    #[arg(long = "progress-interval", default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: u64,
}

impl Cli {
    pub fn to_config(&self) -> SolverConfig {
        let memo = match self.bloom_capacity {
            Some(capacity) => MemoStrategy::Probabilistic {
                capacity,
                false_positive_rate: self.false_positive_rate,
            },
            None => MemoStrategy::Exact,
        };
        let mut config = SolverConfig::new(self.size)
            .with_memo(memo)
            .with_order(self.order)
            .with_parallel(self.parallel)
            .with_progress_interval(self.progress_interval);
        config.dictionary = self.dictionary_path.clone();
        config
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub fn display_grid(grid: &Grid) {
    print!("{grid}");
}

pub fn display_no_solution() {
    eprintln!("No solution found.");
}

pub fn display_error(error: &CrosswordError) {
    eprintln!("Error: {error}");
}
