//! Runs one sequential solver, or races one solver per viable first letter.
//!
//! In the parallel mode every worker owns its grid and memo and only reads the
//! shared trie. The one shared write is the cancellation flag, set once by the
//! first worker to solve; the others notice it on their next backtrack and stop.

use std::sync::atomic::{self, AtomicBool};
use std::sync::mpsc;
use std::thread;

use crate::config::SolverConfig;
use crate::dictionary::load_dictionary_from_file;
use crate::error::CrosswordError;
use crate::fill_order::FillOrder;
use crate::grid::Grid;
use crate::memo::{MemoStrategy, PathMemo};
use crate::solver::{DEFAULT_PROGRESS_INTERVAL, GridSolver, SolverState};
use crate::trie::WordTrie;
use crate::{debug_log, info_log};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Grid),
    /// The search space is exhausted. With a probabilistic memo this may be a
    /// false negative.
    NoSolution,
}

impl SearchOutcome {
    pub fn grid(&self) -> Option<&Grid> {
        match self {
            Self::Solved(grid) => Some(grid),
            Self::NoSolution => None,
        }
    }

    pub fn into_grid(self) -> Option<Grid> {
        match self {
            Self::Solved(grid) => Some(grid),
            Self::NoSolution => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

impl From<Option<Grid>> for SearchOutcome {
    fn from(grid: Option<Grid>) -> Self {
        grid.map_or(Self::NoSolution, Self::Solved)
    }
}

/// How one parallel worker ended. Only the first worker to solve carries its
/// grid; a later solver drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub letter: char,
    pub state: SolverState,
    pub grid: Option<Grid>,
}

pub struct SearchCoordinator<'a> {
    trie: &'a WordTrie,
    /// Empty memo cloned into every solver.
    memo: PathMemo,
    order: FillOrder,
    progress_interval: u64,
}

impl<'a> SearchCoordinator<'a> {
    pub fn new(
        trie: &'a WordTrie,
        memo: MemoStrategy,
        order: FillOrder,
    ) -> Result<Self, CrosswordError> {
        Ok(Self {
            trie,
            memo: PathMemo::new(&memo)?,
            order,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        })
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    fn solver(&self) -> GridSolver<'a> {
        GridSolver::with_memo(self.trie, self.order, self.memo.clone())
            .with_progress_interval(self.progress_interval)
    }

    pub fn run(&self, parallel: bool) -> SearchOutcome {
        if self.trie.is_empty() {
            info_log!("No words of length {}", self.trie.word_length());
            return SearchOutcome::NoSolution;
        }
        if parallel {
            self.run_parallel()
        } else {
            self.run_sequential()
        }
    }

    /// Deterministic for a given trie, order and exact memo.
    pub fn run_sequential(&self) -> SearchOutcome {
        let mut solver = self.solver();
        solver.run();
        info_log!(
            "Sequential search: {} placements, {} backtracks, {} memo entries in {:.2?}",
            solver.stats().cells_placed,
            solver.stats().backtracks,
            solver.stats().memo_entries,
            solver.stats().elapsed
        );
        solver.into_grid().into()
    }

    /// First solver to finish wins; which grid that is may vary between runs
    /// when several first letters lead to solutions.
    pub fn run_parallel(&self) -> SearchOutcome {
        match self.race().into_iter().find(|report| report.grid.is_some()) {
            Some(report) => {
                info_log!("Worker '{}' solved first", report.letter);
                report.grid.into()
            }
            None => SearchOutcome::NoSolution,
        }
    }

    /// One worker per viable first letter, all sharing one cancellation flag.
    /// Returns a report per worker once every worker has stopped.
    pub fn race(&self) -> Vec<WorkerReport> {
        let first_letters: Vec<char> = self
            .solver()
            .opening_candidates()
            .into_iter()
            .map(|candidate| candidate.letter)
            .collect();
        if first_letters.is_empty() {
            return Vec::new();
        }
        info_log!(
            "Racing {} workers on first letters {:?}",
            first_letters.len(),
            first_letters
        );

        let cancel = AtomicBool::new(false);
        let (sender, receiver) = mpsc::channel();
        thread::scope(|scope| {
            for &letter in &first_letters {
                let sender = sender.clone();
                let cancel = &cancel;
                scope.spawn(move || {
                    let mut solver = self
                        .solver()
                        .with_first_letter(letter)
                        .with_cancel_flag(cancel);
                    let state = solver.run();
                    debug_log!(
                        "Worker '{}' ended {:?} after {} backtracks",
                        letter,
                        state,
                        solver.stats().backtracks
                    );
                    // set once, by the first worker to solve
                    let won = state == SolverState::Solved
                        && !cancel.swap(true, atomic::Ordering::AcqRel);
                    let grid = if won { solver.into_grid() } else { None };
                    let _ = sender.send(WorkerReport {
                        letter,
                        state,
                        grid,
                    });
                });
            }
            drop(sender);
            receiver.iter().collect()
        })
    }
}

/// Build the trie from `words` and search for a `config.size` grid.
/// `config.dictionary` is not read.
pub fn solve_words<I, S>(words: I, config: &SolverConfig) -> Result<SearchOutcome, CrosswordError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    config.validate()?;
    let trie = WordTrie::build(words, config.size);
    info_log!("Loaded {} words of length {}", trie.len(), config.size);
    let coordinator = SearchCoordinator::new(&trie, config.memo, config.order)?
        .with_progress_interval(config.progress_interval);
    Ok(coordinator.run(config.parallel))
}

/// Validate `config`, read its dictionary and search.
pub fn solve(config: &SolverConfig) -> Result<SearchOutcome, CrosswordError> {
    config.validate()?;
    let path = config.dictionary_path()?;
    let words = load_dictionary_from_file(&path)?;
    solve_words(words, config)
}
