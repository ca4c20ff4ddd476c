//! Backtracking grid filler.
//!
//! The solver walks the cells in a fixed [`FillOrder`]. At each cell it scores
//! every letter by `P(letter | row prefix) * P(letter | column prefix)` from
//! the trie, tries the positive-scoring letters best first (ties by letter),
//! and backtracks when none is left. Each exhausted path is recorded in the
//! [`PathMemo`] so no path is entered twice.
//!
//! # State Machine
//! - `Filling(pos)` → `Filling(pos + 1)` | `Solved` | `Backtracking(pos)`
//! - `Backtracking(pos)` → `Filling(pos - 1)` | `Failed` | `Cancelled`
//!
//! Recursion is replaced by a stack of candidate frames, one per filled
//! position, so stack depth does not grow with the grid.

use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicBool};
use std::time::{Duration, Instant};

use crate::error::CrosswordError;
use crate::fill_order::{Cell, FillOrder};
use crate::grid::Grid;
use crate::memo::{MemoStrategy, PathMemo};
use crate::trie::{LetterDistribution, WordTrie};
use crate::{debug_log, info_log};

/// Backtracks between two progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Filling(usize),
    Backtracking(usize),
    Solved,
    Failed,
    /// Another worker solved first.
    Cancelled,
}

impl SolverState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Failed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterScore {
    pub letter: char,
    pub score: f64,
}

/// Joint scores of the letters that can continue both prefixes, best first,
/// ties broken by ascending letter.
pub fn rank_candidates(
    horizontal: &LetterDistribution,
    vertical: &LetterDistribution,
) -> Vec<LetterScore> {
    // a letter missing from either side scores zero, so one side is enough
    let mut candidates: Vec<LetterScore> = horizontal
        .iter()
        .filter_map(|(&letter, &h_prob)| {
            let score = h_prob * vertical.get(&letter).copied().unwrap_or(0.0);
            (score > 0.0).then_some(LetterScore { letter, score })
        })
        .collect();
    candidates.sort_by(compare_scores);
    candidates
}

fn compare_scores(a: &LetterScore, b: &LetterScore) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.letter.cmp(&b.letter))
}

#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub cells_placed: u64,
    pub backtracks: u64,
    pub memo_entries: usize,
    pub elapsed: Duration,
}

/// Ranked letters for one position and how far through them we are.
#[derive(Debug)]
struct Frame {
    candidates: Vec<char>,
    next: usize,
}

impl Frame {
    fn next_candidate(&mut self) -> Option<char> {
        let letter = self.candidates.get(self.next).copied()?;
        self.next += 1;
        Some(letter)
    }
}

pub struct GridSolver<'a> {
    trie: &'a WordTrie,
    order: Vec<Cell>,
    grid: Grid,
    memo: PathMemo,
    /// Letters placed so far in fill order; also the memo key.
    path: String,
    frames: Vec<Frame>,
    state: SolverState,
    first_letter: Option<char>,
    cancel: Option<&'a AtomicBool>,
    progress_interval: u64,
    stats: SearchStats,
    started: Instant,
}

impl<'a> GridSolver<'a> {
    /// Solver for a grid whose side is the trie's word length. Fails when
    /// `memo` describes an unusable bloom filter.
    pub fn new(
        trie: &'a WordTrie,
        order: FillOrder,
        memo: &MemoStrategy,
    ) -> Result<Self, CrosswordError> {
        Ok(Self::with_memo(trie, order, PathMemo::new(memo)?))
    }

    /// Solver that records dead ends in `memo`, which should be empty.
    pub fn with_memo(trie: &'a WordTrie, order: FillOrder, memo: PathMemo) -> Self {
        let size = trie.word_length();
        let order = order.cells(size);
        let state = if order.is_empty() {
            SolverState::Solved
        } else {
            SolverState::Filling(0)
        };
        Self {
            trie,
            order,
            grid: Grid::new(size),
            memo,
            path: String::new(),
            frames: Vec::new(),
            state,
            first_letter: None,
            cancel: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            stats: SearchStats::default(),
            started: Instant::now(),
        }
    }

    /// Only consider `letter` for the first cell.
    pub fn with_first_letter(mut self, letter: char) -> Self {
        self.first_letter = Some(letter);
        self
    }

    /// Give up with [`SolverState::Cancelled`] once `cancel` is set. Checked on
    /// every backtrack.
    pub fn with_cancel_flag(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// 0 disables progress logging.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The completed grid, if the search ended in `Solved`.
    pub fn into_grid(self) -> Option<Grid> {
        (self.state == SolverState::Solved).then_some(self.grid)
    }

    /// Ranked candidates for the first cell of an empty grid.
    pub fn opening_candidates(&self) -> Vec<LetterScore> {
        match self.order.first() {
            Some(&cell) => self.score_cell(cell),
            None => Vec::new(),
        }
    }

    /// Run to a terminal state.
    pub fn run(&mut self) -> SolverState {
        while !self.state.is_terminal() {
            self.step();
        }
        self.stats.elapsed = self.started.elapsed();
        self.stats.memo_entries = self.memo.len();
        debug_log!(
            "Search ended {:?} after {} placements and {} backtracks",
            self.state,
            self.stats.cells_placed,
            self.stats.backtracks
        );
        self.state
    }

    /// Perform one transition.
    pub fn step(&mut self) -> SolverState {
        self.state = match self.state {
            SolverState::Filling(pos) => self.fill(pos),
            SolverState::Backtracking(pos) => self.backtrack(pos),
            terminal => terminal,
        };
        self.state
    }

    fn score_cell(&self, cell: Cell) -> Vec<LetterScore> {
        let horizontal = self.trie.probabilities(self.grid.row_prefix(cell));
        let vertical = self.trie.probabilities(self.grid.column_prefix(cell));
        rank_candidates(&horizontal, &vertical)
    }

    fn frame_for(&self, pos: usize) -> Frame {
        let mut candidates: Vec<char> = self
            .score_cell(self.order[pos])
            .into_iter()
            .map(|candidate| candidate.letter)
            .collect();
        if pos == 0
            && let Some(first) = self.first_letter
        {
            candidates.retain(|&letter| letter == first);
        }
        Frame {
            candidates,
            next: 0,
        }
    }

    fn fill(&mut self, pos: usize) -> SolverState {
        if self.frames.len() == pos {
            let frame = self.frame_for(pos);
            self.frames.push(frame);
        }
        while let Some(letter) = self.frames[pos].next_candidate() {
            self.path.push(letter);
            if self.memo.contains(&self.path) {
                self.path.pop();
                continue;
            }
            self.grid.set(self.order[pos], letter);
            self.stats.cells_placed += 1;
            return if pos + 1 == self.order.len() {
                SolverState::Solved
            } else {
                SolverState::Filling(pos + 1)
            };
        }
        self.memo.record(&self.path);
        SolverState::Backtracking(pos)
    }

    fn backtrack(&mut self, pos: usize) -> SolverState {
        self.frames.truncate(pos);
        self.stats.backtracks += 1;
        self.report_progress();
        if pos == 0 {
            return SolverState::Failed;
        }
        if self
            .cancel
            .is_some_and(|cancel| cancel.load(atomic::Ordering::Acquire))
        {
            return SolverState::Cancelled;
        }
        self.grid.clear(self.order[pos - 1]);
        self.path.pop();
        SolverState::Filling(pos - 1)
    }

    fn report_progress(&self) {
        if self.progress_interval > 0 && self.stats.backtracks % self.progress_interval == 0 {
            info_log!(
                "Total backtracks {}. {:.1} backtracks per second. Failed path {}",
                self.stats.backtracks,
                self.stats.backtracks as f64 / self.started.elapsed().as_secs_f64().max(1e-9),
                self.path
            );
        }
    }
}
