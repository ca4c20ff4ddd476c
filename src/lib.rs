// Library interface for crossword-solver
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod dictionary;
pub mod error;
pub mod fill_order;
pub mod grid;
pub mod logging;
pub mod memo;
pub mod solver;
pub mod trie;

// Re-export commonly used items for easier testing
pub use config::SolverConfig;
pub use coordinator::{SearchCoordinator, SearchOutcome, WorkerReport, solve, solve_words};
pub use dictionary::{load_dictionary_from_file, load_dictionary_from_str};
pub use error::CrosswordError;
pub use fill_order::FillOrder;
pub use grid::Grid;
pub use memo::{MemoStrategy, PathMemo};
pub use solver::{GridSolver, SolverState};
pub use trie::WordTrie;
