use std::process::ExitCode;

use crossword_solver::cli::{display_error, display_grid, display_no_solution, parse_cli};
use crossword_solver::logging::init_logging;
use crossword_solver::{SearchOutcome, solve};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging();
    match solve(&cli.to_config()) {
        Ok(SearchOutcome::Solved(grid)) => {
            display_grid(&grid);
            ExitCode::SUCCESS
        }
        Ok(SearchOutcome::NoSolution) => {
            display_no_solution();
            ExitCode::from(1)
        }
        Err(e) => {
            display_error(&e);
            ExitCode::from(2)
        }
    }
}
