// Property tests over small random dictionaries

use crossword_solver::*;
use proptest::prelude::*;

fn is_valid(grid: &Grid, trie: &WordTrie) -> bool {
    grid.is_complete()
        && grid
            .rows()
            .iter()
            .chain(grid.columns().iter())
            .all(|word| trie.contains(word))
}

/// Every 2x2 square over `words`, by brute force.
fn brute_force_squares(words: &[String]) -> Vec<String> {
    let mut squares = Vec::new();
    for top in words {
        for bottom in words {
            let left: String = [top.chars().next(), bottom.chars().next()]
                .into_iter()
                .flatten()
                .collect();
            let right: String = [top.chars().nth(1), bottom.chars().nth(1)]
                .into_iter()
                .flatten()
                .collect();
            if words.contains(&left) && words.contains(&right) {
                squares.push(format!("{top}{bottom}"));
            }
        }
    }
    squares
}

proptest! {
    #[test]
    fn solved_grids_are_valid(
        words in prop::collection::vec("[abc]{3}", 1..16),
        parallel in any::<bool>(),
        expanding in any::<bool>(),
    ) {
        let order = if expanding { FillOrder::Expanding } else { FillOrder::RowMajor };
        let config = SolverConfig::new(3)
            .with_parallel(parallel)
            .with_order(order)
            .with_progress_interval(0);
        let trie = WordTrie::build(&words, 3);
        if let SearchOutcome::Solved(grid) = solve_words(&words, &config).unwrap() {
            prop_assert!(is_valid(&grid, &trie), "invalid grid:\n{}", grid);
        }
    }

    #[test]
    fn exact_memo_is_complete(
        words in prop::collection::vec("[ab]{2}", 1..5),
        expanding in any::<bool>(),
    ) {
        let expected = brute_force_squares(&words);
        let order = if expanding { FillOrder::Expanding } else { FillOrder::RowMajor };
        let config = SolverConfig::new(2).with_order(order).with_progress_interval(0);
        let outcome = solve_words(&words, &config).unwrap();
        match outcome {
            SearchOutcome::Solved(grid) => prop_assert!(expected.contains(&grid.letters())),
            SearchOutcome::NoSolution => prop_assert!(expected.is_empty()),
        }
    }

    #[test]
    fn sequential_search_is_deterministic(words in prop::collection::vec("[abcd]{3}", 1..16)) {
        let config = SolverConfig::new(3).with_progress_interval(0);
        let first = solve_words(&words, &config).unwrap();
        let second = solve_words(&words, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn build_is_idempotent(words in prop::collection::vec("[abc]{3}", 0..16)) {
        let once = WordTrie::build(&words, 3);
        let twice = WordTrie::build(words.iter().chain(words.iter()), 3);
        for prefix in ["", "a", "b", "ab", "ca", "cc"] {
            prop_assert_eq!(once.probabilities(prefix.chars()), twice.probabilities(prefix.chars()));
        }
    }
}
