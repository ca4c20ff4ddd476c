use std::path::PathBuf;

use crate::dictionary::default_dictionary_path;
use crate::error::CrosswordError;
use crate::fill_order::FillOrder;
use crate::memo::MemoStrategy;
use crate::solver::DEFAULT_PROGRESS_INTERVAL;

/// Everything one `solve` call needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub size: usize,
    /// Falls back to [`default_dictionary_path`] when `None`.
    pub dictionary: Option<PathBuf>,
    pub memo: MemoStrategy,
    pub order: FillOrder,
    pub parallel: bool,
    pub progress_interval: u64,
}

impl SolverConfig {
    /// Exact memo, row-major order, sequential.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            dictionary: None,
            memo: MemoStrategy::Exact,
            order: FillOrder::RowMajor,
            parallel: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_dictionary(mut self, path: impl Into<PathBuf>) -> Self {
        self.dictionary = Some(path.into());
        self
    }

    pub fn with_memo(mut self, memo: MemoStrategy) -> Self {
        self.memo = memo;
        self
    }

    pub fn with_order(mut self, order: FillOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<(), CrosswordError> {
        if self.size == 0 {
            return Err(CrosswordError::InvalidSize(self.size));
        }
        self.memo.validate()
    }

    pub fn dictionary_path(&self) -> Result<PathBuf, CrosswordError> {
        match &self.dictionary {
            Some(path) => Ok(path.clone()),
            None => default_dictionary_path().ok_or(CrosswordError::MissingDictionary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::new(4);
        assert_eq!(config.size, 4);
        assert_eq!(config.memo, MemoStrategy::Exact);
        assert_eq!(config.order, FillOrder::RowMajor);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = SolverConfig::new(5)
            .with_dictionary("/tmp/words.txt")
            .with_order(FillOrder::Expanding)
            .with_parallel(true)
            .with_progress_interval(0);
        assert_eq!(config.dictionary_path().unwrap(), PathBuf::from("/tmp/words.txt"));
        assert_eq!(config.order, FillOrder::Expanding);
        assert!(config.parallel);
        assert_eq!(config.progress_interval, 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            SolverConfig::new(0).validate(),
            Err(CrosswordError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_bad_memo_rejected() {
        let config = SolverConfig::new(3).with_memo(MemoStrategy::Probabilistic {
            capacity: 0,
            false_positive_rate: 0.01,
        });
        assert!(matches!(config.validate(), Err(CrosswordError::InvalidMemo(_))));
    }
}
