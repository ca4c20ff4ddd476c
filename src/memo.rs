//! Memo of proven dead-end paths.
//!
//! A key is the string of letters placed so far, in fill order. The exact
//! memo never lies. The probabilistic memo is a bloom filter of bounded size:
//! a false positive makes the solver skip a path that may still lead to a
//! grid, so a search using it can report no solution when one exists. Use
//! [`MemoStrategy::Exact`] when completeness matters.

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::f64::consts::LN_2;
use std::hash::{Hash, Hasher};

use crate::error::CrosswordError;

/// Salt for the second bloom hash.
const SECOND_HASH_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MemoStrategy {
    #[default]
    Exact,
    Probabilistic {
        /// Expected number of recorded paths.
        capacity: usize,
        /// Target false-positive rate at `capacity` insertions.
        false_positive_rate: f64,
    },
}

/// Largest bloom filter this crate will allocate, in bits (1 GiB).
pub const MAX_BLOOM_BITS: u64 = 1 << 33;

impl MemoStrategy {
    pub fn validate(&self) -> Result<(), CrosswordError> {
        match *self {
            Self::Exact => Ok(()),
            Self::Probabilistic {
                capacity,
                false_positive_rate,
            } => bloom_sizing(capacity, false_positive_rate).map(|_| ()),
        }
    }
}

/// Bit and hash counts for `capacity` insertions at `false_positive_rate`:
/// m = -n ln p / (ln 2)^2, k = m/n ln 2.
fn bloom_sizing(capacity: usize, false_positive_rate: f64) -> Result<(usize, u32), CrosswordError> {
    if capacity == 0 {
        return Err(CrosswordError::InvalidMemo(
            "bloom filter capacity must be positive".to_string(),
        ));
    }
    if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
        return Err(CrosswordError::InvalidMemo(format!(
            "false positive rate must be in (0, 1), got {false_positive_rate}"
        )));
    }
    let n = capacity as f64;
    let bits = (-n * false_positive_rate.ln() / (LN_2 * LN_2)).ceil().max(64.0);
    let too_large = || {
        CrosswordError::InvalidMemo(format!(
            "bloom filter for {capacity} paths at rate {false_positive_rate} needs {bits:.0} bits, \
             limit is {MAX_BLOOM_BITS}"
        ))
    };
    if !bits.is_finite() || bits > MAX_BLOOM_BITS as f64 {
        return Err(too_large());
    }
    let num_bits = usize::try_from(bits as u64).map_err(|_| too_large())?;
    let hashes = ((bits / n) * LN_2).round().clamp(1.0, f64::from(u32::MAX)) as u32;
    Ok((num_bits, hashes))
}

/// Fixed-size bloom filter over string keys, double hashing.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    bits: Vec<u64>,
    num_bits: usize,
    hashes: u32,
}

impl BloomFilter {
    /// Size for `capacity` insertions at `false_positive_rate`. Fails with
    /// [`CrosswordError::InvalidMemo`] on a zero capacity, a rate outside
    /// (0, 1), or a filter larger than [`MAX_BLOOM_BITS`].
    pub fn with_rate(capacity: usize, false_positive_rate: f64) -> Result<Self, CrosswordError> {
        let (num_bits, hashes) = bloom_sizing(capacity, false_positive_rate)?;
        Ok(Self {
            bits: vec![0; num_bits.div_ceil(64)],
            num_bits,
            hashes,
        })
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn hashes(&self) -> u32 {
        self.hashes
    }

    fn hash_pair(key: &str) -> (u64, u64) {
        let mut first = DefaultHasher::new();
        key.hash(&mut first);
        let mut second = DefaultHasher::new();
        SECOND_HASH_SEED.hash(&mut second);
        key.hash(&mut second);
        // odd step so successive indices differ
        (first.finish(), second.finish() | 1)
    }

    fn bit_indices(&self, key: &str) -> impl Iterator<Item = usize> + '_ {
        let (h1, h2) = Self::hash_pair(key);
        let m = self.num_bits as u64;
        (0..u64::from(self.hashes)).map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % m) as usize)
    }

    pub fn insert(&mut self, key: &str) {
        let indices: Vec<usize> = self.bit_indices(key).collect();
        for bit in indices {
            self.bits[bit / 64] |= 1u64 << (bit % 64);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bit_indices(key)
            .all(|bit| self.bits[bit / 64] & (1u64 << (bit % 64)) != 0)
    }
}

#[derive(Debug, Clone)]
pub enum PathMemo {
    Exact(HashSet<String>),
    Probabilistic { filter: BloomFilter, recorded: usize },
}

impl PathMemo {
    pub fn new(strategy: &MemoStrategy) -> Result<Self, CrosswordError> {
        Ok(match *strategy {
            MemoStrategy::Exact => Self::Exact(HashSet::new()),
            MemoStrategy::Probabilistic {
                capacity,
                false_positive_rate,
            } => Self::Probabilistic {
                filter: BloomFilter::with_rate(capacity, false_positive_rate)?,
                recorded: 0,
            },
        })
    }

    pub fn record(&mut self, key: &str) {
        match self {
            Self::Exact(keys) => {
                keys.insert(key.to_owned());
            }
            Self::Probabilistic { filter, recorded } => {
                filter.insert(key);
                *recorded += 1;
            }
        }
    }

    /// May answer `true` for a key never recorded when probabilistic.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Self::Exact(keys) => keys.contains(key),
            Self::Probabilistic { filter, .. } => filter.contains(key),
        }
    }

    /// Number of `record` calls (repeats included for the bloom filter).
    pub fn len(&self) -> usize {
        match self {
            Self::Exact(keys) => keys.len(),
            Self::Probabilistic { recorded, .. } => *recorded,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bloom_strategy(capacity: usize, rate: f64) -> MemoStrategy {
        MemoStrategy::Probabilistic {
            capacity,
            false_positive_rate: rate,
        }
    }

    #[test]
    fn test_exact_memo_record_and_contains() {
        let mut memo = PathMemo::new(&MemoStrategy::Exact).unwrap();
        assert!(memo.is_empty());
        memo.record("sar");
        memo.record("sar");
        assert!(memo.contains("sar"));
        assert!(!memo.contains("sa"));
        assert!(!memo.contains("sars"));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_exact_memo_empty_key() {
        let mut memo = PathMemo::new(&MemoStrategy::Exact).unwrap();
        assert!(!memo.contains(""));
        memo.record("");
        assert!(memo.contains(""));
    }

    #[test]
    fn test_bloom_has_no_false_negatives() {
        let mut memo = PathMemo::new(&bloom_strategy(500, 0.01)).unwrap();
        let keys: Vec<String> = (0..500).map(|i| format!("path{i}")).collect();
        for key in &keys {
            memo.record(key);
        }
        assert!(keys.iter().all(|key| memo.contains(key)));
        assert_eq!(memo.len(), 500);
    }

    #[test]
    fn test_bloom_false_positive_rate_is_bounded() {
        let mut filter = BloomFilter::with_rate(1000, 0.01).unwrap();
        for i in 0..1000 {
            filter.insert(&format!("recorded{i}"));
        }
        let false_positives = (0..10_000)
            .filter(|i| filter.contains(&format!("unseen{i}")))
            .count();
        // ~1% expected, allow generous slack
        assert!(false_positives < 300, "{false_positives} false positives");
    }

    #[test]
    fn test_bloom_sizing() {
        let filter = BloomFilter::with_rate(1000, 0.01).unwrap();
        // m = -n ln p / ln2^2 ~ 9586, k = m/n ln2 ~ 7
        assert!((9500..9700).contains(&filter.num_bits()));
        assert_eq!(filter.hashes(), 7);
    }

    #[test]
    fn test_empty_bloom_contains_nothing() {
        let filter = BloomFilter::with_rate(10, 0.002).unwrap();
        assert!(!filter.contains(""));
        assert!(!filter.contains("abc"));
    }

    #[test]
    fn test_validate_strategy() {
        assert!(MemoStrategy::Exact.validate().is_ok());
        assert!(bloom_strategy(10, 0.002).validate().is_ok());
        assert!(matches!(
            bloom_strategy(0, 0.002).validate(),
            Err(CrosswordError::InvalidMemo(_))
        ));
        assert!(bloom_strategy(10, 0.0).validate().is_err());
        assert!(bloom_strategy(10, 1.0).validate().is_err());
        assert!(bloom_strategy(10, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_oversized_bloom_is_rejected() {
        let huge = bloom_strategy(usize::MAX / 4, 0.002);
        assert!(matches!(huge.validate(), Err(CrosswordError::InvalidMemo(_))));
        assert!(matches!(PathMemo::new(&huge), Err(CrosswordError::InvalidMemo(_))));
        assert!(BloomFilter::with_rate(usize::MAX / 4, 0.002).is_err());
        // tiny rates blow up the bit count too
        assert!(BloomFilter::with_rate(1 << 30, f64::MIN_POSITIVE).is_err());
    }

    #[test]
    fn test_unvalidated_rate_is_rejected_at_construction() {
        for rate in [0.0, -0.5, 1.0, f64::NAN, f64::INFINITY] {
            assert!(BloomFilter::with_rate(10, rate).is_err(), "rate {rate}");
            assert!(PathMemo::new(&bloom_strategy(10, rate)).is_err(), "rate {rate}");
        }
        assert!(BloomFilter::with_rate(0, 0.01).is_err());
    }

    #[test]
    fn test_largest_allowed_bloom_sizing_is_accepted() {
        // ~1.29e9 bits, below the limit; validate only, no allocation
        assert!(bloom_strategy(100_000_000, 0.002).validate().is_ok());
    }
}
