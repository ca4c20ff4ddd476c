//! Prefix tree over the dictionary words of one length.
//!
//! Each node counts the words that pass through it. `probabilities` turns the
//! counts of a node's children into the distribution of the next letter after
//! a prefix, which is what the solver scores candidates with.
//!
//! Counts start at a baseline of 1 rather than 0, so a node's count is
//! "words through it + 1". This flattens the distribution in favour of rare
//! letters. The arithmetic is kept as is because the solver's output (and
//! therefore every known-grid regression) depends on it.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::debug_log;

/// Count a node starts with before any word passes through it.
pub const COUNT_BASELINE: u32 = 1;

/// Next-letter probabilities after a prefix. Ordered by letter.
pub type LetterDistribution = BTreeMap<char, f64>;

#[derive(Debug, Clone)]
pub struct TrieNode {
    letter: Option<char>,
    children: HashMap<char, TrieNode>,
    count: u32,
}

impl TrieNode {
    fn new(letter: Option<char>) -> Self {
        Self {
            letter,
            children: HashMap::new(),
            count: COUNT_BASELINE,
        }
    }

    /// `None` for the root.
    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn child(&self, letter: char) -> Option<&TrieNode> {
        self.children.get(&letter)
    }

    /// Nodes in the subtree rooted here, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(TrieNode::node_count).sum::<usize>()
    }
}

/// Immutable after [`WordTrie::build`]; share it by reference across workers.
#[derive(Debug, Clone)]
pub struct WordTrie {
    root: TrieNode,
    word_length: usize,
    word_count: usize,
}

impl WordTrie {
    pub fn new(word_length: usize) -> Self {
        Self {
            root: TrieNode::new(None),
            word_length,
            word_count: 0,
        }
    }

    /// Keep the words of exactly `length` characters, lower-case them, drop
    /// duplicates and insert what is left.
    pub fn build<I, S>(words: I, length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new(length);
        let mut seen = HashSet::new();
        for word in words {
            let word = word.as_ref().to_lowercase();
            if word.chars().count() == length && seen.insert(word.clone()) {
                trie.insert(&word);
            }
        }
        debug_log!(
            "Built trie for length {}: {} words, {} nodes",
            length,
            trie.word_count,
            trie.root.node_count()
        );
        trie
    }

    /// Walk `word` from the root, creating nodes as needed, and bump the count
    /// of every node on the path, root and final node included.
    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        node.count += 1;
        for letter in word.chars() {
            node = node
                .children
                .entry(letter)
                .or_insert_with(|| TrieNode::new(Some(letter)));
            node.count += 1;
        }
        self.word_count += 1;
    }

    fn find<I>(&self, prefix: I) -> Option<&TrieNode>
    where
        I: IntoIterator<Item = char>,
    {
        prefix
            .into_iter()
            .try_fold(&self.root, |node, letter| node.child(letter))
    }

    /// Distribution of the letter following `prefix`: each child's count over
    /// the sum of its siblings' counts. Empty when no word starts with
    /// `prefix`, i.e. the prefix is dead whatever the crossing word does.
    pub fn probabilities<I>(&self, prefix: I) -> LetterDistribution
    where
        I: IntoIterator<Item = char>,
    {
        let Some(node) = self.find(prefix) else {
            return LetterDistribution::new();
        };
        let total: u64 = node.children.values().map(|child| u64::from(child.count)).sum();
        node.children
            .iter()
            .map(|(&letter, child)| (letter, f64::from(child.count) / total as f64))
            .collect()
    }

    /// Whether `word` was inserted. Only full-length paths count as words.
    pub fn contains(&self, word: &str) -> bool {
        word.chars().count() == self.word_length && self.find(word.chars()).is_some()
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Number of distinct words inserted.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}
