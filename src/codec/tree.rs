//! Huffman code tree construction.
//!
//! Leaves enter a min-priority queue keyed by `(weight, sequence)`. Leaves get
//! sequence numbers in ascending symbol order, merged nodes take the next
//! free number, so ties always resolve the same way. The first node popped
//! becomes the left child of the merge.

use crate::codec::frequency::FrequencyTable;
use crate::codec::params::CodecParams;
use crate::codec::symbol::Symbol;
use crate::utils::error::{HuffmanError, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Deepest tree whose total weight fits in a `u64`.
///
/// A Huffman tree of depth `d` needs a total weight of at least
/// `Fib(d + 2)`, and `Fib(94)` exceeds `u64::MAX`.
pub const MAX_DEPTH: usize = 91;

/// Node in a Huffman tree.
///
/// Trees are only assembled through [`CodeTree`]; a hand-built `Node` is not
/// checked for the invariants a `CodeTree` guarantees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S: Symbol> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    /// `right` is `None` only for the root synthesized over a
    /// single-symbol alphabet.
    Internal {
        weight: u64,
        left: Box<Node<S>>,
        right: Option<Box<Node<S>>>,
    },
}

impl<S: Symbol> Node<S> {
    pub fn leaf(symbol: S, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Merges two subtrees under a new internal node.
    pub fn merge(left: Node<S>, right: Node<S>) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    fn wrap(leaf: Node<S>) -> Self {
        Node::Internal {
            weight: leaf.weight(),
            left: Box::new(leaf),
            right: None,
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Symbol carried by a leaf.
    pub fn symbol(&self) -> Option<S> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Child reached by following `bit` (`false` = left, `true` = right).
    pub fn child(&self, bit: bool) -> Option<&Node<S>> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, .. } if !bit => Some(&**left),
            Node::Internal { right, .. } => right.as_deref(),
        }
    }
}

/// Priority-queue entry ordered by `(weight, sequence)`.
struct QueueEntry<S: Symbol> {
    weight: u64,
    sequence: u64,
    node: Node<S>,
}

impl<S: Symbol> PartialEq for QueueEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: Symbol> Eq for QueueEntry<S> {}

impl<S: Symbol> PartialOrd for QueueEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Symbol> Ord for QueueEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.sequence).cmp(&(other.weight, other.sequence))
    }
}

/// A Huffman code tree over the alphabet of one input.
///
/// The root is always an internal node, so every symbol receives a
/// non-empty code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree<S: Symbol> {
    root: Node<S>,
    leaves: usize,
}

impl<S: Symbol> CodeTree<S> {
    /// Builds the tree for a frequency table by greedy lowest-weight merging.
    pub fn build(frequencies: &FrequencyTable<S>) -> Result<Self> {
        let mut heap: BinaryHeap<Reverse<QueueEntry<S>>> = BinaryHeap::with_capacity(frequencies.len());
        let mut sequence = 0u64;

        for (symbol, weight) in frequencies.iter() {
            heap.push(Reverse(QueueEntry {
                weight,
                sequence,
                node: Node::leaf(symbol, weight),
            }));
            sequence += 1;
        }

        let root = loop {
            let Some(Reverse(first)) = heap.pop() else {
                return Err(HuffmanError::EmptyInput);
            };
            let Some(Reverse(second)) = heap.pop() else {
                break first.node;
            };

            let merged = Node::merge(first.node, second.node);
            heap.push(Reverse(QueueEntry {
                weight: merged.weight(),
                sequence,
                node: merged,
            }));
            sequence += 1;
        };

        let tree = Self::from_root(root);
        log::trace!(
            "built code tree: {} leaves, depth {}, weight {}",
            tree.leaves,
            tree.depth(),
            tree.weight()
        );
        Ok(tree)
    }

    /// Counts `input` and builds its tree.
    pub fn from_symbols(input: &[S]) -> Result<Self> {
        Self::from_symbols_with(input, &CodecParams::default())
    }

    pub fn from_symbols_with(input: &[S], params: &CodecParams) -> Result<Self> {
        Self::build(&FrequencyTable::from_symbols_with(input, params)?)
    }

    /// Adopts `root`, wrapping a bare leaf so its symbol gets the code `0`.
    pub(crate) fn from_root(root: Node<S>) -> Self {
        let root = if root.is_leaf() { Node::wrap(root) } else { root };
        let leaves = count_leaves(&root);
        Self { root, leaves }
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Total weight, equal to the input length for freshly built trees.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves, one per distinct symbol.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Number of internal nodes.
    pub fn internal_count(&self) -> usize {
        // A full binary tree has one fewer internal node than leaves; the
        // single-symbol wrapper is the exception.
        self.leaves.saturating_sub(1).max(1)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((&**left, depth + 1));
                    if let Some(right) = right {
                        stack.push((&**right, depth + 1));
                    }
                }
            }
        }
        max_depth
    }

    /// Leaf symbols in left-to-right order.
    pub fn symbols(&self) -> Vec<S> {
        let mut out = Vec::with_capacity(self.leaves);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => out.push(*symbol),
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        stack.push(right);
                    }
                    stack.push(left);
                }
            }
        }
        out
    }
}

fn count_leaves<S: Symbol>(root: &Node<S>) -> usize {
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            Node::Leaf { .. } => count += 1,
            Node::Internal { left, right, .. } => {
                stack.push(left);
                if let Some(right) = right {
                    stack.push(right);
                }
            }
        }
    }
    count
}
