//! Serialized form of a [`CodeTree`].
//!
//! The tree is written in pre-order: an internal node is a `0` bit followed
//! by its left and right subtrees, a leaf is a `1` bit followed by the
//! symbol in `S::BITS` bits, MSB first. The bit string is packed with the
//! same padding header as compressed payloads.
//!
//! The synthesized root of a single-symbol tree is written as its lone leaf
//! and restored on read. Weights are not stored; a deserialized tree reports
//! zero weight everywhere and yields the same codes.

use crate::codec::bit_buffer::PaddedBitBuffer;
use crate::codec::symbol::Symbol;
use crate::codec::tree::{CodeTree, MAX_DEPTH, Node};
use crate::utils::error::{HuffmanError, Result};
use bitvec::prelude::*;
use std::collections::BTreeSet;

impl<S: Symbol> CodeTree<S> {
    /// Serializes the tree shape and leaf symbols.
    pub fn to_bytes(&self) -> Vec<u8> {
        let start = match self.root() {
            Node::Internal {
                left, right: None, ..
            } => &**left,
            root => root,
        };

        let mut bits: BitVec<u8, Msb0> = BitVec::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    let raw = symbol.to_raw();
                    bits.push(true);
                    bits.extend_from_bitslice(&raw.view_bits::<Msb0>()[32 - S::BITS..]);
                }
                Node::Internal { left, right, .. } => {
                    bits.push(false);
                    if let Some(right) = right {
                        stack.push(right);
                    }
                    stack.push(left);
                }
            }
        }

        PaddedBitBuffer::pack(&bits).into_bytes()
    }

    /// Rebuilds a tree written by [`CodeTree::to_bytes`].
    ///
    /// Trees deeper than [`MAX_DEPTH`] are rejected; no frequency table can
    /// produce one.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let buffer = PaddedBitBuffer::from_bytes(bytes.to_vec());
        let bits = buffer
            .payload()
            .map_err(|err| HuffmanError::InvalidTree(err.to_string()))?;
        let truncated = || HuffmanError::InvalidTree("tree data ends mid-node".to_string());

        let mut cursor = 0usize;
        let mut seen = BTreeSet::new();
        // Internal nodes still waiting for children; `Some` holds a finished
        // left subtree.
        let mut pending: Vec<Option<Node<S>>> = Vec::new();

        let root = 'tree: loop {
            let is_leaf = bits.get(cursor).map(|bit| *bit).ok_or_else(truncated)?;
            cursor += 1;
            if !is_leaf {
                // Children of this node sit one level below the pending stack.
                if pending.len() >= MAX_DEPTH {
                    return Err(HuffmanError::InvalidTree(format!(
                        "tree is deeper than {} levels",
                        MAX_DEPTH
                    )));
                }
                pending.push(None);
                continue;
            }

            let end = cursor + S::BITS;
            let field = bits.get(cursor..end).ok_or_else(truncated)?;
            cursor = end;
            let raw = field
                .iter()
                .by_vals()
                .fold(0u32, |acc, bit| (acc << 1) | bit as u32);
            let symbol = S::from_raw(raw).ok_or_else(|| {
                HuffmanError::InvalidTree(format!("{:#x} is not a valid symbol", raw))
            })?;
            if !seen.insert(symbol) {
                return Err(HuffmanError::InvalidTree(format!(
                    "symbol {:?} appears more than once",
                    symbol
                )));
            }

            let mut node = Node::leaf(symbol, 0);
            loop {
                match pending.pop() {
                    None => break 'tree node,
                    Some(None) => {
                        pending.push(Some(node));
                        break;
                    }
                    Some(Some(left)) => node = Node::merge(left, node),
                }
            }
        };

        if cursor != bits.len() {
            return Err(HuffmanError::InvalidTree(format!(
                "{} bits follow the tree",
                bits.len() - cursor
            )));
        }
        Ok(CodeTree::from_root(root))
    }
}
