//! Prefix code derivation and lookup.

use crate::codec::symbol::Symbol;
use crate::codec::tree::{CodeTree, Node};
use crate::utils::error::{HuffmanError, Result};
use bitvec::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single prefix code: the root-to-leaf path, `0` for left and `1` for right.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: BitVec<u8, Msb0>,
}

impl Code {
    /// Creates an empty code.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if `self` is a proper prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() < other.len() && other.bits.starts_with(self.bits.as_bitslice())
    }

    pub(crate) fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub(crate) fn clear(&mut self) {
        self.bits.clear();
    }

    fn extended(&self, bit: bool) -> Self {
        let mut next = self.clone();
        next.push(bit);
        next
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

impl std::str::FromStr for Code {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self> {
        let mut code = Code::new();
        for c in s.chars() {
            match c {
                '0' => code.push(false),
                '1' => code.push(true),
                other => {
                    return Err(HuffmanError::InvalidFormat(format!(
                        "'{}' is not a binary digit",
                        other
                    )));
                }
            }
        }
        Ok(code)
    }
}

/// Symbol-to-code mapping together with its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    forward: BTreeMap<S, Code>,
    inverse: HashMap<Code, S>,
    max_len: usize,
}

impl<S: Symbol> CodeTable<S> {
    /// Derives the code of every leaf in `tree`.
    ///
    /// Walks the tree with an explicit stack of `(node, path)` pairs, so
    /// heavily skewed trees do not recurse.
    pub fn from_tree(tree: &CodeTree<S>) -> Self {
        let mut forward = BTreeMap::new();
        let mut inverse = HashMap::with_capacity(tree.leaf_count());
        let mut max_len = 0;

        let mut stack: Vec<(&Node<S>, Code)> = vec![(tree.root(), Code::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    max_len = max_len.max(path.len());
                    forward.insert(*symbol, path.clone());
                    inverse.insert(path, *symbol);
                }
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        stack.push((&**right, path.extended(true)));
                    }
                    stack.push((&**left, path.extended(false)));
                }
            }
        }

        Self {
            forward,
            inverse,
            max_len,
        }
    }

    /// Builds a table from explicit `(symbol, code)` pairs and checks that
    /// it is a usable prefix code.
    pub fn from_codes<I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Code)>,
    {
        let mut forward = BTreeMap::new();
        let mut inverse = HashMap::new();
        let mut max_len = 0;
        for (symbol, code) in codes {
            max_len = max_len.max(code.len());
            if let Some(previous) = inverse.insert(code.clone(), symbol) {
                return Err(HuffmanError::InvalidTree(format!(
                    "code {} assigned to both {:?} and {:?}",
                    code, previous, symbol
                )));
            }
            if forward.insert(symbol, code).is_some() {
                return Err(HuffmanError::InvalidTree(format!(
                    "symbol {:?} has more than one code",
                    symbol
                )));
            }
        }
        let table = Self {
            forward,
            inverse,
            max_len,
        };
        table.verify_prefix_free()?;
        Ok(table)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.max_len
    }

    pub fn code_for(&self, symbol: &S) -> Option<&Code> {
        self.forward.get(symbol)
    }

    pub fn symbol_for(&self, code: &Code) -> Option<S> {
        self.inverse.get(code).copied()
    }

    /// Iterates `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &Code)> + '_ {
        self.forward.iter().map(|(&s, c)| (s, c))
    }

    /// The `{symbol: "0101"}` view used for display and diagnostics.
    pub fn to_display_map(&self) -> BTreeMap<S, String> {
        self.forward
            .iter()
            .map(|(&s, c)| (s, c.to_string()))
            .collect()
    }

    /// Checks that every code is non-empty, unique, and not a prefix of
    /// another code.
    pub fn verify_prefix_free(&self) -> Result<()> {
        if self.forward.len() != self.inverse.len() {
            return Err(HuffmanError::InvalidTree(
                "code table directions disagree".to_string(),
            ));
        }

        let mut rendered: Vec<String> = self.forward.values().map(Code::to_string).collect();
        if rendered.iter().any(String::is_empty) {
            return Err(HuffmanError::InvalidTree("empty code in table".to_string()));
        }

        // In lexicographic order a prefix sorts directly before the codes it
        // prefixes, so adjacent pairs are enough.
        rendered.sort_unstable();
        for pair in rendered.windows(2) {
            if pair[1].starts_with(pair[0].as_str()) {
                return Err(HuffmanError::InvalidTree(format!(
                    "code {} is a prefix of {}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(())
    }
}
