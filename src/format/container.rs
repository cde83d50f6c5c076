//! Self-describing container for a compressed buffer and its code tree.
//!
//! ```text
//! offset  size  field
//! 0       4     magic "HUF1"
//! 4       1     symbol kind (1 = u8, 4 = char)
//! 5       4     symbol count of the original input
//! 9       4     serialized tree length T
//! 13      T     serialized tree
//! 13+T    4     buffer length B
//! 17+T    B     padded bit buffer
//! ```
//!
//! Integers are big-endian.

use crate::codec::bit_buffer::PaddedBitBuffer;
use crate::codec::huffman::{self, Compressed};
use crate::codec::symbol::Symbol;
use crate::codec::tree::CodeTree;
use crate::format::byte_stream::{ByteReader, ByteWriter};
use crate::utils::error::{HuffmanError, Result};
use std::io::{Cursor, Read, Write};

pub const MAGIC: &[u8; 4] = b"HUF1";

/// A compressed buffer bundled with the tree that decodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedStream<S: Symbol> {
    tree: CodeTree<S>,
    buffer: PaddedBitBuffer,
    symbols: u32,
}

impl<S: Symbol> CompressedStream<S> {
    pub fn new(tree: CodeTree<S>, buffer: PaddedBitBuffer, symbols: usize) -> Result<Self> {
        let symbols = u32::try_from(symbols).map_err(|_| {
            HuffmanError::InvalidFormat(format!("{} symbols exceed the container limit", symbols))
        })?;
        Ok(Self {
            tree,
            buffer,
            symbols,
        })
    }

    /// Compresses `input` straight into a container.
    pub fn compress(input: &[S]) -> Result<Self> {
        let (buffer, tree) = huffman::compress(input)?;
        Self::new(tree, buffer, input.len())
    }

    pub fn from_compressed(compressed: Compressed<S>) -> Result<Self> {
        Self::new(compressed.tree, compressed.buffer, compressed.stats.symbols)
    }

    pub fn tree(&self) -> &CodeTree<S> {
        &self.tree
    }

    pub fn buffer(&self) -> &PaddedBitBuffer {
        &self.buffer
    }

    /// Number of symbols the buffer decodes to.
    pub fn symbol_count(&self) -> usize {
        self.symbols as usize
    }

    pub fn into_parts(self) -> (PaddedBitBuffer, CodeTree<S>) {
        (self.buffer, self.tree)
    }

    /// Decodes the buffer and checks the symbol count recorded in the header.
    pub fn decode(&self) -> Result<Vec<S>> {
        let symbols = huffman::decompress(&self.buffer, Some(&self.tree))?;
        if symbols.len() != self.symbol_count() {
            return Err(HuffmanError::corrupt(format!(
                "decoded {} symbols, header records {}",
                symbols.len(),
                self.symbols
            )));
        }
        Ok(symbols)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(MAGIC)?;
        writer.write_u8(S::KIND)?;
        writer.write_u32(self.symbols)?;
        writer.write_block(&self.tree.to_bytes())?;
        writer.write_block(self.buffer.as_bytes())?;
        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(17 + self.buffer.len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        reader.expect_tag(MAGIC)?;

        let kind = reader.read_u8()?;
        if kind != S::KIND {
            return Err(HuffmanError::InvalidFormat(format!(
                "stream holds symbol kind {}, expected {}",
                kind,
                S::KIND
            )));
        }

        let symbols = reader.read_u32()?;
        let tree = CodeTree::from_bytes(&reader.read_block()?)?;
        let buffer = PaddedBitBuffer::from_bytes(reader.read_block()?);

        Ok(Self {
            tree,
            buffer,
            symbols,
        })
    }

    /// Parses a container that occupies all of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let stream = Self::read_from(&mut cursor)?;
        let consumed = cursor.position() as usize;
        if consumed != bytes.len() {
            return Err(HuffmanError::InvalidFormat(format!(
                "{} bytes follow the stream",
                bytes.len() - consumed
            )));
        }
        Ok(stream)
    }
}
