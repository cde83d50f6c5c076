//! Huffman compression and decompression.
//!
//! Compression counts the input, builds a [`CodeTree`], derives its
//! [`CodeTable`] and packs the concatenated codes into a [`PaddedBitBuffer`].
//! The tree is returned next to the buffer: the buffer carries no code
//! information and can only be decoded with the tree (or table) that
//! produced it.

use crate::codec::bit_buffer::PaddedBitBuffer;
use crate::codec::code_table::{Code, CodeTable};
use crate::codec::params::CodecParams;
use crate::codec::symbol::Symbol;
use crate::codec::tree::CodeTree;
use crate::utils::error::{HuffmanError, Result};
use bitvec::prelude::*;

/// Size accounting for one compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Number of input symbols
    pub symbols: usize,
    /// Input size with each symbol at its natural width
    pub original_bytes: usize,
    /// Size of the padded buffer, header included
    pub compressed_bytes: usize,
    /// Logical payload length in bits
    pub payload_bits: usize,
    /// Padding bits appended after the payload
    pub padding_bits: u8,
}

impl CompressionStats {
    /// Compressed size divided by original size.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.compressed_bytes as f64 / self.original_bytes as f64
    }

    /// Average payload bits spent per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            return 0.0;
        }
        self.payload_bits as f64 / self.symbols as f64
    }
}

/// Output of a compression session.
#[derive(Debug, Clone)]
pub struct Compressed<S: Symbol> {
    pub buffer: PaddedBitBuffer,
    pub tree: CodeTree<S>,
    pub stats: CompressionStats,
}

/// Concatenates the code of every input symbol, in input order.
pub fn encode_symbols<S: Symbol>(input: &[S], table: &CodeTable<S>) -> Result<BitVec<u8, Msb0>> {
    let mut bits = BitVec::with_capacity(input.len());
    for symbol in input {
        let code = table
            .code_for(symbol)
            .ok_or_else(|| HuffmanError::UnknownSymbol(format!("{:?}", symbol)))?;
        bits.extend_from_bitslice(code.bits());
    }
    Ok(bits)
}

/// Decodes a payload by growing a candidate code one bit at a time and
/// emitting a symbol whenever the candidate matches the inverse table.
pub fn decode_payload<S: Symbol>(payload: &BitSlice<u8, Msb0>, table: &CodeTable<S>) -> Result<Vec<S>> {
    if table.is_empty() {
        return Err(HuffmanError::MissingCodeTable);
    }

    let mut out = Vec::new();
    let mut candidate = Code::new();
    for (position, bit) in payload.iter().by_vals().enumerate() {
        candidate.push(bit);
        if let Some(symbol) = table.symbol_for(&candidate) {
            out.push(symbol);
            candidate.clear();
        } else if candidate.len() >= table.max_code_len() {
            return Err(HuffmanError::corrupt(format!(
                "bits {} ending at payload bit {} match no code",
                candidate, position
            )));
        }
    }

    if !candidate.is_empty() {
        return Err(HuffmanError::corrupt(format!(
            "{} trailing bits ({}) do not form a complete code",
            candidate.len(),
            candidate
        )));
    }
    Ok(out)
}

/// Compresses `input`, returning the padded buffer and the tree needed to
/// decode it.
pub fn compress<S: Symbol>(input: &[S]) -> Result<(PaddedBitBuffer, CodeTree<S>)> {
    let compressed = HuffmanCodec::new().compress(input)?;
    Ok((compressed.buffer, compressed.tree))
}

/// Decompresses `buffer` with the tree returned by [`compress`].
pub fn decompress<S: Symbol>(buffer: &PaddedBitBuffer, tree: Option<&CodeTree<S>>) -> Result<Vec<S>> {
    let tree = tree.ok_or(HuffmanError::MissingCodeTable)?;
    let table = CodeTable::from_tree(tree);
    decompress_with_table(buffer, Some(&table))
}

/// Decompresses `buffer` with an already derived code table.
pub fn decompress_with_table<S: Symbol>(
    buffer: &PaddedBitBuffer,
    table: Option<&CodeTable<S>>,
) -> Result<Vec<S>> {
    let table = table.ok_or(HuffmanError::MissingCodeTable)?;
    let payload = buffer.payload()?;
    let symbols = decode_payload(payload, table).inspect_err(|err| {
        log::warn!("rejected {} byte stream: {}", buffer.len(), err);
    })?;

    log::debug!(
        "decompressed {} payload bits into {} symbols",
        payload.len(),
        symbols.len()
    );
    Ok(symbols)
}

/// A compression session owning its code table.
///
/// `compress` replaces the session's table; `decompress` decodes with
/// whichever table was derived or loaded last. Sessions share nothing, so
/// independent sessions can run on separate threads without locking.
#[derive(Debug, Clone)]
pub struct HuffmanCodec<S: Symbol> {
    params: CodecParams,
    table: Option<CodeTable<S>>,
}

impl<S: Symbol> Default for HuffmanCodec<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> HuffmanCodec<S> {
    /// Creates a session with default parameters and no code table.
    pub fn new() -> Self {
        Self::with_params(CodecParams::default())
    }

    /// Creates a session with the given parameters.
    pub fn with_params(params: CodecParams) -> Self {
        Self { params, table: None }
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// The code table of this session, if one has been derived or loaded.
    pub fn codes(&self) -> Option<&CodeTable<S>> {
        self.table.as_ref()
    }

    /// Compresses `input` and keeps its code table for later decoding.
    pub fn compress(&mut self, input: &[S]) -> Result<Compressed<S>> {
        let tree = CodeTree::from_symbols_with(input, &self.params)?;
        let table = self.derive_table(&tree)?;

        let bits = encode_symbols(input, &table)?;
        let buffer = PaddedBitBuffer::pack(&bits);

        let stats = CompressionStats {
            symbols: input.len(),
            original_bytes: input.iter().map(|s| s.encoded_len()).sum(),
            compressed_bytes: buffer.len(),
            payload_bits: bits.len(),
            padding_bits: PaddedBitBuffer::padding_for(bits.len()),
        };
        log::debug!(
            "compressed {} symbols ({} distinct) into {} bytes: {} payload bits, {} padding, ratio {:.3}",
            stats.symbols,
            table.len(),
            stats.compressed_bytes,
            stats.payload_bits,
            stats.padding_bits,
            stats.ratio()
        );

        self.table = Some(table);
        Ok(Compressed { buffer, tree, stats })
    }

    /// Rebuilds the session's code table from a retained tree.
    pub fn load_tree(&mut self, tree: &CodeTree<S>) -> Result<()> {
        self.table = Some(self.derive_table(tree)?);
        Ok(())
    }

    /// Replaces the session's code table.
    pub fn load_table(&mut self, table: CodeTable<S>) {
        self.table = Some(table);
    }

    /// Drops the session's code table.
    pub fn clear(&mut self) {
        self.table = None;
    }

    /// Decompresses `buffer` with the session's code table.
    pub fn decompress(&self, buffer: &PaddedBitBuffer) -> Result<Vec<S>> {
        decompress_with_table(buffer, self.table.as_ref())
    }

    fn derive_table(&self, tree: &CodeTree<S>) -> Result<CodeTable<S>> {
        let table = CodeTable::from_tree(tree);
        if self.params.verify_codes {
            table.verify_prefix_free()?;
        }
        Ok(table)
    }
}
