// src/codec/mod.rs

//! Huffman prefix coding.
//!
//! ## Module Map
//!
//! - `symbol` - Alphabets the codec operates on (`u8`, `char`)
//! - `frequency` - Symbol counting
//! - `tree` - Greedy lowest-weight tree construction
//! - `code_table` - Code derivation and the symbol/code maps
//! - `bit_buffer` - Byte packing behind a padding header
//! - `huffman` - Compress/decompress and the session codec
//! - `params` - Codec configuration

pub mod bit_buffer;
pub mod code_table;
pub mod frequency;
pub mod huffman;
pub mod params;
pub mod symbol;
pub mod tree;

pub use bit_buffer::PaddedBitBuffer;
pub use code_table::{Code, CodeTable};
pub use frequency::FrequencyTable;
pub use huffman::{
    compress, decode_payload, decompress, decompress_with_table, encode_symbols, Compressed,
    CompressionStats, HuffmanCodec,
};
pub use params::CodecParams;
pub use symbol::Symbol;
pub use tree::{CodeTree, MAX_DEPTH, Node};
