//! A Rust library for lossless Huffman prefix coding.
//!
//! This crate builds a frequency-weighted code tree over the symbols of an
//! input, derives a prefix-free code per symbol, and packs the coded bits
//! into bytes behind a one-byte padding header.
//!
//! # Quick Start
//!
//! ```
//! use huffman_codec::{compress, decompress};
//!
//! let (buffer, tree) = compress(b"aabbbcc")?;
//! assert_eq!(buffer.as_bytes(), &[5, 0b1010_0001, 0b1110_0000]);
//!
//! // The buffer is not self-describing: keep the tree to decode it.
//! let restored = decompress(&buffer, Some(&tree))?;
//! assert_eq!(restored, b"aabbbcc");
//! # Ok::<(), huffman_codec::HuffmanError>(())
//! ```
//!
//! # Features
//!
//! - **Byte or character alphabets**: `u8` and `char` implement [`Symbol`]
//! - **Deterministic trees**: ties break on insertion order, so the same input
//!   always yields the same bytes
//! - **Session codec**: [`HuffmanCodec`] keeps its own code table for
//!   introspection and later decoding
//! - **Containers**: [`CompressedStream`] bundles the tree with the buffer for
//!   storage or transmission
//! - **Optional parallelism**: enable the `rayon` feature for parallel
//!   frequency counting on large inputs
//!
//! # Buffer Layout
//!
//! - **Byte 0**: number of padding bits at the end, always `1..=8`
//! - **Bytes 1..**: concatenated codes, most significant bit first

// Core modules
pub mod codec;
pub mod format;
pub mod utils;

// Compress/decompress API
pub use codec::{compress, decompress, decompress_with_table, Compressed, CompressionStats, HuffmanCodec};

// Data model
pub use codec::{Code, CodeTable, CodeTree, FrequencyTable, Node, PaddedBitBuffer, Symbol};

// Configuration
pub use codec::CodecParams;

// Containers
pub use format::CompressedStream;

// Error types
pub use utils::error::{HuffmanError, Result};

/// Version of the buffer and container layout.
pub const FORMAT_VERSION: u8 = 1;
