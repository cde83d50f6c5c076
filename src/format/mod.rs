//! Persistable forms of code trees and compressed buffers.

pub mod byte_stream;
pub mod container;
pub mod tree_format;

pub use container::{CompressedStream, MAGIC};
