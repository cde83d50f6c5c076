// src/utils/error.rs

use thiserror::Error;

/// The primary error type for all operations in the Huffman codec.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Compression was requested for an empty symbol sequence.
    #[error("Cannot compress an empty input")]
    EmptyInput,

    /// Decoding was attempted without a code tree or code table.
    #[error("No code table available for decoding")]
    MissingCodeTable,

    /// A symbol to be encoded has no code in the supplied table.
    #[error("Symbol {0} has no code in the table")]
    UnknownSymbol(String),

    /// The payload does not decode cleanly under the supplied code table.
    #[error("Corrupt stream: {0}")]
    CorruptStream(String),

    /// The padding header is outside `1..=8` or larger than the buffer.
    #[error("Malformed padding header: {padding} padding bits with {available_bits} bits available")]
    MalformedHeader { padding: u8, available_bits: usize },

    /// A serialized code tree could not be rebuilt.
    #[error("Invalid code tree: {0}")]
    InvalidTree(String),

    /// A serialized container is not in the expected layout.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// An error occurred while reading or writing a container.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffmanError {
    /// Convenience constructor for the `CorruptStream` variant.
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        HuffmanError::CorruptStream(msg.into())
    }
}

/// A specialized `Result` type for codec operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = HuffmanError::MalformedHeader {
            padding: 9,
            available_bits: 16,
        };
        assert_eq!(
            err.to_string(),
            "Malformed padding header: 9 padding bits with 16 bits available"
        );
        assert_eq!(
            HuffmanError::corrupt("dangling bits").to_string(),
            "Corrupt stream: dangling bits"
        );
    }

    #[test]
    fn test_io_conversion() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(HuffmanError::Io(_))));
    }
}
