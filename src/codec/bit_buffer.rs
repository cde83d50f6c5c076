//! Byte packing of code bit strings behind a padding header.
//!
//! Layout:
//!
//! ```text
//! byte 0      padding count P, always 1..=8
//! byte 1..    payload bits, MSB first, followed by P zero bits
//! ```
//!
//! A payload whose length is already a multiple of 8 gets a full byte of
//! padding, so the header is never zero.

use crate::utils::error::{HuffmanError, Result};
use bitvec::prelude::*;

/// A packed bit string prefixed by its padding count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PaddedBitBuffer {
    bytes: Vec<u8>,
}

impl PaddedBitBuffer {
    /// Packs `bits` MSB-first behind a padding header.
    pub fn pack(bits: &BitSlice<u8, Msb0>) -> Self {
        let padding = Self::padding_for(bits.len());

        let mut packed: BitVec<u8, Msb0> = BitVec::with_capacity(8 + bits.len() + padding as usize);
        packed.extend_from_bitslice(padding.view_bits::<Msb0>());
        packed.extend_from_bitslice(bits);
        packed.resize(packed.len() + padding as usize, false);
        debug_assert_eq!(packed.len() % 8, 0);

        Self {
            bytes: packed.into_vec(),
        }
    }

    /// Number of padding bits appended to a payload of `payload_bits` bits.
    pub fn padding_for(payload_bits: usize) -> u8 {
        (8 - payload_bits % 8) as u8
    }

    /// Wraps raw bytes. Validation happens when the payload is read.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total length in bytes, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw header byte, if present.
    pub fn padding(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Returns the logical payload with header and padding stripped.
    ///
    /// Fails with `MalformedHeader` when the header byte is missing, lies
    /// outside `1..=8`, or declares more padding than the buffer holds.
    pub fn payload(&self) -> Result<&BitSlice<u8, Msb0>> {
        let Some((&padding, rest)) = self.bytes.split_first() else {
            return Err(HuffmanError::MalformedHeader {
                padding: 0,
                available_bits: 0,
            });
        };

        let available_bits = rest.len() * 8;
        if !(1..=8).contains(&padding) || padding as usize > available_bits {
            return Err(HuffmanError::MalformedHeader {
                padding,
                available_bits,
            });
        }

        Ok(&rest.view_bits::<Msb0>()[..available_bits - padding as usize])
    }
}

impl From<Vec<u8>> for PaddedBitBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for PaddedBitBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitVec<u8, Msb0> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_pack_eleven_bits() {
        let buffer = PaddedBitBuffer::pack(&bits("10100001111"));
        assert_eq!(buffer.as_bytes(), &[5, 0b1010_0001, 0b1110_0000]);
        assert_eq!(buffer.payload().unwrap(), bits("10100001111").as_bitslice());
    }

    #[test]
    fn test_aligned_payload_gets_full_padding_byte() {
        let buffer = PaddedBitBuffer::pack(&bits("11001100"));
        assert_eq!(buffer.as_bytes(), &[8, 0b1100_1100, 0]);
        assert_eq!(buffer.payload().unwrap().len(), 8);
    }

    #[test]
    fn test_empty_payload() {
        let buffer = PaddedBitBuffer::pack(BitSlice::empty());
        assert_eq!(buffer.as_bytes(), &[8, 0]);
        assert!(buffer.payload().unwrap().is_empty());
    }

    #[test]
    fn test_padding_always_in_range() {
        for n in 0..64 {
            let p = PaddedBitBuffer::padding_for(n);
            assert!((1..=8).contains(&p));
            assert_eq!((n + p as usize) % 8, 0);
        }
    }

    #[test]
    fn test_padding_bits_are_ignored() {
        // Non-zero filler in the padding region must not leak into the payload.
        let buffer = PaddedBitBuffer::from_bytes(vec![3, 0b1010_0111]);
        assert_eq!(buffer.payload().unwrap(), bits("10100").as_bitslice());
    }

    #[test]
    fn test_header_out_of_range() {
        for header in [0u8, 9, 255] {
            let buffer = PaddedBitBuffer::from_bytes(vec![header, 0xFF, 0xFF]);
            assert!(matches!(
                buffer.payload(),
                Err(HuffmanError::MalformedHeader { padding, available_bits: 16 }) if padding == header
            ));
        }
    }

    #[test]
    fn test_header_exceeds_buffer() {
        let buffer = PaddedBitBuffer::from_bytes(vec![4]);
        assert!(matches!(
            buffer.payload(),
            Err(HuffmanError::MalformedHeader {
                padding: 4,
                available_bits: 0
            })
        ));
    }

    #[test]
    fn test_missing_header() {
        let buffer = PaddedBitBuffer::default();
        assert!(buffer.is_empty());
        assert_eq!(buffer.padding(), None);
        assert!(matches!(
            buffer.payload(),
            Err(HuffmanError::MalformedHeader { .. })
        ));
    }
}
