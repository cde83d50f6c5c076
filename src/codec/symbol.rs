//! Symbol alphabets the codec can operate on.
//!
//! The codec is generic over the unit it compresses. Two alphabets are
//! provided:
//!
//! - `u8`: raw bytes, stored as 8 bits in a serialized tree
//! - `char`: Unicode scalar values, stored as 32 bits in a serialized tree
//!
//! The alphabet is part of the format. A tree written for one alphabet is
//! rejected when read back as the other.

use std::fmt::Debug;
use std::hash::Hash;

/// An atomic unit of the input alphabet.
pub trait Symbol: Copy + Ord + Hash + Debug + Send + Sync + 'static {
    /// Tag written into containers to identify the alphabet.
    const KIND: u8;

    /// Width of one symbol inside a serialized tree.
    const BITS: usize;

    /// Returns the raw value written into a serialized tree.
    fn to_raw(self) -> u32;

    /// Rebuilds a symbol from its raw value, or `None` if the value is not
    /// a member of the alphabet.
    fn from_raw(raw: u32) -> Option<Self>;

    /// Number of bytes this symbol occupies in its natural encoding.
    fn encoded_len(self) -> usize;
}

impl Symbol for u8 {
    const KIND: u8 = 1;
    const BITS: usize = 8;

    #[inline]
    fn to_raw(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_raw(raw: u32) -> Option<Self> {
        u8::try_from(raw).ok()
    }

    #[inline]
    fn encoded_len(self) -> usize {
        1
    }
}

impl Symbol for char {
    const KIND: u8 = 4;
    const BITS: usize = 32;

    #[inline]
    fn to_raw(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_raw(raw: u32) -> Option<Self> {
        char::from_u32(raw)
    }

    #[inline]
    fn encoded_len(self) -> usize {
        self.len_utf8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_raw_values() {
        assert_eq!(0xABu8.to_raw(), 0xAB);
        assert_eq!(u8::from_raw(0xFF), Some(0xFF));
        assert_eq!(u8::from_raw(0x100), None);
    }

    #[test]
    fn test_char_raw_values() {
        assert_eq!('é'.to_raw(), 0xE9);
        assert_eq!(char::from_raw(0x1F600), Some('😀'));
        // Surrogates are not scalar values
        assert_eq!(char::from_raw(0xD800), None);
        assert_eq!('é'.encoded_len(), 2);
        assert_eq!('a'.encoded_len(), 1);
    }

    #[test]
    fn test_kinds_differ() {
        assert_ne!(<u8 as Symbol>::KIND, <char as Symbol>::KIND);
    }
}
