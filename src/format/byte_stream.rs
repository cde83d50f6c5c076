// src/format/byte_stream.rs

//! Big-endian reading and writing of container fields.

use crate::utils::error::{HuffmanError, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Reads container fields from any `Read`.
pub trait ByteReader: Read {
    fn read_u8(&mut self) -> Result<u8> {
        Ok(ReadBytesExt::read_u8(self)?)
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(ReadBytesExt::read_u32::<BigEndian>(self)?)
    }

    /// Reads exactly `tag.len()` bytes and checks they equal `tag`.
    fn expect_tag(&mut self, tag: &[u8; 4]) -> Result<()> {
        let mut found = [0u8; 4];
        self.read_exact(&mut found)?;
        if &found != tag {
            return Err(HuffmanError::InvalidFormat(format!(
                "expected tag {:?}, found {:?}",
                String::from_utf8_lossy(tag),
                String::from_utf8_lossy(&found)
            )));
        }
        Ok(())
    }

    /// Reads a block prefixed by its u32 length.
    ///
    /// The length is not trusted for allocation: bytes are read until the
    /// declared length or end of input, whichever comes first.
    fn read_block(&mut self) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        let len = ByteReader::read_u32(self)? as u64;
        let mut block = Vec::new();
        self.by_ref().take(len).read_to_end(&mut block)?;
        if block.len() as u64 != len {
            return Err(HuffmanError::InvalidFormat(format!(
                "block declares {} bytes but only {} are present",
                len,
                block.len()
            )));
        }
        Ok(block)
    }
}

impl<R: Read + ?Sized> ByteReader for R {}

/// Writes container fields to any `Write`.
pub trait ByteWriter: Write {
    fn write_u8(&mut self, value: u8) -> Result<()> {
        Ok(WriteBytesExt::write_u8(self, value)?)
    }

    fn write_u32(&mut self, value: u32) -> Result<()> {
        Ok(WriteBytesExt::write_u32::<BigEndian>(self, value)?)
    }

    /// Writes `block` prefixed by its u32 length.
    fn write_block(&mut self, block: &[u8]) -> Result<()> {
        let len = u32::try_from(block.len()).map_err(|_| {
            HuffmanError::InvalidFormat(format!("block of {} bytes is too large", block.len()))
        })?;
        ByteWriter::write_u32(self, len)?;
        self.write_all(block)?;
        Ok(())
    }
}

impl<W: Write + ?Sized> ByteWriter for W {}
