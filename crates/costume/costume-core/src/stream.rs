//! Typed little-endian reads over costume payload bytes.
//!
//! The loader only needs sequential reads; hosts with their own archive
//! readers implement [`ByteStream`] directly.

use crate::error::{CostumeError, Result};

/// Sequential little-endian reader consumed by the chore loader.
pub trait ByteStream {
    /// Read exactly `n` bytes.
    fn read_bytes(&mut self, n: usize, what: &'static str) -> Result<&[u8]>;

    /// Bytes left before the end of the payload.
    fn remaining(&self) -> usize;

    fn read_u32_le(&mut self, what: &'static str) -> Result<u32> {
        let b = self.read_bytes(4, what)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_i32_le(&mut self, what: &'static str) -> Result<i32> {
        let b = self.read_bytes(4, what)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_f32_le(&mut self, what: &'static str) -> Result<f32> {
        let b = self.read_bytes(4, what)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// [`ByteStream`] over an in-memory slice.
#[derive(Debug, Clone)]
pub struct SliceStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ByteStream for SliceStream<'_> {
    fn read_bytes(&mut self, n: usize, what: &'static str) -> Result<&[u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(CostumeError::Truncated {
                what,
                needed: n,
                remaining,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.data[start..self.pos])
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}
