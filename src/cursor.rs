//! Bounds-checked buffer primitives: [`ByteCursor`] for reads, [`ByteWriter`]
//! for writes.
//!
//! # Reads
//! A cursor borrows the input buffer and advances a position. It never copies
//! payload bytes (callers get subslices of the input) and never reads past
//! the end: every failed read reports the offending offset, the requested
//! length, and what remained.
//!
//! # Writes
//! The writer appends to a growable buffer and cannot fail. Encoders that
//! know their exact output size use [`ByteWriter::with_capacity`] so nothing
//! reallocates mid-encode.
//!
//! # Endianness
//! Integer operations are generic over [`byteorder::ByteOrder`]; every
//! Rayform format is little-endian, so callers pass `LittleEndian`
//! throughout.

use byteorder::ByteOrder;

use crate::error::{Corruption, DecodeError};

// ── Length prefixes ──────────────────────────────────────────────────────────

/// Width of the length prefix used by the `read_prefixed_*` and
/// `write_prefixed_*` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LenWidth {
    U8,
    U16,
    U32,
}

impl LenWidth {
    /// Largest length the prefix can express.
    pub fn max_len(self) -> usize {
        match self {
            LenWidth::U8  => u8::MAX as usize,
            LenWidth::U16 => u16::MAX as usize,
            LenWidth::U32 => u32::MAX as usize,
        }
    }
}

// ── ByteCursor ───────────────────────────────────────────────────────────────

/// Read-only cursor over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read position from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Take the next `n` bytes as a subslice of the input, advancing the
    /// cursor past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::OutOfBounds {
                offset:    self.pos,
                requested: n,
                available: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Take everything from the position to the end of the buffer.
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let slice = &self.buf[self.pos..];
        self.pos = self.buf.len();
        slice
    }

    /// Advance the cursor by `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16<E: ByteOrder>(&mut self) -> Result<u16, DecodeError> {
        Ok(E::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32<E: ByteOrder>(&mut self) -> Result<u32, DecodeError> {
        Ok(E::read_u32(self.read_bytes(4)?))
    }

    pub fn read_u64<E: ByteOrder>(&mut self) -> Result<u64, DecodeError> {
        Ok(E::read_u64(self.read_bytes(8)?))
    }

    /// Read the next u32 without advancing. Dispatch uses this to match a
    /// magic word before committing to a format.
    pub fn peek_u32<E: ByteOrder>(&self) -> Result<u32, DecodeError> {
        if self.remaining() < 4 {
            return Err(DecodeError::OutOfBounds {
                offset:    self.pos,
                requested: 4,
                available: self.remaining(),
            });
        }
        Ok(E::read_u32(&self.buf[self.pos..self.pos + 4]))
    }

    fn read_len<E: ByteOrder>(&mut self, width: LenWidth) -> Result<usize, DecodeError> {
        Ok(match width {
            LenWidth::U8  => self.read_u8()? as usize,
            LenWidth::U16 => self.read_u16::<E>()? as usize,
            LenWidth::U32 => self.read_u32::<E>()? as usize,
        })
    }

    /// Read a length prefix of the given width, then that many bytes.
    pub fn read_prefixed_bytes<E: ByteOrder>(
        &mut self,
        width: LenWidth,
    ) -> Result<&'a [u8], DecodeError> {
        let len = self.read_len::<E>(width)?;
        self.read_bytes(len)
    }

    /// Read a length-prefixed UTF-8 string. The reported offset is that of
    /// the length prefix.
    pub fn read_prefixed_str<E: ByteOrder>(
        &mut self,
        width: LenWidth,
    ) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        let bytes = self.read_prefixed_bytes::<E>(width)?;
        std::str::from_utf8(bytes)
            .map_err(|_| Corruption::MalformedString { offset: start }.into())
    }
}

// ── ByteWriter ───────────────────────────────────────────────────────────────

/// Growable output buffer mirroring the cursor's read operations.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate for an encode whose exact output size is known.
    pub fn with_capacity(n: usize) -> Self {
        Self { buf: Vec::with_capacity(n) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16<E: ByteOrder>(&mut self, v: u16) {
        let mut tmp = [0u8; 2];
        E::write_u16(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
    }

    pub fn write_u32<E: ByteOrder>(&mut self, v: u32) {
        let mut tmp = [0u8; 4];
        E::write_u32(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
    }

    pub fn write_u64<E: ByteOrder>(&mut self, v: u64) {
        let mut tmp = [0u8; 8];
        E::write_u64(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a length prefix of the given width, then the bytes.
    ///
    /// # Panics
    /// Panics if `bytes.len()` exceeds what the prefix width can express.
    pub fn write_prefixed_bytes<E: ByteOrder>(&mut self, width: LenWidth, bytes: &[u8]) {
        assert!(
            bytes.len() <= width.max_len(),
            "length {} does not fit in a {:?} prefix",
            bytes.len(),
            width,
        );
        match width {
            LenWidth::U8  => self.write_u8(bytes.len() as u8),
            LenWidth::U16 => self.write_u16::<E>(bytes.len() as u16),
            LenWidth::U32 => self.write_u32::<E>(bytes.len() as u32),
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Write a length-prefixed UTF-8 string.
    ///
    /// # Panics
    /// Panics if the string's byte length exceeds what the prefix width can
    /// express.
    pub fn write_prefixed_str<E: ByteOrder>(&mut self, width: LenWidth, s: &str) {
        self.write_prefixed_bytes::<E>(width, s.as_bytes());
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
