//! Format registry and dispatch: one magic word, one codec.
//!
//! # Identity rules
//! Every Rayform format is identified by its leading u32 magic word
//! (little-endian). Magic values are frozen: they are never reused and never
//! negotiated at runtime. A buffer whose magic matches no registered format
//! fails with [`DecodeError::UnrecognizedFormat`]; there is no pass-through
//! variant for unknown content, so nothing decodes by accident.
//!
//! # Dispatch
//! [`Format::from_bytes`] peeks the magic without consuming it, resolves the
//! codec through the registry, then consumes the magic and hands the rest of
//! the cursor to the variant codec. [`Format::to_bytes`] re-emits the right
//! magic first (for FTY, the revision seen at decode).

use byteorder::LittleEndian;
use serde::{Deserialize, Serialize};

use crate::asset::{
    Fty, Rfc, Rfi, Wav, FTY_MAGIC_V1, FTY_MAGIC_V2, RFC_MAGIC, RFI_MAGIC, WAV_MAGIC,
};
use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;
use crate::rpk::{self, Rpk};

// ── Registry ─────────────────────────────────────────────────────────────────

/// Discriminant for every registered format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    Rpk,
    Fty,
    Rfc,
    Rfi,
    Wav,
}

impl FormatKind {
    /// Resolve a magic word to its format. Returns `None` when the value is
    /// not in the registry.
    pub fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            rpk::MAGIC                  => Some(FormatKind::Rpk),
            FTY_MAGIC_V1 | FTY_MAGIC_V2 => Some(FormatKind::Fty),
            RFC_MAGIC                   => Some(FormatKind::Rfc),
            RFI_MAGIC                   => Some(FormatKind::Rfi),
            WAV_MAGIC                   => Some(FormatKind::Wav),
            _                           => None,
        }
    }

    /// Human-readable name for diagnostics; never parsed.
    pub fn name(self) -> &'static str {
        match self {
            FormatKind::Rpk => "rpk",
            FormatKind::Fty => "fty",
            FormatKind::Rfc => "rfc",
            FormatKind::Rfi => "rfi",
            FormatKind::Wav => "wav",
        }
    }

    /// Sniff a buffer's leading magic without decoding anything. Classifies
    /// container entry payloads for display; four bytes are enough.
    pub fn detect(buf: &[u8]) -> Option<Self> {
        let cur = ByteCursor::new(buf);
        cur.peek_u32::<LittleEndian>().ok().and_then(Self::from_magic)
    }
}

// ── Format ───────────────────────────────────────────────────────────────────

/// A fully decoded Rayform buffer.
///
/// Decoding always yields a fresh object graph owning all of its bytes;
/// nothing borrows the input buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    Rpk(Rpk),
    Fty(Fty),
    Rfc(Rfc),
    Rfi(Rfi),
    Wav(Wav),
}

impl Format {
    /// Decode a buffer: peek the magic word, pick the codec, decode the
    /// rest.
    ///
    /// Fails with [`DecodeError::UnrecognizedFormat`] when the magic matches
    /// no registered format, and with the variant codec's own error when the
    /// body is malformed. No partial value is ever returned.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut cur = ByteCursor::new(buf);
        let magic = cur.peek_u32::<LittleEndian>()?;
        let kind = FormatKind::from_magic(magic)
            .ok_or(DecodeError::UnrecognizedFormat { magic })?;
        cur.skip(4)?;
        Ok(match kind {
            FormatKind::Rpk => Format::Rpk(Rpk::decode(&mut cur)?),
            FormatKind::Fty => Format::Fty(Fty::decode(magic, &mut cur)?),
            FormatKind::Rfc => Format::Rfc(Rfc::decode(&mut cur)),
            FormatKind::Rfi => Format::Rfi(Rfi::decode(&mut cur)),
            FormatKind::Wav => Format::Wav(Wav::decode(&mut cur)),
        })
    }

    /// Encode back to bytes. Total: every in-memory value has an encoding.
    ///
    /// The output is preallocated to [`Format::encoded_len`] and never
    /// reallocates mid-encode.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(self.encoded_len());
        w.write_u32::<LittleEndian>(self.magic());
        match self {
            Format::Rpk(rpk) => rpk.encode(&mut w),
            Format::Fty(fty) => fty.encode(&mut w),
            Format::Rfc(rfc) => rfc.encode(&mut w),
            Format::Rfi(rfi) => rfi.encode(&mut w),
            Format::Wav(wav) => wav.encode(&mut w),
        }
        w.into_bytes()
    }

    /// Magic word this value encodes with.
    pub fn magic(&self) -> u32 {
        match self {
            Format::Rpk(_)   => rpk::MAGIC,
            Format::Fty(fty) => fty.version.magic(),
            Format::Rfc(_)   => RFC_MAGIC,
            Format::Rfi(_)   => RFI_MAGIC,
            Format::Wav(_)   => WAV_MAGIC,
        }
    }

    /// Which registered format this value is.
    pub fn kind(&self) -> FormatKind {
        match self {
            Format::Rpk(_) => FormatKind::Rpk,
            Format::Fty(_) => FormatKind::Fty,
            Format::Rfc(_) => FormatKind::Rfc,
            Format::Rfi(_) => FormatKind::Rfi,
            Format::Wav(_) => FormatKind::Wav,
        }
    }

    /// Exact length of [`Format::to_bytes`]'s output.
    pub fn encoded_len(&self) -> usize {
        match self {
            Format::Rpk(rpk) => rpk.encoded_len(),
            Format::Fty(fty) => fty.encoded_len(),
            Format::Rfc(rfc) => rfc.encoded_len(),
            Format::Rfi(rfi) => rfi.encoded_len(),
            Format::Wav(wav) => wav.encoded_len(),
        }
    }
}
