//! Container entries and their fixed 32-byte table records.
//!
//! Each record on the wire is `[u8; 16]` name (NUL-padded printable ASCII),
//! u32 payload offset, u32 payload size, u32 kind tag, u32 reserved word.
//! Offsets are relative to the container's data region and are recomputed on
//! every encode; they never appear in the in-memory [`Entry`].

use byteorder::LittleEndian;
use serde::{Deserialize, Serialize};

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;

/// Size of one entry record on the wire.
pub(crate) const RECORD_SIZE: usize = 32;
/// Size of the fixed name field inside a record.
pub(crate) const NAME_FIELD_LEN: usize = 16;

// ── EntryKind ────────────────────────────────────────────────────────────────

/// Payload class stored in each entry record.
///
/// Tags are frozen wire values; they are never reused. Archives in the wild
/// carry `Raw`; parsers reject tags outside this set rather than guessing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum EntryKind {
    /// Untyped bytes.
    #[default]
    Raw     = 0,
    /// Texture image payload.
    Texture = 1,
    /// Audio payload.
    Sound   = 2,
    /// Content definition payload.
    Content = 3,
    /// Object factory payload.
    Factory = 4,
    /// Nested package payload.
    Package = 5,
}

impl EntryKind {
    /// Wire tag written into the entry record.
    #[inline]
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Resolve a wire tag. Returns `None` for tags outside the known set.
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(EntryKind::Raw),
            1 => Some(EntryKind::Texture),
            2 => Some(EntryKind::Sound),
            3 => Some(EntryKind::Content),
            4 => Some(EntryKind::Factory),
            5 => Some(EntryKind::Package),
            _ => None,
        }
    }

    /// Human-readable name for diagnostics; never parsed.
    pub fn name(self) -> &'static str {
        match self {
            EntryKind::Raw     => "raw",
            EntryKind::Texture => "texture",
            EntryKind::Sound   => "sound",
            EntryKind::Content => "content",
            EntryKind::Factory => "factory",
            EntryKind::Package => "package",
        }
    }
}

// ── Entry ────────────────────────────────────────────────────────────────────

/// One named, typed payload inside an RPK container.
///
/// `reserved` is the trailing record word: real archives carry zero and the
/// value round-trips verbatim either way. Names are at most 16 bytes of
/// printable ASCII on the wire; longer names are truncated at encode with a
/// warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name:     String,
    pub kind:     EntryKind,
    pub payload:  Vec<u8>,
    pub reserved: u32,
}

impl Entry {
    /// New entry with the reserved word zeroed.
    pub fn new(name: impl Into<String>, kind: EntryKind, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind,
            payload,
            reserved: 0,
        }
    }

    /// Name field as written to the wire: NUL-padded to 16 bytes, truncated
    /// (with a warning) when longer.
    pub(crate) fn wire_name(&self) -> [u8; NAME_FIELD_LEN] {
        let bytes = self.name.as_bytes();
        if bytes.len() > NAME_FIELD_LEN {
            tracing::warn!(name = %self.name, "entry name longer than 16 bytes, truncating");
        }
        let take = bytes.len().min(NAME_FIELD_LEN);
        let mut field = [0u8; NAME_FIELD_LEN];
        field[..take].copy_from_slice(&bytes[..take]);
        field
    }
}

// ── RawRecord ────────────────────────────────────────────────────────────────

/// One 32-byte table record exactly as it sits on the wire. Offsets are
/// relative to the data region; validation happens when records become
/// [`Entry`] values.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawRecord {
    pub name:     [u8; NAME_FIELD_LEN],
    pub offset:   u32,
    pub size:     u32,
    pub kind_tag: u32,
    pub reserved: u32,
}

impl RawRecord {
    pub fn read(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut name = [0u8; NAME_FIELD_LEN];
        name.copy_from_slice(cur.read_bytes(NAME_FIELD_LEN)?);
        Ok(Self {
            name,
            offset:   cur.read_u32::<LittleEndian>()?,
            size:     cur.read_u32::<LittleEndian>()?,
            kind_tag: cur.read_u32::<LittleEndian>()?,
            reserved: cur.read_u32::<LittleEndian>()?,
        })
    }

    pub fn write(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.name);
        w.write_u32::<LittleEndian>(self.offset);
        w.write_u32::<LittleEndian>(self.size);
        w.write_u32::<LittleEndian>(self.kind_tag);
        w.write_u32::<LittleEndian>(self.reserved);
    }

    pub fn from_entry(entry: &Entry, offset: u32) -> Self {
        Self {
            name:     entry.wire_name(),
            offset,
            size:     entry.payload.len() as u32,
            kind_tag: entry.kind.tag(),
            reserved: entry.reserved,
        }
    }

    /// Decode and validate the name field: the bytes before the first NUL
    /// must be non-empty printable ASCII, and every byte after it zero.
    pub fn name_str(&self, index: usize) -> Result<&str, DecodeError> {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_FIELD_LEN);
        let (name, padding) = self.name.split_at(end);
        if name.is_empty() {
            return Err(DecodeError::InvalidEntryName {
                index,
                reason: "name field is empty".into(),
            });
        }
        if let Some(&bad) = name.iter().find(|&&b| !(0x20..=0x7E).contains(&b)) {
            return Err(DecodeError::InvalidEntryName {
                index,
                reason: format!("non-printable byte {bad:#04x} in name field"),
            });
        }
        if padding.iter().any(|&b| b != 0) {
            return Err(DecodeError::InvalidEntryName {
                index,
                reason: "nonzero bytes after the name terminator".into(),
            });
        }
        std::str::from_utf8(name).map_err(|_| DecodeError::InvalidEntryName {
            index,
            reason: "name field is not valid UTF-8".into(),
        })
    }

    /// Resolve the stored kind tag, failing with the entry index on tags
    /// outside the known set.
    pub fn kind(&self, index: usize) -> Result<EntryKind, DecodeError> {
        EntryKind::from_tag(self.kind_tag).ok_or(DecodeError::UnknownEntryKind {
            index,
            tag: self.kind_tag,
        })
    }
}
