//! RPK container codec.
//!
//! # Layout
//! ```text
//! u32   magic        0xAFBF0C01
//! u32   table size   entry count * 32 bytes
//!       records      16-byte name, u32 offset, u32 size,
//!                    u32 kind tag, u32 reserved
//!       data region  payloads back to back, in table order
//! ```
//! Offsets are relative to the start of the data region (the byte after the
//! last record). Every field is little-endian. The format's u32 fields cap
//! offsets and payload sizes at 4 GiB.
//!
//! # Validation
//! Decode is all-or-nothing. Misaligned or truncated tables, out-of-range
//! spans, overlapping spans, duplicate names, malformed names, and unknown
//! kind tags each fail the whole decode with a precise error. Data-region
//! bytes referenced by no span (slack) are tolerated on decode; encode never
//! emits slack, so byte-stability holds for every buffer this library
//! writes.
//!
//! # Encode
//! Offsets stored in a decoded value are never reused: encode lays payloads
//! back to back in entry order and recomputes every offset and size from the
//! payloads themselves. Encoding cannot fail.

use std::collections::HashMap;
use std::ops::Range;

use byteorder::LittleEndian;
use serde::{Deserialize, Serialize};

use crate::cursor::{ByteCursor, ByteWriter};
use crate::entry::{Entry, EntryKind, RawRecord, RECORD_SIZE};
use crate::error::{Corruption, DecodeError};

/// Leading magic word of an RPK container.
pub const MAGIC: u32 = 0xAFBF_0C01;

/// Bytes before the entry table: magic word + table size field.
pub(crate) const HEADER_SIZE: usize = 8;

// ── Rpk ──────────────────────────────────────────────────────────────────────

/// A decoded RPK container: an ordered sequence of named, typed entries.
///
/// Order is significant and preserved exactly. Decode rejects duplicate
/// names, so [`Rpk::get`] is unambiguous on decoded values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rpk {
    pub entries: Vec<Entry>,
}

impl Rpk {
    pub fn new() -> Self {
        Self::default()
    }

    /// First entry with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.name == name)
    }

    /// Exact encoded size of this container, magic word included.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE
            + self.entries.len() * RECORD_SIZE
            + self.entries.iter().map(|e| e.payload.len()).sum::<usize>()
    }

    /// Decode the container body; the cursor sits just past the magic word.
    pub(crate) fn decode(cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let views = read_and_validate(cur)?;
        let data = cur.read_to_end();
        let entries = views
            .into_iter()
            .map(|v| Entry {
                name:     v.name,
                kind:     v.kind,
                payload:  data[v.span].to_vec(),
                reserved: v.reserved,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Encode the container body after the magic word: table size, records
    /// with recomputed offsets, then payloads back to back in entry order.
    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.write_u32::<LittleEndian>((self.entries.len() * RECORD_SIZE) as u32);
        let mut offset = 0u64;
        for entry in &self.entries {
            RawRecord::from_entry(entry, offset as u32).write(w);
            offset += entry.payload.len() as u64;
        }
        for entry in &self.entries {
            w.write_bytes(&entry.payload);
        }
    }

    /// Table-only view of a full container buffer: validates the header and
    /// the entire entry table exactly as [`crate::Format::from_bytes`] does,
    /// but copies no payloads.
    pub fn list_entries(buf: &[u8]) -> Result<Vec<EntryInfo>, DecodeError> {
        let mut cur = ByteCursor::new(buf);
        let magic = cur.read_u32::<LittleEndian>()?;
        if magic != MAGIC {
            return Err(DecodeError::UnrecognizedFormat { magic });
        }
        let views = read_and_validate(&mut cur)?;
        Ok(views
            .into_iter()
            .map(|v| EntryInfo {
                name:   v.name,
                kind:   v.kind,
                offset: v.span.start as u32,
                size:   (v.span.end - v.span.start) as u32,
            })
            .collect())
    }
}

// ── EntryInfo ────────────────────────────────────────────────────────────────

/// Lightweight descriptor returned by [`Rpk::list_entries`].
///
/// `offset` is relative to the data region, as stored on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInfo {
    pub name:   String,
    pub kind:   EntryKind,
    pub offset: u32,
    pub size:   u32,
}

// ── Table validation ─────────────────────────────────────────────────────────

/// Per-record view after validation: decoded name, kind, and the payload
/// span within the data region.
struct TableView {
    name:     String,
    kind:     EntryKind,
    span:     Range<usize>,
    reserved: u32,
}

/// Read the table size field and every record, then run the full validation
/// pass. On success the cursor sits at the start of the data region and
/// every returned span lies within it.
fn read_and_validate(cur: &mut ByteCursor<'_>) -> Result<Vec<TableView>, DecodeError> {
    let records = read_table(cur)?;
    let data_len = cur.remaining();

    let mut views = Vec::with_capacity(records.len());
    for (index, rec) in records.iter().enumerate() {
        let name = rec.name_str(index)?.to_owned();
        let kind = rec.kind(index)?;
        let span = payload_span(index, rec, data_len)?;
        views.push(TableView { name, kind, span, reserved: rec.reserved });
    }

    check_overlaps(&records)?;
    check_duplicates(&views)?;
    Ok(views)
}

fn read_table(cur: &mut ByteCursor<'_>) -> Result<Vec<RawRecord>, DecodeError> {
    let declared = cur.read_u32::<LittleEndian>()?;
    if declared as usize % RECORD_SIZE != 0 {
        return Err(Corruption::MisalignedTable { declared }.into());
    }
    if declared as usize > cur.remaining() {
        return Err(Corruption::TableOutOfBounds {
            declared,
            available: cur.remaining(),
        }
        .into());
    }
    let count = declared as usize / RECORD_SIZE;
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(RawRecord::read(cur)?);
    }
    Ok(records)
}

/// Bounds-check one record's span against the data region. The end offset
/// is computed in u64, which u32 offset/size pairs cannot overflow.
fn payload_span(index: usize, rec: &RawRecord, data_len: usize) -> Result<Range<usize>, DecodeError> {
    let end = rec.offset as u64 + rec.size as u64;
    if end > data_len as u64 {
        return Err(Corruption::PayloadOutOfBounds {
            index,
            offset: rec.offset,
            size: rec.size,
            data_len,
        }
        .into());
    }
    Ok(rec.offset as usize..rec.offset as usize + rec.size as usize)
}

/// Reject overlapping payload spans. Zero-length spans occupy no bytes and
/// never overlap anything.
fn check_overlaps(records: &[RawRecord]) -> Result<(), DecodeError> {
    let mut spans: Vec<(usize, u64, u64)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.size > 0)
        .map(|(i, r)| (i, r.offset as u64, r.offset as u64 + r.size as u64))
        .collect();
    spans.sort_by_key(|&(_, start, _)| start);

    for pair in spans.windows(2) {
        let (a, _, a_end) = pair[0];
        let (b, b_start, _) = pair[1];
        if b_start < a_end {
            return Err(Corruption::OverlappingPayloads {
                first:  a.min(b),
                second: a.max(b),
            }
            .into());
        }
    }
    Ok(())
}

fn check_duplicates(views: &[TableView]) -> Result<(), DecodeError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(views.len());
    for (index, view) in views.iter().enumerate() {
        if let Some(&first) = seen.get(view.name.as_str()) {
            return Err(Corruption::DuplicateName {
                first,
                second: index,
                name: view.name.clone(),
            }
            .into());
        }
        seen.insert(&view.name, index);
    }
    Ok(())
}
