use thiserror::Error;

/// Structural damage detected inside an RPK container.
///
/// Carried by [`DecodeError::CorruptContainer`]. Each variant names the
/// offsets, indices, or sizes needed to locate the damage in the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Corruption {
    /// Entry table size field is not a multiple of the 32-byte record size.
    #[error("entry table size {declared} is not a multiple of the 32-byte record size")]
    MisalignedTable { declared: u32 },
    /// Entry table extends past the end of the input buffer.
    #[error("entry table of {declared} byte(s) exceeds the {available} byte(s) remaining")]
    TableOutOfBounds { declared: u32, available: usize },
    /// An entry's payload span does not fit inside the data region.
    #[error("entry {index} payload span {offset}+{size} exceeds data region of {data_len} byte(s)")]
    PayloadOutOfBounds {
        index:    usize,
        offset:   u32,
        size:     u32,
        data_len: usize,
    },
    /// Two entries claim overlapping byte ranges of the data region.
    #[error("entries {first} and {second} have overlapping payload spans")]
    OverlappingPayloads { first: usize, second: usize },
    /// Two entries share a name.
    #[error("entries {first} and {second} share the name {name:?}")]
    DuplicateName {
        first:  usize,
        second: usize,
        name:   String,
    },
    /// A length-prefixed string holds bytes that are not valid UTF-8.
    #[error("length-prefixed string at offset {offset} is not valid UTF-8")]
    MalformedString { offset: usize },
}

/// Unified error for every decode path.
///
/// Encoding is total and has no error type. Decode failures are values, not
/// panics or log lines, and no partial result is ever returned alongside one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A read overran the remaining input.
    #[error("read of {requested} byte(s) at offset {offset} overruns the {available} byte(s) remaining")]
    OutOfBounds {
        offset:    usize,
        requested: usize,
        available: usize,
    },
    /// The leading magic word matches no registered format.
    #[error("unrecognized format magic {magic:#010x}")]
    UnrecognizedFormat { magic: u32 },
    /// An entry record carries a kind tag outside the known set.
    #[error("entry {index} has unknown kind tag {tag:#010x}")]
    UnknownEntryKind { index: usize, tag: u32 },
    /// An entry name field failed validation.
    #[error("entry {index} has an invalid name: {reason}")]
    InvalidEntryName { index: usize, reason: String },
    /// The container structure is internally inconsistent.
    #[error("corrupt container: {reason}")]
    CorruptContainer { reason: Corruption },
}

impl From<Corruption> for DecodeError {
    fn from(reason: Corruption) -> Self {
        DecodeError::CorruptContainer { reason }
    }
}
