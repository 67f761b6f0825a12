//! Sibling Rayform formats carried opaquely: everything after the magic word
//! is kept as raw bytes, so decode is total and re-encode is byte-exact.

use serde::{Deserialize, Serialize};

use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::DecodeError;

pub const FTY_MAGIC_V1: u32 = 0xAFCE_0F00;
pub const FTY_MAGIC_V2: u32 = 0xAFCE_0F01;
pub const RFC_MAGIC:    u32 = 0x3D23_AFCF;
pub const RFI_MAGIC:    u32 = 0x1D2D_3DC6;
/// ASCII `RIFF` read as little-endian u32.
pub const WAV_MAGIC:    u32 = 0x4646_4952;

/// Which of the two factory-table magic revisions a buffer carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FtyVersion {
    V1,
    V2,
}

impl FtyVersion {
    /// Magic word this revision encodes with.
    pub fn magic(self) -> u32 {
        match self {
            FtyVersion::V1 => FTY_MAGIC_V1,
            FtyVersion::V2 => FTY_MAGIC_V2,
        }
    }
}

/// Rayform factory table. The parsed value remembers which magic revision it
/// was read with so re-encode is byte-exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fty {
    pub version: FtyVersion,
    pub data:    Vec<u8>,
}

impl Fty {
    pub(crate) fn decode(magic: u32, cur: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let version = match magic {
            FTY_MAGIC_V1 => FtyVersion::V1,
            FTY_MAGIC_V2 => FtyVersion::V2,
            _ => return Err(DecodeError::UnrecognizedFormat { magic }),
        };
        Ok(Self { version, data: cur.read_to_end().to_vec() })
    }

    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.data);
    }

    pub(crate) fn encoded_len(&self) -> usize {
        4 + self.data.len()
    }
}

/// Rayform content blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rfc {
    pub data: Vec<u8>,
}

impl Rfc {
    pub(crate) fn decode(cur: &mut ByteCursor<'_>) -> Self {
        Self { data: cur.read_to_end().to_vec() }
    }

    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.data);
    }

    pub(crate) fn encoded_len(&self) -> usize {
        4 + self.data.len()
    }
}

/// Rayform image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rfi {
    pub data: Vec<u8>,
}

impl Rfi {
    pub(crate) fn decode(cur: &mut ByteCursor<'_>) -> Self {
        Self { data: cur.read_to_end().to_vec() }
    }

    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.data);
    }

    pub(crate) fn encoded_len(&self) -> usize {
        4 + self.data.len()
    }
}

/// RIFF audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wav {
    pub data: Vec<u8>,
}

impl Wav {
    pub(crate) fn decode(cur: &mut ByteCursor<'_>) -> Self {
        Self { data: cur.read_to_end().to_vec() }
    }

    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.data);
    }

    pub(crate) fn encoded_len(&self) -> usize {
        4 + self.data.len()
    }
}
