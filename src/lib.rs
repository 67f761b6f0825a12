#![forbid(unsafe_code)]

pub mod error;
pub mod cursor;
pub mod entry;
pub mod asset;
pub mod rpk;
pub mod format;

pub use asset::{Fty, FtyVersion, Rfc, Rfi, Wav};
pub use cursor::{ByteCursor, ByteWriter, LenWidth};
pub use entry::{Entry, EntryKind};
pub use error::{Corruption, DecodeError};
pub use format::{Format, FormatKind};
pub use rpk::{EntryInfo, Rpk};
