use thiserror::Error;

use crate::HEADER_LEN;
use crate::format::Format;
use crate::layout::RomRegion;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer than [`HEADER_LEN`] bytes were supplied.
    #[error("header too short: {len} bytes (expected {})", HEADER_LEN)]
    TooShort { len: usize },
    /// The header was classified but its format cannot be decoded.
    #[error("{0} header is not supported")]
    Unsupported(Format),
    /// The ROM body ends before a region the header promises.
    #[error("EOF reached while reading {region} part: expected {expected} bytes, got {actual}")]
    Truncated {
        region: RomRegion,
        expected: u64,
        actual: u64,
    },
}

/// Text that isn't one of the `H`, `V` or `F` mirroring codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown mirroring `{0}` (expected H, V or F)")]
pub struct ParseMirroringError(pub String);
