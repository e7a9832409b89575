//! Header format detection.

use std::fmt;

use serde::Serialize;

use crate::HEADER_LEN;
use crate::fields::Flags7;

/// Magic at the start of every iNES / NES 2.0 image.
pub const INES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Magic at the start of a UNIF container.
pub const UNIF_MAGIC: &[u8; 4] = b"UNIF";

/// Header flavour, as classified by [`detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    /// Neither iNES nor UNIF magic.
    #[serde(rename = "Unknown")]
    Unknown,
    /// Pre-standard dumps, often with a ripper signature in bytes 7-15.
    #[serde(rename = "Archaic iNES")]
    Archaic,
    /// iNES without the NES 2.0 marker whose bytes 12-15 aren't clean.
    #[serde(rename = "iNES 0.7")]
    INes07,
    /// iNES 1.0.
    #[serde(rename = "iNES")]
    INes,
    /// NES 2.0.
    #[serde(rename = "NES 2.0")]
    Nes20,
    /// UNIF container; detected but never decoded.
    #[serde(rename = "UNIF")]
    Unif,
}

impl Format {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Archaic => "Archaic iNES",
            Self::INes07 => "iNES 0.7",
            Self::INes => "iNES",
            Self::Nes20 => "NES 2.0",
            Self::Unif => "UNIF",
        }
    }

    /// Whether headers of this format get their fields decoded.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::INes07 | Self::INes | Self::Nes20)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify the first 16 bytes of an image. Never fails.
///
/// Order matters: UNIF magic, then iNES magic, then the two format bits of
/// byte 7. Bytes 12-15 only separate iNES 1.0 from iNES 0.7 once those bits
/// are both clear.
#[must_use]
pub fn detect(raw: &[u8; HEADER_LEN]) -> Format {
    if raw.starts_with(UNIF_MAGIC) {
        return Format::Unif;
    }
    if !raw.starts_with(INES_MAGIC) {
        return Format::Unknown;
    }

    let flags7 = Flags7::from_bits_retain(raw[7]);
    match (flags7 & Flags7::FORMAT).bits() {
        0x08 => Format::Nes20,
        0x04 => Format::Archaic,
        0x00 if raw[12..16].iter().all(|&b| b == 0) => Format::INes,
        _ => Format::INes07,
    }
}
