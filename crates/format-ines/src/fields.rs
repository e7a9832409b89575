//! Bit-level field decoders shared by the header variants.
//!
//! Everything here is a pure function of one or two header bytes. Which
//! decoder applies to which byte depends on the detected [`crate::Format`];
//! that choice lives in the header module.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::Serialize;

use crate::PRG_RAM_UNIT;
use crate::error::ParseMirroringError;

bitflags! {
    /// Header byte 6.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags6: u8 {
        /// Horizontal nametable arrangement, i.e. vertical mirroring.
        const VERTICAL    = 0b0000_0001;
        const BATTERY     = 0b0000_0010;
        const TRAINER     = 0b0000_0100;
        const FOUR_SCREEN = 0b0000_1000;
        const MAPPER_LOW  = 0b1111_0000;
    }
}

bitflags! {
    /// Header byte 7.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags7: u8 {
        const VS_UNISYSTEM  = 0b0000_0001;
        const PLAYCHOICE_10 = 0b0000_0010;
        /// `0b10` here marks NES 2.0, `0b01` archaic iNES.
        const FORMAT        = 0b0000_1100;
        const MAPPER_MID    = 0b1111_0000;
    }
}

bitflags! {
    /// Header byte 10 as used by iNES 1.0 (unofficial, but widely written).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags10: u8 {
        const TV_SYSTEM     = 0b0000_0011;
        const NO_PRG_RAM    = 0b0001_0000;
        const BUS_CONFLICTS = 0b0010_0000;
    }
}

/// Nametable mirroring selected by the cartridge wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mirroring {
    /// Vertical arrangement of nametables.
    #[serde(rename = "H")]
    Horizontal,
    /// Horizontal arrangement of nametables.
    #[serde(rename = "V")]
    Vertical,
    /// Cartridge supplies extra VRAM; overrides the H/V bit.
    #[serde(rename = "F")]
    FourScreen,
}

impl Mirroring {
    #[must_use]
    pub fn from_flags6(flags: Flags6) -> Self {
        if flags.contains(Flags6::FOUR_SCREEN) {
            Self::FourScreen
        } else if flags.contains(Flags6::VERTICAL) {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// Single-letter code used in listings and filters.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Horizontal => "H",
            Self::Vertical => "V",
            Self::FourScreen => "F",
        }
    }
}

impl fmt::Display for Mirroring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Mirroring {
    type Err = ParseMirroringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "H" | "h" => Ok(Self::Horizontal),
            "V" | "v" => Ok(Self::Vertical),
            "F" | "f" => Ok(Self::FourScreen),
            other => Err(ParseMirroringError(other.to_string())),
        }
    }
}

/// Console type (byte 7 bits 0-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConsoleType {
    #[serde(rename = "NES/Famicom")]
    NesFamicom,
    #[serde(rename = "VS System")]
    VsSystem,
    #[serde(rename = "PlayChoice-10")]
    PlayChoice10,
    #[serde(rename = "Extended")]
    Extended,
}

impl ConsoleType {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::NesFamicom,
            1 => Self::VsSystem,
            2 => Self::PlayChoice10,
            _ => Self::Extended,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NesFamicom => "NES/Famicom",
            Self::VsSystem => "VS System",
            Self::PlayChoice10 => "PlayChoice-10",
            Self::Extended => "Extended",
        }
    }
}

impl fmt::Display for ConsoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Video standard the cartridge targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TvSystem {
    #[serde(rename = "NTSC")]
    Ntsc,
    #[serde(rename = "PAL")]
    Pal,
    /// Runs on either timing.
    #[serde(rename = "Dual")]
    Dual,
    /// Famiclone hybrid timing (NES 2.0 only).
    #[serde(rename = "Dendy")]
    Dendy,
}

impl TvSystem {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ntsc => "NTSC",
            Self::Pal => "PAL",
            Self::Dual => "Dual",
            Self::Dendy => "Dendy",
        }
    }
}

impl fmt::Display for TvSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// NES 2.0 CPU/PPU timing mode (byte 12 bits 0-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CpuTiming {
    #[serde(rename = "RP2C02 (NTSC NES)")]
    Ntsc,
    #[serde(rename = "RP2C07 (Licensed PAL NES)")]
    Pal,
    #[serde(rename = "Multiple-region")]
    MultiRegion,
    #[serde(rename = "UA6538 (Dendy)")]
    Dendy,
}

impl CpuTiming {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Ntsc,
            1 => Self::Pal,
            2 => Self::MultiRegion,
            _ => Self::Dendy,
        }
    }

    /// TV system implied by the timing mode.
    #[must_use]
    pub const fn tv_system(self) -> TvSystem {
        match self {
            Self::Ntsc => TvSystem::Ntsc,
            Self::Pal => TvSystem::Pal,
            Self::MultiRegion => TvSystem::Dual,
            Self::Dendy => TvSystem::Dendy,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ntsc => "RP2C02 (NTSC NES)",
            Self::Pal => "RP2C07 (Licensed PAL NES)",
            Self::MultiRegion => "Multiple-region",
            Self::Dendy => "UA6538 (Dendy)",
        }
    }
}

impl fmt::Display for CpuTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// NES 2.0 ROM size from the LSB byte and the 4-bit MSB nibble.
///
/// Nibbles `0x0`-`0xE` give a plain unit count of `(msb << 8) | lsb`. Nibble
/// `0xF` switches to exponent-multiplier notation: the LSB holds `EEEEEEMM`
/// and the size is `2^E * (MM * 2 + 1)` bytes, independent of `unit`.
///
/// The largest exponent-multiplier value (`2^63 * 7`) does not fit in a
/// `u64`; results saturate at `u64::MAX`.
#[must_use]
pub fn nes2_rom_size(lsb: u8, msb_nibble: u8, unit: u64) -> u64 {
    let msb = msb_nibble & 0x0F;
    if msb <= 0x0E {
        let units = (u64::from(msb) << 8) | u64::from(lsb);
        units * unit
    } else {
        let exponent = u32::from(lsb >> 2) & 0x3F;
        let multiplier = u64::from(lsb & 0x03) * 2 + 1;
        (1u64 << exponent).saturating_mul(multiplier)
    }
}

/// NES 2.0 RAM/NVRAM size from a 4-bit shift count: `64 << shift`, or 0.
#[must_use]
pub const fn shift_size(shift: u8) -> u64 {
    match shift & 0x0F {
        0 => 0,
        shift => 64 << shift,
    }
}

/// iNES 1.0 PRG RAM size from byte 8. Zero means 8K for compatibility.
#[must_use]
pub const fn ines_prg_ram_size(units: u8) -> u64 {
    match units {
        0 => PRG_RAM_UNIT,
        units => units as u64 * PRG_RAM_UNIT,
    }
}

/// iNES 1.0 TV system: byte 9 bit 0, overridden by byte 10 bits 0-1 when set.
#[must_use]
pub fn ines_tv_system(flags9: u8, flags10: Flags10) -> TvSystem {
    match (flags10 & Flags10::TV_SYSTEM).bits() {
        2 => TvSystem::Pal,
        1 | 3 => TvSystem::Dual,
        _ if flags9 & 0x01 != 0 => TvSystem::Pal,
        _ => TvSystem::Ntsc,
    }
}
