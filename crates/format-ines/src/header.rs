//! Header decoding.
//!
//! [`Header`] is keyed by format: iNES and NES 2.0 headers each carry only the
//! fields their layout can express, and anything that isn't decodable keeps
//! just its raw bytes.

use std::borrow::Cow;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::fields::{self, ConsoleType, CpuTiming, Flags6, Flags7, Flags10, Mirroring, TvSystem};
use crate::format::{self, Format};
use crate::mapper::{self, MapperInfo};
use crate::{CHR_ROM_UNIT, HEADER_LEN, PRG_ROM_UNIT};

/// A decoded cartridge header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// Unknown, UNIF or archaic iNES. Only the format and raw bytes are kept.
    Unsupported(UnsupportedHeader),
    /// iNES 1.0 or iNES 0.7.
    INes(INesHeader),
    /// NES 2.0.
    Nes2(Nes2Header),
}

/// A header whose format is recognised (or not) but not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedHeader {
    format: Format,
    raw: [u8; HEADER_LEN],
}

impl UnsupportedHeader {
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    #[must_use]
    pub const fn raw(&self) -> &[u8; HEADER_LEN] {
        &self.raw
    }
}

/// Fields shared by every decodable header format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cartridge {
    pub raw: [u8; HEADER_LEN],
    pub mirroring: Mirroring,
    /// 0-255 for iNES, 0-4095 for NES 2.0.
    pub mapper: u16,
    /// PRG ROM size in bytes.
    pub prg_rom_size: u64,
    /// CHR ROM size in bytes. Zero means the board uses CHR RAM.
    pub chr_rom_size: u64,
    pub console_type: ConsoleType,
    pub has_trainer: bool,
    pub has_battery: bool,
    pub four_screen: bool,
    pub is_vs_unisystem: bool,
    pub is_playchoice_10: bool,
}

impl Cartridge {
    /// Decode bytes 4-7 with iNES 1.0 size units.
    fn decode(raw: [u8; HEADER_LEN]) -> Self {
        let flags6 = Flags6::from_bits_retain(raw[6]);
        let flags7 = Flags7::from_bits_retain(raw[7]);

        let mapper_low = (flags6 & Flags6::MAPPER_LOW).bits() >> 4;
        let mapper_mid = (flags7 & Flags7::MAPPER_MID).bits();

        Self {
            raw,
            mirroring: Mirroring::from_flags6(flags6),
            mapper: u16::from(mapper_mid | mapper_low),
            prg_rom_size: u64::from(raw[4]) * PRG_ROM_UNIT,
            chr_rom_size: u64::from(raw[5]) * CHR_ROM_UNIT,
            console_type: ConsoleType::from_bits(flags7.bits()),
            has_trainer: flags6.contains(Flags6::TRAINER),
            has_battery: flags6.contains(Flags6::BATTERY),
            four_screen: flags6.contains(Flags6::FOUR_SCREEN),
            is_vs_unisystem: flags7.contains(Flags7::VS_UNISYSTEM),
            is_playchoice_10: flags7.contains(Flags7::PLAYCHOICE_10),
        }
    }
}

/// Which pre-NES 2.0 layout the header was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum INesRevision {
    /// Bytes 12-15 are zero.
    V1_0,
    /// Bytes 12-15 hold junk (usually a ripper signature).
    V0_7,
}

/// iNES 1.0 / 0.7 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct INesHeader {
    pub revision: INesRevision,
    pub cartridge: Cartridge,
    /// PRG RAM size in bytes; byte 8 of zero still means 8K.
    pub prg_ram_size: u64,
    pub tv_system: TvSystem,
    pub has_prg_ram: bool,
    pub has_bus_conflicts: bool,
}

impl INesHeader {
    fn decode(revision: INesRevision, raw: [u8; HEADER_LEN]) -> Self {
        let flags10 = Flags10::from_bits_retain(raw[10]);
        Self {
            revision,
            cartridge: Cartridge::decode(raw),
            prg_ram_size: fields::ines_prg_ram_size(raw[8]),
            tv_system: fields::ines_tv_system(raw[9], flags10),
            has_prg_ram: !flags10.contains(Flags10::NO_PRG_RAM),
            has_bus_conflicts: flags10.contains(Flags10::BUS_CONFLICTS),
        }
    }

    #[must_use]
    pub const fn format(&self) -> Format {
        match self.revision {
            INesRevision::V1_0 => Format::INes,
            INesRevision::V0_7 => Format::INes07,
        }
    }
}

/// Byte 13 of a NES 2.0 header, interpreted according to the console type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nes2Console {
    NesFamicom,
    VsSystem { ppu_type: u8, hardware_type: u8 },
    PlayChoice10,
    Extended { console_type: u8 },
}

impl Nes2Console {
    fn decode(console_type: ConsoleType, flags13: u8) -> Self {
        match console_type {
            ConsoleType::NesFamicom => Self::NesFamicom,
            ConsoleType::VsSystem => Self::VsSystem {
                ppu_type: flags13 & 0x0F,
                hardware_type: flags13 >> 4,
            },
            ConsoleType::PlayChoice10 => Self::PlayChoice10,
            ConsoleType::Extended => Self::Extended {
                console_type: flags13 & 0x0F,
            },
        }
    }

    #[must_use]
    pub const fn console_type(self) -> ConsoleType {
        match self {
            Self::NesFamicom => ConsoleType::NesFamicom,
            Self::VsSystem { .. } => ConsoleType::VsSystem,
            Self::PlayChoice10 => ConsoleType::PlayChoice10,
            Self::Extended { .. } => ConsoleType::Extended,
        }
    }

    #[must_use]
    pub const fn vs_ppu_type(self) -> Option<u8> {
        match self {
            Self::VsSystem { ppu_type, .. } => Some(ppu_type),
            _ => None,
        }
    }

    #[must_use]
    pub const fn vs_hardware_type(self) -> Option<u8> {
        match self {
            Self::VsSystem { hardware_type, .. } => Some(hardware_type),
            _ => None,
        }
    }

    #[must_use]
    pub const fn extended_console_type(self) -> Option<u8> {
        match self {
            Self::Extended { console_type } => Some(console_type),
            _ => None,
        }
    }
}

/// NES 2.0 header.
///
/// The common fields and the console variant are read-only, so the console
/// type in [`Cartridge`] always agrees with [`Nes2Console`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nes2Header {
    cartridge: Cartridge,
    pub submapper: u8,
    pub prg_ram_size: u64,
    pub prg_nvram_size: u64,
    pub chr_ram_size: u64,
    pub chr_nvram_size: u64,
    pub cpu_timing: CpuTiming,
    console: Nes2Console,
    /// Number of miscellaneous ROM areas after CHR (0-3).
    pub misc_rom_count: u8,
    /// Default expansion device (0-63).
    pub expansion_device: u8,
}

impl Nes2Header {
    fn decode(raw: [u8; HEADER_LEN]) -> Self {
        let mut cartridge = Cartridge::decode(raw);

        // Byte 8: mapper bits 8-11 and submapper
        cartridge.mapper |= u16::from(raw[8] & 0x0F) << 8;
        // Byte 9: PRG/CHR size MSB nibbles
        cartridge.prg_rom_size = fields::nes2_rom_size(raw[4], raw[9] & 0x0F, PRG_ROM_UNIT);
        cartridge.chr_rom_size = fields::nes2_rom_size(raw[5], raw[9] >> 4, CHR_ROM_UNIT);

        let console = Nes2Console::decode(cartridge.console_type, raw[13]);

        Self {
            submapper: raw[8] >> 4,
            prg_ram_size: fields::shift_size(raw[10] & 0x0F),
            prg_nvram_size: fields::shift_size(raw[10] >> 4),
            chr_ram_size: fields::shift_size(raw[11] & 0x0F),
            chr_nvram_size: fields::shift_size(raw[11] >> 4),
            cpu_timing: CpuTiming::from_bits(raw[12]),
            console,
            misc_rom_count: raw[14] & 0x03,
            expansion_device: raw[15] & 0x3F,
            cartridge,
        }
    }

    #[must_use]
    pub const fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    #[must_use]
    pub const fn console(&self) -> Nes2Console {
        self.console
    }

    #[must_use]
    pub const fn tv_system(&self) -> TvSystem {
        self.cpu_timing.tv_system()
    }

    /// NES 2.0 has no bus-conflict flag; always `false`.
    #[must_use]
    pub const fn has_bus_conflicts(&self) -> bool {
        false
    }
}

impl Header {
    /// Decode the first [`HEADER_LEN`] bytes of `bytes`; the rest is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooShort`] if fewer than 16 bytes are supplied.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let Some(raw) = bytes.first_chunk::<HEADER_LEN>() else {
            return Err(Error::TooShort { len: bytes.len() });
        };
        Ok(Self::from_raw(*raw))
    }

    /// Decode an exact 16-byte header.
    #[must_use]
    pub fn from_raw(raw: [u8; HEADER_LEN]) -> Self {
        let format = format::detect(&raw);
        debug!("detected {format} header");

        if !format.is_supported() {
            debug!("{format} header left undecoded");
            return Self::Unsupported(UnsupportedHeader { format, raw });
        }

        let header = match format {
            Format::Nes20 => Self::Nes2(Nes2Header::decode(raw)),
            Format::INes07 => Self::INes(INesHeader::decode(INesRevision::V0_7, raw)),
            _ => Self::INes(INesHeader::decode(INesRevision::V1_0, raw)),
        };

        if let Some(cart) = header.cartridge() {
            trace!(
                "mapper {}, PRG {} bytes, CHR {} bytes",
                cart.mapper, cart.prg_rom_size, cart.chr_rom_size
            );
        }
        header
    }

    #[must_use]
    pub const fn format(&self) -> Format {
        match self {
            Self::Unsupported(h) => h.format,
            Self::INes(h) => h.format(),
            Self::Nes2(_) => Format::Nes20,
        }
    }

    /// The original 16 bytes.
    #[must_use]
    pub const fn raw(&self) -> &[u8; HEADER_LEN] {
        match self {
            Self::Unsupported(h) => &h.raw,
            Self::INes(h) => &h.cartridge.raw,
            Self::Nes2(h) => &h.cartridge.raw,
        }
    }

    /// Whether the fields were decoded. False for Unknown, UNIF and archaic.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Common fields, if the header was decoded.
    #[must_use]
    pub const fn cartridge(&self) -> Option<&Cartridge> {
        match self {
            Self::Unsupported(_) => None,
            Self::INes(h) => Some(&h.cartridge),
            Self::Nes2(h) => Some(&h.cartridge),
        }
    }

    #[must_use]
    pub fn mapper(&self) -> Option<u16> {
        self.cartridge().map(|c| c.mapper)
    }

    /// NES 2.0 only.
    #[must_use]
    pub const fn submapper(&self) -> Option<u8> {
        match self {
            Self::Nes2(h) => Some(h.submapper),
            _ => None,
        }
    }

    #[must_use]
    pub fn mirroring(&self) -> Option<Mirroring> {
        self.cartridge().map(|c| c.mirroring)
    }

    #[must_use]
    pub fn prg_rom_size(&self) -> Option<u64> {
        self.cartridge().map(|c| c.prg_rom_size)
    }

    #[must_use]
    pub fn chr_rom_size(&self) -> Option<u64> {
        self.cartridge().map(|c| c.chr_rom_size)
    }

    /// iNES: the single PRG RAM size. NES 2.0: volatile PRG RAM only.
    #[must_use]
    pub const fn prg_ram_size(&self) -> Option<u64> {
        match self {
            Self::Unsupported(_) => None,
            Self::INes(h) => Some(h.prg_ram_size),
            Self::Nes2(h) => Some(h.prg_ram_size),
        }
    }

    #[must_use]
    pub const fn tv_system(&self) -> Option<TvSystem> {
        match self {
            Self::Unsupported(_) => None,
            Self::INes(h) => Some(h.tv_system),
            Self::Nes2(h) => Some(h.tv_system()),
        }
    }

    /// NES 2.0 only.
    #[must_use]
    pub const fn cpu_timing(&self) -> Option<CpuTiming> {
        match self {
            Self::Nes2(h) => Some(h.cpu_timing),
            _ => None,
        }
    }

    #[must_use]
    pub const fn has_bus_conflicts(&self) -> Option<bool> {
        match self {
            Self::Unsupported(_) => None,
            Self::INes(h) => Some(h.has_bus_conflicts),
            Self::Nes2(h) => Some(h.has_bus_conflicts()),
        }
    }

    #[must_use]
    pub fn mapper_name(&self) -> Option<Cow<'static, str>> {
        self.mapper().map(mapper::mapper_name)
    }

    #[must_use]
    pub fn mapper_info(&self) -> Option<MapperInfo> {
        self.mapper().map(mapper::info)
    }
}

impl From<[u8; HEADER_LEN]> for Header {
    fn from(raw: [u8; HEADER_LEN]) -> Self {
        Self::from_raw(raw)
    }
}
