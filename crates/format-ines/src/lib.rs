//! iNES / NES 2.0 cartridge header parser.
//!
//! Every `.nes` image starts with a 16-byte header describing the cartridge:
//! PRG/CHR ROM sizes, nametable mirroring, mapper number and a handful of
//! hardware flags. Over the years the layout accumulated several variants
//! (archaic iNES, iNES 0.7, iNES 1.0, NES 2.0), and UNIF images use a
//! different container entirely. [`Header::parse`] classifies the buffer and
//! decodes the fields that make sense for the detected variant.
//!
//! Unrecognised or unsupported formats are not errors: they come back as
//! [`Header::Unsupported`] with the raw bytes intact. The only hard failure is
//! a buffer shorter than [`HEADER_LEN`].
//!
//! ```
//! use format_ines::{Format, Header};
//!
//! let mut raw = [0u8; 16];
//! raw[..4].copy_from_slice(b"NES\x1a");
//! raw[4] = 2; // 2 x 16K PRG
//! raw[5] = 1; // 1 x 8K CHR
//! let header = Header::parse(&raw).expect("16 bytes");
//! assert_eq!(header.format(), Format::INes);
//! assert_eq!(header.prg_rom_size(), Some(32 * 1024));
//! assert_eq!(header.to_string(), "mapper: 0 (NROM), PRG: 32k, CHR: 8k");
//! ```

mod display;
mod error;
pub mod fields;
pub mod filter;
pub mod format;
mod header;
pub mod layout;
pub mod mapper;
mod report;

pub use display::Detailed;
pub use error::{Error, ParseMirroringError, Result};
pub use fields::{ConsoleType, CpuTiming, Mirroring, TvSystem};
pub use filter::HeaderFilter;
pub use format::Format;
pub use header::{
    Cartridge, Header, INesHeader, INesRevision, Nes2Console, Nes2Header, UnsupportedHeader,
};
pub use layout::{RomLayout, RomParts, RomRegion};
pub use mapper::MapperInfo;
pub use report::{CartridgeReport, HeaderReport};

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 16;

/// Size of the optional trainer block that follows the header.
pub const TRAINER_LEN: usize = 512;

/// PRG ROM is counted in 16K units.
pub const PRG_ROM_UNIT: u64 = 16 * 1024;

/// CHR ROM is counted in 8K units.
pub const CHR_ROM_UNIT: u64 = 8 * 1024;

/// iNES 1.0 PRG RAM is counted in 8K units.
pub const PRG_RAM_UNIT: u64 = 8 * 1024;
