//! Where the ROM regions sit in an image, and splitting an image into them.
//!
//! An image is the 16-byte header, an optional 512-byte trainer, PRG ROM and
//! then CHR ROM. Anything after CHR (misc ROMs, title blocks) is ignored.

use std::fmt;
use std::ops::Range;

use log::debug;

use crate::error::{Error, Result};
use crate::header::Header;
use crate::{HEADER_LEN, TRAINER_LEN};

/// A region of the ROM body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomRegion {
    Trainer,
    Prg,
    Chr,
}

impl fmt::Display for RomRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trainer => "trainer",
            Self::Prg => "PRG",
            Self::Chr => "CHR",
        })
    }
}

/// Byte ranges of each region, relative to the start of the image.
///
/// Offsets saturate at `u64::MAX`, so an absurd NES 2.0 size yields a layout
/// that no real image can satisfy rather than a wrapped one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomLayout {
    pub trainer: Option<Range<u64>>,
    pub prg: Range<u64>,
    pub chr: Range<u64>,
}

/// Regions borrowed from an image by [`RomLayout::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomParts<'a> {
    pub trainer: Option<&'a [u8]>,
    pub prg: &'a [u8],
    pub chr: &'a [u8],
}

impl RomLayout {
    /// Compute the layout a decoded header describes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if the header wasn't decoded.
    pub fn new(header: &Header) -> Result<Self> {
        let cart = header
            .cartridge()
            .ok_or(Error::Unsupported(header.format()))?;

        let header_end = HEADER_LEN as u64;
        let trainer = cart
            .has_trainer
            .then(|| header_end..header_end + TRAINER_LEN as u64);
        let prg_start = trainer.as_ref().map_or(header_end, |t| t.end);
        let prg_end = prg_start.saturating_add(cart.prg_rom_size);
        let chr_end = prg_end.saturating_add(cart.chr_rom_size);

        Ok(Self {
            trainer,
            prg: prg_start..prg_end,
            chr: prg_end..chr_end,
        })
    }

    /// Expected image size: header, trainer, PRG and CHR.
    #[must_use]
    pub const fn total_len(&self) -> u64 {
        self.chr.end
    }

    /// Borrow each region out of `data`, the whole image including header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`] for the first region `data` is too short
    /// to hold, with the number of bytes that region actually got.
    pub fn split<'a>(&self, data: &'a [u8]) -> Result<RomParts<'a>> {
        let trainer = match &self.trainer {
            Some(range) => Some(region(data, range, RomRegion::Trainer)?),
            None => None,
        };
        let prg = region(data, &self.prg, RomRegion::Prg)?;
        let chr = region(data, &self.chr, RomRegion::Chr)?;

        let extra = (data.len() as u64).saturating_sub(self.total_len());
        if extra > 0 {
            debug!("ignoring {extra} bytes after CHR ROM");
        }

        Ok(RomParts { trainer, prg, chr })
    }
}

fn region<'a>(data: &'a [u8], range: &Range<u64>, region: RomRegion) -> Result<&'a [u8]> {
    let start = usize::try_from(range.start).ok();
    let end = usize::try_from(range.end).ok();
    if let (Some(start), Some(end)) = (start, end) {
        if let Some(bytes) = data.get(start..end) {
            return Ok(bytes);
        }
    }

    let expected = range.end.saturating_sub(range.start);
    let actual = (data.len() as u64).saturating_sub(range.start).min(expected);
    Err(Error::Truncated {
        region,
        expected,
        actual,
    })
}

impl Header {
    /// Shorthand for [`RomLayout::new`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if the header wasn't decoded.
    pub fn layout(&self) -> Result<RomLayout> {
        RomLayout::new(self)
    }
}
