//! Header filtering for ROM scanners.

use std::fmt;

use crate::fields::Mirroring;
use crate::header::Header;

/// Criteria a header must meet. The default accepts every decoded header.
///
/// Sizes are compared in whole KiB, rounding down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFilter {
    /// Only accept images with a trainer.
    pub trainer_only: bool,
    pub mapper: Option<u16>,
    pub mirroring: Option<Mirroring>,
    pub min_prg_kb: Option<u64>,
    pub max_prg_kb: Option<u64>,
    pub min_chr_kb: Option<u64>,
    pub max_chr_kb: Option<u64>,
}

impl HeaderFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn trainer_only(mut self) -> Self {
        self.trainer_only = true;
        self
    }

    #[must_use]
    pub const fn mapper(mut self, mapper: u16) -> Self {
        self.mapper = Some(mapper);
        self
    }

    #[must_use]
    pub const fn mirroring(mut self, mirroring: Mirroring) -> Self {
        self.mirroring = Some(mirroring);
        self
    }

    #[must_use]
    pub const fn prg_kb(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_prg_kb = min;
        self.max_prg_kb = max;
        self
    }

    #[must_use]
    pub const fn chr_kb(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_chr_kb = min;
        self.max_chr_kb = max;
        self
    }

    /// True if no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Undecoded headers never match.
    #[must_use]
    pub fn matches(&self, header: &Header) -> bool {
        let Some(cart) = header.cartridge() else {
            return false;
        };

        if self.trainer_only && !cart.has_trainer {
            return false;
        }
        if self.mapper.is_some_and(|m| m != cart.mapper) {
            return false;
        }
        if self.mirroring.is_some_and(|m| m != cart.mirroring) {
            return false;
        }

        within(cart.prg_rom_size / 1024, self.min_prg_kb, self.max_prg_kb)
            && within(cart.chr_rom_size / 1024, self.min_chr_kb, self.max_chr_kb)
    }
}

fn within(kb: u64, min: Option<u64>, max: Option<u64>) -> bool {
    min.is_none_or(|min| kb >= min) && max.is_none_or(|max| kb <= max)
}

/// Lists the active criteria, e.g. `has trainer, mapper=1, PRG>=128k`.
impl fmt::Display for HeaderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.trainer_only {
            parts.push("has trainer".to_string());
        }
        if let Some(mapper) = self.mapper {
            parts.push(format!("mapper={mapper}"));
        }
        if let Some(mirroring) = self.mirroring {
            parts.push(format!("mirroring={mirroring}"));
        }
        for (label, op, value) in [
            ("PRG", ">=", self.min_prg_kb),
            ("PRG", "<=", self.max_prg_kb),
            ("CHR", ">=", self.min_chr_kb),
            ("CHR", "<=", self.max_chr_kb),
        ] {
            if let Some(kb) = value {
                parts.push(format!("{label}{op}{kb}k"));
            }
        }
        f.write_str(&parts.join(", "))
    }
}
