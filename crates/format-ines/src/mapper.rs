//! Mapper names, after the NESdev wiki mapper list.
//!
//! Only boards that show up in common dumps are listed. Anything else gets a
//! synthesized `Unknown (N)` name.

use std::borrow::Cow;

struct Entry {
    number: u16,
    name: &'static str,
    alternates: &'static [&'static str],
    notes: &'static str,
}

const fn entry(
    number: u16,
    name: &'static str,
    alternates: &'static [&'static str],
    notes: &'static str,
) -> Entry {
    Entry {
        number,
        name,
        alternates,
        notes,
    }
}

const EXPANSION_SOUND: &str = "Contains expansion sound";

// Sorted by number.
static MAPPERS: &[Entry] = &[
    entry(0, "NROM", &[], ""),
    entry(1, "MMC1", &["SxROM"], ""),
    entry(2, "UxROM", &[], ""),
    entry(3, "CNROM", &[], ""),
    entry(4, "MMC3", &["TxROM", "MMC6"], ""),
    entry(5, "MMC5", &["ExROM"], EXPANSION_SOUND),
    entry(7, "AxROM", &[], ""),
    entry(9, "MMC2", &["PxROM"], ""),
    entry(10, "MMC4", &["FxROM"], ""),
    entry(11, "Color Dreams", &[], ""),
    entry(13, "CPROM", &[], ""),
    entry(15, "100-in-1 Contra Function 16", &[], "Multicart"),
    entry(16, "Bandai EPROM (24C02)", &[], ""),
    entry(18, "Jaleco SS8806", &[], ""),
    entry(19, "Namco 163", &[], EXPANSION_SOUND),
    entry(21, "VRC4", &["VRC4a", "VRC4c"], ""),
    entry(22, "VRC2", &["VRC2a"], ""),
    entry(23, "VRC2/VRC4", &["VRC2b", "VRC4e"], ""),
    entry(24, "VRC6", &["VRC6a"], EXPANSION_SOUND),
    entry(25, "VRC4", &["VRC4b", "VRC4d"], ""),
    entry(26, "VRC6", &["VRC6b"], EXPANSION_SOUND),
    entry(34, "BNROM", &["NINA-001"], ""),
    entry(64, "RAMBO-1", &[], "MMC3 clone with extra features"),
    entry(66, "GxROM", &["MxROM"], ""),
    entry(68, "After Burner", &[], "ROM-based nametables"),
    entry(69, "Sunsoft FME-7", &["Sunsoft 5B"], "The 5B is the FME-7 with expansion sound"),
    entry(71, "Camerica/Codemasters", &[], "Similar to UNROM"),
    entry(73, "VRC3", &[], ""),
    entry(74, "Pirate MMC3 derivative", &[], "Has both CHR ROM and CHR RAM (2k)"),
    entry(75, "VRC1", &[], ""),
    entry(76, "Namco 109 variant", &[], ""),
    entry(79, "NINA-03/NINA-06", &[], "Either NINA-003 or NINA-006"),
    entry(85, "VRC7", &[], EXPANSION_SOUND),
    entry(86, "JALECO-JF-13", &[], ""),
    entry(94, "Senjou no Ookami", &[], ""),
    entry(105, "NES-EVENT", &[], "Similar to MMC1"),
    entry(113, "NINA-03/NINA-06??", &[], "For multicarts including mapper 79 games"),
    entry(118, "TxSROM", &["MMC3"], "MMC3 with independent mirroring control"),
    entry(119, "TQROM", &["MMC3"], "Has both CHR ROM and CHR RAM"),
    entry(159, "Bandai EPROM (24C01)", &[], ""),
    entry(166, "SUBOR", &[], ""),
    entry(167, "SUBOR", &[], ""),
    entry(180, "Crazy Climber", &[], "Variation of UNROM, fixed first bank at $8000"),
    entry(185, "CNROM with protection diodes", &[], ""),
    entry(192, "Pirate MMC3 derivative", &[], "Has both CHR ROM and CHR RAM (4k)"),
    entry(206, "DxROM", &["Namco 118", "MIMIC-1"], "Simplified MMC3 predecessor lacking some features"),
    entry(210, "Namco 175 and 340", &[], "Namco 163 with different mirroring"),
    entry(228, "Action 52", &[], ""),
    entry(232, "Camerica/Codemasters Quattro", &[], "Multicarts"),
];

fn lookup(number: u16) -> Option<&'static Entry> {
    MAPPERS
        .binary_search_by_key(&number, |e| e.number)
        .ok()
        .and_then(|i| MAPPERS.get(i))
}

/// Everything known about a mapper number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperInfo {
    pub number: u16,
    /// Primary name, or `Unknown (N)`.
    pub name: Cow<'static, str>,
    pub alternates: &'static [&'static str],
    pub notes: &'static str,
}

impl MapperInfo {
    /// Primary name followed by the alternates.
    #[must_use]
    pub fn all_names(&self) -> Vec<&str> {
        std::iter::once(self.name.as_ref())
            .chain(self.alternates.iter().copied())
            .collect()
    }
}

#[must_use]
pub fn mapper_name(number: u16) -> Cow<'static, str> {
    lookup(number).map_or_else(
        || Cow::Owned(format!("Unknown ({number})")),
        |e| Cow::Borrowed(e.name),
    )
}

#[must_use]
pub fn alternate_names(number: u16) -> &'static [&'static str] {
    lookup(number).map(|e| e.alternates).unwrap_or_default()
}

#[must_use]
pub fn notes(number: u16) -> &'static str {
    lookup(number).map(|e| e.notes).unwrap_or_default()
}

#[must_use]
pub fn is_known(number: u16) -> bool {
    lookup(number).is_some()
}

#[must_use]
pub fn info(number: u16) -> MapperInfo {
    MapperInfo {
        number,
        name: mapper_name(number),
        alternates: alternate_names(number),
        notes: notes(number),
    }
}
