//! Flat key/value export of a header, for JSON and similar sinks.

use serde::Serialize;

use crate::fields::{ConsoleType, CpuTiming, Mirroring, TvSystem};
use crate::format::Format;
use crate::header::Header;
use crate::mapper;

/// Serializable view of a [`Header`]. Undecoded headers carry only
/// `format` and `valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderReport {
    pub format: Format,
    pub valid: bool,
    #[serde(flatten)]
    pub cartridge: Option<CartridgeReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartridgeReport {
    pub prg_rom_size: u64,
    pub chr_rom_size: u64,
    pub prg_rom_size_kb: u64,
    pub chr_rom_size_kb: u64,
    pub mapper: u16,
    pub mapper_name: String,
    pub mapper_alternates: &'static [&'static str],
    pub mapper_notes: &'static str,
    pub mirroring: Mirroring,
    pub has_battery: bool,
    pub has_trainer: bool,
    pub four_screen: bool,
    pub is_vs_unisystem: bool,
    pub is_playchoice_10: bool,
    pub console_type: ConsoleType,
    pub prg_ram_size: u64,
    pub tv_system: TvSystem,
    pub has_bus_conflicts: bool,

    // iNES only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_prg_ram: Option<bool>,

    // NES 2.0 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submapper: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prg_nvram_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chr_ram_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chr_nvram_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_timing: Option<CpuTiming>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs_ppu_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs_hw_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_console_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misc_rom_count: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion_device: Option<u8>,
}

impl Header {
    #[must_use]
    pub fn report(&self) -> HeaderReport {
        HeaderReport {
            format: self.format(),
            valid: self.is_valid(),
            cartridge: CartridgeReport::new(self),
        }
    }
}

impl CartridgeReport {
    fn new(header: &Header) -> Option<Self> {
        let cart = header.cartridge()?;
        let info = mapper::info(cart.mapper);

        let mut report = Self {
            prg_rom_size: cart.prg_rom_size,
            chr_rom_size: cart.chr_rom_size,
            prg_rom_size_kb: cart.prg_rom_size / 1024,
            chr_rom_size_kb: cart.chr_rom_size / 1024,
            mapper: cart.mapper,
            mapper_name: info.name.into_owned(),
            mapper_alternates: info.alternates,
            mapper_notes: info.notes,
            mirroring: cart.mirroring,
            has_battery: cart.has_battery,
            has_trainer: cart.has_trainer,
            four_screen: cart.four_screen,
            is_vs_unisystem: cart.is_vs_unisystem,
            is_playchoice_10: cart.is_playchoice_10,
            console_type: cart.console_type,
            prg_ram_size: header.prg_ram_size()?,
            tv_system: header.tv_system()?,
            has_bus_conflicts: header.has_bus_conflicts()?,
            has_prg_ram: None,
            submapper: None,
            prg_nvram_size: None,
            chr_ram_size: None,
            chr_nvram_size: None,
            cpu_timing: None,
            vs_ppu_type: None,
            vs_hw_type: None,
            extended_console_type: None,
            misc_rom_count: None,
            expansion_device: None,
        };

        match header {
            Header::INes(h) => report.has_prg_ram = Some(h.has_prg_ram),
            Header::Nes2(h) => {
                report.submapper = Some(h.submapper);
                report.prg_nvram_size = Some(h.prg_nvram_size);
                report.chr_ram_size = Some(h.chr_ram_size);
                report.chr_nvram_size = Some(h.chr_nvram_size);
                report.cpu_timing = Some(h.cpu_timing);
                report.vs_ppu_type = h.console().vs_ppu_type();
                report.vs_hw_type = h.console().vs_hardware_type();
                report.extended_console_type = h.console().extended_console_type();
                report.misc_rom_count = Some(h.misc_rom_count);
                report.expansion_device = Some(h.expansion_device);
            }
            Header::Unsupported(_) => {}
        }
        Some(report)
    }
}
