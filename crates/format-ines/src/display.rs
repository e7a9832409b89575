//! Human-readable header listings.

use std::fmt;

use crate::format::Format;
use crate::header::{Cartridge, Header, Nes2Console, Nes2Header};
use crate::mapper;

fn kib(bytes: u64) -> u64 {
    bytes / 1024
}

/// One-line summary: mapper, PRG size and CHR size when present.
impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(cart) = self.cartridge() else {
            return f.write_str(match self.format() {
                Format::Unif => "UNIF format (not supported)",
                Format::Archaic => "Archaic iNES (not supported)",
                _ => "Not an iNES file",
            });
        };

        write!(
            f,
            "mapper: {} ({}), PRG: {}k",
            cart.mapper,
            mapper::mapper_name(cart.mapper),
            kib(cart.prg_rom_size)
        )?;
        if cart.chr_rom_size > 0 {
            write!(f, ", CHR: {}k", kib(cart.chr_rom_size))?;
        }
        Ok(())
    }
}

/// Full listing of every decoded field, from [`Header::detailed`].
pub struct Detailed<'a>(&'a Header);

impl Header {
    #[must_use]
    pub fn detailed(&self) -> Detailed<'_> {
        Detailed(self)
    }
}

fn cartridge_parts(cart: &Cartridge, parts: &mut Vec<String>) {
    let info = mapper::info(cart.mapper);
    parts.push(format!("mapper: {} ({})", cart.mapper, info.name));
    parts.push(format!("mirroring: {}", cart.mirroring));
    parts.push(format!("PRG ROM: {}k", kib(cart.prg_rom_size)));
    parts.push(format!("CHR ROM: {}k", kib(cart.chr_rom_size)));
    if !info.alternates.is_empty() {
        parts.push(format!("Alt names: {}", info.alternates.join(", ")));
    }
    if !info.notes.is_empty() {
        parts.push(format!("Notes: {}", info.notes));
    }
}

fn nes2_parts(h: &Nes2Header, parts: &mut Vec<String>) {
    parts.push(format!("Submapper: {}", h.submapper));
    for (label, size) in [
        ("PRG RAM", h.prg_ram_size),
        ("PRG NVRAM", h.prg_nvram_size),
        ("CHR RAM", h.chr_ram_size),
        ("CHR NVRAM", h.chr_nvram_size),
    ] {
        if size > 0 {
            parts.push(format!("{label}: {}k", kib(size)));
        }
    }
    parts.push(format!("CPU Timing: {}", h.cpu_timing));
    match h.console() {
        Nes2Console::VsSystem {
            ppu_type,
            hardware_type,
        } => {
            parts.push(format!("VS PPU Type: {ppu_type}"));
            parts.push(format!("VS HW Type: {hardware_type}"));
        }
        Nes2Console::Extended { console_type } => {
            parts.push(format!("Extended Console: {console_type}"));
        }
        Nes2Console::NesFamicom | Nes2Console::PlayChoice10 => {}
    }
    if h.misc_rom_count > 0 {
        parts.push(format!("Misc ROMs: {}", h.misc_rom_count));
    }
    if h.expansion_device > 0 {
        parts.push(format!("Expansion Device: {}", h.expansion_device));
    }
}

fn flag_parts(cart: &Cartridge, parts: &mut Vec<String>) {
    for (set, label) in [
        (cart.has_trainer, "Trainer: Yes"),
        (cart.has_battery, "Battery: Yes"),
        (cart.is_vs_unisystem, "VS Unisystem"),
        (cart.is_playchoice_10, "PlayChoice-10"),
    ] {
        if set {
            parts.push(label.to_string());
        }
    }
}

impl fmt::Display for Detailed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.0;
        let Some(cart) = header.cartridge() else {
            return write!(f, "{header}");
        };

        let mut parts = Vec::new();
        cartridge_parts(cart, &mut parts);
        if let Header::Nes2(h) = header {
            nes2_parts(h, &mut parts);
        }
        flag_parts(cart, &mut parts);
        if let Some(tv) = header.tv_system() {
            parts.push(format!("TV System: {tv}"));
        }
        if let Header::INes(h) = header {
            parts.push(format!("Bus Conflicts: {}", h.has_bus_conflicts));
        }

        f.write_str(&parts.join(", "))
    }
}
