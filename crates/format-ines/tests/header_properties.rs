//! Header classification and decoding properties over synthetic headers.

use format_ines::{
    CHR_ROM_UNIT, ConsoleType, Error, Format, HEADER_LEN, Header, Nes2Console, PRG_ROM_UNIT,
    fields,
};

fn with_magic(magic: &[u8; 4], rest: [u8; 12]) -> [u8; HEADER_LEN] {
    let mut raw = [0u8; HEADER_LEN];
    raw[..4].copy_from_slice(magic);
    raw[4..].copy_from_slice(&rest);
    raw
}

/// Cheap deterministic byte stream for sweeping header contents.
fn xorshift(seed: &mut u32) -> u8 {
    *seed ^= *seed << 13;
    *seed ^= *seed >> 17;
    *seed ^= *seed << 5;
    (*seed >> 24) as u8
}

fn random_tail(seed: &mut u32) -> [u8; 12] {
    let mut rest = [0u8; 12];
    for b in &mut rest {
        *b = xorshift(seed);
    }
    rest
}

#[test]
fn foreign_magic_is_unknown() {
    let mut seed = 0x1234_5678;
    for _ in 0..500 {
        let mut magic = [0u8; 4];
        for b in &mut magic {
            *b = xorshift(&mut seed);
        }
        if &magic == b"NES\x1a" || &magic == b"UNIF" {
            continue;
        }
        let header = Header::from_raw(with_magic(&magic, random_tail(&mut seed)));
        assert_eq!(header.format(), Format::Unknown);
        assert!(!header.is_valid());
        assert!(header.cartridge().is_none());
        assert!(header.submapper().is_none());
    }
}

#[test]
fn unif_is_detected_but_not_decoded() {
    let mut seed = 42;
    for _ in 0..50 {
        let header = Header::from_raw(with_magic(b"UNIF", random_tail(&mut seed)));
        assert_eq!(header.format(), Format::Unif);
        assert!(!header.is_valid());
        assert!(header.mapper().is_none());
    }
}

#[test]
fn nes2_marker_wins_regardless_of_tail() {
    let mut seed = 7;
    for _ in 0..500 {
        let mut rest = random_tail(&mut seed);
        rest[3] = (rest[3] & !0x0C) | 0x08;
        let header = Header::from_raw(with_magic(b"NES\x1a", rest));
        assert_eq!(header.format(), Format::Nes20);
        assert!(header.is_valid());
        assert!(header.submapper().is_some());
        assert!(header.cpu_timing().is_some());
    }
}

#[test]
fn dirty_tail_without_marker_is_ines07() {
    let mut seed = 99;
    for _ in 0..500 {
        let mut rest = random_tail(&mut seed);
        rest[3] &= !0x0C;
        rest[11] |= 0x01;
        let header = Header::from_raw(with_magic(b"NES\x1a", rest));
        assert_eq!(header.format(), Format::INes07);
        assert!(header.is_valid());
        assert!(header.submapper().is_none());
    }
}

#[test]
fn archaic_is_invalid() {
    let mut rest = [0u8; 12];
    rest[3] = 0x04;
    let header = Header::from_raw(with_magic(b"NES\x1a", rest));
    assert_eq!(header.format(), Format::Archaic);
    assert!(!header.is_valid());
}

#[test]
fn fifteen_bytes_is_too_short() {
    let raw = with_magic(b"NES\x1a", [2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(
        Header::parse(&raw[..15]),
        Err(Error::TooShort { len: 15 })
    );
    assert!(Header::parse(&raw).is_ok());
}

#[test]
fn nes2_size_notation() {
    assert_eq!(fields::nes2_rom_size(0x01, 0x00, PRG_ROM_UNIT), 16384);
    assert_eq!(fields::nes2_rom_size(0xFF, 0x0E, PRG_ROM_UNIT), 0x0EFF * 16384);
    assert_eq!(fields::nes2_rom_size(0b0000_0100, 0x0F, PRG_ROM_UNIT), 2);
    assert_eq!(fields::nes2_rom_size(0b1111_1111, 0x0F, CHR_ROM_UNIT), u64::MAX);
}

#[test]
fn shift_sizes() {
    assert_eq!(fields::shift_size(0), 0);
    assert_eq!(fields::shift_size(1), 128);
    assert_eq!(fields::shift_size(15), 64 * 32768);
}

#[test]
fn console_fields_are_exclusive_for_every_type() {
    let mut seed = 3;
    for _ in 0..200 {
        let mut rest = random_tail(&mut seed);
        rest[3] = (rest[3] & !0x0C) | 0x08;
        let Header::Nes2(h) = Header::from_raw(with_magic(b"NES\x1a", rest)) else {
            panic!("expected NES 2.0 header");
        };
        assert_eq!(h.console().console_type(), h.cartridge().console_type);
        match h.console() {
            Nes2Console::VsSystem { .. } => {
                assert!(h.console().extended_console_type().is_none());
            }
            Nes2Console::Extended { .. } => {
                assert!(h.console().vs_ppu_type().is_none());
                assert!(h.console().vs_hardware_type().is_none());
            }
            Nes2Console::NesFamicom | Nes2Console::PlayChoice10 => {
                assert!(h.console().extended_console_type().is_none());
                assert!(h.console().vs_ppu_type().is_none());
            }
        }
    }
}

#[test]
fn nes2_mapper_513() {
    // 513 = 0x201 split across flags 6 (low), flags 7 (mid) and byte 8 (high).
    let raw = with_magic(b"NES\x1a", [2, 1, 0x10, 0x08, 0x02, 0, 0, 0, 0, 0, 0, 0]);
    let header = Header::parse(&raw).expect("parse");
    assert_eq!(header.mapper(), Some(513));
    assert_eq!(header.prg_rom_size(), Some(32768));
    assert_eq!(header.chr_rom_size(), Some(8192));
    assert_eq!(
        header.cartridge().map(|c| c.console_type),
        Some(ConsoleType::NesFamicom)
    );
}

#[test]
fn nes2_max_mapper() {
    let raw = with_magic(b"NES\x1a", [1, 0, 0xF0, 0xF8, 0xFF, 0, 0, 0, 0, 0, 0, 0]);
    let header = Header::from_raw(raw);
    assert_eq!(header.mapper(), Some(4095));
    assert_eq!(header.submapper(), Some(15));
}

#[test]
fn ines_mapper_stays_8_bit() {
    // Byte 8 is PRG RAM in iNES; it must not leak into the mapper number.
    let raw = with_magic(b"NES\x1a", [1, 0, 0xF0, 0xF0, 0xFF, 0, 0, 0, 0, 0, 0, 0]);
    let header = Header::from_raw(raw);
    assert_eq!(header.format(), Format::INes);
    assert_eq!(header.mapper(), Some(255));
    assert_eq!(header.prg_ram_size(), Some(255 * 8192));
}

#[test]
fn headers_parse_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Header>();
    assert_send_sync::<Error>();

    let raw = &with_magic(b"NES\x1a", [2, 1, 0x10, 0x08, 0x02, 0, 0, 0, 0, 0, 0, 0]);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || Header::parse(raw).expect("parse")))
            .collect();
        for handle in handles {
            let header = handle.join().expect("thread");
            assert_eq!(header.mapper(), Some(513));
        }
    });
}
