//! End-to-end: classify an image, filter it, and split it into PRG and CHR.

use format_ines::{Error, Header, HeaderFilter, Mirroring, RomRegion, TRAINER_LEN};

fn make_nes2_image(prg_units: u8, chr_units: u8, trainer: bool) -> Vec<u8> {
    let mut data = vec![0u8; 16];
    data[0..4].copy_from_slice(b"NES\x1a");
    data[4] = prg_units;
    data[5] = chr_units;
    data[6] = 0x41 | if trainer { 0x04 } else { 0 }; // mapper 4, vertical
    data[7] = 0x08;
    data[10] = 0x70; // 8K PRG NVRAM
    if trainer {
        data.extend(std::iter::repeat_n(0xEA, TRAINER_LEN));
    }
    data.extend(std::iter::repeat_n(0xAA, usize::from(prg_units) * 16384));
    data.extend(std::iter::repeat_n(0xCC, usize::from(chr_units) * 8192));
    data
}

#[test]
fn split_nes2_image() {
    let data = make_nes2_image(8, 16, true);
    let header = Header::parse(&data).expect("parse");
    assert_eq!(header.to_string(), "mapper: 4 (MMC3), PRG: 128k, CHR: 128k");

    let filter = HeaderFilter::new()
        .trainer_only()
        .mapper(4)
        .mirroring(Mirroring::Vertical)
        .prg_kb(Some(128), Some(128));
    assert!(filter.matches(&header));

    let layout = header.layout().expect("layout");
    assert_eq!(layout.total_len(), data.len() as u64);

    let parts = layout.split(&data).expect("split");
    assert_eq!(parts.trainer.map(<[u8]>::len), Some(TRAINER_LEN));
    assert_eq!(parts.prg.len(), 8 * 16384);
    assert!(parts.prg.iter().all(|&b| b == 0xAA));
    assert_eq!(parts.chr.len(), 16 * 8192);
    assert!(parts.chr.iter().all(|&b| b == 0xCC));
}

#[test]
fn truncated_image_reports_region() {
    let mut data = make_nes2_image(2, 1, false);
    data.truncate(16 + 32768 + 4096);
    let header = Header::parse(&data).expect("parse");
    let err = header
        .layout()
        .and_then(|layout| layout.split(&data).map(|_| ()))
        .expect_err("truncated");
    assert_eq!(
        err,
        Error::Truncated {
            region: RomRegion::Chr,
            expected: 8192,
            actual: 4096,
        }
    );
    assert_eq!(
        err.to_string(),
        "EOF reached while reading CHR part: expected 8192 bytes, got 4096"
    );
}

#[test]
fn report_round_trips_through_json() {
    let data = make_nes2_image(2, 1, false);
    let header = Header::parse(&data).expect("parse");
    let json = serde_json::to_string(&header.report()).expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(value["format"], "NES 2.0");
    assert_eq!(value["mapper_name"], "MMC3");
    assert_eq!(value["mapper_alternates"], serde_json::json!(["TxROM", "MMC6"]));
    assert_eq!(value["prg_nvram_size"], 8192);
    assert_eq!(value["submapper"], 0);
    assert_eq!(value["mirroring"], "V");
}
