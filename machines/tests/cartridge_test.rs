use dotmatrix_machines::cartridge::{Cartridge, CartridgeError, header_checksum};
mod common;
use common::build_rom;

#[test]
fn test_valid_image_loads() {
    assert!(Cartridge::from_bytes(build_rom(2, &[])).is_ok());
    assert!(Cartridge::from_bytes(build_rom(128, &[])).is_ok(), "2 MiB ceiling");
}

#[test]
fn test_rom_only_type_is_accepted() {
    let mut rom = build_rom(2, &[]);
    rom[0x0147] = 0x00;
    rom[0x014D] = header_checksum(&rom);
    assert!(Cartridge::from_bytes(rom).is_ok());
}

#[test]
fn test_too_short_image_is_rejected() {
    let rom = vec![0u8; 0x4000];
    match Cartridge::from_bytes(rom) {
        Err(CartridgeError::SizeInvalid { len }) => assert_eq!(len, 0x4000),
        other => panic!("expected SizeInvalid, got {other:?}", other = other.err()),
    }
}

#[test]
fn test_unaligned_image_is_rejected() {
    let mut rom = build_rom(2, &[]);
    rom.push(0);
    assert!(matches!(
        Cartridge::from_bytes(rom),
        Err(CartridgeError::SizeInvalid { .. })
    ));
}

#[test]
fn test_oversized_image_is_rejected() {
    let rom = vec![0u8; 129 * 0x4000];
    assert!(matches!(
        Cartridge::from_bytes(rom),
        Err(CartridgeError::SizeInvalid { .. })
    ));
}

#[test]
fn test_bad_checksum_is_rejected() {
    let mut rom = build_rom(2, &[]);
    rom[0x014D] = rom[0x014D].wrapping_add(1);
    let err = Cartridge::from_bytes(rom).unwrap_err();
    assert!(matches!(err, CartridgeError::ChecksumMismatch { .. }));
    assert!(err.to_string().contains("checksum"), "got: {err}");
}

#[test]
fn test_unsupported_mapper_is_rejected() {
    let mut rom = build_rom(2, &[]);
    rom[0x0147] = 0x13; // MBC3+RAM+BATTERY
    rom[0x014D] = header_checksum(&rom);
    match Cartridge::from_bytes(rom) {
        Err(CartridgeError::UnsupportedMapper { code }) => assert_eq!(code, 0x13),
        other => panic!("expected UnsupportedMapper, got {other:?}", other = other.err()),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Cartridge::from_file(std::path::Path::new("/no/such/cartridge.gb")).unwrap_err();
    assert!(matches!(err, CartridgeError::Io(_)));
}
