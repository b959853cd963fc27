use dotmatrix_machines::DmgSystem;
use dotmatrix_machines::cartridge::{Cartridge, header_checksum};

/// Build a minimal valid MBC1 image: `banks` × 16 KiB with `program`
/// placed at the 0x0100 entry point.
pub fn build_rom(banks: usize, program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; banks * 0x4000];
    rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
    rom[0x0147] = 0x01; // MBC1
    rom[0x014D] = header_checksum(&rom);
    rom
}

/// A powered-on DMG with `program` at the entry point of a 32 KiB image.
pub fn boot(program: &[u8]) -> DmgSystem {
    let cart = Cartridge::from_bytes(build_rom(2, program)).expect("valid test image");
    DmgSystem::new(cart)
}

pub fn boot_image(rom: Vec<u8>) -> DmgSystem {
    let cart = Cartridge::from_bytes(rom).expect("valid test image");
    DmgSystem::new(cart)
}
