//! Cartridge loading, header validation, and MBC1 bank switching.
//!
//! The ROM image is immutable once loaded; writes into the ROM window
//! are intercepted as MBC1 control. Supports ROM-only and MBC1
//! cartridges (type bytes 0x00-0x03), up to 2 MiB of ROM and 32 KiB of
//! banked external RAM.

use std::path::Path;

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const RAM_BANK_SIZE: usize = 0x2000;

const ROM_MIN: usize = 2 * ROM_BANK_SIZE;
const ROM_MAX: usize = 2 * 1024 * 1024;
const RAM_SIZE: usize = 4 * RAM_BANK_SIZE;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a cartridge.
#[derive(Debug)]
pub enum CartridgeError {
    /// Underlying I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),

    /// ROM length is not a multiple of 16 KiB within [32 KiB, 2 MiB].
    SizeInvalid { len: usize },

    /// Header checksum over 0x0134-0x014C does not match byte 0x014D.
    ChecksumMismatch { expected: u8, actual: u8 },

    /// The cartridge type byte names a mapper other than ROM-only/MBC1.
    UnsupportedMapper { code: u8 },
}

impl std::fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::SizeInvalid { len } => {
                write!(f, "ROM size {len} is not a 16 KiB multiple in [32 KiB, 2 MiB]")
            }
            Self::ChecksumMismatch { expected, actual } => write!(
                f,
                "header checksum expected 0x{expected:02X}, got 0x{actual:02X}"
            ),
            Self::UnsupportedMapper { code } => {
                write!(f, "unsupported cartridge type 0x{code:02X}")
            }
        }
    }
}

impl std::error::Error for CartridgeError {}

impl From<std::io::Error> for CartridgeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Cartridge
// ---------------------------------------------------------------------------

/// Compute the header checksum the boot ROM verifies:
/// x = 0; for each byte in 0x0134-0x014C, x = x - byte - 1 (wrapping).
pub fn header_checksum(rom: &[u8]) -> u8 {
    rom[0x0134..=0x014C]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1))
}

#[derive(Debug)]
pub struct Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,

    // MBC1 registers
    bank1: u8,
    bank2: u8,
    mode: u8,
    ram_enabled: bool,
}

impl Cartridge {
    pub fn from_bytes(rom: Vec<u8>) -> Result<Self, CartridgeError> {
        if rom.len() < ROM_MIN || rom.len() > ROM_MAX || rom.len() % ROM_BANK_SIZE != 0 {
            return Err(CartridgeError::SizeInvalid { len: rom.len() });
        }
        let expected = rom[0x014D];
        let actual = header_checksum(&rom);
        if actual != expected {
            return Err(CartridgeError::ChecksumMismatch { expected, actual });
        }
        let code = rom[0x0147];
        if code > 0x03 {
            return Err(CartridgeError::UnsupportedMapper { code });
        }
        Ok(Self {
            rom,
            ram: vec![0; RAM_SIZE],
            bank1: 1,
            bank2: 0,
            mode: 0,
            ram_enabled: false,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, CartridgeError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Return the MBC1 latches to their power-on state. ROM and RAM
    /// contents are untouched.
    pub fn reset_banks(&mut self) {
        self.bank1 = 1;
        self.bank2 = 0;
        self.mode = 0;
        self.ram_enabled = false;
    }

    /// Effective bank behind the switchable window. BANK1 never holds 0,
    /// so the composed index never lands on 0x00/0x20/0x40/0x60.
    fn rom_bank(&self) -> usize {
        ((self.bank2 as usize) << 5) | self.bank1 as usize
    }

    fn ram_bank(&self) -> usize {
        if self.mode == 1 { self.bank2 as usize } else { 0 }
    }

    pub fn read_rom(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => self.rom[addr as usize],
            _ => {
                let offset = self.rom_bank() * ROM_BANK_SIZE + (addr as usize - 0x4000);
                // A bank beyond the image behaves as open bus.
                if offset < self.rom.len() { self.rom[offset] } else { 0xFF }
            }
        }
    }

    /// Writes into the ROM window drive the MBC1 control registers; the
    /// image itself is never mutated.
    pub fn write_control(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = data & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                let bank = data & 0x1F;
                self.bank1 = if bank == 0 { 1 } else { bank };
            }
            0x4000..=0x5FFF => self.bank2 = data & 0x03,
            _ => self.mode = data & 0x01,
        }
    }

    pub fn read_ram(&self, addr: u16) -> u8 {
        if !self.ram_enabled {
            return 0xFF;
        }
        self.ram[self.ram_bank() * RAM_BANK_SIZE + (addr as usize - 0xA000)]
    }

    pub fn write_ram(&mut self, addr: u16, data: u8) {
        if !self.ram_enabled {
            return;
        }
        let idx = self.ram_bank() * RAM_BANK_SIZE + (addr as usize - 0xA000);
        self.ram[idx] = data;
    }
}
