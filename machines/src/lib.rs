pub mod cartridge;
pub mod dmg;

pub use cartridge::{Cartridge, CartridgeError};
pub use dmg::DmgSystem;
