pub mod core;
pub mod cpu;
pub mod device;

pub mod prelude {
    pub use crate::core::machine::{InputButton, Machine, MachineError};
    pub use crate::core::Bus;
    pub use crate::cpu::sm83::Sm83;
    pub use crate::device::joypad::Joypad;
    pub use crate::device::ppu::Ppu;
}
