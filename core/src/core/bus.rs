/// The 16-bit address space as seen by the CPU, the PPU, and OAM DMA.
///
/// The machine implements this over its full memory map (ROM banking,
/// RAM regions, I/O registers); tests substitute a flat 64 KiB array to
/// exercise CPU and PPU semantics in isolation.
///
/// Reads and writes never fail: unmapped reads yield 0 and unmapped
/// writes are dropped by the implementation.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}
