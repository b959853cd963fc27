use super::instruction::Cond;
use super::{Flag, Sm83};
use crate::core::Bus;

impl Sm83 {
    fn cond_met(&self, cond: Cond) -> bool {
        match cond {
            Cond::NotZero => !self.flag(Flag::Z),
            Cond::Zero => self.flag(Flag::Z),
            Cond::NotCarry => !self.flag(Flag::C),
            Cond::Carry => self.flag(Flag::C),
        }
    }

    /// JP nn — 16 T
    pub(super) fn op_jp<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        self.pc = self.fetch_word(bus);
        16
    }

    /// JP cc, nn — 12/16 T
    pub(super) fn op_jp_cond<B: Bus + ?Sized>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        let target = self.fetch_word(bus);
        if self.cond_met(cond) {
            self.pc = target;
            16
        } else {
            12
        }
    }

    /// JR e — 12 T. The signed offset is relative to the PC after the
    /// offset byte has been consumed.
    pub(super) fn op_jr<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch_byte(bus) as i8;
        self.pc = self.pc.wrapping_add(offset as i16 as u16);
        12
    }

    /// JR cc, e — 8/12 T
    pub(super) fn op_jr_cond<B: Bus + ?Sized>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        let offset = self.fetch_byte(bus) as i8;
        if self.cond_met(cond) {
            self.pc = self.pc.wrapping_add(offset as i16 as u16);
            12
        } else {
            8
        }
    }

    /// CALL nn — 24 T
    pub(super) fn op_call<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        let target = self.fetch_word(bus);
        self.push_word(bus, self.pc);
        self.pc = target;
        24
    }

    /// CALL cc, nn — 12/24 T
    pub(super) fn op_call_cond<B: Bus + ?Sized>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        let target = self.fetch_word(bus);
        if self.cond_met(cond) {
            self.push_word(bus, self.pc);
            self.pc = target;
            24
        } else {
            12
        }
    }

    /// RET — 16 T
    pub(super) fn op_ret<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        self.pc = self.pop_word(bus);
        16
    }

    /// RET cc — 8/20 T
    pub(super) fn op_ret_cond<B: Bus + ?Sized>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        if self.cond_met(cond) {
            self.pc = self.pop_word(bus);
            20
        } else {
            8
        }
    }

    /// RETI — 16 T. Pops the return address and re-enables IME in one go,
    /// with no EI-style delay.
    pub(super) fn op_reti<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        self.pc = self.pop_word(bus);
        self.ime = true;
        16
    }

    /// RST n — 16 T
    pub(super) fn op_rst<B: Bus + ?Sized>(&mut self, bus: &mut B, vector: u8) -> u32 {
        self.push_word(bus, self.pc);
        self.pc = vector as u16;
        16
    }
}
