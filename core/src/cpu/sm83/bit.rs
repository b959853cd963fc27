use super::instruction::{Operand8, RotOp};
use super::{Flag, Sm83};
use crate::core::Bus;

impl Sm83 {
    /// Shared rotate/shift core. Sets Z from the result, clears N and H,
    /// and sets C from the bit shifted out.
    fn do_rot(&mut self, op: RotOp, val: u8) -> u8 {
        let carry_in = self.flag(Flag::C) as u8;
        let (result, carry) = match op {
            RotOp::Rlc => (val.rotate_left(1), val & 0x80 != 0),
            RotOp::Rrc => (val.rotate_right(1), val & 0x01 != 0),
            RotOp::Rl => ((val << 1) | carry_in, val & 0x80 != 0),
            RotOp::Rr => ((val >> 1) | (carry_in << 7), val & 0x01 != 0),
            RotOp::Sla => (val << 1, val & 0x80 != 0),
            // SRA keeps bit 7, SRL zero-fills
            RotOp::Sra => ((val >> 1) | (val & 0x80), val & 0x01 != 0),
            RotOp::Swap => (val.rotate_left(4), false),
            RotOp::Srl => (val >> 1, val & 0x01 != 0),
        };
        let mut f = 0;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        if carry {
            f |= Flag::C as u8;
        }
        self.f = f;
        result
    }

    /// CB-prefixed rotate/shift — 8 T, or 16 T on (HL).
    pub(super) fn op_rot<B: Bus + ?Sized>(&mut self, bus: &mut B, op: RotOp, target: Operand8) -> u32 {
        let val = self.read_operand(bus, target);
        let result = self.do_rot(op, val);
        self.write_operand(bus, target, result);
        if target == Operand8::HlInd { 16 } else { 8 }
    }

    // The accumulator-only forms always report Z clear.

    /// RLCA — 4 T
    pub(super) fn op_rlca(&mut self) -> u32 {
        self.a = self.do_rot(RotOp::Rlc, self.a);
        self.set_flag(Flag::Z, false);
        4
    }

    /// RRCA — 4 T
    pub(super) fn op_rrca(&mut self) -> u32 {
        self.a = self.do_rot(RotOp::Rrc, self.a);
        self.set_flag(Flag::Z, false);
        4
    }

    /// RLA — 4 T
    pub(super) fn op_rla(&mut self) -> u32 {
        self.a = self.do_rot(RotOp::Rl, self.a);
        self.set_flag(Flag::Z, false);
        4
    }

    /// RRA — 4 T
    pub(super) fn op_rra(&mut self) -> u32 {
        self.a = self.do_rot(RotOp::Rr, self.a);
        self.set_flag(Flag::Z, false);
        4
    }

    /// BIT b, r — 8 T, or 12 T on (HL). Z reports the complement of the
    /// tested bit; C is untouched.
    pub(super) fn op_bit<B: Bus + ?Sized>(&mut self, bus: &mut B, bit: u8, target: Operand8) -> u32 {
        let val = self.read_operand(bus, target);
        self.set_flag(Flag::Z, val & (1 << bit) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
        if target == Operand8::HlInd { 12 } else { 8 }
    }

    /// RES b, r — 8 T, or 16 T on (HL). No flags.
    pub(super) fn op_res<B: Bus + ?Sized>(&mut self, bus: &mut B, bit: u8, target: Operand8) -> u32 {
        let val = self.read_operand(bus, target);
        self.write_operand(bus, target, val & !(1 << bit));
        if target == Operand8::HlInd { 16 } else { 8 }
    }

    /// SET b, r — 8 T, or 16 T on (HL). No flags.
    pub(super) fn op_set<B: Bus + ?Sized>(&mut self, bus: &mut B, bit: u8, target: Operand8) -> u32 {
        let val = self.read_operand(bus, target);
        self.write_operand(bus, target, val | (1 << bit));
        if target == Operand8::HlInd { 16 } else { 8 }
    }
}
