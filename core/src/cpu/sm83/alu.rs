use super::instruction::{AluOp, Operand8, Reg16};
use super::{Flag, Sm83};
use crate::core::Bus;

impl Sm83 {
    // --- Flag helpers ---

    fn do_add(&mut self, val: u8, carry_in: bool) {
        let a = self.a;
        let c_val = if carry_in && self.flag(Flag::C) { 1u8 } else { 0 };
        let result_u16 = a as u16 + val as u16 + c_val as u16;
        let result = result_u16 as u8;

        let mut f = 0;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        // H: carry out of bit 3
        if (a & 0xF) + (val & 0xF) + c_val > 0xF {
            f |= Flag::H as u8;
        }
        if result_u16 > 0xFF {
            f |= Flag::C as u8;
        }
        self.a = result;
        self.f = f;
    }

    fn do_sub(&mut self, val: u8, carry_in: bool) {
        let a = self.a;
        let c_val = if carry_in && self.flag(Flag::C) { 1u16 } else { 0 };
        let result = a.wrapping_sub(val).wrapping_sub(c_val as u8);

        let mut f = Flag::N as u8;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        // H: borrow into bit 4
        if ((a & 0xF) as u16) < (val & 0xF) as u16 + c_val {
            f |= Flag::H as u8;
        }
        if (a as u16) < val as u16 + c_val {
            f |= Flag::C as u8;
        }
        self.a = result;
        self.f = f;
    }

    /// CP: the flag effects of SUB without writing A back.
    fn do_cp(&mut self, val: u8) {
        let a = self.a;
        self.do_sub(val, false);
        self.a = a;
    }

    fn update_flags_logic(&mut self, result: u8, is_and: bool) {
        let mut f = 0;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        // AND sets H, OR/XOR clear it; N and C are always clear.
        if is_and {
            f |= Flag::H as u8;
        }
        self.f = f;
    }

    fn perform_alu_op(&mut self, op: AluOp, val: u8) {
        match op {
            AluOp::Add => self.do_add(val, false),
            AluOp::Adc => self.do_add(val, true),
            AluOp::Sub => self.do_sub(val, false),
            AluOp::Sbc => self.do_sub(val, true),
            AluOp::And => {
                self.a &= val;
                self.update_flags_logic(self.a, true);
            }
            AluOp::Xor => {
                self.a ^= val;
                self.update_flags_logic(self.a, false);
            }
            AluOp::Or => {
                self.a |= val;
                self.update_flags_logic(self.a, false);
            }
            AluOp::Cp => self.do_cp(val),
        }
    }

    // --- Instructions ---

    /// ALU A, r / ALU A, (HL) — 4/8 T
    pub(super) fn op_alu<B: Bus + ?Sized>(&mut self, bus: &mut B, op: AluOp, src: Operand8) -> u32 {
        let val = self.read_operand(bus, src);
        self.perform_alu_op(op, val);
        if src == Operand8::HlInd { 8 } else { 4 }
    }

    /// ALU A, n — 8 T
    pub(super) fn op_alu_imm<B: Bus + ?Sized>(&mut self, bus: &mut B, op: AluOp) -> u32 {
        let val = self.fetch_byte(bus);
        self.perform_alu_op(op, val);
        8
    }

    /// INC r / INC (HL) — 4/12 T. C is untouched.
    pub(super) fn op_inc<B: Bus + ?Sized>(&mut self, bus: &mut B, target: Operand8) -> u32 {
        let val = self.read_operand(bus, target);
        let result = val.wrapping_add(1);
        let mut f = self.f & Flag::C as u8;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        if (val & 0xF) + 1 > 0xF {
            f |= Flag::H as u8;
        }
        self.f = f;
        self.write_operand(bus, target, result);
        if target == Operand8::HlInd { 12 } else { 4 }
    }

    /// DEC r / DEC (HL) — 4/12 T. C is untouched.
    pub(super) fn op_dec<B: Bus + ?Sized>(&mut self, bus: &mut B, target: Operand8) -> u32 {
        let val = self.read_operand(bus, target);
        let result = val.wrapping_sub(1);
        let mut f = (self.f & Flag::C as u8) | Flag::N as u8;
        if result == 0 {
            f |= Flag::Z as u8;
        }
        if val & 0xF == 0 {
            f |= Flag::H as u8;
        }
        self.f = f;
        self.write_operand(bus, target, result);
        if target == Operand8::HlInd { 12 } else { 4 }
    }

    /// ADD HL, rr — 8 T. Z is untouched; H from bit 11, C from bit 15.
    pub(super) fn op_add_hl(&mut self, src: Reg16) -> u32 {
        let hl = self.get_hl();
        let val = self.get_rp(src);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (val & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, hl as u32 + val as u32 > 0xFFFF);
        self.set_hl(hl.wrapping_add(val));
        8
    }

    /// SP + signed offset, shared by ADD SP,e and LD HL,SP+e.
    /// The addition is signed but H and C come from unsigned low-nibble
    /// and low-byte arithmetic on the raw offset byte; Z and N clear.
    pub(super) fn sp_plus_offset<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u16 {
        let e = self.fetch_byte(bus);
        let sp = self.sp;
        let mut f = 0;
        if (sp & 0x0F) + (e as u16 & 0x0F) > 0x0F {
            f |= Flag::H as u8;
        }
        if (sp & 0xFF) + e as u16 > 0xFF {
            f |= Flag::C as u8;
        }
        self.f = f;
        sp.wrapping_add(e as i8 as i16 as u16)
    }

    /// ADD SP, e — 16 T
    pub(super) fn op_add_sp<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u32 {
        self.sp = self.sp_plus_offset(bus);
        16
    }

    /// DAA — 4 T. BCD adjust after an add or subtract, steered by N, H, C.
    /// C can be set here but never cleared.
    pub(super) fn op_daa(&mut self) -> u32 {
        let mut a = self.a;
        let mut carry = self.flag(Flag::C);
        if !self.flag(Flag::N) {
            let mut adjust = 0u8;
            if self.flag(Flag::H) || a & 0x0F > 0x09 {
                adjust |= 0x06;
            }
            if carry || a > 0x99 {
                adjust |= 0x60;
                carry = true;
            }
            a = a.wrapping_add(adjust);
        } else {
            let mut adjust = 0u8;
            if self.flag(Flag::H) {
                adjust |= 0x06;
            }
            if carry {
                adjust |= 0x60;
            }
            a = a.wrapping_sub(adjust);
        }
        self.a = a;
        self.set_flag(Flag::Z, a == 0);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, carry);
        4
    }

    /// CPL — 4 T. A := !A; N and H set, Z and C untouched.
    pub(super) fn op_cpl(&mut self) -> u32 {
        self.a = !self.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        4
    }

    /// SCF — 4 T
    pub(super) fn op_scf(&mut self) -> u32 {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        4
    }

    /// CCF — 4 T
    pub(super) fn op_ccf(&mut self) -> u32 {
        let carry = self.flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        4
    }
}
