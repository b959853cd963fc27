//! SM83 instruction model: decoded variants with cycle-cost metadata.
//!
//! Decoding is a two-level dispatch: `decode()` covers the primary opcode
//! page (0xCB maps to [`Instruction::Prefix`]), `decode_cb()` covers the
//! second page reached through it. Instructions are plain values with
//! small payloads; immediate operands are placeholders fetched from the
//! instruction stream by the executor.

/// The eleven primary opcodes with no mapping. Fetching one is a fatal
/// error that latches the CPU stopped.
pub const ILLEGAL_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
}

/// An 8-bit operand slot: one of the seven registers, or memory at HL
/// (the 3-bit selector pattern 110).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand8 {
    Reg(Reg8),
    HlInd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

/// Rotate/shift group of the CB page (rows 0x00-0x3F).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

/// Branch condition from opcode bits 4:3 (00=NZ, 01=Z, 10=NC, 11=C).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

/// Addressing forms of the accumulator load/store family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndAddr {
    /// (BC)
    Bc,
    /// (DE)
    De,
    /// (HL), then HL += 1
    HlInc,
    /// (HL), then HL -= 1
    HlDec,
    /// (nn)
    Imm16,
    /// (0xFF00 + n)
    HighImm,
    /// (0xFF00 + C)
    HighC,
}

/// T-cycle cost of an instruction: constant, or a pair for conditional
/// branches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cycles {
    Fixed(u32),
    Branch { not_taken: u32, taken: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Halt,
    Stop,
    Di,
    Ei,
    /// 0xCB: executing this fetches one more byte and runs the
    /// second-page instruction it decodes to.
    Prefix,

    // 8-bit loads
    Ld8 { dst: Operand8, src: Operand8 },
    LdImm8 { dst: Operand8 },
    LdAInd { src: IndAddr },
    LdIndA { dst: IndAddr },

    // 16-bit loads
    LdImm16 { dst: Reg16 },
    LdIndSp,
    LdSpHl,
    LdHlSpOffset,
    Push { reg: Reg16 },
    Pop { reg: Reg16 },

    // ALU
    Alu { op: AluOp, src: Operand8 },
    AluImm { op: AluOp },
    Inc { target: Operand8 },
    Dec { target: Operand8 },
    AddHl { src: Reg16 },
    AddSpOffset,
    Inc16 { reg: Reg16 },
    Dec16 { reg: Reg16 },

    // Accumulator rotates and misc
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    // Control flow
    Jp,
    JpCond { cond: Cond },
    JpHl,
    Jr,
    JrCond { cond: Cond },
    Call,
    CallCond { cond: Cond },
    Ret,
    RetCond { cond: Cond },
    Reti,
    Rst { vector: u8 },

    // CB page
    Rot { op: RotOp, target: Operand8 },
    Bit { bit: u8, target: Operand8 },
    Res { bit: u8, target: Operand8 },
    Set { bit: u8, target: Operand8 },
}

/// 3-bit register selector; 110 is the HL-indirect slot.
fn sel(bits: u8) -> Operand8 {
    match bits & 0x07 {
        0 => Operand8::Reg(Reg8::B),
        1 => Operand8::Reg(Reg8::C),
        2 => Operand8::Reg(Reg8::D),
        3 => Operand8::Reg(Reg8::E),
        4 => Operand8::Reg(Reg8::H),
        5 => Operand8::Reg(Reg8::L),
        6 => Operand8::HlInd,
        _ => Operand8::Reg(Reg8::A),
    }
}

/// 2-bit register pair selector for the BC/DE/HL/SP rows.
fn rp(bits: u8) -> Reg16 {
    match bits & 0x03 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::SP,
    }
}

/// 2-bit register pair selector for PUSH/POP (SP slot is AF).
fn rp_af(bits: u8) -> Reg16 {
    match bits & 0x03 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::AF,
    }
}

fn alu(bits: u8) -> AluOp {
    match bits & 0x07 {
        0 => AluOp::Add,
        1 => AluOp::Adc,
        2 => AluOp::Sub,
        3 => AluOp::Sbc,
        4 => AluOp::And,
        5 => AluOp::Xor,
        6 => AluOp::Or,
        _ => AluOp::Cp,
    }
}

fn cond(bits: u8) -> Cond {
    match bits & 0x03 {
        0 => Cond::NotZero,
        1 => Cond::Zero,
        2 => Cond::NotCarry,
        _ => Cond::Carry,
    }
}

fn ind_cycles(addr: IndAddr) -> u32 {
    match addr {
        IndAddr::Bc | IndAddr::De | IndAddr::HlInc | IndAddr::HlDec | IndAddr::HighC => 8,
        IndAddr::HighImm => 12,
        IndAddr::Imm16 => 16,
    }
}

impl Instruction {
    /// First-level decode. Total: every primary opcode produces a variant
    /// except the eleven in [`ILLEGAL_OPCODES`], which return `None`.
    pub fn decode(opcode: u8) -> Option<Instruction> {
        use Instruction::*;
        let inst = match opcode {
            0x00 => Nop,
            0x10 => Stop,
            0x76 => Halt,
            0xF3 => Di,
            0xFB => Ei,
            0xCB => Prefix,

            // Accumulator loads through memory
            0x02 => LdIndA { dst: IndAddr::Bc },
            0x12 => LdIndA { dst: IndAddr::De },
            0x22 => LdIndA { dst: IndAddr::HlInc },
            0x32 => LdIndA { dst: IndAddr::HlDec },
            0x0A => LdAInd { src: IndAddr::Bc },
            0x1A => LdAInd { src: IndAddr::De },
            0x2A => LdAInd { src: IndAddr::HlInc },
            0x3A => LdAInd { src: IndAddr::HlDec },
            0xE0 => LdIndA { dst: IndAddr::HighImm },
            0xF0 => LdAInd { src: IndAddr::HighImm },
            0xE2 => LdIndA { dst: IndAddr::HighC },
            0xF2 => LdAInd { src: IndAddr::HighC },
            0xEA => LdIndA { dst: IndAddr::Imm16 },
            0xFA => LdAInd { src: IndAddr::Imm16 },

            // 16-bit loads and stack pointer plumbing
            0x08 => LdIndSp,
            0xE8 => AddSpOffset,
            0xF8 => LdHlSpOffset,
            0xF9 => LdSpHl,

            // Accumulator rotates and misc (row 0x00-0x3F, low octet x7/xF)
            0x07 => Rlca,
            0x0F => Rrca,
            0x17 => Rla,
            0x1F => Rra,
            0x27 => Daa,
            0x2F => Cpl,
            0x37 => Scf,
            0x3F => Ccf,

            // Control flow
            0x18 => Jr,
            0xC3 => Jp,
            0xE9 => JpHl,
            0xC9 => Ret,
            0xD9 => Reti,
            0xCD => Call,

            // Pattern rows; masks keep these clear of the literals above
            op if op & 0xCF == 0x01 => LdImm16 { dst: rp(op >> 4) },
            op if op & 0xCF == 0x03 => Inc16 { reg: rp(op >> 4) },
            op if op & 0xCF == 0x0B => Dec16 { reg: rp(op >> 4) },
            op if op & 0xCF == 0x09 => AddHl { src: rp(op >> 4) },
            op if op & 0xC7 == 0x04 => Inc { target: sel(op >> 3) },
            op if op & 0xC7 == 0x05 => Dec { target: sel(op >> 3) },
            op if op & 0xC7 == 0x06 => LdImm8 { dst: sel(op >> 3) },
            op if op & 0xE7 == 0x20 => JrCond { cond: cond(op >> 3) },
            op if op & 0xC0 == 0x40 => Ld8 { dst: sel(op >> 3), src: sel(op) },
            op if op & 0xC0 == 0x80 => Alu { op: alu(op >> 3), src: sel(op) },
            op if op & 0xE7 == 0xC0 => RetCond { cond: cond(op >> 3) },
            op if op & 0xE7 == 0xC2 => JpCond { cond: cond(op >> 3) },
            op if op & 0xE7 == 0xC4 => CallCond { cond: cond(op >> 3) },
            op if op & 0xCF == 0xC5 => Push { reg: rp_af(op >> 4) },
            op if op & 0xCF == 0xC1 => Pop { reg: rp_af(op >> 4) },
            op if op & 0xC7 == 0xC6 => AluImm { op: alu(op >> 3) },
            op if op & 0xC7 == 0xC7 => Rst { vector: op & 0x38 },

            _ => return None,
        };
        Some(inst)
    }

    /// Second-level decode for the CB page. Total over all 256 opcodes.
    pub fn decode_cb(opcode: u8) -> Instruction {
        let target = sel(opcode);
        let bit = (opcode >> 3) & 0x07;
        match opcode >> 6 {
            0 => {
                let op = match bit {
                    0 => RotOp::Rlc,
                    1 => RotOp::Rrc,
                    2 => RotOp::Rl,
                    3 => RotOp::Rr,
                    4 => RotOp::Sla,
                    5 => RotOp::Sra,
                    6 => RotOp::Swap,
                    _ => RotOp::Srl,
                };
                Instruction::Rot { op, target }
            }
            1 => Instruction::Bit { bit, target },
            2 => Instruction::Res { bit, target },
            _ => Instruction::Set { bit, target },
        }
    }

    /// T-cycle cost. For conditional branches the executor reports the
    /// not-taken or taken leg depending on the flag test.
    pub fn cycles(&self) -> Cycles {
        use Cycles::*;
        use Instruction::*;
        let hl = |target: Operand8, reg: u32, mem: u32| {
            if target == Operand8::HlInd { Fixed(mem) } else { Fixed(reg) }
        };
        match *self {
            Nop | Halt | Stop | Di | Ei | JpHl => Fixed(4),
            Rlca | Rrca | Rla | Rra | Daa | Cpl | Scf | Ccf => Fixed(4),
            // The prefixed instruction supplies the full cost.
            Prefix => Fixed(4),
            Ld8 { dst, src } => {
                if dst == Operand8::HlInd || src == Operand8::HlInd {
                    Fixed(8)
                } else {
                    Fixed(4)
                }
            }
            LdImm8 { dst } => hl(dst, 8, 12),
            LdAInd { src } => Fixed(ind_cycles(src)),
            LdIndA { dst } => Fixed(ind_cycles(dst)),
            LdImm16 { .. } => Fixed(12),
            LdIndSp => Fixed(20),
            LdSpHl => Fixed(8),
            LdHlSpOffset => Fixed(12),
            Push { .. } => Fixed(16),
            Pop { .. } => Fixed(12),
            Alu { src, .. } => hl(src, 4, 8),
            AluImm { .. } => Fixed(8),
            Inc { target } | Dec { target } => hl(target, 4, 12),
            AddHl { .. } => Fixed(8),
            AddSpOffset => Fixed(16),
            Inc16 { .. } | Dec16 { .. } => Fixed(8),
            Jp => Fixed(16),
            JpCond { .. } => Branch { not_taken: 12, taken: 16 },
            Jr => Fixed(12),
            JrCond { .. } => Branch { not_taken: 8, taken: 12 },
            Call => Fixed(24),
            CallCond { .. } => Branch { not_taken: 12, taken: 24 },
            Ret => Fixed(16),
            RetCond { .. } => Branch { not_taken: 8, taken: 20 },
            Reti => Fixed(16),
            Rst { .. } => Fixed(16),
            Rot { target, .. } => hl(target, 8, 16),
            Bit { target, .. } => hl(target, 8, 12),
            Res { target, .. } | Set { target, .. } => hl(target, 8, 16),
        }
    }
}
