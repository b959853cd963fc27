use dotmatrix_core::cpu::sm83::Sm83;
mod common;
use common::TestBus;

const IF: u16 = 0xFF0F;
const IE: u16 = 0xFFFF;

fn cpu_at_zero() -> Sm83 {
    let mut cpu = Sm83::new();
    cpu.pc = 0;
    cpu.f = 0;
    cpu.sp = 0xFFFE;
    cpu
}

fn step(cpu: &mut Sm83, bus: &mut TestBus) -> u32 {
    cpu.step(bus).expect("legal opcode")
}

// --- Servicing ---

#[test]
fn test_service_pushes_pc_and_vectors() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    cpu.ime = true;
    bus.memory[IE as usize] = 0x04; // timer enabled
    bus.memory[IF as usize] = 0x04; // timer pending
    bus.load(0, &[0x00]); // NOP

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 4 + 20, "instruction plus 20 T-cycle dispatch");
    assert_eq!(cpu.pc, 0x0050, "timer vector");
    assert!(!cpu.ime, "IME cleared by dispatch");
    assert_eq!(bus.memory[IF as usize], 0x00, "pending bit acknowledged");
    assert_eq!(cpu.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x00);
    assert_eq!(bus.memory[0xFFFC], 0x01, "PC after the NOP was pushed");
}

#[test]
fn test_service_priority_is_lowest_bit() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    cpu.ime = true;
    bus.memory[IE as usize] = 0x1F;
    bus.memory[IF as usize] = 0x1F;
    bus.load(0, &[0x00]);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.pc, 0x0040, "VBlank outranks the rest");
    assert_eq!(bus.memory[IF as usize], 0x1E, "only the serviced bit clears");
}

#[test]
fn test_all_five_vectors() {
    for (bit, vector) in [(0u8, 0x40u16), (1, 0x48), (2, 0x50), (3, 0x58), (4, 0x60)] {
        let mut cpu = cpu_at_zero();
        let mut bus = TestBus::new();
        cpu.ime = true;
        bus.memory[IE as usize] = 1 << bit;
        bus.memory[IF as usize] = 1 << bit;
        bus.load(0, &[0x00]);

        step(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, vector, "vector for interrupt bit {bit}");
    }
}

#[test]
fn test_disabled_interrupt_is_not_serviced() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    cpu.ime = true;
    bus.memory[IE as usize] = 0x00;
    bus.memory[IF as usize] = 0x1F;
    bus.load(0, &[0x00]);

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.pc, 1);
}

// --- IME control ---

#[test]
fn test_ei_takes_effect_after_next_instruction() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    bus.memory[IE as usize] = 0x01;
    bus.memory[IF as usize] = 0x01;
    bus.load(0, &[0xFB, 0x00, 0x00]); // EI ; NOP ; NOP

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 4, "no dispatch on the EI itself");
    assert!(!cpu.ime);

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 4 + 20, "dispatch once the next instruction completes");
    assert_eq!(cpu.pc, 0x0040);
}

#[test]
fn test_di_is_immediate() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    cpu.ime = true;
    bus.memory[IE as usize] = 0x01;
    bus.memory[IF as usize] = 0x01;
    bus.load(0, &[0xF3, 0x00]); // DI ; NOP

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 4);
    assert!(!cpu.ime);
    assert_eq!(cpu.pc, 1, "no dispatch after DI");

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.pc, 2);
}

#[test]
fn test_di_cancels_pending_ei() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    bus.memory[IE as usize] = 0x01;
    bus.memory[IF as usize] = 0x01;
    bus.load(0, &[0xFB, 0xF3, 0x00]); // EI ; DI ; NOP

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 4);
    assert!(!cpu.ime, "DI in the delay window wins");
}

// --- HALT ---

#[test]
fn test_halt_idles_at_four_cycles() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    bus.load(0, &[0x76]); // HALT

    step(&mut cpu, &mut bus);
    assert!(cpu.halted);
    let pc = cpu.pc;
    for _ in 0..10 {
        assert_eq!(step(&mut cpu, &mut bus), 4);
        assert_eq!(cpu.pc, pc);
    }
}

#[test]
fn test_halt_wakes_without_servicing_when_ime_clear() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    bus.memory[IE as usize] = 0x01;
    bus.load(0, &[0x76, 0x04]); // HALT ; INC B

    step(&mut cpu, &mut bus);
    assert!(cpu.halted);

    // The enabled interrupt becomes pending: the wake alone costs 4.
    bus.memory[IF as usize] = 0x01;
    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 4);
    assert!(!cpu.halted);
    assert_eq!(cpu.pc, 1, "execution resumes after the HALT");
    assert_eq!(bus.memory[IF as usize], 0x01, "nothing acknowledged");

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.b, 1);
}

#[test]
fn test_halt_wakes_into_service_when_ime_set() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    cpu.ime = true;
    bus.memory[IE as usize] = 0x01;
    bus.load(0, &[0x76]); // HALT

    step(&mut cpu, &mut bus);
    bus.memory[IF as usize] = 0x01;

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 20);
    assert_eq!(cpu.pc, 0x0040);
    assert_eq!(bus.memory[0xFFFC], 0x01, "the post-HALT PC was pushed");
}

// --- STOP ---

#[test]
fn test_stop_latches_until_resumed() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::new();
    bus.load(0, &[0x10, 0x00, 0x04]); // STOP ; (pad) ; INC B

    step(&mut cpu, &mut bus);
    assert!(cpu.stopped);
    assert_eq!(cpu.pc, 2, "STOP consumes its pad byte");

    let pc = cpu.pc;
    for _ in 0..3 {
        assert_eq!(step(&mut cpu, &mut bus), 4);
        assert_eq!(cpu.pc, pc);
    }

    cpu.resume();
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.b, 1);
}
