/*!
dispatch - Orchestrator for a single 6502 CPU step (interrupts / fetch / classify / execute)

Overview
========
One call to `step` performs exactly one of:
1. NMI entry, when an NMI edge is latched (7 cycles).
2. IRQ entry, when the IRQ line is asserted and I is clear (7 cycles).
3. One instruction, in three phases:
   - Fetch: read the opcode at PC.
   - Classify: `opcode & 3` selects the group (Control, Alu, ReadModifyWrite,
     Illegal); the group decoder yields an operation and addressing mode.
   - Execute: resolve the operand, apply the operation, and charge the base
     cycles plus any page-cross / branch penalty.

Illegal opcodes
===============
Group 3 and every undefined pattern inside groups 0-2 are rejected during
Classify, before PC advances or any register changes. The step returns
`CpuError::IllegalOpcode` and the caller decides how to halt.

Tracing
=======
With the `trace` feature each executed instruction is logged at `trace` level
before it runs.
*/

pub(crate) mod alu;
pub(crate) mod control;
pub(crate) mod rmw;

use std::fmt;

use crate::bus::Bus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::cycles::base_cycles;
use crate::cpu::state::CpuState;
use crate::cpu::status::Flag;
use crate::cpu::vectors::{INTERRUPT_CYCLES, Vector, service_interrupt};
use crate::error::CpuError;

pub use alu::AluOp;
pub use control::ControlOp;
pub use rmw::RmwOp;

/// Instruction group selected by the low two opcode bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeGroup {
    Control,
    Alu,
    ReadModifyWrite,
    Illegal,
}

#[inline]
pub const fn classify(opcode: u8) -> OpcodeGroup {
    match opcode & 0b11 {
        0b00 => OpcodeGroup::Control,
        0b01 => OpcodeGroup::Alu,
        0b10 => OpcodeGroup::ReadModifyWrite,
        _ => OpcodeGroup::Illegal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Control(ControlOp),
    Alu(AluOp),
    Rmw(RmwOp),
}

impl Operation {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Operation::Control(op) => op.mnemonic(),
            Operation::Alu(op) => op.mnemonic(),
            Operation::Rmw(op) => op.mnemonic(),
        }
    }
}

/// A fully decoded official opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub opcode: u8,
    pub operation: Operation,
    pub mode: AddressingMode,
}

impl Instruction {
    /// Instruction length in bytes, opcode included.
    pub const fn byte_len(self) -> u16 {
        // BRK reserves a padding byte after the opcode
        if let Operation::Control(ControlOp::Brk) = self.operation {
            return 2;
        }
        1 + self.mode.operand_len()
    }

    pub fn base_cycles(self) -> u32 {
        base_cycles(self.opcode)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.operation.mnemonic(), self.mode)
    }
}

/// Decode `opcode`, or `None` when it is not an official instruction.
pub fn decode(opcode: u8) -> Option<Instruction> {
    let (operation, mode) = match classify(opcode) {
        OpcodeGroup::Control => control::decode(opcode).map(|(op, m)| (Operation::Control(op), m)),
        OpcodeGroup::Alu => alu::decode(opcode).map(|(op, m)| (Operation::Alu(op), m)),
        OpcodeGroup::ReadModifyWrite => rmw::decode(opcode).map(|(op, m)| (Operation::Rmw(op), m)),
        OpcodeGroup::Illegal => None,
    }?;
    Some(Instruction {
        opcode,
        operation,
        mode,
    })
}

/// Execute one CPU step and return the cycles it consumed.
pub(crate) fn step(cpu: &mut CpuState, bus: &mut Bus) -> Result<u32, CpuError> {
    // Non-maskable interrupt
    if cpu.nmi_pending {
        service_interrupt(cpu, bus, Vector::Nmi)?;
        cpu.nmi_pending = false;
        cpu.cycle += INTERRUPT_CYCLES as u64;
        return Ok(INTERRUPT_CYCLES);
    }

    // Maskable IRQ (line asserted & I flag clear)
    if cpu.irq_line && !cpu.status.test(Flag::InterruptDisable) {
        service_interrupt(cpu, bus, Vector::Irq)?;
        cpu.cycle += INTERRUPT_CYCLES as u64;
        return Ok(INTERRUPT_CYCLES);
    }

    // Fetch
    let pc = cpu.pc;
    let opcode = bus.read(pc)?;

    // Classify
    let instr = decode(opcode).ok_or(CpuError::IllegalOpcode { opcode, pc })?;

    #[cfg(feature = "trace")]
    log::trace!(
        "{pc:04X}  {opcode:02X}  {:<4} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
        instr.operation.mnemonic(),
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status.raw(),
        cpu.sp,
        cpu.cycle
    );

    // Execute
    cpu.opcode = opcode;
    cpu.low = 0;
    cpu.high = 0;
    cpu.advance_pc(1);
    let extra = match instr.operation {
        Operation::Control(op) => control::execute(cpu, bus, op, instr.mode)?,
        Operation::Alu(op) => alu::execute(cpu, bus, op, instr.mode)?,
        Operation::Rmw(op) => rmw::execute(cpu, bus, op, instr.mode)?,
    };

    let cycles = instr.base_cycles() + extra;
    cpu.cycle += cycles as u64;
    Ok(cycles)
}
