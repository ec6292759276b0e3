/*!
alu.rs - Group 1 (opcode & 3 == 1): accumulator ALU instructions.

Decode
======
  aaa (bits 7-5): ORA AND EOR ADC STA LDA CMP SBC
  bbb (bits 4-2): (zp,X) zp #imm abs (zp),Y zp,X abs,Y abs,X

Every combination is official except STA #imm ($89).

Timing
======
Reads through abs,X / abs,Y / (zp),Y pay +1 on a page cross. STA never does;
its base count already includes the extra cycle.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, read_operand, resolve};
use crate::cpu::execute::{adc, and, compare, eor, ora, sbc};
use crate::cpu::state::CpuState;
use crate::error::CpuError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    Ora,
    And,
    Eor,
    Adc,
    Sta,
    Lda,
    Cmp,
    Sbc,
}

const OPS: [AluOp; 8] = [
    AluOp::Ora,
    AluOp::And,
    AluOp::Eor,
    AluOp::Adc,
    AluOp::Sta,
    AluOp::Lda,
    AluOp::Cmp,
    AluOp::Sbc,
];

const MODES: [AddressingMode; 8] = [
    AddressingMode::IndexedIndirect,
    AddressingMode::ZeroPage,
    AddressingMode::Immediate,
    AddressingMode::Absolute,
    AddressingMode::IndirectIndexed,
    AddressingMode::ZeroPageX,
    AddressingMode::AbsoluteY,
    AddressingMode::AbsoluteX,
];

impl AluOp {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Ora => "ORA",
            AluOp::And => "AND",
            AluOp::Eor => "EOR",
            AluOp::Adc => "ADC",
            AluOp::Sta => "STA",
            AluOp::Lda => "LDA",
            AluOp::Cmp => "CMP",
            AluOp::Sbc => "SBC",
        }
    }
}

pub(crate) fn decode(opcode: u8) -> Option<(AluOp, AddressingMode)> {
    let op = OPS[(opcode >> 5) as usize];
    let mode = MODES[((opcode >> 2) & 0x07) as usize];
    if op == AluOp::Sta && mode == AddressingMode::Immediate {
        return None;
    }
    Some((op, mode))
}

/// Execute; returns extra cycles beyond the base count.
pub(super) fn execute(
    cpu: &mut CpuState,
    bus: &mut Bus,
    op: AluOp,
    mode: AddressingMode,
) -> Result<u32, CpuError> {
    let operand = resolve(cpu, bus, mode)?;

    if op == AluOp::Sta {
        if let Some(addr) = operand.address() {
            bus.write(addr, cpu.a)?;
        }
        return Ok(0);
    }

    let v = read_operand(cpu, bus, operand)?;
    match op {
        AluOp::Ora => ora(cpu, v),
        AluOp::And => and(cpu, v),
        AluOp::Eor => eor(cpu, v),
        AluOp::Adc => adc(cpu, v),
        AluOp::Lda => cpu.set_a(v),
        AluOp::Cmp => {
            let a = cpu.a;
            compare(cpu, a, v)
        }
        AluOp::Sbc => sbc(cpu, v),
        AluOp::Sta => {}
    }
    Ok(operand.page_crossed() as u32)
}
