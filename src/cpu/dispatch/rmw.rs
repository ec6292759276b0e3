/*!
rmw.rs - Group 2 (opcode & 3 == 2): shifts, X-register loads/stores, INC/DEC.

Decode
======
  aaa (bits 7-5): ASL ROL LSR ROR STX LDX DEC INC
  bbb (bits 4-2):
    0  #imm     (LDX only: $A2)
    1  zp
    2  A        for ASL/ROL/LSR/ROR; implied TXA $8A, TAX $AA, DEX $CA, NOP $EA
    3  abs
    4  -        (no official opcodes)
    5  zp,X     (zp,Y for STX/LDX)
    6  implied  TXS $9A, TSX $BA only
    7  abs,X    (abs,Y for LDX $BE; STX has no indexed-absolute form)

Memory forms of the shifts and INC/DEC perform the read -> dummy write ->
write sequence. Only LDX abs,Y pays a page-cross cycle.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, read_operand, resolve};
use crate::cpu::execute::{asl, lsr, modify, rol, ror};
use crate::cpu::state::CpuState;
use crate::error::CpuError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RmwOp {
    Asl,
    Rol,
    Lsr,
    Ror,
    Stx,
    Ldx,
    Dec,
    Inc,
    Txa,
    Tax,
    Dex,
    Nop,
    Txs,
    Tsx,
}

const OPS: [RmwOp; 8] = [
    RmwOp::Asl,
    RmwOp::Rol,
    RmwOp::Lsr,
    RmwOp::Ror,
    RmwOp::Stx,
    RmwOp::Ldx,
    RmwOp::Dec,
    RmwOp::Inc,
];

impl RmwOp {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            RmwOp::Asl => "ASL",
            RmwOp::Rol => "ROL",
            RmwOp::Lsr => "LSR",
            RmwOp::Ror => "ROR",
            RmwOp::Stx => "STX",
            RmwOp::Ldx => "LDX",
            RmwOp::Dec => "DEC",
            RmwOp::Inc => "INC",
            RmwOp::Txa => "TXA",
            RmwOp::Tax => "TAX",
            RmwOp::Dex => "DEX",
            RmwOp::Nop => "NOP",
            RmwOp::Txs => "TXS",
            RmwOp::Tsx => "TSX",
        }
    }

    const fn uses_x(self) -> bool {
        matches!(self, RmwOp::Stx | RmwOp::Ldx)
    }
}

pub(crate) fn decode(opcode: u8) -> Option<(RmwOp, AddressingMode)> {
    use AddressingMode::*;

    let aaa = (opcode >> 5) as usize;
    let op = OPS[aaa];
    match (opcode >> 2) & 0x07 {
        0 => (op == RmwOp::Ldx).then_some((op, Immediate)),
        1 => Some((op, ZeroPage)),
        2 => match aaa {
            0..=3 => Some((op, Accumulator)),
            4 => Some((RmwOp::Txa, Implied)),
            5 => Some((RmwOp::Tax, Implied)),
            6 => Some((RmwOp::Dex, Implied)),
            _ => Some((RmwOp::Nop, Implied)),
        },
        3 => Some((op, Absolute)),
        5 if op.uses_x() => Some((op, ZeroPageY)),
        5 => Some((op, ZeroPageX)),
        6 => match aaa {
            4 => Some((RmwOp::Txs, Implied)),
            5 => Some((RmwOp::Tsx, Implied)),
            _ => None,
        },
        7 => match op {
            RmwOp::Stx => None,
            RmwOp::Ldx => Some((op, AbsoluteY)),
            _ => Some((op, AbsoluteX)),
        },
        _ => None,
    }
}

/// Execute; returns extra cycles beyond the base count.
pub(super) fn execute(
    cpu: &mut CpuState,
    bus: &mut Bus,
    op: RmwOp,
    mode: AddressingMode,
) -> Result<u32, CpuError> {
    let operand = resolve(cpu, bus, mode)?;
    match op {
        RmwOp::Asl => {
            modify(cpu, bus, operand, asl)?;
        }
        RmwOp::Rol => {
            modify(cpu, bus, operand, rol)?;
        }
        RmwOp::Lsr => {
            modify(cpu, bus, operand, lsr)?;
        }
        RmwOp::Ror => {
            modify(cpu, bus, operand, ror)?;
        }
        RmwOp::Dec => {
            modify(cpu, bus, operand, |_, v| v.wrapping_sub(1))?;
        }
        RmwOp::Inc => {
            modify(cpu, bus, operand, |_, v| v.wrapping_add(1))?;
        }
        RmwOp::Stx => {
            if let Some(addr) = operand.address() {
                bus.write(addr, cpu.x)?;
            }
        }
        RmwOp::Ldx => {
            let v = read_operand(cpu, bus, operand)?;
            cpu.set_x(v);
            return Ok(operand.page_crossed() as u32);
        }
        RmwOp::Txa => cpu.set_a(cpu.x),
        RmwOp::Tax => cpu.set_x(cpu.a),
        RmwOp::Dex => cpu.set_x(cpu.x.wrapping_sub(1)),
        RmwOp::Nop => {}
        // TXS leaves the flags alone
        RmwOp::Txs => cpu.sp = cpu.x,
        RmwOp::Tsx => cpu.set_x(cpu.sp),
    }
    Ok(0)
}
