/*!
control.rs - Group 0 (opcode & 3 == 0): control flow, Y register, stack and flags.

Decode
======
Group 0 is irregular, so decode matches on bbb (bits 4-2) first:
  0  BRK $00, JSR $20, RTI $40, RTS $60, LDY/CPY/CPX #imm ($A0/$C0/$E0)
  1  zp:     BIT STY LDY CPY CPX
  2  implied: PHP PLP PHA PLA DEY TAY INY INX
  3  abs:    BIT, JMP $4C, JMP ($6C), STY LDY CPY CPX
  4  relative branches: BPL BMI BVC BVS BCC BCS BNE BEQ
  5  zp,X:   STY LDY
  6  implied: CLC SEC CLI SEI TYA CLV CLD SED
  7  abs,X:  LDY

For branches, aaa bits 7-6 pick the flag (N, V, C, Z) and bit 5 the value
that takes the branch.

BRK
===
BRK is a two-byte instruction: the byte after the opcode is padding. It
pushes the address after that byte and the status with B set, sets I and
jumps through $FFFE. Execution continues in the handler.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, Operand, read_operand, resolve};
use crate::cpu::execute::{bit, compare, php, pha, pla, plp};
use crate::cpu::state::CpuState;
use crate::cpu::status::{Flag, Status};
use crate::cpu::vectors::{Vector, enter};
use crate::error::CpuError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlOp {
    Brk,
    Jsr,
    Rti,
    Rts,
    Jmp,
    /// Branch when `flag` equals `when_set`.
    Branch { flag: Flag, when_set: bool },
    Bit,
    Sty,
    Ldy,
    Cpy,
    Cpx,
    Php,
    Plp,
    Pha,
    Pla,
    Dey,
    Tay,
    Iny,
    Inx,
    Tya,
    /// CLC/SEC/CLI/SEI/CLV/CLD/SED
    SetFlag { flag: Flag, value: bool },
}

const BRANCH_FLAGS: [Flag; 4] = [Flag::Negative, Flag::Overflow, Flag::Carry, Flag::Zero];

impl ControlOp {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            ControlOp::Brk => "BRK",
            ControlOp::Jsr => "JSR",
            ControlOp::Rti => "RTI",
            ControlOp::Rts => "RTS",
            ControlOp::Jmp => "JMP",
            ControlOp::Branch { flag, when_set } => match (flag, when_set) {
                (Flag::Negative, false) => "BPL",
                (Flag::Negative, true) => "BMI",
                (Flag::Overflow, false) => "BVC",
                (Flag::Overflow, true) => "BVS",
                (Flag::Carry, false) => "BCC",
                (Flag::Carry, true) => "BCS",
                (Flag::Zero, false) => "BNE",
                _ => "BEQ",
            },
            ControlOp::Bit => "BIT",
            ControlOp::Sty => "STY",
            ControlOp::Ldy => "LDY",
            ControlOp::Cpy => "CPY",
            ControlOp::Cpx => "CPX",
            ControlOp::Php => "PHP",
            ControlOp::Plp => "PLP",
            ControlOp::Pha => "PHA",
            ControlOp::Pla => "PLA",
            ControlOp::Dey => "DEY",
            ControlOp::Tay => "TAY",
            ControlOp::Iny => "INY",
            ControlOp::Inx => "INX",
            ControlOp::Tya => "TYA",
            ControlOp::SetFlag { flag, value } => match (flag, value) {
                (Flag::Carry, false) => "CLC",
                (Flag::Carry, true) => "SEC",
                (Flag::InterruptDisable, false) => "CLI",
                (Flag::InterruptDisable, true) => "SEI",
                (Flag::Overflow, _) => "CLV",
                (Flag::Decimal, false) => "CLD",
                _ => "SED",
            },
        }
    }
}

pub(crate) fn decode(opcode: u8) -> Option<(ControlOp, AddressingMode)> {
    use AddressingMode::*;
    use ControlOp::*;

    let aaa = opcode >> 5;
    let decoded = match ((opcode >> 2) & 0x07, aaa) {
        (0, 0) => (Brk, Implied),
        (0, 1) => (Jsr, Absolute),
        (0, 2) => (Rti, Implied),
        (0, 3) => (Rts, Implied),
        (0, 5) => (Ldy, Immediate),
        (0, 6) => (Cpy, Immediate),
        (0, 7) => (Cpx, Immediate),

        (1, 1) => (Bit, ZeroPage),
        (1, 4) => (Sty, ZeroPage),
        (1, 5) => (Ldy, ZeroPage),
        (1, 6) => (Cpy, ZeroPage),
        (1, 7) => (Cpx, ZeroPage),

        (2, 0) => (Php, Implied),
        (2, 1) => (Plp, Implied),
        (2, 2) => (Pha, Implied),
        (2, 3) => (Pla, Implied),
        (2, 4) => (Dey, Implied),
        (2, 5) => (Tay, Implied),
        (2, 6) => (Iny, Implied),
        (2, 7) => (Inx, Implied),

        (3, 1) => (Bit, Absolute),
        (3, 2) => (Jmp, Absolute),
        (3, 3) => (Jmp, Indirect),
        (3, 4) => (Sty, Absolute),
        (3, 5) => (Ldy, Absolute),
        (3, 6) => (Cpy, Absolute),
        (3, 7) => (Cpx, Absolute),

        (4, _) => (
            Branch {
                flag: BRANCH_FLAGS[(aaa >> 1) as usize],
                when_set: aaa & 1 == 1,
            },
            Relative,
        ),

        (5, 4) => (Sty, ZeroPageX),
        (5, 5) => (Ldy, ZeroPageX),

        (6, 4) => (Tya, Implied),
        (6, _) => {
            let (flag, value) = match aaa {
                0 => (Flag::Carry, false),
                1 => (Flag::Carry, true),
                2 => (Flag::InterruptDisable, false),
                3 => (Flag::InterruptDisable, true),
                5 => (Flag::Overflow, false),
                6 => (Flag::Decimal, false),
                _ => (Flag::Decimal, true),
            };
            (SetFlag { flag, value }, Implied)
        }

        (7, 5) => (Ldy, AbsoluteX),

        _ => return None,
    };
    Some(decoded)
}

/// Execute; returns extra cycles beyond the base count.
pub(super) fn execute(
    cpu: &mut CpuState,
    bus: &mut Bus,
    op: ControlOp,
    mode: AddressingMode,
) -> Result<u32, CpuError> {
    let operand = resolve(cpu, bus, mode)?;
    match op {
        ControlOp::Brk => {
            // Skip the padding byte
            cpu.advance_pc(1);
            enter(cpu, bus, Vector::Irq, true)?;
            log::debug!("BRK -> ${:04X}", cpu.pc);
        }
        ControlOp::Jsr => {
            if let Operand::Memory { addr, .. } = operand {
                // Return address is the last byte of the JSR
                cpu.push_word(bus, cpu.pc.wrapping_sub(1))?;
                cpu.pc = addr;
            }
        }
        ControlOp::Rti => {
            let status = cpu.pull(bus)?;
            let pc = cpu.pull_word(bus)?;
            cpu.status = Status::from_pulled(status);
            cpu.pc = pc;
        }
        ControlOp::Rts => {
            let pc = cpu.pull_word(bus)?;
            cpu.pc = pc.wrapping_add(1);
        }
        ControlOp::Jmp => {
            if let Some(addr) = operand.address() {
                cpu.pc = addr;
            }
        }
        ControlOp::Branch { flag, when_set } => {
            if cpu.status.test(flag) == when_set
                && let Operand::Memory { addr, page_crossed } = operand
            {
                cpu.pc = addr;
                return Ok(1 + page_crossed as u32);
            }
        }
        ControlOp::Bit => {
            let v = read_operand(cpu, bus, operand)?;
            bit(cpu, v);
        }
        ControlOp::Sty => {
            if let Some(addr) = operand.address() {
                bus.write(addr, cpu.y)?;
            }
        }
        ControlOp::Ldy => {
            let v = read_operand(cpu, bus, operand)?;
            cpu.set_y(v);
            return Ok(operand.page_crossed() as u32);
        }
        ControlOp::Cpy => {
            let v = read_operand(cpu, bus, operand)?;
            let y = cpu.y;
            compare(cpu, y, v);
        }
        ControlOp::Cpx => {
            let v = read_operand(cpu, bus, operand)?;
            let x = cpu.x;
            compare(cpu, x, v);
        }
        ControlOp::Php => php(cpu, bus)?,
        ControlOp::Plp => plp(cpu, bus)?,
        ControlOp::Pha => pha(cpu, bus)?,
        ControlOp::Pla => pla(cpu, bus)?,
        ControlOp::Dey => cpu.set_y(cpu.y.wrapping_sub(1)),
        ControlOp::Tay => cpu.set_y(cpu.a),
        ControlOp::Iny => cpu.set_y(cpu.y.wrapping_add(1)),
        ControlOp::Inx => cpu.set_x(cpu.x.wrapping_add(1)),
        ControlOp::Tya => cpu.set_a(cpu.y),
        ControlOp::SetFlag { flag, value } => cpu.status.set_if(flag, value),
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{setup, setup_with_vectors};

    #[test]
    fn decode_irregular_grid() {
        assert_eq!(decode(0x00), Some((ControlOp::Brk, AddressingMode::Implied)));
        assert_eq!(decode(0x6C), Some((ControlOp::Jmp, AddressingMode::Indirect)));
        assert_eq!(decode(0xBC), Some((ControlOp::Ldy, AddressingMode::AbsoluteX)));
        assert_eq!(
            decode(0xD0),
            Some((
                ControlOp::Branch {
                    flag: Flag::Zero,
                    when_set: false
                },
                AddressingMode::Relative
            ))
        );
        assert_eq!(
            decode(0xB8),
            Some((
                ControlOp::SetFlag {
                    flag: Flag::Overflow,
                    value: false
                },
                AddressingMode::Implied
            ))
        );
        for illegal in [0x80, 0x04, 0x0C, 0x14, 0x1C, 0x44, 0x9C, 0xD4, 0xFC] {
            assert_eq!(decode(illegal), None, "opcode {illegal:02X}");
        }
    }

    #[test]
    fn mnemonics_cover_branches_and_flags() {
        let names: Vec<&str> = (0..8u8)
            .map(|aaa| decode((aaa << 5) | 0x10).map(|(op, _)| op.mnemonic()).unwrap_or("?"))
            .collect();
        assert_eq!(names, ["BPL", "BMI", "BVC", "BVS", "BCC", "BCS", "BNE", "BEQ"]);
        let names: Vec<&str> = (0..8u8)
            .map(|aaa| decode((aaa << 5) | 0x18).map(|(op, _)| op.mnemonic()).unwrap_or("?"))
            .collect();
        assert_eq!(names, ["CLC", "SEC", "CLI", "SEI", "TYA", "CLV", "CLD", "SED"]);
    }

    #[test]
    fn branch_timing() {
        // LDX #$00 ; BNE +2 (not taken) ; BEQ +2 (taken)
        let (mut cpu, mut bus) = setup(&[0xA2, 0x00, 0xD0, 0x02, 0xF0, 0x02]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus), Ok(2));
        assert_eq!(cpu.pc(), 0x8004);
        assert_eq!(cpu.step(&mut bus), Ok(3));
        assert_eq!(cpu.pc(), 0x8008);
    }

    #[test]
    fn taken_branch_across_page_costs_two() {
        // BCC -6 from $8000 lands on $7FFC
        let (mut cpu, mut bus) = setup(&[0x90, 0xFA]);
        assert_eq!(cpu.step(&mut bus), Ok(4));
        assert_eq!(cpu.pc(), 0x7FFC);
    }

    #[test]
    fn jsr_rts_round_trip() {
        // JSR $8005 ; NOP ; NOP ; INY ; RTS
        let (mut cpu, mut bus) = setup(&[0x20, 0x05, 0x80, 0xEA, 0xEA, 0xC8, 0x60]);
        assert_eq!(cpu.step(&mut bus), Ok(6));
        assert_eq!(cpu.pc(), 0x8005);
        assert_eq!(bus.read(0x01FD), Ok(0x80));
        assert_eq!(bus.read(0x01FC), Ok(0x02));
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus), Ok(6));
        assert_eq!(cpu.pc(), 0x8003);
        assert_eq!(cpu.y(), 1);
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn brk_enters_handler_and_rti_returns() {
        // $8000: BRK ; pad ; INX     handler $8010: RTI
        let mut program = vec![0x00, 0xFF, 0xE8];
        program.resize(0x10, 0xEA);
        program.push(0x40);
        let (mut cpu, mut bus) = setup_with_vectors(&program, (0x8000, 0x8000, 0x8010));
        cpu.set_status(0xC3);

        assert_eq!(cpu.step(&mut bus), Ok(7));
        assert_eq!(cpu.pc(), 0x8010);
        assert!(cpu.status().test(Flag::InterruptDisable));
        // Pushed PC skips the padding byte; pushed P has B set
        assert_eq!(bus.read(0x01FD), Ok(0x80));
        assert_eq!(bus.read(0x01FC), Ok(0x02));
        assert_eq!(bus.read(0x01FB), Ok(0xF3));

        assert_eq!(cpu.step(&mut bus), Ok(6));
        assert_eq!(cpu.pc(), 0x8002);
        assert_eq!(cpu.status().raw(), 0xE3);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.x(), 1);
    }

    #[test]
    fn jmp_indirect_uses_page_wrap() {
        let (mut cpu, mut bus) = setup(&[0x6C, 0xFF, 0x02]);
        bus.write(0x02FF, 0x34).unwrap();
        bus.write(0x0200, 0x12).unwrap();
        assert_eq!(cpu.step(&mut bus), Ok(5));
        assert_eq!(cpu.pc(), 0x1234);
    }

    #[test]
    fn stack_ops() {
        // LDA #$00 ; PHP ; PHA ; LDA #$55 ; PLA ; PLP
        let (mut cpu, mut bus) = setup(&[0xA9, 0x00, 0x08, 0x48, 0xA9, 0x55, 0x68, 0x28]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus), Ok(3));
        assert_eq!(bus.read(0x01FD), Ok(0x32));
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus), Ok(4));
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.status().test(Flag::Zero));
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.status().raw(), 0x22);
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn y_register_and_compares() {
        // LDY #$10 ; DEY ; CPY #$0F ; INX ; CPX #$02 ; TYA
        let (mut cpu, mut bus) = setup(&[0xA0, 0x10, 0x88, 0xC0, 0x0F, 0xE8, 0xE0, 0x02, 0x98]);
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        assert!(cpu.status().test(Flag::Zero));
        assert!(cpu.status().test(Flag::Carry));
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        assert!(!cpu.status().test(Flag::Carry));
        assert!(cpu.status().test(Flag::Negative));
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a(), 0x0F);
    }

    #[test]
    fn bit_and_sty() {
        // LDY #$C0 ; STY $30 ; BIT $30
        let (mut cpu, mut bus) = setup(&[0xA0, 0xC0, 0x84, 0x30, 0x24, 0x30]);
        for _ in 0..3 {
            cpu.step(&mut bus).unwrap();
        }
        assert_eq!(bus.read(0x0030), Ok(0xC0));
        assert!(cpu.status().test(Flag::Overflow));
        assert!(cpu.status().test(Flag::Negative));
        assert!(cpu.status().test(Flag::Zero));
    }
}
