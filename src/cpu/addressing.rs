/*!
addressing.rs - 6502 addressing modes and operand resolution.

Overview
========
`resolve` consumes the operand bytes of the current instruction (storing them
in `CpuState::low` / `high`) and turns an `AddressingMode` into an `Operand`:
  - `Implied` / `Accumulator`: no memory operand
  - `Immediate(v)`: the byte following the opcode
  - `Memory { addr, page_crossed }`: an effective address

`page_crossed` is true when indexing (or a taken relative branch) moved the
address into a different 256-byte page, i.e. the high byte changed. Dispatch
adds the extra cycle where the instruction is sensitive to it.

Quirks emulated
===============
- Zero-page indexing wraps inside page zero ($FF + 1 -> $00).
- (zp,X) and (zp),Y read their pointer from page zero, wrapping at $FF.
- JMP ($xxFF) fetches the high byte from $xx00, not the next page.
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;
use crate::error::CpuError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndexedIndirect
            | Self::IndirectIndexed
            | Self::Relative => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    Memory { addr: u16, page_crossed: bool },
}

impl Operand {
    #[inline]
    pub fn address(self) -> Option<u16> {
        match self {
            Operand::Memory { addr, .. } => Some(addr),
            _ => None,
        }
    }

    #[inline]
    pub fn page_crossed(self) -> bool {
        matches!(
            self,
            Operand::Memory {
                page_crossed: true,
                ..
            }
        )
    }

    #[inline]
    fn at(addr: u16) -> Self {
        Operand::Memory {
            addr,
            page_crossed: false,
        }
    }
}

/// True when `a` and `b` lie in different 256-byte pages.
#[inline]
pub const fn pages_differ(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// `base + index` with page-cross detection.
#[inline]
pub const fn indexed(base: u16, index: u8) -> (u16, bool) {
    let addr = base.wrapping_add(index as u16);
    (addr, pages_differ(base, addr))
}

/// Little-endian pointer stored in page zero, wrapping at $FF.
fn zero_page_word(bus: &Bus, ptr: u8) -> Result<u16, CpuError> {
    let lo = bus.read(ptr as u16)?;
    let hi = bus.read(ptr.wrapping_add(1) as u16)?;
    Ok(u16::from_le_bytes([lo, hi]))
}

/// Pointer read for JMP (indirect): the high byte never leaves the page.
fn indirect_word_bugged(bus: &Bus, ptr: u16) -> Result<u16, CpuError> {
    let lo = bus.read(ptr)?;
    let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr)?;
    Ok(u16::from_le_bytes([lo, hi]))
}

/// Consume operand bytes at PC and compute the operand for `mode`.
pub fn resolve(cpu: &mut CpuState, bus: &Bus, mode: AddressingMode) -> Result<Operand, CpuError> {
    let operand = match mode {
        AddressingMode::Implied => Operand::Implied,
        AddressingMode::Accumulator => Operand::Accumulator,
        AddressingMode::Immediate => Operand::Immediate(cpu.fetch_low(bus)?),
        AddressingMode::ZeroPage => Operand::at(cpu.fetch_low(bus)? as u16),
        AddressingMode::ZeroPageX => Operand::at(cpu.fetch_low(bus)?.wrapping_add(cpu.x) as u16),
        AddressingMode::ZeroPageY => Operand::at(cpu.fetch_low(bus)?.wrapping_add(cpu.y) as u16),
        AddressingMode::Absolute => Operand::at(cpu.fetch_word(bus)?),
        AddressingMode::AbsoluteX => {
            let (addr, page_crossed) = indexed(cpu.fetch_word(bus)?, cpu.x);
            Operand::Memory { addr, page_crossed }
        }
        AddressingMode::AbsoluteY => {
            let (addr, page_crossed) = indexed(cpu.fetch_word(bus)?, cpu.y);
            Operand::Memory { addr, page_crossed }
        }
        AddressingMode::Indirect => {
            let ptr = cpu.fetch_word(bus)?;
            Operand::at(indirect_word_bugged(bus, ptr)?)
        }
        AddressingMode::IndexedIndirect => {
            let ptr = cpu.fetch_low(bus)?.wrapping_add(cpu.x);
            Operand::at(zero_page_word(bus, ptr)?)
        }
        AddressingMode::IndirectIndexed => {
            let ptr = cpu.fetch_low(bus)?;
            let (addr, page_crossed) = indexed(zero_page_word(bus, ptr)?, cpu.y);
            Operand::Memory { addr, page_crossed }
        }
        AddressingMode::Relative => {
            let offset = cpu.fetch_low(bus)? as i8;
            // Relative to the address of the next instruction
            let next = cpu.pc;
            let addr = next.wrapping_add(offset as i16 as u16);
            Operand::Memory {
                addr,
                page_crossed: pages_differ(next, addr),
            }
        }
    };
    Ok(operand)
}

/// Read the value an operand denotes.
pub fn read_operand(cpu: &CpuState, bus: &Bus, operand: Operand) -> Result<u8, CpuError> {
    match operand {
        Operand::Immediate(v) => Ok(v),
        Operand::Accumulator => Ok(cpu.a),
        Operand::Memory { addr, .. } => Ok(bus.read(addr)?),
        Operand::Implied => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::nrom_bus;

    fn at_8000(program: &[u8]) -> (CpuState, Bus) {
        let bus = nrom_bus(program);
        let mut cpu = CpuState::new();
        cpu.pc = 0x8000;
        (cpu, bus)
    }

    #[test]
    fn page_boundary_detection() {
        assert_eq!(indexed(0x20FF, 0x01), (0x2100, true));
        assert_eq!(indexed(0x2000, 0x01), (0x2001, false));
        assert_eq!(indexed(0xFFFF, 0x01), (0x0000, true));
        assert!(pages_differ(0x80FF, 0x8100));
        assert!(!pages_differ(0x8000, 0x80FF));
    }

    #[test]
    fn zero_page_x_wraps() {
        let (mut cpu, bus) = at_8000(&[0xFF]);
        cpu.x = 0x02;
        let op = resolve(&mut cpu, &bus, AddressingMode::ZeroPageX).unwrap();
        assert_eq!(op.address(), Some(0x0001));
        assert!(!op.page_crossed());
        assert_eq!(cpu.pc, 0x8001);
        assert_eq!(cpu.low, 0xFF);
    }

    #[test]
    fn absolute_y_reports_cross() {
        let (mut cpu, bus) = at_8000(&[0xFF, 0x20]);
        cpu.y = 0x01;
        let op = resolve(&mut cpu, &bus, AddressingMode::AbsoluteY).unwrap();
        assert_eq!(
            op,
            Operand::Memory {
                addr: 0x2100,
                page_crossed: true
            }
        );
        assert_eq!((cpu.low, cpu.high), (0xFF, 0x20));
    }

    #[test]
    fn indexed_indirect_pointer_wraps_in_zero_page() {
        let (mut cpu, mut bus) = at_8000(&[0xFE]);
        cpu.x = 0x01;
        bus.write(0x00FF, 0x34).unwrap();
        bus.write(0x0000, 0x12).unwrap();
        let op = resolve(&mut cpu, &bus, AddressingMode::IndexedIndirect).unwrap();
        assert_eq!(op.address(), Some(0x1234));
    }

    #[test]
    fn indirect_indexed_adds_y_after_dereference() {
        let (mut cpu, mut bus) = at_8000(&[0x10]);
        cpu.y = 0x10;
        bus.write(0x0010, 0xF8).unwrap();
        bus.write(0x0011, 0x03).unwrap();
        let op = resolve(&mut cpu, &bus, AddressingMode::IndirectIndexed).unwrap();
        assert_eq!(
            op,
            Operand::Memory {
                addr: 0x0408,
                page_crossed: true
            }
        );
    }

    #[test]
    fn jmp_indirect_page_wrap_bug() {
        let (mut cpu, mut bus) = at_8000(&[0xFF, 0x02]);
        bus.write(0x02FF, 0x00).unwrap();
        bus.write(0x0200, 0x90).unwrap();
        bus.write(0x0300, 0xAA).unwrap();
        let op = resolve(&mut cpu, &bus, AddressingMode::Indirect).unwrap();
        assert_eq!(op.address(), Some(0x9000));
    }

    #[test]
    fn relative_targets_next_instruction() {
        // Backward branch across a page
        let (mut cpu, bus) = at_8000(&[0xFC]);
        let op = resolve(&mut cpu, &bus, AddressingMode::Relative).unwrap();
        assert_eq!(
            op,
            Operand::Memory {
                addr: 0x7FFD,
                page_crossed: true
            }
        );

        let (mut cpu, bus) = at_8000(&[0x05]);
        let op = resolve(&mut cpu, &bus, AddressingMode::Relative).unwrap();
        assert_eq!(op.address(), Some(0x8006));
        assert!(!op.page_crossed());
    }

    #[test]
    fn immediate_and_register_operands() {
        let (mut cpu, bus) = at_8000(&[0x7E]);
        cpu.a = 0x55;
        let imm = resolve(&mut cpu, &bus, AddressingMode::Immediate).unwrap();
        assert_eq!(read_operand(&cpu, &bus, imm), Ok(0x7E));
        let acc = resolve(&mut cpu, &bus, AddressingMode::Accumulator).unwrap();
        assert_eq!(read_operand(&cpu, &bus, acc), Ok(0x55));
        assert_eq!(cpu.pc, 0x8001);
    }

    #[test]
    fn operand_lengths() {
        assert_eq!(AddressingMode::Implied.operand_len(), 0);
        assert_eq!(AddressingMode::Relative.operand_len(), 1);
        assert_eq!(AddressingMode::Indirect.operand_len(), 2);
    }
}
