//! Shared test utilities for building PRG images and ready-to-run buses.
//!
//! These helpers de-duplicate program/vector setup across tests in the CPU,
//! Bus, and Console modules. They support just what the test suite needs.
//!
//! Vectors:
//! - For 16 KiB PRG (NROM-128): vectors are at PRG offset 0x3FFA..=0x3FFF
//! - For 32 KiB PRG (NROM-256): vectors are at PRG offset 0x7FFA..=0x7FFF
//!
//! Programs are placed at PRG offset 0, i.e. CPU address $8000.

#![allow(dead_code)]

use crate::bus::Bus;
use crate::cpu::core::Cpu;
use crate::mapper::{CartTarget, Mapper, Nrom};

/// Build a 16 KiB PRG bank with `program` at its start (rest filled with NOP)
/// and vectors pointing at the provided or default addresses
/// (RESET/NMI/IRQ all $8000 by default).
pub fn build_prg(program: &[u8], vectors: Option<(u16, u16, u16)>) -> Vec<u8> {
    assert!(
        program.len() <= 16 * 1024 - 6,
        "Program must fit below the vector table of a 16 KiB PRG bank"
    );
    let mut prg = vec![0xEA; 16 * 1024];
    prg[..program.len()].copy_from_slice(program);
    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(&mut prg, reset, nmi, irq);
    prg
}

/// Write CPU vectors (NMI, RESET, IRQ/BRK) into a PRG slice that is either
/// 16 KiB (NROM-128) or 32 KiB (NROM-256). Panics if PRG length is something else.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = match prg.len() {
        16384 => 0x3FFA,
        32768 => 0x7FFA,
        other => panic!(
            "Unsupported PRG length for vector placement: {} bytes (expected 16 KiB or 32 KiB)",
            other
        ),
    };
    write_le_u16(prg, base, nmi);
    write_le_u16(prg, base + 2, reset);
    write_le_u16(prg, base + 4, irq);
}

#[inline]
fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = (value & 0x00FF) as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

/// NROM bus (8 KiB PRG RAM) running `program` from $8000.
pub fn nrom_bus(program: &[u8]) -> Bus {
    Bus::with_mapper(Nrom::new(build_prg(program, None), 8 * 1024))
}

/// NROM bus plus a CPU already reset to $8000.
pub fn setup(program: &[u8]) -> (Cpu, Bus) {
    let mut bus = nrom_bus(program);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus).expect("reset vector readable");
    (cpu, bus)
}

/// Same as `setup` but with explicit (reset, nmi, irq) vectors.
pub fn setup_with_vectors(program: &[u8], vectors: (u16, u16, u16)) -> (Cpu, Bus) {
    let prg = build_prg(program, Some(vectors));
    let mut bus = Bus::with_mapper(Nrom::new(prg, 8 * 1024));
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus).expect("reset vector readable");
    (cpu, bus)
}

/// NROM board that refuses reads at the listed addresses.
pub struct HoleyRom {
    inner: Nrom,
    holes: Vec<u16>,
}

impl HoleyRom {
    pub fn new(prg: Vec<u8>, holes: &[u16]) -> Self {
        Self {
            inner: Nrom::new(prg, 8 * 1024),
            holes: holes.to_vec(),
        }
    }
}

impl Mapper for HoleyRom {
    fn mapper_id(&self) -> u16 {
        self.inner.mapper_id()
    }

    fn translate_read(&self, addr: u16) -> Option<CartTarget> {
        if self.holes.contains(&addr) {
            None
        } else {
            self.inner.translate_read(addr)
        }
    }

    fn translate_write(&self, addr: u16) -> Option<CartTarget> {
        self.inner.translate_write(addr)
    }

    fn load(&self, target: CartTarget) -> u8 {
        self.inner.load(target)
    }

    fn store(&mut self, target: CartTarget, value: u8) {
        self.inner.store(target, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_vectors_for_16k_prg() {
        let mut prg = vec![0u8; 16 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(prg[0x3FFA], 0x56);
        assert_eq!(prg[0x3FFB], 0x84);
        assert_eq!(prg[0x3FFC], 0x23);
        assert_eq!(prg[0x3FFD], 0x81);
        assert_eq!(prg[0x3FFE], 0xBC);
        assert_eq!(prg[0x3FFF], 0x8A);
    }

    #[test]
    fn writes_vectors_for_32k_prg() {
        let mut prg = vec![0u8; 32 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(prg[0x7FFC], 0x23);
        assert_eq!(prg[0x7FFD], 0x81);
    }

    #[test]
    fn builds_prg_with_program() {
        let prg = build_prg(&[0xA9, 0x01, 0x00], None);
        assert_eq!(prg.len(), 16 * 1024);
        assert_eq!(&prg[..3], &[0xA9, 0x01, 0x00]);
        assert_eq!(prg[3], 0xEA);
        assert_eq!(prg[0x3FFC], 0x00);
        assert_eq!(prg[0x3FFD], 0x80);
    }

    #[test]
    fn holey_rom_refuses_listed_reads() {
        let bus = Bus::with_mapper(HoleyRom::new(build_prg(&[], None), &[0xFFFD]));
        assert_eq!(bus.read(0xFFFC), Ok(0x00));
        assert!(bus.read(0xFFFD).is_err());
    }
}
