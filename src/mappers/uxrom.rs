/*
UxROM (Mapper 2) implementation.

Characteristics:
- PRG: 16 KiB switchable bank at $8000-$BFFF, last 16 KiB bank fixed at $C000-$FFFF.
- Bank select: any CPU write to $8000-$FFFF latches the bank number.
- No PRG RAM, no IRQ.

Bank Select:
- UNROM uses the low 3 bits, UOROM the low 4. This implementation takes the
  written value modulo the number of 16 KiB banks, which covers both.

Reset Behavior:
- Switchable bank returns to 0.
*/

use crate::mapper::{CartTarget, Mapper};

const BANK_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct Uxrom {
    prg_rom: Vec<u8>,
    bank: u8,
    bank_count: u8,
}

impl Uxrom {
    pub fn new(prg_rom: Vec<u8>) -> Self {
        debug_assert!(
            prg_rom.len() % BANK_SIZE == 0 && !prg_rom.is_empty(),
            "UxROM PRG must be a non-zero multiple of 16K"
        );
        let bank_count = (prg_rom.len() / BANK_SIZE).clamp(1, 255) as u8;
        Self {
            prg_rom,
            bank: 0,
            bank_count,
        }
    }

    /// Currently selected bank for $8000-$BFFF.
    pub fn current_bank(&self) -> u8 {
        self.bank
    }
}

impl Mapper for Uxrom {
    fn mapper_id(&self) -> u16 {
        2
    }

    fn translate_read(&self, addr: u16) -> Option<CartTarget> {
        let bank = match addr {
            0x8000..=0xBFFF => self.bank as usize,
            0xC000..=0xFFFF => self.bank_count as usize - 1,
            _ => return None,
        };
        let offset = bank * BANK_SIZE + (addr as usize & (BANK_SIZE - 1));
        Some(CartTarget::PrgRom(offset))
    }

    fn translate_write(&self, addr: u16) -> Option<CartTarget> {
        match addr {
            0x8000..=0xFFFF => Some(CartTarget::Register(addr)),
            _ => None,
        }
    }

    fn load(&self, target: CartTarget) -> u8 {
        match target {
            CartTarget::PrgRom(i) => self.prg_rom.get(i).copied().unwrap_or(0),
            _ => 0,
        }
    }

    fn store(&mut self, target: CartTarget, value: u8) {
        if let CartTarget::Register(_) = target {
            self.bank = value % self.bank_count;
            log::debug!("uxrom: switched $8000 bank to {}", self.bank);
        }
    }

    fn reset(&mut self) {
        self.bank = 0;
    }
}
