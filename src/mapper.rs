/*!
Mapper subsystem: trait definition and NROM (mapper 0) implementation.

Purpose:
- Decouple cartridge address translation from the CPU bus so additional mappers can be added.
- The bus forwards every CPU access in $4020..=$FFFF to the attached mapper in two steps:
  1. `translate_read` / `translate_write` turn the CPU address into a `CartTarget`
     (or `None` when nothing answers there).
  2. `load` / `store` touch the mapper-owned PRG-ROM / PRG-RAM arrays or registers.

A `None` translation is a bus failure, never a silent open-bus value. Read-only
mappers fail writes by returning `None` from `translate_write`.
*/

/// Where a cartridge-space access lands after translation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CartTarget {
    /// Byte offset into PRG ROM.
    PrgRom(usize),
    /// Byte offset into PRG RAM.
    PrgRam(usize),
    /// A mapper control register, identified by the CPU address written.
    Register(u16),
}

/// Common interface all cartridge mappers must implement.
///
/// Semantics:
/// - Translation methods take full CPU addresses (unmasked) in $4020..=$FFFF.
/// - `load` of a `Register` target returns 0; registers on these boards are write-only.
/// - `reset()` reinitializes bank registers on power/reset. Memory contents are kept.
pub trait Mapper {
    /// Mapper numeric identifier (e.g., 0 for NROM).
    fn mapper_id(&self) -> u16;

    /// Resolve a CPU read, or `None` if nothing is mapped at `addr`.
    fn translate_read(&self, addr: u16) -> Option<CartTarget>;

    /// Resolve a CPU write, or `None` if `addr` is not writable on this board.
    fn translate_write(&self, addr: u16) -> Option<CartTarget>;

    /// Read the byte behind a translated target.
    fn load(&self, target: CartTarget) -> u8;

    /// Write a byte to a translated target (RAM cell or control register).
    fn store(&mut self, target: CartTarget, value: u8);

    fn reset(&mut self) {}
}

/// Mask a relative PRG offset into an array of `len` bytes, mirroring when the
/// window is larger than the data.
#[inline]
pub(crate) fn mirror_offset(rel: usize, len: usize) -> usize {
    if len.is_power_of_two() {
        rel & (len - 1)
    } else {
        rel % len
    }
}

/// NROM (mapper 0) implementation.
///
/// Features:
/// - PRG ROM: either 16 KiB (NROM-128) mirrored or 32 KiB (NROM-256) direct at $8000..=$FFFF.
/// - PRG RAM: optional (commonly 8 KiB) at $6000..=$7FFF, read/write if present.
/// - No registers: writes to $8000..=$FFFF fail.
#[derive(Clone, Debug)]
pub struct Nrom {
    prg_rom: Vec<u8>,
    prg_ram: Vec<u8>,
}

impl Nrom {
    /// Create a new NROM mapper.
    ///
    /// - `prg_rom`: PRG ROM bytes (16 KiB or 32 KiB typical)
    /// - `prg_ram_size`: size of PRG RAM in bytes (0 to disable)
    pub fn new(prg_rom: Vec<u8>, prg_ram_size: usize) -> Self {
        Self {
            prg_rom,
            prg_ram: vec![0; prg_ram_size],
        }
    }

    /// Returns true if this is an NROM-128 (16 KiB PRG) ROM.
    pub fn is_nrom_128(&self) -> bool {
        self.prg_rom.len() == 16 * 1024
    }

    /// Returns true if PRG RAM is present.
    pub fn has_prg_ram(&self) -> bool {
        !self.prg_ram.is_empty()
    }

    #[inline]
    fn prg_ram_target(&self, addr: u16) -> Option<CartTarget> {
        if self.prg_ram.is_empty() {
            return None;
        }
        let rel = (addr - 0x6000) as usize;
        Some(CartTarget::PrgRam(mirror_offset(rel, self.prg_ram.len())))
    }
}

impl Mapper for Nrom {
    #[inline]
    fn mapper_id(&self) -> u16 {
        0
    }

    fn translate_read(&self, addr: u16) -> Option<CartTarget> {
        match addr {
            0x6000..=0x7FFF => self.prg_ram_target(addr),
            0x8000..=0xFFFF if !self.prg_rom.is_empty() => {
                let rel = (addr - 0x8000) as usize;
                Some(CartTarget::PrgRom(mirror_offset(rel, self.prg_rom.len())))
            }
            _ => None,
        }
    }

    fn translate_write(&self, addr: u16) -> Option<CartTarget> {
        match addr {
            0x6000..=0x7FFF => self.prg_ram_target(addr),
            _ => None,
        }
    }

    fn load(&self, target: CartTarget) -> u8 {
        match target {
            CartTarget::PrgRom(i) => self.prg_rom.get(i).copied().unwrap_or(0),
            CartTarget::PrgRam(i) => self.prg_ram.get(i).copied().unwrap_or(0),
            CartTarget::Register(_) => 0,
        }
    }

    fn store(&mut self, target: CartTarget, value: u8) {
        if let CartTarget::PrgRam(i) = target {
            if let Some(cell) = self.prg_ram.get_mut(i) {
                *cell = value;
            }
        }
    }
}
