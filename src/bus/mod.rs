#![doc = r#"
Bus module: CPU memory router façade and its storage submodules.

Overview
- `Bus` is the only path the CPU uses to touch memory. It owns the 2 KiB RAM and
  the two register-window arrays; cartridge memory belongs to the attached `Mapper`.
- Every read and write returns a `Result`. RAM and register windows always succeed;
  cartridge accesses fail when no mapper is attached or the mapper refuses the address.

Modules and responsibilities
- cpu_interface: address decoder (`decode`, `MemoryRegion`) and read/write routing.
- ram: 2 KiB internal RAM with 4x mirroring.
- ppu_registers: 8-byte graphics register window mirrored through $2000-$3FFF.
- apu_registers: 24-byte audio/I/O register window at $4000-$4017.
"#]

pub mod apu_registers;
pub mod cpu_interface;
pub mod ppu_registers;
pub mod ram;


pub use apu_registers::{APU_IO_REGISTER_COUNT, ApuIoRegisters};
pub use cpu_interface::{MemoryRegion, decode};
pub use ppu_registers::{PPU_REGISTER_COUNT, PpuRegisters};
pub use ram::{CPU_RAM_SIZE, Ram};

use crate::error::BusError;
use crate::mapper::Mapper;

pub struct Bus {
    // 2KB CPU RAM
    pub(in crate::bus) ram: Ram,

    // Register windows shared with the graphics/audio subsystems
    pub(in crate::bus) ppu_regs: PpuRegisters,
    pub(in crate::bus) apu_io: ApuIoRegisters,

    // Cartridge (PRG ROM/RAM and mapper registers)
    pub(in crate::bus) mapper: Option<Box<dyn Mapper>>,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Self {
            ram: Ram::new(),
            ppu_regs: PpuRegisters::new(),
            apu_io: ApuIoRegisters::new(),
            mapper: None,
        }
    }

    /// Bus with a mapper already attached.
    pub fn with_mapper(mapper: impl Mapper + 'static) -> Self {
        let mut bus = Self::new();
        bus.attach_mapper(Box::new(mapper));
        bus
    }

    /// Clear RAM and both register windows and reset the mapper's bank state.
    /// Cartridge memory contents are kept.
    pub fn reset(&mut self) {
        self.ram.reset();
        self.ppu_regs.reset();
        self.apu_io.reset();
        if let Some(m) = self.mapper.as_deref_mut() {
            m.reset();
        }
    }

    pub fn attach_mapper(&mut self, mapper: Box<dyn Mapper>) {
        log::debug!("attached mapper {}", mapper.mapper_id());
        self.mapper = Some(mapper);
    }

    pub fn mapper(&self) -> Option<&dyn Mapper> {
        self.mapper.as_deref()
    }

    // -----------------------------
    // CPU-visible memory interface
    // -----------------------------

    #[inline]
    pub fn read(&self, addr: u16) -> Result<u8, BusError> {
        cpu_interface::cpu_read(self, addr)
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        cpu_interface::cpu_write(self, addr, value)
    }

    #[inline]
    pub fn read_word(&self, addr: u16) -> Result<u16, BusError> {
        cpu_interface::cpu_read_word(self, addr)
    }

    // -----------------------------
    // External subsystem access
    // -----------------------------

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn ppu_registers(&self) -> &[u8; PPU_REGISTER_COUNT] {
        self.ppu_regs.as_array()
    }

    pub fn ppu_registers_mut(&mut self) -> &mut [u8; PPU_REGISTER_COUNT] {
        self.ppu_regs.as_array_mut()
    }

    pub fn apu_io_registers(&self) -> &[u8; APU_IO_REGISTER_COUNT] {
        self.apu_io.as_array()
    }

    pub fn apu_io_registers_mut(&mut self) -> &mut [u8; APU_IO_REGISTER_COUNT] {
        self.apu_io.as_array_mut()
    }
}
