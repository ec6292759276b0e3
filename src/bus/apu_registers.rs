/*!
APU / I/O register window

Purpose
- Raw storage for the 24 CPU-visible audio and I/O registers ($4000–$4017).
- Indexed directly by `addr - 0x4000`; no mirroring.

Notes
- OAM DMA ($4014), controller ports ($4016/$4017) and the APU status register
  all live in this array. Interpreting them is up to the external subsystems,
  which share the array through `Bus::apu_io_registers` / `Bus::apu_io_registers_mut`.
*/

/// Number of bytes in the $4000–$4017 window.
pub const APU_IO_REGISTER_COUNT: usize = 0x18;

#[derive(Debug, Default, Clone)]
pub struct ApuIoRegisters {
    regs: [u8; APU_IO_REGISTER_COUNT],
}

impl ApuIoRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read at a CPU address in 0x4000..=0x4017.
    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.regs[Self::index(addr)]
    }

    /// Write at a CPU address in 0x4000..=0x4017.
    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.regs[Self::index(addr)] = value;
    }

    pub fn reset(&mut self) {
        self.regs.fill(0);
    }

    pub fn as_array(&self) -> &[u8; APU_IO_REGISTER_COUNT] {
        &self.regs
    }

    pub fn as_array_mut(&mut self) -> &mut [u8; APU_IO_REGISTER_COUNT] {
        &mut self.regs
    }

    #[inline]
    fn index(addr: u16) -> usize {
        (addr.wrapping_sub(0x4000) as usize) % APU_IO_REGISTER_COUNT
    }
}
