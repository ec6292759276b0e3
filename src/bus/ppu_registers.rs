#![doc = r#"
PPU register window

Purpose
- Raw storage for the eight CPU-visible graphics registers ($2000-$2007).
- The CPU core assigns no meaning to these bytes; the graphics subsystem reads
  and writes the same array through `Bus::ppu_registers` / `Bus::ppu_registers_mut`.

Notes
- Mirroring: addresses $2008-$3FFF repeat $2000-$2007 every 8 bytes.
"#]

/// Number of distinct PPU registers.
pub const PPU_REGISTER_COUNT: usize = 8;

#[derive(Debug, Default, Clone)]
pub struct PpuRegisters {
    regs: [u8; PPU_REGISTER_COUNT],
}

impl PpuRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read through the CPU window ($2000..=$3FFF).
    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.regs[mirror_ppu_reg(addr)]
    }

    /// Write through the CPU window ($2000..=$3FFF).
    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.regs[mirror_ppu_reg(addr)] = value;
    }

    pub fn reset(&mut self) {
        self.regs.fill(0);
    }

    pub fn as_array(&self) -> &[u8; PPU_REGISTER_COUNT] {
        &self.regs
    }

    pub fn as_array_mut(&mut self) -> &mut [u8; PPU_REGISTER_COUNT] {
        &mut self.regs
    }
}

/// Register index for a CPU address in the PPU window.
#[inline]
pub fn mirror_ppu_reg(addr: u16) -> usize {
    (addr.wrapping_sub(0x2000) as usize) % PPU_REGISTER_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_eighth_address_aliases() {
        let mut r = PpuRegisters::new();
        r.write(0x3FFF, 0x9C);
        assert_eq!(r.read(0x2007), 0x9C);
        assert_eq!(r.read(0x200F), 0x9C);
        assert_eq!(r.as_array()[7], 0x9C);
    }

    #[test]
    fn external_side_sees_cpu_writes() {
        let mut r = PpuRegisters::new();
        r.as_array_mut()[2] = 0x80; // e.g. vblank bit set by the graphics side
        assert_eq!(r.read(0x2002), 0x80);
        assert_eq!(r.read(0x3002), 0x80);
    }
}
