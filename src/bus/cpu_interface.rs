/*!
CPU interface dispatcher

Purpose
- Centralize CPU-visible address decoding and delegate to the storage that owns each range.
- Single place to evolve the memory map without touching the Bus façade.

Address map:
- $0000-$07FF: 2KB internal RAM
- $0800-$1FFF: Mirrors of $0000-$07FF (mask & 0x07FF)
- $2000-$2007: PPU registers
- $2008-$3FFF: Mirrors of $2000-$2007 (every 8 bytes)
- $4000-$4017: APU and I/O registers (direct index)
- $4018-$401F: Disabled test-mode registers (placeholder, see below)
- $4020-$FFFF: Cartridge space (PRG ROM, PRG RAM, mapper registers), delegated to the mapper

Test-mode window
- Placeholder until CPU test mode is modeled: reads succeed and return 0,
  writes succeed and are dropped. Nothing should depend on these values.
*/

use crate::bus::Bus;
use crate::error::BusError;

/// Logical region an address decodes to. Decoding is total over `u16`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemoryRegion {
    Ram,
    PpuRegisters,
    ApuIoRegisters,
    TestMode,
    Cartridge,
}

#[inline]
pub fn decode(addr: u16) -> MemoryRegion {
    match addr {
        0x0000..=0x1FFF => MemoryRegion::Ram,
        0x2000..=0x3FFF => MemoryRegion::PpuRegisters,
        0x4000..=0x4017 => MemoryRegion::ApuIoRegisters,
        0x4018..=0x401F => MemoryRegion::TestMode,
        0x4020..=0xFFFF => MemoryRegion::Cartridge,
    }
}

/// CPU-visible read from the unified address space.
pub fn cpu_read(bus: &Bus, addr: u16) -> Result<u8, BusError> {
    match decode(addr) {
        MemoryRegion::Ram => Ok(bus.ram.read(addr)),
        MemoryRegion::PpuRegisters => Ok(bus.ppu_regs.read(addr)),
        MemoryRegion::ApuIoRegisters => Ok(bus.apu_io.read(addr)),
        MemoryRegion::TestMode => {
            log::warn!("read from disabled test-mode register ${addr:04X}");
            Ok(0)
        }
        MemoryRegion::Cartridge => {
            let mapper = bus.mapper.as_deref().ok_or(BusError::Read { addr })?;
            let target = mapper
                .translate_read(addr)
                .ok_or(BusError::Read { addr })?;
            Ok(mapper.load(target))
        }
    }
}

/// CPU-visible write to the unified address space.
pub fn cpu_write(bus: &mut Bus, addr: u16, value: u8) -> Result<(), BusError> {
    match decode(addr) {
        MemoryRegion::Ram => bus.ram.write(addr, value),
        MemoryRegion::PpuRegisters => bus.ppu_regs.write(addr, value),
        MemoryRegion::ApuIoRegisters => bus.apu_io.write(addr, value),
        MemoryRegion::TestMode => {
            log::warn!("write ${value:02X} to disabled test-mode register ${addr:04X} dropped");
        }
        MemoryRegion::Cartridge => {
            let mapper = bus.mapper.as_deref_mut().ok_or(BusError::Write { addr })?;
            let target = mapper
                .translate_write(addr)
                .ok_or(BusError::Write { addr })?;
            mapper.store(target, value);
        }
    }
    Ok(())
}

/// Little-endian word read used by vectors and indirect addressing.
pub fn cpu_read_word(bus: &Bus, addr: u16) -> Result<u16, BusError> {
    let lo = cpu_read(bus, addr)? as u16;
    let hi = cpu_read(bus, addr.wrapping_add(1))? as u16;
    Ok((hi << 8) | lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_boundaries() {
        assert_eq!(decode(0x0000), MemoryRegion::Ram);
        assert_eq!(decode(0x1FFF), MemoryRegion::Ram);
        assert_eq!(decode(0x2000), MemoryRegion::PpuRegisters);
        assert_eq!(decode(0x3FFF), MemoryRegion::PpuRegisters);
        assert_eq!(decode(0x4000), MemoryRegion::ApuIoRegisters);
        assert_eq!(decode(0x4017), MemoryRegion::ApuIoRegisters);
        assert_eq!(decode(0x4018), MemoryRegion::TestMode);
        assert_eq!(decode(0x401F), MemoryRegion::TestMode);
        assert_eq!(decode(0x4020), MemoryRegion::Cartridge);
        assert_eq!(decode(0xFFFF), MemoryRegion::Cartridge);
    }

    #[test]
    fn word_read_is_little_endian() {
        let mut bus = Bus::new();
        cpu_write(&mut bus, 0x0010, 0x34).unwrap();
        cpu_write(&mut bus, 0x0011, 0x12).unwrap();
        assert_eq!(cpu_read_word(&bus, 0x0010), Ok(0x1234));
    }
}
