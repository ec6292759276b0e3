/*!
state.rs - CPU execution context: register file, decode scratch and cycle counter.

Overview
========
`CpuState` owns every architecturally visible register plus the per-instruction
scratch fields the dispatcher fills in while decoding:
  - `opcode`: last fetched opcode byte
  - `low` / `high`: operand bytes consumed by the addressing resolver
  - `cycle`: monotonically increasing count of elapsed CPU cycles

It also carries the two interrupt inputs. `nmi_pending` is an edge latch that
the dispatcher consumes; `irq_line` is a level that stays asserted until the
outside world releases it.

Stack
=====
The stack lives at $0100-$01FF. A push writes to `$0100 | sp` and then
decrements `sp`; a pull increments `sp` and then reads. Both wrap within the
page.

Everything that touches memory goes through `Bus` and returns a `Result`;
a failed access leaves the registers as they were before the access.
*/

use crate::bus::Bus;
use crate::config::DEFAULT_RESET_SP;
use crate::cpu::status::Status;
use crate::error::CpuError;

const STACK_PAGE: u16 = 0x0100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: Status,

    // Decode scratch
    pub opcode: u8,
    pub low: u8,
    pub high: u8,

    pub cycle: u64,

    // Interrupt inputs
    pub nmi_pending: bool,
    pub irq_line: bool,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: DEFAULT_RESET_SP,
            pc: 0x0000,
            status: Status::power_on(),
            opcode: 0,
            low: 0,
            high: 0,
            cycle: 0,
            nmi_pending: false,
            irq_line: false,
        }
    }
}

impl CpuState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Program counter / instruction stream
    // ---------------------------------------------------------------------

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    /// Read the byte at PC, then advance PC. On failure PC is unchanged.
    #[inline]
    pub fn fetch_u8(&mut self, bus: &Bus) -> Result<u8, CpuError> {
        let b = bus.read(self.pc)?;
        self.advance_pc(1);
        Ok(b)
    }

    /// Fetch a one-byte operand into `low`.
    #[inline]
    pub fn fetch_low(&mut self, bus: &Bus) -> Result<u8, CpuError> {
        let lo = self.fetch_u8(bus)?;
        self.low = lo;
        Ok(lo)
    }

    /// Fetch a two-byte little-endian operand into `low`/`high`.
    #[inline]
    pub fn fetch_word(&mut self, bus: &Bus) -> Result<u16, CpuError> {
        let lo = self.fetch_low(bus)?;
        let hi = self.fetch_u8(bus)?;
        self.high = hi;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// The operand bytes as a little-endian word.
    #[inline]
    pub fn operand_word(&self) -> u16 {
        u16::from_le_bytes([self.low, self.high])
    }

    // ---------------------------------------------------------------------
    // Register helpers
    // ---------------------------------------------------------------------

    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.a = v;
        self.status.set_zn(v);
    }

    #[inline]
    pub fn set_x(&mut self, v: u8) {
        self.x = v;
        self.status.set_zn(v);
    }

    #[inline]
    pub fn set_y(&mut self, v: u8) {
        self.y = v;
        self.status.set_zn(v);
    }

    // ---------------------------------------------------------------------
    // Stack
    // ---------------------------------------------------------------------

    #[inline]
    pub fn stack_addr(&self) -> u16 {
        STACK_PAGE | self.sp as u16
    }

    pub fn push(&mut self, bus: &mut Bus, value: u8) -> Result<(), CpuError> {
        bus.write(self.stack_addr(), value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    pub fn pull(&mut self, bus: &Bus) -> Result<u8, CpuError> {
        let sp = self.sp.wrapping_add(1);
        let v = bus.read(STACK_PAGE | sp as u16)?;
        self.sp = sp;
        Ok(v)
    }

    /// High byte first, so the low byte ends up at the lower address.
    pub fn push_word(&mut self, bus: &mut Bus, value: u16) -> Result<(), CpuError> {
        let [lo, hi] = value.to_le_bytes();
        self.push(bus, hi)?;
        self.push(bus, lo)
    }

    pub fn pull_word(&mut self, bus: &Bus) -> Result<u16, CpuError> {
        let lo = self.pull(bus)?;
        let hi = self.pull(bus)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::status::Flag;
    use crate::test_utils::nrom_bus;

    #[test]
    fn default_state() {
        let s = CpuState::new();
        assert_eq!((s.a, s.x, s.y), (0, 0, 0));
        assert_eq!(s.sp, 0xFD);
        assert_eq!(s.status.raw(), 0x20);
        assert_eq!(s.cycle, 0);
        assert!(!s.nmi_pending && !s.irq_line);
    }

    #[test]
    fn fetch_fills_operand_bytes() {
        let bus = nrom_bus(&[0x34, 0x12]);
        let mut s = CpuState::new();
        s.pc = 0x8000;
        assert_eq!(s.fetch_word(&bus), Ok(0x1234));
        assert_eq!((s.low, s.high), (0x34, 0x12));
        assert_eq!(s.operand_word(), 0x1234);
        assert_eq!(s.pc, 0x8002);
    }

    #[test]
    fn failed_fetch_keeps_pc() {
        let bus = Bus::new();
        let mut s = CpuState::new();
        s.pc = 0x8000;
        assert!(s.fetch_u8(&bus).is_err());
        assert_eq!(s.pc, 0x8000);
    }

    #[test]
    fn push_pull_order_and_wrap() {
        let mut bus = Bus::new();
        let mut s = CpuState::new();
        s.push_word(&mut bus, 0xABCD).unwrap();
        assert_eq!(s.sp, 0xFB);
        assert_eq!(bus.read(0x01FD), Ok(0xAB));
        assert_eq!(bus.read(0x01FC), Ok(0xCD));
        assert_eq!(s.pull_word(&bus), Ok(0xABCD));
        assert_eq!(s.sp, 0xFD);

        s.sp = 0x00;
        s.push(&mut bus, 0x11).unwrap();
        assert_eq!(s.sp, 0xFF);
        assert_eq!(bus.read(0x0100), Ok(0x11));
        assert_eq!(s.pull(&bus), Ok(0x11));
        assert_eq!(s.sp, 0x00);
    }

    #[test]
    fn register_setters_update_zn() {
        let mut s = CpuState::new();
        s.set_a(0x00);
        assert!(s.status.test(Flag::Zero));
        s.set_x(0x80);
        assert!(s.status.test(Flag::Negative));
        assert!(!s.status.test(Flag::Zero));
        s.set_y(0x01);
        assert!(!s.status.test(Flag::Negative));
    }
}
