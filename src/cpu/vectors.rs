/*!
vectors.rs - Hardware vectors, the reset sequence and interrupt entry.

Vector table (little-endian words at the top of the address space):
  $FFFA/$FFFB  NMI
  $FFFC/$FFFD  RESET
  $FFFE/$FFFF  IRQ / BRK

Both sequences read the vector before touching any register, so a failed
vector fetch reports `CpuError::VectorRead` and leaves the CPU state as it was.
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;
use crate::cpu::status::{Flag, Status};
use crate::error::CpuError;

/// Cycles charged for an NMI/IRQ entry (and BRK).
pub const INTERRUPT_CYCLES: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vector {
    Nmi,
    Reset,
    Irq,
}

impl Vector {
    /// Address of the vector's low byte.
    #[inline]
    pub const fn addr(self) -> u16 {
        match self {
            Vector::Nmi => 0xFFFA,
            Vector::Reset => 0xFFFC,
            Vector::Irq => 0xFFFE,
        }
    }
}

/// Read a vector word. The error names the byte that failed.
pub fn read_vector(bus: &Bus, vector: Vector) -> Result<u16, CpuError> {
    let base = vector.addr();
    let lo = bus
        .read(base)
        .map_err(|_| CpuError::VectorRead { vector, addr: base })?;
    let hi_addr = base.wrapping_add(1);
    let hi = bus.read(hi_addr).map_err(|_| CpuError::VectorRead {
        vector,
        addr: hi_addr,
    })?;
    Ok(u16::from_le_bytes([lo, hi]))
}

/// Power-on / reset: PC from $FFFC, A=X=Y=0, SP=`reset_sp`, P=$20, cycle=0.
pub fn reset(cpu: &mut CpuState, bus: &Bus, reset_sp: u8) -> Result<(), CpuError> {
    let pc = read_vector(bus, Vector::Reset)?;
    *cpu = CpuState {
        a: 0,
        x: 0,
        y: 0,
        sp: reset_sp,
        pc,
        status: Status::power_on(),
        opcode: 0,
        low: 0,
        high: 0,
        cycle: 0,
        nmi_pending: false,
        irq_line: cpu.irq_line,
    };
    log::debug!("reset: pc=${pc:04X} sp=${reset_sp:02X}");
    Ok(())
}

/// Push PC and status, set I, jump through `vector`.
///
/// `brk` selects the B bit in the pushed status: set for BRK, clear for
/// hardware NMI/IRQ. The caller decides which PC is pushed.
pub fn enter(cpu: &mut CpuState, bus: &mut Bus, vector: Vector, brk: bool) -> Result<(), CpuError> {
    let target = read_vector(bus, vector)?;
    cpu.push_word(bus, cpu.pc)?;
    cpu.push(bus, cpu.status.for_push(brk))?;
    cpu.status.set_if(Flag::InterruptDisable, true);
    cpu.pc = target;
    Ok(())
}

/// Hardware interrupt entry (B clear in the pushed status).
pub fn service_interrupt(cpu: &mut CpuState, bus: &mut Bus, vector: Vector) -> Result<(), CpuError> {
    let from = cpu.pc;
    enter(cpu, bus, vector, false)?;
    log::debug!("{vector:?} taken at ${from:04X} -> ${:04X}", cpu.pc);
    Ok(())
}
