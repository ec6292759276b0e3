/*!
Error types for the CPU core and the memory bus.

Every failure here is fatal for the current step: the core stops, returns the
error, and leaves it to the driver (see `console`) to report and halt.
*/

use thiserror::Error;

use crate::cpu::vectors::Vector;

/// Failure of a single bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// No mapper is attached, or the mapper could not translate the address.
    #[error("bus read failed at ${addr:04X}")]
    Read { addr: u16 },
    /// The target region (or mapper) does not accept writes at this address.
    #[error("bus write failed at ${addr:04X}")]
    Write { addr: u16 },
}

/// Unrecoverable CPU condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    #[error("could not read byte at ${addr:04X}")]
    BusRead { addr: u16 },
    #[error("could not write byte at ${addr:04X}")]
    BusWrite { addr: u16 },
    #[error("could not read {vector:?} vector at ${addr:04X}")]
    VectorRead { vector: Vector, addr: u16 },
    #[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },
}

impl From<BusError> for CpuError {
    fn from(err: BusError) -> Self {
        match err {
            BusError::Read { addr } => CpuError::BusRead { addr },
            BusError::Write { addr } => CpuError::BusWrite { addr },
        }
    }
}
