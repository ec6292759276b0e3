#![doc = r#"
Famicore library crate.

A 6502 CPU core for the 8-bit Famicom/NES console: memory bus routing, the
official instruction set, and the reset/interrupt protocol. Graphics, audio
and cartridge file parsing are left to the embedding application.

Modules:
- bus: CPU memory router (RAM, register windows, cartridge delegation)
- config: region timing and driver configuration
- console: driver owning CPU + Bus with a fatal-error handler
- cpu: 6502 CPU core (facade + state + dispatch + execute modules)
- error: `BusError` and `CpuError`
- mapper: Mapper trait and NROM (mapper 0) implementation
- mappers: additional mappers (UxROM)

In tests, shared PRG builders are available under `crate::test_utils`.
"#]

// Core modules
pub mod bus;
pub mod config;
pub mod console;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod mappers;

// Re-export commonly used types at the crate root for convenience.
pub use bus::Bus;
pub use config::{ConsoleConfig, Region};
pub use console::Console;
pub use cpu::core::Cpu;
pub use error::{BusError, CpuError};
pub use mapper::{Mapper, Nrom};
pub use mappers::Uxrom;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
