/*!
cpu::mod - Public façade for the 6502 CPU core.

```text
status.rs     - Status register (`Flag`, `Status`) and the add-with-carry contract.
state.rs      - Execution context: registers, decode scratch, cycle counter, stack.
addressing.rs - Addressing modes and operand resolution with page-cross detection.
cycles.rs     - Base cycle table.
execute.rs    - Instruction semantic helpers (ALU, shifts, RMW, stack).
vectors.rs    - NMI/RESET/IRQ vectors, reset sequence, interrupt entry.
dispatch/     - One CPU step: interrupts, fetch, classify by opcode group, execute.
core/         - `Cpu` façade wrapping `CpuState`.
```

Feature flags:
- `trace`: log every executed instruction at `trace` level.

Usage:
```ignore
use famicore::cpu::Cpu;

let mut cpu = Cpu::new();
cpu.reset(&mut bus)?;
cpu.step(&mut bus)?;
```
*/

pub mod addressing;
pub mod core;
pub mod cycles;
pub mod dispatch;
pub mod execute;
pub mod state;
pub mod status;
pub mod vectors;

pub use crate::cpu::addressing::{AddressingMode, Operand};
pub use crate::cpu::core::Cpu;
pub use crate::cpu::dispatch::{Instruction, OpcodeGroup, Operation, classify, decode};
pub use crate::cpu::state::CpuState;
pub use crate::cpu::status::{Flag, Status};
pub use crate::cpu::vectors::Vector;
