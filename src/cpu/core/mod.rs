/*!
core::Cpu - 6502 CPU façade wrapping `CpuState`.

Design
======
- `Cpu` owns the `CpuState` and the stack pointer value used by reset.
- Every operation that touches the bus returns `Result<_, CpuError>`. The
  façade does not halt itself; a driver (see `console`) decides what a
  failure means.
- Interrupt inputs are set here and consumed by the next `step`.
*/

use crate::bus::Bus;
use crate::config::DEFAULT_RESET_SP;
use crate::cpu::dispatch;
use crate::cpu::state::CpuState;
use crate::cpu::status::Status;
use crate::cpu::vectors;
use crate::error::CpuError;

#[derive(Debug, Clone)]
pub struct Cpu {
    state: CpuState,
    reset_sp: u8,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Construct a new CPU with power-up defaults.
    pub fn new() -> Self {
        Self::with_reset_stack_pointer(DEFAULT_RESET_SP)
    }

    /// CPU whose reset sequence loads `sp` into the stack pointer.
    pub fn with_reset_stack_pointer(sp: u8) -> Self {
        Self {
            state: CpuState::new(),
            reset_sp: sp,
        }
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Direct state access for tests and debuggers.
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Run the reset sequence: PC from $FFFC/$FFFD, registers cleared.
    pub fn reset(&mut self, bus: &mut Bus) -> Result<(), CpuError> {
        vectors::reset(&mut self.state, bus, self.reset_sp)
    }

    /// Execute one instruction (or interrupt entry). Returns cycles consumed.
    pub fn step(&mut self, bus: &mut Bus) -> Result<u32, CpuError> {
        dispatch::step(&mut self.state, bus)
    }

    /// Step until at least `min_cycles` have elapsed. Returns cycles consumed.
    pub fn run_cycles(&mut self, bus: &mut Bus, min_cycles: u64) -> Result<u64, CpuError> {
        let start = self.state.cycle;
        while self.state.cycle - start < min_cycles {
            self.step(bus)?;
        }
        Ok(self.state.cycle - start)
    }

    // ---------------------------------------------------------------------
    // Interrupt inputs
    // ---------------------------------------------------------------------

    /// Latch an NMI edge; serviced before the next instruction.
    pub fn request_nmi(&mut self) {
        self.state.nmi_pending = true;
    }

    /// Drive the IRQ line. Serviced while asserted and I is clear.
    pub fn set_irq_line(&mut self, asserted: bool) {
        self.state.irq_line = asserted;
    }

    pub fn nmi_pending(&self) -> bool {
        self.state.nmi_pending
    }

    pub fn irq_line(&self) -> bool {
        self.state.irq_line
    }

    // ---------------------------------------------------------------------
    // Register accessors (read)
    // ---------------------------------------------------------------------
    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    pub fn status(&self) -> Status {
        self.state.status
    }
    /// Total cycles since the last reset.
    pub fn cycles(&self) -> u64 {
        self.state.cycle
    }
    pub fn reset_stack_pointer(&self) -> u8 {
        self.reset_sp
    }

    // ---------------------------------------------------------------------
    // Register mutators (write; flags untouched)
    // ---------------------------------------------------------------------
    pub fn set_a(&mut self, v: u8) {
        self.state.a = v;
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.x = v;
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.y = v;
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.sp = v;
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.pc = v;
    }
    /// Load P from a raw byte (bit 5 forced on).
    pub fn set_status(&mut self, v: u8) {
        self.state.status.load(v);
    }
}
