/*!
console.rs - Top-level driver owning the CPU, the bus and the fatal handler.

Overview
========
`Console` is the single-threaded clock loop the core expects: every call to
`step` runs exactly one CPU step. It is also the boundary where a `CpuError`
stops being a value and becomes an event: the first failure is logged,
handed to the fatal handler once, and latched. After that the console is
halted and every further `step` returns the latched error without calling
the handler again. `reset` clears the halt.

A console that was never powered on runs the reset sequence before its first
step, so execution always starts at the RESET vector.

Timing
======
`run_frame` steps until the region's per-frame CPU cycle budget is used up.
The graphics subsystem is external; callers that drive it should use
`Region::ppu_dots_per_cpu_cycle` to keep it in lock-step.
*/

use crate::bus::Bus;
use crate::config::ConsoleConfig;
use crate::cpu::core::Cpu;
use crate::error::CpuError;
use crate::mapper::Mapper;

/// Handler invoked once per fatal CPU error.
pub type FatalHandler = Box<dyn FnMut(&CpuError)>;

pub struct Console {
    cpu: Cpu,
    bus: Bus,
    config: ConsoleConfig,
    on_fatal: FatalHandler,
    halted: Option<CpuError>,
    powered: bool,
}

impl Console {
    /// Console with `mapper` in the cartridge slot. Powers on at the first `step`
    /// unless `power_on` is called earlier.
    pub fn new(mapper: impl Mapper + 'static, config: ConsoleConfig) -> Self {
        Self::with_bus(Bus::with_mapper(mapper), config)
    }

    /// Console around an existing bus.
    pub fn with_bus(bus: Bus, config: ConsoleConfig) -> Self {
        Self {
            cpu: Cpu::with_reset_stack_pointer(config.reset_stack_pointer),
            bus,
            config,
            on_fatal: Box::new(|_| {}),
            halted: None,
            powered: false,
        }
    }

    /// Replace the fatal handler.
    pub fn with_fatal_handler(mut self, handler: impl FnMut(&CpuError) + 'static) -> Self {
        self.on_fatal = Box::new(handler);
        self
    }

    pub fn set_fatal_handler(&mut self, handler: impl FnMut(&CpuError) + 'static) {
        self.on_fatal = Box::new(handler);
    }

    // -----------------------------
    // Lifecycle
    // -----------------------------

    /// Run the CPU reset sequence against the current memory contents.
    pub fn power_on(&mut self) -> Result<(), CpuError> {
        self.halted = None;
        self.powered = true;
        let result = self.cpu.reset(&mut self.bus);
        result.map_err(|e| self.fail(e))
    }

    /// Clear RAM and register windows, reset the mapper, then the CPU.
    pub fn reset(&mut self) -> Result<(), CpuError> {
        self.bus.reset();
        self.power_on()
    }

    // -----------------------------
    // Clocking
    // -----------------------------

    /// One CPU step. Returns the cycles consumed.
    pub fn step(&mut self) -> Result<u32, CpuError> {
        if !self.powered {
            self.power_on()?;
        }
        if let Some(err) = self.halted {
            return Err(err);
        }
        let result = self.cpu.step(&mut self.bus);
        result.map_err(|e| self.fail(e))
    }

    /// Up to `max_instructions` steps. Returns total cycles consumed.
    pub fn run(&mut self, max_instructions: usize) -> Result<u64, CpuError> {
        let mut cycles = 0u64;
        for _ in 0..max_instructions {
            cycles += self.step()? as u64;
        }
        Ok(cycles)
    }

    /// Step through one video frame's worth of CPU cycles.
    pub fn run_frame(&mut self) -> Result<u64, CpuError> {
        let budget = self.config.region.cpu_cycles_per_frame();
        let mut cycles = 0u64;
        while cycles < budget {
            cycles += self.step()? as u64;
        }
        Ok(cycles)
    }

    fn fail(&mut self, err: CpuError) -> CpuError {
        log::error!("fatal: {err} (pc=${:04X})", self.cpu.pc());
        (self.on_fatal)(&err);
        self.halted = Some(err);
        err
    }

    // -----------------------------
    // Interrupt inputs
    // -----------------------------

    pub fn request_nmi(&mut self) {
        self.cpu.request_nmi();
    }

    pub fn set_irq_line(&mut self, asserted: bool) {
        self.cpu.set_irq_line(asserted);
    }

    // -----------------------------
    // Inspection
    // -----------------------------

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// The error that halted the console, if any.
    pub fn halt_reason(&self) -> Option<CpuError> {
        self.halted
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }
}
