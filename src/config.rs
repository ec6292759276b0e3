//! Console configuration.

/// Video region. Determines the CPU clock and how fast the graphics
/// subsystem runs relative to it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// NTSC: 60 Hz, 1,789,773 Hz CPU, 3 PPU dots per CPU cycle.
    #[default]
    Ntsc,
    /// PAL: 50 Hz, 1,662,607 Hz CPU, 3.2 PPU dots per CPU cycle.
    Pal,
}

impl Region {
    /// CPU frequency in Hz.
    #[must_use]
    pub const fn cpu_hz(self) -> u32 {
        match self {
            Self::Ntsc => 1_789_773,
            Self::Pal => 1_662_607,
        }
    }

    /// CPU cycles in one video frame (rounded up).
    #[must_use]
    pub const fn cpu_cycles_per_frame(self) -> u64 {
        match self {
            Self::Ntsc => 29_781,
            Self::Pal => 33_248,
        }
    }

    /// PPU dots per CPU cycle as a `(numerator, denominator)` pair.
    #[must_use]
    pub const fn ppu_dots_per_cpu_cycle(self) -> (u32, u32) {
        match self {
            Self::Ntsc => (3, 1),
            Self::Pal => (16, 5),
        }
    }
}

/// Stack pointer value loaded by the reset sequence.
pub const DEFAULT_RESET_SP: u8 = 0xFD;

/// Driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Video region (NTSC or PAL). Defaults to NTSC.
    pub region: Region,
    /// SP after reset. Defaults to `0xFD`.
    pub reset_stack_pointer: u8,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            region: Region::default(),
            reset_stack_pointer: DEFAULT_RESET_SP,
        }
    }
}
