/*!
status.rs - Processor status register (P) and the flag arithmetic contract.

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
Where:
  N = Negative
  V = Overflow
  1 = AlwaysOn (reserved; always reads as 1)
  B = Break (only meaningful in the copy pushed by PHP/BRK)
  D = Decimal (stored and toggled; the console's ALU ignores it)
  I = InterruptDisable
  Z = Zero
  C = Carry

`Status` is a value type. `with` is pure and returns the updated register;
`set_if` is the in-place form and always stores the result, for both the set
and the clear branch.
*/

use std::fmt;

/// One bit of the status register.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Flag {
    Carry = 0b0000_0001,
    Zero = 0b0000_0010,
    InterruptDisable = 0b0000_0100,
    Decimal = 0b0000_1000,
    Break = 0b0001_0000,
    AlwaysOn = 0b0010_0000,
    Overflow = 0b0100_0000,
    Negative = 0b1000_0000,
}

impl Flag {
    pub const ALL: [Flag; 8] = [
        Flag::Carry,
        Flag::Zero,
        Flag::InterruptDisable,
        Flag::Decimal,
        Flag::Break,
        Flag::AlwaysOn,
        Flag::Overflow,
        Flag::Negative,
    ];

    #[inline]
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

const ALWAYS_ON: u8 = Flag::AlwaysOn.mask();

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Status(u8);

impl Default for Status {
    fn default() -> Self {
        Self::power_on()
    }
}

impl Status {
    /// Only the always-on bit set.
    #[inline]
    pub const fn power_on() -> Self {
        Status(ALWAYS_ON)
    }

    /// Build from a raw byte. Bit 5 is forced on.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Status(bits | ALWAYS_ON)
    }

    /// Return a copy with `flag` set when `on`, cleared otherwise.
    /// Clearing `AlwaysOn` has no effect.
    #[inline]
    #[must_use]
    pub const fn with(self, flag: Flag, on: bool) -> Self {
        let m = flag.mask();
        if on {
            Status(self.0 | m)
        } else {
            Status((self.0 & !m) | ALWAYS_ON)
        }
    }

    /// Zero and Negative for an 8-bit result.
    #[inline]
    #[must_use]
    pub const fn with_zn(self, value: u8) -> Self {
        self.with(Flag::Zero, value == 0)
            .with(Flag::Negative, value & 0x80 != 0)
    }

    #[inline]
    pub fn set_if(&mut self, flag: Flag, condition: bool) {
        *self = self.with(flag, condition);
    }

    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        *self = self.with_zn(value);
    }

    #[inline]
    pub const fn test(self, flag: Flag) -> bool {
        self.0 & flag.mask() != 0
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn load(&mut self, bits: u8) {
        *self = Self::from_bits(bits);
    }

    /// Byte pushed to the stack: B set for PHP/BRK, clear for NMI/IRQ.
    #[inline]
    pub const fn for_push(self, brk: bool) -> u8 {
        self.with(Flag::Break, brk).raw()
    }

    /// Byte pulled by PLP/RTI: B is not a real latch and is dropped.
    #[inline]
    pub const fn from_pulled(bits: u8) -> Self {
        Status::from_bits(bits).with(Flag::Break, false)
    }
}

impl fmt::Debug for Status {
    /// `NV-BDIZC`, upper case when set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [char; 8] = ['C', 'Z', 'I', 'D', 'B', '-', 'V', 'N'];
        let s: String = (0..8)
            .rev()
            .map(|bit| {
                let c = NAMES[bit];
                if self.0 & (1 << bit) != 0 || c == '-' {
                    c
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect();
        write!(f, "Status({s})")
    }
}

/// Outcome of `value + operand + carry_in` on the 8-bit ALU.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AddResult {
    pub value: u8,
    pub carry: bool,
    pub overflow: bool,
}

/// Binary add with carry.
///
/// Carry is set iff the 16-bit sum exceeds 0xFF. Overflow is set iff both
/// operands share a sign and the truncated result has the other sign.
#[inline]
pub const fn add_with_carry(value: u8, operand: u8, carry_in: bool) -> AddResult {
    let sum = value as u16 + operand as u16 + carry_in as u16;
    let result = sum as u8;
    AddResult {
        value: result,
        carry: sum > 0xFF,
        overflow: (!(value ^ operand) & (value ^ result) & 0x80) != 0,
    }
}
