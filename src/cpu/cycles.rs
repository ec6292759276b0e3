/*!
cycles.rs - Base cycle counts for the official 6502 instruction set.

`BASE_CYCLES` is a 256-entry lookup indexed by opcode. Undefined opcodes hold
0; the dispatcher rejects them before timing is ever consulted.

Dynamic penalties are added in dispatch, not here:
  - +1 when a read through abs,X / abs,Y / (zp),Y crosses a page
  - +1 for a taken branch, +1 more if the target is on another page
Stores and read-modify-write forms already include their fixed extra cycle.
*/

#[rustfmt::skip]
pub const BASE_CYCLES: [u8; 256] = [
//  0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
    7, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 0, 4, 6, 0, // 0
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 1
    6, 6, 0, 0, 3, 3, 5, 0, 4, 2, 2, 0, 4, 4, 6, 0, // 2
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 3
    6, 6, 0, 0, 0, 3, 5, 0, 3, 2, 2, 0, 3, 4, 6, 0, // 4
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 5
    6, 6, 0, 0, 0, 3, 5, 0, 4, 2, 2, 0, 5, 4, 6, 0, // 6
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // 7
    0, 6, 0, 0, 3, 3, 3, 0, 2, 0, 2, 0, 4, 4, 4, 0, // 8
    2, 6, 0, 0, 4, 4, 4, 0, 2, 5, 2, 0, 0, 5, 0, 0, // 9
    2, 6, 2, 0, 3, 3, 3, 0, 2, 2, 2, 0, 4, 4, 4, 0, // A
    2, 5, 0, 0, 4, 4, 4, 0, 2, 4, 2, 0, 4, 4, 4, 0, // B
    2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0, // C
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // D
    2, 6, 0, 0, 3, 3, 5, 0, 2, 2, 2, 0, 4, 4, 6, 0, // E
    2, 5, 0, 0, 0, 4, 6, 0, 2, 4, 0, 0, 0, 4, 7, 0, // F
];

/// Baseline cycles for `op`, before page-cross and branch penalties.
#[inline]
pub fn base_cycles(op: u8) -> u32 {
    BASE_CYCLES[op as usize] as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_timings() {
        assert_eq!(base_cycles(0xA9), 2); // LDA #
        assert_eq!(base_cycles(0xBD), 4); // LDA abs,X
        assert_eq!(base_cycles(0x9D), 5); // STA abs,X
        assert_eq!(base_cycles(0xFE), 7); // INC abs,X
        assert_eq!(base_cycles(0x00), 7); // BRK
        assert_eq!(base_cycles(0x20), 6); // JSR
        assert_eq!(base_cycles(0x6C), 5); // JMP (ind)
        assert_eq!(base_cycles(0xEA), 2); // NOP
    }

    #[test]
    fn official_opcode_count() {
        assert_eq!(BASE_CYCLES.iter().filter(|&&c| c != 0).count(), 151);
    }

    #[test]
    fn column_three_is_empty() {
        for op in (0x03..=0xFFu8).step_by(4) {
            assert_eq!(base_cycles(op), 0, "opcode {op:02X}");
        }
    }
}
