/*!
execute.rs - 6502 instruction semantic helpers (ALU, shifts, stack, RMW)

Purpose
=======
Side effects of the official instruction set, shared by the three opcode
group handlers in `dispatch`. Handlers decode and resolve operands; the
helpers here only apply the operation.

Scope
-----
Register / ALU:
    ora, and, eor, adc, sbc, compare, bit
Shifts / rotates (value level):
    asl, lsr, rol, ror
Read-modify-write choreography:
    modify (accumulator or memory; memory gets the read -> dummy write -> write sequence)
Stack:
    php, plp, pha, pla

Arithmetic is binary only. The Decimal flag is stored but never consulted.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::state::CpuState;
use crate::cpu::status::{Flag, Status, add_with_carry};
use crate::error::CpuError;

// ---------------------------------------------------------------------------
// Logical
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn ora(cpu: &mut CpuState, v: u8) {
    cpu.set_a(cpu.a | v);
}

#[inline]
pub(crate) fn and(cpu: &mut CpuState, v: u8) {
    cpu.set_a(cpu.a & v);
}

#[inline]
pub(crate) fn eor(cpu: &mut CpuState, v: u8) {
    cpu.set_a(cpu.a ^ v);
}

/// Z from A & M; N and V copied from bits 7 and 6 of M.
#[inline]
pub(crate) fn bit(cpu: &mut CpuState, v: u8) {
    let s = cpu.status;
    cpu.status = s
        .with(Flag::Zero, cpu.a & v == 0)
        .with(Flag::Negative, v & 0x80 != 0)
        .with(Flag::Overflow, v & 0x40 != 0);
}

// ---------------------------------------------------------------------------
// ADC / SBC / compare
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn adc(cpu: &mut CpuState, v: u8) {
    let r = add_with_carry(cpu.a, v, cpu.status.test(Flag::Carry));
    cpu.status.set_if(Flag::Carry, r.carry);
    cpu.status.set_if(Flag::Overflow, r.overflow);
    cpu.set_a(r.value);
}

#[inline]
pub(crate) fn sbc(cpu: &mut CpuState, v: u8) {
    adc(cpu, v ^ 0xFF);
}

#[inline]
pub(crate) fn compare(cpu: &mut CpuState, reg: u8, v: u8) {
    cpu.status.set_if(Flag::Carry, reg >= v);
    cpu.status.set_zn(reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Shifts / rotates
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl(status: &mut Status, v: u8) -> u8 {
    status.set_if(Flag::Carry, v & 0x80 != 0);
    v << 1
}

#[inline]
pub(crate) fn lsr(status: &mut Status, v: u8) -> u8 {
    status.set_if(Flag::Carry, v & 0x01 != 0);
    v >> 1
}

#[inline]
pub(crate) fn rol(status: &mut Status, v: u8) -> u8 {
    let carry_in = status.test(Flag::Carry) as u8;
    status.set_if(Flag::Carry, v & 0x80 != 0);
    (v << 1) | carry_in
}

#[inline]
pub(crate) fn ror(status: &mut Status, v: u8) -> u8 {
    let carry_in = if status.test(Flag::Carry) { 0x80 } else { 0 };
    status.set_if(Flag::Carry, v & 0x01 != 0);
    (v >> 1) | carry_in
}

// ---------------------------------------------------------------------------
// Read-modify-write
// ---------------------------------------------------------------------------

/// Apply `transform` to the accumulator or to memory and update Z/N from the
/// result. Memory forms write the old value back before the new one, as the
/// hardware does; mapper registers observe both writes.
pub(crate) fn modify<F>(
    cpu: &mut CpuState,
    bus: &mut Bus,
    operand: Operand,
    transform: F,
) -> Result<u8, CpuError>
where
    F: FnOnce(&mut Status, u8) -> u8,
{
    let result = match operand {
        Operand::Accumulator => {
            let r = transform(&mut cpu.status, cpu.a);
            cpu.a = r;
            r
        }
        Operand::Memory { addr, .. } => {
            let old = bus.read(addr)?;
            bus.write(addr, old)?;
            let mut status = cpu.status;
            let r = transform(&mut status, old);
            bus.write(addr, r)?;
            cpu.status = status;
            r
        }
        Operand::Implied | Operand::Immediate(_) => {
            let mut status = cpu.status;
            let r = transform(&mut status, 0);
            cpu.status = status;
            r
        }
    };
    cpu.status.set_zn(result);
    Ok(result)
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

/// PHP pushes with B set.
#[inline]
pub(crate) fn php(cpu: &mut CpuState, bus: &mut Bus) -> Result<(), CpuError> {
    cpu.push(bus, cpu.status.for_push(true))
}

/// PLP drops B and forces bit 5.
#[inline]
pub(crate) fn plp(cpu: &mut CpuState, bus: &Bus) -> Result<(), CpuError> {
    let v = cpu.pull(bus)?;
    cpu.status = Status::from_pulled(v);
    Ok(())
}

#[inline]
pub(crate) fn pha(cpu: &mut CpuState, bus: &mut Bus) -> Result<(), CpuError> {
    cpu.push(bus, cpu.a)
}

#[inline]
pub(crate) fn pla(cpu: &mut CpuState, bus: &Bus) -> Result<(), CpuError> {
    let v = cpu.pull(bus)?;
    cpu.set_a(v);
    Ok(())
}
