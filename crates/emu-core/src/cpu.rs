//! CPU core trait.

use crate::Bus;

/// A CPU core.
///
/// Boards never implement CPUs themselves; a core is plugged in from outside
/// and driven through this trait. The core reaches memory and I/O only
/// through the bus it is handed on each tick, so one board can hand
/// different bus views to different CPUs.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Advance the CPU by one T-state.
    fn tick<B: Bus>(&mut self, bus: &mut B);

    /// Returns the current program counter.
    ///
    /// Returns `u32` so 16-bit and wider cores share the signature.
    fn pc(&self) -> u32;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU is halted.
    fn is_halted(&self) -> bool;

    /// Request a maskable interrupt. Returns true if accepted.
    fn interrupt(&mut self) -> bool;

    /// Request a non-maskable interrupt.
    fn nmi(&mut self);

    /// Reset the CPU to its initial state.
    fn reset(&mut self);
}
