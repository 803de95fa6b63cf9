//! Core traits and types for board-level emulation.
//!
//! A board owns its memory and I/O decoding and exposes it to CPU cores
//! through [`Bus`]. CPU cores are supplied from outside and driven through
//! [`Cpu`]. Timing is counted in [`Ticks`] derived from a [`MasterClock`].

mod bus;
mod clock;
mod cpu;
mod observable;
mod ticks;

pub use bus::{Bus, ReadResult};
pub use clock::MasterClock;
pub use cpu::Cpu;
pub use observable::{Observable, Value, parse_query_index};
pub use ticks::Ticks;
