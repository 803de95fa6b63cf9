//! Memory and I/O bus interface.

/// Result of a bus read: the data byte plus any wait states the access cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadResult {
    pub data: u8,
    /// Extra T-states the CPU must stall for this access.
    pub wait: u8,
}

impl ReadResult {
    /// A read that completes without wait states.
    #[must_use]
    pub const fn new(data: u8) -> Self {
        Self { data, wait: 0 }
    }

    #[must_use]
    pub const fn with_wait(data: u8, wait: u8) -> Self {
        Self { data, wait }
    }
}

/// Memory and I/O bus as seen by one CPU.
///
/// The bus handles address decoding and routes each access to the device
/// behind it. Z80 systems have a separate I/O space reached through
/// `IN`/`OUT`; CPUs without one never call the `io_*` methods.
///
/// Reads take `&mut self` because some devices change state when read.
pub trait Bus {
    /// Read a byte from memory.
    fn read(&mut self, addr: u32) -> ReadResult;

    /// Write a byte to memory. Returns wait states.
    fn write(&mut self, addr: u32, value: u8) -> u8;

    /// Read a byte from an I/O port.
    fn io_read(&mut self, addr: u32) -> ReadResult;

    /// Write a byte to an I/O port. Returns wait states.
    fn io_write(&mut self, addr: u32, value: u8) -> u8;
}
