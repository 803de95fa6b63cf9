//! Dual-port RAM shared by the main and sound CPUs.
//!
//! Both CPUs see the same 16 bytes at $C800-$C80F. There is no arbitration
//! and no latency: a write from one side is visible to the next read from
//! the other.
//!
//! The schematics route a write strobe to the sound CPU's NMI, but games
//! expect the sound CPU to pick up commands on its own periodic NMI, so
//! writes here raise nothing.

/// Number of distinctly addressed bytes.
pub const DPRAM_SIZE: usize = 0x10;

/// The shared mailbox RAM.
#[derive(Debug, Clone)]
pub struct DualPortRam {
    cells: [u8; DPRAM_SIZE],
}

impl DualPortRam {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [0; DPRAM_SIZE],
        }
    }

    /// Read the byte at `offset` (address lines above A3 are not decoded).
    #[must_use]
    pub fn read(&self, offset: u16) -> u8 {
        self.cells[offset as usize & (DPRAM_SIZE - 1)]
    }

    pub fn write(&mut self, offset: u16, value: u8) {
        self.cells[offset as usize & (DPRAM_SIZE - 1)] = value;
    }

    /// All 16 bytes, for observation.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub fn reset(&mut self) {
        self.cells = [0; DPRAM_SIZE];
    }
}

impl Default for DualPortRam {
    fn default() -> Self {
        Self::new()
    }
}
