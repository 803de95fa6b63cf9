//! Master clock configuration.

use crate::Ticks;

/// Master clock configuration for a board.
///
/// Each board has a master crystal that drives all timing. CPUs run at
/// integer divisions of this frequency.
#[derive(Debug, Clone, Copy)]
pub struct MasterClock {
    /// Crystal frequency in Hz (e.g., `12_000_000` for a 12 MHz board).
    pub frequency_hz: u64,
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Frequency of a component clocked at crystal / `divider`.
    #[must_use]
    pub const fn divided(&self, divider: u64) -> Self {
        Self::new(self.frequency_hz / divider)
    }

    /// Ticks per frame at the given frame rate (integer division).
    #[must_use]
    pub const fn ticks_per_frame(&self, frames_per_second: u64) -> Ticks {
        Ticks::new(self.frequency_hz / frames_per_second)
    }
}
