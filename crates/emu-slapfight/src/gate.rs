//! Reset and interrupt latches.
//!
//! The main CPU controls the sound CPU's reset line (port $00 asserts,
//! port $01 releases). The sound CPU's periodic NMI is additionally gated
//! by an enable latch that only the sound program sets, by writing $A0E0
//! once its own initialisation is done. Asserting reset clears that latch,
//! so every restart of the sound CPU begins with NMIs suppressed.
//!
//! The main CPU's own vblank interrupt has a separate enable latch
//! (ports $06/$07).

/// Outcome of a periodic sound interrupt opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptDecision {
    /// Deliver the interrupt.
    Fire,
    /// Drop the request. It is not queued for later.
    Suppress,
}

/// Sound CPU reset line and interrupt enable.
#[derive(Debug, Clone)]
pub struct SoundGate {
    in_reset: bool,
    interrupt_enabled: bool,
}

impl SoundGate {
    /// Power-on state: sound CPU held in reset, interrupts off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            in_reset: true,
            interrupt_enabled: false,
        }
    }

    /// Hold the sound CPU in reset and disable its interrupt.
    pub fn assert_sound_reset(&mut self) {
        log::trace!("Sound CPU reset asserted");
        self.in_reset = true;
        self.interrupt_enabled = false;
    }

    /// Let the sound CPU run. The interrupt enable is left alone.
    pub fn release_sound_reset(&mut self) {
        log::trace!("Sound CPU reset released");
        self.in_reset = false;
    }

    /// Sound program has initialised and wants its periodic interrupt.
    pub fn enable_sound_interrupt(&mut self) {
        log::trace!("Sound CPU interrupt enabled");
        self.interrupt_enabled = true;
    }

    /// Decide whether one periodic interrupt reaches the sound CPU.
    #[must_use]
    pub fn poll_sound_interrupt(&self) -> InterruptDecision {
        if self.interrupt_enabled {
            InterruptDecision::Fire
        } else {
            InterruptDecision::Suppress
        }
    }

    #[must_use]
    pub fn sound_cpu_in_reset(&self) -> bool {
        self.in_reset
    }

    #[must_use]
    pub fn sound_interrupt_enabled(&self) -> bool {
        self.interrupt_enabled
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SoundGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Main CPU interrupt enable latch plus the held vblank request.
///
/// The request is held (not pulsed): it stays pending until the CPU accepts
/// it or the program disables the latch, which also clears it.
#[derive(Debug, Clone, Default)]
pub struct MainIrqGate {
    enabled: bool,
    pending: bool,
}

impl MainIrqGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Port $06: disable and clear.
    pub fn disable(&mut self) {
        log::trace!("Main CPU interrupt disabled");
        self.enabled = false;
        self.pending = false;
    }

    /// Port $07: enable.
    pub fn enable(&mut self) {
        log::trace!("Main CPU interrupt enabled");
        self.enabled = true;
    }

    /// Vblank: request an interrupt if the latch is enabled.
    pub fn raise_vblank(&mut self) {
        if self.enabled {
            self.pending = true;
        }
    }

    /// Whether a request is waiting for the CPU.
    #[must_use]
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// The CPU took the interrupt.
    pub fn acknowledge(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
