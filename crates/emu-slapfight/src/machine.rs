//! Top-level board with its two CPUs.
//!
//! The crystal runs at 12 MHz and both Z80s at crystal / 2. A frame is
//! 1/60 s = 100,000 T-states per CPU, split into 10 slices. Each slice runs
//! the main CPU for its share, then the sound CPU for the same share, so
//! a value the main CPU posts in dual-port RAM is seen by the sound CPU
//! within the same slice.
//!
//! # Interrupts
//!
//! - Main CPU: one IRQ per frame at vblank if ports $06/$07 enabled it. The
//!   request is held until the CPU accepts it.
//! - Sound CPU: NMI at 180 Hz (3 per frame, evenly spaced in sound
//!   T-states). Each one goes through the sound gate, which drops it until
//!   the sound program has written $A0E0.
//!
//! # Sound CPU reset
//!
//! While the main CPU holds the reset line the sound CPU is not ticked and
//! its NMI timer does not advance. The core is reset on the edge into
//! reset, so it starts from its reset vector when released.

use emu_core::{Cpu, MasterClock, Observable, Ticks, Value};

use crate::board::Board;
use crate::config::{ConfigError, SlapFightConfig};
use crate::gate::InterruptDecision;

/// Master crystal frequency.
const CRYSTAL_HZ: u64 = 12_000_000;

/// Crystal ticks per CPU T-state (both CPUs run at 6 MHz).
const CPU_DIVIDER: u64 = 2;

const FRAMES_PER_SECOND: u64 = 60;

/// CPU interleave granularity.
const SLICES_PER_FRAME: u64 = 10;

/// Sound CPU periodic NMIs per frame (180 Hz).
const SOUND_NMI_PER_FRAME: u64 = 3;

/// Slap Fight family board with main and sound CPU cores.
pub struct SlapFight<M, S> {
    board: Board,
    main_cpu: M,
    sound_cpu: S,
    /// T-states per frame for each CPU.
    frame_tstates: Ticks,
    /// NMI timer phase; fires each time it crosses `frame_tstates`.
    sound_nmi_phase: u64,
    /// Reset line state seen after the last main CPU T-state.
    sound_held: bool,
    main_tstates: Ticks,
    sound_tstates: Ticks,
    frame_count: u64,
}

impl<M: Cpu, S: Cpu> SlapFight<M, S> {
    /// Build the board and attach the two CPU cores.
    ///
    /// The sound core is held in reset until the main program releases it.
    pub fn new(config: SlapFightConfig, main_cpu: M, sound_cpu: S) -> Result<Self, ConfigError> {
        let board = Board::new(config)?;
        let cpu_clock = MasterClock::new(CRYSTAL_HZ).divided(CPU_DIVIDER);

        Ok(Self {
            board,
            main_cpu,
            sound_cpu,
            frame_tstates: cpu_clock.ticks_per_frame(FRAMES_PER_SECOND),
            sound_nmi_phase: 0,
            sound_held: true,
            main_tstates: Ticks::ZERO,
            sound_tstates: Ticks::ZERO,
            frame_count: 0,
        })
    }

    /// Run one frame. Returns the main CPU T-states executed.
    pub fn run_frame(&mut self) -> u64 {
        let start = self.main_tstates;
        let slice = self.frame_tstates / SLICES_PER_FRAME;

        for _ in 0..SLICES_PER_FRAME {
            self.run_main(slice);
            self.run_sound(slice);
        }

        self.board.main_irq.raise_vblank();
        self.frame_count += 1;

        (self.main_tstates - start).get()
    }

    fn run_main(&mut self, tstates: Ticks) {
        for _ in 0..tstates.get() {
            if self.board.main_irq.pending() && self.main_cpu.interrupt() {
                self.board.main_irq.acknowledge();
            }
            self.main_cpu.tick(&mut self.board.main_bus());
            self.main_tstates += Ticks::new(1);
            self.sync_sound_reset();
        }
    }

    fn run_sound(&mut self, tstates: Ticks) {
        // Only the main CPU drives the reset line, so it cannot change here.
        if self.board.sound_gate.sound_cpu_in_reset() {
            return;
        }

        for _ in 0..tstates.get() {
            self.sound_cpu.tick(&mut self.board.sound_bus());
            self.sound_tstates += Ticks::new(1);

            self.sound_nmi_phase += SOUND_NMI_PER_FRAME;
            if self.sound_nmi_phase >= self.frame_tstates.get() {
                self.sound_nmi_phase -= self.frame_tstates.get();
                match self.board.sound_gate.poll_sound_interrupt() {
                    InterruptDecision::Fire => self.sound_cpu.nmi(),
                    InterruptDecision::Suppress => log::trace!("Sound NMI suppressed"),
                }
            }
        }
    }

    /// Reset the sound core on the edge into reset.
    fn sync_sound_reset(&mut self) {
        let held = self.board.sound_gate.sound_cpu_in_reset();
        if held && !self.sound_held {
            log::debug!("Sound CPU held in reset at main T-state {}", self.main_tstates.get());
            self.sound_cpu.reset();
        }
        self.sound_held = held;
    }

    /// Machine reset: board to power-on, both cores reset.
    pub fn reset(&mut self) {
        self.board.reset();
        self.main_cpu.reset();
        self.sound_cpu.reset();
        self.sound_nmi_phase = 0;
        self.sound_held = true;
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn main_cpu(&self) -> &M {
        &self.main_cpu
    }

    pub fn main_cpu_mut(&mut self) -> &mut M {
        &mut self.main_cpu
    }

    #[must_use]
    pub fn sound_cpu(&self) -> &S {
        &self.sound_cpu
    }

    pub fn sound_cpu_mut(&mut self) -> &mut S {
        &mut self.sound_cpu
    }

    /// T-states per frame for each CPU.
    #[must_use]
    pub fn frame_tstates(&self) -> Ticks {
        self.frame_tstates
    }

    /// Total main CPU T-states since creation.
    #[must_use]
    pub fn main_tstates(&self) -> Ticks {
        self.main_tstates
    }

    /// Total sound CPU T-states since creation (excludes time held in reset).
    #[must_use]
    pub fn sound_tstates(&self) -> Ticks {
        self.sound_tstates
    }

    /// Completed frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl<M: Cpu, S: Cpu> Observable for SlapFight<M, S> {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "cpu.main.pc" => Some(self.main_cpu.pc().into()),
            "cpu.sound.pc" => Some(self.sound_cpu.pc().into()),
            "cpu.main.tstates" => Some(self.main_tstates.get().into()),
            "cpu.sound.tstates" => Some(self.sound_tstates.get().into()),
            "frame" => Some(self.frame_count.into()),
            _ => self.board.query(path),
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cpu.main.pc",
            "cpu.sound.pc",
            "cpu.main.tstates",
            "cpu.sound.tstates",
            "frame",
            "<board paths>",
        ]
    }
}
