//! Toaplan "Slap Fight" board family: Tiger Heli, Slap Fight and Get Star.
//!
//! Two Z80s at 6 MHz share a 16-byte dual-port RAM. The main CPU holds the
//! sound CPU in reset until it has finished its own setup, polls a status
//! register that answers with a fixed handshake, and switches a 16K ROM
//! window at $8000. The sound CPU only starts taking its 180 Hz NMI once it
//! has enabled it itself.
//!
//! The CPU cores are not part of this crate: anything implementing
//! [`emu_core::Cpu`] can be plugged into [`SlapFight`]. Video rendering reads
//! the RAM exposed by [`VideoState`].

mod banking;
mod board;
mod config;
mod dpram;
mod gate;
mod machine;
mod psg;
mod sequencer;
mod video;

pub use banking::RomBanks;
pub use board::{Board, MainBus, SoundBus};
pub use config::{BoardVariant, ConfigError, SlapFightConfig};
pub use dpram::DualPortRam;
pub use gate::{InterruptDecision, MainIrqGate, SoundGate};
pub use machine::SlapFight;
pub use psg::PsgLatch;
pub use sequencer::{GETSTAR_HANDSHAKE, HandshakeSequencer, STATUS_SEQUENCE};
pub use video::VideoState;
