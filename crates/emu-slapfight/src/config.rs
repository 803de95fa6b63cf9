//! Board variant configuration.

use thiserror::Error;

/// Main ROM image size for boards with a banked window at $8000.
///
/// $0000-$7FFF is the fixed program ROM; the two 16K banks live at
/// $10000 and $14000 in the image.
pub const BANKED_MAIN_ROM_SIZE: usize = 0x18000;

/// Main ROM image size for Tiger Heli ($0000-$BFFF, all fixed).
pub const FIXED_MAIN_ROM_SIZE: usize = 0xC000;

/// Sound ROM size ($0000-$1FFF on the sound CPU).
pub const SOUND_ROM_SIZE: usize = 0x2000;

/// Supported boards.
///
/// All three share the dual-port RAM, status register and sound gate.
/// They differ in how $8000-$BFFF is mapped and whether the boot handshake
/// at $E803 exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardVariant {
    /// Tiger Heli (GX-551): 48K of fixed ROM, no banking.
    TigerHeli,
    /// Slap Fight: banked 16K window at $8000.
    SlapFight,
    /// Get Star: Slap Fight board plus the $E803 boot handshake.
    GetStar,
}

impl BoardVariant {
    /// Whether ports $08/$09 switch a ROM window at $8000.
    #[must_use]
    pub const fn has_rom_banking(self) -> bool {
        matches!(self, BoardVariant::SlapFight | BoardVariant::GetStar)
    }

    /// Whether reads from $E803 return the boot handshake.
    #[must_use]
    pub const fn has_boot_handshake(self) -> bool {
        matches!(self, BoardVariant::GetStar)
    }

    /// Minimum main ROM image size for this board.
    #[must_use]
    pub const fn main_rom_size(self) -> usize {
        if self.has_rom_banking() {
            BANKED_MAIN_ROM_SIZE
        } else {
            FIXED_MAIN_ROM_SIZE
        }
    }
}

/// Errors detected while building a board from its configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{variant:?} main ROM must be at least {expected:#X} bytes, got {actual:#X}")]
    MainRomTooSmall {
        variant: BoardVariant,
        expected: usize,
        actual: usize,
    },
    #[error("sound ROM must be at least {expected:#X} bytes, got {actual:#X}")]
    SoundRomTooSmall { expected: usize, actual: usize },
}

/// Configuration for creating a board.
///
/// ROM images are supplied already assembled; how they were loaded from
/// disk is up to the caller.
#[derive(Debug, Clone)]
pub struct SlapFightConfig {
    pub variant: BoardVariant,
    /// Main CPU ROM image, laid out as the main CPU region (banks included).
    pub main_rom: Vec<u8>,
    /// Sound CPU ROM image.
    pub sound_rom: Vec<u8>,
}

impl SlapFightConfig {
    /// Check ROM sizes against the variant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.variant.main_rom_size();
        if self.main_rom.len() < expected {
            return Err(ConfigError::MainRomTooSmall {
                variant: self.variant,
                expected,
                actual: self.main_rom.len(),
            });
        }
        if self.sound_rom.len() < SOUND_ROM_SIZE {
            return Err(ConfigError::SoundRomTooSmall {
                expected: SOUND_ROM_SIZE,
                actual: self.sound_rom.len(),
            });
        }
        Ok(())
    }
}
