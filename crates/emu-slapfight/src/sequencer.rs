//! Read-advanced handshake sequencers.
//!
//! The boot self-test polls a register and expects a fixed, repeating
//! sequence of bytes back. Reading is what moves the sequence forward, so
//! `read()` takes `&mut self`; use `peek()` to look without advancing.

/// Main CPU port $00: the status register self-test sequence.
pub const STATUS_SEQUENCE: [u8; 3] = [0xC7, 0x55, 0x00];

/// Get Star $E803: third value is `(0 + 5) ^ 0x56`.
#[allow(clippy::identity_op)]
pub const GETSTAR_HANDSHAKE: [u8; 3] = [0x00, 0x01, (0 + 5) ^ 0x56];

/// A 3-byte round-robin sequence that advances on every read.
///
/// The cursor can only be moved back to the start by `reset()`.
#[derive(Debug, Clone)]
pub struct HandshakeSequencer {
    table: [u8; 3],
    cursor: usize,
}

impl HandshakeSequencer {
    #[must_use]
    pub const fn new(table: [u8; 3]) -> Self {
        Self { table, cursor: 0 }
    }

    /// Return the current byte and advance, wrapping after the third.
    pub fn read(&mut self) -> u8 {
        let value = self.table[self.cursor];
        self.cursor = (self.cursor + 1) % self.table.len();
        value
    }

    /// The byte the next read will return.
    #[must_use]
    pub fn peek(&self) -> u8 {
        self.table[self.cursor]
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
