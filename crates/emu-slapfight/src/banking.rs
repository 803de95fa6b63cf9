//! Main CPU ROM and the banked window at $8000-$BFFF.
//!
//! Layout of the main ROM image:
//! - $00000-$07FFF: fixed program ROM ($0000-$7FFF)
//! - $08000-$0BFFF: Tiger Heli only, fixed ROM at $8000
//! - $10000-$13FFF: bank 0, selected by a write to port $08
//! - $14000-$17FFF: bank 1, selected by a write to port $09
//!
//! Bank selection is address-decoded: the value written is ignored.
//!
//! Tiger Heli's $8000-$BFFF is 32K of ROM on the board, but nothing in the
//! program selects a page of it, so it is mapped as a plain fixed 16K.

/// Size of the switchable window.
pub const BANK_WINDOW_SIZE: usize = 0x4000;

/// Image offsets of the two banks.
const BANK_BASES: [usize; 2] = [0x10000, 0x14000];

/// Main ROM image with the bank selector.
#[derive(Debug, Clone)]
pub struct RomBanks {
    image: Vec<u8>,
    banked: bool,
    bank: usize,
}

impl RomBanks {
    /// Wrap a ROM image. The caller has already checked its size.
    ///
    /// With `banked` false, $8000-$BFFF reads the image directly and the
    /// bank ports have no effect on what is visible.
    #[must_use]
    pub fn new(image: Vec<u8>, banked: bool) -> Self {
        Self {
            image,
            banked,
            bank: 0,
        }
    }

    /// Port $08.
    pub fn select_bank_low(&mut self) {
        log::trace!("ROM bank 0 selected");
        self.bank = 0;
    }

    /// Port $09.
    pub fn select_bank_high(&mut self) {
        log::trace!("ROM bank 1 selected");
        self.bank = 1;
    }

    /// Read from the window; `offset` is relative to $8000.
    #[must_use]
    pub fn read_banked_window(&self, offset: u16) -> u8 {
        let offset = offset as usize & (BANK_WINDOW_SIZE - 1);
        self.byte_at(self.window_base() + offset)
    }

    /// Read a CPU address in $0000-$BFFF.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        if addr < 0x8000 {
            self.byte_at(addr as usize)
        } else {
            self.read_banked_window(addr - 0x8000)
        }
    }

    /// Active bank (0 or 1).
    #[must_use]
    pub fn bank(&self) -> usize {
        self.bank
    }

    /// Image offset currently visible at $8000.
    #[must_use]
    pub fn window_base(&self) -> usize {
        if self.banked { BANK_BASES[self.bank] } else { 0x8000 }
    }

    pub fn reset(&mut self) {
        self.bank = 0;
    }

    fn byte_at(&self, index: usize) -> u8 {
        self.image.get(index).copied().unwrap_or(0xFF)
    }
}
