//! Video RAM and scroll/flip registers.
//!
//! The board only stores what the CPU writes; drawing is done by whoever
//! consumes this state after the frame.
//!
//! | Range       | Contents                               |
//! |-------------|----------------------------------------|
//! | $D000-$D7FF | Background tile codes (low 8 bits)     |
//! | $D800-$DFFF | Background tile attributes/colour      |
//! | $E000-$E7FF | Sprite list, 4 bytes per sprite         |
//! | $E800/$E801 | Background scroll X, low/high (write)  |
//! | $E802       | Background scroll Y (write)            |
//! | $F000-$F7FF | Fixed text layer tile codes            |
//! | $F800-$FFFF | Fixed text layer colour                |

const BLOCK: usize = 0x800;

/// Video state written by the main CPU.
#[derive(Debug, Clone)]
pub struct VideoState {
    tile_ram: Box<[u8; BLOCK]>,
    colour_ram: Box<[u8; BLOCK]>,
    sprite_ram: Box<[u8; BLOCK]>,
    fix_tile_ram: Box<[u8; BLOCK]>,
    fix_colour_ram: Box<[u8; BLOCK]>,
    scroll_x: u16,
    scroll_y: u8,
    flip_screen: bool,
}

impl VideoState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tile_ram: Box::new([0; BLOCK]),
            colour_ram: Box::new([0; BLOCK]),
            sprite_ram: Box::new([0; BLOCK]),
            fix_tile_ram: Box::new([0; BLOCK]),
            fix_colour_ram: Box::new([0; BLOCK]),
            scroll_x: 0,
            scroll_y: 0,
            flip_screen: false,
        }
    }

    /// CPU read in $D000-$E7FF or $F000-$FFFF. `None` for anything else.
    #[must_use]
    pub fn read(&self, addr: u16) -> Option<u8> {
        let offset = addr as usize & (BLOCK - 1);
        match addr {
            0xD000..=0xD7FF => Some(self.tile_ram[offset]),
            0xD800..=0xDFFF => Some(self.colour_ram[offset]),
            0xE000..=0xE7FF => Some(self.sprite_ram[offset]),
            0xF000..=0xF7FF => Some(self.fix_tile_ram[offset]),
            0xF800..=0xFFFF => Some(self.fix_colour_ram[offset]),
            _ => None,
        }
    }

    /// CPU write. Returns false if `addr` is not a video address.
    pub fn write(&mut self, addr: u16, value: u8) -> bool {
        let offset = addr as usize & (BLOCK - 1);
        match addr {
            0xD000..=0xD7FF => self.tile_ram[offset] = value,
            0xD800..=0xDFFF => self.colour_ram[offset] = value,
            0xE000..=0xE7FF => self.sprite_ram[offset] = value,
            0xE800 => self.scroll_x = (self.scroll_x & 0xFF00) | u16::from(value),
            0xE801 => self.scroll_x = (self.scroll_x & 0x00FF) | (u16::from(value) << 8),
            0xE802 => self.scroll_y = value,
            0xF000..=0xF7FF => self.fix_tile_ram[offset] = value,
            0xF800..=0xFFFF => self.fix_colour_ram[offset] = value,
            _ => return false,
        }
        true
    }

    /// Ports $02 (flip) and $03 (normal).
    pub fn set_flip_screen(&mut self, flip: bool) {
        log::trace!("Flip screen: {flip}");
        self.flip_screen = flip;
    }

    #[must_use]
    pub fn flip_screen(&self) -> bool {
        self.flip_screen
    }

    /// Background scroll X (high byte from $E801, low from $E800).
    #[must_use]
    pub fn scroll_x(&self) -> u16 {
        self.scroll_x
    }

    #[must_use]
    pub fn scroll_y(&self) -> u8 {
        self.scroll_y
    }

    #[must_use]
    pub fn tile_ram(&self) -> &[u8] {
        &self.tile_ram[..]
    }

    #[must_use]
    pub fn colour_ram(&self) -> &[u8] {
        &self.colour_ram[..]
    }

    #[must_use]
    pub fn sprite_ram(&self) -> &[u8] {
        &self.sprite_ram[..]
    }

    #[must_use]
    pub fn fix_tile_ram(&self) -> &[u8] {
        &self.fix_tile_ram[..]
    }

    #[must_use]
    pub fn fix_colour_ram(&self) -> &[u8] {
        &self.fix_colour_ram[..]
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for VideoState {
    fn default() -> Self {
        Self::new()
    }
}
