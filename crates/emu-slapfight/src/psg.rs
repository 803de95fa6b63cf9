//! AY-3-8910 register latch on the sound bus.
//!
//! Only the CPU-facing side of the chip is kept: the address latch and the
//! 16 registers. Tone generation is not emulated. Registers 14 and 15 are
//! the chip's I/O ports, wired to the DIP switches and control inputs; the
//! input side loads them with `set_port_a`/`set_port_b` and the sound
//! program reads them back.

const REGISTER_COUNT: usize = 16;

/// Per-register write masks (unused bits read back as 0).
const REGISTER_MASKS: [u8; REGISTER_COUNT] = [
    0xFF, 0x0F, 0xFF, 0x0F, 0xFF, 0x0F, // tone periods
    0x1F, // noise period
    0xFF, // mixer
    0x1F, 0x1F, 0x1F, // amplitudes
    0xFF, 0xFF, // envelope period
    0x0F, // envelope shape
    0xFF, 0xFF, // I/O ports A/B
];

/// One PSG's register file.
#[derive(Debug, Clone, Default)]
pub struct PsgLatch {
    selected: u8,
    registers: [u8; REGISTER_COUNT],
}

impl PsgLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Address write ($A080 / $A090).
    pub fn select_register(&mut self, value: u8) {
        self.selected = value & 0x0F;
    }

    /// Data write ($A082 / $A092).
    pub fn write_data(&mut self, value: u8) {
        let reg = self.selected as usize;
        // Port registers are inputs on this board; the CPU cannot overwrite them.
        if reg < 14 {
            self.registers[reg] = value & REGISTER_MASKS[reg];
        }
    }

    /// Data read ($A081 / $A091).
    #[must_use]
    pub fn read_data(&self) -> u8 {
        self.registers[self.selected as usize]
    }

    /// I/O port A (register 14) input.
    pub fn set_port_a(&mut self, value: u8) {
        self.registers[14] = value;
    }

    /// I/O port B (register 15) input.
    pub fn set_port_b(&mut self, value: u8) {
        self.registers[15] = value;
    }

    #[must_use]
    pub fn register(&self, reg: usize) -> u8 {
        self.registers[reg & 0x0F]
    }

    #[must_use]
    pub fn selected(&self) -> u8 {
        self.selected
    }

    /// Clear the tone registers. Port inputs are external and survive.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.registers[..14].fill(0);
    }
}
