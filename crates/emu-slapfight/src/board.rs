//! Board state and the two CPU bus views.
//!
//! All mutable board state lives in [`Board`]. Each CPU reaches it through
//! its own view ([`MainBus`], [`SoundBus`]) which decodes that CPU's memory
//! map and port table. Views borrow the board mutably, so only one CPU's
//! access is ever in flight; the scheduler decides the order.
//!
//! # Main CPU
//!
//! | Range       | Read                  | Write                   |
//! |-------------|-----------------------|-------------------------|
//! | $0000-$7FFF | ROM                   | -                       |
//! | $8000-$BFFF | ROM window            | -                       |
//! | $C000-$CFFF | work RAM              | work RAM                |
//! | $C800-$C80F | dual-port RAM         | dual-port RAM           |
//! | $D000-$E7FF | video RAM             | video RAM               |
//! | $E800-$E802 | -                     | scroll registers        |
//! | $E803       | boot handshake (Get Star) | ignored             |
//! | $F000-$FFFF | fixed layer RAM       | fixed layer RAM         |
//!
//! | Port | Read            | Write                  |
//! |------|-----------------|------------------------|
//! | $00  | status register | hold sound CPU reset   |
//! | $01  | -               | release sound CPU      |
//! | $02  | -               | flip screen            |
//! | $03  | -               | normal screen          |
//! | $06  | -               | main IRQ off (clears)  |
//! | $07  | -               | main IRQ on            |
//! | $08  | -               | ROM bank 0             |
//! | $09  | -               | ROM bank 1             |
//!
//! # Sound CPU
//!
//! | Range       | Read          | Write                 |
//! |-------------|---------------|-----------------------|
//! | $0000-$1FFF | ROM           | -                     |
//! | $A080       | -             | PSG 0 address         |
//! | $A081       | PSG 0 data    | -                     |
//! | $A082       | -             | PSG 0 data            |
//! | $A090-$A092 | as $A080-$A082 for PSG 1 |            |
//! | $A0E0       | -             | enable periodic NMI   |
//! | $C800-$C80F | dual-port RAM | dual-port RAM         |
//! | $D000-$FFFF | work RAM      | work RAM              |

use emu_core::{Bus, Observable, ReadResult, Value, parse_query_index};

use crate::banking::RomBanks;
use crate::config::{BoardVariant, ConfigError, SlapFightConfig};
use crate::dpram::DualPortRam;
use crate::gate::{MainIrqGate, SoundGate};
use crate::psg::PsgLatch;
use crate::sequencer::{GETSTAR_HANDSHAKE, HandshakeSequencer, STATUS_SEQUENCE};
use crate::video::VideoState;

/// Value returned for reads nothing answers.
const OPEN_BUS: u8 = 0xFF;

const MAIN_RAM_BASE: u16 = 0xC000;
const MAIN_RAM_SIZE: usize = 0x1000;
const SOUND_RAM_BASE: u16 = 0xD000;
const SOUND_RAM_SIZE: usize = 0x3000;
const DPRAM_BASE: u16 = 0xC800;

/// Complete board state: everything except the two CPU cores.
pub struct Board {
    variant: BoardVariant,
    pub rom: RomBanks,
    sound_rom: Vec<u8>,
    main_ram: Box<[u8; MAIN_RAM_SIZE]>,
    sound_ram: Box<[u8; SOUND_RAM_SIZE]>,
    pub dpram: DualPortRam,
    status: HandshakeSequencer,
    handshake: HandshakeSequencer,
    pub sound_gate: SoundGate,
    pub main_irq: MainIrqGate,
    pub video: VideoState,
    pub psg: [PsgLatch; 2],
}

impl Board {
    /// Build a board in its power-on state.
    pub fn new(config: SlapFightConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "Creating {:?} board: main ROM {:#X} bytes, sound ROM {:#X} bytes",
            config.variant,
            config.main_rom.len(),
            config.sound_rom.len()
        );

        let banked = config.variant.has_rom_banking();
        Ok(Self {
            variant: config.variant,
            rom: RomBanks::new(config.main_rom, banked),
            sound_rom: config.sound_rom,
            main_ram: Box::new([0; MAIN_RAM_SIZE]),
            sound_ram: Box::new([0; SOUND_RAM_SIZE]),
            dpram: DualPortRam::new(),
            status: HandshakeSequencer::new(STATUS_SEQUENCE),
            handshake: HandshakeSequencer::new(GETSTAR_HANDSHAKE),
            sound_gate: SoundGate::new(),
            main_irq: MainIrqGate::new(),
            video: VideoState::new(),
            psg: [PsgLatch::new(), PsgLatch::new()],
        })
    }

    #[must_use]
    pub fn variant(&self) -> BoardVariant {
        self.variant
    }

    /// Machine reset: RAM, latches and sequencers back to power-on.
    /// ROM is kept.
    pub fn reset(&mut self) {
        log::debug!("{:?} board reset", self.variant);
        self.rom.reset();
        self.main_ram.fill(0);
        self.sound_ram.fill(0);
        self.dpram.reset();
        self.status.reset();
        self.handshake.reset();
        self.sound_gate.reset();
        self.main_irq.reset();
        self.video.reset();
        for psg in &mut self.psg {
            psg.reset();
        }
    }

    /// Main CPU view of the board.
    pub fn main_bus(&mut self) -> MainBus<'_> {
        MainBus { board: self }
    }

    /// Sound CPU view of the board.
    pub fn sound_bus(&mut self) -> SoundBus<'_> {
        SoundBus { board: self }
    }

    /// Port $00 read: next byte of the status self-test sequence.
    pub fn read_status(&mut self) -> u8 {
        self.status.read()
    }

    /// $E803 read on Get Star: next byte of the boot handshake.
    pub fn read_handshake(&mut self) -> u8 {
        self.handshake.read()
    }

    /// Main CPU work RAM ($C000-$CFFF), excluding the dual-port window.
    #[must_use]
    pub fn main_ram(&self) -> &[u8] {
        &self.main_ram[..]
    }

    /// Sound CPU work RAM ($D000-$FFFF).
    #[must_use]
    pub fn sound_ram(&self) -> &[u8] {
        &self.sound_ram[..]
    }

    /// Read a main CPU address without side effects.
    ///
    /// Sequenced registers report the byte the next read would return.
    #[must_use]
    pub fn peek_main(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0xBFFF => self.rom.read(addr),
            0xC800..=0xC80F => self.dpram.read(addr - DPRAM_BASE),
            0xC000..=0xCFFF => self.main_ram[(addr - MAIN_RAM_BASE) as usize],
            0xE803 if self.variant.has_boot_handshake() => self.handshake.peek(),
            _ => self.video.read(addr).unwrap_or(OPEN_BUS),
        }
    }

    /// Read a sound CPU address without side effects.
    #[must_use]
    pub fn peek_sound(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.sound_rom.get(addr as usize).copied().unwrap_or(OPEN_BUS),
            0xA081 => self.psg[0].read_data(),
            0xA091 => self.psg[1].read_data(),
            0xC800..=0xC80F => self.dpram.read(addr - DPRAM_BASE),
            0xD000..=0xFFFF => self.sound_ram[(addr - SOUND_RAM_BASE) as usize],
            _ => OPEN_BUS,
        }
    }
}

/// The main CPU's bus.
pub struct MainBus<'a> {
    board: &'a mut Board,
}

impl Bus for MainBus<'_> {
    fn read(&mut self, addr: u32) -> ReadResult {
        let addr = addr as u16;
        let data = match addr {
            0xE803 if self.board.variant.has_boot_handshake() => self.board.read_handshake(),
            _ => {
                let data = self.board.peek_main(addr);
                if !is_main_mapped(addr) {
                    log::trace!("Main CPU unmapped read: {addr:04X}");
                }
                data
            }
        };
        ReadResult::new(data)
    }

    fn write(&mut self, addr: u32, value: u8) -> u8 {
        let addr = addr as u16;
        let board = &mut *self.board;
        match addr {
            0x0000..=0xBFFF => log::trace!("Main CPU ROM write ignored: {addr:04X} {value:02X}"),
            0xC800..=0xC80F => board.dpram.write(addr - DPRAM_BASE, value),
            0xC000..=0xCFFF => board.main_ram[(addr - MAIN_RAM_BASE) as usize] = value,
            // Get Star writes here during boot; what the hardware does with it is unknown.
            0xE803 => log::trace!("Main CPU $E803 write ignored: {value:02X}"),
            _ => {
                if !board.video.write(addr, value) {
                    log::trace!("Main CPU unmapped write: {addr:04X} {value:02X}");
                }
            }
        }
        0
    }

    fn io_read(&mut self, addr: u32) -> ReadResult {
        let port = addr as u8;
        let data = match port {
            0x00 => self.board.read_status(),
            _ => {
                log::trace!("Main CPU unmapped port read: {port:02X}");
                OPEN_BUS
            }
        };
        ReadResult::new(data)
    }

    fn io_write(&mut self, addr: u32, value: u8) -> u8 {
        let port = addr as u8;
        log::trace!("Main CPU port write: {port:02X} {value:02X}");
        let board = &mut *self.board;
        // Ports are address-decoded; the data byte is never looked at.
        match port {
            0x00 => board.sound_gate.assert_sound_reset(),
            0x01 => board.sound_gate.release_sound_reset(),
            0x02 => board.video.set_flip_screen(true),
            0x03 => board.video.set_flip_screen(false),
            0x06 => board.main_irq.disable(),
            0x07 => board.main_irq.enable(),
            0x08 => board.rom.select_bank_low(),
            0x09 => board.rom.select_bank_high(),
            _ => log::trace!("  unmapped"),
        }
        0
    }
}

/// The sound CPU's bus.
pub struct SoundBus<'a> {
    board: &'a mut Board,
}

impl Bus for SoundBus<'_> {
    fn read(&mut self, addr: u32) -> ReadResult {
        let addr = addr as u16;
        if !is_sound_mapped(addr) {
            log::trace!("Sound CPU unmapped read: {addr:04X}");
        }
        ReadResult::new(self.board.peek_sound(addr))
    }

    fn write(&mut self, addr: u32, value: u8) -> u8 {
        let addr = addr as u16;
        let board = &mut *self.board;
        match addr {
            0xA080 => board.psg[0].select_register(value),
            0xA082 => board.psg[0].write_data(value),
            0xA090 => board.psg[1].select_register(value),
            0xA092 => board.psg[1].write_data(value),
            0xA0E0 => board.sound_gate.enable_sound_interrupt(),
            0xC800..=0xC80F => board.dpram.write(addr - DPRAM_BASE, value),
            0xD000..=0xFFFF => board.sound_ram[(addr - SOUND_RAM_BASE) as usize] = value,
            _ => log::trace!("Sound CPU unmapped write: {addr:04X} {value:02X}"),
        }
        0
    }

    fn io_read(&mut self, addr: u32) -> ReadResult {
        log::trace!("Sound CPU port read: {:02X}", addr as u8);
        ReadResult::new(OPEN_BUS)
    }

    fn io_write(&mut self, addr: u32, value: u8) -> u8 {
        log::trace!("Sound CPU port write ignored: {:02X} {value:02X}", addr as u8);
        0
    }
}

fn is_main_mapped(addr: u16) -> bool {
    !matches!(addr, 0xE800..=0xEFFF)
}

fn is_sound_mapped(addr: u16) -> bool {
    matches!(
        addr,
        0x0000..=0x1FFF | 0xA081 | 0xA091 | 0xC800..=0xC80F | 0xD000..=0xFFFF
    )
}

impl Observable for Board {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("dpram.") {
            let offset = parse_query_index(rest)?;
            return (offset < 0x10).then(|| Value::U8(self.dpram.read(offset as u16)));
        }
        if let Some(rest) = path.strip_prefix("main.memory.") {
            let addr = u16::try_from(parse_query_index(rest)?).ok()?;
            return Some(Value::U8(self.peek_main(addr)));
        }
        if let Some(rest) = path.strip_prefix("sound.memory.") {
            let addr = u16::try_from(parse_query_index(rest)?).ok()?;
            return Some(Value::U8(self.peek_sound(addr)));
        }
        match path {
            "dpram" => Some(self.dpram.as_slice().into()),
            "sound.in_reset" => Some(self.sound_gate.sound_cpu_in_reset().into()),
            "sound.irq_enabled" => Some(self.sound_gate.sound_interrupt_enabled().into()),
            "main.irq_enabled" => Some(self.main_irq.enabled().into()),
            "main.irq_pending" => Some(self.main_irq.pending().into()),
            "bank" => Some((self.rom.bank() as u8).into()),
            "status.cursor" => Some((self.status.cursor() as u8).into()),
            "status.next" => Some(self.status.peek().into()),
            "handshake.cursor" => Some((self.handshake.cursor() as u8).into()),
            "handshake.next" => Some(self.handshake.peek().into()),
            "flip_screen" => Some(self.video.flip_screen().into()),
            "scroll.x" => Some(self.video.scroll_x().into()),
            "scroll.y" => Some(self.video.scroll_y().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "dpram",
            "dpram.<offset>",
            "main.memory.<address>",
            "sound.memory.<address>",
            "sound.in_reset",
            "sound.irq_enabled",
            "main.irq_enabled",
            "main.irq_pending",
            "bank",
            "status.cursor",
            "status.next",
            "handshake.cursor",
            "handshake.next",
            "flip_screen",
            "scroll.x",
            "scroll.y",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_board(variant: BoardVariant) -> Board {
        let mut main_rom = vec![0u8; variant.main_rom_size()];
        main_rom[0x0000] = 0xF3;
        if variant.has_rom_banking() {
            main_rom[0x10000] = 0xB0;
            main_rom[0x14000] = 0xB1;
        } else {
            main_rom[0x8000] = 0x80;
        }
        let mut sound_rom = vec![0u8; 0x2000];
        sound_rom[0x0000] = 0x31;
        Board::new(SlapFightConfig {
            variant,
            main_rom,
            sound_rom,
        })
        .expect("valid config")
    }

    #[test]
    fn dpram_shared_between_views() {
        let mut board = make_board(BoardVariant::SlapFight);
        board.main_bus().write(0xC803, 0x5A);
        assert_eq!(board.sound_bus().read(0xC803).data, 0x5A);

        board.sound_bus().write(0xC80F, 0xA5);
        assert_eq!(board.main_bus().read(0xC80F).data, 0xA5);
    }

    #[test]
    fn dpram_write_does_not_touch_gate() {
        let mut board = make_board(BoardVariant::SlapFight);
        board.main_bus().io_write(0x01, 0);
        board.main_bus().write(0xC800, 0x01);
        assert!(!board.sound_gate.sound_interrupt_enabled());
    }

    #[test]
    fn main_ram_around_dpram() {
        let mut board = make_board(BoardVariant::SlapFight);
        board.main_bus().write(0xC7FF, 0x11);
        board.main_bus().write(0xC810, 0x22);
        assert_eq!(board.main_bus().read(0xC7FF).data, 0x11);
        assert_eq!(board.main_bus().read(0xC810).data, 0x22);
        // The dual-port window is not visible in main RAM
        board.main_bus().write(0xC800, 0x33);
        assert_eq!(board.main_ram()[0x800], 0x00);
    }

    #[test]
    fn status_port_sequence() {
        let mut board = make_board(BoardVariant::TigerHeli);
        let mut bus = board.main_bus();
        let reads: Vec<u8> = (0..4).map(|_| bus.io_read(0x00).data).collect();
        assert_eq!(reads, [0xC7, 0x55, 0x00, 0xC7]);
    }

    #[test]
    fn status_port_decodes_low_byte() {
        let mut board = make_board(BoardVariant::TigerHeli);
        assert_eq!(board.main_bus().io_read(0xFF00).data, 0xC7);
        assert_eq!(board.main_bus().io_read(0x1200).data, 0x55);
    }

    #[test]
    fn sound_reset_ports() {
        let mut board = make_board(BoardVariant::SlapFight);
        assert!(board.sound_gate.sound_cpu_in_reset());

        board.main_bus().io_write(0x01, 0xFF);
        assert!(!board.sound_gate.sound_cpu_in_reset());

        board.sound_bus().write(0xA0E0, 0x00);
        assert!(board.sound_gate.sound_interrupt_enabled());

        board.main_bus().io_write(0x00, 0x00);
        assert!(board.sound_gate.sound_cpu_in_reset());
        assert!(!board.sound_gate.sound_interrupt_enabled());
    }

    #[test]
    fn bank_ports_ignore_data() {
        let mut board = make_board(BoardVariant::SlapFight);
        board.main_bus().io_write(0x09, 0x00);
        assert_eq!(board.main_bus().read(0x8000).data, 0xB1);
        board.main_bus().io_write(0x08, 0xFF);
        assert_eq!(board.main_bus().read(0x8000).data, 0xB0);
    }

    #[test]
    fn tiger_heli_window_is_fixed() {
        let mut board = make_board(BoardVariant::TigerHeli);
        board.main_bus().io_write(0x09, 0x00);
        assert_eq!(board.main_bus().read(0x8000).data, 0x80);
    }

    #[test]
    fn getstar_handshake_only_on_getstar() {
        let mut board = make_board(BoardVariant::GetStar);
        let reads: Vec<u8> = (0..4).map(|_| board.main_bus().read(0xE803).data).collect();
        assert_eq!(reads, [0x00, 0x01, 0x53, 0x00]);

        let mut board = make_board(BoardVariant::SlapFight);
        assert_eq!(board.main_bus().read(0xE803).data, 0xFF);
    }

    #[test]
    fn handshake_write_is_noop() {
        let mut board = make_board(BoardVariant::GetStar);
        board.main_bus().read(0xE803);
        board.main_bus().write(0xE803, 0x12);
        assert_eq!(board.main_bus().read(0xE803).data, 0x01);
    }

    #[test]
    fn sequencers_are_independent() {
        let mut board = make_board(BoardVariant::GetStar);
        assert_eq!(board.main_bus().io_read(0x00).data, 0xC7);
        assert_eq!(board.main_bus().read(0xE803).data, 0x00);
        assert_eq!(board.main_bus().io_read(0x00).data, 0x55);
        assert_eq!(board.main_bus().read(0xE803).data, 0x01);
    }

    #[test]
    fn rom_writes_ignored() {
        let mut board = make_board(BoardVariant::SlapFight);
        board.main_bus().write(0x0000, 0x00);
        assert_eq!(board.main_bus().read(0x0000).data, 0xF3);
        board.sound_bus().write(0x0000, 0x00);
        assert_eq!(board.sound_bus().read(0x0000).data, 0x31);
    }

    #[test]
    fn video_and_flip() {
        let mut board = make_board(BoardVariant::TigerHeli);
        board.main_bus().write(0xD123, 0x42);
        board.main_bus().write(0xE801, 0x01);
        board.main_bus().io_write(0x02, 0x00);
        assert_eq!(board.video.tile_ram()[0x123], 0x42);
        assert_eq!(board.video.scroll_x(), 0x100);
        assert!(board.video.flip_screen());
        board.main_bus().io_write(0x03, 0x00);
        assert!(!board.video.flip_screen());
    }

    #[test]
    fn main_irq_ports() {
        let mut board = make_board(BoardVariant::SlapFight);
        board.main_bus().io_write(0x07, 0x00);
        assert!(board.main_irq.enabled());
        board.main_irq.raise_vblank();
        board.main_bus().io_write(0x06, 0x00);
        assert!(!board.main_irq.pending());
    }

    #[test]
    fn sound_psg_and_ram() {
        let mut board = make_board(BoardVariant::SlapFight);
        board.psg[1].set_port_a(0xEF);
        let mut bus = board.sound_bus();
        bus.write(0xA090, 14);
        assert_eq!(bus.read(0xA091).data, 0xEF);
        bus.write(0xA080, 8);
        bus.write(0xA082, 0x0F);
        assert_eq!(bus.read(0xA081).data, 0x0F);
        bus.write(0xE000, 0x77);
        assert_eq!(bus.read(0xE000).data, 0x77);
        assert_eq!(bus.read(0x8000).data, 0xFF);
        assert_eq!(bus.io_read(0x00).data, 0xFF);
    }

    #[test]
    fn reset_restores_power_on() {
        let mut board = make_board(BoardVariant::GetStar);
        board.main_bus().io_read(0x00);
        board.main_bus().read(0xE803);
        board.main_bus().io_write(0x01, 0);
        board.main_bus().io_write(0x09, 0);
        board.main_bus().write(0xC805, 0x99);
        board.sound_bus().write(0xA0E0, 0);

        board.reset();

        assert!(board.sound_gate.sound_cpu_in_reset());
        assert!(!board.sound_gate.sound_interrupt_enabled());
        assert_eq!(board.rom.bank(), 0);
        assert_eq!(board.dpram.read(5), 0);
        assert_eq!(board.main_bus().io_read(0x00).data, 0xC7);
        assert_eq!(board.main_bus().read(0xE803).data, 0x00);
        // ROM survives
        assert_eq!(board.main_bus().read(0x0000).data, 0xF3);
    }

    #[test]
    fn queries_do_not_advance_sequencers() {
        let mut board = make_board(BoardVariant::GetStar);
        assert_eq!(board.query("status.next"), Some(Value::U8(0xC7)));
        assert_eq!(board.query("main.memory.0xE803"), Some(Value::U8(0x00)));
        assert_eq!(board.query("status.next"), Some(Value::U8(0xC7)));
        assert_eq!(board.main_bus().io_read(0x00).data, 0xC7);
        assert_eq!(board.query("status.cursor"), Some(Value::U8(1)));
    }

    #[test]
    fn observable_paths() {
        let mut board = make_board(BoardVariant::SlapFight);
        board.sound_bus().write(0xC802, 0x7E);
        assert_eq!(board.query("dpram.2"), Some(Value::U8(0x7E)));
        assert_eq!(board.query("dpram.0x10"), None);
        assert_eq!(board.query("sound.in_reset"), Some(Value::Bool(true)));
        assert_eq!(board.query("bank"), Some(Value::U8(0)));
        assert_eq!(board.query("sound.memory.$0000"), Some(Value::U8(0x31)));
        assert_eq!(board.query("nonsense"), None);
    }

    #[test]
    fn rejects_short_rom() {
        let result = Board::new(SlapFightConfig {
            variant: BoardVariant::GetStar,
            main_rom: vec![0; 0xC000],
            sound_rom: vec![0; 0x2000],
        });
        assert!(matches!(result, Err(ConfigError::MainRomTooSmall { .. })));
    }
}
