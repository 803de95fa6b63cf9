//! Shared helpers: ROM images with recognisable contents and a CPU core
//! that replays a fixed list of bus accesses.

#![allow(dead_code)]

use emu_core::{Bus, Cpu};
use emu_slapfight::{BoardVariant, SlapFightConfig};

/// Main ROM where every byte holds the index of its 16K page, so a read
/// from the $8000 window tells which image page is mapped.
pub fn paged_main_rom(variant: BoardVariant) -> Vec<u8> {
    (0..variant.main_rom_size()).map(|i| (i >> 14) as u8).collect()
}

pub fn config(variant: BoardVariant) -> SlapFightConfig {
    SlapFightConfig {
        variant,
        main_rom: paged_main_rom(variant),
        sound_rom: vec![0x5D; 0x2000],
    }
}

/// One bus access.
#[derive(Debug, Clone, Copy)]
pub enum Access {
    Read(u16),
    Write(u16, u8),
    In(u16),
    Out(u16, u8),
}

/// A CPU that performs `program[i].1` on the T-state numbered
/// `program[i].0` (counted from its last reset) and idles otherwise.
///
/// Reset rewinds the program, like a real core restarting at $0000.
pub struct ScriptedCpu {
    program: Vec<(u64, Access)>,
    pos: usize,
    ticks: u64,
    /// Values returned by `Read`/`In` accesses, in order.
    pub reads: Vec<u8>,
    /// T-state (since reset) of each NMI.
    pub nmis: Vec<u64>,
    pub irqs: u32,
    pub resets: u32,
    pub accept_irq: bool,
}

impl ScriptedCpu {
    pub fn new(program: Vec<(u64, Access)>) -> Self {
        Self {
            program,
            pos: 0,
            ticks: 0,
            reads: Vec::new(),
            nmis: Vec::new(),
            irqs: 0,
            resets: 0,
            accept_irq: true,
        }
    }

    pub fn idle() -> Self {
        Self::new(Vec::new())
    }

    /// T-states executed since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn finished(&self) -> bool {
        self.pos == self.program.len()
    }
}

impl Cpu for ScriptedCpu {
    type Registers = u64;

    fn tick<B: Bus>(&mut self, bus: &mut B) {
        while let Some(&(at, access)) = self.program.get(self.pos) {
            if at != self.ticks {
                break;
            }
            match access {
                Access::Read(addr) => self.reads.push(bus.read(u32::from(addr)).data),
                Access::Write(addr, value) => {
                    bus.write(u32::from(addr), value);
                }
                Access::In(port) => self.reads.push(bus.io_read(u32::from(port)).data),
                Access::Out(port, value) => {
                    bus.io_write(u32::from(port), value);
                }
            }
            self.pos += 1;
        }
        self.ticks += 1;
    }

    fn pc(&self) -> u32 {
        self.pos as u32
    }

    fn registers(&self) -> u64 {
        self.ticks
    }

    fn is_halted(&self) -> bool {
        self.finished()
    }

    fn interrupt(&mut self) -> bool {
        if self.accept_irq {
            self.irqs += 1;
        }
        self.accept_irq
    }

    fn nmi(&mut self) {
        self.nmis.push(self.ticks);
    }

    fn reset(&mut self) {
        self.pos = 0;
        self.ticks = 0;
        self.resets += 1;
    }
}
