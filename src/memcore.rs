// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Memory core tile
//!
//! A [MemoryCore] combines the configuration namespace of a memory tile with
//! the mode controller, the memory engine and the double buffer. Its
//! configuration features are laid out as follows:
//!
//! | feature | name            | registers                                   |
//! |---------|-----------------|---------------------------------------------|
//! | 0       | `mem_ctrl`      | 0: mode configuration word                  |
//! | 1       | `db_ctrl`       | 0 to 8: double buffer descriptor            |
//! | 2 + k   | `sram_bank<k>`  | 0 to 255: backing store words `256 k + reg` |


use crate::address::{FeatureId, RegisterId, TileId, mask};
use crate::double_buffer::{Descriptor, DoubleBufferAddressor};
use crate::double_buffer::descriptor::{DIMENSIONS, REGISTER_NAMES};
use crate::error::CoreError;
use crate::feature::{Slot, Tile, TileBuilder};
use crate::memory::{Access, MemoryEngine};
use crate::mode::{ConfigWord, Mode, ModeController};
use crate::params::{Params, WINDOW_WORDS, Word};
use crate::register::{Register, RegisterHandle, Width};
use crate::router::{Configurable, WriteOutcome};


/// Index of the feature holding the mode configuration word
pub const MEM_CTRL_FEATURE: FeatureId = 0;

/// Index of the feature holding the double buffer descriptor
pub const DB_CTRL_FEATURE: FeatureId = 1;

/// Index of the feature mapping the first 256 words of the backing store
pub const FIRST_BANK_FEATURE: FeatureId = 2;


const STRIDE_WIDTH: Width = 16;
const ORDER_WIDTH: Width = 2;
const SIZE_WIDTH: Width = 16;


/// Inputs of the data port sampled for a single clock edge
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DataPort {
    pub addr_in: u32,
    pub data_in: Word,
    pub wen_in: bool,
    pub ren_in: bool,
    pub clk_en: bool,
    pub switch_db: bool,
    pub config_en_db: bool,
}

impl DataPort {
    /// Create a port state doing nothing
    ///
    /// The clock and the descriptor write enable are asserted.
    pub fn idle() -> Self {
        Self {
            addr_in: 0,
            data_in: 0,
            wen_in: false,
            ren_in: false,
            clk_en: true,
            switch_db: false,
            config_en_db: true,
        }
    }

    /// Create a copy writing the given word
    pub fn with_write(self, addr: u32, data: Word) -> Self {
        Self {addr_in: addr, data_in: data, wen_in: true, ..self}
    }

    /// Create a copy reading a word
    pub fn with_read(self, addr: u32) -> Self {
        Self {addr_in: addr, ren_in: true, ..self}
    }

    /// Create a copy with `switch_db` set to the given value
    pub fn with_switch(self, switch_db: bool) -> Self {
        Self {switch_db, ..self}
    }

    /// Create a copy with `clk_en` set to the given value
    pub fn with_clk_en(self, clk_en: bool) -> Self {
        Self {clk_en, ..self}
    }

    /// Retrieve the memory access described by this port state
    fn access(&self, data_mask: Word) -> Access {
        Access {
            addr: self.addr_in as usize,
            write: if self.wen_in { Some(self.data_in & data_mask) } else { None },
            read: self.ren_in,
        }
    }
}

impl Default for DataPort {
    fn default() -> Self {
        Self::idle()
    }
}


/// Functional model of a memory tile
#[derive(Clone, Debug)]
pub struct MemoryCore {
    params: Params,
    tile: Tile,
    config: RegisterHandle,
    descriptor: [RegisterHandle; 3 * DIMENSIONS],
    mode: ModeController,
    memory: MemoryEngine,
    double_buffer: DoubleBufferAddressor,
    config_en_db: bool,
    data_out: Word,
}

impl MemoryCore {
    /// Create a new core with the given tile id and parameters
    pub fn new(id: TileId, params: Params) -> Self {
        let mut builder = TileBuilder::new(id);
        let config = builder.feature("mem_ctrl").add_config("config", params.config_word_width());

        let mut db_ctrl = builder.feature("db_ctrl");
        let mut descriptor = [config; 3 * DIMENSIONS];
        descriptor.iter_mut().zip(REGISTER_NAMES.iter()).for_each(|(h, name)| {
            let width = match name.trim_end_matches(char::is_numeric) {
                "stride"    => STRIDE_WIDTH,
                "order"     => ORDER_WIDTH,
                _           => SIZE_WIDTH,
            };
            *h = db_ctrl.add_config(*name, width)
        });

        let depth = params.data_depth();
        (0..params.windows()).for_each(|k| {
            let base = k * WINDOW_WORDS;
            let words = (depth - base).min(WINDOW_WORDS);
            builder.window(format!("sram_bank{}", k), base, words, params.data_width());
        });

        Self {
            params,
            tile: builder.build(),
            config,
            descriptor,
            mode: ModeController::new(depth),
            memory: MemoryEngine::new(depth),
            double_buffer: DoubleBufferAddressor::new(depth / 2),
            config_en_db: true,
            data_out: 0,
        }
    }

    /// Retrieve the parameters the core was instantiated with
    pub fn params(&self) -> Params {
        self.params
    }

    /// Retrieve the mode controller
    pub fn mode(&self) -> &ModeController {
        &self.mode
    }

    /// Retrieve the memory engine
    pub fn memory(&self) -> &MemoryEngine {
        &self.memory
    }

    /// Retrieve the double buffer
    pub fn double_buffer(&self) -> &DoubleBufferAddressor {
        &self.double_buffer
    }

    /// Retrieve the handle of the mode configuration register
    pub fn config_register(&self) -> RegisterHandle {
        self.config
    }

    /// Retrieve the handles of the descriptor registers
    pub fn descriptor_registers(&self) -> &[RegisterHandle; 3 * DIMENSIONS] {
        &self.descriptor
    }

    /// Retrieve the descriptor currently held in the descriptor registers
    pub fn descriptor(&self) -> Descriptor {
        let mut regs = [0; 3 * DIMENSIONS];
        regs.iter_mut().zip(self.descriptor.iter()).for_each(|(r, h)| *r = self.tile.value(*h));
        Descriptor::from_registers(regs)
    }

    /// Write the mode configuration register
    pub fn configure(&mut self, word: ConfigWord) -> Result<(), CoreError> {
        self.write_config(MEM_CTRL_FEATURE, 0, word.encode()).map(|_| ())
    }

    /// Write all descriptor registers
    ///
    /// This function returns [WriteOutcome::Gated] if descriptor writes are
    /// currently disabled.
    pub fn set_descriptor(&mut self, descriptor: &Descriptor) -> Result<WriteOutcome, CoreError> {
        descriptor.registers().iter().enumerate().try_fold(WriteOutcome::Committed, |_, (i, v)| {
            self.write_config(DB_CTRL_FEATURE, i as RegisterId, *v)
        })
    }

    /// Set the descriptor write enable
    pub fn set_config_en_db(&mut self, enable: bool) {
        self.config_en_db = enable
    }

    /// Retrieve the word currently presented at `data_out`
    pub fn data_out(&self) -> Word {
        self.data_out
    }

    /// Evaluate a single clock edge of the data port
    ///
    /// All checks are performed before any state is altered. On success, this
    /// function returns the value of `data_out` after the edge. Reads update
    /// `data_out`, writes only do so in line buffer mode, where the word
    /// shifted out of the line is presented. With `clk_en` deasserted, nothing
    /// happens.
    pub fn cycle(&mut self, port: &DataPort) -> Result<Word, CoreError> {
        self.config_en_db = port.config_en_db;
        if !port.clk_en {
            return Ok(self.data_out)
        }

        let access = port.access(self.params.data_mask());
        let (mode, depth) = match self.mode.active() {
            Some(active) => active,
            None if access.is_idle() && !port.switch_db => return Ok(self.data_out),
            None => return Err(CoreError::TileDisabled),
        };

        let res = match mode {
            Mode::Sram          => self.memory.sram(depth, access)?,
            Mode::Fifo          => self.memory.fifo_access(depth, access)?,
            Mode::LineBuffer    => self.memory.line_buffer_access(depth, access),
            Mode::DoubleBuffer  => {
                let descriptor = self.descriptor();
                self.double_buffer.cycle(&descriptor, access, port.switch_db)?
            },
        };

        if let Some(data) = res {
            log::trace!("{} data_out <= {:#x}", mode, data);
            self.data_out = data;
        }
        Ok(self.data_out)
    }

    /// Write a single word
    pub fn write(&mut self, addr: u32, data: Word) -> Result<(), CoreError> {
        self.cycle(&self.port().with_write(addr, data)).map(|_| ())
    }

    /// Read a single word
    pub fn read(&mut self, addr: u32) -> Result<Word, CoreError> {
        self.cycle(&self.port().with_read(addr))
    }

    /// Read a word and write another one in the same cycle
    pub fn read_and_write(&mut self, addr: u32, data: Word) -> Result<Word, CoreError> {
        self.cycle(&self.port().with_read(addr).with_write(addr, data))
    }

    /// Request a buffer swap without any data access
    pub fn switch_db(&mut self) -> Result<(), CoreError> {
        self.cycle(&self.port().with_switch(true)).map(|_| ())
    }

    /// Retrieve an idle port state retaining the current descriptor write
    /// enable
    fn port(&self) -> DataPort {
        DataPort {config_en_db: self.config_en_db, ..DataPort::idle()}
    }
}

impl Configurable for MemoryCore {
    fn tile(&self) -> &Tile {
        &self.tile
    }

    fn write_config(
        &mut self,
        feature: FeatureId,
        register: RegisterId,
        data: u32,
    ) -> Result<WriteOutcome, CoreError> {
        let handle = match self.tile.slot(feature, register) {
            Some(Slot::Register(handle)) => handle,
            Some(Slot::Window {address, width}) => {
                let res = if self.memory.poke(address, data & mask(width)) {
                    WriteOutcome::Committed
                } else {
                    WriteOutcome::Unmapped
                };
                return Ok(res)
            },
            None => return Ok(WriteOutcome::Unmapped),
        };

        let reg_mask = self.tile.register(handle).map(Register::mask).unwrap_or(0);
        let value = data & reg_mask;
        if handle == self.config {
            // Depth bits beyond the register never fit the store
            if data & !reg_mask != 0 {
                let word = ConfigWord::decode(data);
                let capacity = self.mode.capacity_for(word.mode);
                return Err(CoreError::DepthExceedsCapacity {mode: word.mode, depth: word.depth, capacity})
            }
            self.mode.configure(value.into())?;
        } else if !self.config_en_db {
            return Ok(WriteOutcome::Gated)
        }

        if let Some(reg) = self.tile.register_mut(handle) {
            reg.set(value);
        }
        Ok(WriteOutcome::Committed)
    }

    fn read_config(&self, feature: FeatureId, register: RegisterId) -> Option<u32> {
        match self.tile.slot(feature, register)? {
            Slot::Register(handle)      => Some(self.tile.value(handle)),
            Slot::Window {address, ..}  => self.memory.peek(address),
        }
    }

    fn reset(&mut self) {
        log::debug!("resetting memory core {}", self.tile.id());
        self.mode.reset();
        self.memory.reset();
        self.double_buffer.reset();
        self.data_out = 0;
    }
}
