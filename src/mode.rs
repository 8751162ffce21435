// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Operating modes and the mode configuration word

#[cfg(test)]
mod tests;

use std::convert::TryFrom;
use std::fmt;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

use crate::error::CoreError;


/// Storage discipline of a memory core
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Fixed-delay line buffer
    LineBuffer,
    /// First-in first-out queue
    Fifo,
    /// Random-access store
    Sram,
    /// Double-buffered reorder buffer
    DoubleBuffer,
}

impl Mode {
    /// Retrieve the two-bit encoding of the mode
    pub fn encoding(self) -> u32 {
        match self {
            Self::LineBuffer    => 0,
            Self::Fifo          => 1,
            Self::Sram          => 2,
            Self::DoubleBuffer  => 3,
        }
    }

    /// Decode the lowest two bits of a value
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::LineBuffer,
            1 => Self::Fifo,
            2 => Self::Sram,
            _ => Self::DoubleBuffer,
        }
    }

    /// Retrieve the keyword associated with the mode
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::LineBuffer    => "linebuffer",
            Self::Fifo          => "fifo",
            Self::Sram          => "sram",
            Self::DoubleBuffer  => "db",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.keyword(), f)
    }
}

#[cfg(test)]
impl Arbitrary for Mode {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Self::LineBuffer, Self::Fifo, Self::Sram, Self::DoubleBuffer]).unwrap()
    }
}


const TILE_ENABLE_BIT: u32 = 2;
const DEPTH_SHIFT: u32 = 3;


/// Contents of the mode configuration register
///
/// Bits `[0:2)` hold the mode, bit 2 the tile enable and the remaining bits
/// the depth.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConfigWord {
    pub mode: Mode,
    pub tile_enable: bool,
    pub depth: u32,
}

impl ConfigWord {
    /// Create a new config word enabling the tile
    pub fn new(mode: Mode, depth: u32) -> Self {
        Self {mode, tile_enable: true, depth}
    }

    /// Create a copy with the tile enable cleared
    pub fn disabled(self) -> Self {
        Self {tile_enable: false, ..self}
    }

    /// Encode the word
    ///
    /// Depth bits beyond the width of the word are dropped.
    pub fn encode(&self) -> u32 {
        self.mode.encoding()
            | (u32::from(self.tile_enable) << TILE_ENABLE_BIT)
            | self.depth.wrapping_shl(DEPTH_SHIFT)
    }

    /// Decode a word
    pub fn decode(raw: u32) -> Self {
        Self {
            mode: Mode::from_bits(raw),
            tile_enable: raw & (1 << TILE_ENABLE_BIT) != 0,
            depth: raw >> DEPTH_SHIFT,
        }
    }
}

impl Default for ConfigWord {
    fn default() -> Self {
        Self::decode(0)
    }
}

impl From<u32> for ConfigWord {
    fn from(raw: u32) -> Self {
        Self::decode(raw)
    }
}

impl From<ConfigWord> for u32 {
    fn from(word: ConfigWord) -> Self {
        word.encode()
    }
}

#[cfg(test)]
impl Arbitrary for ConfigWord {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {mode: Arbitrary::arbitrary(g), tile_enable: Arbitrary::arbitrary(g), depth: u32::arbitrary(g) >> 3}
    }
}


/// Holder of the active mode
///
/// The controller keeps the most recently configured word. Once a word
/// enabling the tile was accepted, it is locked in: any later word selecting
/// a different mode or depth is rejected until the controller is reset.
#[derive(Clone, Debug)]
pub struct ModeController {
    capacity: usize,
    word: ConfigWord,
    locked: Option<ConfigWord>,
}

impl ModeController {
    /// Create a new controller for a backing store of the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {capacity, word: Default::default(), locked: None}
    }

    /// Apply a configuration word
    ///
    /// The word is only accepted if its depth fits the backing store and if
    /// it does not switch away from a mode locked in since the last reset. A
    /// rejected word leaves the controller unchanged.
    pub fn configure(&mut self, word: ConfigWord) -> Result<(), CoreError> {
        if word.tile_enable {
            let capacity = self.capacity_for(word.mode);
            if word.depth as usize > capacity {
                return Err(CoreError::DepthExceedsCapacity {mode: word.mode, depth: word.depth, capacity})
            }

            if let Some(locked) = self.locked {
                if (locked.mode, locked.depth) != (word.mode, word.depth) {
                    log::warn!("rejecting transition from {} to {} without reset", locked.mode, word.mode);
                    return Err(CoreError::InvalidModeTransition {
                        from: locked.mode,
                        from_depth: locked.depth,
                        to: word.mode,
                        to_depth: word.depth,
                    })
                }
            }
            self.locked = Some(word);
        }

        log::debug!("mode word: {:?}", word);
        self.word = word;
        Ok(())
    }

    /// Retrieve the most recently configured word
    pub fn word(&self) -> ConfigWord {
        self.word
    }

    /// Retrieve the mode selected by the most recent word
    pub fn current_mode(&self) -> Mode {
        self.word.mode
    }

    /// Retrieve the depth selected by the most recent word
    pub fn current_depth(&self) -> u32 {
        self.word.depth
    }

    /// Check whether the tile is enabled
    pub fn is_enabled(&self) -> bool {
        self.word.tile_enable
    }

    /// Retrieve the active mode and depth, if the tile is enabled
    pub fn active(&self) -> Option<(Mode, usize)> {
        if self.word.tile_enable {
            usize::try_from(self.word.depth).ok().map(|d| (self.word.mode, d))
        } else {
            None
        }
    }

    /// Retrieve the number of words a given mode may use per epoch or queue
    ///
    /// The double buffer splits the backing store into two halves.
    pub fn capacity_for(&self, mode: Mode) -> usize {
        match mode {
            Mode::DoubleBuffer  => self.capacity / 2,
            _                   => self.capacity,
        }
    }

    /// Release the lock on the current mode
    ///
    /// The configured word itself is retained.
    pub fn reset(&mut self) {
        self.locked = None
    }
}
