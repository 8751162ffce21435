// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Instantiation parameters of a memory core

use crate::address::mask;


/// Data word transported over the data port
pub type Word = u32;


/// Number of words covered by a single preload window
pub const WINDOW_WORDS: usize = 256;


/// Parameters a memory core is instantiated with
///
/// These are fixed at construction time, as opposed to the configuration
/// loaded over the configuration bus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Params {
    data_width: u8,
    data_depth: usize,
}

impl Params {
    /// Set the width of a data word in bits
    ///
    /// Widths above 32 bits are clamped.
    pub fn with_data_width(self, width: u8) -> Self {
        Self {data_width: width.min(32), ..self}
    }

    /// Set the capacity of the backing store in words
    pub fn with_data_depth(self, depth: usize) -> Self {
        Self {data_depth: depth, ..self}
    }

    /// Retrieve the width of a data word in bits
    pub fn data_width(&self) -> u8 {
        self.data_width
    }

    /// Retrieve the capacity of the backing store in words
    pub fn data_depth(&self) -> usize {
        self.data_depth
    }

    /// Retrieve the mask applied to data words
    pub fn data_mask(&self) -> Word {
        mask(self.data_width)
    }

    /// Retrieve the number of bits required for encoding any depth up to and
    /// including the capacity
    pub fn depth_bits(&self) -> u8 {
        let bits = usize::BITS - self.data_depth.leading_zeros();
        bits.max(1).min(29) as u8
    }

    /// Retrieve the width of the mode configuration register
    pub fn config_word_width(&self) -> u8 {
        3 + self.depth_bits()
    }

    /// Retrieve the number of preload windows needed for covering the store
    pub fn windows(&self) -> usize {
        (self.data_depth + WINDOW_WORDS - 1) / WINDOW_WORDS
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {data_width: 16, data_depth: 1024}
    }
}
