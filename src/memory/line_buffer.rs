// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Line buffer control

use crate::params::Word;


/// Position and fill level of a delay line
///
/// The line is a circular shift register living in a ring of the backing
/// store. The ring's length is the delay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LineBuffer {
    pos: usize,
    filled: usize,
}

impl LineBuffer {
    /// Shift a word into the line
    ///
    /// This function returns the word written exactly `ring.len()` shifts
    /// earlier. Until the line is filled, the returned word is whatever the
    /// ring held before. An empty ring passes the word through unchanged.
    pub fn shift(&mut self, ring: &mut [Word], data: Word) -> Word {
        if ring.is_empty() {
            return data
        }
        let res = std::mem::replace(&mut ring[self.pos], data);
        self.pos = (self.pos + 1) % ring.len();
        self.filled = (self.filled + 1).min(ring.len());
        res
    }

    /// Retrieve the number of words shifted in since the last reset, saturated
    /// at the line's length
    pub fn filled(&self) -> usize {
        self.filled
    }
}
