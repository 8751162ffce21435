// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! FIFO control

use crate::params::Word;


/// Pointers and occupancy of a FIFO
///
/// The queue itself lives in a ring of the backing store, passed to each
/// operation. The ring's length is the FIFO's depth.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fifo {
    head: usize,
    tail: usize,
    count: usize,
}

impl Fifo {
    /// Retrieve the number of words queued
    pub fn count(&self) -> usize {
        self.count
    }

    /// Check whether no word is queued
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check whether the ring is full
    pub fn is_full(&self, ring: &[Word]) -> bool {
        self.count >= ring.len()
    }

    /// Append a word at the tail
    ///
    /// This function returns `false`, leaving everything untouched, if the ring
    /// is full.
    pub fn push(&mut self, ring: &mut [Word], data: Word) -> bool {
        if self.is_full(ring) {
            return false
        }
        ring[self.tail] = data;
        self.tail = (self.tail + 1) % ring.len();
        self.count += 1;
        true
    }

    /// Remove the word at the head
    pub fn pop(&mut self, ring: &[Word]) -> Option<Word> {
        if self.is_empty() || ring.is_empty() {
            return None
        }
        let res = ring[self.head];
        self.head = (self.head + 1) % ring.len();
        self.count -= 1;
        Some(res)
    }
}
