// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Memory engine
//!
//! The engine implements the SRAM, FIFO and line buffer disciplines against a
//! single flat backing store. Only one discipline is active at any time, as
//! selected by the mode controller, so all of them share the store.

pub mod fifo;
pub mod line_buffer;


use crate::error::CoreError;
use crate::params::Word;

pub use fifo::Fifo;
pub use line_buffer::LineBuffer;


/// Inputs of the data port sampled for a single clock edge
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Access {
    pub addr: usize,
    pub write: Option<Word>,
    pub read: bool,
}

impl Access {
    /// Create an access writing the given word
    pub fn write(addr: usize, data: Word) -> Self {
        Self {addr, write: Some(data), read: false}
    }

    /// Create an access reading a word
    pub fn read(addr: usize) -> Self {
        Self {addr, write: None, read: true}
    }

    /// Create an access reading and writing in the same cycle
    pub fn read_write(addr: usize, data: Word) -> Self {
        Self {addr, write: Some(data), read: true}
    }

    /// Check whether the access does anything at all
    pub fn is_idle(&self) -> bool {
        self.write.is_none() && !self.read
    }
}


/// Backing store and discipline state of a memory core
#[derive(Clone, Debug)]
pub struct MemoryEngine {
    store: Vec<Word>,
    fifo: Fifo,
    line: LineBuffer,
}

impl MemoryEngine {
    /// Create a new engine with a zeroed store of the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {store: vec![0; capacity], fifo: Default::default(), line: Default::default()}
    }

    /// Retrieve the capacity of the backing store
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Retrieve the FIFO state
    pub fn fifo(&self) -> &Fifo {
        &self.fifo
    }

    /// Retrieve the line buffer state
    pub fn line_buffer(&self) -> &LineBuffer {
        &self.line
    }

    /// Perform an SRAM access
    ///
    /// Both reading and writing require the address to be below `depth`. If
    /// both are requested, the word is read before it is overwritten.
    pub fn sram(&mut self, depth: usize, access: Access) -> Result<Option<Word>, CoreError> {
        if access.is_idle() {
            return Ok(None)
        }

        let depth = depth.min(self.capacity());
        if access.addr >= depth {
            return Err(CoreError::AddressOutOfRange {addr: access.addr, depth})
        }

        let res = if access.read {
            Some(self.store[access.addr])
        } else {
            None
        };
        if let Some(data) = access.write {
            log::trace!("sram[{}] <= {:#x}", access.addr, data);
            self.store[access.addr] = data;
        }
        Ok(res)
    }

    /// Perform a FIFO access
    ///
    /// The address is ignored. If both reading and writing are requested, the
    /// pop is performed before the push.
    pub fn fifo_access(&mut self, depth: usize, access: Access) -> Result<Option<Word>, CoreError> {
        let depth = depth.min(self.capacity());
        let count = self.fifo.count();
        if access.read && count == 0 {
            return Err(CoreError::FifoUnderflow)
        }
        if access.write.is_some() && count - usize::from(access.read) >= depth {
            return Err(CoreError::FifoOverflow)
        }

        let store = &mut self.store[..depth];
        let res = if access.read {
            self.fifo.pop(store)
        } else {
            None
        };
        if let Some(data) = access.write {
            self.fifo.push(store, data);
        }
        log::trace!("fifo occupancy {} -> {}", count, self.fifo.count());
        Ok(res)
    }

    /// Perform a line buffer access
    ///
    /// A write shifts the word into the line and yields the word shifted out.
    /// Reads alone do not alter the line; they yield nothing, leaving the
    /// previous output in place.
    pub fn line_buffer_access(&mut self, depth: usize, access: Access) -> Option<Word> {
        let depth = depth.min(self.capacity());
        access.write.map(|data| self.line.shift(&mut self.store[..depth], data))
    }

    /// Retrieve a word from the backing store, bypassing any discipline
    pub fn peek(&self, addr: usize) -> Option<Word> {
        self.store.get(addr).cloned()
    }

    /// Store a word in the backing store, bypassing any discipline
    ///
    /// This function returns `false` if the address is out of range.
    pub fn poke(&mut self, addr: usize, data: Word) -> bool {
        if let Some(slot) = self.store.get_mut(addr) {
            *slot = data;
            true
        } else {
            false
        }
    }

    /// Clear all occupancy and position state
    ///
    /// The contents of the backing store are retained.
    pub fn reset(&mut self) {
        self.fifo = Default::default();
        self.line = Default::default();
    }
}
