// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Double buffer
//!
//! In double buffer mode, a memory core holds two buffers. One of them, the
//! active buffer, receives writes in plain sequential order. The other one,
//! the standby buffer, is drained by reads, which are reordered by an
//! [Addresses] generator. A `switch_db` pulse exchanges the roles of the two
//! buffers once an epoch, i.e. one complete fill of the active buffer, is
//! done.

pub mod descriptor;


use crate::error::CoreError;
use crate::memory::Access;
use crate::params::Word;

pub use descriptor::{Addresses, Descriptor, Dimension};


/// Write epoch in progress
#[derive(Copy, Clone, Debug)]
struct Epoch {
    descriptor: Descriptor,
    len: usize,
}


/// Buffers and epoch state of the double buffer mode
#[derive(Clone, Debug)]
pub struct DoubleBufferAddressor {
    buffers: [Vec<Word>; 2],
    active: usize,
    epoch: Option<Epoch>,
    written: usize,
    drain: Option<Addresses>,
}

impl DoubleBufferAddressor {
    /// Create a new addressor with two buffers of the given capacity each
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: [vec![0; capacity], vec![0; capacity]],
            active: 0,
            epoch: None,
            written: 0,
            drain: None,
        }
    }

    /// Retrieve the capacity of a single buffer
    pub fn capacity(&self) -> usize {
        self.buffers[0].len()
    }

    /// Retrieve the number of words written during the current epoch
    pub fn written(&self) -> usize {
        self.written
    }

    /// Retrieve the number of words left to be read from the standby buffer
    pub fn pending_reads(&self) -> usize {
        self.drain.as_ref().map(ExactSizeIterator::len).unwrap_or(0)
    }

    /// Retrieve the index of the buffer currently receiving writes
    pub fn active(&self) -> usize {
        self.active
    }

    /// Check whether the current epoch is complete
    pub fn epoch_complete(&self) -> bool {
        self.epoch.map(|e| e.len == self.written).unwrap_or(false)
    }

    /// Perform the accesses of a single clock edge
    ///
    /// All inputs are checked before any state is altered. Within the cycle,
    /// the read drains the standby buffer, then the write fills the active
    /// buffer. Finally, if `switch` is set, the buffers are swapped. A swap is
    /// only accepted if the epoch is complete, including a write in the same
    /// cycle.
    ///
    /// The descriptor is sampled at the first write of an epoch and used for
    /// reading back that epoch's data after the swap.
    pub fn cycle(&mut self, descriptor: &Descriptor, access: Access, switch: bool) -> Result<Option<Word>, CoreError> {
        if access.read && self.pending_reads() == 0 {
            return Err(CoreError::EpochDrained)
        }

        let writing = access.write.is_some();
        let len = match self.epoch {
            Some(e) => e.len,
            None if writing || switch => descriptor.validate(self.capacity())?,
            None => 0,
        };
        if writing && self.written >= len {
            return Err(CoreError::EpochFull(len))
        }
        let written = self.written + usize::from(writing);
        if switch && written < len {
            return Err(CoreError::SwapDuringEpoch {written, expected: len})
        }

        let standby = 1 - self.active;
        let res = if access.read {
            let addr = self.drain.as_mut().and_then(Iterator::next);
            addr.and_then(|a| self.buffers[standby].get(a).cloned())
        } else {
            None
        };

        if let Some(data) = access.write {
            if self.epoch.is_none() {
                self.epoch = Some(Epoch {descriptor: *descriptor, len});
            }
            self.buffers[self.active][self.written] = data;
            self.written = written;
        }

        if switch {
            self.swap();
        }
        Ok(res)
    }

    /// Exchange the roles of the buffers
    fn swap(&mut self) {
        let pending = self.pending_reads();
        if pending > 0 {
            log::warn!("discarding {} unread words of the standby buffer", pending);
        }

        self.drain = self.epoch.take().and_then(|e| e.descriptor.addresses().ok());
        self.active = 1 - self.active;
        self.written = 0;
        log::debug!("buffer {} now active, {} words to drain", self.active, self.pending_reads());
    }

    /// Clear all epoch state
    ///
    /// The buffers' contents are retained but become unreachable.
    pub fn reset(&mut self) {
        self.active = 0;
        self.epoch = None;
        self.written = 0;
        self.drain = None;
    }
}
