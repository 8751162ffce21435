// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Double buffer descriptors and address generation

use std::iter::FusedIterator;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

use crate::error::CoreError;


/// Number of dimensions of a descriptor
pub const DIMENSIONS: usize = 3;


/// Names of the descriptor registers, in register index order
pub const REGISTER_NAMES: [&str; 3 * DIMENSIONS] = [
    "stride0", "order0", "size0",
    "stride1", "order1", "size1",
    "stride2", "order2", "size2",
];


/// Loop parameters of a single dimension
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Dimension {
    /// Multiplier applied to the dimension's pitch
    pub stride: u32,
    /// Nesting priority, with 0 denoting the innermost loop
    pub order: u32,
    /// Number of iterations
    pub size: u32,
}


/// Nested-loop description of a read epoch
///
/// Data is written into a buffer in plain sequential order. The buffer's
/// natural layout treats dimension 0 as the fastest varying one, i.e. the
/// pitch of dimension 0 is one word, the pitch of dimension 1 is `size0` and
/// the pitch of dimension 2 is `size0 * size1`.
///
/// Reads walk the three dimensions as nested loops. The dimension with
/// `order` 0 forms the innermost loop, the one with `order` 2 the outermost.
/// For each iteration, the address read is the sum over all dimensions of the
/// dimension's counter times its stride times its pitch.
///
/// Since the pitches already span the buffer, the `order` registers alone
/// select the permutation. A stride other than 1 on a dimension with a size
/// greater than 1 makes addresses collide or leave the epoch, and
/// [Descriptor::validate] rejects it. Raster strides such as (1, 3, 9) are
/// thus invalid; the same access pattern is expressed with strides (1, 1, 1).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Descriptor {
    dims: [Dimension; DIMENSIONS],
}

impl Descriptor {
    /// Create a descriptor from its dimensions
    pub fn new(dims: [Dimension; DIMENSIONS]) -> Self {
        Self {dims}
    }

    /// Create a descriptor reading data in the order it was written
    pub fn identity(sizes: [u32; DIMENSIONS]) -> Self {
        let mut dims: [Dimension; DIMENSIONS] = Default::default();
        dims.iter_mut().zip(sizes.iter()).enumerate().for_each(|(i, (d, s))| {
            *d = Dimension {stride: 1, order: i as u32, size: *s}
        });
        Self {dims}
    }

    /// Create a descriptor from the values of its registers
    ///
    /// The registers are expected in the order given by [REGISTER_NAMES].
    pub fn from_registers(regs: [u32; 3 * DIMENSIONS]) -> Self {
        let mut dims: [Dimension; DIMENSIONS] = Default::default();
        dims.iter_mut().zip(regs.chunks(3)).for_each(|(d, r)| {
            *d = Dimension {stride: r[0], order: r[1], size: r[2]}
        });
        Self {dims}
    }

    /// Retrieve the register values encoding this descriptor
    pub fn registers(&self) -> [u32; 3 * DIMENSIONS] {
        let mut res = [0; 3 * DIMENSIONS];
        res.chunks_mut(3).zip(self.dims.iter()).for_each(|(r, d)| {
            r[0] = d.stride;
            r[1] = d.order;
            r[2] = d.size;
        });
        res
    }

    /// Retrieve the dimensions
    pub fn dimensions(&self) -> &[Dimension; DIMENSIONS] {
        &self.dims
    }

    /// Retrieve the number of slots in an epoch
    pub fn epoch_len(&self) -> usize {
        self.dims.iter().fold(1usize, |acc, d| acc.saturating_mul(d.size as usize))
    }

    /// Retrieve the dimensions ordered from the innermost to the outermost loop
    ///
    /// This function returns `None` if the `order` values do not form a
    /// permutation of `0..DIMENSIONS`.
    pub fn nesting(&self) -> Option<[usize; DIMENSIONS]> {
        let mut res = [DIMENSIONS; DIMENSIONS];
        for (i, d) in self.dims.iter().enumerate() {
            let slot = res.get_mut(d.order as usize)?;
            if *slot != DIMENSIONS {
                return None
            }
            *slot = i;
        }
        Some(res)
    }

    /// Retrieve the pitches of the buffer's natural layout
    pub fn pitches(&self) -> [usize; DIMENSIONS] {
        let mut res = [1usize; DIMENSIONS];
        for i in 1..DIMENSIONS {
            res[i] = res[i - 1].saturating_mul(self.dims[i - 1].size as usize);
        }
        res
    }

    /// Compute the address of the `k`-th read of an epoch
    ///
    /// The index is decomposed into mixed-radix digits, with the sizes as radix
    /// in nesting order. This function returns `None` if the index is outside
    /// the epoch or the nesting is invalid.
    pub fn address_of(&self, k: usize) -> Option<usize> {
        if k >= self.epoch_len() {
            return None
        }
        let pitches = self.pitches();
        let mut rest = k;
        let mut res = 0usize;
        for d in self.nesting()?.iter().cloned() {
            let size = self.dims[d].size as usize;
            let counter = rest % size;
            rest /= size;
            res = res.saturating_add(offset(counter as u32, self.dims[d].stride, pitches[d]));
        }
        Some(res)
    }

    /// Retrieve the sequence of addresses read during an epoch
    pub fn addresses(&self) -> Result<Addresses, CoreError> {
        let nesting = self.nesting().ok_or(CoreError::InvalidDescriptor("order is not a permutation"))?;
        if self.dims.iter().any(|d| d.size == 0) {
            return Err(CoreError::InvalidDescriptor("size of zero"))
        }
        Ok(Addresses {
            dims: self.dims,
            pitches: self.pitches(),
            nesting,
            counters: [0; DIMENSIONS],
            remaining: self.epoch_len(),
        })
    }

    /// Check that the descriptor describes a bijection on the epoch's slots
    ///
    /// On success, this function returns the number of slots in an epoch.
    pub fn validate(&self, capacity: usize) -> Result<usize, CoreError> {
        let addresses = self.addresses()?;
        let len = self.epoch_len();
        if len > capacity {
            return Err(CoreError::InvalidDescriptor("epoch exceeds buffer capacity"))
        }

        let mut seen = vec![false; len];
        for addr in addresses {
            match seen.get_mut(addr) {
                Some(s) if !*s => *s = true,
                _ => return Err(CoreError::InvalidDescriptor("addresses collide or leave the epoch")),
            }
        }
        Ok(len)
    }
}

#[cfg(test)]
impl Arbitrary for Descriptor {
    fn arbitrary(g: &mut Gen) -> Self {
        let orders = g
            .choose(&[[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]])
            .cloned()
            .unwrap();
        let mut dims: [Dimension; DIMENSIONS] = Default::default();
        dims.iter_mut().zip(orders.iter()).for_each(|(d, o)| {
            *d = Dimension {stride: 1, order: *o, size: 1 + u32::arbitrary(g) % 6}
        });
        Self {dims}
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let dims = self.dims;
        let res = (0..DIMENSIONS).filter(move |i| dims[*i].size > 1).map(move |i| {
            let mut dims = dims;
            dims[i].size -= 1;
            Self {dims}
        });
        Box::new(res)
    }
}


/// Address generator for one epoch
///
/// The generator keeps one counter per dimension. After each address, the
/// innermost counter is incremented, carrying into the next outer one on
/// wrap-around.
#[derive(Clone, Debug)]
pub struct Addresses {
    dims: [Dimension; DIMENSIONS],
    pitches: [usize; DIMENSIONS],
    nesting: [usize; DIMENSIONS],
    counters: [u32; DIMENSIONS],
    remaining: usize,
}

impl Iterator for Addresses {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None
        }

        let res = (0..DIMENSIONS)
            .map(|d| offset(self.counters[d], self.dims[d].stride, self.pitches[d]))
            .fold(0usize, usize::saturating_add);
        self.remaining -= 1;

        for d in self.nesting.iter().cloned() {
            self.counters[d] += 1;
            if self.counters[d] < self.dims[d].size {
                break
            }
            self.counters[d] = 0;
        }
        Some(res)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Addresses {}

impl FusedIterator for Addresses {}


/// Compute the offset contributed by a single dimension
fn offset(counter: u32, stride: u32, pitch: usize) -> usize {
    (counter as usize).saturating_mul(stride as usize).saturating_mul(pitch)
}
