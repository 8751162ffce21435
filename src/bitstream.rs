// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Configuration bitstreams
//!
//! A bitstream is an ordered sequence of (address, data) pairs, each of which
//! is applied as one write on the configuration bus. In its textual form, each
//! pair occupies one line, with both values in hexadecimal:
//!
//! ```text
//! # mode word of tile 1: SRAM, enabled, depth 8
//! 00010000 00000046
//! ```

pub(crate) mod parsers;


use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

use crate::address::{AddressLayout, GlobalAddress, Target};
use crate::error::{LoadError, ParseError, convert_error};
use crate::router::{AddressRouter, Configurable, WriteOutcome};


/// An ordered sequence of configuration writes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitstream {
    entries: Vec<(GlobalAddress, u32)>,
}

impl Bitstream {
    /// Create an empty bitstream
    pub fn new() -> Self {
        Default::default()
    }

    /// Read a bitstream from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        std::fs::read_to_string(path)?.parse()
    }

    /// Append a write
    pub fn push(&mut self, addr: impl Into<GlobalAddress>, data: u32) {
        self.entries.push((addr.into(), data))
    }

    /// Append a write to the given register
    ///
    /// This function returns the address of the register, or `None` if the
    /// target could not be encoded using the given layout. In the latter case,
    /// the bitstream is not altered.
    pub fn push_target(&mut self, layout: AddressLayout, target: Target, data: u32) -> Option<GlobalAddress> {
        let addr = layout.encode(target)?;
        self.push(addr, data);
        Some(addr)
    }

    /// Retrieve the writes in order
    pub fn entries(&self) -> impl Iterator<Item = (GlobalAddress, u32)> + '_ {
        self.entries.iter().cloned()
    }

    /// Retrieve the number of writes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the bitstream is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply the bitstream to an array of tiles
    ///
    /// Each committed write is checked by reading back the register. Writes to
    /// unmapped addresses and gated writes are skipped. On success, this
    /// function returns the number of committed writes.
    ///
    /// Loading stops at the first failure, leaving the writes preceding it in
    /// effect.
    pub fn load<T: Configurable>(&self, router: &mut AddressRouter<T>) -> Result<usize, LoadError> {
        self.entries().try_fold(0, |committed, (addr, data)| {
            let outcome = router.configure(addr, data).map_err(|error| LoadError::Core {addr, error})?;
            if outcome != WriteOutcome::Committed {
                return Ok(committed)
            }

            let actual = router.config_read(addr);
            if actual != data {
                return Err(LoadError::ReadBack {addr, expected: data, actual})
            }
            Ok(committed + 1)
        })
    }
}

impl fmt::Display for Bitstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entries().try_for_each(|(addr, data)| writeln!(f, "{} {:08X}", addr, data))
    }
}

impl FromStr for Bitstream {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::bitstream(s).map(|(_, entries)| Self {entries}).map_err(|e| convert_error(s, e))
    }
}

impl std::iter::FromIterator<(GlobalAddress, u32)> for Bitstream {
    fn from_iter<I: IntoIterator<Item = (GlobalAddress, u32)>>(iter: I) -> Self {
        Self {entries: iter.into_iter().collect()}
    }
}

impl Extend<(GlobalAddress, u32)> for Bitstream {
    fn extend<I: IntoIterator<Item = (GlobalAddress, u32)>>(&mut self, iter: I) {
        self.entries.extend(iter)
    }
}

impl IntoIterator for Bitstream {
    type Item = (GlobalAddress, u32);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
impl Arbitrary for Bitstream {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {entries: Arbitrary::arbitrary(g)}
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.entries.shrink().map(|entries| Self {entries}))
    }
}
