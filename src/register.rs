// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Configuration registers

use std::sync::Arc;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

use crate::address::{FeatureId, RegisterId, mask};


/// Bit-width of a configuration register
pub type Width = u8;


/// A configuration register
///
/// Registers hold a value of a fixed bit-width. Values wider than the register
/// are truncated when written, just like the hardware would.
#[derive(Clone, Debug, PartialEq)]
pub struct Register {
    name: Arc<str>,
    index: RegisterId,
    width: Width,
    value: u32,
}

impl Register {
    /// Create a new register holding zero
    pub fn new(name: impl Into<Arc<str>>, index: RegisterId, width: Width) -> Self {
        Self {name: name.into(), index, width, value: 0}
    }

    /// Retrieve the register's name
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Retrieve the register's address within its feature
    pub fn index(&self) -> RegisterId {
        self.index
    }

    /// Retrieve the register's bit-width
    pub fn width(&self) -> Width {
        self.width
    }

    /// Retrieve the register's current value
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Retrieve the mask of bits the register is able to hold
    pub fn mask(&self) -> u32 {
        mask(self.width)
    }

    /// Set the register's value
    ///
    /// The value is truncated to the register's width. This function returns
    /// the value actually stored.
    pub fn set(&mut self, value: u32) -> u32 {
        self.value = value & self.mask();
        self.value
    }
}

#[cfg(test)]
impl Arbitrary for Register {
    fn arbitrary(g: &mut Gen) -> Self {
        let name = crate::tests::Name::arbitrary(g).to_string();
        let width = 1 + Width::arbitrary(g) % 32;
        let mut res = Self::new(name, Arbitrary::arbitrary(g), width);
        res.set(Arbitrary::arbitrary(g));
        res
    }
}


/// Opaque handle to a register within a tile
///
/// Handles are handed out by the feature builder when a register is declared
/// and remain valid for the tile built from that builder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegisterHandle {
    feature: FeatureId,
    register: RegisterId,
}

impl RegisterHandle {
    pub(crate) fn new(feature: FeatureId, register: RegisterId) -> Self {
        Self {feature, register}
    }

    /// Retrieve the index of the feature owning the register
    pub fn feature(&self) -> FeatureId {
        self.feature
    }

    /// Retrieve the register's index within its feature
    pub fn register(&self) -> RegisterId {
        self.register
    }
}
