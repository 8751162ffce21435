// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Global configuration addresses
//!
//! A single configuration bus is shared by all tiles of an array. Each write
//! on that bus carries a flat 32 bit address which is composed of a tile id,
//! a feature index and a register index. In the default layout, the register
//! index occupies the lowest byte, the feature index the next byte and the
//! tile id the upper two bytes.

#[cfg(test)]
mod tests;

use std::fmt;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};


/// Identifier of a tile within an array
pub type TileId = u32;

/// Index of a feature within a tile
pub type FeatureId = u32;

/// Index of a register within a feature
pub type RegisterId = u32;


/// A flat address on the configuration bus
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlobalAddress(u32);

impl GlobalAddress {
    /// Retrieve the raw address value
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for GlobalAddress {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<GlobalAddress> for u32 {
    fn from(addr: GlobalAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for GlobalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

#[cfg(test)]
impl Arbitrary for GlobalAddress {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(Arbitrary::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}


/// A decoded (tile, feature, register) triple
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target {
    pub tile: TileId,
    pub feature: FeatureId,
    pub register: RegisterId,
}

impl Target {
    /// Create a new target
    pub fn new(tile: TileId, feature: FeatureId, register: RegisterId) -> Self {
        Self {tile, feature, register}
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile {} feature {} register {}", self.tile, self.feature, self.register)
    }
}


/// Partitioning of a global address into its fields
///
/// The field widths must add up to the width of a [GlobalAddress]. The same
/// layout must be used for assembling addresses (e.g. when generating a
/// bitstream) and decoding them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    register_bits: u8,
    feature_bits: u8,
    tile_bits: u8,
}

impl AddressLayout {
    /// Create a new layout
    ///
    /// This function returns `None` if any field is empty or if the widths do
    /// not add up to 32 bits.
    pub fn new(register_bits: u8, feature_bits: u8, tile_bits: u8) -> Option<Self> {
        let total = u16::from(register_bits) + u16::from(feature_bits) + u16::from(tile_bits);
        if register_bits == 0 || feature_bits == 0 || tile_bits == 0 || total != 32 {
            return None
        }
        Some(Self {register_bits, feature_bits, tile_bits})
    }

    /// Retrieve the width of the register index field
    pub fn register_bits(&self) -> u8 {
        self.register_bits
    }

    /// Retrieve the width of the feature index field
    pub fn feature_bits(&self) -> u8 {
        self.feature_bits
    }

    /// Retrieve the width of the tile id field
    pub fn tile_bits(&self) -> u8 {
        self.tile_bits
    }

    /// Split an address into its fields
    ///
    /// Decoding is total: every address yields exactly one triple, and no two
    /// addresses yield the same triple.
    pub fn decode(&self, addr: GlobalAddress) -> Target {
        let raw = addr.value();
        let feature_shift = self.register_bits;
        let tile_shift = self.register_bits + self.feature_bits;
        Target {
            tile:       field(raw, tile_shift, self.tile_bits),
            feature:    field(raw, feature_shift, self.feature_bits),
            register:   field(raw, 0, self.register_bits),
        }
    }

    /// Assemble an address from its fields
    ///
    /// This function returns `None` if any of the fields does not fit its
    /// width.
    pub fn encode(&self, target: Target) -> Option<GlobalAddress> {
        let fits = |v: u32, bits: u8| v & !mask(bits) == 0;
        if !(fits(target.register, self.register_bits)
            && fits(target.feature, self.feature_bits)
            && fits(target.tile, self.tile_bits)) {
            return None
        }

        let feature_shift = u32::from(self.register_bits);
        let tile_shift = feature_shift + u32::from(self.feature_bits);
        let raw = shl(target.tile, tile_shift) | shl(target.feature, feature_shift) | target.register;
        Some(raw.into())
    }

    /// Determine whether the given register is enabled by an address
    ///
    /// The enable is the conjunction of an exact tile id match, an exact
    /// feature index match and an exact register index match.
    pub fn decode_enable(&self, target: Target, current: GlobalAddress) -> bool {
        let decoded = self.decode(current);
        let tile_en = decoded.tile == target.tile;
        let feature_en = tile_en && decoded.feature == target.feature;
        feature_en && decoded.register == target.register
    }
}

impl Default for AddressLayout {
    fn default() -> Self {
        Self {register_bits: 8, feature_bits: 8, tile_bits: 16}
    }
}

#[cfg(test)]
impl Arbitrary for AddressLayout {
    fn arbitrary(g: &mut Gen) -> Self {
        let register_bits = 1 + u8::arbitrary(g) % 15;
        let feature_bits = 1 + u8::arbitrary(g) % 15;
        Self {register_bits, feature_bits, tile_bits: 32 - register_bits - feature_bits}
    }
}


/// Create a mask covering the lowest `bits` bits
pub(crate) fn mask(bits: u8) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        (1 << bits) - 1
    }
}


fn field(raw: u32, shift: u8, bits: u8) -> u32 {
    raw.checked_shr(shift.into()).unwrap_or(0) & mask(bits)
}


fn shl(value: u32, shift: u32) -> u32 {
    value.checked_shl(shift).unwrap_or(0)
}
