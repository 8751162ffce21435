// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Features and tiles
//!
//! A tile owns a number of features, each of which owns a namespace of
//! configuration registers. The namespace is allocated once, at construction
//! time, through a [TileBuilder]. Registers are numbered in declaration order
//! within their feature, features in declaration order within their tile.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::address::{FeatureId, RegisterId, TileId};
use crate::register::{Register, RegisterHandle, Width};


/// A configurable sub-block of a tile
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    name: Arc<str>,
    index: FeatureId,
    kind: Kind,
}

impl Feature {
    /// Retrieve the feature's name
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Retrieve the feature's index within its tile
    pub fn index(&self) -> FeatureId {
        self.index
    }

    /// Retrieve the feature's kind
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Retrieve the registers declared in this feature
    ///
    /// Memory windows do not declare any registers.
    pub fn registers(&self) -> impl Iterator<Item = &Register> {
        let regs: &[Register] = match &self.kind {
            Kind::Registers(r)  => r.as_slice(),
            Kind::Window {..}   => &[],
        };
        regs.iter()
    }

    /// Resolve a register index
    ///
    /// This function returns `None` if the index does not designate any slot
    /// of this feature.
    pub fn slot(&self, register: RegisterId) -> Option<Slot> {
        match &self.kind {
            Kind::Registers(r) => r
                .iter()
                .find(|r| r.index() == register)
                .map(|r| Slot::Register(RegisterHandle::new(self.index, r.index()))),
            Kind::Window {base, words, width} => {
                let offset = register as usize;
                if offset < *words {
                    Some(Slot::Window {address: base + offset, width: *width})
                } else {
                    None
                }
            },
        }
    }
}


/// The "kind" of a feature
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    /// A feature consisting of individual registers
    Registers(Vec<Register>),
    /// A window into a core's backing store
    ///
    /// Each register index of the window designates the word at `base` plus
    /// that index.
    Window {base: usize, words: usize, width: Width},
}


/// A slot designated by a (feature, register) pair
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    Register(RegisterHandle),
    Window {address: usize, width: Width},
}


/// Configuration namespace of a tile
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    id: TileId,
    features: Vec<Feature>,
}

impl Tile {
    /// Retrieve the tile's id
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Retrieve the tile's features
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Retrieve a specific feature by its index
    pub fn feature(&self, index: FeatureId) -> Option<&Feature> {
        self.features.get(index as usize)
    }

    /// Retrieve a specific feature by its name
    pub fn feature_by_name(&self, name: &impl AsRef<str>) -> Option<&Feature> {
        self.features.iter().find(|f| f.name() == name.as_ref())
    }

    /// Resolve a (feature, register) pair
    ///
    /// The feature is selected by an exact index match, the slot by an exact
    /// register index match. If either does not match, no slot is designated.
    pub fn slot(&self, feature: FeatureId, register: RegisterId) -> Option<Slot> {
        self.feature(feature).and_then(|f| f.slot(register))
    }

    /// Retrieve the register designated by a handle
    pub fn register(&self, handle: RegisterHandle) -> Option<&Register> {
        match &self.feature(handle.feature())?.kind {
            Kind::Registers(r) => r.get(handle.register() as usize),
            _ => None,
        }
    }

    /// Retrieve the value of the register designated by a handle
    ///
    /// Unknown handles read as zero.
    pub fn value(&self, handle: RegisterHandle) -> u32 {
        self.register(handle).map(Register::value).unwrap_or(0)
    }

    /// Retrieve the register designated by a handle for modification
    pub(crate) fn register_mut(&mut self, handle: RegisterHandle) -> Option<&mut Register> {
        match &mut self.features.get_mut(handle.feature() as usize)?.kind {
            Kind::Registers(r) => r.get_mut(handle.register() as usize),
            _ => None,
        }
    }
}


/// Builder for a [Tile]
#[derive(Debug)]
pub struct TileBuilder {
    id: TileId,
    features: Vec<Feature>,
}

impl TileBuilder {
    /// Start building a tile with the given id
    pub fn new(id: TileId) -> Self {
        Self {id, features: Default::default()}
    }

    /// Declare a register feature
    ///
    /// The feature receives the next free feature index. Registers are added
    /// through the returned [FeatureBuilder].
    pub fn feature(&mut self, name: impl Into<Arc<str>>) -> FeatureBuilder<'_> {
        let index = self.features.len();
        self.features.push(Feature {
            name: name.into(),
            index: index as FeatureId,
            kind: Kind::Registers(Default::default()),
        });
        FeatureBuilder {tile: self, index}
    }

    /// Declare a memory window feature
    ///
    /// The window maps `words` consecutive register indices onto the backing
    /// store, starting at `base`.
    pub fn window(&mut self, name: impl Into<Arc<str>>, base: usize, words: usize, width: Width) -> FeatureId {
        let index = self.features.len() as FeatureId;
        self.features.push(Feature {name: name.into(), index, kind: Kind::Window {base, words, width}});
        index
    }

    /// Finish the tile
    pub fn build(self) -> Tile {
        Tile {id: self.id, features: self.features}
    }
}


/// Builder for the registers of a single feature
#[derive(Debug)]
pub struct FeatureBuilder<'t> {
    tile: &'t mut TileBuilder,
    index: usize,
}

impl FeatureBuilder<'_> {
    /// Retrieve the index of the feature under construction
    pub fn index(&self) -> FeatureId {
        self.index as FeatureId
    }

    /// Declare a configuration register
    ///
    /// The register receives the next free register index within the feature.
    pub fn add_config(&mut self, name: impl Into<Arc<str>>, width: Width) -> RegisterHandle {
        let feature = self.index as FeatureId;
        match &mut self.tile.features[self.index].kind {
            Kind::Registers(regs) => {
                let index = regs.len() as RegisterId;
                regs.push(Register::new(name, index, width));
                RegisterHandle::new(feature, index)
            },
            Kind::Window {..} => unreachable!("feature builders only exist for register features"),
        }
    }
}
