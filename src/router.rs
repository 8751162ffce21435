// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Configuration bus routing
//!
//! An [AddressRouter] owns all tiles attached to one configuration bus. It
//! decodes each global address into a (tile, feature, register) triple and
//! forwards the access to the single tile matching the triple's tile id.
//! Accesses designating no register of any tile are silently dropped, just
//! like an address with no matching enable cascade in hardware.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use crate::address::{AddressLayout, FeatureId, GlobalAddress, RegisterId, Target, TileId};
use crate::error::CoreError;
use crate::feature::Tile;


/// A tile attached to the configuration bus
pub trait Configurable {
    /// Retrieve the tile's configuration namespace
    fn tile(&self) -> &Tile;

    /// Write a value to a register of the tile
    ///
    /// The value is truncated to the register's width. If the pair does not
    /// designate any register, the write is dropped and [WriteOutcome::Unmapped]
    /// is returned. An error leaves the tile unaltered.
    fn write_config(
        &mut self,
        feature: FeatureId,
        register: RegisterId,
        data: u32,
    ) -> Result<WriteOutcome, CoreError>;

    /// Read back the current value of a register
    ///
    /// This function returns `None` if the pair does not designate any
    /// register.
    fn read_config(&self, feature: FeatureId, register: RegisterId) -> Option<u32>;

    /// Reset the tile's occupancy and pointer state
    fn reset(&mut self);
}


/// Effect of a configuration write
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The register was updated
    Committed,
    /// The address does not designate any register
    Unmapped,
    /// The register exists but its write enable is deasserted
    Gated,
}


/// Signals of the configuration bus sampled for a single clock edge
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConfigBus {
    pub addr: GlobalAddress,
    pub data: u32,
    pub write: bool,
    pub read: bool,
}

impl ConfigBus {
    /// Create a bus cycle writing a value
    pub fn write(addr: impl Into<GlobalAddress>, data: u32) -> Self {
        Self {addr: addr.into(), data, write: true, read: false}
    }

    /// Create a bus cycle reading back a value
    pub fn read(addr: impl Into<GlobalAddress>) -> Self {
        Self {addr: addr.into(), data: 0, write: false, read: true}
    }
}


/// Dispatcher for configuration accesses
#[derive(Clone, Debug)]
pub struct AddressRouter<T: Configurable> {
    layout: AddressLayout,
    tiles: BTreeMap<TileId, T>,
    read_config_data: u32,
}

impl<T: Configurable> AddressRouter<T> {
    /// Create a new router without any tiles
    pub fn new(layout: AddressLayout) -> Self {
        Self {layout, tiles: Default::default(), read_config_data: 0}
    }

    /// Retrieve the address layout
    pub fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// Attach a tile
    ///
    /// If a tile with the same id was already attached, it is replaced and
    /// returned.
    pub fn add_tile(&mut self, tile: T) -> Option<T> {
        let id = tile.tile().id();
        self.tiles.insert(id, tile)
    }

    /// Builder-style variant of [Self::add_tile]
    pub fn with_tile(mut self, tile: T) -> Self {
        self.add_tile(tile);
        self
    }

    /// Retrieve a specific tile
    pub fn tile(&self, id: TileId) -> Option<&T> {
        self.tiles.get(&id)
    }

    /// Retrieve a specific tile for modification
    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut T> {
        self.tiles.get_mut(&id)
    }

    /// Retrieve all tiles, ordered by their id
    pub fn tiles(&self) -> impl Iterator<Item = &T> {
        self.tiles.values()
    }

    /// Resolve a global address
    ///
    /// This function returns `None` if the address does not designate any
    /// register of any attached tile.
    pub fn route(&self, addr: GlobalAddress) -> Option<Target> {
        let target = self.layout.decode(addr);
        self.tiles
            .get(&target.tile)
            .and_then(|t| t.tile().slot(target.feature, target.register))
            .map(|_| target)
    }

    /// Check whether the given register is enabled by the current address
    pub fn decode_enable(&self, target: Target, current: GlobalAddress) -> bool {
        self.layout.decode_enable(target, current)
    }

    /// Compute the global address of a register
    pub fn address_of(&self, target: Target) -> Option<GlobalAddress> {
        self.layout.encode(target)
    }

    /// Perform a configuration write
    pub fn configure(&mut self, addr: GlobalAddress, data: u32) -> Result<WriteOutcome, CoreError> {
        let target = self.layout.decode(addr);
        let res = match self.tiles.get_mut(&target.tile) {
            Some(tile) => tile.write_config(target.feature, target.register, data)?,
            None => WriteOutcome::Unmapped,
        };

        match res {
            WriteOutcome::Committed => log::debug!("config {} <= {:#x}", target, data),
            WriteOutcome::Unmapped  => log::warn!("dropping write to unmapped address {}", addr),
            WriteOutcome::Gated     => log::debug!("write to {} gated", target),
        }
        Ok(res)
    }

    /// Read back a register
    ///
    /// The value is latched and remains available through
    /// [Self::read_config_data]. Unmapped addresses read as zero.
    pub fn config_read(&mut self, addr: GlobalAddress) -> u32 {
        let target = self.layout.decode(addr);
        self.read_config_data = self
            .tiles
            .get(&target.tile)
            .and_then(|t| t.read_config(target.feature, target.register))
            .unwrap_or(0);
        self.read_config_data
    }

    /// Retrieve the most recently latched read-back value
    pub fn read_config_data(&self) -> u32 {
        self.read_config_data
    }

    /// Evaluate a single clock edge of the configuration bus
    ///
    /// A read samples the register's value before a simultaneous write is
    /// committed. This function returns the write's outcome, if a write was
    /// requested.
    pub fn cycle(&mut self, bus: &ConfigBus) -> Result<Option<WriteOutcome>, CoreError> {
        if bus.read {
            self.config_read(bus.addr);
        }
        if bus.write {
            self.configure(bus.addr, bus.data).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reset all tiles
    pub fn reset(&mut self) {
        self.tiles.values_mut().for_each(Configurable::reset);
        self.read_config_data = 0;
    }
}

impl<T: Configurable> Default for AddressRouter<T> {
    fn default() -> Self {
        Self::new(Default::default())
    }
}
