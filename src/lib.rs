//! Memory core functional model
//!
//! This library models a configurable memory tile of a coarse-grained
//! reconfigurable array. Depending on its configuration, a [MemoryCore]
//! behaves as a random-access SRAM, a FIFO, a fixed-delay line buffer or a
//! double-buffered reorder buffer, all behind one uniform data port.
//!
//! Tiles are configured over a shared configuration bus. An [AddressRouter]
//! decodes each global address into a tile, a feature within that tile and a
//! register within that feature, and forwards writes and read-backs
//! accordingly. Sequences of configuration writes can be stored and loaded as
//! [Bitstream]s.

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod address;
pub mod bitstream;
pub mod double_buffer;
pub mod error;
pub mod feature;
pub mod memcore;
pub mod memory;
pub mod mode;
pub mod params;
pub mod register;
pub mod router;

mod parsers;

#[cfg(test)]
mod tests;

pub use address::{AddressLayout, GlobalAddress, Target};
pub use bitstream::Bitstream;
pub use double_buffer::{Descriptor, Dimension, DoubleBufferAddressor};
pub use error::{CoreError, LoadError, ParseError};
pub use memcore::{DataPort, MemoryCore};
pub use memory::MemoryEngine;
pub use mode::{ConfigWord, Mode, ModeController};
pub use params::{Params, Word};
pub use router::{AddressRouter, ConfigBus, Configurable, WriteOutcome};
