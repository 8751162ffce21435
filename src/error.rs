// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Error types

use std::error::Error as Error;
use std::fmt;
use std::io;

use thiserror::Error as ThisError;

use crate::address::GlobalAddress;
use crate::mode::Mode;
use crate::parsers;


/// Misuse of a memory core
///
/// All of these are the result of a driver violating the core's protocol. A
/// failed operation never alters the core's state.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CoreError {
    #[error("address {addr} is out of range for depth {depth}")]
    AddressOutOfRange {addr: usize, depth: usize},
    #[error("write to full FIFO")]
    FifoOverflow,
    #[error("read from empty FIFO")]
    FifoUnderflow,
    #[error("transition from {from:?} (depth {from_depth}) to {to:?} (depth {to_depth}) without reset")]
    InvalidModeTransition {from: Mode, from_depth: u32, to: Mode, to_depth: u32},
    #[error("buffer swap requested after {written} of {expected} writes")]
    SwapDuringEpoch {written: usize, expected: usize},
    #[error("depth {depth} exceeds capacity {capacity} in {mode:?} mode")]
    DepthExceedsCapacity {mode: Mode, depth: u32, capacity: usize},
    #[error("data port used while the tile is disabled")]
    TileDisabled,
    #[error("double buffer descriptor does not describe a bijection: {0}")]
    InvalidDescriptor(&'static str),
    #[error("write into a complete epoch of {0} slots")]
    EpochFull(usize),
    #[error("read from a drained buffer")]
    EpochDrained,
}


/// Parsing error type
#[derive(Debug)]
pub enum ParseError {
    IO(io::Error),
    Other(String),
}

impl From<io::ErrorKind> for ParseError {
    fn from(err: io::ErrorKind) -> Self {
        Self::IO(err.into())
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self::IO(err)
    }
}

impl From<String> for ParseError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IO(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IO(_)         => fmt::Display::fmt("IO error", f),
            Self::Other(err)    => fmt::Display::fmt(err, f),
        }
    }
}


/// Convert a `nom::Err` into a `ParseError`
pub(crate) fn convert_error(input: &str, err: nom::Err<parsers::Error>) -> ParseError {
    use nom::error::convert_error;

    match err {
        nom::Err::Incomplete(_) => io::ErrorKind::UnexpectedEof.into(),
        nom::Err::Error(e) | nom::Err::Failure(e) => convert_error(input, e).into(),
    }
}


/// Failure while loading a bitstream
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("could not parse bitstream: {0}")]
    Parse(#[from] ParseError),
    #[error("configuration write to {addr} failed: {error}")]
    Core {addr: GlobalAddress, error: CoreError},
    #[error("read-back from {addr} yielded {actual:#010X} instead of {expected:#010X}")]
    ReadBack {addr: GlobalAddress, expected: u32, actual: u32},
}
