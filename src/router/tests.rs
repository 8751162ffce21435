// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Tests related to configuration bus routing

use crate::address::{AddressLayout, GlobalAddress, Target};
use crate::error::CoreError;
use crate::memcore::{DB_CTRL_FEATURE, FIRST_BANK_FEATURE, MEM_CTRL_FEATURE, MemoryCore};
use crate::mode::{ConfigWord, Mode};

use super::{AddressRouter, ConfigBus, WriteOutcome};


fn global(raw: u32) -> GlobalAddress {
    raw.into()
}


fn array(tiles: u32) -> AddressRouter<MemoryCore> {
    (0..tiles).fold(Default::default(), |r: AddressRouter<_>, id| r.with_tile(MemoryCore::new(id, Default::default())))
}


#[quickcheck]
fn unmapped_writes_are_dropped(addr: GlobalAddress, data: u32) -> bool {
    let mut router = array(2);
    let mapped = router.route(addr).is_some();
    let res = router.configure(addr, data);
    let untouched = router.tiles().all(|t| t.mode().word() == Default::default());
    mapped || (res == Ok(WriteOutcome::Unmapped) && untouched && router.config_read(addr) == 0)
}


#[test]
fn route_mapped_only() {
    let router = array(2);
    assert_eq!(router.route(global(0x0001_0000)), Some(Target::new(1, 0, 0)));
    assert_eq!(router.route(global(0x0001_0108)), Some(Target::new(1, 1, 8)));
    assert_eq!(router.route(global(0x0001_0109)), None);
    assert_eq!(router.route(global(0x0002_0000)), None);
    assert_eq!(router.route(global(0x0000_05FF)), Some(Target::new(0, 5, 255)));
    assert_eq!(router.route(global(0x0000_0600)), None);
}


#[test]
fn single_tile_enabled() {
    let mut router = array(3);
    let target = Target::new(1, MEM_CTRL_FEATURE, 0);
    let addr = router.address_of(target).unwrap();
    assert_eq!(addr, global(0x0001_0000));
    assert!(router.decode_enable(target, addr));
    assert!(!router.decode_enable(Target::new(0, MEM_CTRL_FEATURE, 0), addr));

    let word = ConfigWord::new(Mode::Sram, 8);
    assert_eq!(router.configure(addr, word.encode()), Ok(WriteOutcome::Committed));
    let words: Vec<_> = router.tiles().map(|t| t.mode().word()).collect();
    assert_eq!(words, vec![Default::default(), word, Default::default()]);
}


#[test]
fn unmapped_address_is_noop() {
    let mut router = array(1);
    let before: Vec<_> = (0x100..0x109).map(|r| router.config_read(global(r))).collect();

    assert_eq!(router.configure(global(0x0000_0700), 0xFF), Ok(WriteOutcome::Unmapped));
    assert_eq!(router.configure(global(0x0005_0000), 0xFF), Ok(WriteOutcome::Unmapped));
    assert_eq!(router.configure(global(0x0000_0120), 0xFF), Ok(WriteOutcome::Unmapped));

    let after: Vec<_> = (0x100..0x109).map(|r| router.config_read(global(r))).collect();
    assert_eq!(before, after);
    assert_eq!(router.tile(0).map(|t| t.mode().word()), Some(Default::default()));
    assert_eq!(router.config_read(global(0x0005_0000)), 0);
}


#[test]
fn read_back_latched() {
    let mut router = array(1);
    let addr = global(DB_CTRL_FEATURE << 8 | 2);
    router.configure(addr, 27).unwrap();
    assert_eq!(router.read_config_data(), 0);
    assert_eq!(router.config_read(addr), 27);
    assert_eq!(router.read_config_data(), 27);

    let bank = global(FIRST_BANK_FEATURE << 8 | 0x10);
    router.configure(bank, 0x1234).unwrap();
    assert_eq!(router.config_read(bank), 0x1234);
}


#[test]
fn bus_cycle_reads_before_write() {
    let mut router = array(1);
    let addr = global(0x0000_0100);
    router.cycle(&ConfigBus::write(addr, 3)).unwrap();

    let bus = ConfigBus {read: true, ..ConfigBus::write(addr, 5)};
    assert_eq!(router.cycle(&bus), Ok(Some(WriteOutcome::Committed)));
    assert_eq!(router.read_config_data(), 3);
    assert_eq!(router.cycle(&ConfigBus::read(addr)), Ok(None));
    assert_eq!(router.read_config_data(), 5);
}


#[test]
fn core_errors_propagate() {
    let mut router = array(1);
    let addr = global(0);
    router.configure(addr, ConfigWord::new(Mode::Fifo, 16).encode()).unwrap();
    assert_eq!(
        router.configure(addr, ConfigWord::new(Mode::Sram, 16).encode()),
        Err(CoreError::InvalidModeTransition {from: Mode::Fifo, from_depth: 16, to: Mode::Sram, to_depth: 16}),
    );

    router.reset();
    assert_eq!(router.configure(addr, ConfigWord::new(Mode::Sram, 16).encode()), Ok(WriteOutcome::Committed));
}


#[test]
fn custom_layout() {
    let layout = AddressLayout::new(4, 4, 24).unwrap();
    let mut router = AddressRouter::new(layout).with_tile(MemoryCore::new(7, Default::default()));
    let addr = router.address_of(Target::new(7, DB_CTRL_FEATURE, 8)).unwrap();
    assert_eq!(addr, global(0x718));
    assert_eq!(router.configure(addr, 4), Ok(WriteOutcome::Committed));
    assert_eq!(router.tile(7).map(|t| t.descriptor().dimensions()[2].size), Some(4));
    assert_eq!(router.address_of(Target::new(7, 0, 16)), None);
}
