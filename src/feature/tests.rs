// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Tests related to features and tiles

use crate::register::Register;

use super::{Slot, TileBuilder};


#[quickcheck]
fn register_set_truncates(mut reg: Register, value: u32) -> bool {
    let stored = reg.set(value);
    stored == reg.value() && stored == value & reg.mask() && stored & !reg.mask() == 0
}


#[test]
fn registers_numbered_in_declaration_order() {
    let mut builder = TileBuilder::new(7);
    let (a, b) = {
        let mut ctrl = builder.feature("ctrl");
        assert_eq!(ctrl.index(), 0);
        (ctrl.add_config("a", 4), ctrl.add_config("b", 8))
    };
    let c = builder.feature("other").add_config("c", 1);
    let tile = builder.build();

    assert_eq!(tile.id(), 7);
    assert_eq!((a.feature(), a.register()), (0, 0));
    assert_eq!((b.feature(), b.register()), (0, 1));
    assert_eq!((c.feature(), c.register()), (1, 0));
    assert_eq!(tile.register(b).map(|r| r.name()), Some("b"));
    assert_eq!(tile.feature_by_name(&"other").map(|f| f.index()), Some(1));
}


#[test]
fn slots_resolve_by_exact_match() {
    let mut builder = TileBuilder::new(0);
    let reg = builder.feature("ctrl").add_config("mode", 8);
    let window = builder.window("bank", 512, 256, 16);
    let tile = builder.build();

    assert_eq!(tile.slot(0, 0), Some(Slot::Register(reg)));
    assert_eq!(tile.slot(0, 1), None);
    assert_eq!(tile.slot(window, 0), Some(Slot::Window {address: 512, width: 16}));
    assert_eq!(tile.slot(window, 255), Some(Slot::Window {address: 767, width: 16}));
    assert_eq!(tile.slot(window, 256), None);
    assert_eq!(tile.slot(window + 1, 0), None);
}


#[test]
fn register_values_truncated() {
    let mut builder = TileBuilder::new(0);
    let reg = builder.feature("ctrl").add_config("order", 2);
    let mut tile = builder.build();

    assert_eq!(tile.register_mut(reg).map(|r| r.set(0b111)), Some(0b11));
    assert_eq!(tile.value(reg), 0b11);
    assert_eq!(tile.features().flat_map(|f| f.registers()).count(), 1);
}
