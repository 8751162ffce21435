// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Tests related to global addresses

use crate::tests::Equivalence;

use super::{AddressLayout, GlobalAddress, Target};


#[quickcheck]
fn decode_encode(layout: AddressLayout, addr: GlobalAddress) -> Equivalence<Option<GlobalAddress>> {
    Equivalence::of(Some(addr), layout.encode(layout.decode(addr)))
}


#[quickcheck]
fn decode_unique(layout: AddressLayout, a: GlobalAddress, b: GlobalAddress) -> bool {
    (layout.decode(a) == layout.decode(b)) == (a == b)
}


#[quickcheck]
fn enable_matches_exactly_one(layout: AddressLayout, a: GlobalAddress, b: GlobalAddress) -> bool {
    layout.decode_enable(layout.decode(a), b) == (a == b)
}


#[test]
fn default_field_positions() {
    let layout = AddressLayout::default();
    assert_eq!(layout.decode(0x0001_02_03.into()), Target::new(1, 2, 3));
    assert_eq!(layout.decode(0xBEEF_00_FF.into()), Target::new(0xBEEF, 0, 0xFF));
    assert_eq!(layout.encode(Target::new(0x12, 0x34, 0x56)), Some(0x0012_34_56.into()));
}


#[test]
fn encode_rejects_wide_fields() {
    let layout = AddressLayout::default();
    assert_eq!(layout.encode(Target::new(0, 0, 0x100)), None);
    assert_eq!(layout.encode(Target::new(0, 0x100, 0)), None);
    assert_eq!(layout.encode(Target::new(0x1_0000, 0, 0)), None);
}


#[test]
fn enable_cascade() {
    let layout = AddressLayout::default();
    let target = Target::new(3, 1, 7);
    assert!(layout.decode_enable(target, 0x0003_01_07.into()));
    assert!(!layout.decode_enable(target, 0x0004_01_07.into()));
    assert!(!layout.decode_enable(target, 0x0003_00_07.into()));
    assert!(!layout.decode_enable(target, 0x0003_01_06.into()));
}


#[test]
fn layout_validation() {
    assert!(AddressLayout::new(8, 8, 16).is_some());
    assert!(AddressLayout::new(4, 12, 16).is_some());
    assert!(AddressLayout::new(8, 8, 8).is_none());
    assert!(AddressLayout::new(0, 16, 16).is_none());
}
