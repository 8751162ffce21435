// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Tests related to modes

use crate::error::CoreError;
use crate::tests::Equivalence;

use super::{ConfigWord, Mode, ModeController};


#[quickcheck]
fn config_word_encoding(original: ConfigWord) -> Equivalence<ConfigWord> {
    Equivalence::of(original, ConfigWord::decode(original.encode()))
}


#[test]
fn config_word_layout() {
    let word = ConfigWord::decode(2 | (1 << 2) | (8 << 3));
    assert_eq!(word, ConfigWord::new(Mode::Sram, 8));
    assert_eq!(ConfigWord::decode(0x0000_0004 | (10 << 3)), ConfigWord::new(Mode::LineBuffer, 10));
    assert_eq!(ConfigWord::decode(0x0000_0006), ConfigWord::new(Mode::Sram, 0));
    assert!(!ConfigWord::decode(1 | (16 << 3)).tile_enable);
}


#[test]
fn mode_takes_effect_when_enabled() {
    let mut ctrl = ModeController::new(1024);
    assert_eq!(ctrl.active(), None);

    ctrl.configure(ConfigWord::new(Mode::Fifo, 8).disabled()).unwrap();
    assert_eq!(ctrl.current_mode(), Mode::Fifo);
    assert_eq!(ctrl.active(), None);

    ctrl.configure(ConfigWord::new(Mode::Fifo, 8)).unwrap();
    assert_eq!(ctrl.active(), Some((Mode::Fifo, 8)));
    assert_eq!(ctrl.current_depth(), 8);
}


#[test]
fn transition_requires_reset() {
    let mut ctrl = ModeController::new(1024);
    ctrl.configure(ConfigWord::new(Mode::Sram, 8)).unwrap();
    ctrl.configure(ConfigWord::new(Mode::Sram, 8)).unwrap();

    let err = ctrl.configure(ConfigWord::new(Mode::Fifo, 8)).unwrap_err();
    assert!(matches!(err, CoreError::InvalidModeTransition {from: Mode::Sram, to: Mode::Fifo, ..}));
    assert_eq!(ctrl.active(), Some((Mode::Sram, 8)));

    assert!(ctrl.configure(ConfigWord::new(Mode::Sram, 16)).is_err());

    ctrl.reset();
    assert_eq!(ctrl.active(), Some((Mode::Sram, 8)));
    ctrl.configure(ConfigWord::new(Mode::Fifo, 8)).unwrap();
    assert_eq!(ctrl.active(), Some((Mode::Fifo, 8)));
}


#[test]
fn depth_bounded_by_capacity() {
    let mut ctrl = ModeController::new(64);
    assert!(ctrl.configure(ConfigWord::new(Mode::Sram, 64)).is_ok());
    ctrl.reset();
    assert_eq!(
        ctrl.configure(ConfigWord::new(Mode::DoubleBuffer, 33)),
        Err(CoreError::DepthExceedsCapacity {mode: Mode::DoubleBuffer, depth: 33, capacity: 32}),
    );
    assert!(ctrl.configure(ConfigWord::new(Mode::DoubleBuffer, 32)).is_ok());
}
