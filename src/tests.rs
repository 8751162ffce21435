//! Testing utilities

use std::fmt;

use quickcheck::{Arbitrary, Gen, TestResult, Testable};


/// Utility type for property-based tests involving an equivalence
///
/// Many properties boil down to two values being equal, e.g. a register read
/// back after a write or a parsed bitstream compared to the one formatted.
/// `Equivalence` is a `quickcheck::Testable` type which expresses this intent
/// and includes both values in the failure report.
#[derive(Clone, Debug)]
pub struct Equivalence<T>(pub T, pub T)
where
    T: fmt::Debug + PartialEq + 'static;

impl<T> Equivalence<T>
where
    T: fmt::Debug + PartialEq + 'static,
{
    /// Construct a value expressing the equivalence of the given values
    pub fn of(left: T, right: T) -> Self {
        Self(left, right)
    }
}

impl<T> Testable for Equivalence<T>
where
    T: fmt::Debug + PartialEq + 'static,
{
    fn result(&self, _: &mut Gen) -> TestResult {
        if self.0 == self.1 {
            TestResult::passed()
        } else {
            TestResult::error(format!("Mismatch! Left: '{:?}', Right: '{:?}'", self.0, self.1))
        }
    }
}


/// Utility type for generating register and feature names
///
/// Names consist of a lower case word, optionally followed by an index, e.g.
/// `stride2` or `sram_bank`.
#[derive(Clone, Debug, PartialEq)]
pub struct Name {
    data: String,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.data, f)
    }
}

impl Arbitrary for Name {
    fn arbitrary(g: &mut Gen) -> Self {
        const WORDS: [&str; 8] = ["config", "stride", "order", "size", "sram_bank", "mem_ctrl", "db_ctrl", "en"];

        let mut data = g.choose(&WORDS).cloned().unwrap_or("reg").to_string();
        if bool::arbitrary(g) {
            data.push_str(&(u8::arbitrary(g) % 16).to_string());
        }
        Self {data}
    }
}
