//! Tests for parser utilities

use nom::combinator::all_consuming;
use nom::Finish;

use crate::tests::Equivalence;


#[quickcheck]
fn parse_hexadecimal(original: u32, prefixed: bool, upper: bool) -> Result<Equivalence<u32>, String> {
    let s = match (prefixed, upper) {
        (false, false)  => format!("{:x}", original),
        (false, true)   => format!("{:X}", original),
        (true, false)   => format!("0x{:x}", original),
        (true, true)    => format!("0X{:08X}", original),
    };
    let res = all_consuming(super::hexadecimal)(&s)
        .finish()
        .map(|(_, parsed)| Equivalence::of(original, parsed))
        .map_err(|e| e.to_string());
    res
}


#[test]
fn hexadecimal_bounds() {
    assert_eq!(super::hexadecimal(" \tFFFFFFFF"), Ok(("", u32::MAX)));
    assert!(super::hexadecimal("100000000").is_err());
    assert!(super::hexadecimal("0x").is_err());
    assert!(super::hexadecimal("g").is_err());
    assert_eq!(super::hexadecimal("12 34"), Ok((" 34", 0x12)));
}


#[test]
fn line_endings() {
    assert_eq!(super::le("  # trailing\nnext"), Ok(("next", ())));
    assert_eq!(super::le("\r\nnext"), Ok(("next", ())));
    assert_eq!(super::le("  "), Ok(("", ())));
    assert!(super::le("x").is_err());
    assert!(super::empty_line("# no line ending").is_err());
    assert_eq!(super::empty_line("#\n"), Ok(("", ())));
}
