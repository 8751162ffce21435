//! Parsers for bitstreams

use nom::branch::alt;
use nom::character::complete::{space0, space1};
use nom::combinator::{eof, map, opt, value};
use nom::multi::many0;
use nom::sequence::{terminated, tuple};

use crate::address::GlobalAddress;
use crate::parsers::{IResult, comment, empty_line, hexadecimal, le};


/// Parse an entire bitstream
///
/// Blank lines and comments are skipped. The parser expects to consume the
/// entire input.
pub fn bitstream(input: &str) -> IResult<Vec<(GlobalAddress, u32)>> {
    let line = alt((map(terminated(entry, le), Some), value(None, empty_line)));
    let end = tuple((space0, opt(comment), eof));
    map(terminated(many0(line), end), |v| v.into_iter().flatten().collect())(input)
}


/// Parse a single `address data` pair
pub fn entry(input: &str) -> IResult<(GlobalAddress, u32)> {
    map(tuple((hexadecimal, space1, hexadecimal)), |(a, _, d)| (a.into(), d))(input)
}
