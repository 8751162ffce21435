//! Parser utilities

#[cfg(test)]
mod tests;

use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_till, take_while1};
use nom::character::complete::{char, line_ending, space0};
use nom::combinator::{eof, map_res, opt, value};
use nom::error::context;
use nom::sequence::{preceded, tuple};

/// Result type for our (sub)parsers
pub type IResult<'i, O> = nom::IResult<&'i str, O, Error<'i>>;


/// Error type for our (sub)parsers
pub type Error<'i> = nom::error::VerboseError<&'i str>;


/// Parse a hexadecimal numeral
///
/// The numeral may be prefixed with `0x` or `0X`. Numerals not fitting into
/// 32 bits are rejected.
///
/// The returned parser will consume any spaces and tabs preceding the numeral.
pub fn hexadecimal(input: &str) -> IResult<u32> {
    context(
        "expected hexadecimal numeral",
        map_res(
            preceded(tuple((space0, opt(tag_no_case("0x")))), take_while1(|c: char| c.is_ascii_hexdigit())),
            |s| u32::from_str_radix(s, 16)
        )
    )(input)
}


/// Parse a comment
///
/// A comment starts with a `#` and extends to the end of the line. The line
/// ending itself is not consumed.
pub fn comment(input: &str) -> IResult<&str> {
    preceded(char('#'), take_till(|c: char| c == '\n' || c == '\r'))(input)
}


/// Parse the end of a line
///
/// The parser consumes trailing spaces and an optional comment, followed by
/// either a line ending or the end of the input.
pub fn le(input: &str) -> IResult<()> {
    value((), tuple((space0, opt(comment), alt((line_ending, eof)))))(input)
}


/// Parse an empty line
///
/// Unlike [le], this parser requires a line ending and will thus always
/// consume at least one character.
pub fn empty_line(input: &str) -> IResult<()> {
    value((), tuple((space0, opt(comment), line_ending)))(input)
}
