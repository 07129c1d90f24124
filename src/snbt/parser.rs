//! Leaf tokens of SNBT. Containers are handled by the recursive descent in
//! `de`, which only needs these to recognise where a number or bare word ends.

use nom::{
    branch::alt,
    bytes::complete::{is_a, tag_no_case},
    character::complete::{alphanumeric1, char, digit0, digit1, one_of},
    combinator::{map, opt, recognize},
    multi::many1,
    sequence::{pair, tuple},
    IResult,
};

/// A numeric literal: the number text and its optional type suffix. The
/// special floats need a `f` or `d` suffix, otherwise they are plain words.
pub fn number(input: &str) -> IResult<&str, (&str, Option<char>)> {
    alt((
        pair(special_float, map(one_of("fFdD"), Some)),
        pair(decimal, opt(one_of("bBsSlLfFdD"))),
    ))(input)
}

/// Unquoted string made of letters, digits and `_-.+`.
pub fn bare_word(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((alphanumeric1, is_a("_-.+")))))(input)
}

/// True if the number text has only an optional sign and digits.
pub fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn special_float(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(one_of("+-")),
        alt((
            tag_no_case("infinity"),
            tag_no_case("inf"),
            tag_no_case("nan"),
        )),
    ))(input)
}

// digits with an optional fraction, or a bare fraction, then an optional
// exponent. `1`, `1.`, `1.5`, `.5`, `-2.5e-3`.
fn decimal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}
