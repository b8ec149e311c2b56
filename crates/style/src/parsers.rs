//! Low-level nom parser functions for CSS-like length values.
//!
//! Lengths are converted to points. Percentages stay relative until a basis is
//! known, see [`to_absolute`].

use crate::dimension::Dimension;
use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit0, digit1};
use nom::combinator::{map, map_res, opt, recognize, value};
use thiserror::Error;

/// Points per CSS pixel (96 dpi reference pixel).
const PT_PER_PX: f32 = 0.75;
/// Font size used to resolve `em`/`ex`, no font context exists at this level.
const DEFAULT_FONT_SIZE_PT: f32 = 12.0;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

/// A recognized length unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Pt,
    Px,
    In,
    Cm,
    Mm,
    Pc,
    Em,
    Ex,
}

impl LengthUnit {
    /// Multiplier converting one unit to points.
    pub fn points(self) -> f32 {
        match self {
            LengthUnit::Pt => 1.0,
            LengthUnit::Px => PT_PER_PX,
            LengthUnit::In => 72.0,
            LengthUnit::Cm => 72.0 / 2.54,
            LengthUnit::Mm => 72.0 / 25.4,
            LengthUnit::Pc => 12.0,
            LengthUnit::Em => DEFAULT_FONT_SIZE_PT,
            LengthUnit::Ex => DEFAULT_FONT_SIZE_PT / 2.0,
        }
    }
}

// --- Helper Parsers ---

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize((digit1, opt((char('.'), digit0)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

fn parse_unit(input: &str) -> IResult<&str, LengthUnit> {
    alt((
        value(LengthUnit::Pt, tag_no_case("pt")),
        value(LengthUnit::Px, tag_no_case("px")),
        value(LengthUnit::Pc, tag_no_case("pc")),
        value(LengthUnit::In, tag_no_case("in")),
        value(LengthUnit::Cm, tag_no_case("cm")),
        value(LengthUnit::Mm, tag_no_case("mm")),
        value(LengthUnit::Em, tag_no_case("em")),
        value(LengthUnit::Ex, tag_no_case("ex")),
    ))
    .parse(input)
}

// --- Unit & Dimension Parsers ---

/// Parses a length value with optional unit (e.g., "12pt", "1in", "10mm").
/// A bare number is taken as points.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    let (input, value) = parse_f32(input)?;
    let (input, unit) = opt(parse_unit).parse(input)?;
    Ok((input, value * unit.map_or(1.0, LengthUnit::points)))
}

/// Parses a dimension value (length, percentage, or "auto").
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    alt((
        value(Dimension::Auto, tag_no_case("auto")),
        map((parse_f32, char('%')), |(val, _)| Dimension::Percent(val)),
        map(parse_length, Dimension::Pt),
    ))
    .parse(input)
}

/// Runs a parser over the whole (trimmed) input, rejecting leftovers.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: FnMut(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

/// Converts a textual length to points, resolving percentages against `basis`.
///
/// `"10%"` with a basis of 200 yields 20, `"5pt"` yields 5 whatever the basis.
/// `auto` has no absolute value and is rejected.
pub fn to_absolute(text: &str, basis: f32) -> Result<f32, StyleParseError> {
    run_parser(parse_dimension, text)?
        .resolve(basis)
        .ok_or_else(|| StyleParseError::InvalidValue {
            property: "length".to_string(),
            value: text.trim().to_string(),
        })
}
