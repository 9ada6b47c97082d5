//! Window geometry: `<width>x<height>+<x>+<y>`

use std::fmt;

use super::cursor::Cursor;
use crate::error::ParseError;

/// Parsed window geometry. Zero width or height means "fit the text".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl Dimension {
    /// True when the window should be sized to its text
    pub fn is_auto(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Empty field → 0
fn parse_field(input: &str, field: &'static str, token: &str) -> Result<f64, ParseError> {
    if token.is_empty() {
        return Ok(0.0);
    }
    token
        .parse::<f64>()
        .map_err(|source| ParseError::DimensionField {
            input: input.to_string(),
            field,
            source,
        })
}

/// Parse geometry strictly left to right.
///
/// Width runs up to `x`, height up to the first `+`, x up to the next `+` and
/// y takes the rest, so a sign after a delimiter belongs to the number.
pub fn parse_dimension<'a>(input: &'a str) -> Result<Dimension, ParseError> {
    let delimited = |cursor: Cursor<'a>, delim: char, field: &'static str| {
        cursor
            .lex_until(delim)
            .map_err(|source| ParseError::DimensionDelimiter {
                input: input.to_string(),
                field,
                source,
            })
    };

    let cursor = Cursor::new(input);
    let (width, cursor) = delimited(cursor, 'x', "width")?;
    let (height, cursor) = delimited(cursor, '+', "height")?;
    let (x, cursor) = delimited(cursor, '+', "x position")?;
    let y = cursor.remaining();

    Ok(Dimension {
        width: parse_field(input, "width", width)?,
        height: parse_field(input, "height", height)?,
        x: parse_field(input, "x position", x)?,
        y: parse_field(input, "y position", y)?,
    })
}
