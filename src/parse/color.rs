//! Hex colors: `#rgb`, `#rrggbb`, `#rrggbbaa`

use std::fmt;

use crate::error::ParseError;

/// 8-bit-per-channel RGBA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

fn nibble(input: &str, c: char) -> Result<u8, ParseError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| ParseError::ColorDigit {
            input: input.to_string(),
            digit: c,
        })
}

/// Parse `#rgb` (nibbles duplicated), `#rrggbb` or `#rrggbbaa`.
/// Short forms are fully opaque.
pub fn parse_color(input: &str) -> Result<Color, ParseError> {
    let len = input.chars().count();
    if !matches!(len, 4 | 7 | 9) {
        return Err(ParseError::ColorLength {
            input: input.to_string(),
            len,
        });
    }
    let Some(hex) = input.strip_prefix('#') else {
        return Err(ParseError::ColorPrefix {
            input: input.to_string(),
        });
    };

    let nibbles = hex
        .chars()
        .map(|c| nibble(input, c))
        .collect::<Result<Vec<u8>, _>>()?;

    let channels: Vec<u8> = if nibbles.len() == 3 {
        nibbles.iter().map(|n| (n << 4) | n).collect()
    } else {
        nibbles.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect()
    };

    Ok(Color {
        r: channels[0],
        g: channels[1],
        b: channels[2],
        a: channels.get(3).copied().unwrap_or(0xff),
    })
}
