//! Error types for notify-popup

use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

/// Cursor failures while lexing raw input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected end of input, expected {expected:?}")]
    UnexpectedEnd { expected: char },
}

/// Mini-language parse errors (fatal at start-up)
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not parse {field} of dimension {input:?}: {source}")]
    DimensionField {
        input: String,
        field: &'static str,
        #[source]
        source: ParseFloatError,
    },

    #[error("could not parse {field} of dimension {input:?}: {source}")]
    DimensionDelimiter {
        input: String,
        field: &'static str,
        #[source]
        source: LexError,
    },

    #[error("could not parse color {input:?}: expected 4, 7 or 9 characters, got {len}")]
    ColorLength { input: String, len: usize },

    #[error("could not parse color {input:?}: missing leading '#'")]
    ColorPrefix { input: String },

    #[error("could not parse color {input:?}: {digit:?} is not a hex digit")]
    ColorDigit { input: String, digit: char },

    #[error("could not parse duration {input:?}: {reason}")]
    Duration { input: String, reason: &'static str },
}

/// Command-line validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {flag}")]
    Flag {
        flag: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("window size must be between 0 and {max} pixels, got {width}x{height}")]
    WindowSize { width: f64, height: f64, max: i32 },

    #[error("window position must be between -{max} and {max} pixels, got {x},{y}")]
    WindowPosition { x: f64, y: f64, max: i32 },

    #[error("font size must be a positive number, got {0}")]
    FontSize(f64),

    #[error("border width must be between 0 and {max}, got {width}")]
    BorderWidth { width: i32, max: i32 },

    #[error("font paths must be \"<regular>[,<bold>]\", got {0:?}")]
    FontPaths(String),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontError {
    #[error("could not read font file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported font format in {path} (magic {magic:02x?})")]
    UnsupportedFormat { path: PathBuf, magic: Vec<u8> },

    #[error("malformed font file {path}: {what}")]
    Malformed { path: PathBuf, what: &'static str },

    #[error("font file {path} has no family name")]
    NoFamilyName { path: PathBuf },
}

/// Windowing backend errors
#[derive(Debug, Error)]
pub enum PopupError {
    #[error("RegisterClass failed")]
    RegisterClass,

    #[error("CreateWindow failed: {0}")]
    CreateWindow(String),

    #[error("CreateFont({family:?}) failed")]
    CreateFont { family: String },

    #[error("AddFontMemResource({family:?}) → ∅")]
    PrivateFont { family: String },

    #[error("no display backend for this platform")]
    Unsupported,
}
