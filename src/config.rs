//! Immutable run configuration, built once from the command line

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::{ConfigError, ParseError};
use crate::font::FontSource;
use crate::layout::{Position, SizeMode};
use crate::parse::{Color, parse_color, parse_dimension, parse_duration};

// ========== Defaults ==========

pub const DEFAULT_GEOMETRY: &str = "0x0+20+20";
pub const DEFAULT_FONT_SIZE: f64 = 30.0;
pub const DEFAULT_DURATION: &str = "3s";
pub const DEFAULT_BACKGROUND: &str = "#000";
pub const DEFAULT_FOREGROUND: &str = "#fff";
pub const DEFAULT_BORDER_COLOR: &str = "#fff";
pub const DEFAULT_BORDER_WIDTH: i32 = 4;
pub const DEFAULT_COMPLETION: &str = "echo 'done'";

/// Largest window extent, offset or border accepted from the command line
pub const MAX_PIXELS: i32 = 65_535;

/// Everything the popup needs, validated
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub size: SizeMode,
    pub position: Position,
    pub font: FontSource,
    pub font_size: f64,
    /// `None` = until clicked
    pub duration: Option<Duration>,
    pub background: Color,
    pub foreground: Color,
    pub border_color: Color,
    pub border_width: i32,
    pub completion: String,
}

/// Round to whole pixels within `min..=MAX_PIXELS`; NaN and overflow are rejected
fn pixels(value: f64, min: i32) -> Option<i32> {
    let value = value.round();
    (value >= f64::from(min) && value <= f64::from(MAX_PIXELS)).then_some(value as i32)
}

fn flag<T>(flag: &'static str, parsed: Result<T, ParseError>) -> Result<T, ConfigError> {
    parsed.map_err(|source| ConfigError::Flag { flag, source })
}

/// `<regular>[,<bold>]`; a single path serves both faces
fn font_paths(raw: &str) -> Result<FontSource, ConfigError> {
    let (regular, bold) = raw.split_once(',').unwrap_or((raw, raw));
    let (regular, bold) = (regular.trim(), bold.trim());
    if regular.is_empty() || bold.is_empty() {
        return Err(ConfigError::FontPaths(raw.to_string()));
    }
    Ok(FontSource::Files {
        regular: PathBuf::from(regular),
        bold: PathBuf::from(bold),
    })
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let dim = flag("--geometry", parse_dimension(&cli.geometry))?;
        let (width, height) = match (pixels(dim.width, 0), pixels(dim.height, 0)) {
            (Some(width), Some(height)) => (width, height),
            _ => {
                return Err(ConfigError::WindowSize {
                    width: dim.width,
                    height: dim.height,
                    max: MAX_PIXELS,
                });
            }
        };
        let position = match (pixels(dim.x, -MAX_PIXELS), pixels(dim.y, -MAX_PIXELS)) {
            (Some(x), Some(y)) => Position { x, y },
            _ => {
                return Err(ConfigError::WindowPosition {
                    x: dim.x,
                    y: dim.y,
                    max: MAX_PIXELS,
                });
            }
        };
        // decided on whole pixels, so a sub-pixel width still means auto
        let size = if width == 0 || height == 0 {
            SizeMode::Auto
        } else {
            SizeMode::Fixed { width, height }
        };

        if !cli.size.is_finite() || cli.size <= 0.0 {
            return Err(ConfigError::FontSize(cli.size));
        }
        if !(0..=MAX_PIXELS).contains(&cli.border_width) {
            return Err(ConfigError::BorderWidth {
                width: cli.border_width,
                max: MAX_PIXELS,
            });
        }

        // explicit files win over a family query
        let font = match (&cli.font_paths, &cli.font) {
            (Some(paths), _) if !paths.is_empty() => font_paths(paths)?,
            (_, Some(family)) if !family.is_empty() => FontSource::Family(family.clone()),
            _ => FontSource::Default,
        };

        Ok(Self {
            size,
            position,
            font,
            font_size: cli.size,
            duration: flag("--duration", parse_duration(&cli.duration))?,
            background: flag("--background", parse_color(&cli.background))?,
            foreground: flag("--foreground", parse_color(&cli.foreground))?,
            border_color: flag("--border-color", parse_color(&cli.border_color))?,
            border_width: cli.border_width,
            completion: cli.exec.clone(),
        })
    }
}
