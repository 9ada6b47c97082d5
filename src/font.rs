//! Font selection: built-in face, system family lookup or explicit font files

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::FontError;

/// Face used when neither a family nor font files are given
pub const DEFAULT_FAMILY: &str = "Consolas";

/// Where the regular/bold pair comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Default,
    /// Matched by the OS font mapper
    Family(String),
    Files { regular: PathBuf, bold: PathBuf },
}

/// Text weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    /// CSS/GDI weight
    pub fn weight(self) -> i32 {
        match self {
            FontStyle::Regular => 400,
            FontStyle::Bold => 700,
        }
    }
}

/// One face, ready for a backend to instantiate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub family: String,
    pub style: FontStyle,
    /// Raw font file to register privately; `None` = installed system font
    pub data: Option<Vec<u8>>,
}

/// Regular + bold faces at one pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct FontSet {
    pub regular: FontFace,
    pub bold: FontFace,
    pub size: f64,
}

impl FontSet {
    pub fn face(&self, style: FontStyle) -> &FontFace {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }

    /// Resolve `source` into faces. Font files are read and validated here.
    pub fn load(source: &FontSource, size: f64) -> Result<Self, FontError> {
        let system = |family: &str, style| FontFace {
            family: family.to_string(),
            style,
            data: None,
        };

        let (regular, bold) = match source {
            FontSource::Default => (
                system(DEFAULT_FAMILY, FontStyle::Regular),
                system(DEFAULT_FAMILY, FontStyle::Bold),
            ),
            FontSource::Family(family) => (
                system(family, FontStyle::Regular),
                system(family, FontStyle::Bold),
            ),
            FontSource::Files { regular, bold } => (
                load_file(regular, FontStyle::Regular)?,
                load_file(bold, FontStyle::Bold)?,
            ),
        };

        info!(
            regular = %regular.family,
            bold = %bold.family,
            size,
            "Fonts resolved"
        );
        Ok(Self {
            regular,
            bold,
            size,
        })
    }
}

fn load_file(path: &Path, style: FontStyle) -> Result<FontFace, FontError> {
    let data = fs::read(path).map_err(|source| FontError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let format = sniff(&data).ok_or_else(|| FontError::UnsupportedFormat {
        path: path.to_path_buf(),
        magic: data.iter().take(4).copied().collect(),
    })?;
    let family = family_name(&data, format).map_err(|err| err.at(path))?;
    debug!(path = %path.display(), ?format, family = %family, "Font file loaded");
    Ok(FontFace {
        family,
        style,
        data: Some(data),
    })
}

// ========== OpenType Container ==========

/// Supported sfnt containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    TrueType,
    OpenType,
    Collection,
}

/// Identify the container from its magic number
pub fn sniff(data: &[u8]) -> Option<FontFormat> {
    match data.get(..4)? {
        b"\x00\x01\x00\x00" | b"true" => Some(FontFormat::TrueType),
        b"OTTO" => Some(FontFormat::OpenType),
        b"ttcf" => Some(FontFormat::Collection),
        _ => None,
    }
}

/// Table-level failure, before the path is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    Malformed(&'static str),
    NoFamilyName,
}

impl TableError {
    fn at(self, path: &Path) -> FontError {
        let path = path.to_path_buf();
        match self {
            TableError::Malformed(what) => FontError::Malformed { path, what },
            TableError::NoFamilyName => FontError::NoFamilyName { path },
        }
    }
}

const NAME_ID_FAMILY: u16 = 1;
const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_MAC: u16 = 1;
const PLATFORM_WINDOWS: u16 = 3;
const LANG_EN_US: u16 = 0x0409;

fn read_u16(data: &[u8], at: usize) -> Result<u16, TableError> {
    data.get(at..at + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or(TableError::Malformed("truncated table"))
}

fn read_u32(data: &[u8], at: usize) -> Result<u32, TableError> {
    data.get(at..at + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(TableError::Malformed("truncated table"))
}

/// Offset of the `name` table within the (first) font
fn name_table_offset(data: &[u8], format: FontFormat) -> Result<usize, TableError> {
    let font = match format {
        FontFormat::Collection => {
            if read_u32(data, 8)? == 0 {
                return Err(TableError::Malformed("empty font collection"));
            }
            read_u32(data, 12)? as usize
        }
        FontFormat::TrueType | FontFormat::OpenType => 0,
    };

    let num_tables = read_u16(data, font + 4)? as usize;
    for i in 0..num_tables {
        let record = font + 12 + i * 16;
        let tag = data
            .get(record..record + 4)
            .ok_or(TableError::Malformed("truncated table"))?;
        if tag == b"name" {
            return Ok(read_u32(data, record + 8)? as usize);
        }
    }
    Err(TableError::Malformed("missing name table"))
}

/// Family name (nameID 1). Windows en-US first, then any Windows/Unicode
/// record, then Mac Roman.
pub fn family_name(data: &[u8], format: FontFormat) -> Result<String, TableError> {
    let table = name_table_offset(data, format)?;
    let count = read_u16(data, table + 2)? as usize;
    let strings = table + read_u16(data, table + 4)? as usize;

    let mut best: Option<(u8, String)> = None;
    for i in 0..count {
        let record = table + 6 + i * 12;
        let platform = read_u16(data, record)?;
        let language = read_u16(data, record + 4)?;
        let name_id = read_u16(data, record + 6)?;
        if name_id != NAME_ID_FAMILY {
            continue;
        }
        let len = read_u16(data, record + 8)? as usize;
        let start = strings + read_u16(data, record + 10)? as usize;
        let bytes = data
            .get(start..start + len)
            .ok_or(TableError::Malformed("name string out of bounds"))?;

        let (rank, name) = match platform {
            PLATFORM_WINDOWS if language == LANG_EN_US => (0, decode_utf16be(bytes)),
            PLATFORM_WINDOWS | PLATFORM_UNICODE => (1, decode_utf16be(bytes)),
            // Mac Roman: ASCII subset is exact
            PLATFORM_MAC => (2, bytes.iter().map(|&b| b as char).collect()),
            _ => continue,
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            continue;
        }
        if best.as_ref().is_none_or(|(r, _)| rank < *r) {
            best = Some((rank, name));
        }
    }

    best.map(|(_, name)| name).ok_or(TableError::NoFamilyName)
}

fn decode_utf16be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
