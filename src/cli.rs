//! Command-line flags

use clap::Parser;

use crate::config;

#[derive(Parser, Debug)]
#[command(name = "notify")]
#[command(about = "Displays text read from stdin in a pop-up notification window")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Window geometry as "<width>x<height>+<x>+<y>".
    /// Width or height 0 sizes the window to fit the text.
    /// Negative x/y are offsets from the right/bottom edge of the screen.
    #[arg(short = 'g', long, default_value = config::DEFAULT_GEOMETRY)]
    pub geometry: String,

    /// Font family, matched by the system font mapper (e.g. "Inconsolata")
    #[arg(short = 'f', long)]
    pub font: Option<String>,

    /// Font files as "<regular-font-path>,<bold-font-path>".
    /// Preferred over --font when both are given.
    #[arg(short = 'p', long)]
    pub font_paths: Option<String>,

    /// Font size
    #[arg(short = 's', long, default_value_t = config::DEFAULT_FONT_SIZE)]
    pub size: f64,

    /// Duration after which the notification closes ("3s", "1m30s"); 0 keeps it open
    #[arg(short = 'd', long, default_value = config::DEFAULT_DURATION)]
    pub duration: String,

    /// Background color as #rgb, #rrggbb or #rrggbbaa
    #[arg(short = 'B', long, default_value = config::DEFAULT_BACKGROUND)]
    pub background: String,

    /// Foreground color as #rgb, #rrggbb or #rrggbbaa
    #[arg(short = 'F', long, default_value = config::DEFAULT_FOREGROUND)]
    pub foreground: String,

    /// Border color as #rgb, #rrggbb or #rrggbbaa
    #[arg(short = 'C', long, default_value = config::DEFAULT_BORDER_COLOR)]
    pub border_color: String,

    /// Border width in pixels
    #[arg(short = 'b', long, default_value_t = config::DEFAULT_BORDER_WIDTH, allow_negative_numbers = true)]
    pub border_width: i32,

    /// String printed to stdout after the notification closes
    #[arg(short = 'e', long, default_value = config::DEFAULT_COMPLETION)]
    pub exec: String,
}
