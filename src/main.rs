// The GDI backend is the only consumer of parts of the font and layout API
#![cfg_attr(not(windows), allow(dead_code))]

mod cli;
mod config;
mod error;
mod font;
mod layout;
mod parse;
mod popup;
#[cfg(windows)]
mod win32;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;
use font::FontSet;
use popup::Dismissal;

/// Exit status for anything that fails before the popup is dismissed
const EXIT_FAILURE: u8 = 2;

#[cfg(windows)]
fn open_display(fonts: &FontSet) -> Result<win32::GdiDisplay, error::PopupError> {
    win32::GdiDisplay::new(fonts)
}

#[cfg(not(windows))]
fn open_display(_fonts: &FontSet) -> Result<std::convert::Infallible, error::PopupError> {
    Err(error::PopupError::Unsupported)
}

fn run(cli: &Cli) -> anyhow::Result<Dismissal> {
    let config = Config::from_cli(cli).context("Invalid arguments")?;
    debug!(?config, "Configuration");

    let input = io::read_to_string(io::stdin()).context("Failed to read stdin")?;
    let notification = parse::parse_notification(&input);
    debug!(title = %notification.title, body_lines = notification.body.lines().count(), "Notification parsed");

    let fonts = FontSet::load(&config.font, config.font_size).context("Failed to load fonts")?;

    #[allow(unused_mut)]
    let mut display = open_display(&fonts).context("Failed to open display")?;
    #[cfg(windows)]
    {
        Ok(popup::show(&mut display, &config, &notification).context("Failed to show popup")?)
    }
    #[cfg(not(windows))]
    {
        match display {}
    }
}

/// Print the completion string (no newline) and pick the exit status
fn finish(out: &mut impl Write, completion: &str, result: anyhow::Result<Dismissal>) -> u8 {
    match result {
        Ok(dismissal) => {
            info!(?dismissal, "Done");
            if let Err(e) = out.write_all(completion.as_bytes()).and_then(|_| out.flush()) {
                error!("Failed to write completion: {e}");
                return EXIT_FAILURE;
            }
            dismissal.exit_code()
        }
        Err(e) => {
            error!("{e:#}");
            EXIT_FAILURE
        }
    }
}

fn main() -> ExitCode {
    // stdout carries the completion string; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = run(&cli);
    ExitCode::from(finish(&mut io::stdout().lock(), &cli.exec, result))
}
