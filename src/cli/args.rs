//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::TitleStrategy;
use crate::config::{Config, MAX_FPS};

/// Parse and validate frame rate (1-60 fps)
fn parse_fps(s: &str) -> Result<u32, String> {
    let fps: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid frame rate", s))?;
    if !(1..=MAX_FPS).contains(&fps) {
        return Err(format!(
            "Frame rate must be between 1 and {} fps, got {}",
            MAX_FPS, fps
        ));
    }
    Ok(fps)
}

/// Scrolls the song currently loaded by the game across a segment display
#[derive(Parser, Debug)]
#[command(name = "seg-marquee")]
#[command(version, about = "Now-playing marquee on a simulated segment display", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Game log file to tail
    #[arg(long, short)]
    pub log: Option<PathBuf>,

    /// Title extraction strategy
    #[arg(long, short)]
    pub strategy: Option<TitleStrategy>,

    /// Display refresh rate (1-60 fps)
    #[arg(long, value_parser = parse_fps)]
    pub fps: Option<u32>,

    /// Encoding of the log and chart files (e.g. shift_jis, utf-8)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Transliterate titles on a background worker
    #[arg(long)]
    pub background: bool,

    /// Show titles without romanization
    #[arg(long)]
    pub no_transliteration: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// File for diagnostic output
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print how a title would be shown, without taking over the terminal
    Preview {
        /// Title as it appears in the chart
        title: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(log) = &self.log {
            config.log.path = Some(log.clone());
        }
        if let Some(strategy) = self.strategy {
            config.title.strategy = strategy.into();
        }
        if let Some(fps) = self.fps {
            config.display.fps = fps;
        }
        if let Some(encoding) = &self.encoding {
            config.log.encoding = encoding.clone();
        }
        if self.background {
            config.transliteration.background = true;
        }
        if self.no_transliteration {
            config.transliteration.enabled = false;
        }
        if let Some(diagnostics) = &self.diagnostics {
            config.logging.file = Some(diagnostics.clone());
        }
    }
}
