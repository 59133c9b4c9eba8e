//! Configuration file handling for seg-marquee.
//!
//! Loads configuration from `~/.config/seg-marquee/config.toml` or a custom path.
//! Command-line flags are applied on top of the loaded [`Config`], then
//! [`Settings::from_config`] validates the result.

use encoding_rs::Encoding;
use ratatui::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::terminal::SegmentStyle;
use crate::title::Strategy;

/// Frames per second when nothing else is configured.
pub const DEFAULT_FPS: u32 = 5;
/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 60;

/// Configuration file structure for seg-marquee.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub title: TitleConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub transliteration: TransliterationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The game log being tailed.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub path: Option<PathBuf>,
    /// WHATWG encoding label of the log and chart files
    pub encoding: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: None,
            encoding: "shift_jis".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct TitleConfig {
    pub strategy: Strategy,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub fps: u32,
    pub on_color: [u8; 3],
    pub off_color: [u8; 3],
    pub off_glyph: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            on_color: [255, 0, 0],
            off_color: [50, 0, 0],
            off_glyph: '~',
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TransliterationConfig {
    pub enabled: bool,
    /// Run the engine off the render loop
    pub background: bool,
}

impl Default for TransliterationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            background: false,
        }
    }
}

/// Where diagnostics go. The terminal itself is taken by the display.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

/// Validated settings the application runs with.
#[derive(Debug, Clone)]
pub struct Settings {
    pub log_path: PathBuf,
    pub encoding: &'static Encoding,
    pub strategy: Strategy,
    pub fps: u32,
    pub style: SegmentStyle,
    pub transliterate: bool,
    pub background: bool,
    pub log_file: PathBuf,
}

impl Settings {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let log_path = config.log.path.clone().ok_or(ConfigError::MissingLogPath)?;

        let encoding = Encoding::for_label(config.log.encoding.as_bytes()).ok_or_else(|| {
            ConfigError::Invalid {
                field: "log.encoding",
                message: format!("unknown encoding '{}'", config.log.encoding),
            }
        })?;

        let fps = config.display.fps;
        if !(1..=MAX_FPS).contains(&fps) {
            return Err(ConfigError::Invalid {
                field: "display.fps",
                message: format!("must be between 1 and {}, got {}", MAX_FPS, fps),
            });
        }

        let [r, g, b] = config.display.on_color;
        let [or, og, ob] = config.display.off_color;
        let style = SegmentStyle {
            on: Color::Rgb(r, g, b),
            off: Color::Rgb(or, og, ob),
            off_glyph: config.display.off_glyph,
        };

        Ok(Self {
            log_path,
            encoding,
            strategy: config.title.strategy,
            fps,
            style,
            transliterate: config.transliteration.enabled,
            background: config.transliteration.background,
            log_file: config.logging.file.clone().unwrap_or_else(default_log_file),
        })
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    MissingLogPath,
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::MissingLogPath => {
                write!(
                    f,
                    "No log file configured. Pass --log or set [log] path in {}",
                    default_path().display()
                )
            }
            ConfigError::Invalid { field, message } => {
                write!(f, "Invalid setting '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("seg-marquee").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/seg-marquee/config.toml")
        })
}

/// Get the default diagnostic log path.
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("seg-marquee")
        .join("seg-marquee.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, UTF_8};
    use tempfile::TempDir;

    fn with_log(mut config: Config) -> Config {
        config.log.path = Some(PathBuf::from("/tmp/beatoraja_log.xml"));
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log.encoding, "shift_jis");
        assert_eq!(config.title.strategy, Strategy::ChartHeader);
        assert_eq!(config.display.fps, 5);
        assert_eq!(config.display.off_glyph, '~');
        assert!(config.transliteration.enabled);
        assert!(!config.transliteration.background);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: Config = toml::from_str(
            r#"
[log]
path = "C:/beatoraja/beatoraja_log.xml"

[title]
strategy = "file-name"

[display]
fps = 10
on_color = [0, 255, 0]
"#,
        )
        .unwrap();
        assert_eq!(
            config.log.path.as_deref(),
            Some(Path::new("C:/beatoraja/beatoraja_log.xml"))
        );
        assert_eq!(config.log.encoding, "shift_jis");
        assert_eq!(config.title.strategy, Strategy::FileName);
        assert_eq!(config.display.fps, 10);
        assert_eq!(config.display.on_color, [0, 255, 0]);
        assert_eq!(config.display.off_color, [50, 0, 0]);
        assert!(config.transliteration.enabled);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nfps = \"fast\"\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_settings_require_log_path() {
        let err = Settings::from_config(&Config::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingLogPath));
    }

    #[test]
    fn test_settings_resolve_encoding() {
        let settings = Settings::from_config(&with_log(Config::default())).unwrap();
        assert_eq!(settings.encoding, SHIFT_JIS);

        let mut config = with_log(Config::default());
        config.log.encoding = "utf-8".to_string();
        assert_eq!(Settings::from_config(&config).unwrap().encoding, UTF_8);

        config.log.encoding = "klingon".to_string();
        let err = Settings::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "log.encoding", .. }));
    }

    #[test]
    fn test_settings_reject_bad_fps() {
        let mut config = with_log(Config::default());
        config.display.fps = 0;
        assert!(Settings::from_config(&config).is_err());
        config.display.fps = MAX_FPS + 1;
        assert!(Settings::from_config(&config).is_err());
    }

    #[test]
    fn test_settings_style_from_colors() {
        let settings = Settings::from_config(&with_log(Config::default())).unwrap();
        assert_eq!(settings.style, SegmentStyle::default());
    }

    #[test]
    fn test_default_path_structure() {
        let path = default_path();
        assert!(path.ends_with("seg-marquee/config.toml"));
        assert!(default_log_file().ends_with("seg-marquee/seg-marquee.log"));
    }
}
