//! Subcommand handlers for config actions and title previews.

use std::path::Path;

use super::args::ConfigAction;
use crate::config::{Config, Settings};
use crate::marquee::MarqueeState;
use crate::normalize::normalize;
use crate::transliterate::{IdentityEngine, KakasiEngine, TransliterationEngine, Transliterator};

const DEFAULT_CONFIG: &str = r#"# seg-marquee configuration

[log]
# Game log to tail (beatoraja writes beatoraja_log.xml next to the executable)
# path = "C:/games/beatoraja/beatoraja_log.xml"
# Encoding of the log and chart files
encoding = "shift_jis"

[title]
# chart-header: read #TITLE from the chart, falling back to the file name
# file-name: use the chart file name only
strategy = "chart-header"

[display]
# Frames per second; one scroll step per frame
fps = 5
# Lit and unlit segment colours as [r, g, b]
on_color = [255, 0, 0]
off_color = [50, 0, 0]
# Glyph drawn for unlit cells
off_glyph = "~"

[transliteration]
# Romanize Japanese titles
enabled = true
# Run romanization off the render loop
background = false

[logging]
# Diagnostic log (the terminal is used by the display)
# file = "/tmp/seg-marquee.log"
"#;

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config: &Config, config_path: &Path) {
    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            match &config.log.path {
                Some(path) => println!("  Log file: {}", path.display()),
                None => println!("  Log file: (not set)"),
            }
            println!("  Encoding: {}", config.log.encoding);
            println!("  Strategy: {}", config.title.strategy);
            println!("  FPS: {}", config.display.fps);
            println!("  On colour: {:?}", config.display.on_color);
            println!("  Off colour: {:?}", config.display.off_color);
            println!("  Off glyph: {}", config.display.off_glyph);
            println!(
                "  Transliteration: {}",
                match (config.transliteration.enabled, config.transliteration.background) {
                    (false, _) => "off",
                    (true, false) => "on",
                    (true, true) => "on (background)",
                }
            );
            if let Ok(settings) = Settings::from_config(config) {
                println!("  Diagnostics: {}", settings.log_file.display());
            }
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'seg-marquee config show' to view current settings.");
                std::process::exit(1);
            }

            // Create parent directories if needed
            if let Some(parent) = config_path.parent()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                eprintln!("Error creating config directory: {}", e);
                std::process::exit(1);
            }

            if let Err(e) = std::fs::write(config_path, DEFAULT_CONFIG) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}

/// Print the normalized and rendered forms of `title` and one full scroll
/// period of display windows.
pub fn preview(title: &str, transliterate: bool) {
    let engine: Box<dyn TransliterationEngine> = if transliterate {
        Box::new(KakasiEngine)
    } else {
        Box::new(IdentityEngine)
    };
    let rendered = Transliterator::new(engine).transliterate(title);

    println!("Raw:        {}", title);
    println!("Normalized: {}", normalize(title));
    println!("Rendered:   {}", rendered);
    println!();

    let marquee = MarqueeState::new(&rendered);
    let period = marquee.period();
    for window in marquee.take(period) {
        println!("[{}]", window);
    }
}
