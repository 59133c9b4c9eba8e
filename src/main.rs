use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use tokio::runtime::Handle;

use seg_marquee::cli::{Args, Command, handle_config_action, preview};
use seg_marquee::config::{self, Config, Settings};
use seg_marquee::display_loop::DisplayLoop;
use seg_marquee::framer::RecordFramer;
use seg_marquee::input::setup_signal_handler;
use seg_marquee::terminal::TerminalSink;
use seg_marquee::transliterate::{
    BackgroundResolver, IdentityEngine, InlineResolver, KakasiEngine, TransliterationEngine,
    Transliterator,
};

/// The display could not take over the terminal.
const EXIT_DISPLAY_UNAVAILABLE: u8 = 1;
/// Configuration could not be loaded or is invalid.
const EXIT_CONFIG: u8 = 2;
/// The log became unreadable while running.
const EXIT_STREAM: u8 = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    let mut config = match Config::load(Some(&config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    args.apply(&mut config);

    match args.command {
        Some(Command::Config { action }) => {
            handle_config_action(action, &config, &config_path);
            return ExitCode::SUCCESS;
        }
        Some(Command::Preview { title }) => {
            preview(&title, config.transliteration.enabled);
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let settings = match Settings::from_config(&config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    init_logging(&settings.log_file);

    if !settings.log_path.exists() {
        eprintln!("Error: Log file not found at {}", settings.log_path.display());
        return ExitCode::SUCCESS;
    }

    let framer = match RecordFramer::open_at_end(&settings.log_path, settings.encoding) {
        Ok(framer) => framer,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_STREAM);
        }
    };

    if let Err(e) = setup_signal_handler() {
        log::warn!("Could not install signal handler: {}", e);
    }

    let sink = match TerminalSink::new(settings.style) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Error: Cannot open the segment display on this terminal: {}", e);
            return ExitCode::from(EXIT_DISPLAY_UNAVAILABLE);
        }
    };

    log::info!(
        "Starting: log={} encoding={} strategy={} fps={} transliteration={} background={}",
        settings.log_path.display(),
        settings.encoding.name(),
        settings.strategy,
        settings.fps,
        settings.transliterate,
        settings.background,
    );

    let extractor = settings.strategy.extractor(settings.encoding);
    let engine: Box<dyn TransliterationEngine> = if settings.transliterate {
        Box::new(KakasiEngine)
    } else {
        Box::new(IdentityEngine)
    };
    let transliterator = Transliterator::new(engine);

    let result = if settings.background {
        let resolver = BackgroundResolver::new(transliterator, Handle::current());
        DisplayLoop::new(framer, extractor, resolver, sink)
            .run(settings.fps)
            .await
    } else {
        let resolver = InlineResolver::new(transliterator);
        DisplayLoop::new(framer, extractor, resolver, sink)
            .run(settings.fps)
            .await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Stopping: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_STREAM)
        }
    }
}

/// Send diagnostics to `path`, or warnings to stderr if it cannot be opened.
fn init_logging(path: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!(
                "Warning: cannot open diagnostics file {}: {}",
                path.display(),
                e
            );
            builder.filter_level(log::LevelFilter::Warn);
        }
    }
    builder.init();
}
