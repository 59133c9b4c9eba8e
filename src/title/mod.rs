//! Song title extraction from log record payloads.
//!
//! The client logs the path of the chart it is loading. Two strategies turn
//! that path into a title: reading the chart's own `#TITLE` header, or
//! deriving the title from the file name alone.

mod chart_header;
mod file_name;

pub use chart_header::{ChartHeaderExtractor, read_chart_title};
pub use file_name::{FileNameExtractor, find_chart_path, title_from_path};

use encoding_rs::Encoding;
use serde::Deserialize;

/// Turns a record's `<message>` payload into a song title.
pub trait TitleExtractor: Send {
    /// Extract a non-empty title, or `None` if the message names no chart.
    fn extract_title(&self, message: &str) -> Option<String>;
}

/// Which extraction strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    ChartHeader,
    FileName,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::ChartHeader => "chart-header",
            Strategy::FileName => "file-name",
        }
    }

    /// Build the extractor for this strategy.
    pub fn extractor(self, encoding: &'static Encoding) -> Box<dyn TitleExtractor> {
        match self {
            Strategy::ChartHeader => Box::new(ChartHeaderExtractor::new(encoding)),
            Strategy::FileName => Box::new(FileNameExtractor),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
