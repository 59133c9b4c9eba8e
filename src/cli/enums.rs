//! CLI enum types.

use clap::ValueEnum;

use crate::title::Strategy;

/// How a chart path in the log becomes a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TitleStrategy {
    /// Read `#TITLE` from the chart, falling back to the file name
    #[default]
    ChartHeader,
    /// Use the chart's file name without opening it
    FileName,
}

impl From<TitleStrategy> for Strategy {
    fn from(s: TitleStrategy) -> Self {
        match s {
            TitleStrategy::ChartHeader => Strategy::ChartHeader,
            TitleStrategy::FileName => Strategy::FileName,
        }
    }
}
