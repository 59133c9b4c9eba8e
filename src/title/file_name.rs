//! Title derived from the chart's file name.

use regex::Regex;
use std::sync::LazyLock;

use super::TitleExtractor;

/// Path starting at a drive letter or separator, e.g. `C:\songs\a.bms`, `/songs/a.bme`.
static CHART_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)((?:\b[a-z]:)?[\\/].*?\.(?:bms|bme))\b")
        .expect("chart path pattern is valid")
});

/// Bare file name with no directory part.
static CHART_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(.*?\.(?:bms|bme))\b").expect("chart name pattern is valid")
});

static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("annotation pattern is valid"));

/// Find the first `.bms`/`.bme` path in a log message.
///
/// The path starts at its drive letter or first separator, so text logged
/// before it is skipped. A name without any directory runs from the start
/// of its line.
pub fn find_chart_path(message: &str) -> Option<&str> {
    CHART_PATH_RE
        .captures(message)
        .or_else(|| CHART_NAME_RE.captures(message))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|path| !path.is_empty())
}

/// Title from a chart path: the file stem with `[...]` annotations removed.
pub fn title_from_path(path: &str) -> Option<String> {
    let file_name = path.rsplit(['\\', '/']).next().unwrap_or(path);
    let stem = match file_name.rfind('.') {
        Some(dot) => &file_name[..dot],
        None => file_name,
    };
    let title = ANNOTATION_RE.replace_all(stem, "");
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Extracts titles from file names without touching the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileNameExtractor;

impl TitleExtractor for FileNameExtractor {
    fn extract_title(&self, message: &str) -> Option<String> {
        find_chart_path(message).and_then(title_from_path)
    }
}
