//! Title read from the chart file's `#TITLE` header.

use encoding_rs::Encoding;
use std::io;
use std::path::Path;

use super::TitleExtractor;
use super::file_name::{find_chart_path, title_from_path};

const TITLE_HEADER: &str = "#TITLE";

/// Read the `#TITLE` header of the chart at `path`.
///
/// Returns `Ok(None)` when the file has no usable header.
pub fn read_chart_title(path: &Path, encoding: &'static Encoding) -> io::Result<Option<String>> {
    let bytes = std::fs::read(path)?;
    let (text, _, _) = encoding.decode(&bytes);

    let title = text.lines().find_map(|line| {
        let rest = line.trim().strip_prefix(TITLE_HEADER)?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let title = rest.trim();
        (!title.is_empty()).then(|| title.to_string())
    });
    Ok(title)
}

/// Extracts titles from the referenced chart, falling back to the file name.
#[derive(Debug, Clone, Copy)]
pub struct ChartHeaderExtractor {
    encoding: &'static Encoding,
}

impl ChartHeaderExtractor {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }
}

impl TitleExtractor for ChartHeaderExtractor {
    fn extract_title(&self, message: &str) -> Option<String> {
        let path = find_chart_path(message)?;
        match read_chart_title(Path::new(path), self.encoding) {
            Ok(Some(title)) => return Some(title),
            Ok(None) => log::debug!("No {} header in {}", TITLE_HEADER, path),
            Err(e) => log::debug!("Could not read chart {}: {}", path, e),
        }
        title_from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::SHIFT_JIS;
    use tempfile::TempDir;

    fn write_chart(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let (bytes, _, _) = SHIFT_JIS.encode(body);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_reads_title_header() {
        let dir = TempDir::new().unwrap();
        let path = write_chart(
            &dir,
            "[H]song.bms",
            "*---HEADER\n#PLAYER 1\n#GENRE PIANO\n#TITLE ☆ピアノ協奏曲\n#ARTIST someone\n",
        );
        let message = format!("{}", path.display());
        let title = ChartHeaderExtractor::new(SHIFT_JIS).extract_title(&message);
        assert_eq!(title.as_deref(), Some("☆ピアノ協奏曲"));
    }

    #[test]
    fn test_subtitle_like_headers_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_chart(&dir, "a.bme", "#TITLE2 nope\n#TITLE  Real Title  \r\n");
        assert_eq!(
            read_chart_title(&path, SHIFT_JIS).unwrap().as_deref(),
            Some("Real Title")
        );
    }

    #[test]
    fn test_reads_header_when_message_has_prefix() {
        let dir = TempDir::new().unwrap();
        let path = write_chart(&dir, "y.bms", "#TITLE Real\n");
        let message = format!("Loading chart : {}", path.display());
        let title = ChartHeaderExtractor::new(SHIFT_JIS).extract_title(&message);
        assert_eq!(title.as_deref(), Some("Real"));
    }

    #[test]
    fn test_missing_header_falls_back_to_file_name() {
        let dir = TempDir::new().unwrap();
        let path = write_chart(&dir, "[ANOTHER]Fallback.bms", "#ARTIST x\n#BPM 150\n");
        let title = ChartHeaderExtractor::new(SHIFT_JIS).extract_title(&path.display().to_string());
        assert_eq!(title.as_deref(), Some("Fallback"));
    }

    #[test]
    fn test_unreadable_chart_falls_back_to_file_name() {
        let title = ChartHeaderExtractor::new(SHIFT_JIS)
            .extract_title(r"C:\does\not\exist\[Another]BrokenHeart.bms");
        assert_eq!(title.as_deref(), Some("BrokenHeart"));
    }

    #[test]
    fn test_no_path_in_message() {
        assert_eq!(ChartHeaderExtractor::new(SHIFT_JIS).extract_title("no chart here"), None);
    }
}
