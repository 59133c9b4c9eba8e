//! Record framing over a log file that is still being written.
//!
//! The framer reads complete lines from its source, accumulates them into
//! the single open record, and hands the record's `<message>` payload back
//! once a line containing the closing `</record>` tag arrives. Bytes after
//! the last newline are held back until the rest of the line is written, so
//! the records produced do not depend on how the writer chunked its output.

use encoding_rs::Encoding;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Line that closes a record.
pub const RECORD_END_TAG: &str = "</record>";

static MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<message>(.*?)</message>").expect("message pattern is valid")
});

/// Result of one framer poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramerEvent {
    /// No complete line is available yet.
    NoData,
    /// A line was appended to the open record.
    Line,
    /// A record closed. Holds its `<message>` payload, if it had one.
    Record(Option<String>),
}

/// Errors that end the stream.
#[derive(Debug, thiserror::Error)]
pub enum FramerError {
    #[error("failed to open log file '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read log file: {0}")]
    Io(#[from] io::Error),
    #[error("log file '{path}' disappeared")]
    Vanished { path: PathBuf },
    #[error("log file '{path}' was truncated ({len} bytes, already read {offset})")]
    Truncated { path: PathBuf, offset: u64, len: u64 },
}

/// Extract the `<message>` payload of a complete record.
pub fn extract_message(record: &str) -> Option<String> {
    MESSAGE_RE
        .captures(record)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Frames records out of an append-only byte source.
pub struct RecordFramer<R> {
    reader: R,
    encoding: &'static Encoding,
    /// Bytes consumed from the source, including any held partial line.
    offset: u64,
    /// Tail of the source not yet terminated by a newline.
    partial: Vec<u8>,
    /// Text of the record currently open.
    record: String,
    /// File to stat on idle polls when reading from disk.
    watched: Option<PathBuf>,
}

impl RecordFramer<BufReader<File>> {
    /// Open `path` positioned at its current end, so only records written
    /// after this call are observed.
    pub fn open_at_end(path: &Path, encoding: &'static Encoding) -> Result<Self, FramerError> {
        let mut file = File::open(path).map_err(|source| FramerError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let offset = file.seek(SeekFrom::End(0))?;
        log::info!("Tailing {} from byte {}", path.display(), offset);

        let mut framer = Self::new(BufReader::new(file), encoding);
        framer.offset = offset;
        framer.watched = Some(path.to_path_buf());
        Ok(framer)
    }
}

impl<R: BufRead> RecordFramer<R> {
    /// Frame records from an arbitrary reader, starting at its current position.
    pub fn new(reader: R, encoding: &'static Encoding) -> Self {
        Self {
            reader,
            encoding,
            offset: 0,
            partial: Vec::new(),
            record: String::new(),
            watched: None,
        }
    }

    /// Read at most one line and advance the open record.
    ///
    /// Never blocks waiting for the writer: when no complete line is
    /// available this returns [`FramerEvent::NoData`].
    pub fn poll(&mut self) -> Result<FramerEvent, FramerError> {
        let read = self.reader.read_until(b'\n', &mut self.partial)?;
        self.offset += read as u64;

        if self.partial.last() != Some(&b'\n') {
            if read == 0 {
                self.check_source()?;
            }
            return Ok(FramerEvent::NoData);
        }

        let (line, _) = self.encoding.decode_without_bom_handling(&self.partial);
        let line = line.into_owned();
        self.record.push_str(&line);
        self.partial.clear();

        if line.contains(RECORD_END_TAG) {
            let message = extract_message(&self.record);
            self.record.clear();
            return Ok(FramerEvent::Record(message));
        }
        Ok(FramerEvent::Line)
    }

    /// Bytes consumed from the source so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether a record has started but not yet closed.
    pub fn has_open_record(&self) -> bool {
        !self.record.is_empty() || !self.partial.is_empty()
    }

    fn check_source(&self) -> Result<(), FramerError> {
        let Some(path) = &self.watched else {
            return Ok(());
        };
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FramerError::Vanished { path: path.clone() });
            }
            Err(e) => return Err(FramerError::Io(e)),
        };
        if metadata.len() < self.offset {
            return Err(FramerError::Truncated {
                path: path.clone(),
                offset: self.offset,
                len: metadata.len(),
            });
        }
        Ok(())
    }
}
