use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::source::{HexIdEvent, HexIdSource, SourceError};

use super::error::LineSourceError;
use super::layout;
use super::reader::hex_id_from_line;

/// Hex-id source over any buffered reader.
pub struct LineSource<R> {
    reader: R,
    line: u64,
    buf: String,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    fn next_event(&mut self) -> Result<Option<HexIdEvent>, LineSourceError> {
        loop {
            self.buf.clear();
            self.line += 1;
            let read = self.reader.read_line(&mut self.buf).map_err(|err| {
                if err.kind() == ErrorKind::InvalidData {
                    LineSourceError::InvalidUtf8 { line: self.line }
                } else {
                    LineSourceError::Io(err)
                }
            })?;
            if read == 0 {
                return Ok(None);
            }
            if let Some(hex_id) = hex_id_from_line(&self.buf) {
                return Ok(Some(HexIdEvent {
                    line: self.line,
                    hex_id: hex_id.to_string(),
                }));
            }
        }
    }
}

impl<R: BufRead> HexIdSource for LineSource<R> {
    fn next_hex_id(&mut self) -> Result<Option<HexIdEvent>, SourceError> {
        self.next_event().map_err(SourceError::from)
    }
}

/// Hex-id source backed by a text file, one identifier per line.
pub struct LineFileSource {
    inner: LineSource<BufReader<File>>,
}

impl LineFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(SourceError::from)?;
        let reader = BufReader::with_capacity(layout::READER_BUFFER_SIZE, file);
        Ok(Self {
            inner: LineSource::new(reader),
        })
    }
}

impl HexIdSource for LineFileSource {
    fn next_hex_id(&mut self) -> Result<Option<HexIdEvent>, SourceError> {
        self.inner.next_hex_id()
    }
}
