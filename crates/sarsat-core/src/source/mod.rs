mod lines;

pub use lines::{LineFileSource, LineSource};

use thiserror::Error;

/// One candidate beacon identifier pulled from an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexIdEvent {
    /// 1-based line number in the input.
    pub line: u64,
    pub hex_id: String,
}

pub trait HexIdSource {
    fn next_hex_id(&mut self) -> Result<Option<HexIdEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input error: {0}")]
    Input(String),
}

impl From<lines::error::LineSourceError> for SourceError {
    fn from(value: lines::error::LineSourceError) -> Self {
        match value {
            lines::error::LineSourceError::Io(err) => SourceError::Io(err),
            err @ lines::error::LineSourceError::InvalidUtf8 { .. } => {
                SourceError::Input(err.to_string())
            }
        }
    }
}
