use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: u64 },
}
