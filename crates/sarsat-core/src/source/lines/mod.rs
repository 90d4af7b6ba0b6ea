//! Line-oriented hex-id source.
//!
//! Reads one beacon identifier per line from a text file or any `BufRead`.
//! Blank lines and `#` comments are skipped; everything else is handed to the
//! decoder untouched so malformed ids surface as decode failures.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{LineFileSource, LineSource};
