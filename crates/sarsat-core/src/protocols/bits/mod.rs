//! MSB-first bit cursor.
//!
//! `BitReader` walks a borrowed byte slice one bit at a time without touching
//! the underlying buffer, so the same bytes can be decoded any number of
//! times. `BitWriter` is its mirror image and grows its buffer one byte at a
//! time. Both are forward-only; there is no seek or rewind.

mod error;
mod reader;
mod writer;

pub use error::BitError;
pub use reader::BitReader;
pub use writer::BitWriter;

/// Widest value a single `read_bits`/`write_bits` call can carry.
pub const MAX_WIDTH: u32 = u64::BITS;
