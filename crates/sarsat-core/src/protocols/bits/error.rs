use thiserror::Error;

/// Errors returned by the MSB-first bit cursor.
///
/// # Examples
/// ```
/// use sarsat_core::protocols::bits::BitError;
///
/// let err = BitError::Exhausted { needed: 4, remaining: 2 };
/// assert!(err.to_string().contains("bitstream exhausted"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitError {
    #[error("bitstream exhausted: need {needed} bits, got {remaining}")]
    Exhausted { needed: usize, remaining: usize },
    #[error("bit width too large: {bits} (max 64)")]
    TooWide { bits: u32 },
}
