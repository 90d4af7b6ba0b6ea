use thiserror::Error;

use crate::protocols::bits::BitError;

/// Errors returned by the Baudot text codec.
///
/// # Examples
/// ```
/// use sarsat_core::protocols::baudot::BaudotError;
///
/// let err = BaudotError::InvalidCode { code: 0 };
/// assert!(err.to_string().contains("invalid baudot code"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaudotError {
    #[error("invalid baudot code: {code:#08b}")]
    InvalidCode { code: u8 },
    #[error("character {character:?} has no {width}-bit baudot code")]
    UnsupportedCharacter { character: char, width: u32 },
    #[error("text {text:?} does not fit in {max} characters")]
    TextTooLong { text: String, max: usize },
    #[error(transparent)]
    Bits(#[from] BitError),
}
