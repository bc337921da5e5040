//! Error types for embedding and extraction.

use thiserror::Error;

/// Errors that can occur while hiding or recovering a message.
#[derive(Error, Debug)]
pub enum StegError {
    /// The framed message needs more channel slots than the carrier has.
    #[error("Message too large for carrier: need {needed} bits, have capacity for {capacity}")]
    Capacity {
        /// Framed bitstream length in bits.
        needed: usize,
        /// Available channel slots (width * height * 3).
        capacity: usize,
    },

    /// The start token is missing: the carrier was never encoded.
    #[error("Not a valid carrier file: start token not found")]
    NotEncoded,

    /// The start token is present but the stop token never appears.
    #[error("Stop token not found: carrier is corrupted or truncated")]
    StopTokenNotFound,

    /// File extension or codec outside the supported set.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// A message character does not fit in 8 bits.
    #[error("Character {character:?} at position {index} does not fit in 8 bits")]
    UnsupportedCharacter {
        /// The offending character.
        character: char,
        /// Its character index in the message.
        index: usize,
    },

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Image save error: {0}")]
    ImageSave(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, StegError>;
