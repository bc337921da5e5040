//! Bitstream codec: message framing and de-framing.
//!
//! A framed message is laid out as:
//!
//! ```text
//! [START_TOKEN 24 bits][message 8 bits/char][STOP_TOKEN 24 bits][0-2 zero bits]
//! ```
//!
//! Characters are written most significant bit first. The trailing zero bits
//! pad the stream to a multiple of three so it fills whole pixels.

use log::debug;

use crate::config::{BITS_PER_CHAR, CHANNELS, START_TOKEN, STOP_TOKEN, TOKEN_BITS};
use crate::error::{Result, StegError};

/// An ordered sequence of bits ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream(Vec<bool>);

impl Bitstream {
    /// Number of bits in the stream.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the stream holds no bits. Framed streams never are.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The bits as a slice.
    pub fn as_bits(&self) -> &[bool] {
        &self.0
    }

    /// Renders the stream as a string of `0` and `1`.
    pub fn to_bit_string(&self) -> String {
        self.0.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

impl AsRef<[bool]> for Bitstream {
    fn as_ref(&self) -> &[bool] {
        &self.0
    }
}

/// Appends the 8 bits of `byte`, most significant first.
fn push_byte(bits: &mut Vec<bool>, byte: u8) {
    for shift in (0..BITS_PER_CHAR).rev() {
        bits.push((byte >> shift) & 1 == 1);
    }
}

/// Returns the bit pattern of a token literal.
///
/// Token literals are ASCII, so each char is one byte.
pub fn token_bits(token: &str) -> Vec<bool> {
    let mut bits = Vec::with_capacity(token.len() * BITS_PER_CHAR);
    for byte in token.bytes() {
        push_byte(&mut bits, byte);
    }
    bits
}

/// Framed bit length of a message with `message_chars` characters.
pub fn framed_len(message_chars: usize) -> usize {
    let raw = 2 * TOKEN_BITS + message_chars * BITS_PER_CHAR;
    raw.div_ceil(CHANNELS) * CHANNELS
}

/// Frames a message into a bitstream.
///
/// Every character must have a code point below 256. Anything wider is
/// rejected rather than truncated, since truncation would corrupt the text.
pub fn frame(message: &str) -> Result<Bitstream> {
    let char_count = message.chars().count();
    let mut bits = Vec::with_capacity(framed_len(char_count));

    bits.extend(token_bits(START_TOKEN));

    for (index, character) in message.chars().enumerate() {
        let byte = u8::try_from(u32::from(character))
            .map_err(|_| StegError::UnsupportedCharacter { character, index })?;
        push_byte(&mut bits, byte);
    }

    bits.extend(token_bits(STOP_TOKEN));

    while bits.len() % CHANNELS != 0 {
        bits.push(false);
    }

    debug!(
        "Framed {} chars into {} bits ({} padding)",
        char_count,
        bits.len(),
        bits.len() - 2 * TOKEN_BITS - char_count * BITS_PER_CHAR
    );

    Ok(Bitstream(bits))
}

/// Decodes whole 8-bit groups into characters.
///
/// A trailing group shorter than 8 bits is dropped.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.chunks_exact(BITS_PER_CHAR)
        .map(|chunk| {
            let byte = chunk
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit));
            char::from(byte)
        })
        .collect()
}

/// Recovers the message from a located span.
///
/// `bits` starts with the start token and ends with the stop token. Both are
/// stripped and the remainder decoded. Spans too short to hold both tokens
/// decode to the empty message.
pub fn unframe(bits: &[bool]) -> String {
    if bits.len() < 2 * TOKEN_BITS {
        return String::new();
    }
    bits_to_string(&bits[TOKEN_BITS..bits.len() - TOKEN_BITS])
}
