//! # Stegtool - hide text in image pixels
//!
//! Stegtool embeds a text message in the least significant bits of a carrier
//! image's color channels and recovers it later.
//!
//! ## Overview
//!
//! - The message is **framed** between a start token `<!>` and a stop token
//!   `<?>`, 8 bits per character, padded to a multiple of 3 bits
//! - Bits are written **one per channel**, R then G then B, row by row
//! - Decoding checks the **start token** first and scans until the
//!   **stop token**, failing cleanly if it never appears
//! - Output is always **PNG**; lossy formats would destroy the message
//!
//! ## Example Usage
//!
//! ```rust
//! use image::RgbImage;
//! use stegtool::ImageStego;
//!
//! let mut stego = ImageStego::from_rgb(RgbImage::new(32, 32));
//! stego.hide("meet at noon").unwrap();
//!
//! assert!(stego.locate_start());
//! assert_eq!(stego.reveal().unwrap(), "meet at noon");
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: Message framing and de-framing
//! - [`stego`]: Pixel embedding, extraction and carrier file I/O
//! - [`config`]: Token literals, supported formats, output settings
//! - [`error`]: Error type

use std::path::{Path, PathBuf};

use log::debug;

pub mod codec;
pub mod config;
pub mod error;
pub mod stego;

pub use codec::{frame, framed_len, unframe, Bitstream};
pub use config::StegConfig;
pub use error::{Result, StegError};
pub use stego::{load_carrier, output_path, save_carrier, ImageStego};

/// Hides `message` in the carrier at `input` and writes the result.
///
/// Returns the path written. Nothing is written if embedding fails.
pub fn encode_file(input: &Path, message: &str, config: &StegConfig) -> Result<PathBuf> {
    let mut stego = load_carrier(input)?;

    let bitstream = frame(message)?;
    debug!("Secret message bits: {}", bitstream.to_bit_string());
    debug!(
        "Carrier capacity: {} bits, message needs {}",
        stego.capacity(),
        bitstream.len()
    );
    stego.embed(&bitstream)?;

    let output = output_path(input, config);
    save_carrier(stego.image(), &output)?;
    Ok(output)
}

/// Recovers the message hidden in the carrier at `input`.
pub fn decode_file(input: &Path) -> Result<String> {
    let stego = load_carrier(input)?;
    stego.reveal()
}
