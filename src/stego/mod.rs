//! Steganography module for hiding text in image carriers.
//!
//! Supports:
//! - LSB embedding and extraction over RGB channels
//! - Loading PNG, BMP and JPEG carriers, saving PNG

pub mod image;
pub mod io;

pub use self::image::ImageStego;
pub use self::io::{load_carrier, output_path, save_carrier};
