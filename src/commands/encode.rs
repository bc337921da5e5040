//! Encode command - hide a message in a carrier image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use stegtool::StegConfig;

use super::CommandExecutor;

/// Hide a text message in an image.
///
/// The encoded image is always written as PNG to
/// `<output_dir>/steg_<name>.png`.
#[derive(Debug)]
pub struct EncodeCommand {
    /// Carrier image (.jpg, .jpeg, .bmp, .png)
    pub filename: PathBuf,

    /// Message to hide (characters must fit in 8 bits)
    pub message: String,

    pub config: StegConfig,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self) -> Result<()> {
        info!(
            "Encoding {} chars into {}",
            self.message.chars().count(),
            self.filename.display()
        );

        let output = stegtool::encode_file(&self.filename, &self.message, &self.config)
            .with_context(|| format!("Failed to encode message into {}", self.filename.display()))?;

        println!("Encoded image saved: {}", output.display());
        Ok(())
    }
}
