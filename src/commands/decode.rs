//! Decode command - recover a message from an encoded image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use super::CommandExecutor;

/// Recover a hidden message from an encoded image.
#[derive(Debug)]
pub struct DecodeCommand {
    /// Encoded image
    pub filename: PathBuf,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self) -> Result<()> {
        info!("Checking {} for an encoded message", self.filename.display());

        let message = stegtool::decode_file(&self.filename)
            .with_context(|| format!("Failed to decode {}", self.filename.display()))?;

        println!("Secret Message: {}", message);
        Ok(())
    }
}
