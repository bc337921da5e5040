//! Tool configuration.
//!
//! Token literals and the supported extension list are process-wide
//! constants. Everything a caller may vary lives in [`StegConfig`], which is
//! built once and passed by reference.

use std::path::PathBuf;

/// Marks the beginning of an embedded message.
pub const START_TOKEN: &str = "<!>";

/// Marks the end of an embedded message.
pub const STOP_TOKEN: &str = "<?>";

/// Bits per encoded character.
pub const BITS_PER_CHAR: usize = 8;

/// Color channels used per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// Length of either token in bits.
pub const TOKEN_BITS: usize = 3 * BITS_PER_CHAR;

/// Carrier file extensions accepted on input (lowercase, with dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".bmp", ".png"];

/// Default directory for encoded images.
pub const DEFAULT_OUTPUT_DIR: &str = "encoded";

/// Default file name prefix for encoded images.
pub const DEFAULT_OUTPUT_PREFIX: &str = "steg_";

/// Configuration for the command line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegConfig {
    /// Directory encoded images are written to.
    pub output_dir: PathBuf,

    /// Prefix prepended to the carrier's file stem.
    pub output_prefix: String,

    /// Emit debug logging.
    pub verbose: bool,
}

impl Default for StegConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            verbose: false,
        }
    }
}

impl StegConfig {
    /// Overrides the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets verbose logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
