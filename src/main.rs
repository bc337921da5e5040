//! Stegtool - hide text in image pixels
//!
//! A CLI tool for LSB image steganography.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Parser};

use commands::{CommandExecutor, DecodeCommand, EncodeCommand};
use stegtool::StegConfig;

/// Stegtool - hide a secret message within an image file
///
/// Encoded images are written as PNG to the output directory with a
/// `steg_` prefix. Decoding prints the recovered message.
#[derive(Parser, Debug)]
#[command(name = "stegtool")]
#[command(version)]
#[command(about = "A command line tool to encode a secret message within an image file")]
#[command(group(ArgGroup::new("mode").required(true).args(["encode", "decode"])))]
struct Cli {
    /// Name of file to perform steganographic function on
    filename: PathBuf,

    /// Text string of message to be encoded
    #[arg(required_if_eq("encode", "true"))]
    message: Option<String>,

    /// Performs steganographic encode function
    #[arg(short, long)]
    encode: bool,

    /// Performs steganographic decode function
    #[arg(short, long)]
    decode: bool,

    /// Directory for encoded images
    #[arg(short, long, default_value = stegtool::config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Enables verbose output (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> StegConfig {
        StegConfig::default()
            .with_output_dir(self.output_dir.clone())
            .with_verbose(self.verbose)
    }

    fn into_command(self, config: StegConfig) -> Box<dyn CommandExecutor> {
        if self.encode {
            Box::new(EncodeCommand {
                filename: self.filename,
                message: self.message.unwrap_or_default(),
                config,
            })
        } else {
            Box::new(DecodeCommand {
                filename: self.filename,
            })
        }
    }
}

fn init_logging(config: &StegConfig) {
    let default_level = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    init_logging(&config);
    cli.into_command(config).execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_encode_args() {
        let cli = Cli::try_parse_from(["stegtool", "cat.png", "hello", "--encode"]).unwrap();
        assert!(cli.encode);
        assert!(!cli.decode);
        assert_eq!(cli.message.as_deref(), Some("hello"));
        assert_eq!(cli.output_dir, PathBuf::from("encoded"));
    }

    #[test]
    fn test_decode_without_message() {
        let cli = Cli::try_parse_from(["stegtool", "steg_cat.png", "-d", "-v"]).unwrap();
        assert!(cli.decode);
        assert!(cli.verbose);
        assert!(cli.message.is_none());
    }

    #[test]
    fn test_config_from_flags() {
        let cli = Cli::try_parse_from(["stegtool", "cat.png", "hi", "-e", "-v", "-o", "out"]).unwrap();
        let config = cli.config();
        assert!(config.verbose);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.output_prefix, "steg_");
    }

    #[test]
    fn test_mode_required() {
        let err = Cli::try_parse_from(["stegtool", "cat.png", "hello"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_modes_conflict() {
        let err = Cli::try_parse_from(["stegtool", "cat.png", "hello", "-e", "-d"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_encode_requires_message() {
        let err = Cli::try_parse_from(["stegtool", "cat.png", "--encode"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
