//! Command module - Strategy pattern for CLI commands.
//!
//! Each mode is a separate module implementing the `CommandExecutor` trait.

mod decode;
mod encode;

pub use decode::DecodeCommand;
pub use encode::EncodeCommand;

use anyhow::Result;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its resolved arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its arguments.
    fn execute(&self) -> Result<()>;
}
