//! Serial console for configuration and diagnostics.
//!
//! Lazy polling from the main loop, no dedicated task, no heap. The
//! console is the presentation layer the descriptor flags exist for:
//! listings skip HIDDEN parameters and mask PASSWORD values.

pub mod commands;
pub mod error;
pub mod line;
pub mod parser;

pub use commands::{execute, COMMANDS};
pub use error::ConsoleError;
pub use line::LineBuffer;
pub use parser::{parse_line, ParsedCommand};
