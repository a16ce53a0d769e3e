//! Small shared types.

use clap::ValueEnum;

/// Controls when report output uses ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Use colors only when writing to a terminal.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}
