//! Report rendering for resolved ships and their metrics.

mod console;

pub use console::generate as generate_console;
