// Rust guideline compliant 2026-02-06

//! gviz CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod args;
pub mod output;

pub use args::{parse_message_spec, read_table};
pub use output::{create_formatter, OutputFormatter};
