// Rust guideline compliant 2026-02-06

//! Argument helpers for the gviz CLI.

use gviz_core::{Error, Message, MessageKind, Result};
use std::io::Read;

/// Parses a `reason[:summary[:detail]]` message specification.
///
/// Empty summary or detail parts are treated as absent. The detail keeps
/// any further colons verbatim.
///
/// # Errors
///
/// Returns [`Error::InvalidMessage`] if the reason is empty.
pub fn parse_message_spec(kind: MessageKind, spec: &str) -> Result<Message> {
    let mut parts = spec.splitn(3, ':');
    let reason = parts.next().unwrap_or_default().trim();
    if reason.is_empty() {
        return Err(Error::InvalidMessage(format!(
            "{} spec '{}' has no reason",
            kind, spec
        )));
    }

    let summary = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
    let detail = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
    Ok(Message::new(kind, reason, summary, detail))
}

/// Reads a pre-serialized table from a file path, or stdin for `-`.
///
/// Trailing newlines are trimmed so the table splices cleanly into the body.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read_table(path: &str) -> Result<String> {
    let content = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(content.trim_end_matches(&['\r', '\n'][..]).to_string())
}
