// Rust guideline compliant 2026-02-06

//! Output formatting for assembled responses.
//!
//! Writes responses the way a CGI script would: one header per line, a
//! blank line, then the body.

use gviz_core::AssembledResponse;

/// Output formatter trait.
pub trait OutputFormatter {
    /// Formats an assembled response for stdout.
    fn format_response(&self, response: &AssembledResponse) -> String;
}

/// Headers, blank line, body.
pub struct CgiFormatter;

impl OutputFormatter for CgiFormatter {
    fn format_response(&self, response: &AssembledResponse) -> String {
        let mut out = String::new();
        for header in &response.headers {
            out.push_str(&header.to_string());
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
        out.push_str(&response.body);
        out
    }
}

/// Body only.
pub struct BodyFormatter;

impl OutputFormatter for BodyFormatter {
    fn format_response(&self, response: &AssembledResponse) -> String {
        response.body.clone()
    }
}

/// Creates a formatter.
///
/// # Arguments
/// * `body_only` - Whether to omit headers
pub fn create_formatter(body_only: bool) -> Box<dyn OutputFormatter> {
    if body_only {
        Box::new(BodyFormatter)
    } else {
        Box::new(CgiFormatter)
    }
}
