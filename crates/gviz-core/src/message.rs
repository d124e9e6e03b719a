// Rust guideline compliant 2026-02-06

//! Error and warning messages attached to a response.

use std::fmt;

/// Reason codes understood by chart clients.
///
/// The set is open: any string is accepted as a reason, these are the ones
/// clients know how to present.
pub mod reasons {
    /// The client signature matches the current data.
    pub const NOT_MODIFIED: &str = "not_modified";
    /// The request requires authentication.
    pub const USER_NOT_AUTHENTICATED: &str = "user_not_authenticated";
    /// The data source id is unknown.
    pub const UNKNOWN_DATA_SOURCE_ID: &str = "unknown_data_source_id";
    /// The user may not read this data source.
    pub const ACCESS_DENIED: &str = "access_denied";
    /// The query uses an operation the source cannot perform.
    pub const UNSUPPORTED_QUERY_OPERATION: &str = "unsupported_query_operation";
    /// The query could not be parsed.
    pub const INVALID_QUERY: &str = "invalid_query";
    /// The request itself is malformed.
    pub const INVALID_REQUEST: &str = "invalid_request";
    /// Unexpected failure in the data source.
    pub const INTERNAL_ERROR: &str = "internal_error";
    /// A requested capability is not supported.
    pub const NOT_SUPPORTED: &str = "not_supported";
    /// Formatting patterns in the query are invalid.
    pub const ILLEGAL_FORMATTING_PATTERNS: &str = "illegal_formatting_patterns";
    /// Anything else.
    pub const OTHER: &str = "other";
    /// The table was cut short.
    pub const DATA_TRUNCATED: &str = "data_truncated";
    /// The client asked for a protocol version other than the supported one.
    pub const VERSION_MISMATCH: &str = "version_mismatch";
}

/// Severity of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Fatal for the response: the table is dropped.
    Error,
    /// Informational: the table is still delivered.
    Warning,
}

impl MessageKind {
    /// Returns the lowercase wire name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Error => "error",
            MessageKind::Warning => "warning",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single error or warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Severity.
    pub kind: MessageKind,
    /// Machine-readable reason code, see [`reasons`].
    pub reason: String,
    /// Short human-readable summary.
    pub summary: Option<String>,
    /// Longer human-readable explanation.
    pub detail: Option<String>,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(
        kind: MessageKind,
        reason: impl Into<String>,
        summary: Option<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            kind,
            reason: reason.into(),
            summary,
            detail,
        }
    }

    /// Creates an error message with only a reason.
    #[must_use]
    pub fn error(reason: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, reason, None, None)
    }

    /// Creates a warning message with only a reason.
    #[must_use]
    pub fn warning(reason: impl Into<String>) -> Self {
        Self::new(MessageKind::Warning, reason, None, None)
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.reason)?;
        if let Some(summary) = &self.summary {
            write!(f, ": {}", summary)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

/// Errors and warnings in insertion order, kept apart by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    errors: Vec<Message>,
    warnings: Vec<Message>,
}

impl MessageLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the sequence matching its kind.
    ///
    /// No deduplication or limits are applied.
    pub fn push(&mut self, message: Message) {
        match message.kind {
            MessageKind::Error => self.errors.push(message),
            MessageKind::Warning => self.warnings.push(message),
        }
    }

    /// Returns the errors in insertion order.
    #[must_use]
    pub fn errors(&self) -> &[Message] {
        &self.errors
    }

    /// Returns the warnings in insertion order.
    #[must_use]
    pub fn warnings(&self) -> &[Message] {
        &self.warnings
    }

    /// Iterates over all errors, then all warnings.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Returns the total number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Returns true if the log holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Returns true if at least one error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
