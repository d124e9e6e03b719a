// Rust guideline compliant 2026-02-06

//! Request descriptor parsing.
//!
//! A chart client describes the response it wants with a semicolon
//! separated list of `key=value` pairs, for example
//! `reqId=7;version=0.6;responseHandler=myHandler`. Parsing never fails:
//! malformed segments are skipped and tolerable problems are queued as
//! messages for the assembler.

use crate::message::{reasons, Message, MessageKind, MessageLog};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// The only protocol version fully supported.
pub const SUPPORTED_VERSION: &str = "0.6";

/// Handler invoked by wrapped responses when the client names none.
pub const DEFAULT_RESPONSE_HANDLER: &str = "google.visualization.Query.setResponse";

/// The only supported output format.
pub const DEFAULT_OUTPUT_FORMAT: &str = "json";

/// Request id used when the client sends none.
pub const DEFAULT_REQUEST_ID: i64 = 0;

const KEY_REQUEST_ID: &str = "reqId";
const KEY_VERSION: &str = "version";
const KEY_SIGNATURE: &str = "sig";
const KEY_OUTPUT_FORMAT: &str = "out";
const KEY_RESPONSE_HANDLER: &str = "responseHandler";
const KEY_OUT_FILE_NAME: &str = "outFileName";

/// Fields supplied directly by the caller.
///
/// Every `Some` field replaces whatever the raw descriptor string said.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOverrides {
    /// Request id.
    pub request_id: Option<i64>,
    /// Protocol version.
    pub version: Option<String>,
    /// Freshness signature.
    pub signature: Option<String>,
    /// Output format.
    pub output_format: Option<String>,
    /// Name of the client-side handler for wrapped responses.
    pub response_handler: Option<String>,
    /// Suggested download file name.
    pub out_file_name: Option<String>,
}

/// Parsed and validated response-shaping options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    request_id: i64,
    version: Option<String>,
    signature: Option<String>,
    output_format: String,
    response_handler: String,
    out_file_name: Option<String>,
    auth_present: bool,
    extra: BTreeMap<String, String>,
    messages: MessageLog,
}

impl Default for RequestDescriptor {
    fn default() -> Self {
        Self {
            request_id: DEFAULT_REQUEST_ID,
            version: None,
            signature: None,
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            response_handler: DEFAULT_RESPONSE_HANDLER.to_string(),
            out_file_name: None,
            auth_present: false,
            extra: BTreeMap::new(),
            messages: MessageLog::new(),
        }
    }
}

impl RequestDescriptor {
    /// Parses a raw descriptor string.
    ///
    /// # Arguments
    ///
    /// * `raw` - The `key=value;key=value` descriptor
    /// * `auth_present` - Whether the request carried the data source auth header
    /// * `overrides` - Caller-supplied fields, applied after the raw string
    ///
    /// # Returns
    ///
    /// The descriptor. Unknown keys are kept as extra attributes, segments
    /// without `=` are dropped, and an unsupported `version` queues a warning.
    #[must_use]
    pub fn parse(raw: &str, auth_present: bool, overrides: RequestOverrides) -> Self {
        let mut descriptor = Self {
            auth_present,
            ..Self::default()
        };

        for segment in raw.split(';') {
            if segment.is_empty() {
                continue;
            }
            let Some((key, value)) = segment.split_once('=') else {
                debug!(segment, "skipping descriptor segment without '='");
                continue;
            };
            if key.is_empty() {
                debug!(segment, "skipping descriptor segment without key");
                continue;
            }
            descriptor.set_field(key, value);
        }

        descriptor.apply_overrides(overrides);
        descriptor.response_handler = sanitize_handler_name(&descriptor.response_handler);

        if let Some(version) = descriptor.version.as_deref() {
            if version != SUPPORTED_VERSION {
                debug!(version, "unsupported protocol version requested");
                let summary = format!(
                    "Version {} is not supported, responding with version {}",
                    version, SUPPORTED_VERSION
                );
                descriptor.messages.push(Message::new(
                    MessageKind::Warning,
                    reasons::VERSION_MISMATCH,
                    Some(summary),
                    None,
                ));
            }
        }

        descriptor
    }

    fn set_field(&mut self, key: &str, value: &str) {
        match key {
            KEY_REQUEST_ID => {
                self.request_id = match value.trim().parse() {
                    Ok(id) => id,
                    Err(_) => {
                        if !value.is_empty() {
                            debug!(value, "non-integer reqId, using default");
                        }
                        DEFAULT_REQUEST_ID
                    }
                };
            }
            KEY_VERSION => self.version = non_empty(value),
            KEY_SIGNATURE => self.signature = non_empty(value),
            KEY_OUTPUT_FORMAT => {
                self.output_format =
                    non_empty(value).unwrap_or_else(|| DEFAULT_OUTPUT_FORMAT.to_string());
            }
            KEY_RESPONSE_HANDLER => {
                self.response_handler =
                    non_empty(value).unwrap_or_else(|| DEFAULT_RESPONSE_HANDLER.to_string());
            }
            KEY_OUT_FILE_NAME => self.out_file_name = non_empty(value),
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
    }

    fn apply_overrides(&mut self, overrides: RequestOverrides) {
        if let Some(request_id) = overrides.request_id {
            self.request_id = request_id;
        }
        if let Some(version) = overrides.version {
            self.version = non_empty(&version);
        }
        if let Some(signature) = overrides.signature {
            self.signature = non_empty(&signature);
        }
        if let Some(output_format) = overrides.output_format {
            self.output_format = output_format;
        }
        if let Some(response_handler) = overrides.response_handler {
            self.response_handler = response_handler;
        }
        if let Some(out_file_name) = overrides.out_file_name {
            self.out_file_name = non_empty(&out_file_name);
        }
    }

    /// Returns the request id echoed back to the client.
    #[must_use]
    pub fn request_id(&self) -> i64 {
        self.request_id
    }

    /// Returns the protocol version the client asked for, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the client's freshness signature, if any.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Returns the requested output format.
    #[must_use]
    pub fn output_format(&self) -> &str {
        &self.output_format
    }

    /// Returns the sanitized handler name for wrapped responses.
    #[must_use]
    pub fn response_handler(&self) -> &str {
        &self.response_handler
    }

    /// Returns the suggested download file name, if any.
    #[must_use]
    pub fn out_file_name(&self) -> Option<&str> {
        self.out_file_name.as_deref()
    }

    /// Returns whether the request carried the data source auth header.
    #[must_use]
    pub fn auth_present(&self) -> bool {
        self.auth_present
    }

    /// Returns an unrecognized attribute by key.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Returns all unrecognized attributes, sorted by key.
    #[must_use]
    pub fn extras(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    /// Returns the messages queued while parsing.
    #[must_use]
    pub fn parse_messages(&self) -> &MessageLog {
        &self.messages
    }
}

/// Renders the canonical `key=value;...` form.
///
/// Recognized keys come first in a fixed order, then extras sorted by key.
/// Values parsed from a raw string never contain `;`, so those render back
/// to an equal descriptor. Override values containing `;` do not.
impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", KEY_REQUEST_ID, self.request_id)?;
        if let Some(version) = &self.version {
            write!(f, ";{}={}", KEY_VERSION, version)?;
        }
        if let Some(signature) = &self.signature {
            write!(f, ";{}={}", KEY_SIGNATURE, signature)?;
        }
        write!(f, ";{}={}", KEY_OUTPUT_FORMAT, self.output_format)?;
        write!(f, ";{}={}", KEY_RESPONSE_HANDLER, self.response_handler)?;
        if let Some(out_file_name) = &self.out_file_name {
            write!(f, ";{}={}", KEY_OUT_FILE_NAME, out_file_name)?;
        }
        for (key, value) in &self.extra {
            write!(f, ";{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Strips every character that cannot appear in a dotted callable name.
///
/// Keeps ASCII letters, digits, `.`, `_` and `$`. An empty result falls
/// back to [`DEFAULT_RESPONSE_HANDLER`].
#[must_use]
pub fn sanitize_handler_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '$'))
        .collect();
    if cleaned.is_empty() {
        DEFAULT_RESPONSE_HANDLER.to_string()
    } else {
        cleaned
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
