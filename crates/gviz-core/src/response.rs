// Rust guideline compliant 2026-02-06

//! Response assembly.
//!
//! A [`ResponseContainer`] collects messages and an optional table for one
//! request. [`ResponseContainer::assemble`] resolves them into a single
//! status following these rules, in order:
//!
//! 1. Capability checks on the descriptor append errors after any errors
//!    the caller added.
//! 2. If any error exists, only the first one is sent. No table, no warnings.
//! 3. Otherwise warnings, if any, are sent together with the table.
//! 4. Otherwise the table is sent alone.
//! 5. A client signature equal to the table signature turns 3 or 4 into a
//!    `not_modified` error.
//!
//! The body is then wrapped in a handler call unless the request carried
//! the data source auth header.

use crate::config::Config;
use crate::literal::ObjectLiteral;
use crate::message::{reasons, Message, MessageKind, MessageLog};
use crate::payload::{signature, DataPayload};
use crate::request::{RequestDescriptor, DEFAULT_OUTPUT_FORMAT, SUPPORTED_VERSION};
use std::fmt;
use tracing::{debug, info};

/// Content type of unwrapped responses.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

/// Content type of handler-wrapped responses.
pub const CONTENT_TYPE_JAVASCRIPT: &str = "text/javascript; charset=UTF-8";

/// Final status of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    /// Table delivered without messages.
    Ok,
    /// Table delivered with warnings.
    Warning,
    /// A single error delivered, no table.
    Error,
}

impl ResponseStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Ok => "ok",
            ResponseStatus::Warning => "warning",
            ResponseStatus::Error => "error",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

impl Header {
    /// Creates a header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// The finished response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledResponse {
    /// Resolved status.
    pub status: ResponseStatus,
    /// Headers in emission order.
    pub headers: Vec<Header>,
    /// UTF-8 body.
    pub body: String,
    /// Every error and warning known at assembly time, including the ones
    /// left out of the body. For server-side diagnostics only; never send
    /// this to the client.
    pub message_log: MessageLog,
}

impl AssembledResponse {
    /// Returns the value of the first header with the given name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

/// What the body will carry once messages are resolved.
enum Outcome<'a> {
    Failed(&'a Message),
    Delivered {
        status: ResponseStatus,
        table: Option<String>,
        signature: Option<String>,
    },
}

/// Accumulates the state of one response.
pub struct ResponseContainer {
    request: RequestDescriptor,
    payload: Option<Box<dyn DataPayload>>,
    messages: MessageLog,
}

impl fmt::Debug for ResponseContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseContainer")
            .field("request", &self.request)
            .field("has_payload", &self.payload.is_some())
            .field("messages", &self.messages)
            .finish()
    }
}

impl ResponseContainer {
    /// Creates a container for a request.
    ///
    /// Messages queued while parsing the descriptor are carried over.
    #[must_use]
    pub fn new(request: RequestDescriptor) -> Self {
        let messages = request.parse_messages().clone();
        Self {
            request,
            payload: None,
            messages,
        }
    }

    /// Returns the request descriptor.
    #[must_use]
    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    /// Returns the messages added so far.
    #[must_use]
    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Appends a message.
    pub fn add_message(
        &mut self,
        kind: MessageKind,
        reason: impl Into<String>,
        summary: Option<String>,
        detail: Option<String>,
    ) {
        self.messages.push(Message::new(kind, reason, summary, detail));
    }

    /// Appends an already built message.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Appends an error with only a reason.
    pub fn add_error(&mut self, reason: impl Into<String>) {
        self.messages.push(Message::error(reason));
    }

    /// Appends a warning with only a reason.
    pub fn add_warning(&mut self, reason: impl Into<String>) {
        self.messages.push(Message::warning(reason));
    }

    /// Sets the table, replacing any previous one.
    pub fn set_data_payload<P>(&mut self, payload: P)
    where
        P: DataPayload + 'static,
    {
        self.payload = Some(Box::new(payload));
    }

    /// Returns true if a table was set.
    #[must_use]
    pub fn has_data_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Assembles the response with default configuration.
    #[must_use]
    pub fn assemble(&self) -> AssembledResponse {
        self.assemble_with(&Config::default())
    }

    /// Assembles the response.
    ///
    /// Does not modify the container, so repeated calls give identical output.
    #[must_use]
    pub fn assemble_with(&self, config: &Config) -> AssembledResponse {
        let mut log = self.messages.clone();
        self.check_capabilities(&mut log);

        let not_modified = Message::new(
            MessageKind::Error,
            reasons::NOT_MODIFIED,
            Some("Data not modified".to_string()),
            None,
        );

        let mut stale = false;
        let outcome = match log.errors().first() {
            Some(first) => Outcome::Failed(first),
            None => {
                let table = self.payload.as_ref().map(|p| p.serialize());
                let sig = table.as_deref().map(signature);
                stale = matches!(
                    (self.request.signature(), sig.as_deref()),
                    (Some(client), Some(current)) if client == current
                );
                if stale {
                    info!(
                        req_id = self.request.request_id(),
                        "signature match, not modified"
                    );
                    Outcome::Failed(&not_modified)
                } else {
                    let status = if log.warnings().is_empty() {
                        ResponseStatus::Ok
                    } else {
                        ResponseStatus::Warning
                    };
                    Outcome::Delivered {
                        status,
                        table,
                        signature: sig,
                    }
                }
            }
        };

        let (status, payload) = self.render(&outcome, &log, config);
        debug!(
            req_id = self.request.request_id(),
            status = status.as_str(),
            errors = log.errors().len(),
            warnings = log.warnings().len(),
            "response assembled"
        );

        if stale {
            log.push(not_modified);
        }

        AssembledResponse {
            status,
            headers: self.headers(config),
            body: self.wrap(payload),
            message_log: log,
        }
    }

    fn check_capabilities(&self, log: &mut MessageLog) {
        let format = self.request.output_format();
        if format != DEFAULT_OUTPUT_FORMAT {
            debug!(format, "unsupported output format");
            log.push(Message::new(
                MessageKind::Error,
                reasons::NOT_SUPPORTED,
                Some(format!("Output format {} is not supported", format)),
                Some(format!("Only {} output is supported", DEFAULT_OUTPUT_FORMAT)),
            ));
        }
    }

    fn render(
        &self,
        outcome: &Outcome<'_>,
        log: &MessageLog,
        config: &Config,
    ) -> (ResponseStatus, String) {
        let mut obj = ObjectLiteral::new();
        obj.string("version", SUPPORTED_VERSION)
            .integer("reqId", self.request.request_id());

        let status = match outcome {
            Outcome::Failed(error) => {
                obj.string("status", ResponseStatus::Error.as_str())
                    .array("errors", [render_message(error)]);
                ResponseStatus::Error
            }
            Outcome::Delivered {
                status,
                table,
                signature,
            } => {
                obj.string("status", status.as_str());
                if *status == ResponseStatus::Warning {
                    obj.array("warnings", log.warnings().iter().map(render_message));
                }
                if config.emit_signature {
                    obj.optional_string("sig", signature.as_deref());
                }
                if let Some(table) = table {
                    obj.raw("table", table);
                }
                *status
            }
        };

        (status, obj.finish())
    }

    fn headers(&self, config: &Config) -> Vec<Header> {
        let content_type = if self.request.auth_present() {
            CONTENT_TYPE_JSON
        } else {
            CONTENT_TYPE_JAVASCRIPT
        };
        let mut headers = vec![Header::new("Content-Type", content_type)];

        if config.attachment_headers {
            if let Some(name) = self.request.out_file_name() {
                headers.push(Header::new(
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", sanitize_file_name(name)),
                ));
            }
        }

        headers
    }

    fn wrap(&self, payload: String) -> String {
        if self.request.auth_present() {
            payload
        } else {
            format!("{}({});", self.request.response_handler(), payload)
        }
    }
}

fn render_message(message: &Message) -> String {
    let mut obj = ObjectLiteral::new();
    obj.string("reason", &message.reason)
        .optional_string("message", message.summary.as_deref())
        .optional_string("detailed_message", message.detail.as_deref());
    obj.finish()
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
        .collect()
}
