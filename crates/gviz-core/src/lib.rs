// Rust guideline compliant 2026-02-06

//! gviz Core Library
//!
//! This crate builds responses for the chart data source wire protocol:
//! - Request descriptor parsing (`reqId=1;out=json;...`)
//! - Error and warning message accumulation
//! - Response assembly with error dominance and freshness checks
//! - Plain and handler-wrapped body rendering
//!
//! The tabular data itself is opaque here; callers inject it through the
//! [`DataPayload`] trait as a pre-serialized string.

pub mod config;
pub mod error;
pub mod literal;
pub mod message;
pub mod payload;
pub mod request;
pub mod response;

pub use config::Config;
pub use error::{Error, Result};
pub use message::{Message, MessageKind, MessageLog};
pub use payload::{signature, DataPayload, PayloadFn};
pub use request::{
    sanitize_handler_name, RequestDescriptor, RequestOverrides, DEFAULT_OUTPUT_FORMAT,
    DEFAULT_REQUEST_ID, DEFAULT_RESPONSE_HANDLER, SUPPORTED_VERSION,
};
pub use response::{AssembledResponse, Header, ResponseContainer, ResponseStatus};
