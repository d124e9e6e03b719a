// Rust guideline compliant 2026-02-06

//! The data payload seam.
//!
//! The assembler never looks inside the table. It asks the payload for its
//! serialized form once per assembly and splices that text into the body.

use sha2::{Digest, Sha256};
use std::fmt;

/// Something that can render itself as the `table` value of a response.
///
/// The returned text is inserted verbatim, so it must already be a valid
/// script expression (typically an object literal).
pub trait DataPayload: Send + Sync {
    /// Returns the serialized table.
    fn serialize(&self) -> String;
}

impl DataPayload for String {
    fn serialize(&self) -> String {
        self.clone()
    }
}

impl DataPayload for &'static str {
    fn serialize(&self) -> String {
        (*self).to_string()
    }
}

impl DataPayload for serde_json::Value {
    fn serialize(&self) -> String {
        self.to_string()
    }
}

/// Adapts a closure into a [`DataPayload`].
pub struct PayloadFn<F>(pub F);

impl<F> DataPayload for PayloadFn<F>
where
    F: Fn() -> String + Send + Sync,
{
    fn serialize(&self) -> String {
        (self.0)()
    }
}

impl<F> fmt::Debug for PayloadFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PayloadFn(..)")
    }
}

/// Computes the freshness signature of a serialized payload.
///
/// Lowercase hex SHA-256 of the serialized text.
#[must_use]
pub fn signature(serialized: &str) -> String {
    let digest = Sha256::digest(serialized.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
