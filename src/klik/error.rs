//! Error taxonomy for decoding and crawl operations.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the decoders and the crawl controller.
///
/// None of these are recovered or retried internally; a failed decode or
/// crawl yields no partial result.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Price text contained no digits to parse.
    #[error("no digits in price text \"{text}\"")]
    MalformedCurrency { text: String },

    /// The document does not match the expected catalog page shape.
    #[error("page structure mismatch: {context} not found")]
    StructureMismatch { context: &'static str },

    /// The readiness marker never appeared within the bounded wait.
    #[error("timed out after {timeout:?} waiting for \"{selector}\"")]
    PageLoadTimeout { selector: String, timeout: Duration },

    /// A browser driver command failed outside of a readiness wait.
    #[error("browser session command failed: {message}")]
    Session { message: String },
}
