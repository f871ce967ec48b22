//! Errors surfaced by the placement harness.

use thiserror::Error;

/// Failures a harness operation can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The host lacks a capability the test cannot run without.
    #[error("unsupported host: {0}")]
    Unsupported(&'static str),

    /// A polled condition was still false when its deadline elapsed.
    #[error("assertion '{check}' failed: expected {expected}, got {actual}")]
    Assertion {
        /// Name of the condition that failed.
        check: &'static str,
        /// Formatted value the test expected.
        expected: String,
        /// Formatted value the host last reported.
        actual: String,
    },

    /// The automation driver refused a permission grant or click request.
    #[error("automation request failed: {0}")]
    Automation(String),
}

/// Convenience alias for harness results.
pub type Result<T> = std::result::Result<T, Error>;
