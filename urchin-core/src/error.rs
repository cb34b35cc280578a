//! Error types for urchin property-based testing.

use thiserror::Error;

/// Main error type for urchin property testing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Property test failed with a counterexample.
    #[error("Property failed after {tests_run} tests and {shrinks_performed} shrinks: {counterexample} (recheck with \"{recheck}\")")]
    PropertyFailed {
        counterexample: String,
        tests_run: usize,
        shrinks_performed: usize,
        recheck: String,
    },

    /// Too many test cases were discarded.
    #[error("Too many test cases discarded ({discards} discards after {tests_run} tests)")]
    TooManyDiscards { tests_run: usize, discards: usize },

    /// Generator failed to produce a value.
    #[error("Generator failed: {reason}")]
    GeneratorFailed { reason: String },

    /// The run was cancelled before it could finish.
    #[error("Property run cancelled after {tests_run} tests")]
    Cancelled { tests_run: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Invalid generator construction.
    #[error("Invalid generator: {message}")]
    InvalidGenerator { message: String },

    /// Range whose origin lies outside its bounds.
    #[error("Invalid range: {message}")]
    InvalidRange { message: String },

    #[error("Invalid seed {input:?}, expected \"<state>_<gamma>\" with an odd gamma")]
    InvalidSeed { input: String },

    #[error("Invalid recheck token {token:?}: {reason}")]
    InvalidRecheckToken { token: String, reason: String },
}

/// Result type for urchin operations.
pub type Result<T> = std::result::Result<T, Error>;
