//! Error types for the ephemeris module
//!
//! Engine failures arrive as status codes plus an error string written into
//! a caller-provided byte buffer; the adapter decodes them into these
//! variants. Any of them is fatal to the render pass that triggered it.

use thiserror::Error;

/// Main error type for ephemeris functionality
#[derive(Error, Debug)]
pub enum EphemerisError {
    /// The engine rejected a calendar date during Julian-day conversion
    #[error("Julian day conversion failed: {0}")]
    JulianDay(String),

    /// The engine failed to compute a body position
    #[error("Position calculation failed for {body}: {message}")]
    Calculation {
        /// Display name of the body requested
        body: String,
        /// Error string decoded from the engine
        message: String,
    },

    /// The engine failed to compute house cusps
    #[error("House cusp calculation failed: {0}")]
    Houses(String),
}

/// Extension of the Result type for ephemeris operations
pub type Result<T> = std::result::Result<T, EphemerisError>;
