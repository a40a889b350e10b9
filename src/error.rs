//! Error types for the calculation core.

use thiserror::Error;

/// Failure to turn user input into a token count.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Nothing left to parse after normalisation
    #[error("token count is empty")]
    Empty,

    /// Remaining text is not a number
    #[error("'{0}' is not a valid number")]
    Malformed(String),

    /// Parsed, but negative or not finite
    #[error("token count must be a finite, non-negative number (got {0})")]
    OutOfRange(String),
}

/// Rate table loading and validation errors.
#[derive(Error, Debug)]
pub enum RateTableError {
    /// The table has no providers
    #[error("rate table must contain at least one provider")]
    Empty,

    /// Two entries share a name
    #[error("duplicate provider '{0}' in rate table")]
    DuplicateProvider(String),

    /// A rate is negative or not finite
    #[error("provider '{provider}' has an invalid {field} rate: {value}")]
    InvalidRate {
        /// Provider name
        provider: String,
        /// Which rate (compute, storage, network)
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Colour string could not be understood
    #[error("invalid colour '{0}' (expected \"rgb(r, g, b)\" or \"#rrggbb\")")]
    InvalidColor(String),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error (file reading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Short message suitable for the form warning line.
    pub fn friendly_message(&self) -> String {
        match self {
            ParseError::Empty => "Enter a token count (e.g. 200M, 1.5B, 250,000)".to_string(),
            _ => format!("Please enter a valid number: {self}"),
        }
    }
}
