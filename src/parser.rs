//! Friendly token-count parsing ("200M", "1.5B", "250,000").

use crate::error::ParseError;

/// Token count used whenever the input cannot be parsed.
pub const FALLBACK_TOKENS: f64 = 200_000_000.0;

/// Suffixes in precedence order. The first one present in the input wins.
const SUFFIXES: [(char, f64); 3] = [
    ('K', 1_000.0),
    ('M', 1_000_000.0),
    ('B', 1_000_000_000.0),
];

/// Parse a token count.
///
/// The input is trimmed, uppercased and stripped of thousands separators
/// (`,` and `_`).
/// If it contains `K`, `M` or `B` (checked in that order) every occurrence of
/// that letter is removed and the remainder is scaled accordingly.
pub fn parse_tokens(input: &str) -> Result<f64, ParseError> {
    let normalized: String = input
        .trim()
        .to_uppercase()
        .chars()
        .filter(|&c| c != ',' && c != '_')
        .collect();

    let (number, multiplier) = match SUFFIXES.iter().find(|(s, _)| normalized.contains(*s)) {
        Some(&(suffix, multiplier)) => (normalized.replace(suffix, ""), multiplier),
        None => (normalized, 1.0),
    };

    let number = number.trim();
    if number.is_empty() {
        return Err(ParseError::Empty);
    }

    // f64::from_str accepts "inf" and "nan"; both are rejected below
    let value: f64 = number
        .parse()
        .map_err(|_| ParseError::Malformed(number.to_string()))?;
    let tokens = value * multiplier;

    if !tokens.is_finite() || tokens < 0.0 {
        return Err(ParseError::OutOfRange(number.to_string()));
    }
    // "-0" parses to negative zero
    Ok(tokens + 0.0)
}

/// Parse a token count, substituting [`FALLBACK_TOKENS`] on failure.
///
/// The error is handed back so the caller can warn the user.
pub fn parse_tokens_or_fallback(input: &str) -> (f64, Option<ParseError>) {
    match parse_tokens(input) {
        Ok(tokens) => (tokens, None),
        Err(e) => {
            tracing::debug!(input, error = %e, "token input rejected, using fallback");
            (FALLBACK_TOKENS, Some(e))
        }
    }
}
