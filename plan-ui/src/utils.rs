use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Whole-yen amount, optionally signed, with `,` grouping and a trailing
/// `円` or `yen`.
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<num>[-+]?[0-9][0-9,]*)\s*(?:円|yen)?$").expect("amount pattern is valid")
});

/// Error returned when a string is not a whole amount.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid amount '{input}'")]
pub struct ParseAmountError {
    input: String,
}

/// Parses a whole amount such as `"150,000"`, `"150000円"` or `"3,000 yen"`.
///
/// Values beyond `i64` are rejected rather than wrapped.
pub fn parse_amount(s: &str) -> Result<i64, ParseAmountError> {
    let trimmed = s.trim();
    let invalid = || {
        tracing::warn!(input = %s, "invalid amount");
        ParseAmountError {
            input: s.to_string(),
        }
    };

    let caps = AMOUNT_PATTERN.captures(trimmed).ok_or_else(invalid)?;
    caps["num"]
        .replace(',', "")
        .parse::<i64>()
        .map_err(|_| invalid())
}

/// Returns true when `s` looks like an amount rather than a command.
pub fn is_amount(s: &str) -> bool {
    AMOUNT_PATTERN.is_match(s.trim())
}
