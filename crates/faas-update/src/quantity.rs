//! Kubernetes quantity validation
//!
//! Accepts the same serialized forms the API server does:
//!
//! ```text
//! <quantity>        ::= <signedNumber><suffix>
//! <signedNumber>    ::= [+-] <digits> [ . <digits> ] | [+-] . <digits>
//! <suffix>          ::= <binarySI> | <decimalSI> | <decimalExponent>
//! <binarySI>        ::= Ki | Mi | Gi | Ti | Pi | Ei
//! <decimalSI>       ::= n | u | m | "" | k | M | G | T | P | E
//! <decimalExponent> ::= e [+-] <digits> | E [+-] <digits>
//! ```
//!
//! The value is kept in the caller's spelling; the API server canonicalises it.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use thiserror::Error;

const BINARY_SI: [&str; 6] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
const DECIMAL_SI: [&str; 9] = ["n", "u", "m", "k", "M", "G", "T", "P", "E"];

/// Why a string is not a quantity
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// Empty input
    #[error("quantity is empty")]
    Empty,

    /// No digits before the suffix
    #[error("expected a number (e.g. '100m', '1', '0.5', '128Mi')")]
    MissingNumber,

    /// Suffix is not a recognised SI or exponent suffix
    #[error("unknown suffix '{0}'")]
    UnknownSuffix(String),
}

/// Parse a quantity string, returning it unchanged when valid
pub fn parse_quantity(s: &str) -> Result<Quantity, QuantityError> {
    if s.is_empty() {
        return Err(QuantityError::Empty);
    }

    let (number, suffix) = split_number(s);
    if !number.bytes().any(|b| b.is_ascii_digit()) {
        return Err(QuantityError::MissingNumber);
    }

    if !is_valid_suffix(suffix) {
        return Err(QuantityError::UnknownSuffix(suffix.to_string()));
    }

    Ok(Quantity(s.to_string()))
}

/// Split off the leading signed decimal number
fn split_number(s: &str) -> (&str, &str) {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }

    s.split_at(pos)
}

fn is_valid_suffix(suffix: &str) -> bool {
    if suffix.is_empty() || BINARY_SI.contains(&suffix) || DECIMAL_SI.contains(&suffix) {
        return true;
    }

    // decimal exponent: e3, E-2, e+6
    let Some(exponent) = suffix.strip_prefix(['e', 'E']) else {
        return false;
    };
    let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
