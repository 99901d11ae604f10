//! Input validation for command arguments.
//!
//! Everything here runs before the first network call.

use thiserror::Error;

/// Decimal places of the native token.
pub const TOKEN_DECIMALS: u32 = 8;

const BASE_UNITS_PER_TOKEN: u64 = 10u64.pow(TOKEN_DECIMALS);
const MAX_PROPERTY_KEY_LEN: usize = 255;
const MAX_PROPERTY_VALUE_BYTES: usize = 255;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid {kind} id '{value}': {reason}")]
    Identifier {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Invalid {field} '{value}': {reason}")]
    Amount {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid property key '{key}': {reason}")]
    PropertyKey { key: String, reason: &'static str },

    #[error("Invalid property value: {0}")]
    PropertyValue(String),

    #[error("Invalid value '{value}': {reason}")]
    ExplicitValue { value: String, reason: &'static str },
}

/// Wallet identifiers are addresses or public keys; only reject what could
/// never be one.
pub fn validate_wallet_id(id: &str) -> Result<(), InputError> {
    let reason = if id.is_empty() {
        "must not be empty"
    } else if id.chars().any(|c| c.is_whitespace() || c == '/') {
        "must not contain whitespace or '/'"
    } else {
        return Ok(());
    };
    Err(InputError::Identifier {
        kind: "wallet",
        value: id.to_string(),
        reason,
    })
}

/// Transaction and token ids are 32-byte hashes in hex.
pub fn validate_hash_id(kind: &'static str, id: &str) -> Result<(), InputError> {
    if id.len() != 64 || !id.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(InputError::Identifier {
            kind,
            value: id.to_string(),
            reason: "expected 64 hexadecimal characters",
        });
    }
    Ok(())
}

/// Parse a positive token amount into base units.
///
/// At most [`TOKEN_DECIMALS`] fractional digits; the result must fit `u64`.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<u64, InputError> {
    let err = |reason: &str| InputError::Amount {
        field,
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(err("expected a decimal number"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(err("expected a decimal number"));
    }
    if fraction.len() > TOKEN_DECIMALS as usize {
        return Err(err(&format!(
            "at most {} decimal places are allowed",
            TOKEN_DECIMALS
        )));
    }

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| err("amount is too large"))?
    };
    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = TOKEN_DECIMALS as usize);
        padded.parse::<u64>().map_err(|_| err("expected a decimal number"))?
    };

    let total = whole_units
        .checked_mul(BASE_UNITS_PER_TOKEN)
        .and_then(|w| w.checked_add(fraction_units))
        .ok_or_else(|| err("amount is too large"))?;

    if total == 0 {
        return Err(err("must be greater than zero"));
    }
    Ok(total)
}

/// Render base units as a token amount, trimming trailing zeros.
pub fn format_amount(base_units: u64) -> String {
    let whole = base_units / BASE_UNITS_PER_TOKEN;
    let fraction = base_units % BASE_UNITS_PER_TOKEN;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", fraction, width = TOKEN_DECIMALS as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Property keys: 1-255 of `[A-Za-z0-9_.-/]`, no leading or trailing `/`.
pub fn validate_property_key(key: &str) -> Result<(), InputError> {
    let reason = if key.is_empty() || key.len() > MAX_PROPERTY_KEY_LEN {
        "must be between 1 and 255 characters"
    } else if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/'))
    {
        "only letters, digits and '_', '.', '-', '/' are allowed"
    } else if key.starts_with('/') || key.ends_with('/') {
        "must not start or end with '/'"
    } else {
        return Ok(());
    };
    Err(InputError::PropertyKey {
        key: key.to_string(),
        reason,
    })
}

pub fn validate_property_value(value: &str) -> Result<(), InputError> {
    if value.len() > MAX_PROPERTY_VALUE_BYTES {
        return Err(InputError::PropertyValue(format!(
            "{} bytes exceeds the {} byte limit",
            value.len(),
            MAX_PROPERTY_VALUE_BYTES
        )));
    }
    Ok(())
}

/// Values fed to the fingerprint backend: non-blank, bounded like property values.
pub fn validate_explicit_value(value: &str) -> Result<(), InputError> {
    let reason = if value.trim().is_empty() {
        "must not be blank"
    } else if value.len() > MAX_PROPERTY_VALUE_BYTES {
        "must be at most 255 bytes"
    } else {
        return Ok(());
    };
    Err(InputError::ExplicitValue {
        value: value.to_string(),
        reason,
    })
}
