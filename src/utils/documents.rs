//! Identifiers used across the records: CNPJ/CPF, aircraft registrations,
//! ICAO aerodrome codes and CANAC licenses.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

static REGISTRATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{2}-?[A-Z0-9]{3,4}$").expect("registration regex is valid")
});

static ICAO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}$").expect("ICAO regex is valid"));

/// Keep only ASCII digits ("12.345.678/0001-90" → "12345678000190").
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a CNPJ (14 digits) or CPF (11 digits) to its digits.
pub fn normalize_document(s: &str) -> AppResult<String> {
    let d = digits_only(s);
    match d.len() {
        11 | 14 => Ok(d),
        _ => Err(AppError::InvalidCnpj(s.to_string())),
    }
}

/// Pretty-print a stored document: CNPJ `12.345.678/0001-90`, CPF `123.456.789-01`.
pub fn format_document(digits: &str) -> String {
    match digits.len() {
        14 => format!(
            "{}.{}.{}/{}-{}",
            &digits[0..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..14]
        ),
        11 => format!(
            "{}.{}.{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11]
        ),
        _ => digits.to_string(),
    }
}

/// Upper-case and validate an aircraft registration ("pr-abc" → "PR-ABC").
pub fn normalize_registration(s: &str) -> AppResult<String> {
    let r = s.trim().to_uppercase();
    if REGISTRATION_RE.is_match(&r) {
        Ok(r)
    } else {
        Err(AppError::InvalidRegistration(s.to_string()))
    }
}

pub fn normalize_icao(s: &str) -> AppResult<String> {
    let code = s.trim().to_uppercase();
    if ICAO_RE.is_match(&code) {
        Ok(code)
    } else {
        Err(AppError::InvalidInput(format!("ICAO code '{s}'")))
    }
}

pub fn normalize_canac(s: &str) -> AppResult<String> {
    let code = s.trim();
    if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(code.to_string())
    } else {
        Err(AppError::InvalidInput(format!("CANAC code '{s}'")))
    }
}
