//! Internal helpers for field validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so incomes and expenses enforce the same invariants.

use chrono::{Datelike, NaiveDate};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// NFC-normalizes `input` and collapses runs of whitespace.
fn normalize_display(input: &str) -> Option<String> {
    let mut out = String::new();
    for token in input.nfc().collect::<String>().split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    if out.is_empty() { None } else { Some(out) }
}

pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    normalize_display(value)
        .ok_or_else(|| EngineError::Validation(format!("{label} must not be empty")))
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value.and_then(normalize_display)
}

/// `None` keeps the stored value, an empty string clears it.
pub(crate) fn apply_optional_text_patch(
    existing: Option<String>,
    patch: Option<&str>,
) -> Option<String> {
    match patch {
        None => existing,
        Some(value) => normalize_optional_text(Some(value)),
    }
}

/// Dates must fit a four-digit period key.
pub(crate) fn validate_date(date: NaiveDate) -> ResultEngine<NaiveDate> {
    if !(0..=9999).contains(&date.year()) {
        return Err(EngineError::InvalidDate(format!(
            "{date} is outside the supported range"
        )));
    }
    Ok(date)
}
