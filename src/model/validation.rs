use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use thiserror::Error;

/// Date format accepted for the date of birth.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time format accepted for the time of birth (24-hour clock).
pub const TIME_FORMAT: &str = "%H:%M";

/// Validation errors for application form fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("First letter should be capital and rest small")]
    NotCapitalized(String),
    #[error("{0} is not an offered financial year")]
    UnknownFinancialYear(String),
    #[error("invalid date {0}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid time {0}, expected HH:MM")]
    InvalidTime(String),
    #[error("Mobile number must be exactly 10 digits")]
    InvalidMobileNo(String),
    #[error("Number of copies must be a positive whole number")]
    InvalidCopies(String),
    #[error("QR code must be scanned")]
    QrCodeNotScanned,
    #[error("UTR number must be 12 digits")]
    InvalidUtrNumber(String),
}

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]*$").expect("valid hardcoded regex"));

static MOBILE_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid hardcoded regex"));

static UTR_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("valid hardcoded regex"));

/// Rewrites a name so the first character is uppercase and the rest lowercase.
///
/// Applied to the whole string on every edit, so `"ABC"` becomes `"Abc"`.
pub fn normalize_name(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Fails with [`ValidationError::Required`] when `value` is empty.
pub fn validate_required(value: &str, label: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Required(label))
    } else {
        Ok(())
    }
}

/// Validates one part of a person's name: required, then `^[A-Z][a-z]*$`.
pub fn validate_name_part(value: &str, label: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required(label));
    }
    if NAME_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::NotCapitalized(value.to_string()))
    }
}

/// Parses a date of birth in `YYYY-MM-DD` form.
pub fn parse_date_of_birth(value: &str) -> Result<NaiveDate, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required("Date of birth"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Parses a time of birth in `HH:MM` form.
pub fn parse_time_of_birth(value: &str) -> Result<NaiveTime, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required("Time of birth"));
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}

/// Validates a mobile number: exactly 10 ASCII digits.
pub fn validate_mobile_no(value: &str) -> Result<(), ValidationError> {
    match value {
        "" => Err(ValidationError::Required("Mobile number")),
        s if MOBILE_NO_RE.is_match(s) => Ok(()),
        _ => Err(ValidationError::InvalidMobileNo(value.to_string())),
    }
}

/// Parses the number of copies: a whole number of at least 1.
pub fn parse_copies(value: &str) -> Result<u32, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required("Number of copies"));
    }
    match value.parse::<u32>() {
        Ok(copies) if copies >= 1 => Ok(copies),
        _ => Err(ValidationError::InvalidCopies(value.to_string())),
    }
}

/// Validates a UTR (bank transaction reference) number: exactly 12 ASCII digits.
pub fn validate_utr_number(value: &str) -> Result<(), ValidationError> {
    match value {
        "" => Err(ValidationError::Required("UTR number")),
        s if UTR_NUMBER_RE.is_match(s) => Ok(()),
        _ => Err(ValidationError::InvalidUtrNumber(value.to_string())),
    }
}

/// Per-field validation failures, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F> {
    errors: Vec<(F, ValidationError)>,
}

impl<F> Default for FieldErrors<F> {
    fn default() -> Self {
        Self { errors: Vec::new() }
    }
}

impl<F: Copy + PartialEq> FieldErrors<F> {
    /// Records the error from `result` against `field`, returning the success value.
    pub fn check<T>(&mut self, field: F, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push((field, e));
                None
            }
        }
    }

    /// Returns the error recorded for `field`, if any.
    pub fn get(&self, field: F) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, e)| e)
    }

    /// Returns `true` if no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over `(field, error)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = &(F, ValidationError)> {
        self.errors.iter()
    }
}
