use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Number of financial years offered, ending at the current year.
pub const OFFERED_YEARS: i32 = 10;

/// A financial year spanning two calendar years, written `"2024-2025"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinancialYear {
    start: i32,
}

impl FinancialYear {
    /// Creates the financial year starting in `start`.
    pub fn new(start: i32) -> Self {
        Self { start }
    }

    /// First calendar year of the span.
    pub fn start(self) -> i32 {
        self.start
    }

    /// Second calendar year of the span.
    pub fn end(self) -> i32 {
        self.start + 1
    }

    /// The offered choices: ten years ending at `current_year`, newest first.
    pub fn choices(current_year: i32) -> Vec<FinancialYear> {
        (0..OFFERED_YEARS)
            .map(|offset| Self::new(current_year - offset))
            .collect()
    }
}

#[mutants::skip]
impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end())
    }
}

impl FromStr for FinancialYear {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::UnknownFinancialYear(s.to_string());
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start: i32 = start.parse().map_err(|_| invalid())?;
        let end: i32 = end.parse().map_err(|_| invalid())?;
        if start.checked_add(1) == Some(end) {
            Ok(Self::new(start))
        } else {
            Err(invalid())
        }
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FinancialYear> for String {
    fn from(year: FinancialYear) -> Self {
        year.to_string()
    }
}

/// Validates a selected financial year against the offered `choices`.
pub fn validate_financial_year(
    value: &str,
    choices: &[FinancialYear],
) -> Result<FinancialYear, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required("Financial Year"));
    }
    let year: FinancialYear = value.parse()?;
    if choices.contains(&year) {
        Ok(year)
    } else {
        Err(ValidationError::UnknownFinancialYear(value.to_string()))
    }
}
