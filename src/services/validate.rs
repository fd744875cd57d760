// src/services/validate.rs

//! Structural validation of candidate records.

use std::fmt;

use regex::Regex;

use crate::models::ProductRecord;

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingMpn,
    MissingCode,
    MissingManufacturer,
    MalformedCode,
    ShortMpn,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rejection::MissingMpn => "mpn is empty",
            Rejection::MissingCode => "catalog code is empty",
            Rejection::MissingManufacturer => "manufacturer is empty",
            Rejection::MalformedCode => "catalog code does not match C + 4 digits",
            Rejection::ShortMpn => "mpn is shorter than 2 characters",
        };
        f.write_str(text)
    }
}

/// Rejects structurally unsound candidates. All-or-nothing per record.
pub struct Validator {
    code_pattern: Regex,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            code_pattern: Regex::new(r"^C\d{4,}$").expect("code pattern is valid"),
        }
    }

    /// Check one candidate, returning the first failing predicate.
    pub fn check(&self, record: &ProductRecord) -> Result<(), Rejection> {
        if record.mpn.is_empty() {
            return Err(Rejection::MissingMpn);
        }
        if record.lcsc_code.is_empty() {
            return Err(Rejection::MissingCode);
        }
        if record.manufacturer.is_empty() {
            return Err(Rejection::MissingManufacturer);
        }
        if !self.code_pattern.is_match(&record.lcsc_code) {
            return Err(Rejection::MalformedCode);
        }
        if record.mpn.chars().count() < 2 {
            return Err(Rejection::ShortMpn);
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
