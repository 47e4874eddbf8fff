//! Regular-expression phone validator

use regex::Regex;

use otp_shared::phone::DEFAULT_PHONE_PATTERN;

use crate::errors::{DomainError, DomainResult};

use super::traits::PhoneValidator;

/// Validates phones against a configured pattern, without normalisation
#[derive(Debug, Clone)]
pub struct RegexPhoneValidator {
    pattern: Regex,
}

impl RegexPhoneValidator {
    /// Compile a validator from a pattern
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` when the pattern does not compile.
    pub fn new(pattern: &str) -> DomainResult<Self> {
        let pattern = Regex::new(pattern).map_err(|e| DomainError::Configuration {
            message: format!("Invalid phone pattern '{}': {}", pattern, e),
        })?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for RegexPhoneValidator {
    /// Indian mobile numbers: `+91` followed by ten digits starting with 6-9
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_PHONE_PATTERN).expect("default phone pattern compiles"),
        }
    }
}

impl PhoneValidator for RegexPhoneValidator {
    fn is_valid_phone(&self, phone: &str) -> bool {
        self.pattern.is_match(phone)
    }
}
