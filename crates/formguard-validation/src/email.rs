//! Email validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Permissive email shape: local part, `@`, domain with at least one dot,
/// no whitespace and no second `@` anywhere.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());

/// Validates an email address against [`EMAIL_PATTERN`]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
