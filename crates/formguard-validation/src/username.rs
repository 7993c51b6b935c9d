//! Username validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern a username must match in full: uppercase first letter, then
/// letters, digits or underscores, three characters minimum.
pub const USERNAME_PATTERN: &str = r"^[A-Z][a-zA-Z0-9_]{2,}$";

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(USERNAME_PATTERN).unwrap());

/// Validates a username against [`USERNAME_PATTERN`]
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}
