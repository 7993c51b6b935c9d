//! Password validation

/// Characters the password rule accepts as "special".
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Length and character-class requirements for a password field.
///
/// Checked manually rather than with a single pattern (the regex crate has no
/// lookaheads).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in characters, inclusive.
    pub min_length: usize,
    /// Maximum length in characters, inclusive.
    pub max_length: usize,
}

impl PasswordPolicy {
    /// Checks a password: length within bounds, at least one ASCII uppercase
    /// letter, at least one character from [`SPECIAL_CHARS`].
    pub fn check(&self, password: &str) -> bool {
        let length = password.chars().count();
        length >= self.min_length
            && length <= self.max_length
            && has_uppercase(password)
            && has_special_char(password)
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 25,
        }
    }
}

/// Validates a password against the default policy
pub fn is_valid_password(password: &str) -> bool {
    PasswordPolicy::default().check(password)
}

fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

fn has_special_char(password: &str) -> bool {
    password.chars().any(|c| SPECIAL_CHARS.contains(c))
}
