//! Rule table
//!
//! Maps field identity (`name`/`type`) to a validation rule. The table is
//! ordered and the first matching entry wins, so overlapping identities
//! resolve deterministically. Fields no entry matches fall back to the
//! hosting environment's built-in constraint check.

use regex::Regex;

use crate::email::EMAIL_PATTERN;
use crate::password::PasswordPolicy;
use crate::username::USERNAME_PATTERN;

/// The identity a rule is dispatched on: a field's `name` and `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIdentity<'a> {
    pub name: &'a str,
    pub input_type: &'a str,
}

/// How a rule entry is matched against a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Matches the field's `name` attribute exactly.
    Name(&'static str),
    /// Matches the field's `type` attribute exactly.
    Type(&'static str),
}

impl Matcher {
    fn matches(&self, identity: FieldIdentity<'_>) -> bool {
        match self {
            Matcher::Name(name) => identity.name == *name,
            Matcher::Type(input_type) => identity.input_type == *input_type,
        }
    }
}

/// A single validation rule.
#[derive(Debug)]
pub enum Rule {
    /// Full-string pattern match.
    Pattern(Regex),
    /// Composite length and character-class check.
    Password(PasswordPolicy),
    /// Delegate to the hosting environment's built-in constraint check
    /// (`required`, `minlength`, `pattern` attributes and the like).
    Native,
}

impl Rule {
    /// Evaluates the rule against a value.
    ///
    /// `native` carries the environment's own constraint result for the
    /// field; it is consulted only by [`Rule::Native`], since that check
    /// lives in the environment, not here.
    pub fn evaluate(&self, value: &str, native: bool) -> bool {
        match self {
            Rule::Pattern(regex) => regex.is_match(value),
            Rule::Password(policy) => policy.check(value),
            Rule::Native => native,
        }
    }
}

/// Ordered rule table with first-match-wins lookup.
#[derive(Debug)]
pub struct RuleSet {
    entries: Vec<(Matcher, Rule)>,
}

static NATIVE_FALLBACK: Rule = Rule::Native;

impl RuleSet {
    /// An empty table: every field falls back to the native check.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The built-in table: `username` by name, `email` by type, `password`
    /// by name, native fallback for everything else.
    pub fn built_in() -> Self {
        let mut rules = Self::new();
        rules.push(
            Matcher::Name("username"),
            Rule::Pattern(Regex::new(USERNAME_PATTERN).unwrap()),
        );
        rules.push(
            Matcher::Type("email"),
            Rule::Pattern(Regex::new(EMAIL_PATTERN).unwrap()),
        );
        rules.push(
            Matcher::Name("password"),
            Rule::Password(PasswordPolicy::default()),
        );
        rules
    }

    /// Appends an entry; earlier entries take precedence.
    pub fn push(&mut self, matcher: Matcher, rule: Rule) {
        self.entries.push((matcher, rule));
    }

    /// Resolves the rule for a field. Total: unmatched fields get
    /// [`Rule::Native`].
    pub fn rule_for(&self, identity: FieldIdentity<'_>) -> &Rule {
        self.entries
            .iter()
            .find(|(matcher, _)| matcher.matches(identity))
            .map(|(_, rule)| rule)
            .unwrap_or(&NATIVE_FALLBACK)
    }

    /// Evaluates a field's value against its rule.
    ///
    /// `native` supplies the environment's built-in constraint result,
    /// consulted only when the fallback rule is selected.
    pub fn check_validity(&self, identity: FieldIdentity<'_>, value: &str, native: bool) -> bool {
        self.rule_for(identity).evaluate(value, native)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
