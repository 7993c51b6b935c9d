//! Built-in constraint validation
//!
//! The check behind the environment's `checkValidity()`: `required`,
//! `minlength`/`maxlength`, the `pattern` attribute, and the shape checks
//! for `type="email"` / `type="url"`. Disabled controls are barred from
//! constraint validation and always report valid, as do controls with no
//! constraints at all.

use regex::Regex;

use crate::{Document, NodeId, Result};

impl Document {
    /// Runs built-in constraint validation for one control.
    pub fn check_validity(&self, node: NodeId) -> Result<bool> {
        let value = self.value(node)?;
        if self.is_disabled(node) {
            return Ok(true);
        }
        if value.is_empty() {
            // Only `required` constrains an empty value.
            return Ok(!self.is_required(node));
        }

        if let Some(min) = self.attr_usize(node, "minlength") {
            if value.chars().count() < min {
                return Ok(false);
            }
        }
        if let Some(max) = self.attr_usize(node, "maxlength") {
            if value.chars().count() > max {
                return Ok(false);
            }
        }

        if let Some(pattern) = self.attr(node, "pattern") {
            // Pattern must match the whole value. Unparseable patterns are
            // ignored, as the page environment ignores them.
            if let Ok(regex) = Regex::new(&format!("^(?:{pattern})$")) {
                if !regex.is_match(value) {
                    return Ok(false);
                }
            }
        }

        match self.attr(node, "type") {
            Some("email") => Ok(is_email_like(value)),
            Some("url") => Ok(is_url_like(value)),
            _ => Ok(true),
        }
    }

    fn attr_usize(&self, node: NodeId, name: &str) -> Option<usize> {
        self.attr(node, name).and_then(|raw| raw.parse().ok())
    }
}

fn is_email_like(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !value.chars().any(char::is_whitespace)
}

fn is_url_like(value: &str) -> bool {
    let after_scheme = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match after_scheme {
        Some(rest) => !rest.is_empty() && !rest.chars().any(char::is_whitespace),
        None => false,
    }
}
