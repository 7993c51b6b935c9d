//! Simple selector matching
//!
//! Covers the grammar the validation engine's selection contract needs:
//! an optional tag name, any number of `.class` qualifiers, and one
//! `[attr="value"]` qualifier. Combinators, pseudo-classes and id selectors
//! are out of scope and rejected as unsupported.

use crate::{Document, DomError, NodeId, Result};

/// A parsed simple selector, e.g. `form.needs-validation` or
/// `button[type="submit"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
    attr: Option<(String, String)>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self> {
        let unsupported = || DomError::UnsupportedSelector(input.to_string());
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(unsupported());
        }

        let mut tag = None;
        let mut classes = Vec::new();
        let mut attr = None;
        let mut rest = trimmed;

        let tag_end = rest.find(['.', '[']).unwrap_or(rest.len());
        if tag_end > 0 {
            let candidate = &rest[..tag_end];
            if !candidate.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(unsupported());
            }
            tag = Some(candidate.to_ascii_lowercase());
            rest = &rest[tag_end..];
        }

        while let Some(stripped) = rest.strip_prefix('.') {
            let end = stripped.find(['.', '[']).unwrap_or(stripped.len());
            if end == 0 {
                return Err(unsupported());
            }
            classes.push(stripped[..end].to_string());
            rest = &stripped[end..];
        }

        if let Some(stripped) = rest.strip_prefix('[') {
            let body = stripped.strip_suffix(']').ok_or_else(unsupported)?;
            let (name, value) = body.split_once('=').ok_or_else(unsupported)?;
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            if name.is_empty() {
                return Err(unsupported());
            }
            attr = Some((name.to_ascii_lowercase(), value.to_string()));
            rest = "";
        }

        if !rest.is_empty() {
            return Err(unsupported());
        }
        if tag.is_none() && classes.is_empty() && attr.is_none() {
            return Err(unsupported());
        }

        Ok(Self { tag, classes, attr })
    }

    pub(crate) fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(element) = doc.element(node) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        for class in &self.classes {
            if !doc.has_class(node, class) {
                return false;
            }
        }
        if let Some((name, value)) = &self.attr {
            if doc.attr(node, name) != Some(value.as_str()) {
                return false;
            }
        }
        true
    }
}
