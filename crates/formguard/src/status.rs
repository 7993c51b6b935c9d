//! Per-field status and its render model

use serde::{Deserialize, Serialize};

/// Class toggled on a field whose value passes its rule.
pub const CLASS_VALID: &str = "is-valid";
/// Class toggled on a field whose value fails its rule.
pub const CLASS_INVALID: &str = "is-invalid";
/// Icon glyph for a valid field.
pub const ICON_VALID: &str = "✓";
/// Icon glyph for an invalid field.
pub const ICON_INVALID: &str = "✕";
/// Icon color for a valid field.
pub const COLOR_VALID: &str = "#10b981";
/// Icon color for an invalid field.
pub const COLOR_INVALID: &str = "#ef4444";

/// Derived status of one field. Pure function of the field's current value
/// and identity; recomputed on every event, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    /// Empty value: no judgement either way.
    Neutral,
    Valid,
    Invalid,
}

impl FieldStatus {
    /// Status for a value given its raw rule result. Empty values are always
    /// neutral, whatever the rule would say.
    pub fn from_value(value: &str, rule_ok: bool) -> Self {
        if value.is_empty() {
            FieldStatus::Neutral
        } else if rule_ok {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid
        }
    }
}

/// Render model for one field's status: everything a view layer needs to
/// paint the field and its icon, with no rule evaluation of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub status: FieldStatus,
    /// Class to put on the field, if any.
    pub css_class: Option<&'static str>,
    /// Icon glyph, empty for neutral.
    pub icon: &'static str,
    /// Icon color, if any.
    pub color: Option<&'static str>,
}

impl StatusView {
    pub fn of(status: FieldStatus) -> Self {
        match status {
            FieldStatus::Neutral => Self {
                status,
                css_class: None,
                icon: "",
                color: None,
            },
            FieldStatus::Valid => Self {
                status,
                css_class: Some(CLASS_VALID),
                icon: ICON_VALID,
                color: Some(COLOR_VALID),
            },
            FieldStatus::Invalid => Self {
                status,
                css_class: Some(CLASS_INVALID),
                icon: ICON_INVALID,
                color: Some(COLOR_INVALID),
            },
        }
    }
}
