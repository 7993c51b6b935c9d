//! Validation engine
//!
//! Discovers qualifying forms, decorates every field with a wrapper and a
//! status icon, and routes value-changed / focus-lost events to the
//! per-field status update and the aggregate submit-state recompute. All
//! work is synchronous; each event runs to completion before the next.

use std::collections::HashMap;

use tracing::{debug, trace};

use formguard_dom::{Document, NodeId, Result};
use formguard_validation::{FieldIdentity, Rule, RuleSet};

use crate::status::{FieldStatus, StatusView, CLASS_INVALID, CLASS_VALID};

/// Forms the engine wires itself to.
pub const FORM_SELECTOR: &str = "form.needs-validation";
/// Fields validated within each qualifying form.
pub const FIELD_SELECTOR: &str = "input";
/// The submit control gated on aggregate validity.
pub const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";

/// Class of the container wrapped around each field.
pub const WRAPPER_CLASS: &str = "input-wrapper";
/// Class of the status icon created next to each field.
pub const ICON_CLASS: &str = "validation-icon";

/// One decorated field: the input plus the status icon created for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    pub field: NodeId,
    pub icon: NodeId,
}

/// One wired form: its fields and, when present, its submit control.
#[derive(Debug, Clone)]
pub struct FormBinding {
    pub form: NodeId,
    pub fields: Vec<FieldBinding>,
    pub submit: Option<NodeId>,
}

/// The event kinds the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Value changed (a keystroke, an edit, a programmatic set + event).
    Input,
    /// Focus left the field without necessarily changing it.
    Blur,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    ValidateField(FieldBinding),
    RefreshSubmit(usize),
}

/// The installed validator: bindings plus the listener table routing events
/// to per-field and aggregate updates.
#[derive(Debug)]
pub struct FormValidator {
    rules: RuleSet,
    forms: Vec<FormBinding>,
    listeners: HashMap<(NodeId, EventKind), Vec<Action>>,
}

impl FormValidator {
    /// Installs validation on every `form.needs-validation` in the document
    /// with the built-in rule table.
    ///
    /// Forms added to the document afterwards are not picked up; reinstall
    /// to observe them.
    pub fn install(doc: &mut Document) -> Result<Self> {
        Self::install_with(doc, RuleSet::built_in())
    }

    /// Installs with a caller-supplied rule table.
    pub fn install_with(doc: &mut Document, rules: RuleSet) -> Result<Self> {
        let form_nodes = doc.query_selector_all(FORM_SELECTOR)?;
        debug!(forms = form_nodes.len(), "installing form validation");

        let mut forms = Vec::with_capacity(form_nodes.len());
        let mut listeners: HashMap<(NodeId, EventKind), Vec<Action>> = HashMap::new();

        for (index, form) in form_nodes.into_iter().enumerate() {
            let submit = doc.query_selector_within(form, SUBMIT_SELECTOR)?;
            if submit.is_none() {
                debug!(form = form.index(), "form has no submit control, gating skipped");
            }

            let mut fields = Vec::new();
            for field in doc.query_selector_all_within(form, FIELD_SELECTOR)? {
                let binding = decorate(doc, field)?;
                listeners
                    .entry((field, EventKind::Input))
                    .or_default()
                    .push(Action::ValidateField(binding));
                listeners
                    .entry((field, EventKind::Blur))
                    .or_default()
                    .push(Action::ValidateField(binding));
                fields.push(binding);
            }

            // The aggregate listener sits on the form itself and is reached
            // from any field through bubbling.
            listeners
                .entry((form, EventKind::Input))
                .or_default()
                .push(Action::RefreshSubmit(index));

            forms.push(FormBinding {
                form,
                fields,
                submit,
            });
        }

        Ok(Self {
            rules,
            forms,
            listeners,
        })
    }

    /// The wired forms, in document order.
    pub fn forms(&self) -> &[FormBinding] {
        &self.forms
    }

    /// Delivers one event to a node: the target's listeners run first, then
    /// each ancestor's, root-most last.
    pub fn dispatch(&self, doc: &mut Document, target: NodeId, kind: EventKind) -> Result<()> {
        self.run_actions(doc, target, kind)?;
        for ancestor in doc.ancestors(target) {
            self.run_actions(doc, ancestor, kind)?;
        }
        Ok(())
    }

    /// Sets a field's value and delivers the value-changed event, the way a
    /// keystroke would.
    pub fn type_text(&self, doc: &mut Document, field: NodeId, text: &str) -> Result<()> {
        doc.set_value(field, text)?;
        self.dispatch(doc, field, EventKind::Input)
    }

    /// Delivers a focus-lost event to a field.
    pub fn blur(&self, doc: &mut Document, field: NodeId) -> Result<()> {
        self.dispatch(doc, field, EventKind::Blur)
    }

    /// Evaluates a field's raw rule: the table entry for its identity, or
    /// the document's built-in constraint check when none matches.
    pub fn check_field(&self, doc: &Document, field: NodeId) -> Result<bool> {
        let identity = FieldIdentity {
            name: doc.attr(field, "name").unwrap_or_default(),
            input_type: doc.attr(field, "type").unwrap_or_default(),
        };
        let value = doc.value(field)?;
        let ok = match self.rules.rule_for(identity) {
            Rule::Native => doc.check_validity(field)?,
            rule => rule.evaluate(value, false),
        };
        Ok(ok)
    }

    fn run_actions(&self, doc: &mut Document, node: NodeId, kind: EventKind) -> Result<()> {
        let Some(actions) = self.listeners.get(&(node, kind)) else {
            return Ok(());
        };
        for action in actions {
            match *action {
                Action::ValidateField(binding) => self.validate_input(doc, binding)?,
                Action::RefreshSubmit(index) => self.refresh_submit(doc, index)?,
            }
        }
        Ok(())
    }

    /// Recomputes and renders one field's status.
    fn validate_input(&self, doc: &mut Document, binding: FieldBinding) -> Result<()> {
        let status = if doc.value(binding.field)?.is_empty() {
            FieldStatus::Neutral
        } else if self.check_field(doc, binding.field)? {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid
        };
        trace!(field = binding.field.index(), ?status, "field status");
        render_status(doc, binding, status)
    }

    /// Recomputes the conjunction of raw rule results across the form and
    /// mirrors it onto the submit control.
    ///
    /// Uses the raw rule, not the empty-aware status: an empty field whose
    /// rule rejects the empty string blocks submission even while its icon
    /// is neutral, and one whose fallback accepts emptiness does not.
    fn refresh_submit(&self, doc: &mut Document, index: usize) -> Result<()> {
        let form = &self.forms[index];
        let mut all_valid = true;
        for binding in &form.fields {
            if !self.check_field(doc, binding.field)? {
                all_valid = false;
                break;
            }
        }

        let Some(submit) = form.submit else {
            return Ok(());
        };
        trace!(form = form.form.index(), all_valid, "submit state");
        doc.set_disabled(submit, !all_valid)?;
        doc.set_style_property(submit, "opacity", if all_valid { "1" } else { "0.5" })?;
        doc.set_style_property(
            submit,
            "cursor",
            if all_valid { "pointer" } else { "not-allowed" },
        )?;
        Ok(())
    }
}

/// Wraps a field in a `div.input-wrapper` and creates its empty
/// `span.validation-icon` alongside.
fn decorate(doc: &mut Document, field: NodeId) -> Result<FieldBinding> {
    let parent = doc.parent(field).unwrap_or_else(|| doc.root());
    let wrapper = doc.create_detached_element("div", &[("class", WRAPPER_CLASS)]);
    doc.insert_before(parent, wrapper, field)?;
    doc.append_child(wrapper, field);
    let icon = doc.create_element(wrapper, "span", &[("class", ICON_CLASS)]);
    Ok(FieldBinding { field, icon })
}

/// Applies a status to a binding: reset both classes and the icon, then
/// apply exactly the state the status calls for. Running it twice with the
/// same status lands in the same place.
fn render_status(doc: &mut Document, binding: FieldBinding, status: FieldStatus) -> Result<()> {
    doc.remove_class(binding.field, CLASS_VALID)?;
    doc.remove_class(binding.field, CLASS_INVALID)?;
    doc.set_text(binding.icon, "")?;

    let view = StatusView::of(status);
    if let Some(class) = view.css_class {
        doc.add_class(binding.field, class)?;
    }
    if !view.icon.is_empty() {
        doc.set_text(binding.icon, view.icon)?;
    }
    if let Some(color) = view.color {
        doc.set_style_property(binding.icon, "color", color)?;
    }
    Ok(())
}
