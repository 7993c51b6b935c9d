//! End-to-end tests driving a fixture document through the validator the
//! way a user session would: install, type, blur, and watch classes, icons
//! and the submit control.

use pretty_assertions::assert_eq;
use rstest::rstest;

use formguard::engine::{ICON_CLASS, WRAPPER_CLASS};
use formguard::{FieldBinding, FormValidator};
use formguard_dom::{Document, NodeId};

struct SignupForm {
    form: NodeId,
    username: NodeId,
    password: NodeId,
    submit: NodeId,
}

fn signup_fixture(doc: &mut Document) -> SignupForm {
    let body = doc.create_element(doc.root(), "body", &[]);
    let form = doc.create_element(body, "form", &[("class", "needs-validation")]);
    let username = doc.create_element(form, "input", &[("type", "text"), ("name", "username")]);
    let password = doc.create_element(
        form,
        "input",
        &[("type", "password"), ("name", "password")],
    );
    let submit = doc.create_element(form, "button", &[("type", "submit")]);
    SignupForm {
        form,
        username,
        password,
        submit,
    }
}

fn icon_for(validator: &FormValidator, field: NodeId) -> NodeId {
    validator
        .forms()
        .iter()
        .flat_map(|form| form.fields.iter())
        .find(|binding| binding.field == field)
        .map(|binding| binding.icon)
        .expect("field is bound")
}

#[test]
fn install_wraps_each_field_with_an_icon() {
    let mut doc = Document::new();
    let fixture = signup_fixture(&mut doc);
    let validator = FormValidator::install(&mut doc).unwrap();

    assert_eq!(validator.forms().len(), 1);
    let bindings: &[FieldBinding] = &validator.forms()[0].fields;
    assert_eq!(bindings.len(), 2);

    for binding in bindings {
        let wrapper = doc.parent(binding.field).unwrap();
        assert!(doc.has_class(wrapper, WRAPPER_CLASS));
        assert_eq!(doc.parent(wrapper), Some(fixture.form));
        assert_eq!(doc.children(wrapper), &[binding.field, binding.icon]);
        assert!(doc.has_class(binding.icon, ICON_CLASS));
        assert_eq!(doc.text(binding.icon), "");
    }
    assert_eq!(validator.forms()[0].submit, Some(fixture.submit));
}

#[test]
fn valid_fields_enable_the_submit_control() {
    let mut doc = Document::new();
    let fixture = signup_fixture(&mut doc);
    let validator = FormValidator::install(&mut doc).unwrap();

    validator
        .type_text(&mut doc, fixture.username, "Alice")
        .unwrap();
    validator
        .type_text(&mut doc, fixture.password, "Secret1!")
        .unwrap();

    assert!(doc.has_class(fixture.username, "is-valid"));
    assert!(doc.has_class(fixture.password, "is-valid"));
    let icon = icon_for(&validator, fixture.password);
    assert_eq!(doc.text(icon), "✓");
    assert_eq!(doc.style_property(icon, "color"), Some("#10b981"));

    assert!(!doc.is_disabled(fixture.submit));
    assert_eq!(doc.style_property(fixture.submit, "opacity"), Some("1"));
    assert_eq!(doc.style_property(fixture.submit, "cursor"), Some("pointer"));
}

#[test]
fn weak_password_disables_the_submit_control() {
    let mut doc = Document::new();
    let fixture = signup_fixture(&mut doc);
    let validator = FormValidator::install(&mut doc).unwrap();

    validator
        .type_text(&mut doc, fixture.username, "Alice")
        .unwrap();
    validator
        .type_text(&mut doc, fixture.password, "Secret1!")
        .unwrap();
    validator
        .type_text(&mut doc, fixture.password, "secret")
        .unwrap();

    assert!(doc.has_class(fixture.password, "is-invalid"));
    assert!(!doc.has_class(fixture.password, "is-valid"));
    let icon = icon_for(&validator, fixture.password);
    assert_eq!(doc.text(icon), "✕");
    assert_eq!(doc.style_property(icon, "color"), Some("#ef4444"));

    assert!(doc.is_disabled(fixture.submit));
    assert_eq!(doc.style_property(fixture.submit, "opacity"), Some("0.5"));
    assert_eq!(
        doc.style_property(fixture.submit, "cursor"),
        Some("not-allowed")
    );
}

#[test]
fn clearing_a_field_returns_it_to_neutral() {
    let mut doc = Document::new();
    let fixture = signup_fixture(&mut doc);
    let validator = FormValidator::install(&mut doc).unwrap();

    validator
        .type_text(&mut doc, fixture.username, "bob")
        .unwrap();
    assert!(doc.has_class(fixture.username, "is-invalid"));

    validator.type_text(&mut doc, fixture.username, "").unwrap();
    assert!(!doc.has_class(fixture.username, "is-valid"));
    assert!(!doc.has_class(fixture.username, "is-invalid"));
    assert_eq!(doc.text(icon_for(&validator, fixture.username)), "");
}

#[test]
fn repeated_events_render_the_same_state() {
    let mut doc = Document::new();
    let fixture = signup_fixture(&mut doc);
    let validator = FormValidator::install(&mut doc).unwrap();

    validator
        .type_text(&mut doc, fixture.username, "Alice")
        .unwrap();
    validator.blur(&mut doc, fixture.username).unwrap();
    validator.blur(&mut doc, fixture.username).unwrap();

    let valid_count = doc
        .classes(fixture.username)
        .iter()
        .filter(|class| class.as_str() == "is-valid")
        .count();
    assert_eq!(valid_count, 1);
    assert_eq!(doc.text(icon_for(&validator, fixture.username)), "✓");
}

#[test]
fn blur_rechecks_a_programmatically_set_value() {
    let mut doc = Document::new();
    let fixture = signup_fixture(&mut doc);
    let validator = FormValidator::install(&mut doc).unwrap();

    doc.set_value(fixture.username, "Alice").unwrap();
    assert!(!doc.has_class(fixture.username, "is-valid"));

    validator.blur(&mut doc, fixture.username).unwrap();
    assert!(doc.has_class(fixture.username, "is-valid"));
}

#[test]
fn one_invalid_field_keeps_the_form_gated() {
    let mut doc = Document::new();
    let fixture = signup_fixture(&mut doc);
    let validator = FormValidator::install(&mut doc).unwrap();

    validator
        .type_text(&mut doc, fixture.password, "Secret1!")
        .unwrap();
    // Username is still empty and its pattern rejects the empty string.
    assert!(doc.is_disabled(fixture.submit));

    validator
        .type_text(&mut doc, fixture.username, "Alice")
        .unwrap();
    assert!(!doc.is_disabled(fixture.submit));
}

#[test]
fn submit_gate_ignores_neutral_status() {
    // An optional unmatched field counts as valid for the gate through the
    // native fallback even while its icon is neutral.
    let mut doc = Document::new();
    let body = doc.create_element(doc.root(), "body", &[]);
    let form = doc.create_element(body, "form", &[("class", "needs-validation")]);
    let username = doc.create_element(form, "input", &[("type", "text"), ("name", "username")]);
    let nickname = doc.create_element(form, "input", &[("type", "text"), ("name", "nickname")]);
    let submit = doc.create_element(form, "button", &[("type", "submit")]);

    let validator = FormValidator::install(&mut doc).unwrap();
    validator.type_text(&mut doc, username, "Alice").unwrap();

    assert!(!doc.has_class(nickname, "is-valid"));
    assert!(!doc.has_class(nickname, "is-invalid"));
    assert!(!doc.is_disabled(submit));
}

#[test]
fn required_fallback_field_gates_until_filled() {
    let mut doc = Document::new();
    let body = doc.create_element(doc.root(), "body", &[]);
    let form = doc.create_element(body, "form", &[("class", "needs-validation")]);
    let username = doc.create_element(form, "input", &[("type", "text"), ("name", "username")]);
    let consent = doc.create_element(form, "input", &[("name", "consent"), ("required", "")]);
    let submit = doc.create_element(form, "button", &[("type", "submit")]);

    let validator = FormValidator::install(&mut doc).unwrap();
    validator.type_text(&mut doc, username, "Alice").unwrap();
    assert!(doc.is_disabled(submit));

    validator.type_text(&mut doc, consent, "yes").unwrap();
    assert!(!doc.is_disabled(submit));
}

#[test]
fn form_without_submit_control_still_validates_fields() {
    let mut doc = Document::new();
    let body = doc.create_element(doc.root(), "body", &[]);
    let form = doc.create_element(body, "form", &[("class", "needs-validation")]);
    let email = doc.create_element(form, "input", &[("type", "email"), ("name", "contact")]);

    let validator = FormValidator::install(&mut doc).unwrap();
    assert_eq!(validator.forms()[0].submit, None);

    validator.type_text(&mut doc, email, "a@b.co").unwrap();
    assert!(doc.has_class(email, "is-valid"));
    validator.type_text(&mut doc, email, "a@b").unwrap();
    assert!(doc.has_class(email, "is-invalid"));
}

#[rstest]
#[case("a@b.co", "is-valid", "✓")]
#[case("a@b", "is-invalid", "✕")]
#[case("a b@c.com", "is-invalid", "✕")]
fn email_fields_are_classified_by_type(
    #[case] value: &str,
    #[case] class: &str,
    #[case] glyph: &str,
) {
    let mut doc = Document::new();
    let body = doc.create_element(doc.root(), "body", &[]);
    let form = doc.create_element(body, "form", &[("class", "needs-validation")]);
    let email = doc.create_element(form, "input", &[("type", "email"), ("name", "contact")]);
    doc.create_element(form, "button", &[("type", "submit")]);

    let validator = FormValidator::install(&mut doc).unwrap();
    validator.type_text(&mut doc, email, value).unwrap();

    assert!(doc.has_class(email, class));
    assert_eq!(doc.text(icon_for(&validator, email)), glyph);
}

#[test]
fn unmarked_forms_are_left_alone() {
    let mut doc = Document::new();
    let body = doc.create_element(doc.root(), "body", &[]);
    let form = doc.create_element(body, "form", &[]);
    let input = doc.create_element(form, "input", &[("name", "username")]);

    let validator = FormValidator::install(&mut doc).unwrap();
    assert!(validator.forms().is_empty());
    assert_eq!(doc.parent(input), Some(form));
}

#[test]
fn each_marked_form_is_gated_independently() {
    let mut doc = Document::new();
    let body = doc.create_element(doc.root(), "body", &[]);

    let first = doc.create_element(body, "form", &[("class", "needs-validation")]);
    let first_field = doc.create_element(first, "input", &[("name", "username")]);
    let first_submit = doc.create_element(first, "button", &[("type", "submit")]);

    let second = doc.create_element(body, "form", &[("class", "needs-validation")]);
    let second_field = doc.create_element(second, "input", &[("name", "password")]);
    let second_submit = doc.create_element(second, "button", &[("type", "submit")]);

    let validator = FormValidator::install(&mut doc).unwrap();
    validator.type_text(&mut doc, first_field, "Alice").unwrap();

    assert!(!doc.is_disabled(first_submit));
    // The second form saw no event yet, so its control is untouched.
    assert_eq!(doc.style_property(second_submit, "opacity"), None);

    validator.type_text(&mut doc, second_field, "nope").unwrap();
    assert!(doc.is_disabled(second_submit));
    assert!(!doc.is_disabled(first_submit));
}
