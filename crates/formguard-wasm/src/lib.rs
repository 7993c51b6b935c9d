//! FormGuard WASM
//!
//! WebAssembly bindings for FormGuard validation. Runs the same field rules
//! in the browser that the headless engine runs in tests, so the page script
//! stays a thin wiring layer: read the field, call in here, paint what comes
//! back.
//!
//! The native-fallback rule belongs to the browser, so callers pass the
//! field's own `input.checkValidity()` result alongside its value.

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

use formguard::{FieldStatus, StatusView};
use formguard_validation::{FieldIdentity, RuleSet};

static RULES: Lazy<RuleSet> = Lazy::new(RuleSet::built_in);

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    web_sys::console::debug_1(&JsValue::from_str("formguard validation ready"));
}

/// Evaluate a field's raw rule.
///
/// # Arguments
/// * `name` - The field's `name` attribute
/// * `input_type` - The field's `type` attribute
/// * `value` - The current value
/// * `native_valid` - The browser's own `checkValidity()` result, used when
///   no built-in rule matches the field
///
/// # Example (JavaScript)
/// ```javascript
/// const ok = checkValidity(input.name, input.type, input.value, input.checkValidity());
/// ```
#[wasm_bindgen(js_name = checkValidity)]
pub fn check_validity(name: &str, input_type: &str, value: &str, native_valid: bool) -> bool {
    RULES.check_validity(FieldIdentity { name, input_type }, value, native_valid)
}

/// Full render model for a field: status, CSS class, icon glyph and color.
/// Empty values always come back neutral.
///
/// # Example (JavaScript)
/// ```javascript
/// const view = fieldStatus(input.name, input.type, input.value, input.checkValidity());
/// // { status: "invalid", cssClass: "is-invalid", icon: "✕", color: "#ef4444" }
/// ```
#[wasm_bindgen(js_name = fieldStatus)]
pub fn field_status(
    name: &str,
    input_type: &str,
    value: &str,
    native_valid: bool,
) -> Result<JsValue, JsValue> {
    let rule_ok = check_validity(name, input_type, value, native_valid);
    let view = StatusView::of(FieldStatus::from_value(value, rule_ok));
    Ok(serde_wasm_bindgen::to_value(&view)?)
}

/// Quick username validation
#[wasm_bindgen(js_name = isValidUsername)]
pub fn is_valid_username_js(username: &str) -> bool {
    formguard_validation::is_valid_username(username)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    formguard_validation::is_valid_email(email)
}

/// Quick password validation
#[wasm_bindgen(js_name = isValidPassword)]
pub fn is_valid_password_js(password: &str) -> bool {
    formguard_validation::is_valid_password(password)
}
