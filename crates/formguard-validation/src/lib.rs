//! FormGuard Validation
//!
//! Pure validation rules for form fields, shared by the headless engine and
//! the WASM client-side bindings. Rules are total functions over the field's
//! current value with no side effects; the rule table in [`rules`] decides
//! which rule a field gets from its `name`/`type` identity.

pub mod email;
pub mod password;
pub mod rules;
pub mod username;

// Re-export all validators
pub use email::*;
pub use password::*;
pub use rules::*;
pub use username::*;
