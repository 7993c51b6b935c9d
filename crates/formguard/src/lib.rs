//! FormGuard
//!
//! Real-time client-side form validation. As the user types, every input in
//! a qualifying form is marked valid, invalid or neutral via CSS classes and
//! an adjacent status icon, and the form's submit control stays disabled
//! until every field passes its rule.
//!
//! The engine is instantiated explicitly against a document, so embedders
//! and tests decide when "content loaded" has happened:
//!
//! ```
//! use formguard::FormValidator;
//! use formguard_dom::Document;
//!
//! let mut doc = Document::new();
//! let form = doc.create_element(doc.root(), "form", &[("class", "needs-validation")]);
//! let field = doc.create_element(form, "input", &[("type", "text"), ("name", "username")]);
//! doc.create_element(form, "button", &[("type", "submit")]);
//!
//! let validator = FormValidator::install(&mut doc).unwrap();
//! validator.type_text(&mut doc, field, "Alice").unwrap();
//! assert!(doc.has_class(field, "is-valid"));
//! ```

pub mod engine;
pub mod status;

pub use engine::{EventKind, FieldBinding, FormBinding, FormValidator};
pub use status::{FieldStatus, StatusView};

// Re-export the building blocks embedders wire against
pub use formguard_dom as dom;
pub use formguard_validation as validation;
