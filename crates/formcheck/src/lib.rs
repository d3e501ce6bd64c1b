//! Formcheck
//!
//! Declarative form validation. Fields declare rules in a class-like
//! attribute (`{required,minlength(3)}`); a [`Form`] parses them, runs them
//! on demand, tracks per-field validity and error messages, and aggregates
//! validity for the whole form.
//!
//! The UI layer stays outside: each field is reached through a
//! [`FieldAccess`] handle.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use formcheck::{FieldDecl, Form, MemoryField};
//!
//! let mut form = Form::new("signup");
//! let name = Rc::new(MemoryField::input(""));
//! form.register_field(FieldDecl::new("validate{required}", name.clone()).with_id("name")).unwrap();
//!
//! assert!(!form.validate_all());
//! assert_eq!(form.first_invalid_field(), Some("name"));
//!
//! name.set("Ana");
//! assert!(form.validate_all());
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod messages;

pub use config::FormConfig;
pub use error::FormError;
pub use field::{FieldAccess, FieldDecl, FieldState, MemoryField};
pub use form::{Form, ValidationOutcome};
pub use messages::{Locale, MessageResolver};

pub use formcheck_rules::{
    EvaluationFault, FieldValue, MoneyFormat, ParseWarning, Rule, RuleKind, TagKind,
};

/// Rule parsing and evaluation primitives
pub use formcheck_rules as rules;
