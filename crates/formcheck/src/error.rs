// File: formcheck/src/error.rs
// Purpose: Errors returned by form operations

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field `{0}` is already registered")]
    DuplicateFieldId(String),

    #[error("no field `{0}` in this form")]
    UnknownField(String),
}
