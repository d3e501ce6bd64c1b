// File: formcheck-rules/src/error.rs
// Purpose: Parse warnings and evaluation faults

use thiserror::Error;

use crate::rule::RuleKind;

/// A rule token that could not be turned into a typed rule.
///
/// Warnings never fail a field: the offending token is kept as a no-op rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("rule `{rule}` takes no parameter, got `{parameter}`")]
    UnexpectedParameter { rule: RuleKind, parameter: String },

    #[error("rule `{rule}` requires a parameter")]
    MissingParameter { rule: RuleKind },

    #[error("unterminated parameter list in `{0}`")]
    Unterminated(String),

    #[error("invalid parameter `{parameter}` for rule `{rule}`")]
    InvalidParameter { rule: RuleKind, parameter: String },
}

/// Unexpected failure while evaluating a rule.
///
/// Contained at the field boundary: the field is marked invalid and the
/// remaining fields of the form are still validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationFault {
    #[error("rule `{rule}` cannot be applied to a boolean value")]
    TypeMismatch { rule: RuleKind },

    #[error("date template `{template}` has no {component} component")]
    DateTemplate {
        template: String,
        component: &'static str,
    },

    #[error("date template `{template}` does not compile: {reason}")]
    InvalidPattern { template: String, reason: String },
}
