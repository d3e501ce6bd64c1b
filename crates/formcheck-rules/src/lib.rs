//! Formcheck Rules
//!
//! Parses declarative rule lists (`{required,minlength(3)}`) into typed rules
//! and evaluates them against field values. Every evaluator is a pure
//! function; state tracking lives in the `formcheck` crate.

pub mod date;
pub mod email;
pub mod error;
pub mod eval;
pub mod numeric;
pub mod parser;
pub mod password;
pub mod rule;
pub mod string;

pub use error::{EvaluationFault, ParseWarning};
pub use eval::{evaluate, EvalContext, FieldValue, RuleOutcome, TagKind};
pub use numeric::{format_money, MoneyFormat, Reformatted};
pub use parser::{extract_rule_blob, parse_attribute, parse_rules, ParsedRules};
pub use rule::{Rule, RuleKind};
