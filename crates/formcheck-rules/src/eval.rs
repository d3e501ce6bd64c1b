// File: formcheck-rules/src/eval.rs
// Purpose: Evaluate one rule against one field value

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::is_valid_date;
use crate::email::is_valid_email;
use crate::error::EvaluationFault;
use crate::numeric::{
    below_max, exceeds_min, format_money, is_decimal, is_digits, is_number, MoneyFormat,
    Reformatted,
};
use crate::password::{is_strong_password, DEFAULT_MIN_LENGTH};
use crate::rule::{Rule, RuleKind};
use crate::string::{has_max_length, has_min_length, is_alphanumeric, is_text};

/// Current value of a field as read from the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Flag(_) => None,
        }
    }

    /// Text values are trimmed; flags pass through
    pub fn trimmed(&self) -> FieldValue {
        match self {
            FieldValue::Text(text) => FieldValue::Text(text.trim().to_string()),
            FieldValue::Flag(flag) => FieldValue::Flag(*flag),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.trim().is_empty())
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// Kind of element backing a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    #[default]
    Input,
    Select,
    Textarea,
    Other,
}

impl TagKind {
    pub fn from_tag_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "input" => TagKind::Input,
            "select" => TagKind::Select,
            "textarea" => TagKind::Textarea,
            _ => TagKind::Other,
        }
    }
}

/// Everything a rule may consult besides the value itself
pub struct EvalContext<'a> {
    pub enabled: bool,
    pub checked: bool,
    pub tag: TagKind,
    pub password_min_length: usize,
    pub money: MoneyFormat,
    /// Current value of another field in the same form
    pub lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> EvalContext<'a> {
    pub fn new(lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self {
            enabled: true,
            checked: false,
            tag: TagKind::Input,
            password_min_length: DEFAULT_MIN_LENGTH,
            money: MoneyFormat::default(),
            lookup,
        }
    }
}

/// Result of one rule on one value
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub pass: bool,
    /// Which default message applies when the rule fails
    pub key: Option<RuleKind>,
    /// Rewritten value produced by formatting rules
    pub reformatted: Option<Reformatted>,
}

impl RuleOutcome {
    fn pass(key: Option<RuleKind>) -> Self {
        Self {
            pass: true,
            key,
            reformatted: None,
        }
    }

    fn check(key: RuleKind, pass: bool) -> Self {
        Self {
            pass,
            key: Some(key),
            reformatted: None,
        }
    }
}

/// Evaluate `rule` against `value`
///
/// Failing rules report `pass == false`; `Err` is reserved for rules that
/// cannot be applied at all (wrong value type, unusable date template).
/// Disabled fields pass everything, and only `required` and `checked` look
/// at empty values.
pub fn evaluate(
    rule: &Rule,
    value: &FieldValue,
    ctx: &EvalContext<'_>,
) -> Result<RuleOutcome, EvaluationFault> {
    let key = rule.kind();

    if !ctx.enabled {
        return Ok(RuleOutcome::pass(key));
    }

    let kind = match (rule, key) {
        (Rule::Unknown(_), _) | (_, None) => return Ok(RuleOutcome::pass(None)),
        (_, Some(kind)) => kind,
    };

    match rule {
        Rule::Required => return Ok(RuleOutcome::check(kind, is_present(value, ctx.tag))),
        Rule::Checked => return Ok(RuleOutcome::check(kind, ctx.checked)),
        _ => {}
    }

    let text = value
        .as_text()
        .ok_or(EvaluationFault::TypeMismatch { rule: kind })?
        .trim();

    if text.is_empty() {
        return Ok(RuleOutcome::pass(key));
    }

    let pass = match rule {
        Rule::Digit => is_digits(text),
        Rule::Number => is_number(text),
        Rule::Decimal => is_decimal(text),
        Rule::Text => is_text(text),
        Rule::Alphanumeric => is_alphanumeric(text),
        Rule::Email => is_valid_email(text),
        Rule::Password => is_strong_password(text, ctx.password_min_length),
        Rule::Equals(other) => compare_with(other, ctx).is_some_and(|v| v == text),
        Rule::Distinct(other) => compare_with(other, ctx).is_some_and(|v| v != text),
        Rule::MinLength(min) => has_min_length(text, *min),
        Rule::MaxLength(max) => has_max_length(text, *max),
        Rule::MinValue(min) => exceeds_min(text, *min),
        Rule::MaxValue(max) => below_max(text, *max),
        Rule::DateFormat(template) => is_valid_date(text, template)?,
        Rule::Money => {
            return Ok(RuleOutcome {
                pass: true,
                key,
                reformatted: Some(format_money(text, ctx.money)),
            })
        }
        Rule::Required | Rule::Checked | Rule::Unknown(_) => true,
    };

    Ok(RuleOutcome::check(kind, pass))
}

fn is_present(value: &FieldValue, tag: TagKind) -> bool {
    match value {
        FieldValue::Flag(flag) => *flag,
        FieldValue::Text(text) => {
            let text = text.trim();
            !(text.is_empty() || (tag == TagKind::Select && text == "0"))
        }
    }
}

/// Value of the referenced field; unknown references fail the rule
fn compare_with(other: &str, ctx: &EvalContext<'_>) -> Option<String> {
    let found = (ctx.lookup)(other);
    if found.is_none() {
        tracing::warn!(field = other, "rule references a field that is not registered");
    }
    found.map(|v| v.trim().to_string())
}
