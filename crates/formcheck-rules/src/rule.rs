// File: formcheck-rules/src/rule.rs
// Purpose: Rule kinds and typed rule values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseWarning;

/// The closed set of rule kinds a field can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Required,
    Checked,
    Digit,
    Money,
    Number,
    Decimal,
    Text,
    Alphanumeric,
    Email,
    Password,
    Equals,
    Distinct,
    MinLength,
    MaxLength,
    MinValue,
    MaxValue,
    DateFormat,
}

impl RuleKind {
    pub const ALL: [RuleKind; 17] = [
        RuleKind::Required,
        RuleKind::Checked,
        RuleKind::Digit,
        RuleKind::Money,
        RuleKind::Number,
        RuleKind::Decimal,
        RuleKind::Text,
        RuleKind::Alphanumeric,
        RuleKind::Email,
        RuleKind::Password,
        RuleKind::Equals,
        RuleKind::Distinct,
        RuleKind::MinLength,
        RuleKind::MaxLength,
        RuleKind::MinValue,
        RuleKind::MaxValue,
        RuleKind::DateFormat,
    ];

    /// Name as written in a rule declaration
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Checked => "checked",
            RuleKind::Digit => "digit",
            RuleKind::Money => "money",
            RuleKind::Number => "number",
            RuleKind::Decimal => "decimal",
            RuleKind::Text => "text",
            RuleKind::Alphanumeric => "alphanumeric",
            RuleKind::Email => "email",
            RuleKind::Password => "password",
            RuleKind::Equals => "equals",
            RuleKind::Distinct => "distinct",
            RuleKind::MinLength => "minlength",
            RuleKind::MaxLength => "maxlength",
            RuleKind::MinValue => "minvalue",
            RuleKind::MaxValue => "maxvalue",
            RuleKind::DateFormat => "dateformat",
        }
    }

    /// Look up a kind by its declared name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether the kind requires exactly one parameter
    pub fn is_parameterized(self) -> bool {
        matches!(
            self,
            RuleKind::Equals
                | RuleKind::Distinct
                | RuleKind::MinLength
                | RuleKind::MaxLength
                | RuleKind::MinValue
                | RuleKind::MaxValue
                | RuleKind::DateFormat
        )
    }

    /// Whether fields carrying this kind drop spaces as the user types
    pub fn strips_whitespace(self) -> bool {
        matches!(
            self,
            RuleKind::Digit
                | RuleKind::Number
                | RuleKind::Email
                | RuleKind::Password
                | RuleKind::DateFormat
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single validation directive with its typed parameter
///
/// `Unknown` keeps tokens that did not parse so that a malformed declaration
/// degrades to a no-op instead of breaking the whole field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "parameter", rename_all = "lowercase")]
pub enum Rule {
    Required,
    Checked,
    Digit,
    Money,
    Number,
    Decimal,
    Text,
    Alphanumeric,
    Email,
    Password,
    Equals(String),
    Distinct(String),
    MinLength(usize),
    MaxLength(usize),
    MinValue(f64),
    MaxValue(f64),
    DateFormat(String),
    Unknown(String),
}

impl Rule {
    /// Kind of the rule, `None` for unparsed tokens
    pub fn kind(&self) -> Option<RuleKind> {
        let kind = match self {
            Rule::Required => RuleKind::Required,
            Rule::Checked => RuleKind::Checked,
            Rule::Digit => RuleKind::Digit,
            Rule::Money => RuleKind::Money,
            Rule::Number => RuleKind::Number,
            Rule::Decimal => RuleKind::Decimal,
            Rule::Text => RuleKind::Text,
            Rule::Alphanumeric => RuleKind::Alphanumeric,
            Rule::Email => RuleKind::Email,
            Rule::Password => RuleKind::Password,
            Rule::Equals(_) => RuleKind::Equals,
            Rule::Distinct(_) => RuleKind::Distinct,
            Rule::MinLength(_) => RuleKind::MinLength,
            Rule::MaxLength(_) => RuleKind::MaxLength,
            Rule::MinValue(_) => RuleKind::MinValue,
            Rule::MaxValue(_) => RuleKind::MaxValue,
            Rule::DateFormat(_) => RuleKind::DateFormat,
            Rule::Unknown(_) => return None,
        };
        Some(kind)
    }

    /// Parameter rendered back to text
    pub fn parameter(&self) -> Option<String> {
        match self {
            Rule::Equals(id) | Rule::Distinct(id) => Some(id.clone()),
            Rule::MinLength(n) | Rule::MaxLength(n) => Some(n.to_string()),
            Rule::MinValue(v) | Rule::MaxValue(v) => Some(v.to_string()),
            Rule::DateFormat(template) => Some(template.clone()),
            _ => None,
        }
    }

    /// Build a parameterless rule from its kind
    pub fn simple(kind: RuleKind) -> Option<Self> {
        let rule = match kind {
            RuleKind::Required => Rule::Required,
            RuleKind::Checked => Rule::Checked,
            RuleKind::Digit => Rule::Digit,
            RuleKind::Money => Rule::Money,
            RuleKind::Number => Rule::Number,
            RuleKind::Decimal => Rule::Decimal,
            RuleKind::Text => Rule::Text,
            RuleKind::Alphanumeric => Rule::Alphanumeric,
            RuleKind::Email => Rule::Email,
            RuleKind::Password => Rule::Password,
            _ => return None,
        };
        Some(rule)
    }

    /// Build a parameterized rule, converting the parameter to its typed form
    pub fn with_parameter(kind: RuleKind, param: &str) -> Result<Self, ParseWarning> {
        let invalid = || ParseWarning::InvalidParameter {
            rule: kind,
            parameter: param.to_string(),
        };

        if !kind.is_parameterized() {
            return Err(ParseWarning::UnexpectedParameter {
                rule: kind,
                parameter: param.to_string(),
            });
        }
        if param.is_empty() {
            return Err(ParseWarning::MissingParameter { rule: kind });
        }

        match kind {
            RuleKind::Equals => Ok(Rule::Equals(param.to_string())),
            RuleKind::Distinct => Ok(Rule::Distinct(param.to_string())),
            RuleKind::MinLength => param.parse().map(Rule::MinLength).map_err(|_| invalid()),
            RuleKind::MaxLength => param.parse().map(Rule::MaxLength).map_err(|_| invalid()),
            RuleKind::MinValue => parse_bound(param).map(Rule::MinValue).ok_or_else(invalid),
            RuleKind::MaxValue => parse_bound(param).map(Rule::MaxValue).ok_or_else(invalid),
            RuleKind::DateFormat => Ok(Rule::DateFormat(param.to_string())),
            _ => Err(invalid()),
        }
    }

    pub fn strips_whitespace(&self) -> bool {
        self.kind().is_some_and(RuleKind::strips_whitespace)
    }
}

fn parse_bound(param: &str) -> Option<f64> {
    param.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.kind()) {
            (Rule::Unknown(token), _) => f.write_str(token),
            (rule, Some(kind)) => match rule.parameter() {
                Some(param) => write!(f, "{}({})", kind, param),
                None => write!(f, "{}", kind),
            },
            (_, None) => Ok(()),
        }
    }
}

impl FromStr for Rule {
    type Err = ParseWarning;

    /// Parse a single rule token such as `minlength(3)`
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_token(token.trim())
    }
}
