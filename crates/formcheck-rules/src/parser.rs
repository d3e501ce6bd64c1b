// File: formcheck-rules/src/parser.rs
// Purpose: Parse rule declarations like `{required,minlength(3)}` into typed rules

use crate::error::ParseWarning;
use crate::rule::{Rule, RuleKind};

/// Rules parsed from one declaration, plus anything that was degraded to a no-op
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRules {
    pub rules: Vec<Rule>,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedRules {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Extract the rule list from a class-like attribute
///
/// Returns the text strictly between the first `{` and the first `}` that
/// follows it, or `None` when the markers are missing.
///
/// # Examples
/// ```
/// use formcheck_rules::parser::extract_rule_blob;
/// assert_eq!(extract_rule_blob("input validate{required,email}"), Some("required,email"));
/// assert_eq!(extract_rule_blob("input"), None);
/// ```
pub fn extract_rule_blob(attribute: &str) -> Option<&str> {
    let start = attribute.find('{')? + 1;
    let len = attribute[start..].find('}')?;
    Some(&attribute[start..start + len])
}

/// Parse a full attribute; no `{}` markers means the field has no rules
pub fn parse_attribute(attribute: &str) -> ParsedRules {
    extract_rule_blob(attribute)
        .map(parse_rules)
        .unwrap_or_default()
}

/// Parse an already extracted rule list
///
/// Never fails: malformed tokens are kept as [`Rule::Unknown`] and reported
/// through [`ParsedRules::warnings`].
pub fn parse_rules(blob: &str) -> ParsedRules {
    blob.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .fold(ParsedRules::default(), |mut parsed, token| {
            match parse_token(token) {
                Ok(rule) => parsed.rules.push(rule),
                Err(warning) => {
                    tracing::warn!(token, %warning, "degrading malformed rule to no-op");
                    parsed.rules.push(Rule::Unknown(token.to_string()));
                    parsed.warnings.push(warning);
                }
            }
            parsed
        })
}

/// Parse a single trimmed token
pub(crate) fn parse_token(token: &str) -> Result<Rule, ParseWarning> {
    if let Some(kind) = RuleKind::from_name(token) {
        return Rule::simple(kind).ok_or(ParseWarning::MissingParameter { rule: kind });
    }

    let Some(open) = token.find('(') else {
        return Err(ParseWarning::UnknownRule(token.to_string()));
    };

    let close = match token.find(')') {
        Some(close) if close > open => close,
        _ => return Err(ParseWarning::Unterminated(token.to_string())),
    };

    let name = token[..open].trim();
    let param = token[open + 1..close].trim();

    let kind =
        RuleKind::from_name(name).ok_or_else(|| ParseWarning::UnknownRule(token.to_string()))?;

    Rule::with_parameter(kind, param)
}
