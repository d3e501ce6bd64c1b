// File: formcheck/src/form.rs
// Purpose: Form validator orchestrating field states

use std::collections::HashMap;

use formcheck_rules::{
    evaluate, parse_attribute, EvalContext, EvaluationFault, FieldValue, Rule, RuleKind,
};

use crate::config::FormConfig;
use crate::error::FormError;
use crate::field::{FieldAccess, FieldDecl, FieldState};
use crate::messages::MessageResolver;

/// Result of running every rule of one field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub valid: bool,
    /// Value the rules ended up judging (money fields hold the plain number)
    pub value: FieldValue,
    pub messages: Vec<String>,
    /// Reformatted text to write back into the field
    pub display: Option<String>,
}

/// An ordered set of fields validated together
pub struct Form {
    id: String,
    fields: Vec<FieldState>,
    index: HashMap<String, usize>,
    overall_valid: bool,
    config: FormConfig,
    resolver: MessageResolver,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_config(id, FormConfig::default())
    }

    pub fn with_config(id: impl Into<String>, config: FormConfig) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            index: HashMap::new(),
            overall_valid: true,
            resolver: config.message_resolver(),
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Result of the last full validation pass
    pub fn overall_valid(&self) -> bool {
        self.overall_valid
    }

    pub fn field(&self, id: &str) -> Option<&FieldState> {
        self.index.get(id).map(|&i| &self.fields[i])
    }

    /// Field ids in registration order
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Register a field, parsing its rule declaration
    ///
    /// Fields without an id get `{form_id}_field{n}`. Returns the id the
    /// field is registered under.
    pub fn register_field(&mut self, decl: FieldDecl) -> Result<String, FormError> {
        let id = match decl.id {
            Some(id) => id,
            None => self.generate_id(),
        };

        if self.index.contains_key(&id) {
            return Err(FormError::DuplicateFieldId(id));
        }

        let parsed = parse_attribute(&decl.attribute);
        if !parsed.is_clean() {
            tracing::warn!(
                form = %self.id,
                field = %id,
                warnings = parsed.warnings.len(),
                "field declaration has malformed rules"
            );
        }
        tracing::debug!(form = %self.id, field = %id, rules = parsed.rules.len(), "registered field");

        self.index.insert(id.clone(), self.fields.len());
        self.fields
            .push(FieldState::new(id.clone(), parsed.rules, parsed.warnings, decl.access));

        Ok(id)
    }

    fn generate_id(&self) -> String {
        (self.fields.len()..)
            .map(|n| format!("{}_field{}", self.id, n))
            .find(|candidate| !self.index.contains_key(candidate))
            .unwrap_or_default()
    }

    /// Re-validate one field; returns its new validity
    ///
    /// Does not touch the overall form validity.
    pub fn validate_field(&mut self, id: &str) -> Result<bool, FormError> {
        let index = self.index_of(id)?;
        Ok(self.validate_index(index))
    }

    /// Validate every field in registration order
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for index in 0..self.fields.len() {
            all_valid &= self.validate_index(index);
        }
        self.overall_valid = all_valid;

        tracing::debug!(form = %self.id, valid = all_valid, "validated form");
        all_valid
    }

    /// First field, in registration order, currently marked invalid
    pub fn first_invalid_field(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| !field.valid)
            .map(|field| field.id.as_str())
    }

    /// Evaluate a field without recording the result or writing anything back
    pub fn preview_field(
        &self,
        id: &str,
    ) -> Result<Result<ValidationOutcome, EvaluationFault>, FormError> {
        let index = self.index_of(id)?;
        Ok(self.run_rules(&self.fields[index]))
    }

    fn validate_index(&mut self, index: usize) -> bool {
        let result = self.run_rules(&self.fields[index]);
        let field = &mut self.fields[index];

        match result {
            Ok(outcome) => {
                if let Some(display) = &outcome.display {
                    field.access().set_value(display);
                }
                field.valid = outcome.valid;
                field.value = outcome.value;
                field.messages = outcome.messages;
            }
            Err(fault) => {
                tracing::warn!(form = %self.id, field = %field.id, %fault, "rule evaluation failed");
                field.valid = false;
                field.value = field.access().value().trimmed();
                field.messages = vec![self.resolver.fault_message().to_string()];
            }
        }

        tracing::debug!(form = %self.id, field = %field.id, valid = field.valid, "validated field");
        field.valid
    }

    /// Run every rule of `field` in declaration order
    ///
    /// All rules run even after a failure so messages accumulate. A money
    /// rewrite is seen by the rules that follow it.
    fn run_rules(&self, field: &FieldState) -> Result<ValidationOutcome, EvaluationFault> {
        let lookup = |other: &str| self.field(other).map(|f| f.access().value().to_string());

        let mut ctx = EvalContext::new(&lookup);
        ctx.enabled = field.enabled;
        ctx.checked = field.access().is_checked();
        ctx.tag = field.tag;
        ctx.password_min_length = self.config.password_min_length;
        ctx.money = self.config.money;

        let mut outcome = ValidationOutcome {
            valid: true,
            value: field.access().value().trimmed(),
            messages: Vec::new(),
            display: None,
        };

        for rule in &field.rules {
            let result = evaluate(rule, &outcome.value, &ctx)?;

            if let Some(reformatted) = result.reformatted {
                outcome.value = FieldValue::Text(reformatted.value);
                outcome.display = Some(reformatted.display);
            }

            if !result.pass {
                outcome.valid = false;
                let message = result
                    .key
                    .and_then(|key| self.resolver.resolve(key, rule, &field.custom_messages));
                if let Some(message) = message {
                    outcome.messages.push(message);
                }
            }
        }

        Ok(outcome)
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), FormError> {
        self.field_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Append `rule`; an identical rule already present moves to the end
    pub fn add_rule(&mut self, id: &str, rule: Rule) -> Result<(), FormError> {
        self.field_mut(id)?.push_rule(rule);
        Ok(())
    }

    /// Drop every rule of `kind` from the field
    pub fn remove_rule(&mut self, id: &str, kind: RuleKind) -> Result<(), FormError> {
        self.field_mut(id)?.remove_rule(kind);
        Ok(())
    }

    pub fn set_custom_message(
        &mut self,
        id: &str,
        kind: RuleKind,
        text: impl Into<String>,
    ) -> Result<(), FormError> {
        self.field_mut(id)?.custom_messages.insert(kind, text.into());
        Ok(())
    }

    pub fn set_custom_messages<I, S>(&mut self, id: &str, messages: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = (RuleKind, S)>,
        S: Into<String>,
    {
        let field = self.field_mut(id)?;
        field
            .custom_messages
            .extend(messages.into_iter().map(|(kind, text)| (kind, text.into())));
        Ok(())
    }

    /// Messages produced by the field's last validation, in rule order
    pub fn error_messages(&self, id: &str) -> Result<&[String], FormError> {
        Ok(self.fields[self.index_of(id)?].messages.as_slice())
    }

    /// Write a new value into the field's UI element
    pub fn update_value(&mut self, id: &str, value: &str) -> Result<(), FormError> {
        self.field_mut(id)?.access().set_value(value);
        Ok(())
    }

    /// Drop typed spaces for fields whose rules never accept them
    pub fn sanitize_input(&self, id: &str, raw: &str) -> Result<String, FormError> {
        let field = &self.fields[self.index_of(id)?];
        if self.config.strip_whitespace && field.strips_whitespace() {
            Ok(raw.chars().filter(|&c| c != ' ').collect())
        } else {
            Ok(raw.to_string())
        }
    }

    fn index_of(&self, id: &str) -> Result<usize, FormError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| FormError::UnknownField(id.to_string()))
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut FieldState, FormError> {
        let index = self.index_of(id)?;
        Ok(&mut self.fields[index])
    }
}
