// File: formcheck/src/field.rs
// Purpose: Field access capability and per-field validation state

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use formcheck_rules::{FieldValue, ParseWarning, Rule, RuleKind, TagKind};

/// What the form needs from the UI element behind a field
///
/// Handles are shared with the UI layer; setters take `&self` because the
/// element, not the form, owns the value.
pub trait FieldAccess {
    fn value(&self) -> FieldValue;

    fn set_value(&self, value: &str);

    /// Checked state for checkboxes and radios
    fn is_checked(&self) -> bool {
        false
    }

    fn tag_kind(&self) -> TagKind;

    /// `type` attribute of inputs (`text`, `checkbox`, ...)
    fn input_type(&self) -> Option<String> {
        None
    }
}

/// In-memory field, for tests and for bindings that push values in
#[derive(Debug, Default)]
pub struct MemoryField {
    tag: TagKind,
    input_type: Option<String>,
    value: RefCell<FieldValue>,
    checked: Cell<bool>,
}

impl MemoryField {
    pub fn new(tag: TagKind) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    /// Text input holding `value`
    pub fn input(value: &str) -> Self {
        Self::new(TagKind::Input)
            .with_input_type("text")
            .with_value(value)
    }

    pub fn select(value: &str) -> Self {
        Self::new(TagKind::Select).with_value(value)
    }

    pub fn checkbox(checked: bool) -> Self {
        let field = Self::new(TagKind::Input).with_input_type("checkbox");
        field.checked.set(checked);
        field
    }

    pub fn with_input_type(mut self, input_type: &str) -> Self {
        self.input_type = Some(input_type.to_string());
        self
    }

    pub fn with_value(self, value: impl Into<FieldValue>) -> Self {
        self.value.replace(value.into());
        self
    }

    pub fn set(&self, value: impl Into<FieldValue>) {
        self.value.replace(value.into());
    }

    pub fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    fn is_toggle(&self) -> bool {
        matches!(self.input_type.as_deref(), Some("checkbox" | "radio"))
    }
}

impl FieldAccess for MemoryField {
    /// Checkboxes and radios report their checked state
    fn value(&self) -> FieldValue {
        if self.is_toggle() {
            return FieldValue::Flag(self.checked.get());
        }
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        self.set(value);
    }

    fn is_checked(&self) -> bool {
        self.checked.get()
    }

    fn tag_kind(&self) -> TagKind {
        self.tag
    }

    fn input_type(&self) -> Option<String> {
        self.input_type.clone()
    }
}

/// Declaration of a field to register with a form
pub struct FieldDecl {
    /// Explicit id; one is generated when missing
    pub id: Option<String>,
    /// Class-like attribute carrying `{rule,...}`
    pub attribute: String,
    pub access: Rc<dyn FieldAccess>,
}

impl FieldDecl {
    pub fn new(attribute: impl Into<String>, access: Rc<dyn FieldAccess>) -> Self {
        Self {
            id: None,
            attribute: attribute.into(),
            access,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Validation state of one registered field
pub struct FieldState {
    pub(crate) id: String,
    pub(crate) tag: TagKind,
    pub(crate) input_type: Option<String>,
    pub(crate) value: FieldValue,
    pub(crate) rules: Vec<Rule>,
    pub(crate) warnings: Vec<ParseWarning>,
    pub(crate) valid: bool,
    pub(crate) enabled: bool,
    pub(crate) custom_messages: HashMap<RuleKind, String>,
    pub(crate) messages: Vec<String>,
    pub(crate) access: Rc<dyn FieldAccess>,
}

impl FieldState {
    pub(crate) fn new(
        id: String,
        rules: Vec<Rule>,
        warnings: Vec<ParseWarning>,
        access: Rc<dyn FieldAccess>,
    ) -> Self {
        Self {
            id,
            tag: access.tag_kind(),
            input_type: access.input_type(),
            value: access.value().trimmed(),
            rules,
            warnings,
            valid: true,
            enabled: true,
            custom_messages: HashMap::new(),
            messages: Vec::new(),
            access,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> TagKind {
        self.tag
    }

    pub fn input_type(&self) -> Option<&str> {
        self.input_type.as_deref()
    }

    /// Value seen by the last validation pass
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Tokens of the declaration that were kept as no-ops
    pub fn parse_warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn custom_messages(&self) -> &HashMap<RuleKind, String> {
        &self.custom_messages
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_checkbox(&self) -> bool {
        self.input_type.as_deref() == Some("checkbox")
    }

    /// Whether typed spaces should be dropped from this field's input
    pub fn strips_whitespace(&self) -> bool {
        self.rules.iter().any(Rule::strips_whitespace)
    }

    pub(crate) fn access(&self) -> &Rc<dyn FieldAccess> {
        &self.access
    }

    /// Replace `rule` if present and append it at the end
    pub(crate) fn push_rule(&mut self, rule: Rule) {
        self.rules.retain(|existing| existing != &rule);
        self.rules.push(rule);
    }

    pub(crate) fn remove_rule(&mut self, kind: RuleKind) {
        self.rules.retain(|existing| existing.kind() != Some(kind));
    }
}

impl fmt::Debug for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("input_type", &self.input_type)
            .field("value", &self.value)
            .field("rules", &self.rules)
            .field("valid", &self.valid)
            .field("enabled", &self.enabled)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}
