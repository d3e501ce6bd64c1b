//! Formcheck WASM
//!
//! WebAssembly bindings exposing a [`Form`] to browser JavaScript.
//! The page pushes values in as the user types and asks for validity and
//! messages back; the same rules run here as in native code.

use std::collections::HashMap;
use std::rc::Rc;

use formcheck::{
    FieldAccess, FieldDecl, Form, FormConfig, MemoryField, Rule, RuleKind, TagKind,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parsed declaration returned to JavaScript
#[derive(Serialize, Debug)]
pub struct ParsedDeclaration {
    pub rules: Vec<Rule>,
    pub warnings: Vec<String>,
}

/// Parse a class-like attribute without registering anything
///
/// # Example (JavaScript)
/// ```javascript
/// const { rules, warnings } = parseRules('form-control validate{required,minlength(3)}');
/// // rules: [{ kind: 'required' }, { kind: 'minlength', parameter: 3 }]
/// ```
#[wasm_bindgen(js_name = parseRules)]
pub fn parse_rules(attribute: &str) -> Result<JsValue, JsValue> {
    let parsed = formcheck::rules::parse_attribute(attribute);
    let declaration = ParsedDeclaration {
        rules: parsed.rules,
        warnings: parsed.warnings.iter().map(ToString::to_string).collect(),
    };
    Ok(serde_wasm_bindgen::to_value(&declaration)?)
}

/// A form living in the page
///
/// # Example (JavaScript)
/// ```javascript
/// const checker = new FormChecker('signup', { locale: 'en' });
/// const id = checker.registerField('email', input.className, 'input', input.type);
/// input.addEventListener('input', () => {
///     checker.setValue(id, checker.sanitizeInput(id, input.value));
///     checker.validateField(id);
///     showErrors(checker.errorMessages(id));
/// });
/// ```
#[wasm_bindgen]
pub struct FormChecker {
    form: Form,
    handles: HashMap<String, Rc<MemoryField>>,
}

#[wasm_bindgen]
impl FormChecker {
    /// `config` takes the same keys as `formcheck.toml`; omit it for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(id: &str, config: JsValue) -> Result<FormChecker, JsValue> {
        let config: FormConfig = if config.is_undefined() || config.is_null() {
            FormConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };
        config.validate().map_err(js_error)?;

        Ok(Self {
            form: Form::with_config(id, config),
            handles: HashMap::new(),
        })
    }

    /// Register a field; returns the id it was stored under
    #[wasm_bindgen(js_name = registerField)]
    pub fn register_field(
        &mut self,
        id: Option<String>,
        attribute: &str,
        tag: &str,
        input_type: Option<String>,
    ) -> Result<String, JsValue> {
        let mut field = MemoryField::new(TagKind::from_tag_name(tag));
        if let Some(input_type) = input_type {
            field = field.with_input_type(&input_type.to_ascii_lowercase());
        }
        let handle = Rc::new(field);

        let mut decl = FieldDecl::new(attribute, handle.clone());
        if let Some(id) = id {
            decl = decl.with_id(id);
        }

        let id = self.form.register_field(decl).map_err(js_error)?;
        if let Some(field) = self.form.field(&id) {
            for warning in field.parse_warnings() {
                web_sys::console::warn_1(&JsValue::from_str(&format!("{}: {}", id, warning)));
            }
        }

        self.handles.insert(id.clone(), handle);
        Ok(id)
    }

    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, id: &str, value: &str) -> Result<(), JsValue> {
        self.handle(id)?.set(value);
        Ok(())
    }

    #[wasm_bindgen(js_name = setChecked)]
    pub fn set_checked(&self, id: &str, checked: bool) -> Result<(), JsValue> {
        self.handle(id)?.set_checked(checked);
        Ok(())
    }

    /// Current value, including any money reformatting
    ///
    /// Text fields give a string, checkboxes and radios a boolean.
    #[wasm_bindgen(js_name = getValue)]
    pub fn get_value(&self, id: &str) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.handle(id)?.value())?)
    }

    #[wasm_bindgen(js_name = validateField)]
    pub fn validate_field(&mut self, id: &str) -> Result<bool, JsValue> {
        self.form.validate_field(id).map_err(js_error)
    }

    #[wasm_bindgen(js_name = validateAll)]
    pub fn validate_all(&mut self) -> bool {
        self.form.validate_all()
    }

    /// Overall validity from the last `validateAll`
    #[wasm_bindgen(getter, js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.form.overall_valid()
    }

    /// Field to focus after a failed submit
    #[wasm_bindgen(js_name = firstInvalidField)]
    pub fn first_invalid_field(&self) -> Option<String> {
        self.form.first_invalid_field().map(str::to_string)
    }

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), JsValue> {
        self.form.set_enabled(id, enabled).map_err(js_error)
    }

    /// Add a rule written as in a declaration, e.g. `minlength(3)`
    #[wasm_bindgen(js_name = addRule)]
    pub fn add_rule(&mut self, id: &str, rule: &str) -> Result<(), JsValue> {
        let rule: Rule = rule.trim().parse().map_err(js_error)?;
        self.form.add_rule(id, rule).map_err(js_error)
    }

    /// Remove every rule of the named kind, e.g. `minlength`
    #[wasm_bindgen(js_name = removeRule)]
    pub fn remove_rule(&mut self, id: &str, kind: &str) -> Result<(), JsValue> {
        let kind = parse_kind(kind)?;
        self.form.remove_rule(id, kind).map_err(js_error)
    }

    /// Set messages from an object keyed by rule name
    ///
    /// ```javascript
    /// checker.setCustomMessages('age', { required: 'Age is required', minvalue: 'Adults only' });
    /// ```
    #[wasm_bindgen(js_name = setCustomMessages)]
    pub fn set_custom_messages(&mut self, id: &str, messages: JsValue) -> Result<(), JsValue> {
        let messages: HashMap<String, String> = serde_wasm_bindgen::from_value(messages)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse messages: {}", e)))?;

        let messages = messages
            .into_iter()
            .map(|(kind, text)| Ok((parse_kind(&kind)?, text)))
            .collect::<Result<Vec<_>, JsValue>>()?;

        self.form.set_custom_messages(id, messages).map_err(js_error)
    }

    /// Messages from the field's last validation, as an array of strings
    #[wasm_bindgen(js_name = errorMessages)]
    pub fn error_messages(&self, id: &str) -> Result<JsValue, JsValue> {
        let messages = self.form.error_messages(id).map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&messages)?)
    }

    /// Input with spaces dropped when the field's rules never accept them
    #[wasm_bindgen(js_name = sanitizeInput)]
    pub fn sanitize_input(&self, id: &str, raw: &str) -> Result<String, JsValue> {
        self.form.sanitize_input(id, raw).map_err(js_error)
    }
}

impl FormChecker {
    fn handle(&self, id: &str) -> Result<&Rc<MemoryField>, JsValue> {
        self.handles
            .get(id)
            .ok_or_else(|| JsValue::from_str(&format!("no field `{}` in this form", id)))
    }
}

fn parse_kind(name: &str) -> Result<RuleKind, JsValue> {
    RuleKind::from_name(&name.trim().to_ascii_lowercase())
        .ok_or_else(|| JsValue::from_str(&format!("unknown rule `{}`", name)))
}
