// File: formcheck/src/messages.rs
// Purpose: Default and custom error messages per rule

use std::collections::HashMap;

use formcheck_rules::password::DEFAULT_MIN_LENGTH;
use formcheck_rules::{Rule, RuleKind};
use serde::{Deserialize, Serialize};

/// Language of the default messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

/// Picks the text shown for a failing rule
#[derive(Debug, Clone)]
pub struct MessageResolver {
    locale: Locale,
    password_min_length: usize,
}

impl MessageResolver {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            password_min_length: DEFAULT_MIN_LENGTH,
        }
    }

    /// Mention a non-default password length in the password message
    pub fn with_password_min_length(mut self, length: usize) -> Self {
        self.password_min_length = length;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Custom message registered under `key` if any, otherwise the default
    /// for `rule` with its parameter filled in
    pub fn resolve(
        &self,
        key: RuleKind,
        rule: &Rule,
        custom: &HashMap<RuleKind, String>,
    ) -> Option<String> {
        custom
            .get(&key)
            .cloned()
            .or_else(|| self.default_message(rule))
    }

    pub fn default_message(&self, rule: &Rule) -> Option<String> {
        let message = match self.locale {
            Locale::Es => spanish(rule, self.password_min_length)?,
            Locale::En => english(rule, self.password_min_length)?,
        };
        Some(message)
    }

    /// Shown when a field's rules could not be evaluated at all
    pub fn fault_message(&self) -> &'static str {
        match self.locale {
            Locale::Es => "Error en reglas de validación del campo.",
            Locale::En => "Validation rule error on this field.",
        }
    }
}

impl Default for MessageResolver {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

fn spanish(rule: &Rule, password_min_length: usize) -> Option<String> {
    let text = match rule {
        Rule::Required => "Debe completar este campo.".to_string(),
        Rule::Checked => "Debe marcar este campo.".to_string(),
        Rule::Digit => "Solo se admiten dígitos (0-9).".to_string(),
        Rule::Money => "Formato de moneda incorrecto.".to_string(),
        Rule::Number => "El valor debe ser numérico.".to_string(),
        Rule::Decimal => "Formato decimal incorrecto.".to_string(),
        Rule::Text => "Contiene algunos caracteres inválidos.".to_string(),
        Rule::Alphanumeric => "No se permiten caracteres especiales o espacios dobles.".to_string(),
        Rule::Email => "No es un correo válido.".to_string(),
        Rule::Password => format!(
            "La contraseña debe tener mínimo {} caracteres que incluya una mayúscula, un número y un carácter especial.",
            password_min_length
        ),
        Rule::Equals(_) => "El valor de confirmación no coincide.".to_string(),
        Rule::Distinct(_) => "Este valor ya existe, ingrese uno diferente.".to_string(),
        Rule::MinLength(n) => format!("Debe contener al menos {} caracteres.", n),
        Rule::MaxLength(n) => format!("No puede contener más de {} caracteres.", n),
        Rule::MinValue(v) => format!("El valor debe ser mayor a {}.", v),
        Rule::MaxValue(v) => format!("El valor debe ser inferior a {}.", v),
        Rule::DateFormat(_) => "Formato de fecha incorrecto.".to_string(),
        Rule::Unknown(_) => return None,
    };
    Some(text)
}

fn english(rule: &Rule, password_min_length: usize) -> Option<String> {
    let text = match rule {
        Rule::Required => "This field is required.".to_string(),
        Rule::Checked => "This box must be checked.".to_string(),
        Rule::Digit => "Only digits (0-9) are allowed.".to_string(),
        Rule::Money => "Invalid amount.".to_string(),
        Rule::Number => "The value must be numeric.".to_string(),
        Rule::Decimal => "Invalid decimal format.".to_string(),
        Rule::Text => "Contains invalid characters.".to_string(),
        Rule::Alphanumeric => "Special characters and double spaces are not allowed.".to_string(),
        Rule::Email => "Not a valid email address.".to_string(),
        Rule::Password => format!(
            "The password must have at least {} characters, including an uppercase letter, a digit and a special character.",
            password_min_length
        ),
        Rule::Equals(_) => "The confirmation value does not match.".to_string(),
        Rule::Distinct(_) => "This value already exists, enter a different one.".to_string(),
        Rule::MinLength(n) => format!("Must contain at least {} characters.", n),
        Rule::MaxLength(n) => format!("Cannot contain more than {} characters.", n),
        Rule::MinValue(v) => format!("The value must be greater than {}.", v),
        Rule::MaxValue(v) => format!("The value must be less than {}.", v),
        Rule::DateFormat(_) => "Invalid date format.".to_string(),
        Rule::Unknown(_) => return None,
    };
    Some(text)
}
