//! Integration tests for Form
//!
//! Drives a form the way a page would: register fields, change values
//! through the shared handles, validate and read back messages.

use std::rc::Rc;

use formcheck::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn register(form: &mut Form, id: &str, attribute: &str, field: MemoryField) -> Rc<MemoryField> {
    let handle = Rc::new(field);
    form.register_field(FieldDecl::new(attribute, handle.clone()).with_id(id))
        .unwrap();
    handle
}

#[test]
fn test_first_invalid_follows_registration_order() {
    init_tracing();
    let mut form = Form::new("signup");
    register(&mut form, "a", "validate{required}", MemoryField::input(""));
    register(&mut form, "b", "validate{required}", MemoryField::input("x"));

    assert!(!form.validate_all());
    assert!(!form.overall_valid());
    assert_eq!(form.first_invalid_field(), Some("a"));
    assert!(form.field("b").unwrap().is_valid());
    assert_eq!(
        form.error_messages("a").unwrap(),
        &["Debe completar este campo.".to_string()]
    );
    assert!(form.error_messages("b").unwrap().is_empty());
}

#[test]
fn test_fixing_values_makes_form_valid() {
    let mut form = Form::new("signup");
    let name = register(&mut form, "name", "{required,text}", MemoryField::input(""));
    let mail = register(&mut form, "mail", "{required,email}", MemoryField::input("ana@"));

    assert!(!form.validate_all());
    assert_eq!(form.first_invalid_field(), Some("name"));

    name.set("Ana María");
    mail.set("Ana@Example.com ");
    assert!(form.validate_all());
    assert_eq!(form.first_invalid_field(), None);
    assert!(form.error_messages("mail").unwrap().is_empty());
}

#[test]
fn test_validate_field_is_idempotent() {
    let mut form = Form::new("f");
    register(&mut form, "code", "{digit,maxlength(3)}", MemoryField::input("12a45"));

    let first = form.validate_field("code").unwrap();
    let messages = form.error_messages("code").unwrap().to_vec();
    let second = form.validate_field("code").unwrap();

    assert!(!first);
    assert_eq!(first, second);
    assert_eq!(form.error_messages("code").unwrap(), messages.as_slice());
    assert_eq!(messages.len(), 2);
}

#[rstest]
#[case("", "1234567", "1.234.567", "1234567")]
#[case("", "0012500,5", "12.500,5", "12500.5")]
#[case("[money]\nthousands_separator = \",\"\ndecimal_separator = \".\"", "1234567.891", "1,234,567.89", "1234567.89")]
fn test_validate_money_twice_keeps_value(
    #[case] config: &str,
    #[case] typed: &str,
    #[case] display: &str,
    #[case] value: &str,
) {
    let mut form = Form::with_config("f", FormConfig::from_toml_str(config).unwrap());
    let amount = register(&mut form, "amount", "{required,money}", MemoryField::input(typed));

    for _ in 0..2 {
        assert_eq!(form.validate_field("amount"), Ok(true));
        assert_eq!(amount.value(), FieldValue::from(display));
        assert_eq!(form.field("amount").unwrap().value(), &FieldValue::from(value));
    }
}

#[test]
fn test_disabled_field_is_always_valid() {
    let mut form = Form::new("f");
    register(&mut form, "nick", "{required,minlength(10)}", MemoryField::input("ab"));

    form.set_enabled("nick", false).unwrap();
    assert!(form.validate_all());
    assert!(!form.field("nick").unwrap().is_enabled());

    form.set_enabled("nick", true).unwrap();
    assert!(!form.validate_all());
}

#[test]
fn test_equals_reads_the_other_field_live() {
    let mut form = Form::new("f");
    let password = register(&mut form, "password", "{required,password}", MemoryField::input("Abcdef1!"));
    let confirm = register(&mut form, "confirm", "{required,equals(password)}", MemoryField::input("Abcdef1?"));

    assert_eq!(form.validate_field("confirm"), Ok(false));
    assert_eq!(
        form.error_messages("confirm").unwrap(),
        &["El valor de confirmación no coincide.".to_string()]
    );

    confirm.set("Abcdef1!");
    assert_eq!(form.validate_field("confirm"), Ok(true));

    password.set("Zbcdef1!");
    assert_eq!(form.validate_field("confirm"), Ok(false));
}

#[test]
fn test_distinct_fields() {
    let mut form = Form::new("f");
    register(&mut form, "old", "{required}", MemoryField::input("secret"));
    let new = register(&mut form, "new", "{required,distinct(old)}", MemoryField::input("secret"));

    assert_eq!(form.validate_field("new"), Ok(false));
    new.set("another");
    assert_eq!(form.validate_field("new"), Ok(true));
}

#[test]
fn test_equals_unknown_reference_fails() {
    let mut form = Form::new("f");
    register(&mut form, "confirm", "{equals(missing)}", MemoryField::input("x"));
    assert_eq!(form.validate_field("confirm"), Ok(false));
}

#[test]
fn test_custom_messages_override_defaults() {
    let mut form = Form::new("f");
    register(&mut form, "age", "{required,minvalue(17)}", MemoryField::input(""));
    form.set_custom_messages(
        "age",
        [(RuleKind::Required, "Age is required"), (RuleKind::MinValue, "Adults only")],
    )
    .unwrap();

    form.validate_field("age").unwrap();
    assert_eq!(form.error_messages("age").unwrap(), &["Age is required".to_string()]);

    form.update_value("age", "16").unwrap();
    form.validate_field("age").unwrap();
    assert_eq!(form.error_messages("age").unwrap(), &["Adults only".to_string()]);

    form.set_custom_message("age", RuleKind::MinValue, "Too young").unwrap();
    form.validate_field("age").unwrap();
    assert_eq!(form.error_messages("age").unwrap(), &["Too young".to_string()]);
}

#[test]
fn test_english_locale_from_config() {
    let config = FormConfig::from_toml_str("locale = \"en\"").unwrap();
    let mut form = Form::with_config("f", config);
    register(&mut form, "mail", "{email}", MemoryField::input("not-an-email"));

    assert!(!form.validate_all());
    assert_eq!(
        form.error_messages("mail").unwrap(),
        &["Not a valid email address.".to_string()]
    );
}

#[test]
fn test_lenient_password_length_from_config() {
    let config = FormConfig::from_toml_str("password_min_length = 6").unwrap();
    let mut form = Form::with_config("f", config);
    register(&mut form, "pw", "{password}", MemoryField::input("Ab1!xy"));
    assert!(form.validate_all());

    let mut strict = Form::new("g");
    register(&mut strict, "pw", "{password}", MemoryField::input("Ab1!xy"));
    assert!(!strict.validate_all());
    assert!(strict.error_messages("pw").unwrap()[0].contains("mínimo 8"));
}

#[test]
fn test_checkbox_must_be_checked() {
    let mut form = Form::new("terms");
    let accept = register(&mut form, "accept", "{checked}", MemoryField::checkbox(false));

    assert!(form.field("accept").unwrap().is_checkbox());
    assert!(!form.validate_all());
    assert_eq!(
        form.error_messages("accept").unwrap(),
        &["Debe marcar este campo.".to_string()]
    );

    accept.set_checked(true);
    assert!(form.validate_all());
}

#[test]
fn test_required_checkbox_follows_checked_state() {
    let mut form = Form::new("terms");
    let accept = register(&mut form, "accept", "{required}", MemoryField::checkbox(true));
    assert!(form.validate_all());
    assert!(form.error_messages("accept").unwrap().is_empty());

    accept.set_checked(false);
    assert!(!form.validate_all());
    assert_eq!(
        form.error_messages("accept").unwrap(),
        &["Debe completar este campo.".to_string()]
    );
}

#[rstest]
#[case("0", false)]
#[case("", false)]
#[case("3", true)]
fn test_select_placeholder_counts_as_empty(#[case] value: &str, #[case] valid: bool) {
    let mut form = Form::new("f");
    register(&mut form, "city", "{required}", MemoryField::select(value));
    assert_eq!(form.validate_all(), valid);
}

#[test]
fn test_zero_in_text_input_is_present() {
    let mut form = Form::new("f");
    register(&mut form, "count", "{required}", MemoryField::input("0"));
    assert!(form.validate_all());
}

#[test]
fn test_add_and_remove_rules() {
    let mut form = Form::new("f");
    register(&mut form, "nick", "{required}", MemoryField::input("ab"));
    assert!(form.validate_all());

    form.add_rule("nick", Rule::MinLength(3)).unwrap();
    assert!(!form.validate_all());

    form.remove_rule("nick", RuleKind::MinLength).unwrap();
    assert!(form.validate_all());
    assert_eq!(form.field("nick").unwrap().rules(), &[Rule::Required]);
}

#[test]
fn test_malformed_tokens_are_kept_as_noops() {
    let mut form = Form::new("f");
    register(&mut form, "x", "{required,minlength(abc),bogus}", MemoryField::input("v"));

    let field = form.field("x").unwrap();
    assert_eq!(field.rules().len(), 3);
    assert_eq!(field.parse_warnings().len(), 2);
    assert!(form.validate_all());
}

#[test]
fn test_field_without_rules_is_valid() {
    let mut form = Form::new("f");
    register(&mut form, "plain", "form-control", MemoryField::input(""));
    assert!(form.field("plain").unwrap().rules().is_empty());
    assert!(form.validate_all());
}

#[test]
fn test_money_round_trip_through_handle() {
    let mut form = Form::new("f");
    let amount = register(&mut form, "amount", "{required,money}", MemoryField::input("0012500,5"));

    assert!(form.validate_all());
    assert_eq!(amount.value(), FieldValue::from("12.500,5"));
}

#[test]
fn test_registered_ids_in_order() {
    let mut form = Form::new("f");
    register(&mut form, "one", "{}", MemoryField::input(""));
    form.register_field(FieldDecl::new("{}", Rc::new(MemoryField::input(""))))
        .unwrap();
    register(&mut form, "three", "{}", MemoryField::input(""));

    let ids: Vec<_> = form.field_ids().collect();
    assert_eq!(ids, vec!["one", "f_field1", "three"]);
    assert_eq!(form.len(), 3);
}
