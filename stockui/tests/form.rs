use regex::Regex;
use stockdom::{find_element, label_target, Element, Event, Key, Modifiers};
use stockui::form::{Form, SubmitError, SubmitState};
use stockui::validation::{ErrorDisplay, Validator};
use stockui::widgets::{Button, Input, Label, Select};
use stockui::EventResult;

fn key(target: &str, key: Key) -> Event {
    Event::Key {
        target: Some(target.to_string()),
        key,
        modifiers: Modifiers::new(),
    }
}

// =============================================================================
// Input
// =============================================================================

#[test]
fn test_input_editing_keys() {
    let input = Input::new().with_id("email");
    for ch in "ab".chars() {
        assert_eq!(input.handle(&key("email", Key::Char(ch))), EventResult::Consumed);
    }
    input.handle(&key("email", Key::Left));
    input.handle(&key("email", Key::Char('x')));
    assert_eq!(input.value(), "axb");
    input.handle(&key("email", Key::Home));
    input.handle(&key("email", Key::Delete));
    assert_eq!(input.value(), "xb");

    // Keys for other elements are not ours.
    assert_eq!(input.handle(&key("password", Key::Char('z'))), EventResult::Ignored);
    assert_eq!(input.value(), "xb");
}

#[test]
fn test_disabled_input_ignores_keys() {
    let input = Input::new().with_id("email");
    input.set_disabled(true);
    assert_eq!(input.handle(&key("email", Key::Char('a'))), EventResult::Ignored);
    assert!(input.is_empty());
}

#[test]
fn test_input_error_rendering() {
    let input = Input::new().with_id("email");
    input.set_error("Email address is required");
    let el = input.element(false);
    let field = find_element(&el, "email").unwrap();
    assert!(field.has_flag("aria-invalid"));
    let error = find_element(&el, "email-error").unwrap();
    assert_eq!(error.slot(), Some("field-error"));

    input.set_error_display(ErrorDisplay::None);
    let el = input.element(false);
    assert!(find_element(&el, "email-error").is_none());
}

// =============================================================================
// Label
// =============================================================================

#[test]
fn test_label_targets_control() {
    let input = Input::new().with_id("email");
    let label = Label::new("Email", input.id());
    let root = Element::col()
        .id("root")
        .child(label.element())
        .child(input.element(false));

    assert_eq!(label.id(), "email-label");
    assert_eq!(label_target(&root, &label.id()).as_deref(), Some("email"));
    let el = label.element();
    assert_eq!(el.slot(), Some("label"));
    assert!(!el.has_flag("data-disabled"));
}

#[test]
fn test_label_for_disabled_control_is_dimmed() {
    let label = Label::new("Country", "country").disabled(true);
    let el = label.element();
    assert!(el.has_flag("data-disabled"));
    assert_eq!(el.style.dim, Some(true));
}

// =============================================================================
// Validation
// =============================================================================

fn sign_in_rules(email: &Input, password: &Input) -> Validator {
    let email_re = Regex::new(r"^\w+@\w+\.\w+$").unwrap();
    Validator::new()
        .field(email, "email")
        .required("Email address is required")
        .pattern(&email_re, "Please enter a valid email address")
        .field(password, "password")
        .required("Password is required")
        .min_length(8, "Password must be at least 8 characters")
        .finish()
}

#[test]
fn test_each_field_gets_its_own_message() {
    let email = Input::new().with_id("email");
    let password = Input::new().with_id("password");

    let result = sign_in_rules(&email, &password).validate();
    assert_eq!(result.errors().len(), 2);
    assert_eq!(email.error().as_deref(), Some("Email address is required"));
    assert_eq!(password.error().as_deref(), Some("Password is required"));
    assert_eq!(result.first_invalid_widget(), Some("email"));

    email.set_value("jane@example.com");
    password.set_value("short");
    let result = sign_in_rules(&email, &password).validate();
    assert!(email.error().is_none());
    assert_eq!(
        result.message_for("password"),
        Some("Password must be at least 8 characters")
    );

    email.set_value("not an email");
    password.set_value("long enough");
    let result = sign_in_rules(&email, &password).validate();
    assert_eq!(
        result.message_for("email"),
        Some("Please enter a valid email address")
    );
    assert!(password.error().is_none());
}

#[test]
fn test_string_rules() {
    let name = Input::new().with_value("Jo");
    let confirm = Input::new().with_value("secret");
    let result = Validator::new()
        .field(&name, "name")
        .max_length(1, "too long")
        .field(&confirm, "confirm")
        .equals("secret", "must match")
        .contains("cre", "must contain cre")
        .validate();
    assert_eq!(result.message_for("name"), Some("too long"));
    assert_eq!(result.message_for("confirm"), None);

    let email = Input::new().with_value("jane@");
    let result = Validator::new()
        .field(&email, "email")
        .email("invalid")
        .validate();
    assert!(result.is_invalid());
}

#[tokio::test]
async fn test_async_rule_runs_after_sync_rules() {
    let email = Input::new().with_value("taken@example.com");
    let result = Validator::new()
        .field(&email, "email")
        .required("required")
        .rule_async(|value: String| async move { value != "taken@example.com" }, "Email already in use")
        .validate_async()
        .await;
    assert_eq!(result.message_for("email"), Some("Email already in use"));
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_submit_disables_until_settled() {
    let email = Input::new();
    let button = Button::new("Log in");
    let form = Form::new();
    form.register(email.clone());
    form.register(button.clone());

    let (release, gate) = tokio::sync::oneshot::channel::<()>();
    assert!(form.submit(async move {
        let _ = gate.await;
        Ok::<(), String>(())
    }));
    assert_eq!(form.state(), SubmitState::Pending);
    assert!(email.is_disabled());
    assert!(button.is_disabled());
    assert!(form.try_settle().is_none());

    // A second submit while pending is refused.
    assert!(!form.submit(async { Ok::<(), String>(()) }));

    release.send(()).unwrap();
    assert_eq!(form.wait().await, Some(Ok(())));
    assert_eq!(form.state(), SubmitState::Idle);
    assert!(!email.is_disabled());
    assert!(!button.is_disabled());
}

#[tokio::test]
async fn test_failed_submission_keeps_message() {
    let select = Select::new(["Growth", "Income"]);
    let form = Form::new();
    form.register(select.clone());

    form.submit(async { Err::<(), _>("Invalid credentials") });
    let outcome = form.wait().await;
    assert_eq!(
        outcome,
        Some(Err(SubmitError::Failed("Invalid credentials".to_string())))
    );
    assert_eq!(form.error_message().as_deref(), Some("Invalid credentials"));
    assert!(!select.is_disabled());
}

#[tokio::test]
async fn test_settle_restores_controls_disabled_beforehand() {
    let country = Select::new(["Canada", "Germany"]);
    let email = Input::new();
    country.set_disabled(true);
    let form = Form::new();
    form.register(country.clone());
    form.register(email.clone());

    assert!(form.submit(async { Ok::<(), String>(()) }));
    assert!(country.is_disabled());
    assert!(email.is_disabled());

    assert_eq!(form.wait().await, Some(Ok(())));
    assert!(country.is_disabled());
    assert!(!email.is_disabled());
}

#[test]
fn test_button_element() {
    let button = Button::new("Log in").with_id("submit");
    let el = button.element(false);
    assert_eq!(el.slot(), Some("button"));
    assert!(el.focusable);
    button.set_disabled(true);
    assert!(button.element(false).disabled);
}
