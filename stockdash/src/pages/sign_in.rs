//! Sign-in page.

use std::sync::Arc;

use regex::Regex;
use stockdom::{Element, Event, FocusState, Key, Rect};
use stockui::form::Form;
use stockui::validation::{ValidationResult, Validator};
use stockui::widgets::{Button, Input, Label};
use stockui::EventContext;

use super::{Page, PageAction};
use crate::auth::{AuthError, AuthService, SignInData};
use crate::nav::Route;
use crate::settings::Settings;

pub(super) const EMAIL_PATTERN: &str = r"^\w+@\w+\.\w+$";
pub(super) const EMAIL_REQUIRED: &str = "Email address is required";
pub(super) const EMAIL_INVALID: &str = "Please enter a valid email address";
pub(super) const PASSWORD_REQUIRED: &str = "Password is required";
pub(super) const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub(super) const PASSWORD_MIN: usize = 8;

const PAGE_ID: &str = "sign-in";
const SIGN_UP_LINK: &str = "sign-in-to-sign-up";
const SUBMIT_LABEL: &str = "Log in";
const PENDING_LABEL: &str = "Signing in...";

pub struct SignInPage {
    email: Input,
    password: Input,
    submit: Button,
    form: Form,
    email_pattern: Regex,
    auth: Arc<dyn AuthService>,
    settings: Settings,
}

impl SignInPage {
    pub fn new(auth: Arc<dyn AuthService>, settings: Settings) -> Result<Self, regex::Error> {
        let email = Input::new()
            .with_id("sign-in-email")
            .with_placeholder("user@example.com");
        let password = Input::new()
            .with_id("sign-in-password")
            .with_placeholder("Enter your password")
            .masked();
        let submit = Button::new(SUBMIT_LABEL).with_id("sign-in-submit");

        let form = Form::new();
        form.register(email.clone());
        form.register(password.clone());
        form.register(submit.clone());

        Ok(Self {
            email,
            password,
            submit,
            form,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
            auth,
            settings,
        })
    }

    /// Fill in the email remembered from a previous session.
    pub fn prefill(&self, email: &str) {
        self.email.set_value(email);
    }

    fn email_rules(&self, validator: Validator) -> Validator {
        validator
            .field(&self.email, "email")
            .required(EMAIL_REQUIRED)
            .pattern(&self.email_pattern, EMAIL_INVALID)
            .finish()
    }

    fn password_rules(&self, validator: Validator) -> Validator {
        validator
            .field(&self.password, "password")
            .required(PASSWORD_REQUIRED)
            .min_length(PASSWORD_MIN, PASSWORD_TOO_SHORT)
            .finish()
    }

    fn validate(&self) -> ValidationResult {
        self.password_rules(self.email_rules(Validator::new()))
            .validate()
    }

    fn on_blur(&self, target: &str) {
        if target == self.email.id() {
            self.email_rules(Validator::new()).validate();
        } else if target == self.password.id() {
            self.password_rules(Validator::new()).validate();
        }
    }

    fn submit_form(&self) -> PageAction {
        if self.form.is_pending() {
            return PageAction::None;
        }
        let result = self.validate();
        if let Some(id) = result.first_invalid_widget() {
            return PageAction::Focus(id.to_string());
        }

        let data = SignInData {
            email: self.email.value().trim().to_string(),
            password: self.password.value(),
        };
        let auth = Arc::clone(&self.auth);
        let settings = self.settings.clone();
        let started = self.form.submit(async move {
            let email = data.email.clone();
            auth.sign_in(data).await?;
            if let Err(err) = settings.set_last_email(&email).await {
                log::warn!("could not remember sign-in email: {err}");
            }
            Ok::<(), AuthError>(())
        });
        if started {
            self.submit.set_label(PENDING_LABEL);
        }
        PageAction::None
    }
}

impl Page for SignInPage {
    fn element(&self, focus: &FocusState, _viewport: Rect) -> Element {
        let email_label = Label::new("Email", self.email.id()).disabled(self.email.is_disabled());
        let password_label =
            Label::new("Password", self.password.id()).disabled(self.password.is_disabled());

        let mut form = Element::col()
            .child(super::heading("Log in Your Account", None))
            .child(super::labelled(
                &email_label,
                self.email.element(focus.is_focused(self.email.id())),
            ))
            .child(super::labelled(
                &password_label,
                self.password.element(focus.is_focused(self.password.id())),
            ))
            .child(self.submit.element(focus.is_focused(self.submit.id())));
        if let Some(error) = super::form_error(self.form.error_message()) {
            form = form.child(error);
        }
        form = form.child(super::footer_link(
            SIGN_UP_LINK,
            "Don't have an account? ",
            "Sign Up",
            focus.is_focused(SIGN_UP_LINK),
        ));

        super::auth_layout(PAGE_ID, form)
    }

    fn handle(&mut self, event: &Event, cx: &EventContext<'_>) -> PageAction {
        if let Event::Blur { target } = event {
            self.on_blur(target);
            return PageAction::None;
        }

        if self.email.handle(event).is_handled() || self.password.handle(event).is_handled() {
            return PageAction::None;
        }

        if self.submit.handle(event, cx).is_handled() {
            return self.submit_form();
        }
        if let Event::Key {
            target: Some(target),
            key: Key::Enter,
            ..
        } = event
            && (target == self.email.id() || target == self.password.id())
        {
            return self.submit_form();
        }

        if super::activates(event, SIGN_UP_LINK) {
            return PageAction::Navigate(Route::SignUp);
        }
        PageAction::None
    }

    fn poll(&mut self) -> (PageAction, bool) {
        match self.form.try_settle() {
            Some(Ok(())) => {
                self.submit.set_label(SUBMIT_LABEL);
                let email = self.email.value().trim().to_string();
                self.password.clear();
                (PageAction::SignedIn(email), true)
            }
            Some(Err(_)) => {
                self.submit.set_label(SUBMIT_LABEL);
                (PageAction::None, true)
            }
            None => (PageAction::None, false),
        }
    }

    fn initial_focus(&self) -> Option<String> {
        let id = if self.email.is_empty() {
            self.email.id()
        } else {
            self.password.id()
        };
        Some(id.to_string())
    }
}
