//! Sign-up page: account details plus the investor profile.

use std::sync::Arc;

use regex::Regex;
use stockdom::{Element, Event, FocusState, Key, Rect};
use stockui::form::Form;
use stockui::primitive::ItemId;
use stockui::validation::{ValidationResult, Validator};
use stockui::widgets::{Button, Input, Label, Select};
use stockui::EventContext;

use super::sign_in::{
    EMAIL_INVALID, EMAIL_PATTERN, EMAIL_REQUIRED, PASSWORD_MIN, PASSWORD_REQUIRED,
    PASSWORD_TOO_SHORT,
};
use super::{Page, PageAction};
use crate::auth::{AuthError, AuthService, SignUpData};
use crate::nav::Route;
use crate::profile::{COUNTRIES, INVESTMENT_GOALS, PREFERRED_INDUSTRIES, Profile, RISK_TOLERANCE};
use crate::settings::Settings;

const NAME_REQUIRED: &str = "Full name is required";
const NAME_TOO_SHORT: &str = "Full name must be at least 2 characters";
const COUNTRY_REQUIRED: &str = "Please select your country";

const PAGE_ID: &str = "sign-up";
const SIGN_IN_LINK: &str = "sign-up-to-sign-in";
const SUBMIT_LABEL: &str = "Start Your Investing Journey";
const PENDING_LABEL: &str = "Creating account...";

pub struct SignUpPage {
    full_name: Input,
    email: Input,
    password: Input,
    country: Select,
    investment_goals: Select,
    risk_tolerance: Select,
    preferred_industry: Select,
    submit: Button,
    form: Form,
    email_pattern: Regex,
    auth: Arc<dyn AuthService>,
    settings: Settings,
}

impl SignUpPage {
    pub fn new(auth: Arc<dyn AuthService>, settings: Settings) -> Result<Self, regex::Error> {
        let full_name = Input::new()
            .with_id("sign-up-name")
            .with_placeholder("John Doe");
        let email = Input::new()
            .with_id("sign-up-email")
            .with_placeholder("user@example.com");
        let password = Input::new()
            .with_id("sign-up-password")
            .with_placeholder("Enter a strong password")
            .masked();
        let country = Select::new(COUNTRIES)
            .with_id("sign-up-country")
            .with_placeholder("Select your country");
        let investment_goals = Select::new(INVESTMENT_GOALS)
            .with_id("sign-up-goals")
            .with_placeholder("Select your investment goal");
        let risk_tolerance = Select::new(RISK_TOLERANCE)
            .with_id("sign-up-risk")
            .with_placeholder("Select your risk level");
        let preferred_industry = Select::new(PREFERRED_INDUSTRIES)
            .with_id("sign-up-industry")
            .with_placeholder("Select your preferred industry");
        let submit = Button::new(SUBMIT_LABEL).with_id("sign-up-submit");

        let form = Form::new();
        form.register(full_name.clone());
        form.register(email.clone());
        form.register(password.clone());
        form.register(country.clone());
        form.register(investment_goals.clone());
        form.register(risk_tolerance.clone());
        form.register(preferred_industry.clone());
        form.register(submit.clone());

        let page = Self {
            full_name,
            email,
            password,
            country,
            investment_goals,
            risk_tolerance,
            preferred_industry,
            submit,
            form,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
            auth,
            settings,
        };
        page.apply_profile(&Profile::default());
        Ok(page)
    }

    /// Preselect the investor profile choices.
    pub fn apply_profile(&self, profile: &Profile) {
        for (select, value) in [
            (&self.investment_goals, &profile.investment_goals),
            (&self.risk_tolerance, &profile.risk_tolerance),
            (&self.preferred_industry, &profile.preferred_industry),
        ] {
            if !select.set_value(Some(ItemId::from(value.as_str()))) {
                log::warn!("{value:?} is not an option of {}", select.id());
            }
        }
    }

    fn profile(&self) -> Profile {
        let value = |select: &Select| select.value().map(|id| id.to_string()).unwrap_or_default();
        Profile {
            investment_goals: value(&self.investment_goals),
            risk_tolerance: value(&self.risk_tolerance),
            preferred_industry: value(&self.preferred_industry),
        }
    }

    fn selects(&self) -> [&Select; 4] {
        [
            &self.country,
            &self.investment_goals,
            &self.risk_tolerance,
            &self.preferred_industry,
        ]
    }

    fn rules_for(&self, validator: Validator, id: &str) -> Validator {
        if id == self.full_name.id() {
            validator
                .field(&self.full_name, "full_name")
                .required(NAME_REQUIRED)
                .min_length(2, NAME_TOO_SHORT)
                .finish()
        } else if id == self.email.id() {
            validator
                .field(&self.email, "email")
                .required(EMAIL_REQUIRED)
                .pattern(&self.email_pattern, EMAIL_INVALID)
                .email(EMAIL_INVALID)
                .finish()
        } else if id == self.password.id() {
            validator
                .field(&self.password, "password")
                .required(PASSWORD_REQUIRED)
                .min_length(PASSWORD_MIN, PASSWORD_TOO_SHORT)
                .finish()
        } else if id == self.country.id() {
            validator
                .field(&self.country, "country")
                .selected(COUNTRY_REQUIRED)
                .finish()
        } else {
            validator
        }
    }

    fn validate(&self) -> ValidationResult {
        [
            self.full_name.id(),
            self.email.id(),
            self.password.id(),
            self.country.id(),
        ]
        .into_iter()
        .fold(Validator::new(), |validator, id| self.rules_for(validator, id))
        .validate()
    }

    fn submit_form(&self) -> PageAction {
        if self.form.is_pending() {
            return PageAction::None;
        }
        let result = self.validate();
        if let Some(id) = result.first_invalid_widget() {
            return PageAction::Focus(id.to_string());
        }

        let data = SignUpData {
            full_name: self.full_name.value().trim().to_string(),
            email: self.email.value().trim().to_string(),
            password: self.password.value(),
            country: self.country.value().map(|id| id.to_string()).unwrap_or_default(),
            profile: self.profile(),
        };
        let auth = Arc::clone(&self.auth);
        let settings = self.settings.clone();
        let started = self.form.submit(async move {
            let email = data.email.clone();
            let profile = data.profile.clone();
            auth.sign_up(data).await?;
            if let Err(err) = settings.set_profile(&profile).await {
                log::warn!("could not store investor profile: {err}");
            }
            if let Err(err) = settings.set_last_email(&email).await {
                log::warn!("could not remember sign-up email: {err}");
            }
            Ok::<(), AuthError>(())
        });
        if started {
            self.submit.set_label(PENDING_LABEL);
        }
        PageAction::None
    }

    fn select_field(&self, text: &str, select: &Select, focus: &FocusState) -> Element {
        let label = Label::new(text, select.id()).disabled(select.is_disabled());
        super::labelled(&label, select.element(focus.is_focused(select.id())))
    }

    fn input_field(&self, text: &str, input: &Input, focus: &FocusState) -> Element {
        let label = Label::new(text, input.id()).disabled(input.is_disabled());
        super::labelled(&label, input.element(focus.is_focused(input.id())))
    }
}

impl Page for SignUpPage {
    fn element(&self, focus: &FocusState, _viewport: Rect) -> Element {
        let mut form = Element::col()
            .child(super::heading(
                "Sign Up & Personalize",
                Some("Tell us how you invest and we will tailor your dashboard."),
            ))
            .child(self.input_field("Full Name", &self.full_name, focus))
            .child(self.input_field("Email", &self.email, focus))
            .child(self.input_field("Password", &self.password, focus))
            .child(self.select_field("Country", &self.country, focus))
            .child(self.select_field("Investment Goals", &self.investment_goals, focus))
            .child(self.select_field("Risk Tolerance", &self.risk_tolerance, focus))
            .child(self.select_field("Preferred Industry", &self.preferred_industry, focus))
            .child(self.submit.element(focus.is_focused(self.submit.id())));
        if let Some(error) = super::form_error(self.form.error_message()) {
            form = form.child(error);
        }
        form = form.child(super::footer_link(
            SIGN_IN_LINK,
            "Already have an account? ",
            "Sign In",
            focus.is_focused(SIGN_IN_LINK),
        ));

        super::auth_layout(PAGE_ID, form)
    }

    fn handle(&mut self, event: &Event, cx: &EventContext<'_>) -> PageAction {
        // An open list sits above everything else, so it sees events first.
        let mut selects = self.selects();
        selects.sort_by_key(|select| !select.is_open());
        for select in selects {
            if select.handle(event, cx).is_handled() {
                return PageAction::None;
            }
        }

        if let Event::Blur { target } = event {
            self.rules_for(Validator::new(), target).validate();
            return PageAction::None;
        }

        for input in [&self.full_name, &self.email, &self.password] {
            if input.handle(event).is_handled() {
                return PageAction::None;
            }
        }

        if self.submit.handle(event, cx).is_handled() {
            return self.submit_form();
        }
        if let Event::Key {
            target: Some(target),
            key: Key::Enter,
            ..
        } = event
            && [self.full_name.id(), self.email.id(), self.password.id()].contains(&target.as_str())
        {
            return self.submit_form();
        }

        if super::activates(event, SIGN_IN_LINK) {
            return PageAction::Navigate(Route::SignIn);
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
        Some(self.full_name.id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use stockdom::{layout, Modifiers};

    use super::*;
    use crate::auth::SignInData;
    use crate::settings::SqliteBackend;

    #[derive(Default)]
    struct RecordingAuth {
        sign_ups: Mutex<Vec<SignUpData>>,
    }

    #[async_trait]
    impl AuthService for RecordingAuth {
        async fn sign_in(&self, _data: SignInData) -> Result<(), AuthError> {
            Ok(())
        }

        async fn sign_up(&self, data: SignUpData) -> Result<(), AuthError> {
            self.sign_ups.lock().unwrap().push(data);
            Ok(())
        }
    }

    async fn page() -> (SignUpPage, Arc<RecordingAuth>, Settings) {
        let auth = Arc::new(RecordingAuth::default());
        let settings = Settings::new(SqliteBackend::in_memory().await.unwrap());
        let page = SignUpPage::new(auth.clone(), settings.clone()).unwrap();
        (page, auth, settings)
    }

    fn key(target: &str, key: Key) -> Event {
        Event::Key {
            target: Some(target.to_string()),
            key,
            modifiers: Modifiers::new(),
        }
    }

    fn send(page: &mut SignUpPage, event: Event) -> PageAction {
        let viewport = Rect::new(0, 0, 80, 40);
        let root = page.element(&FocusState::new(), viewport);
        let layout = layout(&root, viewport);
        page.handle(&event, &EventContext::new(&root, &layout))
    }

    fn type_into(page: &mut SignUpPage, target: &str, text: &str) {
        for ch in text.chars() {
            send(page, key(target, Key::Char(ch)));
        }
    }

    #[tokio::test]
    async fn test_profile_defaults() {
        let (page, _, _) = page().await;
        assert_eq!(page.profile(), Profile::default());
        assert_eq!(page.country.value(), None);
        assert_eq!(page.investment_goals.selected_label().as_deref(), Some("Growth"));
        assert_eq!(page.risk_tolerance.selected_label().as_deref(), Some("Medium"));
        assert_eq!(page.preferred_industry.selected_label().as_deref(), Some("Technology"));
    }

    #[tokio::test]
    async fn test_each_field_reports_its_own_error() {
        let (mut page, _, _) = page().await;
        type_into(&mut page, "sign-up-name", "J");

        let action = send(&mut page, key("sign-up-submit", Key::Enter));
        assert_eq!(action, PageAction::Focus("sign-up-name".to_string()));
        assert_eq!(page.full_name.error().as_deref(), Some(NAME_TOO_SHORT));
        assert_eq!(page.email.error().as_deref(), Some(EMAIL_REQUIRED));
        assert_eq!(page.password.error().as_deref(), Some(PASSWORD_REQUIRED));
        assert_eq!(page.country.error().as_deref(), Some(COUNTRY_REQUIRED));
    }

    #[tokio::test]
    async fn test_select_keys_do_not_submit() {
        let (mut page, auth, _) = page().await;
        send(&mut page, key("sign-up-risk", Key::Enter));
        assert!(page.risk_tolerance.is_open());
        send(&mut page, key("sign-up-risk", Key::Down));
        send(&mut page, key("sign-up-risk", Key::Enter));
        assert_eq!(page.risk_tolerance.selected_label().as_deref(), Some("High"));
        assert!(!page.form.is_pending());
        assert!(auth.sign_ups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_stores_profile() {
        let (mut page, auth, settings) = page().await;
        type_into(&mut page, "sign-up-name", "Jane Doe");
        type_into(&mut page, "sign-up-email", "jane@example.com");
        type_into(&mut page, "sign-up-password", "correct horse");
        page.country.set_value(Some(ItemId::from("GB")));
        page.investment_goals.set_value(Some(ItemId::from("Income")));

        send(&mut page, key("sign-up-password", Key::Enter));
        assert!(page.country.is_disabled());

        let action = loop {
            let (action, changed) = page.poll();
            if changed {
                break action;
            }
            tokio::task::yield_now().await;
        };
        assert_eq!(action, PageAction::SignedIn("jane@example.com".to_string()));

        let sign_ups = auth.sign_ups.lock().unwrap().clone();
        assert_eq!(sign_ups.len(), 1);
        assert_eq!(sign_ups[0].country, "GB");
        assert_eq!(sign_ups[0].full_name, "Jane Doe");

        let stored = settings.profile().await.unwrap();
        assert_eq!(stored.investment_goals, "Income");
        assert_eq!(stored.risk_tolerance, "Medium");
    }

    #[tokio::test]
    async fn test_footer_link_goes_to_sign_in() {
        let (mut page, _, _) = page().await;
        assert_eq!(
            send(&mut page, key(SIGN_IN_LINK, Key::Enter)),
            PageAction::Navigate(Route::SignIn)
        );
    }
}
