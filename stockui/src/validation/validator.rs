use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use regex::Regex;

use super::result::{FieldError, ValidationResult};
use super::validatable::Validatable;
use crate::primitive::ItemId;

type SyncRule<V> = Box<dyn Fn(&V) -> Result<(), String> + Send + Sync>;
type AsyncRule<V> = Arc<dyn Fn(V) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

/// One field with its rules, type-erased so fields of different widget types
/// can sit in the same validator.
trait Check: Send + Sync {
    fn name(&self) -> &str;
    fn widget_id(&self) -> String;
    fn first_failure(&self) -> Option<String>;
    fn first_failure_async(&self) -> BoxFuture<'_, Option<String>>;
    fn report(&self, message: Option<&str>);
}

struct Field<W: Validatable> {
    name: String,
    widget: W,
    sync_rules: Vec<SyncRule<W::Value>>,
    async_rules: Vec<AsyncRule<W::Value>>,
}

impl<W> Check for Field<W>
where
    W: Validatable + 'static,
    W::Value: Clone + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn widget_id(&self) -> String {
        self.widget.widget_id()
    }

    fn first_failure(&self) -> Option<String> {
        let value = self.widget.validation_value();
        self.sync_rules.iter().find_map(|rule| rule(&value).err())
    }

    fn first_failure_async(&self) -> BoxFuture<'_, Option<String>> {
        Box::pin(async move {
            if let Some(message) = self.first_failure() {
                return Some(message);
            }
            let value = self.widget.validation_value();
            for rule in &self.async_rules {
                if let Err(message) = rule(value.clone()).await {
                    return Some(message);
                }
            }
            None
        })
    }

    fn report(&self, message: Option<&str>) {
        match message {
            Some(message) => self.widget.set_error(message),
            None => self.widget.clear_error(),
        }
    }
}

/// Collects fields and their rules, then checks them all at once.
///
/// Every declared field is checked, not just up to the first failure, so all
/// messages show up together.
#[derive(Default)]
pub struct Validator {
    fields: Vec<Box<dyn Check>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring rules for `widget`.
    pub fn field<W>(self, widget: &W, name: impl Into<String>) -> FieldBuilder<W>
    where
        W: Validatable + Clone + 'static,
        W::Value: Clone + Send + 'static,
    {
        FieldBuilder {
            validator: self,
            field: Field {
                name: name.into(),
                widget: widget.clone(),
                sync_rules: Vec::new(),
                async_rules: Vec::new(),
            },
        }
    }

    /// Run the synchronous rules of every field.
    pub fn validate(self) -> ValidationResult {
        let outcomes = self
            .fields
            .iter()
            .map(|field| field.first_failure())
            .collect();
        self.settle(outcomes)
    }

    /// Run synchronous rules, then asynchronous ones for fields that passed.
    pub async fn validate_async(self) -> ValidationResult {
        let mut outcomes = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            outcomes.push(field.first_failure_async().await);
        }
        self.settle(outcomes)
    }

    fn settle(self, outcomes: Vec<Option<String>>) -> ValidationResult {
        let mut errors = Vec::new();
        for (field, outcome) in self.fields.iter().zip(outcomes) {
            field.report(outcome.as_deref());
            if let Some(message) = outcome {
                log::debug!("field {} failed validation: {message}", field.name());
                errors.push(FieldError {
                    field_name: field.name().to_string(),
                    widget_id: field.widget_id(),
                    message,
                });
            }
        }

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}

/// Rules for the field most recently passed to [`Validator::field`].
pub struct FieldBuilder<W: Validatable> {
    validator: Validator,
    field: Field<W>,
}

impl<W> FieldBuilder<W>
where
    W: Validatable + Clone + 'static,
    W::Value: Clone + Send + 'static,
{
    /// Fail with `msg` unless `check` holds.
    pub fn rule<F>(mut self, check: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&W::Value) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.field.sync_rules.push(Box::new(move |value| {
            if check(value) { Ok(()) } else { Err(msg.clone()) }
        }));
        self
    }

    /// Like [`rule`](Self::rule), for checks that need to await something.
    pub fn rule_async<F, Fut>(mut self, check: F, msg: impl Into<String>) -> Self
    where
        F: Fn(W::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let msg = msg.into();
        self.field.async_rules.push(Arc::new(move |value| {
            let pending = check(value);
            let msg = msg.clone();
            Box::pin(async move { if pending.await { Ok(()) } else { Err(msg) } })
        }));
        self
    }

    /// Move on to another field.
    pub fn field<W2>(self, widget: &W2, name: impl Into<String>) -> FieldBuilder<W2>
    where
        W2: Validatable + Clone + 'static,
        W2::Value: Clone + Send + 'static,
    {
        self.finish().field(widget, name)
    }

    pub fn validate(self) -> ValidationResult {
        self.finish().validate()
    }

    pub async fn validate_async(self) -> ValidationResult {
        self.finish().validate_async().await
    }

    /// Close this field and get the validator back.
    pub fn finish(self) -> Validator {
        let mut validator = self.validator;
        validator.fields.push(Box::new(self.field));
        validator
    }
}

impl<W> FieldBuilder<W>
where
    W: Validatable<Value = String> + Clone + 'static,
{
    /// Non-blank after trimming.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// At least `min` characters.
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() >= min, msg)
    }

    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() <= max, msg)
    }

    /// Must match `re`. Empty values pass; pair with [`required`](Self::required).
    pub fn pattern(self, re: &Regex, msg: impl Into<String>) -> Self {
        let re = re.clone();
        self.rule(move |v| v.is_empty() || re.is_match(v), msg)
    }

    /// RFC 5322 address. Empty values pass.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| v.is_empty() || email_address::EmailAddress::is_valid(v),
            msg,
        )
    }

    pub fn equals(self, other: impl Into<String>, msg: impl Into<String>) -> Self {
        let other = other.into();
        self.rule(move |v| *v == other, msg)
    }

    pub fn contains(self, needle: impl Into<String>, msg: impl Into<String>) -> Self {
        let needle = needle.into();
        self.rule(move |v| v.contains(&needle), msg)
    }
}

impl<W> FieldBuilder<W>
where
    W: Validatable<Value = Option<ItemId>> + Clone + 'static,
{
    /// Some item must be selected.
    pub fn selected(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_some(), msg)
    }
}
