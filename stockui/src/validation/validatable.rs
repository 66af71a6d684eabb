use super::ErrorDisplay;

/// A widget whose value can be checked and which can show an error.
///
/// Implementors are cheap handles over shared state, so the validator can
/// keep clones of them.
pub trait Validatable: Send + Sync {
    type Value;

    fn validation_value(&self) -> Self::Value;

    fn set_error(&self, msg: impl Into<String>);

    fn clear_error(&self);

    fn has_error(&self) -> bool {
        self.error().is_some()
    }

    fn error(&self) -> Option<String>;

    fn widget_id(&self) -> String;

    fn error_display(&self) -> ErrorDisplay;

    fn set_error_display(&self, display: ErrorDisplay);
}
