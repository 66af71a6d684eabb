use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::validation::{ErrorDisplay, Validatable};

fn generate_auto_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("__input_{id}")
}

/// Internal state for an Input widget
#[derive(Debug, Default)]
pub(super) struct InputInner {
    /// Current text value
    pub(super) value: String,
    pub(super) placeholder: String,
    /// Cursor position (byte offset)
    pub(super) cursor: usize,
    /// Render every character as a bullet
    pub(super) masked: bool,
    pub(super) disabled: bool,
    /// Validation error message (if any)
    pub(super) error: Option<String>,
    pub(super) error_display: ErrorDisplay,
}

/// A single-line text input.
///
/// `Input` is a cheap handle over shared state: clones edit the same value.
/// Any edit clears the validation error, so a stale message never sits under
/// text the user has already fixed.
///
/// # Example
///
/// ```ignore
/// let email = Input::new()
///     .with_id("email")
///     .with_placeholder("user@example.com");
/// let password = Input::new().with_id("password").masked();
///
/// email.insert_char('a');
/// assert_eq!(email.value(), "a");
/// ```
#[derive(Debug, Clone)]
pub struct Input {
    id: String,
    inner: Arc<RwLock<InputInner>>,
    dirty: Arc<AtomicBool>,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    /// Create a new empty input
    pub fn new() -> Self {
        Self {
            id: generate_auto_id(),
            inner: Arc::new(RwLock::new(InputInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Start with `value`, cursor at the end
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_placeholder(self, placeholder: impl Into<String>) -> Self {
        self.set_placeholder(placeholder);
        self
    }

    /// Hide the value behind bullets, for passwords
    pub fn masked(self) -> Self {
        self.update(|inner| inner.masked = true);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn value(&self) -> String {
        self.read(|inner| inner.value.clone()).unwrap_or_default()
    }

    pub fn placeholder(&self) -> String {
        self.read(|inner| inner.placeholder.clone())
            .unwrap_or_default()
    }

    /// Cursor position (byte offset)
    pub fn cursor(&self) -> usize {
        self.read(|inner| inner.cursor).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.read(|inner| inner.value.is_empty()).unwrap_or(true)
    }

    pub fn is_masked(&self) -> bool {
        self.read(|inner| inner.masked).unwrap_or(false)
    }

    pub fn is_disabled(&self) -> bool {
        self.read(|inner| inner.disabled).unwrap_or(false)
    }

    /// Text as drawn: the value, bullets when masked
    pub fn display_value(&self) -> String {
        self.read(|inner| {
            if inner.masked {
                "•".repeat(inner.value.chars().count())
            } else {
                inner.value.clone()
            }
        })
        .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    pub fn set_value(&self, value: impl Into<String>) {
        self.update(|inner| {
            inner.value = value.into();
            inner.cursor = inner.value.len();
            inner.error = None;
        });
    }

    pub fn clear(&self) {
        self.update(|inner| {
            inner.value.clear();
            inner.cursor = 0;
            inner.error = None;
        });
    }

    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        self.update(|inner| inner.placeholder = placeholder.into());
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.update(|inner| inner.disabled = disabled);
    }

    // -------------------------------------------------------------------------
    // Text manipulation
    // -------------------------------------------------------------------------

    /// Insert a character at the cursor position
    pub fn insert_char(&self, c: char) {
        self.update(|inner| {
            let cursor = inner.cursor;
            inner.value.insert(cursor, c);
            inner.cursor += c.len_utf8();
            inner.error = None;
        });
    }

    /// Delete the character before the cursor
    pub fn delete_char_before(&self) {
        self.update(|inner| {
            if inner.cursor == 0 {
                return;
            }
            let prev = prev_boundary(&inner.value, inner.cursor);
            inner.value.remove(prev);
            inner.cursor = prev;
            inner.error = None;
        });
    }

    /// Delete the character at the cursor
    pub fn delete_char_at(&self) {
        self.update(|inner| {
            if inner.cursor < inner.value.len() {
                let cursor = inner.cursor;
                inner.value.remove(cursor);
                inner.error = None;
            }
        });
    }

    pub fn cursor_left(&self) {
        self.update(|inner| inner.cursor = prev_boundary(&inner.value, inner.cursor));
    }

    pub fn cursor_right(&self) {
        self.update(|inner| {
            inner.cursor = inner.value[inner.cursor..]
                .chars()
                .next()
                .map(|c| inner.cursor + c.len_utf8())
                .unwrap_or(inner.value.len());
        });
    }

    pub fn cursor_home(&self) {
        self.update(|inner| inner.cursor = 0);
    }

    pub fn cursor_end(&self) {
        self.update(|inner| inner.cursor = inner.value.len());
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    pub fn set_error(&self, msg: impl Into<String>) {
        self.update(|inner| inner.error = Some(msg.into()));
    }

    pub fn clear_error(&self) {
        if self.error().is_some() {
            self.update(|inner| inner.error = None);
        }
    }

    pub fn error(&self) -> Option<String> {
        self.read(|inner| inner.error.clone()).flatten()
    }

    pub fn error_display(&self) -> ErrorDisplay {
        self.read(|inner| inner.error_display).unwrap_or_default()
    }

    pub fn set_error_display(&self, display: ErrorDisplay) {
        self.update(|inner| inner.error_display = display);
    }

    pub(super) fn read<R>(&self, f: impl FnOnce(&InputInner) -> R) -> Option<R> {
        self.inner.read().ok().map(|guard| f(&guard))
    }

    fn update(&self, f: impl FnOnce(&mut InputInner)) {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }
}

fn prev_boundary(value: &str, cursor: usize) -> usize {
    value[..cursor]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

impl Validatable for Input {
    type Value = String;

    fn validation_value(&self) -> Self::Value {
        self.value()
    }

    fn set_error(&self, msg: impl Into<String>) {
        Input::set_error(self, msg)
    }

    fn clear_error(&self) {
        Input::clear_error(self)
    }

    fn error(&self) -> Option<String> {
        Input::error(self)
    }

    fn widget_id(&self) -> String {
        self.id.clone()
    }

    fn error_display(&self) -> ErrorDisplay {
        Input::error_display(self)
    }

    fn set_error_display(&self, display: ErrorDisplay) {
        Input::set_error_display(self, display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_multibyte() {
        let input = Input::new().with_value("né");
        input.delete_char_before();
        assert_eq!(input.value(), "n");
        input.insert_char('ü');
        input.cursor_left();
        input.cursor_left();
        input.insert_char('a');
        assert_eq!(input.value(), "anü");
    }

    #[test]
    fn test_edit_clears_error() {
        let input = Input::new();
        input.set_error("Email address is required");
        input.insert_char('x');
        assert!(input.error().is_none());
    }

    #[test]
    fn test_masked_display() {
        let input = Input::new().masked().with_value("hunter22");
        assert_eq!(input.display_value(), "••••••••");
        assert_eq!(input.value(), "hunter22");
    }
}
