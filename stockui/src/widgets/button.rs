//! Button widget.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use stockdom::{Edges, Element, Event, Key, MouseButton, TextAlign};

use crate::adapter;
use crate::events::{EventContext, EventResult};
use crate::tokens::{Slot, State};

/// Generate a unique auto-incremented button ID
fn generate_auto_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("__button_{id}")
}

#[derive(Debug)]
struct ButtonInner {
    label: String,
    disabled: bool,
}

/// A clickable button.
///
/// The button holds no handler. [`Button::handle`] reports activation (a
/// click, or Enter/Space while focused) as `Consumed` and the caller acts on
/// it.
#[derive(Debug, Clone)]
pub struct Button {
    id: String,
    inner: Arc<RwLock<ButtonInner>>,
    dirty: Arc<AtomicBool>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: generate_auto_id(),
            inner: Arc::new(RwLock::new(ButtonInner {
                label: label.into(),
                disabled: false,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.label.clone())
            .unwrap_or_default()
    }

    pub fn set_label(&self, label: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.label = label.into();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.disabled)
            .unwrap_or(false)
    }

    pub fn set_disabled(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write()
            && guard.disabled != disabled
        {
            guard.disabled = disabled;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// `Consumed` when the event activates this button.
    pub fn handle(&self, event: &Event, cx: &EventContext<'_>) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        let activated = match event {
            Event::Key {
                target: Some(target),
                key: Key::Enter | Key::Char(' '),
                ..
            } => *target == self.id,
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
                ..
            } => cx.path_at(*x, *y).iter().any(|id| *id == self.id),
            _ => false,
        };
        if activated {
            log::debug!("button {} activated", self.id);
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    pub fn element(&self, focused: bool) -> Element {
        let disabled = self.is_disabled();
        let mut states = Vec::new();
        if focused {
            states.push(State::Focused);
        }
        if disabled {
            states.push(State::Disabled);
        }
        let el = Element::text(self.label())
            .id(self.id.clone())
            .padding(Edges::horizontal(2))
            .text_align(TextAlign::Center)
            .focusable(true)
            .clickable(true)
            .disabled(disabled);
        adapter::slot(Slot::Button, adapter::with_states(Slot::Button, el, &states))
    }
}
