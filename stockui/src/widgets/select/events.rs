//! Event handling for the Select widget.

use stockdom::{Event, Key, Modifiers, MouseButton};

use super::Select;
use crate::events::{EventContext, EventResult};
use crate::primitive::ItemId;
use crate::tokens::Slot;

impl Select {
    /// Feed one event to the select.
    ///
    /// Key events count only when they target the trigger. Clicks are
    /// inspected regardless of target so that a press outside an open list
    /// can close it; such a press is reported as ignored so it still reaches
    /// whatever was clicked.
    pub fn handle(&self, event: &Event, cx: &EventContext<'_>) -> EventResult {
        self.set_geometry(cx.rect(self.id()), cx.viewport());
        if self.is_disabled() {
            return EventResult::Ignored;
        }

        match event {
            Event::Key {
                target: Some(target),
                key,
                modifiers,
            } if target == self.id() => self.on_key(*key, *modifiers),
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
                ..
            } => self.on_click(&cx.path_at(*x, *y), cx),
            Event::Blur { target } if target == self.id() => {
                if self.is_open() {
                    self.cancel();
                }
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_key(&self, key: Key, modifiers: Modifiers) -> EventResult {
        if modifiers.ctrl || modifiers.alt {
            return EventResult::Ignored;
        }

        if !self.is_open() {
            return match key {
                Key::Enter | Key::Char(' ') | Key::Down | Key::Up => {
                    self.open();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            };
        }

        match key {
            Key::Up => self.prev(),
            Key::Down => self.next(),
            Key::Home => self.first(),
            Key::End => self.last(),
            Key::PageUp => self.page_up(),
            Key::PageDown => self.page_down(),
            Key::Enter | Key::Char(' ') => self.confirm(),
            Key::Escape => self.cancel(),
            // Focus is about to move; close and let the host move it.
            Key::Tab | Key::BackTab => {
                self.cancel();
                return EventResult::Ignored;
            }
            Key::Char(ch) => self.typeahead(ch),
            _ => return EventResult::Ignored,
        };
        EventResult::Consumed
    }

    fn on_click(&self, path: &[String], cx: &EventContext<'_>) -> EventResult {
        let hit = |id: &str| path.iter().any(|p| p == id);

        if !self.is_open() {
            if hit(self.id()) {
                self.open();
                return EventResult::Consumed;
            }
            return EventResult::Ignored;
        }

        let prefix = self.item_prefix();
        let clicked_item = path
            .iter()
            .filter(|id| id.starts_with(&prefix))
            .filter_map(|id| cx.find(id))
            .find(|el| el.slot() == Some(Slot::SelectItem.as_str()))
            .and_then(|el| el.get_data("data-value"));
        if let Some(value) = clicked_item {
            // Disabled items fall through activate untouched.
            self.activate(&ItemId::new(value.as_str()));
            return EventResult::Consumed;
        }

        if hit(&self.scroll_up_id()) {
            self.scroll_by(-1);
            return EventResult::Consumed;
        }
        if hit(&self.scroll_down_id()) {
            self.scroll_by(1);
            return EventResult::Consumed;
        }
        if hit(&self.content_id()) {
            return EventResult::Consumed;
        }

        self.cancel();
        if hit(self.id()) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
