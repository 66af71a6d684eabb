//! Event handling for the Input widget.

use stockdom::{Event, Key};

use super::Input;
use crate::events::EventResult;

impl Input {
    /// Apply a key aimed at this input. Returns `Consumed` for editing and
    /// cursor keys; everything else is left for the host.
    pub fn handle(&self, event: &Event) -> EventResult {
        let Event::Key {
            target: Some(target),
            key,
            modifiers,
        } = event
        else {
            return EventResult::Ignored;
        };
        if target != self.id() || self.is_disabled() {
            return EventResult::Ignored;
        }
        // Only handle keys without modifiers (except Shift)
        if modifiers.ctrl || modifiers.alt {
            return EventResult::Ignored;
        }

        match key {
            Key::Backspace => self.delete_char_before(),
            Key::Delete => self.delete_char_at(),
            Key::Left => self.cursor_left(),
            Key::Right => self.cursor_right(),
            Key::Home => self.cursor_home(),
            Key::End => self.cursor_end(),
            Key::Char(c) => self.insert_char(*c),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }
}
