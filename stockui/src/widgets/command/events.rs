//! Event handling for the Command widget.

use stockdom::{Event, Key, Modifiers, MouseButton};

use super::filter::CommandError;
use super::Command;
use crate::events::{EventContext, EventResult};
use crate::primitive::ItemId;
use crate::tokens::Slot;

impl Command {
    /// Feed one event to the palette.
    ///
    /// Keys count when they target the query input. Typing edits the query,
    /// and a filter failure is handed back with the query unchanged.
    pub fn handle(
        &self,
        event: &Event,
        cx: &EventContext<'_>,
    ) -> Result<EventResult, CommandError> {
        if self.state_disabled() {
            return Ok(EventResult::Ignored);
        }

        match event {
            Event::Key {
                target: Some(target),
                key,
                modifiers,
            } if *target == self.input_id() => self.on_key(*key, *modifiers),
            Event::Focus { target } if *target == self.input_id() => {
                self.open();
                Ok(EventResult::Ignored)
            }
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
                ..
            } => Ok(self.on_click(&cx.path_at(*x, *y), cx)),
            _ => Ok(EventResult::Ignored),
        }
    }

    fn on_key(&self, key: Key, modifiers: Modifiers) -> Result<EventResult, CommandError> {
        if modifiers.ctrl {
            return match key {
                Key::Char('u') => {
                    self.clear_query()?;
                    Ok(EventResult::Consumed)
                }
                Key::Char('n') => {
                    self.next();
                    Ok(EventResult::Consumed)
                }
                Key::Char('p') => {
                    self.prev();
                    Ok(EventResult::Consumed)
                }
                _ => Ok(EventResult::Ignored),
            };
        }
        if modifiers.alt {
            return Ok(EventResult::Ignored);
        }

        if !self.is_open() {
            return match key {
                Key::Down | Key::Up | Key::Enter => {
                    self.open();
                    Ok(EventResult::Consumed)
                }
                Key::Char(ch) => {
                    self.open();
                    self.push_char(ch)?;
                    Ok(EventResult::Consumed)
                }
                _ => Ok(EventResult::Ignored),
            };
        }

        match key {
            Key::Up => self.prev(),
            Key::Down => self.next(),
            Key::Home => self.first(),
            Key::End => self.last(),
            Key::PageUp => self.page_up(),
            Key::PageDown => self.page_down(),
            Key::Enter => self.confirm(),
            Key::Escape => self.cancel(),
            Key::Tab | Key::BackTab => {
                self.cancel();
                return Ok(EventResult::Ignored);
            }
            Key::Backspace => {
                self.backspace()?;
                return Ok(EventResult::Consumed);
            }
            Key::Char(ch) => {
                self.push_char(ch)?;
                return Ok(EventResult::Consumed);
            }
            _ => return Ok(EventResult::Ignored),
        };
        Ok(EventResult::Consumed)
    }

    fn on_click(&self, path: &[String], cx: &EventContext<'_>) -> EventResult {
        let hit = |id: &str| path.iter().any(|p| p == id);

        if !self.is_open() {
            if hit(&self.input_id()) {
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
            .find(|el| el.slot() == Some(Slot::CommandItem.as_str()))
            .and_then(|el| el.get_data("data-value"));
        if let Some(value) = clicked_item {
            self.activate(&ItemId::new(value.as_str()));
            return EventResult::Consumed;
        }

        if hit(self.id()) {
            return EventResult::Consumed;
        }
        self.cancel();
        EventResult::Ignored
    }

    fn state_disabled(&self) -> bool {
        self.read(|inner| inner.listbox.is_disabled())
            .unwrap_or(false)
    }
}
