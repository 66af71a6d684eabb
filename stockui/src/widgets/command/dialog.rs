//! Modal wrapper that floats a [`Command`] over the screen.

use stockdom::{Edges, Element, Event, MouseButton, Rect, Size, Style};

use super::filter::CommandError;
use super::Command;
use crate::adapter;
use crate::events::{EventContext, EventResult};
use crate::primitive::Outcome;
use crate::tokens::Slot;

/// Stacking level of the palette, above select content.
pub const DIALOG_Z_INDEX: i16 = 100;

pub const DEFAULT_TITLE: &str = "Command Palette";
pub const DEFAULT_DESCRIPTION: &str = "Search for a command to run...";

/// A command palette shown as a modal dialog.
///
/// The dialog is visible exactly while its command is open. Its content is an
/// interaction scope, so focus and hit testing stay inside it.
#[derive(Debug, Clone)]
pub struct CommandDialog {
    command: Command,
    title: String,
    description: String,
    show_close: bool,
}

impl CommandDialog {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            show_close: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_close_button(mut self, show: bool) -> Self {
        self.show_close = show;
        self
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_open(&self) -> bool {
        self.command.is_open()
    }

    /// Open the palette. The host should move focus to [`Self::input_id`].
    pub fn open(&self) -> Outcome {
        self.command.open()
    }

    pub fn close(&self) -> Outcome {
        self.command.cancel()
    }

    pub fn dialog_id(&self) -> String {
        format!("{}-dialog", self.command.id())
    }

    pub fn close_id(&self) -> String {
        format!("{}-close", self.command.id())
    }

    pub fn input_id(&self) -> String {
        self.command.input_id()
    }

    /// Feed one event to the dialog. Presses outside the dialog close it and
    /// are swallowed, as the dialog is modal.
    pub fn handle(
        &self,
        event: &Event,
        cx: &EventContext<'_>,
    ) -> Result<EventResult, CommandError> {
        if !self.is_open() {
            return Ok(EventResult::Ignored);
        }

        if let Event::Click {
            x,
            y,
            button: MouseButton::Left,
            ..
        } = event
        {
            let path = cx.path_at(*x, *y);
            let dialog_id = self.dialog_id();
            if path.iter().any(|id| *id == self.close_id()) || !path.contains(&dialog_id) {
                log::debug!("closing command dialog {} from click", dialog_id);
                self.close();
                return Ok(EventResult::Consumed);
            }
            if !path.iter().any(|id| id == self.command.id()) {
                return Ok(EventResult::Consumed);
            }
        }

        let result = self.command.handle(event, cx)?;
        Ok(match event {
            // Modal: nothing behind the dialog sees clicks or keys.
            Event::Key { .. } | Event::Click { .. } => EventResult::Consumed,
            _ => result,
        })
    }

    /// Build the overlay for `viewport`; an empty placeholder while closed.
    pub fn element(&self, viewport: Rect, focused: bool) -> Element {
        if !self.is_open() {
            return Element::box_().id(self.dialog_id());
        }

        let width = self
            .command
            .read(|inner| inner.width)
            .unwrap_or(48)
            .saturating_add(4);
        let x = viewport.x + viewport.width.saturating_sub(width) / 2;
        let y = viewport.y + viewport.height / 4;

        let mut header = Element::row()
            .gap(1)
            .child(Element::text(&self.title).flex_grow(1));
        if self.show_close {
            header = header.child(
                Element::text("esc ✕")
                    .id(self.close_id())
                    .clickable(true)
                    .style(Style::new().dim()),
            );
        }

        let dialog = Element::col()
            .id(self.dialog_id())
            .at(x as i16, y as i16)
            .z_index(DIALOG_Z_INDEX)
            .width(Size::Fixed(width))
            .padding(Edges::horizontal(1))
            .interaction_scope(true)
            .data("data-state", "open")
            .data("role", "dialog")
            .data("aria-label", &self.title)
            .child(header.style(Style::new().bold()))
            .child(Element::text(&self.description).style(Style::new().dim()))
            .child(self.command.element(focused));
        adapter::slot(Slot::CommandDialog, dialog)
    }
}
