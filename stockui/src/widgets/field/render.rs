use stockdom::{Edges, Element, Style};

use super::Input;
use super::state::InputInner;
use crate::adapter;
use crate::tokens::{Slot, State};
use crate::validation::ErrorDisplay;

/// Minimum width of the text area, in cells.
const MIN_TEXT_WIDTH: u16 = 24;

impl Input {
    /// Build the element tree: the bordered box, then the error per
    /// [`ErrorDisplay`].
    pub fn element(&self, focused: bool) -> Element {
        self.read(|inner| build(self, inner, focused))
            .unwrap_or_else(|| Element::box_().id(self.id()))
    }
}

fn build(input: &Input, inner: &InputInner, focused: bool) -> Element {
    let mut states = Vec::new();
    if focused {
        states.push(State::Focused);
    }
    if inner.error.is_some() {
        states.push(State::Invalid);
    }
    if inner.disabled {
        states.push(State::Disabled);
    }

    let text = if inner.value.is_empty() {
        let placeholder = Element::text(&inner.placeholder);
        let placeholder = adapter::with_states(Slot::Field, placeholder, &[State::Placeholder]);
        if focused {
            Element::row()
                .child(cursor_cell(" "))
                .child(placeholder)
        } else {
            placeholder
        }
    } else {
        text_with_cursor(inner, focused)
    };

    let width = crate::text_width(&inner.placeholder)
        .max(crate::text_width(&inner.value))
        .max(MIN_TEXT_WIDTH)
        + 1;
    let field = Element::row()
        .id(input.id())
        .min_width(width + 4)
        .padding(Edges::horizontal(1))
        .focusable(true)
        .clickable(true)
        .captures_input(true)
        .disabled(inner.disabled)
        .flag("data-masked", inner.masked)
        .child(text);
    let field = adapter::slot(Slot::Field, adapter::with_states(Slot::Field, field, &states));

    match (&inner.error, inner.error_display) {
        (Some(error), ErrorDisplay::Below) => Element::col()
            .id(format!("{}-wrapper", input.id()))
            .child(field)
            .child(error_text(input, error)),
        (Some(error), ErrorDisplay::Inline) => Element::row()
            .id(format!("{}-wrapper", input.id()))
            .gap(1)
            .child(field.flex_grow(1))
            .child(error_text(input, error)),
        _ => field,
    }
}

fn text_with_cursor(inner: &InputInner, focused: bool) -> Element {
    let shown: String = if inner.masked {
        "•".repeat(inner.value.chars().count())
    } else {
        inner.value.clone()
    };
    if !focused {
        return Element::text(shown);
    }

    // Cursor is a byte offset into the value; map it to a char index.
    let at = inner.value[..inner.cursor].chars().count();
    let before: String = shown.chars().take(at).collect();
    let under: String = shown.chars().skip(at).take(1).collect();
    let after: String = shown.chars().skip(at + 1).collect();
    let under = if under.is_empty() { " ".to_string() } else { under };

    Element::row()
        .child(Element::text(before))
        .child(cursor_cell(&under))
        .child(Element::text(after))
}

fn cursor_cell(ch: &str) -> Element {
    Element::text(ch).style(Style::new().underline())
}

fn error_text(input: &Input, error: &str) -> Element {
    adapter::slot(
        Slot::FieldError,
        Element::text(error).id(format!("{}-error", input.id())),
    )
}
