//! Element tree for the Select widget.
//!
//! ```text
//! select (root)
//! ├── select-trigger ── select-value, chevron
//! ├── field-error            (when invalid)
//! └── select-content         (portal, only while open)
//!     ├── select-scroll-up-button
//!     ├── viewport ── select-item / select-label / select-separator
//!     └── select-scroll-down-button
//! ```

use stockdom::{Border, Edges, Element, Overflow, Size, Style, TextAlign};

use super::item::Row;
use super::state::{ContentPosition, SelectInner, TriggerSize};
use super::Select;
use crate::adapter::{self, Props};
use crate::primitive::popover::{self, Side};
use crate::text_width;
use crate::tokens::{Slot, State};
use crate::validation::ErrorDisplay;

/// Stacking level of open select content.
pub const CONTENT_Z_INDEX: i16 = 50;

const CHECK: &str = "✓";

impl Select {
    /// Build the element tree for the current state.
    pub fn element(&self, focused: bool) -> Element {
        self.read(|inner| build(self, inner, focused))
            .unwrap_or_else(|| Element::box_().id(self.root_id()))
    }
}

fn build(select: &Select, inner: &SelectInner, focused: bool) -> Element {
    let open = inner.listbox.is_open();
    let trigger = trigger(select, inner, focused);

    let mut root = Element::col().id(select.root_id());
    root = match (&inner.error, inner.error_display) {
        (Some(error), ErrorDisplay::Inline) => root.child(
            Element::row()
                .gap(1)
                .child(trigger.flex_grow(1))
                .child(error_text(select, error)),
        ),
        (Some(error), ErrorDisplay::Below) => root.child(trigger).child(error_text(select, error)),
        _ => root.child(trigger),
    };
    if open {
        root = root.child(content(select, inner));
    }

    adapter::slot(
        Slot::Select,
        root.data("data-state", if open { "open" } else { "closed" }),
    )
}

fn error_text(select: &Select, error: &str) -> Element {
    adapter::slot(
        Slot::FieldError,
        Element::text(error).id(format!("{}-error", select.id())),
    )
}

/// Widest label among items and placeholder.
fn widest_label(inner: &SelectInner) -> u16 {
    inner
        .listbox
        .items()
        .iter()
        .map(|item| text_width(&item.label))
        .chain(std::iter::once(text_width(&inner.placeholder)))
        .max()
        .unwrap_or(0)
}

fn trigger(select: &Select, inner: &SelectInner, focused: bool) -> Element {
    let open = inner.listbox.is_open();
    let disabled = inner.listbox.is_disabled();
    let selected = inner.listbox.selected_item();

    let value = match selected {
        Some(item) => adapter::slot(Slot::SelectValue, Element::text(&item.label)),
        None => adapter::slot(
            Slot::SelectValue,
            adapter::with_states(
                Slot::SelectValue,
                Element::text(&inner.placeholder),
                &[State::Placeholder],
            ),
        ),
    }
    .id(format!("{}-value", select.id()))
    .flex_grow(1);

    let chevron = Element::text(if open { "▴" } else { "▾" })
        .id(format!("{}-chevron", select.id()))
        .style(Style::new().dim());

    let mut states = Vec::new();
    if focused {
        states.push(State::Focused);
    }
    if inner.error.is_some() {
        states.push(State::Invalid);
    }
    if disabled {
        states.push(State::Disabled);
    }

    let border = match inner.size {
        TriggerSize::Sm => 0,
        TriggerSize::Default => 2,
    };
    let mut trigger = Element::row()
        .id(select.id())
        .gap(1)
        .padding(Edges::horizontal(1))
        .min_width(widest_label(inner) + 4 + border)
        .focusable(true)
        .clickable(true)
        .captures_input(true)
        .disabled(disabled)
        .data("data-state", if open { "open" } else { "closed" })
        .data("data-size", inner.size.as_str())
        .child(value)
        .child(chevron);
    if inner.size == TriggerSize::Sm {
        trigger = trigger.style(Style::new().border(Border::None));
    }

    let trigger = adapter::with_states(Slot::SelectTrigger, trigger, &states);
    // The trigger id is what focus and events are keyed on.
    let props = Props {
        id: None,
        ..inner.props.clone()
    };
    adapter::adapt(Slot::SelectTrigger, trigger, &props)
}

fn content(select: &Select, inner: &SelectInner) -> Element {
    let max_rows = inner.max_rows();
    let end = (inner.scroll + max_rows).min(inner.rows.len());
    let shown = &inner.rows[inner.scroll.min(end)..end];
    let can_scroll_up = inner.scroll > 0;
    let can_scroll_down = end < inner.rows.len();

    let anchor = inner.anchor.unwrap_or_default();
    // Border, padding, check column and its gap.
    let natural_width = widest_label(inner) + 6;
    let width = natural_width.max(anchor.width);
    let inner_width = width.saturating_sub(2);
    let height = shown.len() as u16 + 2 + can_scroll_up as u16 + can_scroll_down as u16;

    let rows: Vec<Element> = shown
        .iter()
        .map(|row| match row {
            Row::Item(index) => item_row(select, inner, *index),
            Row::GroupLabel(label) => adapter::slot(
                Slot::SelectLabel,
                Element::text(label).padding(Edges::horizontal(1)),
            ),
            Row::Separator => adapter::slot(
                Slot::SelectSeparator,
                Element::text("─".repeat(inner_width as usize)),
            ),
        })
        .collect();

    let (x, y, side) = match inner.position {
        ContentPosition::Popper => {
            let placement = popover::place(
                anchor,
                (width, height),
                inner.viewport,
                Side::Bottom,
                inner.align,
                inner.side_offset,
            );
            (placement.x, placement.y, placement.side)
        }
        ContentPosition::ItemAligned => {
            // Lay the focused row over the trigger's text row.
            let focus = inner
                .focus_row()
                .filter(|row| (inner.scroll..end).contains(row))
                .map(|row| row - inner.scroll)
                .unwrap_or(0);
            let trigger_text_row = anchor.y as i32 + (anchor.height as i32 - 1) / 2;
            let y = trigger_text_row - 1 - can_scroll_up as i32 - focus as i32;
            let (x, y) = popover::clamp(inner.viewport, anchor.x as i32, y, (width, height));
            (x, y, Side::Bottom)
        }
    };

    let mut body = Vec::new();
    if can_scroll_up {
        body.push(scroll_button(select.scroll_up_id(), "▴", Slot::SelectScrollUpButton));
    }
    body.push(
        Element::col()
            .id(format!("{}-viewport", select.id()))
            .children(rows),
    );
    if can_scroll_down {
        body.push(scroll_button(
            select.scroll_down_id(),
            "▾",
            Slot::SelectScrollDownButton,
        ));
    }

    let content = Element::col()
        .id(select.content_id())
        .at(x as i16, y as i16)
        .z_index(CONTENT_Z_INDEX)
        .width(Size::Fixed(width))
        .height(Size::Fixed(height))
        .overflow(Overflow::Hidden)
        .interaction_scope(true)
        .data("data-state", "open")
        .data("data-side", side.as_str())
        .data("data-align", inner.align.as_str())
        .data("position", inner.position.as_str())
        .children(body);
    adapter::slot(Slot::SelectContent, content)
}

fn item_row(select: &Select, inner: &SelectInner, index: usize) -> Element {
    let item = &inner.listbox.items()[index];
    let highlighted = inner.listbox.highlighted() == Some(&item.id);
    let selected = inner.listbox.selected() == Some(&item.id);

    let mut states = Vec::new();
    if highlighted {
        states.push(State::Highlighted);
    }
    if item.disabled {
        states.push(State::Disabled);
    }

    let indicator = adapter::slot(
        Slot::SelectItemIndicator,
        Element::text(if selected { CHECK } else { " " }),
    );
    let row = Element::row()
        .id(select.item_element_id(&item.id))
        .gap(1)
        .padding(Edges::horizontal(1))
        .clickable(!item.disabled)
        .data("data-value", item.id.as_str())
        .data("data-state", if selected { "checked" } else { "unchecked" })
        .flag("data-selected", selected)
        .child(Element::text(&item.label).flex_grow(1))
        .child(indicator);

    adapter::slot(Slot::SelectItem, adapter::with_states(Slot::SelectItem, row, &states))
}

fn scroll_button(id: String, glyph: &str, slot: Slot) -> Element {
    adapter::slot(
        slot,
        Element::text(glyph)
            .id(id)
            .clickable(true)
            .text_align(TextAlign::Center),
    )
}
