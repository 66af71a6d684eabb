//! Element tree for the Command widget.
//!
//! ```text
//! command
//! ├── command-input-wrapper ── glyph, command-input
//! └── command-list           (only while open)
//!     └── command-empty | command-group / command-item / command-separator
//! ```

use stockdom::{Edges, Element, Size};

use super::item::Row;
use super::state::CommandInner;
use super::Command;
use crate::adapter;
use crate::tokens::{Slot, State};

const SEARCH_GLYPH: &str = "⌕";

impl Command {
    /// Build the element tree for the current state.
    pub fn element(&self, focused: bool) -> Element {
        self.read(|inner| build(self, inner, focused))
            .unwrap_or_else(|| Element::box_().id(self.id()))
    }
}

fn build(command: &Command, inner: &CommandInner, focused: bool) -> Element {
    let open = inner.listbox.is_open();
    let mut root = Element::col()
        .id(command.id())
        .width(Size::Fixed(inner.width))
        .data("data-state", if open { "open" } else { "closed" })
        .child(input(command, inner, focused));
    if open {
        root = root.child(list(command, inner));
    }
    adapter::adapt(Slot::Command, root, &inner.props)
}

fn input(command: &Command, inner: &CommandInner, focused: bool) -> Element {
    let disabled = inner.listbox.is_disabled();
    let field = if inner.query.is_empty() {
        adapter::with_states(
            Slot::CommandInput,
            Element::text(&inner.placeholder),
            &[State::Placeholder],
        )
    } else {
        Element::text(&inner.query)
    };
    let mut states = Vec::new();
    if focused {
        states.push(State::Focused);
    }
    if disabled {
        states.push(State::Disabled);
    }
    let field = adapter::with_states(
        Slot::CommandInput,
        field
            .id(command.input_id())
            .flex_grow(1)
            .focusable(true)
            .clickable(true)
            .captures_input(true)
            .disabled(disabled),
        &states,
    );

    let wrapper = Element::row()
        .id(format!("{}-input-wrapper", command.id()))
        .gap(1)
        .padding(Edges::horizontal(1))
        .child(Element::text(SEARCH_GLYPH))
        .child(adapter::slot(Slot::CommandInput, field));
    adapter::slot(Slot::CommandInputWrapper, wrapper)
}

fn list(command: &Command, inner: &CommandInner) -> Element {
    let list = Element::col().id(command.list_id());
    if inner.listbox.visible_indices().is_empty() {
        let empty = adapter::slot(
            Slot::CommandEmpty,
            Element::text(&inner.empty_text)
                .id(command.empty_id())
                .padding(Edges::symmetric(1, 2)),
        );
        return adapter::slot(Slot::CommandList, list.child(empty));
    }

    let rows = inner.display_rows();
    let end = (inner.scroll + inner.max_rows()).min(rows.len());
    let separator_width = inner.width as usize;
    let children: Vec<Element> = rows[inner.scroll.min(end)..end]
        .iter()
        .map(|row| match row {
            Row::Item(index) => item_row(command, inner, *index),
            Row::Heading(heading) => adapter::slot(
                Slot::CommandGroup,
                Element::text(heading).padding(Edges::horizontal(1)),
            ),
            Row::Separator => adapter::slot(
                Slot::CommandSeparator,
                Element::text("─".repeat(separator_width)),
            ),
        })
        .collect();

    adapter::slot(
        Slot::CommandList,
        list.max_height(inner.max_rows() as u16)
            .children(children),
    )
}

fn item_row(command: &Command, inner: &CommandInner, index: usize) -> Element {
    let item = &inner.listbox.items()[index];
    let highlighted = inner.listbox.highlighted() == Some(&item.id);

    let mut states = Vec::new();
    if highlighted {
        states.push(State::Highlighted);
    }
    if item.disabled {
        states.push(State::Disabled);
    }

    let mut row = Element::row()
        .id(command.item_element_id(&item.id))
        .gap(2)
        .padding(Edges::horizontal(1))
        .clickable(!item.disabled)
        .data("data-value", item.id.as_str())
        .child(Element::text(&item.label).flex_grow(1));
    if let Some(shortcut) = inner.shortcuts.get(index).and_then(Option::as_deref) {
        row = row.child(adapter::slot(Slot::CommandShortcut, Element::text(shortcut)));
    }

    adapter::slot(
        Slot::CommandItem,
        adapter::with_states(Slot::CommandItem, row, &states),
    )
}
