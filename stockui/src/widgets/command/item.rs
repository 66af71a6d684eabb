//! Items and list structure for the Command widget.

use crate::primitive::{ItemDescriptor, ItemId};

/// A runnable entry with an optional shortcut hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandItem {
    pub descriptor: ItemDescriptor,
    pub shortcut: Option<String>,
}

impl CommandItem {
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>) -> Self {
        Self {
            descriptor: ItemDescriptor::new(id, label),
            shortcut: None,
        }
    }

    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.descriptor.disabled = disabled;
        self
    }
}

impl From<ItemDescriptor> for CommandItem {
    fn from(descriptor: ItemDescriptor) -> Self {
        Self {
            descriptor,
            shortcut: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEntry {
    Item(CommandItem),
    Group {
        heading: String,
        items: Vec<CommandItem>,
    },
    Separator,
}

impl CommandEntry {
    pub fn group(heading: impl Into<String>, items: impl IntoIterator<Item = CommandItem>) -> Self {
        Self::Group {
            heading: heading.into(),
            items: items.into_iter().collect(),
        }
    }
}

impl From<CommandItem> for CommandEntry {
    fn from(item: CommandItem) -> Self {
        Self::Item(item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Row {
    Item(usize),
    Heading(String),
    Separator,
}

/// Flatten entries into listbox items, their shortcuts, and display rows.
pub(crate) fn flatten(
    entries: Vec<CommandEntry>,
) -> (Vec<ItemDescriptor>, Vec<Option<String>>, Vec<Row>) {
    let mut items = Vec::new();
    let mut shortcuts = Vec::new();
    let mut rows = Vec::new();

    let mut push = |item: CommandItem, rows: &mut Vec<Row>| {
        rows.push(Row::Item(items.len()));
        items.push(item.descriptor);
        shortcuts.push(item.shortcut);
    };

    for entry in entries {
        match entry {
            CommandEntry::Item(item) => push(item, &mut rows),
            CommandEntry::Group { heading, items } => {
                rows.push(Row::Heading(heading));
                for item in items {
                    push(item, &mut rows);
                }
            }
            CommandEntry::Separator => rows.push(Row::Separator),
        }
    }
    (items, shortcuts, rows)
}

/// Rows to display for a visible item order.
///
/// With no query the full structure is shown. With a query, separators are
/// hidden and a heading is kept only when one of its items is visible; if the
/// filter reordered the items, they are listed flat in match order.
pub(crate) fn display_rows(rows: &[Row], visible: &[usize], querying: bool) -> Vec<Row> {
    if !querying {
        return rows.to_vec();
    }
    if !visible.is_sorted() {
        return visible.iter().map(|&i| Row::Item(i)).collect();
    }

    let mut shown = Vec::new();
    let mut pending_heading = None;
    for row in rows {
        match row {
            Row::Heading(heading) => pending_heading = Some(heading.clone()),
            Row::Item(index) if visible.binary_search(index).is_ok() => {
                if let Some(heading) = pending_heading.take() {
                    shown.push(Row::Heading(heading));
                }
                shown.push(Row::Item(*index));
            }
            Row::Item(_) | Row::Separator => {}
        }
    }
    shown
}
