//! Items and list structure for the Select widget.

use crate::primitive::{ItemDescriptor, ItemId};

/// Anything that can be shown as an option.
///
/// ```ignore
/// struct Country { code: &'static str, name: &'static str }
///
/// impl SelectItem for Country {
///     fn select_id(&self) -> ItemId { self.code.into() }
///     fn select_label(&self) -> String { self.name.to_string() }
/// }
/// ```
pub trait SelectItem {
    fn select_id(&self) -> ItemId;

    fn select_label(&self) -> String;

    fn select_disabled(&self) -> bool {
        false
    }

    fn to_descriptor(&self) -> ItemDescriptor {
        ItemDescriptor::new(self.select_id(), self.select_label()).disabled(self.select_disabled())
    }
}

impl SelectItem for ItemDescriptor {
    fn select_id(&self) -> ItemId {
        self.id.clone()
    }

    fn select_label(&self) -> String {
        self.label.clone()
    }

    fn select_disabled(&self) -> bool {
        self.disabled
    }
}

impl SelectItem for &str {
    fn select_id(&self) -> ItemId {
        (*self).into()
    }

    fn select_label(&self) -> String {
        (*self).to_string()
    }
}

impl SelectItem for String {
    fn select_id(&self) -> ItemId {
        self.as_str().into()
    }

    fn select_label(&self) -> String {
        self.clone()
    }
}

impl<S1, S2> SelectItem for (S1, S2)
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    fn select_id(&self) -> ItemId {
        self.0.as_ref().into()
    }

    fn select_label(&self) -> String {
        self.1.as_ref().to_string()
    }
}

/// One entry of the option list: a plain item, a labelled group, or a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEntry {
    Item(ItemDescriptor),
    Group {
        label: String,
        items: Vec<ItemDescriptor>,
    },
    Separator,
}

impl SelectEntry {
    pub fn item(item: impl SelectItem) -> Self {
        Self::Item(item.to_descriptor())
    }

    pub fn group<I: SelectItem>(label: impl Into<String>, items: impl IntoIterator<Item = I>) -> Self {
        Self::Group {
            label: label.into(),
            items: items.into_iter().map(|i| i.to_descriptor()).collect(),
        }
    }
}


/// A display row of the open list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Row {
    /// Index into the listbox items.
    Item(usize),
    GroupLabel(String),
    Separator,
}

/// Flatten entries into listbox items and display rows.
pub(crate) fn flatten(entries: Vec<SelectEntry>) -> (Vec<ItemDescriptor>, Vec<Row>) {
    let mut items = Vec::new();
    let mut rows = Vec::new();
    for entry in entries {
        match entry {
            SelectEntry::Item(item) => {
                rows.push(Row::Item(items.len()));
                items.push(item);
            }
            SelectEntry::Group { label, items: group } => {
                rows.push(Row::GroupLabel(label));
                for item in group {
                    rows.push(Row::Item(items.len()));
                    items.push(item);
                }
            }
            SelectEntry::Separator => rows.push(Row::Separator),
        }
    }
    (items, rows)
}
