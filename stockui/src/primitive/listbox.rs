//! Keyboard-navigable single-select listbox.
//!
//! `Listbox` owns the [`SelectionState`] of one widget instance. Composite
//! widgets drive it with discrete operations (open, move, confirm, cancel) and
//! read the state back when they build their elements; they never keep a copy
//! of the open flag, highlight, or selection themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one item within a listbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<usize> for ItemId {
    fn from(id: usize) -> Self {
        Self(id.to_string())
    }
}

/// One selectable entry as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
    pub id: ItemId,
    pub label: String,
    pub disabled: bool,
}

impl ItemDescriptor {
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Open flag, keyboard highlight and committed selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub open: bool,
    pub highlighted: Option<ItemId>,
    pub selected: Option<ItemId>,
}

/// Payload of a committed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: ItemId,
    /// The committed item's label.
    pub value: String,
}

/// What an operation did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Unchanged,
    Opened,
    /// Closed without committing.
    Closed,
    /// The highlight moved.
    Moved,
    /// An item was committed and the listbox closed.
    Committed(Commit),
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Outcome::Unchanged)
    }

    pub fn commit(&self) -> Option<&Commit> {
        match self {
            Outcome::Committed(commit) => Some(commit),
            _ => None,
        }
    }
}

const DEFAULT_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone)]
pub struct Listbox {
    state: SelectionState,
    items: Vec<ItemDescriptor>,
    /// Indices into `items`, in display order.
    visible: Vec<usize>,
    disabled: bool,
    page_size: usize,
}

impl Default for Listbox {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Listbox {
    pub fn new(items: Vec<ItemDescriptor>) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            state: SelectionState::default(),
            items,
            visible,
            disabled: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn highlighted(&self) -> Option<&ItemId> {
        self.state.highlighted.as_ref()
    }

    pub fn selected(&self) -> Option<&ItemId> {
        self.state.selected.as_ref()
    }

    pub fn items(&self) -> &[ItemDescriptor] {
        &self.items
    }

    pub fn item(&self, id: &ItemId) -> Option<&ItemDescriptor> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn selected_item(&self) -> Option<&ItemDescriptor> {
        self.state.selected.as_ref().and_then(|id| self.item(id))
    }

    /// Indices into [`items`](Self::items) of the visible items, in display order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &ItemDescriptor> {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Replace the item set. Highlight or selection pointing at items that no
    /// longer exist is dropped, and every item becomes visible again.
    pub fn set_items(&mut self, items: Vec<ItemDescriptor>) {
        self.items = items;
        self.visible = (0..self.items.len()).collect();

        if self
            .state
            .selected
            .as_ref()
            .is_some_and(|id| self.item(id).is_none())
        {
            log::debug!("selected item vanished from the item set");
            self.state.selected = None;
        }
        if self
            .state
            .highlighted
            .as_ref()
            .is_some_and(|id| !self.is_navigable(id))
        {
            self.state.highlighted = None;
        }
    }

    /// Restrict and reorder the visible items. Out of range indices are
    /// skipped. The highlight is dropped if its item is no longer visible.
    pub fn set_visible(&mut self, order: Vec<usize>) {
        let len = self.items.len();
        self.visible = order.into_iter().filter(|&i| i < len).collect();
        if self
            .state
            .highlighted
            .as_ref()
            .is_some_and(|id| !self.is_navigable(id))
        {
            self.state.highlighted = None;
        }
    }

    /// Set the committed value from outside (a controlled value). Unknown and
    /// disabled ids are refused.
    pub fn set_selected(&mut self, id: Option<ItemId>) -> bool {
        match id {
            None => {
                self.state.selected = None;
                true
            }
            Some(id) => match self.item(&id) {
                Some(item) if !item.disabled => {
                    self.state.selected = Some(id);
                    true
                }
                Some(_) => {
                    log::warn!("refusing to select disabled item {id}");
                    false
                }
                None => {
                    log::warn!("refusing to select unknown item {id}");
                    false
                }
            },
        }
    }

    /// A disabled listbox ignores every interaction. Disabling an open
    /// listbox closes it without committing.
    pub fn set_disabled(&mut self, disabled: bool) -> Outcome {
        self.disabled = disabled;
        if disabled && self.state.open {
            self.close();
            return Outcome::Closed;
        }
        Outcome::Unchanged
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    // -------------------------------------------------------------------------
    // Open / close
    // -------------------------------------------------------------------------

    /// Open the list. The selected item becomes the highlight when it can be
    /// navigated to; otherwise nothing is highlighted.
    pub fn open(&mut self) -> Outcome {
        if self.disabled || self.state.open {
            return Outcome::Unchanged;
        }
        self.state.open = true;
        self.state.highlighted = self
            .state
            .selected
            .clone()
            .filter(|id| self.is_navigable(id));
        log::debug!("listbox opened");
        Outcome::Opened
    }

    /// Close without committing.
    pub fn cancel(&mut self) -> Outcome {
        if self.disabled || !self.state.open {
            return Outcome::Unchanged;
        }
        self.close();
        log::debug!("listbox cancelled");
        Outcome::Closed
    }

    pub fn toggle(&mut self) -> Outcome {
        if self.state.open {
            self.cancel()
        } else {
            self.open()
        }
    }

    fn close(&mut self) {
        self.state.open = false;
        self.state.highlighted = None;
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn next(&mut self) -> Outcome {
        self.step(1, true)
    }

    pub fn prev(&mut self) -> Outcome {
        self.step(-1, true)
    }

    pub fn page_down(&mut self) -> Outcome {
        self.step(self.page_size as isize, false)
    }

    pub fn page_up(&mut self) -> Outcome {
        self.step(-(self.page_size as isize), false)
    }

    pub fn first(&mut self) -> Outcome {
        let target = self.navigable().first().copied();
        self.highlight_index(target)
    }

    pub fn last(&mut self) -> Outcome {
        let target = self.navigable().last().copied();
        self.highlight_index(target)
    }

    /// Highlight a specific item, e.g. under the pointer. Disabled or hidden
    /// items are ignored.
    pub fn highlight(&mut self, id: &ItemId) -> Outcome {
        if !self.is_navigable(id) {
            return Outcome::Unchanged;
        }
        let index = self.items.iter().position(|item| &item.id == id);
        self.highlight_index(index)
    }

    /// Jump to the next enabled item whose label starts with `ch`, searching
    /// forward from the current highlight and wrapping.
    pub fn typeahead(&mut self, ch: char) -> Outcome {
        if self.disabled || !self.state.open {
            return Outcome::Unchanged;
        }
        let navigable = self.navigable();
        if navigable.is_empty() {
            return Outcome::Unchanged;
        }

        let start = self
            .current_position(&navigable)
            .map(|p| p + 1)
            .unwrap_or(0);
        let needle: String = ch.to_lowercase().collect();
        let target = (0..navigable.len())
            .map(|offset| navigable[(start + offset) % navigable.len()])
            .find(|&i| self.items[i].label.to_lowercase().starts_with(&needle));

        match target {
            Some(index) => self.highlight_index(Some(index)),
            None => Outcome::Unchanged,
        }
    }

    fn step(&mut self, delta: isize, wrap: bool) -> Outcome {
        if self.disabled || !self.state.open {
            return Outcome::Unchanged;
        }
        let navigable = self.navigable();
        if navigable.is_empty() {
            return self.highlight_index(None);
        }

        let len = navigable.len() as isize;
        let position = match self.current_position(&navigable) {
            None if delta >= 0 => 0,
            None => len - 1,
            Some(current) if wrap => (current as isize + delta).rem_euclid(len),
            Some(current) => (current as isize + delta).clamp(0, len - 1),
        };
        self.highlight_index(Some(navigable[position as usize]))
    }

    fn highlight_index(&mut self, index: Option<usize>) -> Outcome {
        if self.disabled || !self.state.open {
            return Outcome::Unchanged;
        }
        let next = index.map(|i| self.items[i].id.clone());
        if next == self.state.highlighted {
            return Outcome::Unchanged;
        }
        self.state.highlighted = next;
        Outcome::Moved
    }

    // -------------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------------

    /// Commit the highlighted item.
    pub fn confirm(&mut self) -> Outcome {
        match self.state.highlighted.clone() {
            Some(id) => self.activate(&id),
            None => Outcome::Unchanged,
        }
    }

    /// Commit a specific item, e.g. one that was clicked. Disabled, hidden and
    /// unknown items are ignored.
    pub fn activate(&mut self, id: &ItemId) -> Outcome {
        if self.disabled || !self.state.open || !self.is_navigable(id) {
            return Outcome::Unchanged;
        }
        let Some(item) = self.item(id) else {
            return Outcome::Unchanged;
        };
        let commit = Commit {
            id: item.id.clone(),
            value: item.label.clone(),
        };

        self.state.selected = Some(commit.id.clone());
        self.close();
        log::info!("committed item {} ({})", commit.id, commit.value);
        Outcome::Committed(commit)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Indices of visible, enabled items in display order.
    fn navigable(&self) -> Vec<usize> {
        self.visible
            .iter()
            .copied()
            .filter(|&i| !self.items[i].disabled)
            .collect()
    }

    fn is_navigable(&self, id: &ItemId) -> bool {
        self.visible
            .iter()
            .any(|&i| &self.items[i].id == id && !self.items[i].disabled)
    }

    fn current_position(&self, navigable: &[usize]) -> Option<usize> {
        let current = self.state.highlighted.as_ref()?;
        navigable
            .iter()
            .position(|&i| &self.items[i].id == current)
    }
}
