//! Command widget state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use super::filter::{CommandError, Filter, SubstringFilter};
use super::item::{display_rows, flatten, CommandEntry, Row};
use crate::adapter::Props;
use crate::primitive::{Commit, ItemDescriptor, ItemId, Listbox, Outcome, SelectionState};

pub type SelectHandler = Arc<dyn Fn(&Commit) + Send + Sync>;

pub const DEFAULT_PLACEHOLDER: &str = "Type a command or search...";
pub const DEFAULT_EMPTY_TEXT: &str = "No results found.";

fn generate_auto_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("__command_{id}")
}

pub(super) struct CommandInner {
    pub(super) listbox: Listbox,
    pub(super) shortcuts: Vec<Option<String>>,
    pub(super) rows: Vec<Row>,
    pub(super) query: String,
    pub(super) placeholder: String,
    pub(super) empty_text: String,
    pub(super) width: u16,
    pub(super) scroll: usize,
    pub(super) props: Props,
    filter: Arc<dyn Filter>,
    on_select: Option<SelectHandler>,
}

impl CommandInner {
    pub(super) fn max_rows(&self) -> usize {
        self.listbox.page_size()
    }

    /// Rows for the current query, before scrolling.
    pub(super) fn display_rows(&self) -> Vec<Row> {
        display_rows(
            &self.rows,
            self.listbox.visible_indices(),
            !self.query.is_empty(),
        )
    }

    fn reveal(&mut self) {
        let rows = self.display_rows();
        let max_rows = self.max_rows();
        let items = self.listbox.items();
        let highlighted = self.listbox.highlighted();
        let row = highlighted.and_then(|id| {
            rows.iter()
                .position(|row| matches!(row, Row::Item(i) if &items[*i].id == id))
        });

        if let Some(row) = row {
            if row < self.scroll {
                self.scroll = row;
            } else if row >= self.scroll + max_rows {
                self.scroll = row + 1 - max_rows;
            }
        }
        self.scroll = self.scroll.min(rows.len().saturating_sub(max_rows));
    }

    fn matches(&self, query: &str, items: &[ItemDescriptor]) -> Result<Vec<usize>, CommandError> {
        if query.is_empty() {
            Ok((0..items.len()).collect())
        } else {
            self.filter.filter(query, items)
        }
    }

    /// Filter for `query` and, only if that succeeds, make it current.
    fn apply_query(&mut self, query: String) -> Result<(), CommandError> {
        let order = self.matches(&query, self.listbox.items())?;
        self.show(query, order);
        Ok(())
    }

    fn show(&mut self, query: String, order: Vec<usize>) {
        log::debug!("command query {query:?} matches {} items", order.len());
        self.query = query;
        self.listbox.set_visible(order);
        self.listbox.first();
        self.scroll = 0;
        self.reveal();
    }
}

/// A searchable list of commands.
///
/// Typing narrows the list through a [`Filter`]; activating an item commits
/// it, notifies the caller once, and closes the list.
#[derive(Clone)]
pub struct Command {
    id: String,
    inner: Arc<RwLock<CommandInner>>,
    dirty: Arc<AtomicBool>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("query", &self.query())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Command {
    pub fn new(entries: Vec<CommandEntry>) -> Self {
        let (items, shortcuts, rows) = flatten(entries);
        let mut listbox = Listbox::new(items);
        listbox.set_page_size(10);
        Self {
            id: generate_auto_id(),
            inner: Arc::new(RwLock::new(CommandInner {
                listbox,
                shortcuts,
                rows,
                query: String::new(),
                placeholder: DEFAULT_PLACEHOLDER.to_string(),
                empty_text: DEFAULT_EMPTY_TEXT.to_string(),
                width: 48,
                scroll: 0,
                props: Props::default(),
                filter: Arc::new(SubstringFilter),
                on_select: None,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_filter(self, filter: impl Filter + 'static) -> Self {
        self.update(|inner| inner.filter = Arc::new(filter));
        self
    }

    pub fn with_placeholder(self, placeholder: impl Into<String>) -> Self {
        self.update(|inner| inner.placeholder = placeholder.into());
        self
    }

    /// Text shown when nothing matches.
    pub fn with_empty_text(self, text: impl Into<String>) -> Self {
        self.update(|inner| inner.empty_text = text.into());
        self
    }

    pub fn with_width(self, width: u16) -> Self {
        self.update(|inner| inner.width = width);
        self
    }

    pub fn with_max_rows(self, rows: usize) -> Self {
        self.update(|inner| inner.listbox.set_page_size(rows));
        self
    }

    pub fn with_props(self, props: Props) -> Self {
        self.update(|inner| inner.props = props);
        self
    }

    /// Called once for every committed item.
    pub fn on_select(self, handler: impl Fn(&Commit) + Send + Sync + 'static) -> Self {
        self.update(|inner| inner.on_select = Some(Arc::new(handler)));
        self
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the query input, which holds focus while the list is open.
    pub fn input_id(&self) -> String {
        format!("{}-input", self.id)
    }

    pub fn list_id(&self) -> String {
        format!("{}-list", self.id)
    }

    pub fn empty_id(&self) -> String {
        format!("{}-empty", self.id)
    }

    pub(super) fn item_prefix(&self) -> String {
        format!("{}-item-", self.id)
    }

    pub fn item_element_id(&self, item: &ItemId) -> String {
        format!("{}{item}", self.item_prefix())
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn state(&self) -> SelectionState {
        self.read(|inner| inner.listbox.state().clone())
            .unwrap_or_default()
    }

    pub fn is_open(&self) -> bool {
        self.read(|inner| inner.listbox.is_open()).unwrap_or(false)
    }

    pub fn query(&self) -> String {
        self.read(|inner| inner.query.clone()).unwrap_or_default()
    }

    pub fn highlighted(&self) -> Option<ItemId> {
        self.read(|inner| inner.listbox.highlighted().cloned())
            .flatten()
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.read(|inner| inner.listbox.selected().cloned()).flatten()
    }

    /// Visible items in display order.
    pub fn visible_items(&self) -> Vec<ItemDescriptor> {
        self.read(|inner| inner.listbox.visible_items().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_disabled(&self) -> bool {
        self.read(|inner| inner.listbox.is_disabled()).unwrap_or(false)
    }

    /// True when the query matches nothing and the empty state is showing.
    pub fn is_empty(&self) -> bool {
        self.read(|inner| inner.listbox.visible_indices().is_empty())
            .unwrap_or(true)
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Replace the entries. The current query is filtered again; when that
    /// fails the old entries stay in place and the error is returned.
    pub fn set_entries(&self, entries: Vec<CommandEntry>) -> Result<(), CommandError> {
        self.update(|inner| {
            let (items, shortcuts, rows) = flatten(entries);
            let query = inner.query.clone();
            let order = inner.matches(&query, &items)?;
            inner.listbox.set_items(items);
            inner.shortcuts = shortcuts;
            inner.rows = rows;
            inner.show(query, order);
            Ok(())
        })
        .unwrap_or(Ok(()))
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.update(|inner| inner.listbox.set_disabled(disabled));
    }

    /// Replace the query. When the filter fails the error is returned and
    /// the previous query and matches stay as they were.
    pub fn set_query(&self, query: impl Into<String>) -> Result<(), CommandError> {
        let query = query.into();
        self.update(|inner| inner.apply_query(query))
            .unwrap_or(Ok(()))
    }

    pub fn push_char(&self, ch: char) -> Result<(), CommandError> {
        let mut query = self.query();
        query.push(ch);
        self.set_query(query)
    }

    pub fn backspace(&self) -> Result<(), CommandError> {
        let mut query = self.query();
        if query.pop().is_none() {
            return Ok(());
        }
        self.set_query(query)
    }

    pub fn clear_query(&self) -> Result<(), CommandError> {
        self.set_query(String::new())
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Open with an empty query and the first item highlighted.
    pub fn open(&self) -> Outcome {
        self.transition(|inner| {
            let outcome = inner.listbox.open();
            if outcome.is_changed() {
                // An empty query bypasses the filter, so this cannot fail.
                let _ = inner.apply_query(String::new());
            }
            outcome
        })
    }

    pub fn cancel(&self) -> Outcome {
        self.transition(|inner| inner.listbox.cancel())
    }

    pub fn next(&self) -> Outcome {
        self.transition(|inner| inner.listbox.next())
    }

    pub fn prev(&self) -> Outcome {
        self.transition(|inner| inner.listbox.prev())
    }

    pub fn first(&self) -> Outcome {
        self.transition(|inner| inner.listbox.first())
    }

    pub fn last(&self) -> Outcome {
        self.transition(|inner| inner.listbox.last())
    }

    pub fn page_up(&self) -> Outcome {
        self.transition(|inner| inner.listbox.page_up())
    }

    pub fn page_down(&self) -> Outcome {
        self.transition(|inner| inner.listbox.page_down())
    }

    pub fn highlight(&self, id: &ItemId) -> Outcome {
        self.transition(|inner| inner.listbox.highlight(id))
    }

    pub fn confirm(&self) -> Outcome {
        self.transition(|inner| inner.listbox.confirm())
    }

    pub fn activate(&self, id: &ItemId) -> Outcome {
        self.transition(|inner| inner.listbox.activate(id))
    }

    fn transition(&self, op: impl FnOnce(&mut CommandInner) -> Outcome) -> Outcome {
        let applied = self.update(|inner| {
            let outcome = op(inner);
            if outcome.is_changed() {
                inner.reveal();
            }
            let handler = outcome.commit().and(inner.on_select.clone());
            (outcome, handler)
        });

        let Some((outcome, handler)) = applied else {
            return Outcome::Unchanged;
        };
        if let (Some(commit), Some(handler)) = (outcome.commit(), handler) {
            handler(commit);
        }
        outcome
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    pub(super) fn read<R>(&self, f: impl FnOnce(&CommandInner) -> R) -> Option<R> {
        self.inner.read().ok().map(|guard| f(&guard))
    }

    fn update<R>(&self, f: impl FnOnce(&mut CommandInner) -> R) -> Option<R> {
        let mut guard = self.inner.write().ok()?;
        let result = f(&mut guard);
        self.dirty.store(true, Ordering::SeqCst);
        Some(result)
    }
}
