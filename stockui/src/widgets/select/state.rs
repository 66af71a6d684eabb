//! Select widget state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use stockdom::Rect;

use super::item::{flatten, Row, SelectEntry, SelectItem};
use crate::adapter::Props;
use crate::primitive::popover::Align;
use crate::primitive::{Commit, ItemDescriptor, ItemId, Listbox, Outcome, SelectionState};
use crate::validation::{ErrorDisplay, Validatable};

/// Payload handed to the change callback, once per committed selection.
pub type SelectChange = Commit;

pub type ChangeHandler = Arc<dyn Fn(&SelectChange) + Send + Sync>;

fn generate_auto_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("__select_{id}")
}

/// Trigger height variant, mirrored as `data-size`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerSize {
    /// Borderless, one row.
    Sm,
    #[default]
    Default,
}

impl TriggerSize {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerSize::Sm => "sm",
            TriggerSize::Default => "default",
        }
    }
}

/// How the open list is positioned relative to the trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentPosition {
    /// The selected item is laid over the trigger.
    #[default]
    ItemAligned,
    /// The list drops below the trigger like a popover.
    Popper,
}

impl ContentPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentPosition::ItemAligned => "item-aligned",
            ContentPosition::Popper => "popper",
        }
    }
}

pub(super) struct SelectInner {
    pub(super) listbox: Listbox,
    pub(super) rows: Vec<Row>,
    pub(super) placeholder: String,
    pub(super) size: TriggerSize,
    pub(super) position: ContentPosition,
    pub(super) align: Align,
    pub(super) side_offset: u16,
    /// First row shown in the viewport.
    pub(super) scroll: usize,
    pub(super) anchor: Option<Rect>,
    pub(super) viewport: Rect,
    pub(super) error: Option<String>,
    pub(super) error_display: ErrorDisplay,
    pub(super) props: Props,
    on_change: Option<ChangeHandler>,
}

impl SelectInner {
    fn new(entries: Vec<SelectEntry>) -> Self {
        let (items, rows) = flatten(entries);
        Self {
            listbox: Listbox::new(items),
            rows,
            placeholder: String::new(),
            size: TriggerSize::default(),
            position: ContentPosition::default(),
            align: Align::Start,
            side_offset: 0,
            scroll: 0,
            anchor: None,
            viewport: Rect::default(),
            error: None,
            error_display: ErrorDisplay::default(),
            props: Props::default(),
            on_change: None,
        }
    }

    pub(super) fn max_rows(&self) -> usize {
        self.listbox.page_size()
    }

    /// Row index of an item, by id.
    fn row_of(&self, id: &ItemId) -> Option<usize> {
        let items = self.listbox.items();
        self.rows
            .iter()
            .position(|row| matches!(row, Row::Item(i) if &items[*i].id == id))
    }

    /// Row the open list is centred on: the highlight, else the selection.
    pub(super) fn focus_row(&self) -> Option<usize> {
        self.listbox
            .highlighted()
            .or(self.listbox.selected())
            .and_then(|id| self.row_of(id))
    }

    /// Scroll just enough to bring the focus row into the viewport.
    fn reveal(&mut self) {
        let max_rows = self.max_rows();
        let last_start = self.rows.len().saturating_sub(max_rows);
        if let Some(row) = self.focus_row() {
            if row < self.scroll {
                self.scroll = row;
            } else if row >= self.scroll + max_rows {
                self.scroll = row + 1 - max_rows;
            }
        }
        self.scroll = self.scroll.min(last_start);
    }
}

/// A dropdown select.
///
/// `Select` is a cheap handle: clones share the same state, so a page can
/// keep one in its struct and hand clones to the validator.
///
/// ```ignore
/// let goals = Select::new([("1", "Growth"), ("2", "Income")])
///     .with_placeholder("Select your investment goals")
///     .on_change(|change| log::info!("picked {}", change.value));
/// ```
#[derive(Clone)]
pub struct Select {
    id: String,
    inner: Arc<RwLock<SelectInner>>,
    dirty: Arc<AtomicBool>,
}

impl fmt::Debug for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::with_entries(Vec::new())
    }
}

impl Select {
    pub fn new<I: SelectItem>(items: impl IntoIterator<Item = I>) -> Self {
        Self::with_entries(items.into_iter().map(SelectEntry::item).collect())
    }

    /// Create a select whose list contains groups and separators.
    pub fn with_entries(entries: Vec<SelectEntry>) -> Self {
        Self {
            id: generate_auto_id(),
            inner: Arc::new(RwLock::new(SelectInner::new(entries))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    /// Replace the generated id. Call before cloning the handle.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_placeholder(self, placeholder: impl Into<String>) -> Self {
        self.update(|inner| inner.placeholder = placeholder.into());
        self
    }

    pub fn with_value(self, value: impl Into<ItemId>) -> Self {
        self.set_value(Some(value.into()));
        self
    }

    pub fn with_size(self, size: TriggerSize) -> Self {
        self.update(|inner| inner.size = size);
        self
    }

    pub fn with_position(self, position: ContentPosition) -> Self {
        self.update(|inner| inner.position = position);
        self
    }

    /// Alignment of popper content against the trigger.
    pub fn with_align(self, align: Align) -> Self {
        self.update(|inner| inner.align = align);
        self
    }

    /// Gap between trigger and popper content, in cells.
    pub fn with_side_offset(self, offset: u16) -> Self {
        self.update(|inner| inner.side_offset = offset);
        self
    }

    /// Maximum rows shown before the list scrolls.
    pub fn with_max_rows(self, rows: usize) -> Self {
        self.update(|inner| inner.listbox.set_page_size(rows));
        self
    }

    /// Style override and passthrough attributes for the trigger.
    pub fn with_props(self, props: Props) -> Self {
        self.update(|inner| inner.props = props);
        self
    }

    /// Called once for every committed selection.
    pub fn on_change(self, handler: impl Fn(&SelectChange) + Send + Sync + 'static) -> Self {
        self.update(|inner| inner.on_change = Some(Arc::new(handler)));
        self
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    /// Id of the trigger element, which is what receives focus.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root_id(&self) -> String {
        format!("{}-root", self.id)
    }

    pub fn content_id(&self) -> String {
        format!("{}-content", self.id)
    }

    pub(super) fn item_prefix(&self) -> String {
        format!("{}-item-", self.id)
    }

    pub fn item_element_id(&self, item: &ItemId) -> String {
        format!("{}{item}", self.item_prefix())
    }

    pub(super) fn scroll_up_id(&self) -> String {
        format!("{}-scroll-up", self.id)
    }

    pub(super) fn scroll_down_id(&self) -> String {
        format!("{}-scroll-down", self.id)
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

    pub fn is_disabled(&self) -> bool {
        self.read(|inner| inner.listbox.is_disabled())
            .unwrap_or(false)
    }

    pub fn value(&self) -> Option<ItemId> {
        self.read(|inner| inner.listbox.selected().cloned()).flatten()
    }

    pub fn selected_label(&self) -> Option<String> {
        self.read(|inner| inner.listbox.selected_item().map(|i| i.label.clone()))
            .flatten()
    }

    pub fn highlighted(&self) -> Option<ItemId> {
        self.read(|inner| inner.listbox.highlighted().cloned())
            .flatten()
    }

    pub fn items(&self) -> Vec<ItemDescriptor> {
        self.read(|inner| inner.listbox.items().to_vec())
            .unwrap_or_default()
    }

    pub fn placeholder(&self) -> String {
        self.read(|inner| inner.placeholder.clone())
            .unwrap_or_default()
    }

    /// Index of the first row in the viewport.
    pub fn scroll_offset(&self) -> usize {
        self.read(|inner| inner.scroll).unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Set the value from outside. Does not notify. Unknown and disabled ids
    /// are refused and leave the value as it was.
    pub fn set_value(&self, value: Option<ItemId>) -> bool {
        self.update(|inner| {
            let accepted = inner.listbox.set_selected(value);
            if accepted {
                inner.error = None;
            }
            accepted
        })
        .unwrap_or(false)
    }

    pub fn set_items<I: SelectItem>(&self, items: impl IntoIterator<Item = I>) {
        self.set_entries(items.into_iter().map(SelectEntry::item).collect());
    }

    /// Replace the option list. A selection whose item vanished is dropped.
    pub fn set_entries(&self, entries: Vec<SelectEntry>) {
        self.update(|inner| {
            let (items, rows) = flatten(entries);
            inner.listbox.set_items(items);
            inner.rows = rows;
            inner.scroll = 0;
            inner.reveal();
        });
    }

    /// While disabled every interaction is ignored. Disabling an open select
    /// closes it without a change notification.
    pub fn set_disabled(&self, disabled: bool) {
        self.update(|inner| inner.listbox.set_disabled(disabled));
    }

    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        self.update(|inner| inner.placeholder = placeholder.into());
    }

    /// Record where the trigger was drawn and how large the screen is.
    pub fn set_geometry(&self, anchor: Option<Rect>, viewport: Rect) {
        if let Ok(mut guard) = self.inner.write() {
            guard.anchor = anchor;
            guard.viewport = viewport;
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    pub fn open(&self) -> Outcome {
        self.transition(Listbox::open)
    }

    /// Close without committing.
    pub fn cancel(&self) -> Outcome {
        self.transition(Listbox::cancel)
    }

    pub fn next(&self) -> Outcome {
        self.transition(Listbox::next)
    }

    pub fn prev(&self) -> Outcome {
        self.transition(Listbox::prev)
    }

    pub fn first(&self) -> Outcome {
        self.transition(Listbox::first)
    }

    pub fn last(&self) -> Outcome {
        self.transition(Listbox::last)
    }

    pub fn page_up(&self) -> Outcome {
        self.transition(Listbox::page_up)
    }

    pub fn page_down(&self) -> Outcome {
        self.transition(Listbox::page_down)
    }

    pub fn typeahead(&self, ch: char) -> Outcome {
        self.transition(|listbox| listbox.typeahead(ch))
    }

    pub fn highlight(&self, id: &ItemId) -> Outcome {
        self.transition(|listbox| listbox.highlight(id))
    }

    /// Commit the highlighted item.
    pub fn confirm(&self) -> Outcome {
        self.transition(Listbox::confirm)
    }

    /// Commit a specific item.
    pub fn activate(&self, id: &ItemId) -> Outcome {
        self.transition(|listbox| listbox.activate(id))
    }

    /// Scroll the open list by whole rows without moving the highlight.
    pub fn scroll_by(&self, delta: isize) {
        self.update(|inner| {
            let last_start = inner.rows.len().saturating_sub(inner.max_rows());
            inner.scroll = inner.scroll.saturating_add_signed(delta).min(last_start);
        });
    }

    /// Run one listbox operation, keep the viewport on the highlight, and
    /// notify the caller when it committed.
    fn transition(&self, op: impl FnOnce(&mut Listbox) -> Outcome) -> Outcome {
        let applied = self.update(|inner| {
            let outcome = op(&mut inner.listbox);
            if outcome.is_changed() {
                inner.reveal();
            }
            if outcome.commit().is_some() {
                inner.error = None;
            }
            let handler = outcome.commit().and(inner.on_change.clone());
            (outcome, handler)
        });

        let Some((outcome, handler)) = applied else {
            return Outcome::Unchanged;
        };
        // The lock is released here, so the handler may read the select.
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

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    pub fn set_error(&self, msg: impl Into<String>) {
        self.update(|inner| inner.error = Some(msg.into()));
    }

    pub fn clear_error(&self) {
        self.update(|inner| inner.error = None);
    }

    pub fn error(&self) -> Option<String> {
        self.read(|inner| inner.error.clone()).flatten()
    }

    pub fn error_display(&self) -> ErrorDisplay {
        self.read(|inner| inner.error_display).unwrap_or_default()
    }

    pub fn set_error_display(&self, display: ErrorDisplay) {
        self.update(|inner| inner.error_display = display);
    }

    // -------------------------------------------------------------------------
    // Lock helpers
    // -------------------------------------------------------------------------

    pub(super) fn read<R>(&self, f: impl FnOnce(&SelectInner) -> R) -> Option<R> {
        self.inner.read().ok().map(|guard| f(&guard))
    }

    fn update<R>(&self, f: impl FnOnce(&mut SelectInner) -> R) -> Option<R> {
        let mut guard = self.inner.write().ok()?;
        let result = f(&mut guard);
        self.dirty.store(true, Ordering::SeqCst);
        Some(result)
    }
}

impl Validatable for Select {
    type Value = Option<ItemId>;

    fn validation_value(&self) -> Self::Value {
        self.value()
    }

    fn set_error(&self, msg: impl Into<String>) {
        Select::set_error(self, msg)
    }

    fn clear_error(&self) {
        Select::clear_error(self)
    }

    fn error(&self) -> Option<String> {
        Select::error(self)
    }

    fn widget_id(&self) -> String {
        self.id.clone()
    }

    fn error_display(&self) -> ErrorDisplay {
        Select::error_display(self)
    }

    fn set_error_display(&self, display: ErrorDisplay) {
        Select::set_error_display(self, display)
    }
}
