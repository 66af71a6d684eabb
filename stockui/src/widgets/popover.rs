//! Popover widget: floating content toggled by a trigger.
//!
//! ```text
//! popover (root)
//! ├── popover-trigger ── caller's trigger element
//! ├── popover-anchor         (optional; placement reference)
//! └── popover-content        (portal, only while open)
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use stockdom::layout::intrinsic_size;
use stockdom::{Element, Event, Key, MouseButton, Rect};

use crate::adapter::{self, Props};
use crate::events::{EventContext, EventResult};
use crate::primitive::popover::{Align, Side};
use crate::primitive::{place, PopoverState};
use crate::tokens::Slot;

/// Stacking level of open popover content.
pub const POPOVER_Z_INDEX: i16 = 50;

fn generate_auto_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("__popover_{id}")
}

#[derive(Debug, Default)]
struct PopoverInner {
    state: PopoverState,
    side: Side,
    align: Align,
    side_offset: u16,
    anchor_id: Option<String>,
    anchor: Option<Rect>,
    viewport: Rect,
    props: Props,
}

#[derive(Debug, Clone)]
pub struct Popover {
    id: String,
    inner: Arc<RwLock<PopoverInner>>,
    dirty: Arc<AtomicBool>,
}

impl Default for Popover {
    fn default() -> Self {
        Self::new()
    }
}

impl Popover {
    pub fn new() -> Self {
        Self {
            id: generate_auto_id(),
            inner: Arc::new(RwLock::new(PopoverInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_side(self, side: Side) -> Self {
        self.update(|inner| inner.side = side);
        self
    }

    pub fn with_align(self, align: Align) -> Self {
        self.update(|inner| inner.align = align);
        self
    }

    /// Gap between anchor and content, in cells.
    pub fn with_side_offset(self, offset: u16) -> Self {
        self.update(|inner| inner.side_offset = offset);
        self
    }

    /// Place content against element `id` instead of the trigger.
    pub fn with_anchor(self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.update(|inner| inner.anchor_id = Some(id));
        self
    }

    /// Props for the content element.
    pub fn with_props(self, props: Props) -> Self {
        self.update(|inner| inner.props = props);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn trigger_id(&self) -> String {
        format!("{}-trigger", self.id)
    }

    pub fn content_id(&self) -> String {
        format!("{}-content", self.id)
    }

    fn anchor_id(&self) -> String {
        self.read(|inner| inner.anchor_id.clone())
            .flatten()
            .unwrap_or_else(|| self.trigger_id())
    }

    pub fn is_open(&self) -> bool {
        self.read(|inner| inner.state.is_open()).unwrap_or(false)
    }

    pub fn open(&self) -> bool {
        self.transition(PopoverState::open)
    }

    pub fn close(&self) -> bool {
        self.transition(PopoverState::close)
    }

    pub fn toggle(&self) {
        self.transition(|state| {
            state.toggle();
            true
        });
    }

    fn transition(&self, f: impl FnOnce(&mut PopoverState) -> bool) -> bool {
        let changed = self.update(|inner| f(&mut inner.state)).unwrap_or(false);
        if changed {
            log::debug!("popover {} open={}", self.id, self.is_open());
        }
        changed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Trigger activation toggles; Escape and presses outside both trigger
    /// and content close. An outside press is not swallowed.
    pub fn handle(&self, event: &Event, cx: &EventContext<'_>) -> EventResult {
        let anchor_id = self.anchor_id();
        if let Ok(mut guard) = self.inner.write() {
            guard.anchor = cx.rect(&anchor_id);
            guard.viewport = cx.viewport();
        }

        match event {
            Event::Key {
                target: Some(target),
                key,
                ..
            } if *target == self.trigger_id() => match key {
                Key::Enter | Key::Char(' ') => {
                    self.toggle();
                    EventResult::Consumed
                }
                Key::Escape if self.is_open() => {
                    self.close();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            Event::Key {
                key: Key::Escape, ..
            } if self.is_open() => {
                self.close();
                EventResult::Consumed
            }
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
                ..
            } => {
                let path = cx.path_at(*x, *y);
                let hit = |id: &str| path.iter().any(|p| p == id);
                if hit(&self.trigger_id()) {
                    self.toggle();
                    EventResult::Consumed
                } else if hit(&self.content_id()) {
                    EventResult::Ignored
                } else {
                    self.close();
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }

    /// Mark `element` as the placement reference, in place of the trigger.
    pub fn anchor(&self, element: Element) -> Element {
        let id = format!("{}-anchor", self.id);
        if let Ok(mut guard) = self.inner.write() {
            guard.anchor_id = Some(id.clone());
        }
        adapter::slot(Slot::PopoverAnchor, element.id(id))
    }

    /// Wrap `trigger` and, while open, float `content` next to the anchor.
    pub fn element(&self, trigger: Element, content: Element) -> Element {
        self.read(|inner| self.build(inner, trigger, content))
            .unwrap_or_else(|| Element::box_().id(self.id.clone()))
    }

    fn build(&self, inner: &PopoverInner, trigger: Element, content: Element) -> Element {
        let open = inner.state.is_open();
        let state = if open { "open" } else { "closed" };

        let trigger = adapter::slot(
            Slot::PopoverTrigger,
            Element::box_()
                .id(self.trigger_id())
                .focusable(true)
                .clickable(true)
                .data("data-state", state)
                .child(trigger),
        );
        let mut root = Element::col().id(self.id.clone()).child(trigger);

        if open {
            let content = adapter::adapt(
                Slot::PopoverContent,
                Element::col().id(self.content_id()).child(content),
                &inner.props,
            );
            let size = intrinsic_size(&content);
            let placement = place(
                inner.anchor.unwrap_or_default(),
                size,
                inner.viewport,
                inner.side,
                inner.align,
                inner.side_offset,
            );
            root = root.child(
                content
                    .at(placement.x as i16, placement.y as i16)
                    .z_index(POPOVER_Z_INDEX)
                    .data("data-state", state)
                    .data("data-side", placement.side.as_str())
                    .data("data-align", inner.align.as_str()),
            );
        }

        adapter::slot(Slot::Popover, root.data("data-state", state))
    }

    fn read<R>(&self, f: impl FnOnce(&PopoverInner) -> R) -> Option<R> {
        self.inner.read().ok().map(|guard| f(&guard))
    }

    fn update<R>(&self, f: impl FnOnce(&mut PopoverInner) -> R) -> Option<R> {
        let mut guard = self.inner.write().ok()?;
        let result = f(&mut guard);
        self.dirty.store(true, Ordering::SeqCst);
        Some(result)
    }
}
