//! Types shared by widget event handlers.

use stockdom::{find_element, hit_path, Element, LayoutResult, Rect};

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// The tree and layout an event was produced against.
///
/// Widgets use it to find out what lies under the pointer and where their
/// own pieces were drawn.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub root: &'a Element,
    pub layout: &'a LayoutResult,
}

impl<'a> EventContext<'a> {
    pub fn new(root: &'a Element, layout: &'a LayoutResult) -> Self {
        Self { root, layout }
    }

    /// Element ids under the point, root first.
    pub fn path_at(&self, x: u16, y: u16) -> Vec<String> {
        hit_path(self.layout, self.root, x, y)
    }

    pub fn find(&self, id: &str) -> Option<&'a Element> {
        find_element(self.root, id)
    }

    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.layout.get(id).copied()
    }

    /// Area of the root element, i.e. the screen.
    pub fn viewport(&self) -> Rect {
        self.rect(&self.root.id).unwrap_or_default()
    }
}
