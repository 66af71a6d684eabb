use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::element::{find_element, Element, FOR_ATTR};
use crate::event::{Event, Key, Modifiers, MouseButton};
use crate::hit::{hit_test, hit_test_focusable, scope_root};
use crate::layout::LayoutResult;

/// Tracks which element is currently focused and turns raw terminal input
/// into targeted [`Event`]s.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused.as_deref() == Some(id)
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Focus the next focusable element (Tab navigation), wrapping at the end.
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self, root: &Element) -> Option<String> {
        self.step(root, 1)
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    pub fn focus_prev(&mut self, root: &Element) -> Option<String> {
        self.step(root, -1)
    }

    fn step(&mut self, root: &Element, delta: isize) -> Option<String> {
        let focusable = collect_focusable(root);
        if focusable.is_empty() {
            return None;
        }

        let len = focusable.len() as isize;
        let current = self
            .focused
            .as_ref()
            .and_then(|id| focusable.iter().position(|f| f == id));
        let next = match current {
            Some(i) => (i as isize + delta).rem_euclid(len) as usize,
            None if delta >= 0 => 0,
            None => focusable.len() - 1,
        };

        let id = focusable[next].clone();
        self.focus(&id).then_some(id)
    }

    /// Drop focus if the focused element vanished or became disabled.
    pub fn validate(&mut self, root: &Element) {
        if let Some(id) = &self.focused {
            let still_valid = find_element(root, id).is_some_and(|e| e.focusable && !e.disabled);
            if !still_valid {
                log::debug!("focused element {id} is gone, clearing focus");
                self.focused = None;
            }
        }
    }

    /// Translate one terminal event into zero or more targeted events.
    ///
    /// - Tab / Shift+Tab move focus.
    /// - Key presses are targeted at the focused element.
    /// - Left presses focus the focusable element under the pointer; a press
    ///   on a label focuses its associated control instead.
    pub fn process_event(
        &mut self,
        event: &CrosstermEvent,
        root: &Element,
        layout: &LayoutResult,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        match event {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    return events;
                }
                let Some(key) = Key::from_crossterm(key_event.code) else {
                    return events;
                };
                let modifiers = Modifiers::from(key_event.modifiers);

                let moved = match key {
                    Key::Tab => Some(self.focused.clone()).zip(self.focus_next(root)),
                    Key::BackTab => Some(self.focused.clone()).zip(self.focus_prev(root)),
                    _ => None,
                };

                // Widgets still see Tab so they can close overlays on focus loss.
                events.push(Event::Key {
                    target: self.focused_before(&moved),
                    key,
                    modifiers,
                });

                if let Some((previous, next)) = moved {
                    if let Some(previous) = previous {
                        events.push(Event::Blur { target: previous });
                    }
                    events.push(Event::Focus { target: next });
                }
            }
            CrosstermEvent::Mouse(mouse) => {
                let MouseEventKind::Down(button) = mouse.kind else {
                    return events;
                };
                let (x, y) = (mouse.column, mouse.row);
                let target = hit_test(layout, root, x, y);

                if button == crossterm::event::MouseButton::Left {
                    let focus_target = target
                        .as_deref()
                        .and_then(|id| label_target(root, id))
                        .or_else(|| hit_test_focusable(layout, root, x, y));
                    if let Some(next) = focus_target {
                        let previous = self.focused.clone();
                        if self.focus(&next) {
                            if let Some(previous) = previous {
                                events.push(Event::Blur { target: previous });
                            }
                            events.push(Event::Focus { target: next });
                        }
                    }
                }

                events.push(Event::Click {
                    target,
                    x,
                    y,
                    button: MouseButton::from(button),
                });
            }
            CrosstermEvent::Resize(width, height) => {
                events.push(Event::Resize {
                    width: *width,
                    height: *height,
                });
            }
            _ => {}
        }

        events
    }

    fn focused_before(&self, moved: &Option<(Option<String>, String)>) -> Option<String> {
        match moved {
            Some((previous, _)) => previous.clone(),
            None => self.focused.clone(),
        }
    }
}

/// Collect the IDs of all enabled focusable elements in tree order, confined
/// to the innermost interaction scope when one is present.
pub fn collect_focusable(root: &Element) -> Vec<String> {
    let mut ids = Vec::new();
    scope_root(root).walk(&mut |e| {
        if e.focusable && !e.disabled {
            ids.push(e.id.clone());
        }
    });
    ids
}

/// If `id` names a label (an element with a `for` attribute), return the ID of
/// the control it is associated with, provided that control exists.
pub fn label_target(root: &Element, id: &str) -> Option<String> {
    let label = find_element(root, id)?;
    let target = label.get_data(FOR_ATTR)?;
    let control = find_element(root, target)?;
    (control.focusable && !control.disabled).then(|| control.id.clone())
}
