use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// Find the deepest enabled clickable element at the given coordinates.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    deepest(layout, scope_root(root), x, y, &|e| e.clickable && !e.disabled)
}

/// Find the deepest element of any kind at the given coordinates.
pub fn hit_test_any(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    deepest(layout, root, x, y, &|_| true)
}

/// Find the deepest enabled focusable element at the given coordinates.
pub fn hit_test_focusable(
    layout: &LayoutResult,
    root: &Element,
    x: u16,
    y: u16,
) -> Option<String> {
    deepest(layout, scope_root(root), x, y, &|e| e.focusable && !e.disabled)
}

/// IDs of every element under the point, from the root down to the deepest.
///
/// Absolutely positioned subtrees are found even when they lie outside their
/// parent's rect, so a portal's content shows up under its owner.
pub fn hit_path(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Vec<String> {
    let mut path = Vec::new();
    collect_path(layout, root, x, y, &mut path);
    path
}

fn collect_path(
    layout: &LayoutResult,
    element: &Element,
    x: u16,
    y: u16,
    path: &mut Vec<String>,
) -> bool {
    let inside = layout.get(&element.id).is_some_and(|r| r.contains(x, y));

    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            let mut sub = Vec::new();
            if collect_path(layout, child, x, y, &mut sub) {
                path.push(element.id.clone());
                path.extend(sub);
                return true;
            }
        }
    }

    if inside {
        path.push(element.id.clone());
    }
    inside
}

/// The innermost active interaction scope, or the root when there is none.
pub(crate) fn scope_root(root: &Element) -> &Element {
    let mut scope = root;
    root.walk(&mut |e| {
        if e.interaction_scope {
            scope = e;
        }
    });
    scope
}

fn deepest(
    layout: &LayoutResult,
    element: &Element,
    x: u16,
    y: u16,
    accept: &dyn Fn(&Element) -> bool,
) -> Option<String> {
    // Later children paint on top, so they are tested first.
    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            if let Some(id) = deepest(layout, child, x, y, accept) {
                return Some(id);
            }
        }
    }

    let rect = layout.get(&element.id)?;
    (rect.contains(x, y) && accept(element)).then(|| element.id.clone())
}
