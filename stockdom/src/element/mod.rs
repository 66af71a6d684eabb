mod content;
mod node;

pub use content::Content;
pub use node::{Element, FOR_ATTR, SLOT_ATTR};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find the first element carrying `data-slot=<slot>`.
pub fn find_by_slot<'a>(root: &'a Element, slot: &str) -> Option<&'a Element> {
    if root.slot() == Some(slot) {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_by_slot(child, slot) {
                return Some(found);
            }
        }
    }

    None
}

/// Collect every element carrying `data-slot=<slot>`, in tree order.
pub fn find_all_by_slot<'a>(root: &'a Element, slot: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect_slot(root, slot, &mut found);
    found
}

fn collect_slot<'a>(element: &'a Element, slot: &str, out: &mut Vec<&'a Element>) {
    if element.slot() == Some(slot) {
        out.push(element);
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_slot(child, slot, out);
        }
    }
}
