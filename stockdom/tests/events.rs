use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton as CtMouseButton,
    MouseEvent, MouseEventKind,
};
use stockdom::{
    collect_focusable, hit_path, hit_test, hit_test_any, hit_test_focusable, label_target,
    Element, Event, FocusState, Key, LayoutResult, Rect,
};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

fn key(code: KeyCode) -> CrosstermEvent {
    CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn left_click(x: u16, y: u16) -> CrosstermEvent {
    CrosstermEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(CtMouseButton::Left),
        column: x,
        row: y,
        modifiers: KeyModifiers::NONE,
    })
}

fn form() -> Element {
    Element::col()
        .id("root")
        .child(Element::text("Email").id("email-label").clickable(true).data("for", "email"))
        .child(Element::text("").id("email").focusable(true).clickable(true))
        .child(Element::text("").id("password").focusable(true).clickable(true))
        .child(Element::text("Log in").id("submit").focusable(true).clickable(true))
}

fn form_layout() -> LayoutResult {
    create_layout(&[
        ("root", Rect::new(0, 0, 40, 10)),
        ("email-label", Rect::new(0, 0, 40, 1)),
        ("email", Rect::new(0, 1, 40, 1)),
        ("password", Rect::new(0, 2, 40, 1)),
        ("submit", Rect::new(0, 3, 10, 1)),
    ])
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_finds_deepest_clickable() {
    let root = form();
    let layout = form_layout();

    assert_eq!(hit_test(&layout, &root, 5, 3), Some("submit".to_string()));
    assert_eq!(hit_test(&layout, &root, 20, 3), None);
    assert_eq!(hit_test_any(&layout, &root, 20, 3), Some("root".to_string()));
}

#[test]
fn test_hit_test_skips_disabled() {
    let root = Element::col()
        .id("root")
        .child(Element::text("Log in").id("submit").clickable(true).disabled(true));
    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 10, 1)),
        ("submit", Rect::new(0, 0, 6, 1)),
    ]);

    assert_eq!(hit_test(&layout, &root, 1, 0), None);
    assert_eq!(hit_test_focusable(&layout, &root, 1, 0), None);
}

#[test]
fn test_hit_test_later_sibling_wins() {
    let root = Element::col()
        .id("root")
        .child(Element::text("page").id("page").clickable(true))
        .child(Element::box_().id("overlay").clickable(true).at(0, 0));
    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 10, 5)),
        ("page", Rect::new(0, 0, 10, 1)),
        ("overlay", Rect::new(0, 0, 4, 4)),
    ]);

    assert_eq!(hit_test(&layout, &root, 1, 0), Some("overlay".to_string()));
    assert_eq!(hit_test(&layout, &root, 6, 0), Some("page".to_string()));
}

#[test]
fn test_hit_path_reaches_portal_outside_parent() {
    let root = Element::col().id("root").child(
        Element::row()
            .id("select")
            .child(Element::text("Growth").id("trigger"))
            .child(
                Element::col()
                    .id("content")
                    .at(0, 2)
                    .child(Element::text("Income").id("item")),
            ),
    );
    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 20, 10)),
        ("select", Rect::new(0, 0, 10, 1)),
        ("trigger", Rect::new(0, 0, 6, 1)),
        ("content", Rect::new(0, 2, 10, 3)),
        ("item", Rect::new(0, 2, 10, 1)),
    ]);

    assert_eq!(hit_path(&layout, &root, 1, 2), vec!["root", "select", "content", "item"]);
    assert_eq!(hit_path(&layout, &root, 15, 8), vec!["root"]);
}

#[test]
fn test_interaction_scope_confines_hits() {
    let root = Element::col()
        .id("root")
        .child(Element::text("behind").id("behind").clickable(true))
        .child(
            Element::col()
                .id("dialog")
                .interaction_scope(true)
                .at(0, 3)
                .child(Element::text("inside").id("inside").clickable(true)),
        );
    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 20, 10)),
        ("behind", Rect::new(0, 0, 20, 1)),
        ("dialog", Rect::new(0, 3, 20, 3)),
        ("inside", Rect::new(0, 3, 20, 1)),
    ]);

    assert_eq!(hit_test(&layout, &root, 1, 0), None);
    assert_eq!(hit_test(&layout, &root, 1, 3), Some("inside".to_string()));
}

// ============================================================================
// Focus
// ============================================================================

#[test]
fn test_collect_focusable_in_tree_order() {
    assert_eq!(collect_focusable(&form()), vec!["email", "password", "submit"]);
}

#[test]
fn test_collect_focusable_respects_scope() {
    let root = Element::col()
        .id("root")
        .child(Element::box_().id("page-input").focusable(true))
        .child(
            Element::col()
                .id("palette")
                .interaction_scope(true)
                .child(Element::box_().id("query").focusable(true)),
        );

    assert_eq!(collect_focusable(&root), vec!["query"]);
}

#[test]
fn test_focus_next_wraps() {
    let root = form();
    let mut focus = FocusState::new();

    assert_eq!(focus.focus_next(&root), Some("email".to_string()));
    assert_eq!(focus.focus_next(&root), Some("password".to_string()));
    assert_eq!(focus.focus_next(&root), Some("submit".to_string()));
    assert_eq!(focus.focus_next(&root), Some("email".to_string()));
    assert_eq!(focus.focus_prev(&root), Some("submit".to_string()));
}

#[test]
fn test_validate_drops_disabled_focus() {
    let mut focus = FocusState::new();
    focus.focus("submit");

    let root = Element::col()
        .id("root")
        .child(Element::text("Log in").id("submit").focusable(true).disabled(true));
    focus.validate(&root);

    assert_eq!(focus.focused(), None);
}

#[test]
fn test_tab_emits_key_then_blur_and_focus() {
    let root = form();
    let layout = form_layout();
    let mut focus = FocusState::new();
    focus.focus("email");

    let events = focus.process_event(&key(KeyCode::Tab), &root, &layout);

    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[0],
        Event::Key { target: Some(t), key: Key::Tab, .. } if t == "email"
    ));
    assert_eq!(events[1], Event::Blur { target: "email".into() });
    assert_eq!(events[2], Event::Focus { target: "password".into() });
    assert!(focus.is_focused("password"));
}

#[test]
fn test_key_targets_focused_element() {
    let root = form();
    let layout = form_layout();
    let mut focus = FocusState::new();
    focus.focus("password");

    let events = focus.process_event(&key(KeyCode::Char('a')), &root, &layout);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target(), Some("password"));
}

// ============================================================================
// Label Association
// ============================================================================

#[test]
fn test_label_target_resolves_control() {
    let root = form();
    assert_eq!(label_target(&root, "email-label"), Some("email".to_string()));
    assert_eq!(label_target(&root, "email"), None);
}

#[test]
fn test_label_target_ignores_disabled_control() {
    let root = Element::col()
        .id("root")
        .child(Element::text("Country").id("label").data("for", "country"))
        .child(Element::box_().id("country").focusable(true).disabled(true));

    assert_eq!(label_target(&root, "label"), None);
}

#[test]
fn test_clicking_label_focuses_control() {
    let root = form();
    let layout = form_layout();
    let mut focus = FocusState::new();

    let events = focus.process_event(&left_click(2, 0), &root, &layout);

    assert!(focus.is_focused("email"));
    assert_eq!(events[0], Event::Focus { target: "email".into() });
    assert!(matches!(
        &events[1],
        Event::Click { target: Some(t), .. } if t == "email-label"
    ));
}

#[test]
fn test_click_on_nothing_keeps_focus() {
    let root = form();
    let layout = form_layout();
    let mut focus = FocusState::new();
    focus.focus("password");

    let events = focus.process_event(&left_click(30, 8), &root, &layout);

    assert!(focus.is_focused("password"));
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::Click { target: None, .. }));
}
