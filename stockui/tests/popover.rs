use stockdom::{find_element, layout, Element, Event, Key, Modifiers, MouseButton, Rect};
use stockui::primitive::popover::{Align, Side};
use stockui::primitive::{place, PopoverState};
use stockui::widgets::Popover;
use stockui::{EventContext, EventResult};

// =============================================================================
// Placement
// =============================================================================

#[test]
fn test_place_below_start() {
    let anchor = Rect::new(10, 2, 8, 1);
    let p = place(anchor, (12, 4), Rect::new(0, 0, 80, 24), Side::Bottom, Align::Start, 0);
    assert_eq!((p.x, p.y, p.side), (10, 3, Side::Bottom));
}

#[test]
fn test_place_center_with_offset() {
    let anchor = Rect::new(10, 2, 8, 1);
    let p = place(anchor, (4, 2), Rect::new(0, 0, 80, 24), Side::Bottom, Align::Center, 1);
    assert_eq!((p.x, p.y), (12, 4));
}

#[test]
fn test_place_flips_when_no_room_below() {
    let anchor = Rect::new(10, 20, 8, 1);
    let p = place(anchor, (12, 6), Rect::new(0, 0, 80, 24), Side::Bottom, Align::Start, 0);
    assert_eq!(p.side, Side::Top);
    assert_eq!(p.y, 14);
}

#[test]
fn test_place_clamps_to_viewport() {
    let anchor = Rect::new(75, 2, 4, 1);
    let p = place(anchor, (20, 3), Rect::new(0, 0, 80, 24), Side::Bottom, Align::Start, 0);
    assert_eq!(p.x, 60);

    // Taller than the screen: pinned to the top.
    let p = place(anchor, (20, 30), Rect::new(0, 0, 80, 24), Side::Bottom, Align::Start, 0);
    assert_eq!(p.y, 0);
}

#[test]
fn test_state_transitions_report_change() {
    let mut state = PopoverState::new();
    assert!(state.open());
    assert!(!state.open());
    assert!(state.close());
    assert!(!state.close());
    state.toggle();
    assert!(state.is_open());
}

// =============================================================================
// Widget
// =============================================================================

fn screen(popover: &Popover) -> (Element, stockdom::LayoutResult) {
    let root = Element::col()
        .id("root")
        .child(popover.element(
            Element::text("Filters").id("filters-label"),
            Element::text("Sector: Technology").id("filters-body"),
        ))
        .child(Element::text("chart").id("chart").clickable(true));
    let layout = layout(&root, Rect::new(0, 0, 40, 12));
    (root, layout)
}

fn click(x: u16, y: u16) -> Event {
    Event::Click {
        target: None,
        x,
        y,
        button: MouseButton::Left,
    }
}

#[test]
fn test_trigger_click_toggles() {
    let popover = Popover::new().with_id("filters");
    let (root, layout) = screen(&popover);
    let cx = EventContext::new(&root, &layout);

    assert_eq!(popover.handle(&click(0, 0), &cx), EventResult::Consumed);
    assert!(popover.is_open());
    assert_eq!(popover.handle(&click(0, 0), &cx), EventResult::Consumed);
    assert!(!popover.is_open());
}

#[test]
fn test_content_rendered_in_portal_below_trigger() {
    let popover = Popover::new().with_id("filters");
    let (root, layout) = screen(&popover);
    popover.handle(&click(0, 0), &EventContext::new(&root, &layout));

    let (root, layout) = screen(&popover);
    let content = find_element(&root, &popover.content_id()).unwrap();
    assert_eq!(content.slot(), Some("popover-content"));
    assert_eq!(content.get_data("data-side").map(String::as_str), Some("bottom"));
    assert!(content.z_index > 0);
    let trigger = layout[&popover.trigger_id()];
    assert_eq!(layout[&popover.content_id()].y, trigger.bottom());
}

#[test]
fn test_escape_and_outside_click_close() {
    let popover = Popover::new().with_id("filters");
    popover.open();
    let (root, layout) = screen(&popover);
    let cx = EventContext::new(&root, &layout);

    let escape = Event::Key {
        target: Some("chart".into()),
        key: Key::Escape,
        modifiers: Modifiers::new(),
    };
    assert_eq!(popover.handle(&escape, &cx), EventResult::Consumed);
    assert!(!popover.is_open());

    popover.open();
    let chart = layout["chart"];
    assert_eq!(popover.handle(&click(30, chart.y), &cx), EventResult::Ignored);
    assert!(!popover.is_open());
}
