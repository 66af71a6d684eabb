use std::sync::{Arc, Mutex};

use stockdom::{layout, Element, Event, Key, LayoutResult, Modifiers, MouseButton, Rect};
use stockui::primitive::{ItemDescriptor, ItemId};
use stockui::validation::Validator;
use stockui::widgets::select::{ContentPosition, Select, SelectChange, SelectEntry};
use stockui::{EventContext, EventResult};

fn key(select: &Select, key: Key) -> Event {
    Event::Key {
        target: Some(select.id().to_string()),
        key,
        modifiers: Modifiers::new(),
    }
}

fn click(x: u16, y: u16) -> Event {
    Event::Click {
        target: None,
        x,
        y,
        button: MouseButton::Left,
    }
}

fn screen(select: &Select) -> (Element, LayoutResult) {
    let root = Element::col()
        .id("root")
        .child(select.element(false))
        .child(Element::text("elsewhere").id("elsewhere").clickable(true));
    let layout = layout(&root, Rect::new(0, 0, 60, 20));
    (root, layout)
}

fn send(select: &Select, event: Event) -> EventResult {
    let (root, layout) = screen(select);
    select.handle(&event, &EventContext::new(&root, &layout))
}

/// Records every change notification.
fn recorded(select: Select) -> (Select, Arc<Mutex<Vec<SelectChange>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let select = select.on_change(move |change| sink.lock().unwrap().push(change.clone()));
    (select, log)
}

fn goals() -> Select {
    Select::new([("1", "Growth"), ("2", "Income")]).with_placeholder("Select your investment goals")
}

fn goals_with_disabled_income() -> Select {
    Select::new([
        ItemDescriptor::new(1u32, "Growth"),
        ItemDescriptor::new(2u32, "Income").disabled(true),
    ])
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_disabled_income_is_skipped_on_the_way_to_growth() {
    let (select, log) = recorded(goals_with_disabled_income());
    assert!(!select.is_open());
    assert_eq!(select.value(), None);

    send(&select, key(&select, Key::Enter));
    assert!(select.is_open());
    assert_eq!(select.highlighted(), None);

    send(&select, key(&select, Key::Down));
    assert_eq!(select.highlighted(), Some(ItemId::from(1u32)));

    send(&select, key(&select, Key::Enter));
    assert!(!select.is_open());
    assert_eq!(select.value(), Some(ItemId::from(1u32)));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].value, "Growth");
}

#[test]
fn test_escape_from_open_list_keeps_empty_value() {
    let (select, log) = recorded(goals_with_disabled_income());
    send(&select, key(&select, Key::Enter));
    assert!(select.is_open());

    assert_eq!(send(&select, key(&select, Key::Escape)), EventResult::Consumed);
    assert!(!select.is_open());
    assert_eq!(select.value(), None);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_growth_income_scenario() {
    let (select, log) = recorded(goals().with_value("1"));

    assert_eq!(send(&select, key(&select, Key::Enter)), EventResult::Consumed);
    assert!(select.is_open());
    assert_eq!(select.highlighted(), Some(ItemId::from("1")));

    send(&select, key(&select, Key::Down));
    assert_eq!(select.highlighted(), Some(ItemId::from("2")));

    send(&select, key(&select, Key::Enter));
    assert!(!select.is_open());
    assert_eq!(select.value(), Some(ItemId::from("2")));
    assert_eq!(select.selected_label().as_deref(), Some("Income"));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].id, ItemId::from("2"));
    assert_eq!(log[0].value, "Income");
}

#[test]
fn test_escape_scenario() {
    let (select, log) = recorded(goals().with_value("1"));

    send(&select, key(&select, Key::Down));
    send(&select, key(&select, Key::Down));
    assert_eq!(select.highlighted(), Some(ItemId::from("2")));

    assert_eq!(send(&select, key(&select, Key::Escape)), EventResult::Consumed);
    assert!(!select.is_open());
    assert_eq!(select.highlighted(), None);
    assert_eq!(select.value(), Some(ItemId::from("1")));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_open_without_selection_highlights_nothing() {
    let select = goals();
    send(&select, key(&select, Key::Char(' ')));
    assert!(select.is_open());
    assert_eq!(select.highlighted(), None);

    send(&select, key(&select, Key::Down));
    assert_eq!(select.highlighted(), Some(ItemId::from("1")));
}

#[test]
fn test_navigation_wraps() {
    let select = goals();
    select.open();
    select.next();
    select.next();
    select.next();
    assert_eq!(select.highlighted(), Some(ItemId::from("1")));
    select.prev();
    assert_eq!(select.highlighted(), Some(ItemId::from("2")));
}

#[test]
fn test_typeahead() {
    let select = Select::new(["Technology", "Healthcare", "Finance", "Telecom"]);
    select.open();
    send(&select, key(&select, Key::Char('t')));
    assert_eq!(select.highlighted(), Some(ItemId::from("Technology")));
    send(&select, key(&select, Key::Char('T')));
    assert_eq!(select.highlighted(), Some(ItemId::from("Telecom")));
    send(&select, key(&select, Key::Char('t')));
    assert_eq!(select.highlighted(), Some(ItemId::from("Technology")));
}

#[test]
fn test_tab_closes_and_passes_through() {
    let (select, log) = recorded(goals());
    select.open();
    select.next();
    assert_eq!(send(&select, key(&select, Key::Tab)), EventResult::Ignored);
    assert!(!select.is_open());
    assert!(log.lock().unwrap().is_empty());
}

// =============================================================================
// Disabled items and widget
// =============================================================================

#[test]
fn test_disabled_items_are_skipped() {
    let select = Select::new([
        ItemDescriptor::new("low", "Low"),
        ItemDescriptor::new("medium", "Medium").disabled(true),
        ItemDescriptor::new("high", "High"),
    ]);
    select.open();
    select.next();
    select.next();
    assert_eq!(select.highlighted(), Some(ItemId::from("high")));
    select.last();
    assert_eq!(select.highlighted(), Some(ItemId::from("high")));
}

#[test]
fn test_disabled_item_activation_is_noop() {
    let (select, log) = recorded(Select::new([
        ItemDescriptor::new("low", "Low"),
        ItemDescriptor::new("medium", "Medium").disabled(true),
    ]));
    select.open();
    select.activate(&ItemId::from("medium"));
    assert!(select.is_open());
    assert_eq!(select.value(), None);
    assert!(log.lock().unwrap().is_empty());

    assert!(!select.set_value(Some(ItemId::from("medium"))));
    assert_eq!(select.value(), None);
}

#[test]
fn test_disabled_widget_ignores_everything() {
    let (select, log) = recorded(goals());
    select.set_disabled(true);
    assert_eq!(send(&select, key(&select, Key::Enter)), EventResult::Ignored);
    assert!(!select.is_open());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_disabling_while_open_closes_silently() {
    let (select, log) = recorded(goals());
    select.open();
    select.next();
    select.set_disabled(true);
    assert!(!select.is_open());
    assert!(log.lock().unwrap().is_empty());
}

// =============================================================================
// Pointer
// =============================================================================

#[test]
fn test_click_trigger_then_item() {
    let (select, log) = recorded(goals().with_position(ContentPosition::Popper));
    let (_, layout) = screen(&select);
    let trigger = layout.get(select.id()).copied().unwrap();

    assert_eq!(send(&select, click(trigger.x + 1, trigger.y + 1)), EventResult::Consumed);
    assert!(select.is_open());

    let (_, layout) = screen(&select);
    let item = layout
        .get(&select.item_element_id(&ItemId::from("2")))
        .copied()
        .unwrap();
    assert_eq!(send(&select, click(item.x + 1, item.y)), EventResult::Consumed);

    assert!(!select.is_open());
    assert_eq!(select.value(), Some(ItemId::from("2")));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn test_click_outside_cancels_and_passes_through() {
    let (select, log) = recorded(goals().with_position(ContentPosition::Popper));
    select.open();
    let (_, layout) = screen(&select);
    let elsewhere = layout.get("elsewhere").copied().unwrap();
    let content = layout.get(&select.content_id()).copied().unwrap();
    // The popper list covers the row below the trigger; click well past it.
    let y = content.bottom().max(elsewhere.bottom()) + 2;

    assert_eq!(send(&select, click(55, y)), EventResult::Ignored);
    assert!(!select.is_open());
    assert!(log.lock().unwrap().is_empty());
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn test_element_slots_and_state() {
    let select = goals().with_value("1");
    let closed = select.element(false);
    assert_eq!(closed.slot(), Some("select"));
    assert_eq!(closed.get_data("data-state").map(String::as_str), Some("closed"));
    assert!(stockdom::find_element(&closed, &select.content_id()).is_none());

    select.open();
    let open = select.element(true);
    let content = stockdom::find_element(&open, &select.content_id()).unwrap();
    assert_eq!(content.slot(), Some("select-content"));
    assert!(content.z_index >= 50);

    let item = stockdom::find_element(&open, &select.item_element_id(&ItemId::from("1"))).unwrap();
    assert_eq!(item.slot(), Some("select-item"));
    assert!(item.has_flag("data-selected"));
    assert!(item.has_flag("data-highlighted"));
}

#[test]
fn test_placeholder_shown_until_selected() {
    let select = goals();
    let el = select.element(false);
    let value = stockdom::find_element(&el, &format!("{}-value", select.id())).unwrap();
    assert_eq!(value.content.as_text(), Some("Select your investment goals"));
    assert!(value.has_flag("data-placeholder"));
}

#[test]
fn test_groups_and_scrolling() {
    let select = Select::with_entries(vec![
        SelectEntry::group("North America", [("us", "United States"), ("ca", "Canada")]),
        SelectEntry::Separator,
        SelectEntry::group("Europe", [("uk", "United Kingdom"), ("de", "Germany"), ("fr", "France")]),
    ])
    .with_max_rows(4);
    select.open();
    select.last();
    assert_eq!(select.highlighted(), Some(ItemId::from("fr")));
    // Eight rows with headings and the rule, four visible.
    assert_eq!(select.scroll_offset(), 4);
    select.first();
    assert_eq!(select.scroll_offset(), 1);
}

#[test]
fn test_items_replaced_drop_missing_selection() {
    let select = goals().with_value("2");
    select.set_items([("1", "Growth"), ("3", "Preservation")]);
    assert_eq!(select.value(), None);
}

#[test]
fn test_selected_rule() {
    let select = goals();
    let result = Validator::new()
        .field(&select, "goals")
        .selected("Please select your investment goals")
        .validate();
    assert_eq!(
        result.message_for("goals"),
        Some("Please select your investment goals")
    );
    assert_eq!(select.error().as_deref(), Some("Please select your investment goals"));

    select.set_value(Some(ItemId::from("1")));
    assert!(select.error().is_none());
}

// =============================================================================
// Properties that hold under arbitrary key sequences
// =============================================================================

#[test]
fn test_state_stays_consistent_under_key_sequences() {
    const KEYS: [Key; 10] = [
        Key::Enter,
        Key::Char(' '),
        Key::Up,
        Key::Down,
        Key::Home,
        Key::End,
        Key::PageUp,
        Key::PageDown,
        Key::Escape,
        Key::Char('m'),
    ];
    let items = [
        ItemDescriptor::new("a", "Alpha"),
        ItemDescriptor::new("b", "Bravo").disabled(true),
        ItemDescriptor::new("c", "Charlie"),
        ItemDescriptor::new("m", "Mike"),
        ItemDescriptor::new("n", "November").disabled(true),
    ];

    let mut seed: u32 = 0x2545_f491;
    for _ in 0..50 {
        let (select, log) = recorded(Select::new(items.clone()));
        for _ in 0..40 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let pressed = KEYS[seed as usize % KEYS.len()];
            let key_event = key(&select, pressed);
            let before = select.state();
            let notified = log.lock().unwrap().len();
            select.handle(&key_event, &EventContext::new(&Element::box_(), &LayoutResult::new()));

            let state = select.state();
            if let Some(id) = &state.highlighted {
                assert!(state.open, "highlight while closed");
                assert!(!select.items().iter().any(|i| &i.id == id && i.disabled));
            }
            if let Some(id) = &state.selected {
                assert!(!select.items().iter().any(|i| &i.id == id && i.disabled));
            }

            let commits = before.open
                && before.highlighted.is_some()
                && matches!(pressed, Key::Enter | Key::Char(' '));
            let expected = usize::from(commits);
            assert_eq!(log.lock().unwrap().len() - notified, expected, "{pressed:?}");
            if commits {
                assert!(!state.open);
                assert_eq!(state.selected, before.highlighted);
            }
        }
    }
}
