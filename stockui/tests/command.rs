use std::sync::{Arc, Mutex};

use stockdom::{find_element, layout, Element, Event, Key, Modifiers, MouseButton, Rect};
use stockui::primitive::{Commit, ItemId};
use stockui::widgets::command::{
    fuzzy_filter, Command, CommandDialog, CommandEntry, CommandError, CommandItem, FuzzyFilter,
    PredicateFilter, DEFAULT_EMPTY_TEXT,
};
use stockui::{EventContext, EventResult};

fn entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::group(
            "Navigation",
            [
                CommandItem::new("dashboard", "Dashboard").shortcut("g d"),
                CommandItem::new("search", "Search"),
                CommandItem::new("watchlist", "Watchlist"),
            ],
        ),
        CommandEntry::Separator,
        CommandEntry::group(
            "Account",
            [
                CommandItem::new("profile", "Profile"),
                CommandItem::new("billing", "Billing").disabled(true),
                CommandItem::new("sign-out", "Sign out"),
            ],
        ),
    ]
}

fn ids(command: &Command) -> Vec<String> {
    command
        .visible_items()
        .into_iter()
        .map(|item| item.id.to_string())
        .collect()
}

fn recorded(command: Command) -> (Command, Arc<Mutex<Vec<Commit>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let command = command.on_select(move |commit| sink.lock().unwrap().push(commit.clone()));
    (command, log)
}

fn key_to(command: &Command, key: Key, modifiers: Modifiers) -> Event {
    Event::Key {
        target: Some(command.input_id()),
        key,
        modifiers,
    }
}

fn send(command: &Command, event: Event) -> Result<EventResult, CommandError> {
    let root = Element::col().id("root").child(command.element(true));
    let layout = layout(&root, Rect::new(0, 0, 60, 30));
    command.handle(&event, &EventContext::new(&root, &layout))
}

fn type_str(command: &Command, text: &str) {
    for ch in text.chars() {
        send(command, key_to(command, Key::Char(ch), Modifiers::new())).unwrap();
    }
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_empty_query_shows_all_in_order() {
    let command = Command::new(entries());
    command.open();
    assert_eq!(
        ids(&command),
        ["dashboard", "search", "watchlist", "profile", "billing", "sign-out"]
    );
    assert_eq!(command.highlighted(), Some(ItemId::from("dashboard")));
}

#[test]
fn test_substring_filter_keeps_order() {
    let command = Command::new(entries());
    command.open();
    command.set_query("S").unwrap();
    assert_eq!(ids(&command), ["dashboard", "search", "watchlist", "sign-out"]);
    assert_eq!(command.highlighted(), Some(ItemId::from("dashboard")));
}

#[test]
fn test_zero_matches_shows_empty_state() {
    let command = Command::new(entries());
    command.open();
    command.set_query("zzz").unwrap();
    assert!(command.is_empty());
    assert_eq!(command.highlighted(), None);

    let el = command.element(true);
    let empty = find_element(&el, &command.empty_id()).unwrap();
    assert_eq!(empty.slot(), Some("command-empty"));
    assert_eq!(empty.content.as_text(), Some(DEFAULT_EMPTY_TEXT));
}

#[test]
fn test_predicate_error_leaves_query_unchanged() {
    let command = Command::new(entries()).with_filter(PredicateFilter(
        |query: &str, item: &stockui::primitive::ItemDescriptor| {
            if query.contains('!') {
                Err(format!("bad query {query:?}"))
            } else {
                Ok(item.label.starts_with(query))
            }
        },
    ));
    command.open();
    command.set_query("S").unwrap();
    assert_eq!(ids(&command), ["search", "sign-out"]);

    let err = command.set_query("S!").unwrap_err();
    assert_eq!(err, CommandError::Filter("bad query \"S!\"".to_string()));
    assert_eq!(command.query(), "S");
    assert_eq!(ids(&command), ["search", "sign-out"]);
}

#[test]
fn test_typing_error_propagates_from_handle() {
    let command = Command::new(entries()).with_filter(PredicateFilter(
        |query: &str, _: &stockui::primitive::ItemDescriptor| {
            if query == "x" {
                Err("no".to_string())
            } else {
                Ok(true)
            }
        },
    ));
    command.open();
    let result = send(&command, key_to(&command, Key::Char('x'), Modifiers::new()));
    assert!(matches!(result, Err(CommandError::Filter(_))));
    assert_eq!(command.query(), "");
}

#[test]
fn test_failed_refilter_keeps_previous_entries() {
    let fruit = |labels: &[(&str, &str)]| {
        labels
            .iter()
            .map(|(id, label)| CommandEntry::Item(CommandItem::new(*id, *label)))
            .collect::<Vec<_>>()
    };
    let command = Command::new(fruit(&[("a", "Apple"), ("b", "Banana")])).with_filter(
        PredicateFilter(|query: &str, item: &stockui::primitive::ItemDescriptor| {
            if item.label == "Boom" {
                Err("bad".to_string())
            } else {
                Ok(item.label.to_lowercase().contains(query))
            }
        }),
    );
    command.open();
    command.set_query("app").unwrap();
    assert_eq!(ids(&command), ["a"]);

    let err = command
        .set_entries(fruit(&[("a", "Apple"), ("b", "Banana"), ("c", "Boom")]))
        .unwrap_err();
    assert_eq!(err, CommandError::Filter("bad".to_string()));
    assert_eq!(command.query(), "app");
    assert_eq!(ids(&command), ["a"]);
    assert_eq!(command.highlighted(), Some(ItemId::from("a")));

    // Entries that filter cleanly still replace the old ones.
    command
        .set_entries(fruit(&[("a", "Apple"), ("p", "Pineapple")]))
        .unwrap();
    assert_eq!(ids(&command), ["a", "p"]);
}

#[test]
fn test_fuzzy_filter_best_first() {
    let command = Command::new(entries()).with_filter(FuzzyFilter);
    command.open();
    command.set_query("wtch").unwrap();
    assert_eq!(ids(&command).first().map(String::as_str), Some("watchlist"));

    let matches = fuzzy_filter("", &["b", "a"]);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].index, 0);
}

#[test]
fn test_query_editing() {
    let command = Command::new(entries());
    command.open();
    type_str(&command, "sea");
    assert_eq!(command.query(), "sea");
    send(&command, key_to(&command, Key::Backspace, Modifiers::new())).unwrap();
    assert_eq!(command.query(), "se");
    send(&command, key_to(&command, Key::Char('u'), Modifiers::ctrl())).unwrap();
    assert_eq!(command.query(), "");
    assert_eq!(ids(&command).len(), 6);
}

#[test]
fn test_reopen_resets_query() {
    let command = Command::new(entries());
    command.open();
    command.set_query("watch").unwrap();
    command.cancel();
    command.open();
    assert_eq!(command.query(), "");
    assert_eq!(ids(&command).len(), 6);
}

// =============================================================================
// Activation
// =============================================================================

#[test]
fn test_enter_commits_once_and_closes() {
    let (command, log) = recorded(Command::new(entries()));
    command.open();
    type_str(&command, "watch");
    send(&command, key_to(&command, Key::Enter, Modifiers::new())).unwrap();

    assert!(!command.is_open());
    assert_eq!(command.selected(), Some(ItemId::from("watchlist")));
    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].value, "Watchlist");
}

#[test]
fn test_escape_closes_without_notification() {
    let (command, log) = recorded(Command::new(entries()));
    command.open();
    command.next();
    assert_eq!(
        send(&command, key_to(&command, Key::Escape, Modifiers::new())).unwrap(),
        EventResult::Consumed
    );
    assert!(!command.is_open());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_disabled_item_skipped_and_inert() {
    let (command, log) = recorded(Command::new(entries()));
    command.open();
    command.set_query("i").unwrap();
    // "Billing" matches but is disabled; highlight lands on an enabled item.
    assert_ne!(command.highlighted(), Some(ItemId::from("billing")));
    command.activate(&ItemId::from("billing"));
    assert!(command.is_open());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_click_item_commits() {
    let (command, log) = recorded(Command::new(entries()));
    command.open();
    let root = Element::col().id("root").child(command.element(true));
    let layout = layout(&root, Rect::new(0, 0, 60, 30));
    let item = layout
        .get(&command.item_element_id(&ItemId::from("search")))
        .copied()
        .unwrap();

    let click = Event::Click {
        target: None,
        x: item.x + 1,
        y: item.y,
        button: MouseButton::Left,
    };
    let result = command
        .handle(&click, &EventContext::new(&root, &layout))
        .unwrap();
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(log.lock().unwrap()[0].id, ItemId::from("search"));
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn test_structure_and_shortcuts() {
    let command = Command::new(entries());
    command.open();
    let el = command.element(true);
    assert_eq!(el.slot(), Some("command"));

    let input = find_element(&el, &command.input_id()).unwrap();
    assert_eq!(input.slot(), Some("command-input"));
    assert!(input.focusable && input.captures_input);

    let dashboard =
        find_element(&el, &command.item_element_id(&ItemId::from("dashboard"))).unwrap();
    assert!(dashboard.has_flag("data-highlighted"));
    assert!(stockdom::find_by_slot(dashboard, "command-shortcut").is_some());

    assert_eq!(stockdom::find_all_by_slot(&el, "command-group").len(), 2);
    assert_eq!(stockdom::find_all_by_slot(&el, "command-separator").len(), 1);

    // Headings without matches and separators disappear while searching.
    command.set_query("dash").unwrap();
    let el = command.element(true);
    assert_eq!(stockdom::find_all_by_slot(&el, "command-group").len(), 1);
    assert!(stockdom::find_all_by_slot(&el, "command-separator").is_empty());
}

#[test]
fn test_dialog_defaults_and_modality() {
    let dialog = CommandDialog::new(Command::new(entries()));
    assert_eq!(dialog.title(), "Command Palette");
    assert_eq!(dialog.description(), "Search for a command to run...");

    dialog.open();
    let viewport = Rect::new(0, 0, 80, 24);
    let root = Element::col()
        .id("root")
        .child(Element::text("behind").id("behind").clickable(true))
        .child(dialog.element(viewport, true));
    let layout = layout(&root, viewport);
    let cx = EventContext::new(&root, &layout);

    let dialog_el = find_element(&root, &dialog.dialog_id()).unwrap();
    assert!(dialog_el.interaction_scope);
    assert!(find_element(&root, &dialog.close_id()).is_some());

    // A press outside closes and is swallowed.
    let outside = Event::Click {
        target: Some("behind".to_string()),
        x: 0,
        y: 0,
        button: MouseButton::Left,
    };
    assert_eq!(dialog.handle(&outside, &cx).unwrap(), EventResult::Consumed);
    assert!(!dialog.is_open());
}
