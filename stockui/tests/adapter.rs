use stockdom::{Border, Color, Element, Style};
use stockui::adapter::{adapt, slot, Props};
use stockui::tokens::{self, Slot, State};

#[test]
fn test_slot_attribute_and_default_style() {
    let el = slot(Slot::SelectContent, Element::col().id("content"));
    assert_eq!(el.slot(), Some("select-content"));
    assert_eq!(el.style.border, Some(Border::Rounded));
    assert_eq!(el.style.background, Some(Color::var("popover")));
}

#[test]
fn test_override_wins_per_field() {
    let props = Props::new().style(Style::new().foreground(Color::rgb(255, 0, 0)));
    let el = adapt(Slot::SelectTrigger, Element::row().id("trigger"), &props);
    assert_eq!(el.style.foreground, Some(Color::rgb(255, 0, 0)));
    // Untouched fields keep the slot default.
    assert_eq!(el.style.border, Some(Border::Rounded));
}

#[test]
fn test_element_style_sits_between_default_and_override() {
    let el = Element::text("x").style(Style::new().border(Border::None).bold());
    let props = Props::new().style(Style::new().no_bold());
    let el = adapt(Slot::SelectTrigger, el, &props);
    assert_eq!(el.style.border, Some(Border::None));
    assert_eq!(el.style.bold, Some(false));
}

#[test]
fn test_passthrough_attributes_forwarded_verbatim() {
    let props = Props::new()
        .attr("aria-describedby", "email-help")
        .attr("data-testid", "email");
    let el = adapt(Slot::Label, Element::text("Email"), &props);
    assert_eq!(
        el.get_data("aria-describedby").map(String::as_str),
        Some("email-help")
    );
    assert_eq!(el.get_data("data-testid").map(String::as_str), Some("email"));
}

#[test]
fn test_caller_cannot_replace_slot() {
    let props = Props::new().attr("data-slot", "something-else");
    let el = adapt(Slot::Label, Element::text("Email"), &props);
    assert_eq!(el.slot(), Some("label"));
}

#[test]
fn test_disabled_prop() {
    let el = adapt(Slot::Button, Element::text("Go"), &Props::new().disabled(true));
    assert!(el.disabled);
    assert!(el.has_flag("data-disabled"));
    assert_eq!(el.style.dim, Some(true));
}

#[test]
fn test_id_override() {
    let el = adapt(Slot::Label, Element::text("Email").id("a"), &Props::new().id("b"));
    assert_eq!(el.id, "b");
}

#[test]
fn test_state_tokens_layer_in_order() {
    let style = tokens::resolve(Slot::SelectItem, &[State::Highlighted]);
    assert_eq!(style.background, Some(Color::var("accent")));
    assert_eq!(style.foreground, Some(Color::var("accent-foreground")));

    let style = tokens::resolve(Slot::SelectItem, &[State::Highlighted, State::Disabled]);
    assert_eq!(style.dim, Some(true));
}

#[test]
fn test_every_slot_has_a_name() {
    for slot in Slot::ALL {
        assert!(!slot.as_str().is_empty());
    }
    assert_eq!(Slot::CommandShortcut.as_str(), "command-shortcut");
    assert_eq!(State::Invalid.attr(), "aria-invalid");
}
