//! Application pages.

mod dashboard;
mod sign_in;
mod sign_up;

pub use dashboard::DashboardPage;
pub use sign_in::SignInPage;
pub use sign_up::SignUpPage;

use stockdom::{Color, Edges, Element, Event, FocusState, Key, MouseButton, Size, Style};
use stockui::widgets::Label;
use stockui::EventContext;

use crate::nav::Route;

/// Width of the centred auth forms.
const FORM_WIDTH: u16 = 46;

/// What the application should do after a page handled an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    None,
    Navigate(Route),
    /// Move keyboard focus to the element with this id.
    Focus(String),
    /// Credentials were accepted for this email.
    SignedIn(String),
    SignOut,
    Quit,
}

pub trait Page {
    fn element(&self, focus: &FocusState, viewport: stockdom::Rect) -> Element;

    fn handle(&mut self, event: &Event, cx: &EventContext<'_>) -> PageAction;

    /// Called on every tick of the event loop. Returns an action and whether
    /// anything visible changed.
    fn poll(&mut self) -> (PageAction, bool) {
        (PageAction::None, false)
    }

    /// Element to focus when the page is shown.
    fn initial_focus(&self) -> Option<String>;
}

/// A label stacked over its control.
fn labelled(label: &Label, control: Element) -> Element {
    Element::col().child(label.element()).child(control)
}

/// Page heading and optional subtitle.
fn heading(title: &str, subtitle: Option<&str>) -> Element {
    let mut el = Element::col()
        .child(Element::text(title).style(Style::new().bold().foreground(Color::var("primary"))));
    if let Some(subtitle) = subtitle {
        el = el.child(Element::text(subtitle).style(Style::new().foreground(Color::var("muted-foreground"))));
    }
    el
}

/// "Text? Link" line under a form. The link is focusable and clickable.
fn footer_link(id: &str, text: &str, link: &str, focused: bool) -> Element {
    let mut link_style = Style::new().underline().foreground(Color::var("primary"));
    if focused {
        link_style = link_style.bold();
    }
    Element::row()
        .child(Element::text(text).style(Style::new().foreground(Color::var("muted-foreground"))))
        .child(
            Element::text(link)
                .id(id)
                .focusable(true)
                .clickable(true)
                .style(link_style),
        )
}

/// Submission failure shown under the submit button.
fn form_error(message: Option<String>) -> Option<Element> {
    message.map(|message| {
        Element::text(message).style(Style::new().foreground(Color::var("destructive")))
    })
}

/// Centre `form` horizontally in a full-screen page.
fn auth_layout(id: &str, form: Element) -> Element {
    Element::col()
        .id(id)
        .width(Size::Fill)
        .height(Size::Fill)
        .padding(Edges::vertical(1))
        .align(stockdom::Align::Center)
        .style(Style::new().background(Color::var("background")))
        .child(form.width(Size::Fixed(FORM_WIDTH)).gap(1))
}

/// True when `event` activates the element `id`, by Enter on it or a click.
fn activates(event: &Event, id: &str) -> bool {
    match event {
        Event::Key {
            target: Some(target),
            key: Key::Enter,
            ..
        } => target == id,
        Event::Click {
            target: Some(target),
            button: MouseButton::Left,
            ..
        } => target == id,
        _ => false,
    }
}
