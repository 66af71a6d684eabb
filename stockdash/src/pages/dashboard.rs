//! Signed-in shell: navigation header, user menu, command palette.

use std::sync::{Arc, Mutex};

use stockdom::{Color, Edges, Element, Event, FocusState, Key, Rect, Size, Style};
use stockui::primitive::ItemId;
use stockui::primitive::popover::{Align, Side};
use stockui::widgets::{Command, CommandDialog, CommandEntry, CommandItem, Popover};
use stockui::EventContext;

use super::{Page, PageAction};
use crate::nav::{NAV_ITEMS, NavItem, Route};
use crate::profile::Profile;

const PAGE_ID: &str = "dashboard";
const SIGN_OUT: &str = "sign-out";
const QUIT: &str = "quit";
const MENU_SIGN_OUT: &str = "user-menu-sign-out";

fn nav_id(item: &NavItem) -> String {
    format!("nav-{}", item.label.to_lowercase())
}

fn palette_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::group(
            "Navigation",
            NAV_ITEMS
                .iter()
                .map(|item| CommandItem::new(item.href, item.label)),
        ),
        CommandEntry::Separator,
        CommandEntry::group(
            "Account",
            [
                CommandItem::new(SIGN_OUT, "Sign out"),
                CommandItem::new(QUIT, "Quit").shortcut("Ctrl+Q"),
            ],
        ),
    ]
}

pub struct DashboardPage {
    route: Route,
    email: Option<String>,
    profile: Profile,
    palette: CommandDialog,
    /// Item committed in the palette, picked up after the event is handled.
    chosen: Arc<Mutex<Option<ItemId>>>,
    user_menu: Popover,
}

impl DashboardPage {
    pub fn new() -> Self {
        let chosen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&chosen);
        let command = Command::new(palette_entries())
            .with_id("palette")
            .on_select(move |commit| {
                if let Ok(mut slot) = sink.lock() {
                    *slot = Some(commit.id.clone());
                }
            });

        Self {
            route: Route::Dashboard,
            email: None,
            profile: Profile::default(),
            palette: CommandDialog::new(command),
            chosen,
            user_menu: Popover::new()
                .with_id("user-menu")
                .with_side(Side::Bottom)
                .with_align(Align::End),
        }
    }

    pub fn begin_session(&mut self, email: String, profile: Profile) {
        log::info!("session started for {email}");
        self.email = Some(email);
        self.profile = profile;
        self.route = Route::Dashboard;
    }

    pub fn end_session(&mut self) {
        self.email = None;
        self.palette.close();
        self.user_menu.close();
    }

    pub fn show(&mut self, route: Route) {
        self.route = route;
    }

    pub fn has_session(&self) -> bool {
        self.email.is_some()
    }

    fn take_chosen(&self) -> Option<ItemId> {
        self.chosen.lock().ok().and_then(|mut slot| slot.take())
    }

    fn run_command(&self, id: &ItemId) -> PageAction {
        match id.as_str() {
            SIGN_OUT => PageAction::SignOut,
            QUIT => PageAction::Quit,
            path => match Route::from_path(path) {
                Some(route) => PageAction::Navigate(route),
                None => {
                    log::warn!("palette item {path} has no action");
                    PageAction::None
                }
            },
        }
    }

    fn header(&self, focus: &FocusState) -> Element {
        let mut nav = Element::row().gap(2);
        for item in &NAV_ITEMS {
            let id = nav_id(item);
            let mut style = Style::new().foreground(Color::var("muted-foreground"));
            if Route::from_path(item.href) == Some(self.route) {
                style = Style::new().foreground(Color::var("foreground")).bold();
            }
            if focus.is_focused(&id) {
                style = style.underline();
            }
            nav = nav.child(
                Element::text(item.label)
                    .id(id)
                    .focusable(true)
                    .clickable(true)
                    .data("href", item.href)
                    .style(style),
            );
        }

        let user = self.email.clone().unwrap_or_default();
        let menu = self.user_menu.element(
            Element::text(format!("{user} ▾")),
            self.user_menu_content(),
        );

        Element::row()
            .width(Size::Fill)
            .gap(3)
            .padding(Edges::horizontal(1))
            .style(Style::new().border(stockdom::Border::Single))
            .child(Element::text("Stockdash").style(Style::new().bold().foreground(Color::var("primary"))))
            .child(nav.flex_grow(1))
            .child(menu)
    }

    fn user_menu_content(&self) -> Element {
        let muted = Style::new().foreground(Color::var("muted-foreground"));
        Element::col()
            .padding(Edges::symmetric(0, 1))
            .child(Element::text(self.email.clone().unwrap_or_default()).style(Style::new().bold()))
            .child(Element::text(format!("Goals: {}", self.profile.investment_goals)).style(muted.clone()))
            .child(Element::text(format!("Risk: {}", self.profile.risk_tolerance)).style(muted.clone()))
            .child(Element::text(format!("Industry: {}", self.profile.preferred_industry)).style(muted))
            .child(
                Element::text("Sign out")
                    .id(MENU_SIGN_OUT)
                    .clickable(true)
                    .style(Style::new().foreground(Color::var("destructive"))),
            )
    }

    fn body(&self) -> Element {
        let (title, detail) = match self.route {
            Route::Search => ("Search", "Find stocks by symbol or company name."),
            Route::Watchlist => ("Watchlist", "Symbols you follow will appear here."),
            _ => ("Market Overview", "Your markets at a glance."),
        };
        Element::col()
            .flex_grow(1)
            .padding(Edges::all(1))
            .gap(1)
            .child(Element::text(title).style(Style::new().bold()))
            .child(Element::text(detail))
            .child(
                Element::text("Ctrl+K: command palette   Ctrl+Q: quit")
                    .style(Style::new().foreground(Color::var("muted-foreground"))),
            )
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for DashboardPage {
    fn element(&self, focus: &FocusState, viewport: Rect) -> Element {
        Element::col()
            .id(PAGE_ID)
            .width(Size::Fill)
            .height(Size::Fill)
            .style(Style::new().background(Color::var("background")))
            .child(self.header(focus))
            .child(self.body())
            .child(
                self.palette
                    .element(viewport, focus.is_focused(&self.palette.input_id())),
            )
    }

    fn handle(&mut self, event: &Event, cx: &EventContext<'_>) -> PageAction {
        if self.palette.is_open() {
            let handled = self.palette.handle(event, cx);
            if let Some(id) = self.take_chosen() {
                return self.run_command(&id);
            }
            match handled {
                Ok(result) if result.is_handled() => return PageAction::None,
                Ok(_) => {}
                Err(err) => {
                    log::warn!("command palette: {err}");
                    return PageAction::None;
                }
            }
        }

        if let Event::Key {
            key: Key::Char('k'),
            modifiers,
            ..
        } = event
            && modifiers.ctrl
        {
            self.user_menu.close();
            self.palette.open();
            return PageAction::Focus(self.palette.input_id());
        }

        if self.user_menu.handle(event, cx).is_handled() {
            return PageAction::None;
        }
        if super::activates(event, MENU_SIGN_OUT) {
            self.user_menu.close();
            return PageAction::SignOut;
        }

        for item in &NAV_ITEMS {
            if super::activates(event, &nav_id(item))
                && let Some(route) = Route::from_path(item.href)
            {
                return PageAction::Navigate(route);
            }
        }
        PageAction::None
    }

    fn initial_focus(&self) -> Option<String> {
        NAV_ITEMS.iter().find_map(|item| {
            (Route::from_path(item.href) == Some(self.route)).then(|| nav_id(item))
        })
    }
}
