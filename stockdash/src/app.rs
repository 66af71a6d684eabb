//! Application shell: routing between pages and the terminal event loop.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;
use stockdom::{DefaultTheme, Element, Event, FocusState, Key, Rect, Terminal};
use stockui::EventContext;
use thiserror::Error;

use crate::auth::AuthService;
use crate::nav::Route;
use crate::pages::{DashboardPage, Page, PageAction, SignInPage, SignUpPage};
use crate::settings::{Settings, SettingsError};

/// How often pending form submissions are checked.
const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("invalid form pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub struct App {
    route: Route,
    sign_in: SignInPage,
    sign_up: SignUpPage,
    dashboard: DashboardPage,
    focus: FocusState,
    settings: Settings,
    /// Targeted events produced while handling others.
    queue: VecDeque<Event>,
    quit: bool,
}

impl App {
    pub async fn new(settings: Settings, auth: Arc<dyn AuthService>) -> Result<Self, AppError> {
        let sign_in = SignInPage::new(Arc::clone(&auth), settings.clone())?;
        if let Some(email) = settings.last_email().await? {
            sign_in.prefill(&email);
        }
        let sign_up = SignUpPage::new(auth, settings.clone())?;
        sign_up.apply_profile(&settings.profile().await?);

        let mut app = Self {
            route: Route::SignIn,
            sign_in,
            sign_up,
            dashboard: DashboardPage::new(),
            focus: FocusState::new(),
            settings,
            queue: VecDeque::new(),
            quit: false,
        };
        app.focus_initial();
        Ok(app)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    fn page(&self) -> &dyn Page {
        match self.route {
            Route::SignIn => &self.sign_in,
            Route::SignUp => &self.sign_up,
            Route::Dashboard | Route::Search | Route::Watchlist => &self.dashboard,
        }
    }

    fn page_mut(&mut self) -> &mut dyn Page {
        match self.route {
            Route::SignIn => &mut self.sign_in,
            Route::SignUp => &mut self.sign_up,
            Route::Dashboard | Route::Search | Route::Watchlist => &mut self.dashboard,
        }
    }

    pub fn element(&self, viewport: Rect) -> Element {
        Element::col()
            .id("root")
            .child(self.page().element(&self.focus, viewport))
    }

    fn focus_initial(&mut self) {
        self.focus.blur();
        if let Some(id) = self.page().initial_focus() {
            self.focus.focus(&id);
        }
    }

    fn move_focus(&mut self, id: String) {
        let previous = self.focus.focused().map(str::to_string);
        if self.focus.focus(&id) {
            if let Some(previous) = previous {
                self.queue.push_back(Event::Blur { target: previous });
            }
            self.queue.push_back(Event::Focus { target: id });
        }
    }

    fn navigate(&mut self, route: Route) {
        let route = if route.requires_session() && !self.dashboard.has_session() {
            log::warn!("{} needs a session, showing sign-in", route.path());
            Route::SignIn
        } else {
            route
        };
        log::info!("navigating to {}", route.path());
        if route.requires_session() {
            self.dashboard.show(route);
        }
        self.route = route;
        self.focus_initial();
    }

    async fn apply(&mut self, action: PageAction) -> Result<(), AppError> {
        match action {
            PageAction::None => {}
            PageAction::Navigate(route) => self.navigate(route),
            PageAction::Focus(id) => self.move_focus(id),
            PageAction::SignedIn(email) => {
                let profile = self.settings.profile().await?;
                self.dashboard.begin_session(email, profile);
                self.navigate(Route::Dashboard);
            }
            PageAction::SignOut => {
                log::info!("signed out");
                self.dashboard.end_session();
                if let Some(email) = self.settings.last_email().await? {
                    self.sign_in.prefill(&email);
                }
                self.navigate(Route::SignIn);
            }
            PageAction::Quit => self.quit = true,
        }
        Ok(())
    }

    /// Handle one targeted event and everything it causes.
    pub async fn dispatch(&mut self, event: Event, cx: &EventContext<'_>) -> Result<(), AppError> {
        self.queue.push_back(event);
        while let Some(event) = self.queue.pop_front() {
            if let Event::Key {
                key: Key::Char('q' | 'c'),
                modifiers,
                ..
            } = &event
                && modifiers.ctrl
            {
                log::info!("quit requested");
                self.quit = true;
                return Ok(());
            }

            let action = self.page_mut().handle(&event, cx);
            self.apply(action).await?;
        }
        Ok(())
    }

    /// Settle finished submissions. Returns true when a redraw is needed.
    pub async fn tick(&mut self) -> Result<bool, AppError> {
        let (action, changed) = self.page_mut().poll();
        self.apply(action).await?;
        Ok(changed)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Draw and react to terminal input until the user quits.
    pub async fn run(mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        let theme = DefaultTheme::new();
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut redraw = true;

        loop {
            let (width, height) = crossterm::terminal::size()?;
            let root = self.element(Rect::from_size(width, height));
            self.focus.validate(&root);
            if redraw {
                terminal.render(&root, &theme)?;
                redraw = false;
            }

            tokio::select! {
                received = events.next() => match received {
                    Some(Ok(raw)) => {
                        let layout = terminal.layout();
                        let cx = EventContext::new(&root, layout);
                        for event in self.focus.process_event(&raw, &root, layout) {
                            log::debug!("event {event:?} with focus on {:?}", self.focused());
                            self.dispatch(event, &cx).await?;
                        }
                        redraw = true;
                    }
                    Some(Err(err)) => log::error!("event stream error: {err}"),
                    None => {
                        log::info!("event stream closed");
                        break;
                    }
                },
                _ = tick.tick() => {
                    redraw |= self.tick().await?;
                }
            }

            if self.should_quit() {
                break;
            }
        }
        log::info!("leaving from {}", self.route().path());
        Ok(())
    }
}
