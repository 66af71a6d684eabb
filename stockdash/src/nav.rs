//! Navigation table and routes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

/// Header navigation, in display order.
pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        href: "/",
        label: "Dashboard",
    },
    NavItem {
        href: "/search",
        label: "Search",
    },
    NavItem {
        href: "/watchlist",
        label: "Watchlist",
    },
];

/// Every page the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    SignIn,
    SignUp,
    Dashboard,
    Search,
    Watchlist,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::SignIn => "/sign-in",
            Route::SignUp => "/sign-up",
            Route::Dashboard => "/",
            Route::Search => "/search",
            Route::Watchlist => "/watchlist",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        [
            Route::SignIn,
            Route::SignUp,
            Route::Dashboard,
            Route::Search,
            Route::Watchlist,
        ]
        .into_iter()
        .find(|route| route.path() == path)
    }

    /// Pages behind the sign-in wall.
    pub fn requires_session(self) -> bool {
        !matches!(self, Route::SignIn | Route::SignUp)
    }
}
