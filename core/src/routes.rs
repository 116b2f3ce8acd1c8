//! Client-side routes and the navigation bar.

use crate::{auth::User, error::{GridError, GridResult}};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Landing,
    Login,
    Signup,
    Dashboard,
    Zones,
    AiInsights,
    Business,
    Contact,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Landing,
        Route::Login,
        Route::Signup,
        Route::Dashboard,
        Route::Zones,
        Route::AiInsights,
        Route::Business,
        Route::Contact,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing    => "/",
            Self::Login      => "/login",
            Self::Signup     => "/signup",
            Self::Dashboard  => "/dashboard",
            Self::Zones      => "/zones",
            Self::AiInsights => "/ai-insights",
            Self::Business   => "/business",
            Self::Contact    => "/contact",
        }
    }

    /// Exact path match. Unknown paths have no view.
    pub fn from_path(path: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn resolve(path: &str) -> GridResult<Route> {
        Self::from_path(path).ok_or_else(|| GridError::UnknownRoute { path: path.to_string() })
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct NavLink {
    pub route: Route,
    pub label: &'static str,
}

pub const NAV_LINKS: [NavLink; 6] = [
    NavLink { route: Route::Landing,    label: "Home" },
    NavLink { route: Route::Dashboard,  label: "Dashboard" },
    NavLink { route: Route::Zones,      label: "Zone Insights" },
    NavLink { route: Route::AiInsights, label: "AI Models" },
    NavLink { route: Route::Business,   label: "Business" },
    NavLink { route: Route::Contact,    label: "Contact" },
];

/// Links with the entry for `current` flagged active.
pub fn nav_links(current: Route) -> Vec<(NavLink, bool)> {
    NAV_LINKS.iter().map(|l| (*l, l.route == current)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    Redirect(Route),
}

/// Gate for views that need a signed-in user.
pub fn require_auth(user: Option<&User>) -> Guard {
    match user {
        Some(_) => Guard::Allow,
        None => Guard::Redirect(Route::Login),
    }
}
