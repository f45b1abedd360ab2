//! Navigation guard
//!
//! Evaluated before every navigation, never cached. Callers pass the current
//! authentication state in, so the guard stays independent of the session.

use crate::route::AppRoute;

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allowed(AppRoute),
    Redirected { requested: AppRoute, to: AppRoute },
}

impl Navigation {
    /// The route that ends up displayed.
    pub fn route(&self) -> &AppRoute {
        match self {
            Navigation::Allowed(route) => route,
            Navigation::Redirected { to, .. } => to,
        }
    }

    pub fn into_route(self) -> AppRoute {
        match self {
            Navigation::Allowed(route) => route,
            Navigation::Redirected { to, .. } => to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirected { .. })
    }
}

pub fn evaluate(target: AppRoute, is_authenticated: bool) -> Navigation {
    if target.requires_auth() && !is_authenticated {
        return Navigation::Redirected {
            requested: target,
            to: AppRoute::auth_failure_redirect(),
        };
    }
    if target.should_redirect_when_authenticated() && is_authenticated {
        return Navigation::Redirected {
            requested: target,
            to: AppRoute::auth_success_redirect(),
        };
    }
    Navigation::Allowed(target)
}
