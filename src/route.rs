//! Route definitions
//!
//! Plain domain model with no dependency on the DOM. Defines every view of
//! the dashboard and its properties.

use std::fmt::Display;

use storeadmin_shared::EntityId;

/// Application routes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Login page (default route)
    #[default]
    Login,
    Dashboard,
    Products,
    Categories,
    Orders,
    /// A single order, `/orders/:id`
    OrderDetails(EntityId),
    Carts,
    Transactions,
    Users,
    Wallets,
    Notifications,
    NotFound,
}

impl AppRoute {
    /// Parses a URL path. Query string, fragment and trailing `/` are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        if let Some(id) = trimmed.strip_prefix("/orders/") {
            return if id.is_empty() || id.contains('/') {
                Self::NotFound
            } else {
                Self::OrderDetails(EntityId::parse(id))
            };
        }

        match trimmed {
            "" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/products" => Self::Products,
            "/categories" => Self::Categories,
            "/orders" => Self::Orders,
            "/carts" => Self::Carts,
            "/transactions" => Self::Transactions,
            "/users" => Self::Users,
            "/wallets" => Self::Wallets,
            "/notifications" => Self::Notifications,
            _ => Self::NotFound,
        }
    }

    /// Canonical path. `/` is an alias and is never produced.
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Products => "/products".to_string(),
            Self::Categories => "/categories".to_string(),
            Self::Orders => "/orders".to_string(),
            Self::OrderDetails(id) => format!("/orders/{}", id),
            Self::Carts => "/carts".to_string(),
            Self::Transactions => "/transactions".to_string(),
            Self::Users => "/users".to_string(),
            Self::Wallets => "/wallets".to_string(),
            Self::Notifications => "/notifications".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Route name as shown in navigation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::Categories => "Categories",
            Self::Orders => "Orders",
            Self::OrderDetails(_) => "OrderDetails",
            Self::Carts => "Carts",
            Self::Transactions => "Transactions",
            Self::Users => "Users",
            Self::Wallets => "Wallets",
            Self::Notifications => "Notifications",
            Self::NotFound => "NotFound",
        }
    }

    /// **Core guard rule: whether this route needs a signed-in session**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// Whether a signed-in user should be moved off this route.
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// Entries of the sidebar, in display order.
    pub fn menu() -> [AppRoute; 9] {
        [
            Self::Dashboard,
            Self::Products,
            Self::Categories,
            Self::Orders,
            Self::Carts,
            Self::Transactions,
            Self::Users,
            Self::Wallets,
            Self::Notifications,
        ]
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_an_alias_for_login() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login/"), AppRoute::Login);
        assert_eq!(AppRoute::Login.to_path(), "/login");
    }

    #[test]
    fn paths_round_trip() {
        for route in AppRoute::menu() {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
        let details = AppRoute::OrderDetails(EntityId::from(42));
        assert_eq!(AppRoute::from_path(&details.to_path()), details);
    }

    #[test]
    fn order_details_parses_identifier() {
        assert_eq!(
            AppRoute::from_path("/orders/12?tab=items"),
            AppRoute::OrderDetails(EntityId::Int(12))
        );
        assert_eq!(
            AppRoute::from_path("/orders/abc-1"),
            AppRoute::OrderDetails(EntityId::from("abc-1"))
        );
        assert_eq!(AppRoute::from_path("/orders/1/2"), AppRoute::NotFound);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/settings"), AppRoute::NotFound);
        assert!(!AppRoute::NotFound.requires_auth());
    }
}
