//! Store admin dashboard (Leptos CSR)
//!
//! - `state`: core services, mirrored into signals and shared via context
//! - `web::router`: history-backed routing with the navigation guard
//! - `auth`: sign-in / sign-out
//! - `components`: views

mod auth;
mod components {
    pub mod catalog;
    pub mod dashboard;
    pub mod directory;
    pub mod layout;
    pub mod login;
    pub mod notifications;
    pub mod orders;
    pub mod records;
}
mod state;
pub mod web;

use leptos::prelude::*;
use storeadmin::{AppConfig, AppRoute};

use crate::components::catalog::{CategoriesPage, ProductsPage};
use crate::components::dashboard::DashboardPage;
use crate::components::directory::{CartsPage, TransactionsPage, UsersPage, WalletsPage};
use crate::components::layout::{NotFoundPage, Shell};
use crate::components::login::LoginPage;
use crate::components::notifications::NotificationsPage;
use crate::components::orders::{OrderDetailsPage, OrdersPage};
use crate::state::provide_app_state;
use crate::web::router::{Router, RouterOutlet};

/// Maps a route to its view. Guarding has already happened in the router.
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => return view! { <LoginPage /> }.into_any(),
        AppRoute::NotFound => return view! { <NotFoundPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::Categories => view! { <CategoriesPage /> }.into_any(),
        AppRoute::Orders => view! { <OrdersPage /> }.into_any(),
        AppRoute::OrderDetails(id) => view! { <OrderDetailsPage id=id /> }.into_any(),
        AppRoute::Carts => view! { <CartsPage /> }.into_any(),
        AppRoute::Transactions => view! { <TransactionsPage /> }.into_any(),
        AppRoute::Users => view! { <UsersPage /> }.into_any(),
        AppRoute::Wallets => view! { <WalletsPage /> }.into_any(),
        AppRoute::Notifications => view! { <NotificationsPage /> }.into_any(),
    };
    view! { <Shell>{page}</Shell> }.into_any()
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let state = provide_app_state(&config);
    let is_authenticated = state.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
