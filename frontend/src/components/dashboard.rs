use leptos::prelude::*;
use storeadmin::AppRoute;

use crate::components::layout::Panel;
use crate::state::use_app;
use crate::web::router::Link;

#[component]
fn Stat(
    title: &'static str,
    #[prop(into)] value: Signal<usize>,
    #[prop(into)] loading: Signal<bool>,
    route: AppRoute,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-title">{title}</div>
            <div class="stat-value text-primary">
                {move || {
                    if loading.get() {
                        view! { <span class="loading loading-dots loading-md"></span> }.into_any()
                    } else {
                        value.get().to_string().into_any()
                    }
                }}
            </div>
            <div class="stat-desc">
                <Link route=route class="link link-hover">"View all"</Link>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();

    app.run(|s| async move {
        s.products.fetch_products().await;
        s.categories.fetch_categories().await;
        s.orders.fetch_all_ongoing_orders().await;
        s.users.fetch_users().await;
    });

    let products = app.products;
    let categories = app.categories;
    let orders = app.orders;
    let users = app.users;

    view! {
        <Panel title="Overview" subtitle="Current state of the store.">
            <div class="stats shadow w-full stats-vertical md:stats-horizontal">
                <Stat
                    title="Products"
                    value=Signal::derive(move || products.with(|s| s.data.len()))
                    loading=Signal::derive(move || products.with(|s| s.loading))
                    route=AppRoute::Products
                />
                <Stat
                    title="Categories"
                    value=Signal::derive(move || categories.with(|s| s.data.len()))
                    loading=Signal::derive(move || categories.with(|s| s.loading))
                    route=AppRoute::Categories
                />
                <Stat
                    title="Ongoing orders"
                    value=Signal::derive(move || orders.with(|s| s.data.ongoing.len()))
                    loading=Signal::derive(move || orders.with(|s| s.loading))
                    route=AppRoute::Orders
                />
                <Stat
                    title="Users"
                    value=Signal::derive(move || users.with(|s| s.data.len()))
                    loading=Signal::derive(move || users.with(|s| s.loading))
                    route=AppRoute::Users
                />
            </div>
        </Panel>
    }
}
