use leptos::prelude::*;
use storeadmin::AppRoute;

use crate::auth::{display_name, logout};
use crate::state::use_app;
use crate::web::router::{Link, use_router};

/// Navbar and sidebar around every signed-in page.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let app = use_app();
    let router = use_router();

    // The router redirects to the login page once the session is cleared.
    let on_logout = move |_| logout(&app.services());

    let menu = AppRoute::menu()
        .into_iter()
        .map(|route| {
            let target = route.clone();
            let active = Signal::derive(move || {
                let current = router.current_route().get();
                current == target
                    || (target == AppRoute::Orders && matches!(current, AppRoute::OrderDetails(_)))
            });
            let label = route.name();
            view! {
                <li>
                    <Link route=route active=active>{label}</Link>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow">
                <div class="flex-1">
                    <span class="btn btn-ghost text-xl">"Store Admin"</span>
                </div>
                <div class="flex-none gap-2">
                    <span class="badge badge-neutral hidden md:inline-flex">
                        {move || app.session.with(display_name)}
                    </span>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                        "Sign out"
                    </button>
                </div>
            </div>
            <div class="flex flex-col md:flex-row gap-4 p-4 md:p-8">
                <ul class="menu bg-base-100 rounded-box w-full md:w-56 shadow">{menu}</ul>
                <main class="flex-1 space-y-6">{children()}</main>
            </div>
        </div>
    }
}

/// Titled card used by every page.
#[component]
pub fn Panel(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">{title}</h3>
                {subtitle.map(|s| view! { <p class="text-base-content/70 text-sm">{s}</p> })}
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl">"Page not found"</p>
                <Link route=AppRoute::Dashboard class="btn btn-primary">"Back to dashboard"</Link>
            </div>
        </div>
    }
}
