//! Router service
//!
//! Wraps the `window.history` API. Every navigation runs
//! "listen -> guard -> apply": the target is parsed into an [`AppRoute`],
//! checked by [`storeadmin::evaluate`] against the injected authentication
//! signal, then written to history and the route signal.

use leptos::prelude::*;
use storeadmin::{AppRoute, Navigation, evaluate};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Full page load of `route`, dropping all in-memory state.
///
/// Does nothing when the browser is already there, so a rejected login does
/// not reload the login form.
pub fn hard_redirect(route: &AppRoute) {
    let target = route.to_path();
    if AppRoute::from_path(&current_path()) == *route {
        return;
    }
    if let Some(window) = web_sys::window() {
        info!(to = %target, "hard redirect");
        let _ = window.location().set_href(&target);
    }
}

/// Whether a navigation adds a history entry. Redirects never do.
fn writes_new_entry(outcome: &Navigation, use_push: bool) -> bool {
    use_push && !outcome.is_redirect()
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// Injected, so the router never touches the session directly.
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::default());
        let router = Self {
            current_route,
            set_route,
            is_authenticated,
        };
        // The initial URL goes through the guard like any other navigation.
        router.navigate_to_route(AppRoute::from_path(&current_path()), false);
        router
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// `use_push` selects `pushState` over `replaceState`. Redirects always
    /// replace, so "back" never lands on a page the guard refused.
    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let outcome = evaluate(target, self.is_authenticated.get_untracked());
        if let Navigation::Redirected { requested, to } = &outcome {
            debug!(from = %requested, to = %to, "navigation redirected");
        }
        let push = writes_new_entry(&outcome, use_push);
        let route = outcome.into_route();
        let path = route.to_path();
        if push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.set_route.set(route);
    }

    /// Back/forward buttons run the guard too.
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.navigate_to_route(AppRoute::from_path(&current_path()), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Lives as long as the page.
        closure.forget();
    }

    /// Re-runs the guard on the current route whenever authentication
    /// changes, e.g. after sign-in, sign-out or an expired token.
    fn setup_auth_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            let _ = router.is_authenticated.get();
            let route = router.current_route.get_untracked();
            if evaluate(route.clone(), router.is_authenticated.get_untracked()).is_redirect() {
                router.navigate_to_route(route, false);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

/// Renders whatever `matcher` returns for the current route.
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}

/// In-app link; plain clicks navigate without reloading the page.
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(into, optional)] class: String,
    /// Adds the `active` class while true.
    #[prop(optional)]
    active: Option<Signal<bool>>,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = route.to_path();
    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() {
            return;
        }
        ev.prevent_default();
        router.navigate_to(route.clone());
    };

    view! {
        <a
            href=href
            class=class
            class:active=move || active.is_some_and(|a| a.get())
            on:click=on_click
        >
            {children()}
        </a>
    }
}
