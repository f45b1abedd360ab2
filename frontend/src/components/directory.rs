//! Read-only views: carts, transactions, users and wallets.

use leptos::prelude::*;
use storeadmin_shared::{EntityId, Fields, User};

use crate::components::layout::Panel;
use crate::components::records::{RecordTable, StoreStatus, to_row};
use crate::state::use_app;

/// Id input with "apply" and "clear" actions.
#[component]
fn IdFilter(
    placeholder: &'static str,
    on_apply: Callback<EntityId>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let value = RwSignal::new(String::new());
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let raw = value.get_untracked();
        let raw = raw.trim();
        if raw.is_empty() {
            on_clear.run(());
        } else {
            on_apply.run(EntityId::parse(raw));
        }
    };
    let clear = move |_| {
        value.set(String::new());
        on_clear.run(());
    };

    view! {
        <form class="flex gap-2" on:submit=on_submit>
            <input
                class="input input-bordered input-sm flex-1"
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <button class="btn btn-sm btn-primary">"Apply"</button>
            <button type="button" class="btn btn-sm btn-ghost" on:click=clear>"All"</button>
        </form>
    }
}

#[component]
pub fn CartsPage() -> impl IntoView {
    let app = use_app();
    app.run(|s| async move {
        s.carts.fetch_carts().await;
        s.carts.fetch_cart_products().await;
    });
    let store = app.carts;

    view! {
        <StoreStatus
            loading=Signal::derive(move || store.with(|s| s.loading))
            error=Signal::derive(move || store.with(|s| s.error.clone()))
        />
        <Panel title="Carts">
            <RecordTable rows=Signal::derive(move || {
                store.with(|s| s.data.carts.iter().map(to_row).collect())
            }) />
        </Panel>
        <Panel title="Cart products">
            <RecordTable rows=Signal::derive(move || {
                store.with(|s| s.data.cart_products.iter().map(|p| p.fields.clone()).collect())
            }) />
        </Panel>
    }
}

#[component]
pub fn TransactionsPage() -> impl IntoView {
    let app = use_app();
    app.run(|s| async move { s.transactions.fetch_transactions().await });
    let store = app.transactions;
    let selected = RwSignal::new(Option::<Fields>::None);

    let by_user = Callback::new(move |user_id: EntityId| {
        app.run(move |s| async move { s.transactions.fetch_user_transactions(user_id).await });
    });
    let all = Callback::new(move |()| {
        app.run(|s| async move { s.transactions.fetch_transactions().await });
    });
    let lookup = Callback::new(move |id: EntityId| {
        app.run(move |s| async move {
            let found = s.transactions.fetch_transaction_by_id(id).await.ok();
            selected.set(found.as_ref().map(to_row));
        });
    });
    let close = Callback::new(move |()| selected.set(None));

    view! {
        <Panel title="Transactions">
            <IdFilter placeholder="Filter by user id" on_apply=by_user on_clear=all />
            <IdFilter placeholder="Look up transaction id" on_apply=lookup on_clear=close />
            {move || {
                selected
                    .get()
                    .map(|row| view! { <RecordTable rows=Signal::derive(move || vec![row.clone()]) /> })
            }}
            <StoreStatus
                loading=Signal::derive(move || store.with(|s| s.loading))
                error=Signal::derive(move || store.with(|s| s.error.clone()))
            />
            <RecordTable rows=Signal::derive(move || {
                store.with(|s| s.data.iter().map(to_row).collect())
            }) />
        </Panel>
    }
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let app = use_app();
    app.run(|s| async move { s.users.fetch_users().await });
    let store = app.users;
    let contact = RwSignal::new(Option::<User>::None);

    let lookup = Callback::new(move |id: EntityId| {
        app.run(move |s| async move {
            contact.set(s.users.fetch_user_with_contact(id).await.ok());
        });
    });
    let close = Callback::new(move |()| contact.set(None));

    view! {
        <Panel title="Users">
            <IdFilter placeholder="Contact details for user id" on_apply=lookup on_clear=close />
            {move || {
                contact
                    .get()
                    .map(|user| {
                        let row = to_row(&user);
                        view! { <RecordTable rows=Signal::derive(move || vec![row.clone()]) /> }
                    })
            }}
            <StoreStatus
                loading=Signal::derive(move || store.with(|s| s.loading))
                error=Signal::derive(move || store.with(|s| s.error.clone()))
            />
            <RecordTable rows=Signal::derive(move || {
                store.with(|s| s.data.iter().map(to_row).collect())
            }) />
        </Panel>
    }
}

#[component]
pub fn WalletsPage() -> impl IntoView {
    let app = use_app();
    app.run(|s| async move { s.wallets.fetch_wallets().await });
    let store = app.wallets;

    let by_user = Callback::new(move |user_id: EntityId| {
        app.run(move |s| async move { s.wallets.fetch_user_wallets(user_id).await });
    });
    let all = Callback::new(move |()| {
        app.run(|s| async move { s.wallets.fetch_wallets().await });
    });

    view! {
        <Panel title="Wallets">
            <IdFilter placeholder="Filter by user id" on_apply=by_user on_clear=all />
            <StoreStatus
                loading=Signal::derive(move || store.with(|s| s.loading))
                error=Signal::derive(move || store.with(|s| s.error.clone()))
            />
            <RecordTable rows=Signal::derive(move || {
                store.with(|s| s.data.iter().map(to_row).collect())
            }) />
        </Panel>
    }
}
