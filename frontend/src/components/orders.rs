use leptos::prelude::*;
use serde_json::Value;
use storeadmin::AppRoute;
use storeadmin_shared::{Checkout, EntityId, Fields};

use crate::components::layout::Panel;
use crate::components::records::{StoreStatus, cell_text, columns, to_row};
use crate::state::use_app;
use crate::web::router::Link;

const STATUS_FIELD: &str = "status";

#[component]
fn OrderTable(#[prop(into)] orders: Signal<Vec<Checkout>>) -> impl IntoView {
    let rows = move || {
        orders
            .get()
            .into_iter()
            .map(|order| {
                let id = order.checkout_id.clone();
                let status = cell_text(order.fields.get(STATUS_FIELD));
                view! {
                    <tr>
                        <td>{id.to_string()}</td>
                        <td>{status}</td>
                        <td class="text-right">
                            <Link route=AppRoute::OrderDetails(id) class="btn btn-ghost btn-xs">
                                "Details"
                            </Link>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <table class="table table-zebra w-full">
            <thead>
                <tr>
                    <th>"Order"</th>
                    <th>"Status"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let app = use_app();
    app.run(|s| async move {
        s.orders.fetch_all_ongoing_orders().await;
        s.orders.fetch_all_completed_orders().await;
    });

    let store = app.orders;

    view! {
        <StoreStatus
            loading=Signal::derive(move || store.with(|s| s.loading))
            error=Signal::derive(move || store.with(|s| s.error.clone()))
        />
        <Panel title="Ongoing orders">
            <OrderTable orders=Signal::derive(move || store.with(|s| s.data.ongoing.clone())) />
        </Panel>
        <Panel title="Completed orders">
            <OrderTable orders=Signal::derive(move || store.with(|s| s.data.completed.clone())) />
        </Panel>
    }
}

#[component]
pub fn OrderDetailsPage(id: EntityId) -> impl IntoView {
    let app = use_app();
    let store = app.orders;
    let order = RwSignal::new(Option::<Checkout>::None);
    let status = RwSignal::new(String::new());

    let load = {
        let id = id.clone();
        move || {
            let id = id.clone();
            app.run(move |s| async move {
                if let Ok(found) = s.orders.fetch_order_by_id(id).await {
                    status.set(cell_text(found.fields.get(STATUS_FIELD)));
                    order.set(Some(found));
                }
            });
        }
    };
    load();

    let on_submit = {
        let id = id.clone();
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let mut data = Fields::new();
            data.insert(
                "checkoutId".into(),
                serde_json::to_value(&id).unwrap_or(Value::Null),
            );
            data.insert(STATUS_FIELD.into(), Value::String(status.get_untracked()));
            let load = load.clone();
            app.run(move |s| async move {
                if s.orders.manage_checkout(data).await.is_ok() {
                    load();
                }
            });
        }
    };

    let details = move || {
        order.get().map(|found| {
            let row = to_row(&found);
            columns(std::slice::from_ref(&row))
                .into_iter()
                .map(|key| {
                    let value = cell_text(row.get(&key));
                    view! {
                        <tr>
                            <th>{key}</th>
                            <td>{value}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <Panel title=format!("Order {}", id)>
            <StoreStatus
                loading=Signal::derive(move || store.with(|s| s.loading))
                error=Signal::derive(move || store.with(|s| s.error.clone()))
            />
            <table class="table w-full">
                <tbody>{details}</tbody>
            </table>
            <form class="flex gap-2" on:submit=on_submit>
                <input
                    class="input input-bordered flex-1"
                    placeholder="Status"
                    prop:value=status
                    on:input=move |ev| status.set(event_target_value(&ev))
                />
                <button class="btn btn-primary">"Update status"</button>
            </form>
            <Link route=AppRoute::Orders class="link link-hover text-sm">"Back to orders"</Link>
        </Panel>
    }
}
