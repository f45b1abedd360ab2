use leptos::prelude::*;
use serde_json::Value;
use storeadmin_shared::Fields;

use crate::components::layout::Panel;
use crate::components::records::{RecordTable, StoreStatus, to_row};
use crate::state::use_app;

/// Sends notifications. The API has no listing call, so the table only
/// shows what was sent from this page, newest first.
#[component]
pub fn NotificationsPage() -> impl IntoView {
    let app = use_app();
    let store = app.notifications;
    let title = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut data = Fields::new();
        data.insert("title".into(), Value::String(title.get_untracked()));
        data.insert("message".into(), Value::String(message.get_untracked()));
        app.run(move |s| async move {
            if s.notifications.create_notification(data).await.is_ok() {
                title.set(String::new());
                message.set(String::new());
            }
        });
    };

    view! {
        <Panel title="Notifications">
            <form class="flex flex-col gap-2" on:submit=on_submit>
                <input
                    class="input input-bordered"
                    placeholder="Title"
                    required
                    prop:value=title
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    class="textarea textarea-bordered"
                    placeholder="Message"
                    prop:value=message
                    on:input=move |ev| message.set(event_target_value(&ev))
                ></textarea>
                <button class="btn btn-primary self-end">"Send"</button>
            </form>
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
