//! Products and categories: the two editable catalogs.

use js_sys::Uint8Array;
use leptos::html;
use leptos::prelude::*;
use serde_json::Value;
use storeadmin_shared::protocol::FilePart;
use storeadmin_shared::{Category, Entity, EntityId, Fields, ProductForm};
use wasm_bindgen_futures::JsFuture;

use crate::components::layout::Panel;
use crate::components::records::{StoreStatus, cell_text};
use crate::state::use_app;

/// Editable product fields, in form order.
const PRODUCT_FIELDS: [(&str, &str); 4] = [
    ("name", "Name"),
    ("price", "Price"),
    ("description", "Description"),
    ("categoryId", "Category id"),
];
const IMAGE_FIELD: &str = "image";

fn text_of(fields: &Fields, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// =========================================================
// Categories
// =========================================================

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let app = use_app();
    app.run(|s| async move { s.categories.fetch_categories().await });

    let store = app.categories;
    let name = RwSignal::new(String::new());
    let editing = RwSignal::new(Option::<Category>::None);

    let reset = move || {
        name.set(String::new());
        editing.set(None);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = name.get_untracked().trim().to_string();
        if value.is_empty() {
            return;
        }
        let target = editing.get_untracked();
        app.run(move |s| async move {
            // Failures surface through the store's error.
            let saved = match target {
                Some(mut category) => {
                    category.fields.insert("name".into(), Value::String(value));
                    s.categories.update_category(category).await.is_ok()
                }
                None => {
                    let mut fields = Fields::new();
                    fields.insert("name".into(), Value::String(value));
                    s.categories.create_category(fields).await.is_ok()
                }
            };
            if saved {
                reset();
            }
        });
    };

    let rows = move || {
        store
            .get()
            .data
            .into_iter()
            .map(|category| {
                let id = category.category_id.clone();
                let label = text_of(&category.fields, "name");
                let on_edit = {
                    let category = category.clone();
                    let label = label.clone();
                    move |_| {
                        name.set(label.clone());
                        editing.set(Some(category.clone()));
                    }
                };
                let on_delete = move |_| {
                    let id = id.clone();
                    app.run(move |s| async move {
                        // Failures surface through the store's error.
                        s.categories.delete_category(id).await.ok();
                    });
                };
                view! {
                    <tr>
                        <td>{category.category_id.to_string()}</td>
                        <td>{label}</td>
                        <td class="text-right space-x-2">
                            <button class="btn btn-ghost btn-xs" on:click=on_edit>"Edit"</button>
                            <button class="btn btn-ghost btn-xs text-error" on:click=on_delete>
                                "Delete"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <Panel title="Categories">
            <form class="flex gap-2" on:submit=on_submit>
                <input
                    class="input input-bordered flex-1"
                    placeholder="Category name"
                    prop:value=name
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <button class="btn btn-primary">
                    {move || if editing.get().is_some() { "Save" } else { "Add" }}
                </button>
                <Show when=move || editing.get().is_some()>
                    <button type="button" class="btn btn-ghost" on:click=move |_| reset()>
                        "Cancel"
                    </button>
                </Show>
            </form>
            <StoreStatus
                loading=Signal::derive(move || store.with(|s| s.loading))
                error=Signal::derive(move || store.with(|s| s.error.clone()))
            />
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Id"</th>
                        <th>"Name"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </Panel>
    }
}

// =========================================================
// Products
// =========================================================

/// Reads the selected file, if any, into a form part.
async fn read_image(input: Option<web_sys::HtmlInputElement>) -> Option<FilePart> {
    let file = input?.files()?.get(0)?;
    let buffer = JsFuture::from(file.array_buffer()).await.ok()?;
    Some(FilePart {
        field: IMAGE_FIELD.to_string(),
        file_name: file.name(),
        content_type: file.type_(),
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let app = use_app();
    app.run(|s| async move { s.products.fetch_products().await });

    let store = app.products;
    let values = RwSignal::new(vec![String::new(); PRODUCT_FIELDS.len()]);
    let editing = RwSignal::new(Option::<EntityId>::None);
    let image_ref = NodeRef::<html::Input>::new();

    let reset = move || {
        values.set(vec![String::new(); PRODUCT_FIELDS.len()]);
        editing.set(None);
        if let Some(input) = image_ref.get_untracked() {
            input.set_value("");
        }
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = values.get_untracked();
        let target = editing.get_untracked();
        let input = image_ref.get_untracked();
        app.run(move |s| async move {
            let mut form = ProductForm::new();
            if let Some(id) = target.clone() {
                form = form.with_id(id);
            }
            for ((key, _), value) in PRODUCT_FIELDS.iter().zip(current) {
                if !value.trim().is_empty() {
                    form = form.with_field(key, value.trim());
                }
            }
            if let Some(image) = read_image(input).await {
                form = form.with_image(image);
            }

            let saved = if target.is_some() {
                s.products.update_product(form).await.is_ok()
            } else {
                s.products.create_product(form).await.is_ok()
            };
            if saved {
                reset();
            }
        });
    };

    let inputs = PRODUCT_FIELDS
        .iter()
        .enumerate()
        .map(|(index, (_, label))| {
            view! {
                <input
                    class="input input-bordered"
                    placeholder=*label
                    prop:value=move || values.with(|v| v[index].clone())
                    on:input=move |ev| values.update(|v| v[index] = event_target_value(&ev))
                />
            }
        })
        .collect_view();

    let rows = move || {
        store
            .get()
            .data
            .into_iter()
            .map(|product| {
                let id = product.id().clone();
                let on_edit = {
                    let product = product.clone();
                    move |_| {
                        let loaded = PRODUCT_FIELDS
                            .iter()
                            .map(|(key, _)| text_of(&product.fields, key))
                            .collect();
                        values.set(loaded);
                        editing.set(Some(product.product_id.clone()));
                    }
                };
                let on_delete = {
                    let id = id.clone();
                    move |_| {
                        let id = id.clone();
                        app.run(move |s| async move {
                            // Failures surface through the store's error.
                            s.products.delete_product(id).await.ok();
                        });
                    }
                };
                let cells = PRODUCT_FIELDS
                    .iter()
                    .take(2)
                    .map(|(key, _)| view! { <td>{cell_text(product.fields.get(*key))}</td> })
                    .collect_view();
                view! {
                    <tr>
                        <td>{id.to_string()}</td>
                        {cells}
                        <td class="text-right space-x-2">
                            <button class="btn btn-ghost btn-xs" on:click=on_edit>"Edit"</button>
                            <button class="btn btn-ghost btn-xs text-error" on:click=on_delete>
                                "Delete"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <Panel title="Products">
            <form class="grid grid-cols-1 md:grid-cols-3 gap-2" on:submit=on_submit>
                {inputs}
                <input
                    type="file"
                    accept="image/*"
                    class="file-input file-input-bordered"
                    node_ref=image_ref
                />
                <div class="flex gap-2">
                    <button class="btn btn-primary">
                        {move || if editing.get().is_some() { "Save" } else { "Add product" }}
                    </button>
                    <Show when=move || editing.get().is_some()>
                        <button type="button" class="btn btn-ghost" on:click=move |_| reset()>
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
            <StoreStatus
                loading=Signal::derive(move || store.with(|s| s.loading))
                error=Signal::derive(move || store.with(|s| s.error.clone()))
            />
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Id"</th>
                        <th>"Name"</th>
                        <th>"Price"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </Panel>
    }
}
